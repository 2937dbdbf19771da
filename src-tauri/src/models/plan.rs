use serde::{Deserialize, Serialize};

/// Workout tags the generator is allowed to emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
  Run,
  Cross,
  Rest,
  LongRun,
  Speed,
  Tempo,
  Recovery,
  Walk,
  Interval,
  Strength,
}

impl WorkoutType {
  pub const ALL: [WorkoutType; 10] = [
    Self::Run,
    Self::Cross,
    Self::Rest,
    Self::LongRun,
    Self::Speed,
    Self::Tempo,
    Self::Recovery,
    Self::Walk,
    Self::Interval,
    Self::Strength,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Run => "run",
      Self::Cross => "cross",
      Self::Rest => "rest",
      Self::LongRun => "long_run",
      Self::Speed => "speed",
      Self::Tempo => "tempo",
      Self::Recovery => "recovery",
      Self::Walk => "walk",
      Self::Interval => "interval",
      Self::Strength => "strength",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayName {
  Monday,
  Tuesday,
  Wednesday,
  Thursday,
  Friday,
  Saturday,
  Sunday,
}

impl DayName {
  pub const ALL: [DayName; 7] = [
    Self::Monday,
    Self::Tuesday,
    Self::Wednesday,
    Self::Thursday,
    Self::Friday,
    Self::Saturday,
    Self::Sunday,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Monday => "Monday",
      Self::Tuesday => "Tuesday",
      Self::Wednesday => "Wednesday",
      Self::Thursday => "Thursday",
      Self::Friday => "Friday",
      Self::Saturday => "Saturday",
      Self::Sunday => "Sunday",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
  #[serde(rename = "type")]
  pub workout_type: WorkoutType,
  /// Distance or duration, e.g. "5 miles" or "45 mins"
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub distance: Option<String>,
  pub description: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
  pub day_name: DayName,
  pub workout: Workout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyPlan {
  pub week_number: u32,
  /// e.g. "Base Building", "Peak Week", "Taper"
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub focus: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub total_distance_approx: Option<String>,
  pub schedule: Vec<DayPlan>,
  /// Fueling, mental, etc.
  pub tips: Vec<String>,
}

/// Multi-week plan as returned by the generator. Read-only once received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingPlan {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub category: Option<String>,
  pub title: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub summary: Option<String>,
  pub weeks: Vec<WeeklyPlan>,
}

impl TrainingPlan {
  pub fn week_count(&self) -> usize {
    self.weeks.len()
  }

  pub fn workout_count(&self) -> usize {
    self.weeks.iter().map(|w| w.schedule.len()).sum()
  }
}
