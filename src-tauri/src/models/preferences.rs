use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::category::ProgramCategory;

/// ---------------------------------------------------------------------------
/// Constants
/// ---------------------------------------------------------------------------

pub const MIN_DAYS_PER_WEEK: u8 = 3;
pub const MAX_DAYS_PER_WEEK: u8 = 7;
pub const DEFAULT_DAYS_PER_WEEK: u8 = 4;
pub const DEFAULT_WEEKLY_MILEAGE: &str = "10-20";
pub const RACE_DATE_LEAD_DAYS: i64 = 90;

/// ---------------------------------------------------------------------------
/// Answer Vocabularies
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
  #[default]
  Beginner,
  Intermediate,
  Advanced,
}

impl ExperienceLevel {
  pub const ALL: [ExperienceLevel; 3] = [Self::Beginner, Self::Intermediate, Self::Advanced];

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Beginner => "beginner",
      Self::Intermediate => "intermediate",
      Self::Advanced => "advanced",
    }
  }

  pub fn description(&self) -> &'static str {
    match self {
      Self::Beginner => "Running < 6 months or returning.",
      Self::Intermediate => "Consistent runner for 6+ months.",
      Self::Advanced => "Competitive runner, structured training.",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
  #[default]
  Finish,
  Time,
  /// Legal value that no step offers
  Aggressive,
  Fitness,
  WeightLoss,
}

impl GoalType {
  /// Goals the goal step lets the runner pick
  pub const OFFERED: [GoalType; 4] = [Self::Finish, Self::Time, Self::Fitness, Self::WeightLoss];

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Finish => "finish",
      Self::Time => "time",
      Self::Aggressive => "aggressive",
      Self::Fitness => "fitness",
      Self::WeightLoss => "weight_loss",
    }
  }

  /// (label, description) shown on the goal step; `None` for goals no step offers
  pub fn display(&self) -> Option<(&'static str, &'static str)> {
    match self {
      Self::Finish => Some(("Just Finish", "Run the distance")),
      Self::Time => Some(("Time Goal", "Beat a specific time")),
      Self::Fitness => Some(("Fitness", "Feel healthier")),
      Self::WeightLoss => Some(("Burn", "Maximize calories")),
      Self::Aggressive => None,
    }
  }
}

/// Activity level picked on the couch-to-5K fitness step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessLevel {
  Sedentary,
  LightlyActive,
  Active,
  Runner,
}

impl FitnessLevel {
  pub const ALL: [FitnessLevel; 4] = [
    Self::Sedentary,
    Self::LightlyActive,
    Self::Active,
    Self::Runner,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Sedentary => "sedentary",
      Self::LightlyActive => "lightly_active",
      Self::Active => "active",
      Self::Runner => "runner",
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      Self::Sedentary => "Sedentary",
      Self::LightlyActive => "Lightly Active (Walks)",
      Self::Active => "Active (Gym/Sports)",
      Self::Runner => "Runner",
    }
  }

  /// Only existing runners skip the beginner track
  pub fn experience(&self) -> ExperienceLevel {
    match self {
      Self::Runner => ExperienceLevel::Intermediate,
      _ => ExperienceLevel::Beginner,
    }
  }
}

pub const MILEAGE_OPTIONS: [&str; 5] = ["0-5", "5-15", "15-25", "25-40", "40+"];
pub const FITNESS_STEP_MILEAGE: &str = "0-5";

pub const RUN_WALK_OPTIONS: [&str; 5] = [
  "30s run / 30s walk",
  "1 min run / 1 min walk",
  "2 min run / 1 min walk",
  "3 min run / 1 min walk",
  "Custom",
];

/// ---------------------------------------------------------------------------
/// Error Types
/// ---------------------------------------------------------------------------

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreferenceError {
  #[error("Days per week must be between 3 and 7, got {0}")]
  DaysOutOfRange(u8),

  #[error("Weekly mileage cannot be empty")]
  EmptyMileage,
}

/// ---------------------------------------------------------------------------
/// User Preferences
/// ---------------------------------------------------------------------------

/// Answers accumulated across one pass through the wizard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
  pub category: ProgramCategory,
  pub experience: ExperienceLevel,
  pub weekly_mileage: String,
  pub goal: GoalType,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub goal_detail: Option<String>,
  pub days_per_week: u8,
  pub has_injuries: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub race_date: Option<NaiveDate>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub current_pr: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub run_walk_ratio: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub longest_run: Option<String>,
}

impl UserPreferences {
  /// Seeded defaults for a fresh session; race date lands 90 days out
  pub fn new(category: ProgramCategory, today: NaiveDate) -> Self {
    Self {
      category,
      experience: ExperienceLevel::Beginner,
      weekly_mileage: DEFAULT_WEEKLY_MILEAGE.to_string(),
      goal: GoalType::Finish,
      goal_detail: None,
      days_per_week: DEFAULT_DAYS_PER_WEEK,
      has_injuries: false,
      race_date: Some(today + Duration::days(RACE_DATE_LEAD_DAYS)),
      current_pr: None,
      run_walk_ratio: None,
      longest_run: None,
    }
  }

  /// Merge a partial update. The update is checked as a whole first so a
  /// rejected update leaves every field untouched.
  pub fn apply(&mut self, update: PreferencesUpdate) -> Result<(), PreferenceError> {
    update.validate()?;

    if let Some(experience) = update.experience {
      self.experience = experience;
    }
    if let Some(mileage) = update.weekly_mileage {
      self.weekly_mileage = mileage.trim().to_string();
    }
    if let Some(goal) = update.goal {
      self.goal = goal;
    }
    if let Some(detail) = update.goal_detail {
      self.goal_detail = non_blank(detail);
    }
    if let Some(days) = update.days_per_week {
      self.days_per_week = days;
    }
    if let Some(has_injuries) = update.has_injuries {
      self.has_injuries = has_injuries;
    }
    if let Some(date) = update.race_date {
      self.race_date = Some(date);
    }
    if let Some(pr) = update.current_pr {
      self.current_pr = non_blank(pr);
    }
    if let Some(ratio) = update.run_walk_ratio {
      self.run_walk_ratio = non_blank(ratio);
    }
    if let Some(longest) = update.longest_run {
      self.longest_run = non_blank(longest);
    }

    Ok(())
  }
}

/// Free-text inputs clear the field when emptied
fn non_blank(value: String) -> Option<String> {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    None
  } else {
    Some(trimmed.to_string())
  }
}

/// ---------------------------------------------------------------------------
/// Partial Updates
/// ---------------------------------------------------------------------------

/// Identifies a single preference field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PreferenceField {
  Experience,
  WeeklyMileage,
  Goal,
  GoalDetail,
  DaysPerWeek,
  HasInjuries,
  RaceDate,
  CurrentPr,
  RunWalkRatio,
  LongestRun,
}

/// A set of field writes; absent fields are left alone.
///
/// The category is deliberately not updatable: changing it means starting a
/// new session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreferencesUpdate {
  pub experience: Option<ExperienceLevel>,
  pub weekly_mileage: Option<String>,
  pub goal: Option<GoalType>,
  pub goal_detail: Option<String>,
  pub days_per_week: Option<u8>,
  pub has_injuries: Option<bool>,
  pub race_date: Option<NaiveDate>,
  pub current_pr: Option<String>,
  pub run_walk_ratio: Option<String>,
  pub longest_run: Option<String>,
}

impl PreferencesUpdate {
  pub fn validate(&self) -> Result<(), PreferenceError> {
    if let Some(days) = self.days_per_week {
      if !(MIN_DAYS_PER_WEEK..=MAX_DAYS_PER_WEEK).contains(&days) {
        return Err(PreferenceError::DaysOutOfRange(days));
      }
    }
    if let Some(mileage) = &self.weekly_mileage {
      if mileage.trim().is_empty() {
        return Err(PreferenceError::EmptyMileage);
      }
    }
    Ok(())
  }

  /// Fields this update writes
  pub fn fields(&self) -> Vec<PreferenceField> {
    let mut fields = Vec::new();
    if self.experience.is_some() {
      fields.push(PreferenceField::Experience);
    }
    if self.weekly_mileage.is_some() {
      fields.push(PreferenceField::WeeklyMileage);
    }
    if self.goal.is_some() {
      fields.push(PreferenceField::Goal);
    }
    if self.goal_detail.is_some() {
      fields.push(PreferenceField::GoalDetail);
    }
    if self.days_per_week.is_some() {
      fields.push(PreferenceField::DaysPerWeek);
    }
    if self.has_injuries.is_some() {
      fields.push(PreferenceField::HasInjuries);
    }
    if self.race_date.is_some() {
      fields.push(PreferenceField::RaceDate);
    }
    if self.current_pr.is_some() {
      fields.push(PreferenceField::CurrentPr);
    }
    if self.run_walk_ratio.is_some() {
      fields.push(PreferenceField::RunWalkRatio);
    }
    if self.longest_run.is_some() {
      fields.push(PreferenceField::LongestRun);
    }
    fields
  }

  pub fn is_empty(&self) -> bool {
    self.fields().is_empty()
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
