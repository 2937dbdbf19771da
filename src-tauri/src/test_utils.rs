//! Test utilities and helpers for unit and command testing
//!
//! This module provides common test infrastructure including:
//! - Mock data factories
//! - Stub plan generators
//! - Shared app state for command tests

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;
use std::sync::{Arc, Mutex};

use crate::llm::{LlmError, PlanGenerator};
use crate::models::{
  DayName, DayPlan, ProgramCategory, TrainingPlan, UserPreferences, WeeklyPlan, Workout,
  WorkoutType,
};
use crate::state::AppState;

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

/// Fixed "today" (2025-03-11); the seeded race date lands on 2025-06-09
pub fn mock_today() -> NaiveDate {
  NaiveDate::from_ymd_opt(2025, 3, 11).unwrap()
}

/// Default preferences for a category, as a fresh session would seed them
pub fn mock_preferences(category: ProgramCategory) -> UserPreferences {
  UserPreferences::new(category, mock_today())
}

fn workout(workout_type: WorkoutType, distance: Option<&str>, description: &str) -> Workout {
  Workout {
    workout_type,
    distance: distance.map(str::to_string),
    description: description.to_string(),
    notes: None,
  }
}

/// Create a small two-week plan
pub fn mock_training_plan() -> TrainingPlan {
  let week = |week_number: u32, focus: &str, long_run: &str| WeeklyPlan {
    week_number,
    focus: Some(focus.to_string()),
    total_distance_approx: Some("22 miles".to_string()),
    schedule: vec![
      DayPlan {
        day_name: DayName::Monday,
        workout: workout(WorkoutType::Rest, None, "Rest day"),
      },
      DayPlan {
        day_name: DayName::Wednesday,
        workout: workout(WorkoutType::Tempo, Some("5 miles"), "Tempo run"),
      },
      DayPlan {
        day_name: DayName::Saturday,
        workout: workout(WorkoutType::LongRun, Some(long_run), "Long run"),
      },
    ],
    tips: vec!["Practice fueling on the long run.".to_string()],
  };

  TrainingPlan {
    category: Some("marathon".to_string()),
    title: "Marathon Build".to_string(),
    summary: Some("Sixteen weeks from base to race day.".to_string()),
    weeks: vec![week(1, "Base Building", "10 miles"), week(2, "Base Building", "11 miles")],
  }
}

/// The mock plan as the generator would return it on the wire
pub fn mock_plan_json() -> String {
  serde_json::to_string(&mock_training_plan()).unwrap()
}

/// ---------------------------------------------------------------------------
/// Stub Generators
/// ---------------------------------------------------------------------------

/// Records every prompt it receives and answers with a canned result
pub struct RecordingGenerator {
  result: Result<TrainingPlan, LlmError>,
  prompts: Mutex<Vec<String>>,
}

impl RecordingGenerator {
  pub fn returning(plan: TrainingPlan) -> Self {
    Self {
      result: Ok(plan),
      prompts: Mutex::new(Vec::new()),
    }
  }

  pub fn failing(error: LlmError) -> Self {
    Self {
      result: Err(error),
      prompts: Mutex::new(Vec::new()),
    }
  }

  pub fn prompts(&self) -> Vec<String> {
    self.prompts.lock().unwrap().clone()
  }

  pub fn call_count(&self) -> usize {
    self.prompts.lock().unwrap().len()
  }
}

#[async_trait]
impl PlanGenerator for RecordingGenerator {
  async fn submit(&self, prompt: &str, _schema: &Value) -> Result<TrainingPlan, LlmError> {
    self.prompts.lock().unwrap().push(prompt.to_string());
    self.result.clone()
  }
}

/// ---------------------------------------------------------------------------
/// App State
/// ---------------------------------------------------------------------------

/// App state wired to a stub generator; returns the stub for assertions
pub fn mock_app_state(generator: RecordingGenerator) -> (Arc<AppState>, Arc<RecordingGenerator>) {
  let generator = Arc::new(generator);
  let state = Arc::new(AppState::with_generator(generator.clone()));
  (state, generator)
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_mock_factories_create_valid_data() {
    let prefs = mock_preferences(ProgramCategory::Marathon);
    assert_eq!(prefs.race_date, NaiveDate::from_ymd_opt(2025, 6, 9));

    let plan = mock_training_plan();
    assert_eq!(plan.week_count(), 2);
    assert_eq!(plan.workout_count(), 6);

    let parsed: TrainingPlan = serde_json::from_str(&mock_plan_json()).unwrap();
    assert_eq!(parsed, plan);
  }

  #[tokio::test]
  async fn test_recording_generator_counts_calls() {
    let stub = RecordingGenerator::failing(LlmError::Api("boom".into()));
    let result = stub.submit("first", &Value::Null).await;

    assert!(matches!(result, Err(LlmError::Api(_))));
    assert_eq!(stub.call_count(), 1);
    assert_eq!(stub.prompts(), vec!["first".to_string()]);
  }
}
