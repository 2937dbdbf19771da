//! Plan request builder
//!
//! Turns finished preferences into the prompt text and response schema sent
//! to the plan generator. Pure: the same preferences always build the same
//! request.

use serde::Serialize;
use serde_json::{json, Value};

use crate::models::{DayName, ProgramCategory, UserPreferences, WorkoutType};

/// ---------------------------------------------------------------------------
/// Category Rules
/// ---------------------------------------------------------------------------

pub const DEFAULT_RUN_WALK_RATIO: &str = "3 min run / 1 min walk";

/// Plan length and category-specific coaching rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRules {
  pub weeks: u8,
  pub rules: String,
}

impl CategoryRules {
  pub fn for_preferences(prefs: &UserPreferences) -> Self {
    let (weeks, rules) = match prefs.category {
      ProgramCategory::Marathon => (
        16,
        "Build long runs to 20 miles. Taper last 2 weeks. Fueling strategy is critical.".to_string(),
      ),
      ProgramCategory::HalfMarathon => (
        12,
        "Build long runs to 12-14 miles. Mix of endurance and tempo.".to_string(),
      ),
      ProgramCategory::FifteenK => (
        10,
        "Focus on 9-10 mile endurance and threshold pace.".to_string(),
      ),
      ProgramCategory::TenK => (
        8,
        "Focus on speed endurance. Intervals at 5k/10k pace.".to_string(),
      ),
      ProgramCategory::FiveK => (
        8,
        "Focus on VO2 max, speed intervals (400m/800m), and tempo.".to_string(),
      ),
      ProgramCategory::CouchTo5k => (
        9,
        "Couch to 5K structure. Start with Run/Walk intervals. Progress to continuous running by week 9. Be very gentle.".to_string(),
      ),
      ProgramCategory::BaseBuilding => (
        8,
        "All easy aerobic mileage. No hard speedwork. Focus on consistency and increasing time on feet.".to_string(),
      ),
      ProgramCategory::Speed => (
        8,
        "Aggressive interval training. Track workouts. Hill repeats. Focus on lowering PR.".to_string(),
      ),
      ProgramCategory::RunWalk => (
        12,
        format!(
          "Utilize the Jeff Galloway method or similar. Run/Walk ratio of {}. Focus on distance over speed.",
          prefs.run_walk_ratio.as_deref().unwrap_or(DEFAULT_RUN_WALK_RATIO)
        ),
      ),
      ProgramCategory::WeightLoss => (
        12,
        "Focus on caloric burn (Zone 2 HR). Consistent movement. Include cross-training instructions for strength.".to_string(),
      ),
    };

    Self { weeks, rules }
  }

  /// e.g. "16 weeks"
  pub fn duration_label(&self) -> String {
    format!("{} weeks", self.weeks)
  }
}

/// ---------------------------------------------------------------------------
/// Plan Request
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct PlanRequest {
  pub prompt: String,
  pub schema: Value,
  pub duration: String,
}

impl PlanRequest {
  pub fn build(prefs: &UserPreferences) -> Self {
    let rules = CategoryRules::for_preferences(prefs);
    let duration = rules.duration_label();

    Self {
      prompt: build_prompt(prefs, &rules),
      schema: plan_schema(),
      duration,
    }
  }
}

fn goal_line(prefs: &UserPreferences) -> String {
  let detail = prefs
    .goal_detail
    .as_deref()
    .map(str::trim)
    .filter(|d| !d.is_empty())
    .unwrap_or("General");
  format!("- Goal: {} ({})", prefs.goal.as_str(), detail)
}

fn build_prompt(prefs: &UserPreferences, rules: &CategoryRules) -> String {
  let duration = rules.duration_label();

  let mut profile = vec![
    format!("- Program Type: {}", prefs.category.as_str()),
    format!("- Experience: {}", prefs.experience.as_str()),
    format!("- Current Mileage: {}", prefs.weekly_mileage),
    goal_line(prefs),
    format!("- Available Days: {}", prefs.days_per_week),
    format!(
      "- Injuries: {}",
      if prefs.has_injuries {
        "Yes (Needs low impact/caution options)"
      } else {
        "None"
      }
    ),
  ];
  if let Some(date) = prefs.race_date {
    profile.push(format!("- Race Date: {}", date.format("%Y-%m-%d")));
  }
  if let Some(pr) = &prefs.current_pr {
    profile.push(format!("- Current PR: {}", pr));
  }
  if let Some(longest) = &prefs.longest_run {
    profile.push(format!("- Longest Recent Run: {}", longest));
  }

  format!(
    r#"Create a personalized {duration} running training plan.

USER PROFILE:
{profile}

RULES & LOGIC:
1. Structure: Generate exactly {duration}.
2. Category Specifics: {rules}
3. General Philosophy:
   - Beginner: Lower volume, safe progression.
   - Advanced: Higher intensity, specific pacing.
   - Recovery: Every 4th week should be lower volume.
   - Long Runs: Essential for distance plans (Weekend).
4. Content:
   - Include warmups/cooldowns in descriptions.
   - Add nutritional/mental tips in the 'tips' array.
   - Tone: Inspiring, professional, modern coach."#,
    duration = duration,
    profile = profile.join("\n"),
    rules = rules.rules,
  )
}

/// ---------------------------------------------------------------------------
/// Response Schema
/// ---------------------------------------------------------------------------

/// Response schema in the OpenAPI subset the generator accepts
pub fn plan_schema() -> Value {
  let workout_types: Vec<&str> = WorkoutType::ALL.iter().map(|t| t.as_str()).collect();
  let day_names: Vec<&str> = DayName::ALL.iter().map(|d| d.as_str()).collect();

  let workout = json!({
    "type": "OBJECT",
    "properties": {
      "type": { "type": "STRING", "enum": workout_types },
      "distance": { "type": "STRING", "description": "Distance or duration, e.g., '5 miles' or '45 mins'" },
      "description": { "type": "STRING", "description": "Brief title of workout" },
      "notes": { "type": "STRING", "description": "Specific pacing or execution notes" }
    },
    "required": ["type", "description"]
  });

  let day = json!({
    "type": "OBJECT",
    "properties": {
      "dayName": { "type": "STRING", "enum": day_names },
      "workout": workout
    },
    "required": ["dayName", "workout"]
  });

  let week = json!({
    "type": "OBJECT",
    "properties": {
      "weekNumber": { "type": "INTEGER" },
      "focus": { "type": "STRING", "description": "Main focus of the week" },
      "totalDistanceApprox": { "type": "STRING" },
      "schedule": { "type": "ARRAY", "items": day },
      "tips": { "type": "ARRAY", "items": { "type": "STRING" } }
    },
    "required": ["weekNumber", "schedule", "tips"]
  });

  json!({
    "type": "OBJECT",
    "properties": {
      "category": { "type": "STRING" },
      "title": { "type": "STRING" },
      "summary": { "type": "STRING" },
      "weeks": { "type": "ARRAY", "items": week }
    },
    "required": ["title", "weeks"]
  })
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
