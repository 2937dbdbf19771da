//! Step Catalog
//!
//! Static tables describing the wizard:
//! - which question screens each program category walks through, in order
//! - the title/subtitle and input shape of every screen
//! - which preference fields each screen is allowed to write
//!
//! Tables are `match`-backed so an unmapped category or step cannot compile;
//! `validate_catalog` checks the remaining shape rules once at startup.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::models::preferences::{
    FITNESS_STEP_MILEAGE, MAX_DAYS_PER_WEEK, MILEAGE_OPTIONS, MIN_DAYS_PER_WEEK, RUN_WALK_OPTIONS,
};
use crate::models::{
    ExperienceLevel, FitnessLevel, GoalType, PreferenceField, PreferencesUpdate, ProgramCategory,
};

// ---------------------------------------------------------------------------
/// Step Identifiers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepId {
    #[serde(rename = "experience")]
    Experience,
    #[serde(rename = "mileage")]
    Mileage,
    #[serde(rename = "goal")]
    Goal,
    #[serde(rename = "days")]
    Days,
    #[serde(rename = "injury")]
    Injury,
    #[serde(rename = "date")]
    Date,
    #[serde(rename = "pr")]
    Pr,
    #[serde(rename = "runwalk")]
    RunWalk,
    #[serde(rename = "fitness")]
    Fitness,
    #[serde(rename = "longestRun")]
    LongestRun,
}

impl StepId {
    pub const ALL: [StepId; 10] = [
        Self::Experience,
        Self::Mileage,
        Self::Goal,
        Self::Days,
        Self::Injury,
        Self::Date,
        Self::Pr,
        Self::RunWalk,
        Self::Fitness,
        Self::LongestRun,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Experience => "experience",
            Self::Mileage => "mileage",
            Self::Goal => "goal",
            Self::Days => "days",
            Self::Injury => "injury",
            Self::Date => "date",
            Self::Pr => "pr",
            Self::RunWalk => "runwalk",
            Self::Fitness => "fitness",
            Self::LongestRun => "longestRun",
        }
    }

    /// (title, subtitle) for the step header
    pub fn heading(&self) -> (&'static str, &'static str) {
        match self {
            Self::Experience => ("Running Experience", "What's your background?"),
            Self::Mileage => ("Weekly Mileage", "How much are you running now?"),
            Self::LongestRun => ("Longest Run", "What's the longest you've run recently?"),
            Self::Goal => ("Main Goal", "What are you aiming for?"),
            Self::Days => ("Schedule", "How many days can you train?"),
            Self::Injury => ("Injury History", "Any concerns we should know about?"),
            Self::Date => ("Race Date", "When is the big day?"),
            Self::Pr => ("Current Best", "What is your current PR or typical pace?"),
            Self::RunWalk => ("Run/Walk Ratio", "Preferred interval style?"),
            Self::Fitness => ("Current Fitness", "How active are you currently?"),
        }
    }

    /// Preference fields this step's input reads and writes
    pub fn fields(&self) -> &'static [PreferenceField] {
        match self {
            Self::Experience => &[PreferenceField::Experience],
            Self::Mileage => &[PreferenceField::WeeklyMileage],
            Self::LongestRun => &[PreferenceField::LongestRun],
            Self::Goal => &[PreferenceField::Goal, PreferenceField::GoalDetail],
            Self::Days => &[PreferenceField::DaysPerWeek],
            Self::Injury => &[PreferenceField::HasInjuries],
            Self::Date => &[PreferenceField::RaceDate],
            Self::Pr => &[PreferenceField::CurrentPr],
            Self::RunWalk => &[PreferenceField::RunWalkRatio],
            Self::Fitness => &[PreferenceField::Experience, PreferenceField::WeeklyMileage],
        }
    }

    pub fn input(&self) -> StepInput {
        match self {
            Self::Experience => StepInput::Choice {
                options: ExperienceLevel::ALL
                    .iter()
                    .map(|e| StepOption::new(e.as_str(), e.as_str(), Some(e.description())))
                    .collect(),
            },
            Self::Mileage => StepInput::Choice {
                options: MILEAGE_OPTIONS
                    .iter()
                    .map(|m| StepOption::new(m, &format!("{} miles / week", m), None))
                    .collect(),
            },
            Self::Goal => StepInput::Choice {
                options: GoalType::OFFERED
                    .iter()
                    .filter_map(|g| {
                        let (label, description) = g.display()?;
                        Some(StepOption::new(g.as_str(), label, Some(description)))
                    })
                    .collect(),
            },
            Self::RunWalk => StepInput::Choice {
                options: RUN_WALK_OPTIONS
                    .iter()
                    .map(|r| StepOption::new(r, r, None))
                    .collect(),
            },
            Self::Fitness => StepInput::Choice {
                options: FitnessLevel::ALL
                    .iter()
                    .map(|f| StepOption::new(f.as_str(), f.label(), None))
                    .collect(),
            },
            Self::Days => StepInput::Range {
                min: MIN_DAYS_PER_WEEK,
                max: MAX_DAYS_PER_WEEK,
            },
            Self::Injury => StepInput::Toggle {
                off_label: "I'm healthy".to_string(),
                on_label: "Managing issues".to_string(),
            },
            Self::Date => StepInput::Date,
            Self::Pr => StepInput::Text {
                placeholder: "e.g. 24:30 for 5k".to_string(),
            },
            Self::LongestRun => StepInput::Text {
                placeholder: "e.g. 6 miles, 45 mins".to_string(),
            },
        }
    }

    pub fn details(&self) -> StepDetails {
        let (title, subtitle) = self.heading();
        StepDetails {
            id: *self,
            title,
            subtitle,
            input: self.input(),
        }
    }
}

impl std::fmt::Display for StepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StepId {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|step| step.as_str() == s)
            .ok_or_else(|| format!("Unknown step: {}", s))
    }
}

// ---------------------------------------------------------------------------
/// Step Display Metadata
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepOption {
    pub value: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl StepOption {
    fn new(value: &str, label: &str, description: Option<&str>) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
            description: description.map(str::to_string),
        }
    }
}

/// Shape of the input widget a step renders
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepInput {
    Choice { options: Vec<StepOption> },
    Range { min: u8, max: u8 },
    Toggle { off_label: String, on_label: String },
    Date,
    Text { placeholder: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepDetails {
    pub id: StepId,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub input: StepInput,
}

// ---------------------------------------------------------------------------
/// Category -> Step Sequence
// ---------------------------------------------------------------------------

const DISTANCE_WITH_LONG_RUN: &[StepId] = &[
    StepId::Experience,
    StepId::Mileage,
    StepId::LongestRun,
    StepId::Goal,
    StepId::Days,
    StepId::Injury,
    StepId::Date,
];

const SHORT_RACE: &[StepId] = &[
    StepId::Experience,
    StepId::Mileage,
    StepId::Goal,
    StepId::Days,
    StepId::Injury,
    StepId::Date,
];

const COUCH_TO_5K: &[StepId] = &[StepId::Fitness, StepId::Days, StepId::Goal, StepId::Injury];

const GENERAL_FITNESS: &[StepId] = &[
    StepId::Experience,
    StepId::Mileage,
    StepId::Days,
    StepId::Injury,
];

const SPEED: &[StepId] = &[
    StepId::Experience,
    StepId::Mileage,
    StepId::Pr,
    StepId::Goal,
    StepId::Days,
    StepId::Injury,
];

const RUN_WALK: &[StepId] = &[
    StepId::Experience,
    StepId::RunWalk,
    StepId::Days,
    StepId::Goal,
    StepId::Injury,
    StepId::Date,
];

/// Ordered question screens for a category. Always the same static slice.
pub fn steps_for(category: ProgramCategory) -> &'static [StepId] {
    match category {
        ProgramCategory::Marathon | ProgramCategory::HalfMarathon => DISTANCE_WITH_LONG_RUN,
        ProgramCategory::FifteenK | ProgramCategory::TenK | ProgramCategory::FiveK => SHORT_RACE,
        ProgramCategory::CouchTo5k => COUCH_TO_5K,
        ProgramCategory::BaseBuilding | ProgramCategory::WeightLoss => GENERAL_FITNESS,
        ProgramCategory::Speed => SPEED,
        ProgramCategory::RunWalk => RUN_WALK,
    }
}

// ---------------------------------------------------------------------------
/// Startup Validation
// ---------------------------------------------------------------------------

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("No steps registered for category {0}")]
    EmptySequence(ProgramCategory),

    #[error("Step {step} appears more than once for category {category}")]
    DuplicateStep {
        category: ProgramCategory,
        step: StepId,
    },

    #[error("Step {0} has no display metadata")]
    MissingMetadata(StepId),

    #[error("Step {0} does not own any preference field")]
    NoOwnedFields(StepId),
}

/// Check every table once. A failure here is a build defect, so the app
/// refuses to start rather than fail mid-session.
pub fn validate_catalog() -> Result<(), CatalogError> {
    for step in StepId::ALL {
        let (title, subtitle) = step.heading();
        if title.is_empty() || subtitle.is_empty() {
            return Err(CatalogError::MissingMetadata(step));
        }
        if step.fields().is_empty() {
            return Err(CatalogError::NoOwnedFields(step));
        }
    }

    for category in ProgramCategory::ALL {
        validate_sequence(category, steps_for(category))?;
    }

    Ok(())
}

fn validate_sequence(category: ProgramCategory, steps: &[StepId]) -> Result<(), CatalogError> {
    if steps.is_empty() {
        return Err(CatalogError::EmptySequence(category));
    }

    let mut seen = HashSet::new();
    for step in steps {
        if !seen.insert(*step) {
            return Err(CatalogError::DuplicateStep {
                category,
                step: *step,
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
/// Step Answers
// ---------------------------------------------------------------------------

/// A typed answer for one step. Each variant only produces writes to the
/// fields its step owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", content = "value")]
pub enum StepAnswer {
    #[serde(rename = "experience")]
    Experience(ExperienceLevel),
    #[serde(rename = "mileage")]
    Mileage(String),
    #[serde(rename = "longestRun")]
    LongestRun(String),
    #[serde(rename = "goal")]
    Goal {
        goal: GoalType,
        #[serde(default)]
        detail: Option<String>,
    },
    #[serde(rename = "days")]
    Days(u8),
    #[serde(rename = "injury")]
    Injury(bool),
    #[serde(rename = "date")]
    Date(NaiveDate),
    #[serde(rename = "pr")]
    Pr(String),
    #[serde(rename = "runwalk")]
    RunWalk(String),
    #[serde(rename = "fitness")]
    Fitness(FitnessLevel),
}

impl StepAnswer {
    pub fn step(&self) -> StepId {
        match self {
            Self::Experience(_) => StepId::Experience,
            Self::Mileage(_) => StepId::Mileage,
            Self::LongestRun(_) => StepId::LongestRun,
            Self::Goal { .. } => StepId::Goal,
            Self::Days(_) => StepId::Days,
            Self::Injury(_) => StepId::Injury,
            Self::Date(_) => StepId::Date,
            Self::Pr(_) => StepId::Pr,
            Self::RunWalk(_) => StepId::RunWalk,
            Self::Fitness(_) => StepId::Fitness,
        }
    }

    pub fn into_update(self) -> PreferencesUpdate {
        let mut update = PreferencesUpdate::default();
        match self {
            Self::Experience(level) => update.experience = Some(level),
            Self::Mileage(range) => update.weekly_mileage = Some(range),
            Self::LongestRun(text) => update.longest_run = Some(text),
            Self::Goal { goal, detail } => {
                update.goal = Some(goal);
                update.goal_detail = detail;
            }
            Self::Days(days) => update.days_per_week = Some(days),
            Self::Injury(flag) => update.has_injuries = Some(flag),
            Self::Date(date) => update.race_date = Some(date),
            Self::Pr(text) => update.current_pr = Some(text),
            Self::RunWalk(ratio) => update.run_walk_ratio = Some(ratio),
            Self::Fitness(level) => {
                update.experience = Some(level.experience());
                update.weekly_mileage = Some(FITNESS_STEP_MILEAGE.to_string());
            }
        }
        update
    }
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_valid() {
        assert_eq!(validate_catalog(), Ok(()));
    }

    #[test]
    fn test_sequences_match_table() {
        use StepId::*;
        let expected: [(ProgramCategory, &[StepId]); 10] = [
            (
                ProgramCategory::Marathon,
                &[Experience, Mileage, LongestRun, Goal, Days, Injury, Date],
            ),
            (
                ProgramCategory::HalfMarathon,
                &[Experience, Mileage, LongestRun, Goal, Days, Injury, Date],
            ),
            (ProgramCategory::FifteenK, &[Experience, Mileage, Goal, Days, Injury, Date]),
            (ProgramCategory::TenK, &[Experience, Mileage, Goal, Days, Injury, Date]),
            (ProgramCategory::FiveK, &[Experience, Mileage, Goal, Days, Injury, Date]),
            (ProgramCategory::CouchTo5k, &[Fitness, Days, Goal, Injury]),
            (ProgramCategory::BaseBuilding, &[Experience, Mileage, Days, Injury]),
            (ProgramCategory::Speed, &[Experience, Mileage, Pr, Goal, Days, Injury]),
            (ProgramCategory::RunWalk, &[Experience, RunWalk, Days, Goal, Injury, Date]),
            (ProgramCategory::WeightLoss, &[Experience, Mileage, Days, Injury]),
        ];

        for (category, steps) in expected {
            assert_eq!(steps_for(category), steps, "sequence for {}", category);
        }
    }

    #[test]
    fn test_steps_for_is_deterministic() {
        for category in ProgramCategory::ALL {
            assert!(std::ptr::eq(steps_for(category), steps_for(category)));
        }
    }

    #[test]
    fn test_duplicate_step_detected() {
        let result = validate_sequence(
            ProgramCategory::FiveK,
            &[StepId::Days, StepId::Goal, StepId::Days],
        );
        assert_eq!(
            result,
            Err(CatalogError::DuplicateStep {
                category: ProgramCategory::FiveK,
                step: StepId::Days,
            })
        );
    }

    #[test]
    fn test_empty_sequence_detected() {
        let result = validate_sequence(ProgramCategory::Speed, &[]);
        assert_eq!(result, Err(CatalogError::EmptySequence(ProgramCategory::Speed)));
    }

    #[test]
    fn test_step_wire_names() {
        let json = serde_json::to_string(&StepId::LongestRun).unwrap();
        assert_eq!(json, r#""longestRun""#);
        assert_eq!("runwalk".parse::<StepId>(), Ok(StepId::RunWalk));
        for step in StepId::ALL {
            let json = serde_json::to_string(&step).unwrap();
            assert_eq!(json, format!("\"{}\"", step.as_str()));
        }
    }

    #[test]
    fn test_step_details_headings() {
        let details = StepId::Days.details();
        assert_eq!(details.title, "Schedule");
        assert_eq!(details.subtitle, "How many days can you train?");
        assert_eq!(details.input, StepInput::Range { min: 3, max: 7 });
    }

    #[test]
    fn test_goal_step_never_offers_aggressive() {
        match StepId::Goal.input() {
            StepInput::Choice { options } => {
                assert_eq!(options.len(), 4);
                assert!(options.iter().all(|o| o.value != "aggressive"));
            }
            other => panic!("unexpected goal input: {:?}", other),
        }
    }

    #[test]
    fn test_fitness_options_use_wire_values() {
        match StepId::Fitness.input() {
            StepInput::Choice { options } => {
                let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
                assert_eq!(values, vec!["sedentary", "lightly_active", "active", "runner"]);
            }
            other => panic!("unexpected fitness input: {:?}", other),
        }
    }

    #[test]
    fn test_answers_only_write_owned_fields() {
        let answers = vec![
            StepAnswer::Experience(ExperienceLevel::Advanced),
            StepAnswer::Mileage("25-40".into()),
            StepAnswer::LongestRun("10 miles".into()),
            StepAnswer::Goal {
                goal: GoalType::Time,
                detail: Some("Sub 4 hours".into()),
            },
            StepAnswer::Days(5),
            StepAnswer::Injury(true),
            StepAnswer::Date(NaiveDate::from_ymd_opt(2025, 10, 12).unwrap()),
            StepAnswer::Pr("21:00".into()),
            StepAnswer::RunWalk("2 min run / 1 min walk".into()),
            StepAnswer::Fitness(FitnessLevel::Runner),
        ];

        for answer in answers {
            let step = answer.step();
            let written = answer.into_update().fields();
            assert!(!written.is_empty());
            for field in written {
                assert!(
                    step.fields().contains(&field),
                    "step {} wrote unowned field {:?}",
                    step,
                    field
                );
            }
        }
    }

    #[test]
    fn test_fitness_answer_sets_experience_and_mileage() {
        let update = StepAnswer::Fitness(FitnessLevel::LightlyActive).into_update();
        assert_eq!(update.experience, Some(ExperienceLevel::Beginner));
        assert_eq!(update.weekly_mileage.as_deref(), Some("0-5"));
    }

    #[test]
    fn test_answer_deserializes_tagged_payload() {
        let answer: StepAnswer = serde_json::from_str(r#"{"step":"days","value":6}"#).unwrap();
        assert_eq!(answer, StepAnswer::Days(6));

        let answer: StepAnswer =
            serde_json::from_str(r#"{"step":"goal","value":{"goal":"time","detail":"Sub 25 mins"}}"#)
                .unwrap();
        assert_eq!(
            answer,
            StepAnswer::Goal {
                goal: GoalType::Time,
                detail: Some("Sub 25 mins".into()),
            }
        );
    }
}
