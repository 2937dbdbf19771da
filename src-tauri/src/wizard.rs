//! Preference Collector
//!
//! Finite-state machine behind the wizard. A live session is always
//! `AtStep(i)` with `i` inside the category's step sequence; the two terminal
//! states carry no session at all:
//! - `Completed` yields the accumulated preferences (the only exit with a value)
//! - `Cancelled` tells the caller to leave the wizard
//!
//! `advance` and `retreat` take the session by value, so a finished session
//! can no longer be stepped. Each returns only the outcomes it can produce
//! (`Advanced` never cancels, `Retreated` never completes); both convert into
//! `WizardState`.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;

use crate::models::{PreferenceError, PreferencesUpdate, ProgramCategory, UserPreferences};
use crate::steps::{steps_for, StepAnswer, StepDetails, StepId};

// ---------------------------------------------------------------------------
/// Errors
// ---------------------------------------------------------------------------

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error("Answer is for step {answered}, but the current step is {current}")]
    WrongStep { current: StepId, answered: StepId },

    #[error(transparent)]
    InvalidPreference(#[from] PreferenceError),
}

// ---------------------------------------------------------------------------
/// States
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardState {
    /// Showing the step at the session's index
    AtStep(WizardSession),
    /// Final step confirmed; carries the finished preferences
    Completed(UserPreferences),
    /// Backed out of the first step
    Cancelled,
}

/// Result of `advance`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advanced {
    AtStep(WizardSession),
    Completed(UserPreferences),
}

/// Result of `retreat`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Retreated {
    AtStep(WizardSession),
    Cancelled,
}

impl From<Advanced> for WizardState {
    fn from(outcome: Advanced) -> Self {
        match outcome {
            Advanced::AtStep(session) => WizardState::AtStep(session),
            Advanced::Completed(preferences) => WizardState::Completed(preferences),
        }
    }
}

impl From<Retreated> for WizardState {
    fn from(outcome: Retreated) -> Self {
        match outcome {
            Retreated::AtStep(session) => WizardState::AtStep(session),
            Retreated::Cancelled => WizardState::Cancelled,
        }
    }
}

// ---------------------------------------------------------------------------
/// Session
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardSession {
    steps: &'static [StepId],
    index: usize,
    preferences: UserPreferences,
}

impl WizardSession {
    /// Fresh session for a category; nothing carries over from earlier sessions
    pub fn initialize(category: ProgramCategory, today: NaiveDate) -> Self {
        let steps = steps_for(category);
        debug!(category = %category, step_count = steps.len(), "wizard: initialized");
        Self {
            steps,
            index: 0,
            preferences: UserPreferences::new(category, today),
        }
    }

    /// Re-enter the last step with previously completed preferences, e.g.
    /// after plan generation failed and the runner should be able to retry
    pub fn resume_at_final_step(preferences: UserPreferences) -> Self {
        let steps = steps_for(preferences.category);
        Self {
            steps,
            index: steps.len() - 1,
            preferences,
        }
    }

    pub fn category(&self) -> ProgramCategory {
        self.preferences.category
    }

    pub fn steps(&self) -> &'static [StepId] {
        self.steps
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn current_step(&self) -> StepId {
        self.steps[self.index]
    }

    pub fn current_step_details(&self) -> StepDetails {
        self.current_step().details()
    }

    pub fn preferences(&self) -> &UserPreferences {
        &self.preferences
    }

    /// Whether the next `advance` completes the wizard
    pub fn is_final_step(&self) -> bool {
        self.index + 1 == self.steps.len()
    }

    /// (index + 1) / N, in (0, 1]
    pub fn progress_fraction(&self) -> f64 {
        (self.index + 1) as f64 / self.steps.len() as f64
    }

    pub fn progress_percent(&self) -> u8 {
        (self.progress_fraction() * 100.0).round() as u8
    }

    /// Merge a partial update. Never moves the index and never checks
    /// cross-field consistency.
    pub fn set_field(&mut self, update: PreferencesUpdate) -> Result<(), WizardError> {
        if update.is_empty() {
            return Ok(());
        }
        debug!(step = %self.current_step(), fields = ?update.fields(), "wizard: set fields");
        self.preferences.apply(update)?;
        Ok(())
    }

    /// Record the answer for the current step
    pub fn answer(&mut self, answer: StepAnswer) -> Result<(), WizardError> {
        let current = self.current_step();
        if answer.step() != current {
            return Err(WizardError::WrongStep {
                current,
                answered: answer.step(),
            });
        }
        self.set_field(answer.into_update())
    }

    pub fn advance(mut self) -> Advanced {
        debug_assert!(self.index < self.steps.len());
        if self.is_final_step() {
            debug!(category = %self.category(), "wizard: completed");
            Advanced::Completed(self.preferences)
        } else {
            self.index += 1;
            debug!(step = %self.current_step(), index = self.index, "wizard: advanced");
            Advanced::AtStep(self)
        }
    }

    pub fn retreat(mut self) -> Retreated {
        debug_assert!(self.index < self.steps.len());
        if self.index == 0 {
            debug!(category = %self.category(), "wizard: cancelled");
            Retreated::Cancelled
        } else {
            self.index -= 1;
            debug!(step = %self.current_step(), index = self.index, "wizard: retreated");
            Retreated::AtStep(self)
        }
    }
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExperienceLevel, FitnessLevel, GoalType};
    use crate::steps::StepId;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
    }

    fn expect_step(state: impl Into<WizardState>) -> WizardSession {
        match state.into() {
            WizardState::AtStep(session) => session,
            other => panic!("expected AtStep, got {:?}", other),
        }
    }

    #[test]
    fn test_initialize_starts_at_first_step_for_every_category() {
        for category in ProgramCategory::ALL {
            let session = WizardSession::initialize(category, today());
            assert_eq!(session.index(), 0);
            assert!(session.step_count() >= 1);
            assert_eq!(session.category(), category);
            for step in session.steps() {
                assert!(StepId::ALL.contains(step));
            }
        }
    }

    #[test]
    fn test_completes_on_nth_advance_and_never_before() {
        for category in ProgramCategory::ALL {
            let mut session = WizardSession::initialize(category, today());
            let n = session.step_count();

            for expected_index in 1..n {
                session = expect_step(session.advance());
                assert_eq!(session.index(), expected_index);
            }

            match session.advance() {
                Advanced::Completed(prefs) => assert_eq!(prefs.category, category),
                other => panic!("expected Completed for {}, got {:?}", category, other),
            }
        }
    }

    #[test]
    fn test_retreat_from_first_step_cancels() {
        let session = WizardSession::initialize(ProgramCategory::TenK, today());
        assert_eq!(session.retreat(), Retreated::Cancelled);
    }

    #[test]
    fn test_outcomes_convert_into_matching_wizard_state() {
        let session = WizardSession::initialize(ProgramCategory::FiveK, today());
        assert_eq!(WizardState::from(session.clone().retreat()), WizardState::Cancelled);

        let prefs = session.preferences().clone();
        let last = WizardSession::resume_at_final_step(prefs.clone());
        assert_eq!(WizardState::from(last.advance()), WizardState::Completed(prefs));

        let moved = expect_step(session.advance());
        assert_eq!(moved.index(), 1);
        assert_eq!(expect_step(moved.retreat()).index(), 0);
    }

    #[test]
    fn test_retreat_moves_back_one_step() {
        let session = WizardSession::initialize(ProgramCategory::Speed, today());
        let session = expect_step(session.advance());
        let session = expect_step(session.advance());
        assert_eq!(session.current_step(), StepId::Pr);

        let session = expect_step(session.retreat());
        assert_eq!(session.index(), 1);
        assert_eq!(session.current_step(), StepId::Mileage);
    }

    #[test]
    fn test_c25k_scenario() {
        let session = WizardSession::initialize(ProgramCategory::CouchTo5k, today());
        assert_eq!(
            session.steps(),
            &[StepId::Fitness, StepId::Days, StepId::Goal, StepId::Injury]
        );

        let mut session = session;
        for _ in 0..3 {
            session = expect_step(session.advance());
        }
        assert!(session.is_final_step());
        assert!(matches!(session.advance(), Advanced::Completed(_)));
    }

    #[test]
    fn test_progress_fraction() {
        let session = WizardSession::initialize(ProgramCategory::BaseBuilding, today());
        assert_eq!(session.progress_fraction(), 0.25);
        assert_eq!(session.progress_percent(), 25);

        let session = expect_step(session.advance());
        let session = expect_step(session.advance());
        let session = expect_step(session.advance());
        assert_eq!(session.progress_fraction(), 1.0);
        assert_eq!(session.progress_percent(), 100);
    }

    #[test]
    fn test_progress_percent_rounds() {
        let session = WizardSession::initialize(ProgramCategory::Marathon, today());
        // 1/7 = 14.28%
        assert_eq!(session.progress_percent(), 14);
    }

    #[test]
    fn test_set_field_does_not_move_index() {
        let mut session = WizardSession::initialize(ProgramCategory::FiveK, today());
        session
            .set_field(PreferencesUpdate {
                days_per_week: Some(6),
                has_injuries: Some(true),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(session.index(), 0);
        assert_eq!(session.preferences().days_per_week, 6);
        assert!(session.preferences().has_injuries);
    }

    #[test]
    fn test_set_field_rejects_out_of_range_days() {
        let mut session = WizardSession::initialize(ProgramCategory::FiveK, today());
        let result = session.set_field(PreferencesUpdate {
            days_per_week: Some(2),
            ..Default::default()
        });
        assert_eq!(
            result,
            Err(WizardError::InvalidPreference(PreferenceError::DaysOutOfRange(2)))
        );
        assert_eq!(session.preferences().days_per_week, 4);
    }

    #[test]
    fn test_answer_must_match_current_step() {
        let mut session = WizardSession::initialize(ProgramCategory::Marathon, today());
        let result = session.answer(StepAnswer::Days(5));
        assert_eq!(
            result,
            Err(WizardError::WrongStep {
                current: StepId::Experience,
                answered: StepId::Days,
            })
        );

        session
            .answer(StepAnswer::Experience(ExperienceLevel::Advanced))
            .unwrap();
        assert_eq!(session.preferences().experience, ExperienceLevel::Advanced);
    }

    #[test]
    fn test_untouched_fields_keep_defaults_in_completed_preferences() {
        let mut session = WizardSession::initialize(ProgramCategory::CouchTo5k, today());
        session
            .answer(StepAnswer::Fitness(FitnessLevel::Sedentary))
            .unwrap();

        let mut state = WizardState::from(session.advance());
        while let WizardState::AtStep(s) = state {
            state = s.advance().into();
        }

        match state {
            WizardState::Completed(prefs) => {
                assert_eq!(prefs.category, ProgramCategory::CouchTo5k);
                assert_eq!(prefs.weekly_mileage, "0-5");
                assert_eq!(prefs.goal, GoalType::Finish);
                assert_eq!(prefs.days_per_week, 4);
                // c25k has no date step, the seeded race date still rides along
                assert_eq!(prefs.race_date, NaiveDate::from_ymd_opt(2025, 4, 10));
            }
            other => panic!("expected Completed, got {:?}", other),
        }
    }

    #[test]
    fn test_resume_at_final_step_preserves_preferences() {
        let mut session = WizardSession::initialize(ProgramCategory::RunWalk, today());
        session
            .set_field(PreferencesUpdate {
                run_walk_ratio: Some("1 min run / 1 min walk".into()),
                ..Default::default()
            })
            .unwrap();
        let prefs = session.preferences().clone();

        let resumed = WizardSession::resume_at_final_step(prefs.clone());
        assert!(resumed.is_final_step());
        assert_eq!(resumed.current_step(), StepId::Date);
        assert_eq!(resumed.preferences(), &prefs);
        assert_eq!(resumed.advance(), Advanced::Completed(prefs));
    }

    #[test]
    fn test_new_session_does_not_inherit_previous_answers() {
        let mut first = WizardSession::initialize(ProgramCategory::Marathon, today());
        first
            .set_field(PreferencesUpdate {
                experience: Some(ExperienceLevel::Advanced),
                ..Default::default()
            })
            .unwrap();

        let second = WizardSession::initialize(ProgramCategory::HalfMarathon, today());
        assert_eq!(second.preferences().experience, ExperienceLevel::Beginner);
        assert_eq!(second.category(), ProgramCategory::HalfMarathon);
    }
}
