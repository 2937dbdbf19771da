//! View Router
//!
//! Top-level navigation between the home, category, wizard, generating and
//! plan views. Owns the live wizard session and the received plan, so leaving
//! a view drops whatever it held.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::llm::LlmError;
use crate::models::{GoalType, PreferencesUpdate, ProgramCategory, TrainingPlan, UserPreferences};
use crate::steps::{StepAnswer, StepDetails, StepId};
use crate::wizard::{Advanced, Retreated, WizardError, WizardSession};

pub const GENERATION_FAILED_MESSAGE: &str =
  "Something went wrong generating your plan. Please try again.";

/// ---------------------------------------------------------------------------
/// Views
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
  Home,
  CategorySelect,
  Wizard,
  Generating,
  Plan,
}

impl fmt::Display for ViewKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      ViewKind::Home => "home",
      ViewKind::CategorySelect => "category selection",
      ViewKind::Wizard => "wizard",
      ViewKind::Generating => "generating",
      ViewKind::Plan => "plan",
    };
    f.write_str(name)
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum View {
  Home,
  CategorySelect,
  Wizard(WizardSession),
  /// Request in flight; holds the preferences it was built from
  Generating(UserPreferences),
  Plan(TrainingPlan),
}

impl View {
  pub fn kind(&self) -> ViewKind {
    match self {
      View::Home => ViewKind::Home,
      View::CategorySelect => ViewKind::CategorySelect,
      View::Wizard(_) => ViewKind::Wizard,
      View::Generating(_) => ViewKind::Generating,
      View::Plan(_) => ViewKind::Plan,
    }
  }
}

/// ---------------------------------------------------------------------------
/// Error Types
/// ---------------------------------------------------------------------------

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
  #[error("A training plan is already being generated")]
  Busy,

  #[error("Cannot {action} from the {view} view")]
  NotAvailable { action: &'static str, view: ViewKind },

  #[error(transparent)]
  Wizard(#[from] WizardError),
}

impl Serialize for RouterError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}

/// ---------------------------------------------------------------------------
/// Snapshot
/// ---------------------------------------------------------------------------

/// What the frontend needs to render the wizard screen
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardSnapshot {
  pub category: ProgramCategory,
  pub step: StepDetails,
  /// Whole step sequence for the category, in order
  pub steps: &'static [StepId],
  pub step_index: usize,
  pub step_count: usize,
  pub progress_percent: u8,
  pub is_final_step: bool,
  pub next_label: &'static str,
  pub show_goal_detail: bool,
  pub preferences: UserPreferences,
}

impl WizardSnapshot {
  fn of(session: &WizardSession) -> Self {
    let is_final_step = session.is_final_step();
    Self {
      category: session.category(),
      step: session.current_step_details(),
      steps: session.steps(),
      step_index: session.index(),
      step_count: session.step_count(),
      progress_percent: session.progress_percent(),
      is_final_step,
      next_label: if is_final_step { "Generate Plan" } else { "Next" },
      show_goal_detail: session.preferences().goal == GoalType::Time,
      preferences: session.preferences().clone(),
    }
  }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSnapshot {
  pub view: ViewKind,
  pub loading: bool,
  pub has_plan: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub wizard: Option<WizardSnapshot>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub last_error: Option<String>,
}

/// ---------------------------------------------------------------------------
/// Router
/// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct ViewRouter {
  view: View,
  last_error: Option<String>,
}

impl Default for ViewRouter {
  fn default() -> Self {
    Self::new()
  }
}

impl ViewRouter {
  pub fn new() -> Self {
    Self {
      view: View::Home,
      last_error: None,
    }
  }

  pub fn kind(&self) -> ViewKind {
    self.view.kind()
  }

  pub fn last_error(&self) -> Option<&str> {
    self.last_error.as_deref()
  }

  pub fn plan(&self) -> Option<&TrainingPlan> {
    match &self.view {
      View::Plan(plan) => Some(plan),
      _ => None,
    }
  }

  pub fn snapshot(&self) -> ViewSnapshot {
    ViewSnapshot {
      view: self.kind(),
      loading: matches!(self.view, View::Generating(_)),
      has_plan: self.plan().is_some(),
      wizard: match &self.view {
        View::Wizard(session) => Some(WizardSnapshot::of(session)),
        _ => None,
      },
      last_error: self.last_error().map(str::to_string),
    }
  }

  fn ensure_idle(&self) -> Result<(), RouterError> {
    if matches!(self.view, View::Generating(_)) {
      Err(RouterError::Busy)
    } else {
      Ok(())
    }
  }

  fn not_available(&self, action: &'static str) -> RouterError {
    RouterError::NotAvailable {
      action,
      view: self.kind(),
    }
  }

  fn transition(&mut self, view: View) {
    debug!(from = %self.kind(), to = %view.kind(), "router: transition");
    self.view = view;
    self.last_error = None;
  }

  fn session_mut(&mut self, action: &'static str) -> Result<&mut WizardSession, RouterError> {
    self.ensure_idle()?;
    let view = self.kind();
    match &mut self.view {
      View::Wizard(session) => Ok(session),
      _ => Err(RouterError::NotAvailable { action, view }),
    }
  }

  /// Take the live session out of the view. Callers must put a view back.
  fn take_session(&mut self, action: &'static str) -> Result<WizardSession, RouterError> {
    self.ensure_idle()?;
    match std::mem::replace(&mut self.view, View::Home) {
      View::Wizard(session) => Ok(session),
      other => {
        self.view = other;
        Err(self.not_available(action))
      }
    }
  }

  /// Home -> category selection
  pub fn start_training(&mut self) -> Result<(), RouterError> {
    self.ensure_idle()?;
    match self.view {
      View::Home => {
        self.transition(View::CategorySelect);
        Ok(())
      }
      _ => Err(self.not_available("start training")),
    }
  }

  /// Category selection -> home
  pub fn cancel_category_selection(&mut self) -> Result<(), RouterError> {
    self.ensure_idle()?;
    match self.view {
      View::CategorySelect => {
        self.transition(View::Home);
        Ok(())
      }
      _ => Err(self.not_available("cancel category selection")),
    }
  }

  /// Category selection -> wizard, always with a fresh session
  pub fn select_category(&mut self, category: ProgramCategory, today: NaiveDate) -> Result<(), RouterError> {
    self.ensure_idle()?;
    match self.view {
      View::CategorySelect => {
        info!(category = %category, "Category selected");
        self.transition(View::Wizard(WizardSession::initialize(category, today)));
        Ok(())
      }
      _ => Err(self.not_available("select a category")),
    }
  }

  pub fn update_preferences(&mut self, update: PreferencesUpdate) -> Result<(), RouterError> {
    self.session_mut("update preferences")?.set_field(update)?;
    Ok(())
  }

  pub fn answer_step(&mut self, answer: StepAnswer) -> Result<(), RouterError> {
    self.session_mut("answer a step")?.answer(answer)?;
    Ok(())
  }

  /// Advance the wizard. On the final step this moves to `Generating` and
  /// hands back the completed preferences; the caller must submit them and
  /// report the outcome through `finish_generation`.
  pub fn next_step(&mut self) -> Result<Option<UserPreferences>, RouterError> {
    let session = self.take_session("go to the next step")?;
    match session.advance() {
      Advanced::AtStep(session) => {
        self.transition(View::Wizard(session));
        Ok(None)
      }
      Advanced::Completed(preferences) => {
        info!(category = %preferences.category, "Wizard completed, generating plan");
        self.transition(View::Generating(preferences.clone()));
        Ok(Some(preferences))
      }
    }
  }

  /// Step back; backing out of the first step returns to category selection
  pub fn previous_step(&mut self) -> Result<(), RouterError> {
    let session = self.take_session("go to the previous step")?;
    match session.retreat() {
      Retreated::AtStep(session) => self.transition(View::Wizard(session)),
      Retreated::Cancelled => self.transition(View::CategorySelect),
    }
    Ok(())
  }

  /// Resolve an in-flight generation. Success shows the plan; failure puts
  /// the runner back on the final step with the same preferences.
  pub fn finish_generation(&mut self, result: Result<TrainingPlan, LlmError>) -> Result<(), RouterError> {
    let preferences = match &self.view {
      View::Generating(preferences) => preferences.clone(),
      _ => return Err(self.not_available("finish generation")),
    };

    match result {
      Ok(plan) => {
        info!(title = %plan.title, weeks = plan.week_count(), "Showing plan");
        self.transition(View::Plan(plan));
      }
      Err(e) => {
        error!(error = %e, category = %preferences.category, "Plan generation failed");
        let message = if e.is_config_error() {
          e.to_string()
        } else {
          GENERATION_FAILED_MESSAGE.to_string()
        };
        self.transition(View::Wizard(WizardSession::resume_at_final_step(preferences)));
        self.last_error = Some(message);
      }
    }
    Ok(())
  }

  /// Back to home from anywhere except mid-generation; drops any session or plan
  pub fn reset(&mut self) -> Result<(), RouterError> {
    self.ensure_idle()?;
    self.transition(View::Home);
    Ok(())
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
