//! Tauri commands for the preference wizard

use std::sync::Arc;
use tauri::State;

use crate::models::PreferencesUpdate;
use crate::router::{RouterError, ViewSnapshot};
use crate::state::AppState;
use crate::steps::StepAnswer;

/// Merge a partial preferences update without moving the step
#[tauri::command]
pub async fn update_preferences(
  state: State<'_, Arc<AppState>>,
  update: PreferencesUpdate,
) -> Result<ViewSnapshot, RouterError> {
  let mut router = state.router.lock().await;
  router.update_preferences(update)?;
  Ok(router.snapshot())
}

/// Record a typed answer for the current step
#[tauri::command]
pub async fn answer_step(
  state: State<'_, Arc<AppState>>,
  answer: StepAnswer,
) -> Result<ViewSnapshot, RouterError> {
  let mut router = state.router.lock().await;
  router.answer_step(answer)?;
  Ok(router.snapshot())
}

/// Advance the wizard. On the final step this submits the plan request and
/// resolves once the generator answers.
#[tauri::command]
pub async fn next_step(state: State<'_, Arc<AppState>>) -> Result<ViewSnapshot, RouterError> {
  let pending = {
    let mut router = state.router.lock().await;
    match router.next_step()? {
      Some(preferences) => preferences,
      None => return Ok(router.snapshot()),
    }
  };

  state.generate_plan(pending).await
}

#[tauri::command]
pub async fn previous_step(state: State<'_, Arc<AppState>>) -> Result<ViewSnapshot, RouterError> {
  let mut router = state.router.lock().await;
  router.previous_step()?;
  Ok(router.snapshot())
}
