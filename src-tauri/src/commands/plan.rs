//! Tauri commands for the plan view

use std::sync::Arc;
use tauri::State;

use crate::models::TrainingPlan;
use crate::router::{RouterError, ViewSnapshot};
use crate::state::AppState;

/// The received plan, when the plan view is showing
#[tauri::command]
pub async fn get_plan(state: State<'_, Arc<AppState>>) -> Result<Option<TrainingPlan>, RouterError> {
  Ok(state.router.lock().await.plan().cloned())
}

/// Back to the home view, dropping any session or plan
#[tauri::command]
pub async fn reset(state: State<'_, Arc<AppState>>) -> Result<ViewSnapshot, RouterError> {
  let mut router = state.router.lock().await;
  router.reset()?;
  Ok(router.snapshot())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::commands::catalog::{select_category, start_training};
  use crate::commands::wizard::next_step;
  use crate::models::ProgramCategory;
  use crate::router::ViewKind;
  use crate::test_utils::*;
  use serial_test::serial;
  use tauri::Manager;

  #[tokio::test]
  #[serial]
  async fn test_get_plan_and_reset() {
    let (state, _stub) = mock_app_state(RecordingGenerator::returning(mock_training_plan()));
    let app = tauri::test::mock_app();
    app.manage(state);

    assert_eq!(get_plan(app.state()).await.unwrap(), None);

    start_training(app.state()).await.unwrap();
    select_category(app.state(), ProgramCategory::WeightLoss).await.unwrap();
    let mut snapshot = next_step(app.state()).await.unwrap();
    while snapshot.view == ViewKind::Wizard {
      snapshot = next_step(app.state()).await.unwrap();
    }

    let plan = get_plan(app.state()).await.unwrap().unwrap();
    assert_eq!(plan, mock_training_plan());

    let snapshot = reset(app.state()).await.unwrap();
    assert_eq!(snapshot.view, ViewKind::Home);
    assert_eq!(get_plan(app.state()).await.unwrap(), None);
  }
}
