//! Tauri commands for the home and category screens

use chrono::Local;
use std::sync::Arc;
use tauri::State;

use crate::models::{catalog, CategoryInfo, ProgramCategory};
use crate::router::{RouterError, ViewSnapshot};
use crate::state::AppState;

/// All program categories in display order
#[tauri::command]
pub fn get_categories() -> Vec<CategoryInfo> {
  catalog()
}

/// Current view, for the frontend to render from
#[tauri::command]
pub async fn get_view(state: State<'_, Arc<AppState>>) -> Result<ViewSnapshot, RouterError> {
  Ok(state.router.lock().await.snapshot())
}

#[tauri::command]
pub async fn start_training(state: State<'_, Arc<AppState>>) -> Result<ViewSnapshot, RouterError> {
  let mut router = state.router.lock().await;
  router.start_training()?;
  Ok(router.snapshot())
}

#[tauri::command]
pub async fn cancel_category_selection(
  state: State<'_, Arc<AppState>>,
) -> Result<ViewSnapshot, RouterError> {
  let mut router = state.router.lock().await;
  router.cancel_category_selection()?;
  Ok(router.snapshot())
}

/// Open the wizard for a category with a fresh session
#[tauri::command]
pub async fn select_category(
  state: State<'_, Arc<AppState>>,
  category: ProgramCategory,
) -> Result<ViewSnapshot, RouterError> {
  let mut router = state.router.lock().await;
  router.select_category(category, Local::now().date_naive())?;
  Ok(router.snapshot())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::router::ViewKind;
  use crate::steps::StepId;
  use serial_test::serial;
  use tauri::Manager;

  #[test]
  fn test_get_categories() {
    let categories = get_categories();
    assert_eq!(categories.len(), 10);
    assert_eq!(categories[0].id.as_str(), "marathon");
  }

  #[tokio::test]
  #[serial]
  async fn test_navigate_to_wizard() {
    let state = Arc::new(AppState::new());
    let app = tauri::test::mock_app();
    app.manage(state);

    let snapshot = get_view(app.state()).await.unwrap();
    assert_eq!(snapshot.view, ViewKind::Home);

    let snapshot = start_training(app.state()).await.unwrap();
    assert_eq!(snapshot.view, ViewKind::CategorySelect);

    let snapshot = select_category(app.state(), ProgramCategory::Speed).await.unwrap();
    assert_eq!(snapshot.view, ViewKind::Wizard);
    let wizard = snapshot.wizard.unwrap();
    assert_eq!(wizard.step.id, StepId::Experience);
    assert_eq!(wizard.step_count, 6);
    // Race date is seeded 90 days from today
    let expected = Local::now().date_naive() + chrono::Duration::days(90);
    assert_eq!(wizard.preferences.race_date, Some(expected));
  }

  #[tokio::test]
  #[serial]
  async fn test_cancel_category_selection() {
    let state = Arc::new(AppState::new());
    let app = tauri::test::mock_app();
    app.manage(state);

    start_training(app.state()).await.unwrap();
    let snapshot = cancel_category_selection(app.state()).await.unwrap();
    assert_eq!(snapshot.view, ViewKind::Home);

    let result = cancel_category_selection(app.state()).await;
    assert!(matches!(result, Err(RouterError::NotAvailable { .. })));
  }
}
