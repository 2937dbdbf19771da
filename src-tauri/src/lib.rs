mod commands;
mod config;
mod llm;
mod models;
mod prompt;
mod router;
mod state;
mod steps;
mod wizard;

#[cfg(test)]
mod test_utils;

use state::AppState;
use std::sync::Arc;
use tauri::Manager;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trottrain_lib=info"));
  // A second init (e.g. hot reload) keeps the existing subscriber
  let _ = tracing_subscriber::registry()
    .with(filter)
    .with(tracing_subscriber::fmt::layer())
    .try_init();
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
  // Load environment variables from .env file
  dotenvy::dotenv().ok();
  init_tracing();

  tauri::Builder::default()
    .setup(|app| {
      // A broken step catalog would strand the wizard mid-flow
      steps::validate_catalog()?;
      app.manage(Arc::new(AppState::new()));
      info!("Step catalog validated, app state ready");
      Ok(())
    })
    .invoke_handler(tauri::generate_handler![
      // Home & categories
      commands::catalog::get_categories,
      commands::catalog::get_view,
      commands::catalog::start_training,
      commands::catalog::cancel_category_selection,
      commands::catalog::select_category,
      // Wizard
      commands::wizard::update_preferences,
      commands::wizard::answer_step,
      commands::wizard::next_step,
      commands::wizard::previous_step,
      // Plan
      commands::plan::get_plan,
      commands::plan::reset,
    ])
    .run(tauri::generate_context!())
    .expect("error while running tauri application");
}
