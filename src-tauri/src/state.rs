//! Shared application state managed by Tauri

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use crate::llm::{generate_training_plan, GeminiClient, LlmError, PlanGenerator};
use crate::models::UserPreferences;
use crate::router::{RouterError, ViewRouter, ViewSnapshot};

/// Where plan generation requests go
pub enum GeneratorSource {
  /// Build a Gemini client from the environment for each request
  FromEnv,
  Fixed(Arc<dyn PlanGenerator>),
}

/// Application state holding the view router and the plan generator
pub struct AppState {
  pub router: Mutex<ViewRouter>,
  generator: GeneratorSource,
}

impl Default for AppState {
  fn default() -> Self {
    Self::new()
  }
}

impl AppState {
  pub fn new() -> Self {
    Self {
      router: Mutex::new(ViewRouter::new()),
      generator: GeneratorSource::FromEnv,
    }
  }

  pub fn with_generator(generator: Arc<dyn PlanGenerator>) -> Self {
    Self {
      router: Mutex::new(ViewRouter::new()),
      generator: GeneratorSource::Fixed(generator),
    }
  }

  /// A missing credential fails here, before any request exists
  pub fn generator(&self) -> Result<Arc<dyn PlanGenerator>, LlmError> {
    match &self.generator {
      GeneratorSource::FromEnv => Ok(Arc::new(GeminiClient::from_env()?)),
      GeneratorSource::Fixed(generator) => Ok(generator.clone()),
    }
  }

  /// Submit completed preferences and record the outcome on the router.
  /// The router lock is released while the request is in flight; the router
  /// sits in `Generating` meanwhile and rejects other commands.
  pub async fn generate_plan(&self, preferences: UserPreferences) -> Result<ViewSnapshot, RouterError> {
    let result = match self.generator() {
      Ok(generator) => generate_training_plan(generator.as_ref(), &preferences).await,
      Err(e) => Err(e),
    };

    let mut router = self.router.lock().await;
    router.finish_generation(result)?;
    info!(view = %router.kind(), "Generation finished");
    Ok(router.snapshot())
  }
}
