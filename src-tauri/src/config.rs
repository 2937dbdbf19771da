//! Plan generator configuration, read from the process environment
//! (a `.env` file is loaded at startup).

use std::env;
use url::Url;

use crate::llm::LlmError;

/// ---------------------------------------------------------------------------
/// Configuration Constants
/// ---------------------------------------------------------------------------

pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];
pub const MODEL_VAR: &str = "GEMINI_MODEL";
pub const API_BASE_VAR: &str = "GEMINI_API_BASE";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEMPERATURE: f32 = 0.4;

#[derive(Clone)]
pub struct GeminiConfig {
  pub api_key: String,
  pub model: String,
  pub api_base: Url,
  pub temperature: f32,
}

impl std::fmt::Debug for GeminiConfig {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("GeminiConfig")
      .field("api_key", &"<redacted>")
      .field("model", &self.model)
      .field("api_base", &self.api_base.as_str())
      .field("temperature", &self.temperature)
      .finish()
  }
}

impl GeminiConfig {
  /// Load from the environment. A missing key fails here, before any
  /// request is built.
  pub fn from_env() -> Result<Self, LlmError> {
    Self::from_lookup(|key| env::var(key).ok())
  }

  pub fn from_lookup<F>(lookup: F) -> Result<Self, LlmError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let api_key = API_KEY_VARS
      .iter()
      .filter_map(|var| lookup(*var))
      .map(|value| value.trim().to_string())
      .find(|value| !value.is_empty())
      .ok_or(LlmError::MissingApiKey)?;

    let model = lookup(MODEL_VAR)
      .map(|m| m.trim().to_string())
      .filter(|m| !m.is_empty())
      .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    let base = lookup(API_BASE_VAR).unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    let api_base = Url::parse(base.trim_end_matches('/'))
      .map_err(|e| LlmError::Config(format!("Invalid {}: {}", API_BASE_VAR, e)))?;

    Ok(Self {
      api_key,
      model,
      api_base,
      temperature: DEFAULT_TEMPERATURE,
    })
  }

  /// `{base}/models/{model}:generateContent`
  pub fn generate_url(&self) -> Result<Url, LlmError> {
    let raw = format!(
      "{}/models/{}:generateContent",
      self.api_base.as_str().trim_end_matches('/'),
      self.model
    );
    Url::parse(&raw).map_err(|e| LlmError::Config(format!("Invalid endpoint {}: {}", raw, e)))
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
