//! LLM integration for training plan generation
//!
//! This module handles communication with the Gemini API. The rest of the
//! app only sees the narrow `PlanGenerator` boundary: a prompt and a response
//! schema go in, a fully schema-valid `TrainingPlan` or an error comes out.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::GeminiConfig;
use crate::models::{TrainingPlan, UserPreferences};
use crate::prompt::PlanRequest;

/// ---------------------------------------------------------------------------
/// Error Types
/// ---------------------------------------------------------------------------

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
  #[error("API key not configured")]
  MissingApiKey,

  #[error("Invalid configuration: {0}")]
  Config(String),

  #[error("Request failed: {0}")]
  Request(String),

  #[error("API error: {0}")]
  Api(String),

  #[error("Parse error: {0}")]
  Parse(String),

  #[error("Empty response: {0}")]
  EmptyResponse(String),
}

impl LlmError {
  /// Configuration problems cannot be fixed by retrying the same request
  pub fn is_config_error(&self) -> bool {
    matches!(self, LlmError::MissingApiKey | LlmError::Config(_))
  }
}

/// ---------------------------------------------------------------------------
/// Generator Boundary
/// ---------------------------------------------------------------------------

/// Anything that can turn a prompt plus response schema into a plan
#[async_trait]
pub trait PlanGenerator: Send + Sync {
  async fn submit(&self, prompt: &str, schema: &Value) -> Result<TrainingPlan, LlmError>;
}

/// Build the request for these preferences and submit it once
pub async fn generate_training_plan(
  generator: &dyn PlanGenerator,
  prefs: &UserPreferences,
) -> Result<TrainingPlan, LlmError> {
  let request = PlanRequest::build(prefs);
  info!(
    category = %prefs.category,
    duration = %request.duration,
    prompt_len = request.prompt.len(),
    "Requesting training plan"
  );

  let plan = generator.submit(&request.prompt, &request.schema).await?;

  info!(
    title = %plan.title,
    weeks = plan.week_count(),
    workouts = plan.workout_count(),
    "Training plan received"
  );
  Ok(plan)
}

/// ---------------------------------------------------------------------------
/// Gemini API Types
/// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
  contents: Vec<RequestContent<'a>>,
  generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
  role: &'static str,
  parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
  text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
  response_mime_type: &'static str,
  response_schema: &'a Value,
  temperature: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
  #[serde(default)]
  candidates: Vec<Candidate>,
  usage_metadata: Option<UsageMetadata>,
  prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
  content: Option<CandidateContent>,
  finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
  #[serde(default)]
  parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
  text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
  pub prompt_token_count: Option<u32>,
  pub candidates_token_count: Option<u32>,
  pub total_token_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
  block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
  error: GeminiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
  message: String,
  status: Option<String>,
}

impl GenerateResponse {
  /// Concatenated text of the first candidate
  fn text(&self) -> Option<String> {
    let content = self.candidates.first()?.content.as_ref()?;
    let text: String = content
      .parts
      .iter()
      .filter_map(|p| p.text.as_deref())
      .collect();
    if text.trim().is_empty() {
      None
    } else {
      Some(text)
    }
  }
}

/// ---------------------------------------------------------------------------
/// Gemini Client
/// ---------------------------------------------------------------------------

pub struct GeminiClient {
  client: Client,
  config: GeminiConfig,
}

impl GeminiClient {
  pub fn new(config: GeminiConfig) -> Self {
    Self {
      client: Client::new(),
      config,
    }
  }

  /// Create a new Gemini client, loading configuration from environment
  pub fn from_env() -> Result<Self, LlmError> {
    Ok(Self::new(GeminiConfig::from_env()?))
  }
}

#[async_trait]
impl PlanGenerator for GeminiClient {
  async fn submit(&self, prompt: &str, schema: &Value) -> Result<TrainingPlan, LlmError> {
    let url = self.config.generate_url()?;
    let request = GenerateRequest {
      contents: vec![RequestContent {
        role: "user",
        parts: vec![RequestPart { text: prompt }],
      }],
      generation_config: GenerationConfig {
        response_mime_type: "application/json",
        response_schema: schema,
        temperature: self.config.temperature,
      },
    };

    debug!(model = %self.config.model, "Submitting generateContent request");

    let response = self
      .client
      .post(url)
      .header("x-goog-api-key", &self.config.api_key)
      .header("content-type", "application/json")
      .json(&request)
      .send()
      .await
      .map_err(|e| LlmError::Request(e.to_string()))?;

    let status = response.status();
    let body = response
      .text()
      .await
      .map_err(|e| LlmError::Request(e.to_string()))?;

    if !status.is_success() {
      // Try to parse error response
      if let Ok(error_resp) = serde_json::from_str::<GeminiErrorResponse>(&body) {
        let status_label = error_resp.error.status.unwrap_or_else(|| status.to_string());
        return Err(LlmError::Api(format!("{}: {}", status_label, error_resp.error.message)));
      }
      return Err(LlmError::Api(format!("HTTP {}: {}", status, body)));
    }

    let gemini_response: GenerateResponse =
      serde_json::from_str(&body).map_err(|e| LlmError::Parse(e.to_string()))?;

    if let Some(usage) = &gemini_response.usage_metadata {
      debug!(
        prompt_tokens = ?usage.prompt_token_count,
        output_tokens = ?usage.candidates_token_count,
        total_tokens = ?usage.total_token_count,
        "Gemini usage"
      );
    }

    let text = match gemini_response.text() {
      Some(text) => text,
      None => {
        let reason = gemini_response
          .prompt_feedback
          .and_then(|f| f.block_reason)
          .or_else(|| {
            gemini_response
              .candidates
              .first()
              .and_then(|c| c.finish_reason.clone())
          })
          .unwrap_or_else(|| "no candidates".to_string());
        warn!(%reason, "Gemini returned no text");
        return Err(LlmError::EmptyResponse(reason));
      }
    };

    parse_plan(&text)
  }
}

/// Parse generator output into a plan. The generator is asked for raw JSON,
/// so anything else (fenced, wrapped in prose, an array) is a parse failure;
/// nothing is extracted or repaired.
pub fn parse_plan(text: &str) -> Result<TrainingPlan, LlmError> {
  let plan: TrainingPlan =
    serde_json::from_str(text.trim()).map_err(|e| LlmError::Parse(e.to_string()))?;

  if plan.weeks.is_empty() {
    return Err(LlmError::EmptyResponse("plan contains no weeks".to_string()));
  }

  Ok(plan)
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
