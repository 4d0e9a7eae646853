//! Google Gemini `generateContent` client with support for:
//! - API key resolved by `Config` (`api_key`, `HANDLOOM_API_KEY`,
//!   `GEMINI_API_KEY` or `API_KEY`); the client never reads the environment
//! - Multi-part prompts with inline image data
//! - Structured JSON output via `responseSchema`

use super::gemini_types::{
    Blob, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
};
use super::http_client::build_model_client;
use super::scrub::api_error;
use super::traits::{GenerationRequest, GenerativeModel, PromptPart};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const MAX_OUTPUT_TOKENS: u32 = 8192;
const JSON_MIME_TYPE: &str = "application/json";

/// Gemini client bound to one model.
pub struct GeminiClient {
    api_key: Option<String>,
    base_url: String,
    model: String,
    temperature: f64,
    client: Client,
}

impl GeminiClient {
    /// Create a new Gemini client. A blank key counts as missing.
    pub fn new(api_key: Option<&str>, model: &str) -> Self {
        let resolved_key = api_key
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(String::from);

        Self {
            api_key: resolved_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.to_string(),
            temperature: 0.7,
            client: build_model_client(None),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_request_timeout(mut self, request_timeout_secs: Option<u64>) -> Self {
        self.client = build_model_client(request_timeout_secs);
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn model_name(model: &str) -> String {
        if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{model}")
        }
    }

    fn endpoint(&self, api_key: &str) -> String {
        format!(
            "{}/{}:generateContent?key={api_key}",
            self.base_url,
            Self::model_name(&self.model)
        )
    }

    fn map_part(part: &PromptPart) -> Part {
        match part {
            PromptPart::Text(text) => Part::Text(text.clone()),
            PromptPart::InlineData { mime_type, data } => Part::InlineData(Blob {
                mime_type: mime_type.clone(),
                data: data.clone(),
            }),
        }
    }

    fn build_request(&self, request: &GenerationRequest) -> GenerateContentRequest {
        let structured = request.response_schema.is_some();
        GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: request.parts.iter().map(Self::map_part).collect(),
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: MAX_OUTPUT_TOKENS,
                response_mime_type: structured.then_some(JSON_MIME_TYPE),
                response_schema: request.response_schema.clone(),
            },
        }
    }

    fn extract_text(result: &GenerateContentResponse) -> anyhow::Result<String> {
        if let Some(reason) = result
            .prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.as_deref())
        {
            anyhow::bail!("Gemini blocked the prompt: {reason}");
        }

        let candidate = result
            .candidates
            .first()
            .context("No response from Gemini")?;

        let text = candidate
            .content
            .as_ref()
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            anyhow::bail!(
                "Empty response from Gemini (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            );
        }

        Ok(text)
    }

    async fn call_api(&self, request: &GenerateContentRequest) -> anyhow::Result<GenerateContentResponse> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            anyhow::anyhow!(
                "Gemini API key not found. Options:\n\
                 1. Set HANDLOOM_API_KEY (or GEMINI_API_KEY) env var\n\
                 2. Add `api_key` to ~/.handloom/config.toml\n\
                 3. Get an API key from https://aistudio.google.com/app/apikey"
            )
        })?;

        let response = self
            .client
            .post(self.endpoint(api_key))
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error("Gemini", response).await);
        }

        let result: GenerateContentResponse = response
            .json()
            .await
            .context("Failed to decode Gemini response")?;

        if let Some(err) = result.error.as_ref() {
            anyhow::bail!("Gemini API error: {}", err.message);
        }

        Ok(result)
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, request: &GenerationRequest) -> anyhow::Result<String> {
        let wire_request = self.build_request(request);
        tracing::debug!(
            model = %self.model,
            parts = wire_request.contents[0].parts.len(),
            structured = request.response_schema.is_some(),
            "sending Gemini request"
        );
        let result = self.call_api(&wire_request).await?;
        Self::extract_text(&result)
    }
}
