use async_trait::async_trait;
use serde_json::Value;

/// One part of a multi-part prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptPart {
    Text(String),
    /// Inline binary payload, base64 encoded.
    InlineData { mime_type: String, data: String },
}

impl PromptPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn inline_data(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self::InlineData {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }
}

/// A single generation call: ordered prompt parts and, for structured
/// output, the JSON schema the response must follow.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub parts: Vec<PromptPart>,
    pub response_schema: Option<Value>,
}

impl GenerationRequest {
    /// Free-form text response.
    pub fn free_form(parts: Vec<PromptPart>) -> Self {
        Self {
            parts,
            response_schema: None,
        }
    }

    /// JSON response constrained by `schema`.
    pub fn structured(prompt: impl Into<String>, schema: Value) -> Self {
        Self {
            parts: vec![PromptPart::text(prompt)],
            response_schema: Some(schema),
        }
    }

    pub fn has_inline_data(&self) -> bool {
        self.parts
            .iter()
            .any(|part| matches!(part, PromptPart::InlineData { .. }))
    }
}

/// Generative AI backend. Returns the response text (JSON text for
/// structured requests); errors carry the raw cause for logging.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    fn name(&self) -> &str;

    async fn generate(&self, request: &GenerationRequest) -> anyhow::Result<String>;
}
