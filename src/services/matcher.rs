use super::schema::match_response_schema;
use crate::catalog::{DesignRepository, MatchResult};
use crate::error::{ConsistencyError, ServiceError, ShowcaseError, ValidationError};
use crate::providers::{GenerationRequest, GenerativeModel, scrub_secret_patterns};
use anyhow::Context;
use std::sync::Arc;

/// Picks the design that best fits a buyer request and suggests platforms.
#[derive(Clone)]
pub struct MatchAnalyzer {
    model: Arc<dyn GenerativeModel>,
}

impl MatchAnalyzer {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    pub fn build_prompt(request_text: &str, designs: &DesignRepository) -> anyhow::Result<String> {
        let catalog = serde_json::to_string_pretty(&designs.summaries())
            .context("Failed to serialize design summaries")?;

        Ok(format!(
            "You are an expert sales assistant for a handloom weaver. A potential buyer has sent \
the request below. Compare it against every design in the weaver's collection and pick the \
single design that best fits.

Buyer request:
\"\"\"
{request_text}
\"\"\"

Design collection (JSON):
{catalog}

Respond with:
- matchedDesignId: the exact \"id\" of the best matching design, copied from the collection above.
- justification: a short explanation of why this design fits the buyer's request.
- platformRecommendations: 2-3 online marketplaces or sales channels (for example Amazon, \
Etsy, Myntra) where this design should be offered to buyers like this one, each with a reason."
        ))
    }

    /// Analyze a buyer request against `designs`.
    ///
    /// The collection must be non-empty; an empty one fails with a
    /// validation error without calling the model.
    pub async fn analyze_request(
        &self,
        request_text: &str,
        designs: &DesignRepository,
    ) -> Result<MatchResult, ShowcaseError> {
        if designs.is_empty() {
            return Err(ValidationError::EmptyCollection.into());
        }

        let result = self
            .request_match(request_text, designs)
            .await
            .map_err(Self::failure)?;

        if !designs.contains(&result.matched_design_id) {
            tracing::warn!(
                matched_design_id = %result.matched_design_id,
                "analysis referenced a design outside the collection"
            );
            return Err(ConsistencyError::UnknownDesign {
                design_id: result.matched_design_id,
            }
            .into());
        }

        Ok(result)
    }

    async fn request_match(
        &self,
        request_text: &str,
        designs: &DesignRepository,
    ) -> anyhow::Result<MatchResult> {
        let prompt = Self::build_prompt(request_text, designs)?;
        let request = GenerationRequest::structured(prompt, match_response_schema());
        let text = self.model.generate(&request).await?;
        Self::parse_response(&text)
    }

    /// Typed parse of the structured payload. Missing or mistyped fields
    /// are errors, never defaults.
    pub fn parse_response(text: &str) -> anyhow::Result<MatchResult> {
        let payload = strip_code_fence(text.trim());
        serde_json::from_str::<MatchResult>(payload)
            .with_context(|| format!("Invalid match analysis payload: {}", preview(payload)))
    }

    fn failure(source: anyhow::Error) -> ShowcaseError {
        tracing::error!(
            "Error analyzing request: {}",
            scrub_secret_patterns(&format!("{source:#}"))
        );
        ServiceError::Analysis { source }.into()
    }
}

/// Some model versions wrap JSON output in a markdown fence even when a JSON
/// response type was requested.
fn strip_code_fence(text: &str) -> &str {
    let Some(inner) = text.strip_prefix("```") else {
        return text;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

fn preview(text: &str) -> String {
    const MAX: usize = 120;
    if text.chars().count() <= MAX {
        text.to_string()
    } else {
        format!("{}...", text.chars().take(MAX).collect::<String>())
    }
}
