use crate::catalog::{Design, WeaverContact};
use crate::error::{ServiceError, ShowcaseError};
use crate::providers::{GenerationRequest, GenerativeModel, PromptPart, scrub_secret_patterns};
use std::sync::Arc;

/// Writes a five-section business pitch for one design.
#[derive(Clone)]
pub struct PitchGenerator {
    model: Arc<dyn GenerativeModel>,
}

impl PitchGenerator {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    pub fn build_prompt(design: &Design, contact_email: Option<&str>) -> String {
        let contact = WeaverContact::new(contact_email.map(String::from));
        let email = contact.call_to_action_email();

        format!(
            "You are a business development expert specializing in connecting artisanal creators \
with large e-commerce platforms like Amazon, Etsy, and Myntra.

A handloom weaver has created the following design. Your task is to write a compelling and \
professional business pitch to a potential corporate buyer.

The pitch should be concise, persuasive, and structured into the following sections with clear \
headings (using markdown for bolding):
1.  **Subject Line:** An engaging subject for an email.
2.  **Introduction:** Briefly introduce the unique handloom design.
3.  **Key Selling Points:** Highlight what makes this design special (e.g., traditional \
techniques, unique patterns, cultural significance, high-quality materials).
4.  **Market Opportunity:** Explain why this design would appeal to the target company's \
customer base.
5.  **Call to Action:** A clear next step, like suggesting a meeting to discuss collaboration. \
Invite the buyer to reach the weaver at this contact email: {email}

Here are the details of the design:
- **Design Name:** {name}
- **Description:** {description}
- **Materials Used:** {materials}
- **Weaver Contact Email:** {email}

Analyze the provided image of the design to inform your description and selling points. Make \
the tone professional, respectful, and confident.",
            name = design.name,
            description = design.description,
            materials = design.materials,
        )
    }

    /// Image part first, then the text prompt.
    pub fn build_request(design: &Design, contact_email: Option<&str>) -> GenerationRequest {
        GenerationRequest::free_form(vec![
            PromptPart::inline_data(&design.image_mime_type, &design.image),
            PromptPart::text(Self::build_prompt(design, contact_email)),
        ])
    }

    /// Generate a pitch. Callers must not invoke this for a design that
    /// already has one cached.
    pub async fn generate_pitch(
        &self,
        design: &Design,
        contact_email: Option<&str>,
    ) -> Result<String, ShowcaseError> {
        let request = Self::build_request(design, contact_email);
        match self.model.generate(&request).await {
            Ok(text) if !text.trim().is_empty() => Ok(text),
            Ok(_) => Err(Self::failure(
                design,
                anyhow::anyhow!("{} returned an empty pitch", self.model.name()),
            )),
            Err(err) => Err(Self::failure(design, err)),
        }
    }

    fn failure(design: &Design, source: anyhow::Error) -> ShowcaseError {
        tracing::error!(
            design_id = %design.id,
            "Error generating pitch: {}",
            scrub_secret_patterns(&format!("{source:#}"))
        );
        ServiceError::Generation { source }.into()
    }
}
