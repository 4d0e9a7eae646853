use serde::{Deserialize, Serialize};

/// A single catalog entry: one textile design with its image and, once
/// generated, its sales pitch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Design {
    pub id: String,
    pub name: String,
    pub description: String,
    pub materials: String,
    /// Base64-encoded image payload.
    pub image: String,
    pub image_mime_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch: Option<String>,
}

impl Design {
    pub fn has_pitch(&self) -> bool {
        self.pitch.is_some()
    }

    pub fn summary(&self) -> DesignSummary<'_> {
        DesignSummary {
            id: &self.id,
            name: &self.name,
            description: &self.description,
            materials: &self.materials,
        }
    }
}

/// Prompt-facing view of a design; the image payload is never included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DesignSummary<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub description: &'a str,
    pub materials: &'a str,
}

/// Image attached to a design submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignImage {
    /// Base64-encoded payload.
    pub data: String,
    pub mime_type: String,
    /// Size of the decoded payload, used for the upload limit.
    pub size_bytes: u64,
}

/// User submission from the add-design form, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewDesign {
    pub name: String,
    pub description: String,
    pub materials: String,
    pub image: Option<DesignImage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformRecommendation {
    pub platform_name: String,
    pub reason: String,
}

/// Structured answer from the match analyzer. Only constructed after the
/// matched id has been checked against the collection it was asked about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub matched_design_id: String,
    pub justification: String,
    pub platform_recommendations: Vec<PlatformRecommendation>,
}
