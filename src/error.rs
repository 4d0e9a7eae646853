use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for the showcase.
///
/// Each failure class maps to a distinct recovery policy: validation errors
/// block an action before any network call, persistence errors are recovered
/// inside the store, service and consistency errors are routed into the
/// single error banner by the controller.
#[derive(Debug, Error)]
pub enum ShowcaseError {
    // ── Validation ───────────────────────────────────────────────────────
    #[error(transparent)]
    Validation(#[from] ValidationError),

    // ── Persistence ──────────────────────────────────────────────────────
    #[error("persistence: {0}")]
    Persistence(#[from] PersistenceError),

    // ── AI service ──────────────────────────────────────────────────────
    #[error(transparent)]
    Service(#[from] ServiceError),

    // ── Consistency ─────────────────────────────────────────────────────
    #[error(transparent)]
    Consistency(#[from] ConsistencyError),
}

impl ShowcaseError {
    /// Text shown in the error banner. Never carries the underlying cause of
    /// a service failure.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// ─── Validation errors ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill out all fields and upload an image.")]
    MissingFields,

    #[error("Image file is too large. Please upload an image under {limit_label}.")]
    ImageTooLarge { size_bytes: u64, limit_label: String },

    #[error("Unsupported image type {mime_type}. Please upload a PNG, JPEG, or WEBP image.")]
    UnsupportedImage { mime_type: String },

    #[error("Could not read the image. Please upload it again.")]
    UnreadableImage,

    #[error("Please upload at least one design to use the AI Matchmaker.")]
    EmptyCollection,

    #[error("Please describe what the buyer is looking for.")]
    BlankRequest,

    #[error("Please enter a contact email.")]
    BlankEmail,

    #[error("A buyer request is already being analyzed.")]
    AnalysisInProgress,
}

// ─── Persistence errors ─────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("invalid store key: {0}")]
    InvalidKey(String),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── AI service errors ──────────────────────────────────────────────────────

/// Failures talking to the generative model. The display text is fixed and
/// user-facing; the cause is kept as the error source for logging only.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Failed to generate pitch from Gemini API. Please check the console for more details.")]
    Generation {
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to analyze the buyer request with Gemini API. Please check the console for more details.")]
    Analysis {
        #[source]
        source: anyhow::Error,
    },
}

// ─── Consistency errors ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsistencyError {
    #[error("AI returned a matching design ID that doesn't exist in your collection.")]
    UnknownDesign { design_id: String },
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, ShowcaseError>;
