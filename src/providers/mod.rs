pub mod gemini;
mod gemini_types;
pub mod http_client;
pub mod scrub;
pub mod traits;

pub use gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiClient};
pub use http_client::build_model_client;
pub use scrub::{api_error, sanitize_api_error, scrub_secret_patterns};
pub use traits::{GenerationRequest, GenerativeModel, PromptPart};
