pub mod matcher;
pub mod pitch;
pub mod schema;

pub use matcher::MatchAnalyzer;
pub use pitch::PitchGenerator;
pub use schema::match_response_schema;
