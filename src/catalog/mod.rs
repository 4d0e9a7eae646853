pub mod contact;
pub mod ids;
pub mod repository;
pub mod types;

pub use contact::{CONTACT_NOT_PROVIDED, WeaverContact};
pub use ids::{next_design_id, timestamp_id};
pub use repository::DesignRepository;
pub use types::{
    Design, DesignImage, DesignSummary, MatchResult, NewDesign, PlatformRecommendation,
};
