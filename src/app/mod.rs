pub mod controller;
pub mod dispatch;
pub mod state;
pub mod status;

pub use controller::ShowcaseController;
pub use state::{ErrorBanner, MatchFlow, MatchOutcome, PitchFlow, PitchOutcome, PitchSource};
