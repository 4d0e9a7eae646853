pub mod detection;
pub mod loader;

pub use detection::{detect_image_mime, detect_mime, detect_mime_from_extension};
pub use loader::{UploadLimits, image_from_bytes, load_design_image};
