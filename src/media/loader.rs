use super::detection::detect_image_mime;
use crate::catalog::DesignImage;
use crate::error::ValidationError;
use anyhow::Context;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::path::Path;

pub const DEFAULT_MAX_IMAGE_BYTES: u64 = 2 * 1024 * 1024;
pub const DEFAULT_ACCEPTED_MIME_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/webp"];

/// Limits applied to design image uploads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadLimits {
    pub max_image_bytes: u64,
    pub accepted_mime_types: Vec<String>,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            accepted_mime_types: DEFAULT_ACCEPTED_MIME_TYPES
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl UploadLimits {
    /// Human label for the size limit, e.g. `2MB`.
    pub fn limit_label(&self) -> String {
        const MIB: u64 = 1024 * 1024;
        if self.max_image_bytes >= MIB && self.max_image_bytes % MIB == 0 {
            format!("{}MB", self.max_image_bytes / MIB)
        } else {
            format!("{}KB", self.max_image_bytes.div_ceil(1024))
        }
    }

    pub fn check_size(&self, size_bytes: u64) -> Result<(), ValidationError> {
        if size_bytes > self.max_image_bytes {
            return Err(ValidationError::ImageTooLarge {
                size_bytes,
                limit_label: self.limit_label(),
            });
        }
        Ok(())
    }

    pub fn check_mime(&self, mime_type: &str) -> Result<(), ValidationError> {
        if self
            .accepted_mime_types
            .iter()
            .any(|accepted| accepted.eq_ignore_ascii_case(mime_type))
        {
            Ok(())
        } else {
            Err(ValidationError::UnsupportedImage {
                mime_type: mime_type.to_string(),
            })
        }
    }

    /// Checks the decoded payload, not the size the submission claims.
    pub fn check(&self, image: &DesignImage) -> Result<(), ValidationError> {
        let decoded = STANDARD
            .decode(image.data.as_bytes())
            .map_err(|_| ValidationError::UnreadableImage)?;
        self.check_size(decoded.len() as u64)?;
        self.check_mime(&image.mime_type)
    }
}

/// Validate raw image bytes and encode them for storage.
pub fn image_from_bytes(
    bytes: &[u8],
    filename: Option<&str>,
    limits: &UploadLimits,
) -> Result<DesignImage, ValidationError> {
    let size_bytes = bytes.len() as u64;
    limits.check_size(size_bytes)?;

    let mime_type = detect_image_mime(bytes, filename);
    limits.check_mime(&mime_type)?;

    Ok(DesignImage {
        data: STANDARD.encode(bytes),
        mime_type,
        size_bytes,
    })
}

/// Read an image file for a new design. The size limit is checked against
/// file metadata before the payload is read.
pub async fn load_design_image(path: &Path, limits: &UploadLimits) -> anyhow::Result<DesignImage> {
    let metadata = tokio::fs::metadata(path)
        .await
        .with_context(|| format!("Failed to read image {}", path.display()))?;
    limits.check_size(metadata.len())?;

    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read image {}", path.display()))?;
    let filename = path.file_name().and_then(|name| name.to_str());
    Ok(image_from_bytes(&bytes, filename, limits)?)
}
