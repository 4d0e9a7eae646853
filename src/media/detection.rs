#[must_use]
pub fn detect_mime(data: &[u8]) -> Option<String> {
    infer::get(data).map(|info| info.mime_type().to_string())
}

#[must_use]
pub fn detect_mime_from_extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    match ext.to_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg".into()),
        "png" => Some("image/png".into()),
        "webp" => Some("image/webp".into()),
        "gif" => Some("image/gif".into()),
        _ => None,
    }
}

/// Magic bytes win over the file extension; unknown content is
/// `application/octet-stream`.
#[must_use]
pub fn detect_image_mime(data: &[u8], filename: Option<&str>) -> String {
    detect_mime(data)
        .or_else(|| filename.and_then(detect_mime_from_extension))
        .unwrap_or_else(|| "application/octet-stream".into())
}
