//! Rules for user-uploaded images: size ceiling, extension allow-list,
//! object naming and public URLs.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Largest accepted upload request body (5 MiB).
pub const MAX_UPLOAD_BYTES: usize = 5 << 20;

/// Key prefix under which every uploaded object is stored.
pub const UPLOAD_PREFIX: &str = "uploads/";

/// Accepted image extensions (lowercase, without the dot).
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

/// Base URL for publicly readable objects.
pub const PUBLIC_BASE_URL: &str = "https://storage.googleapis.com";

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

// ---------------------------------------------------------------------------
// Extension handling
// ---------------------------------------------------------------------------

/// Extension of the final path component, without the dot, case preserved.
///
/// Returns `None` when the name has no dot.
pub fn file_extension(filename: &str) -> Option<&str> {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    base.rfind('.').map(|idx| &base[idx + 1..])
}

/// Whether `filename` carries one of the [`ALLOWED_EXTENSIONS`].
pub fn is_allowed_file_type(filename: &str) -> bool {
    file_extension(filename)
        .map(|ext| ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Reject filenames whose extension is not allow-listed.
pub fn validate_image_filename(filename: &str) -> Result<(), CoreError> {
    if is_allowed_file_type(filename) {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "Invalid file type. Only jpg, jpeg, png, and gif are allowed".into(),
        ))
    }
}

/// MIME type for an image filename, keyed on the lowercase extension.
pub fn content_type_for(filename: &str) -> &'static str {
    match file_extension(filename)
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        _ => FALLBACK_CONTENT_TYPE,
    }
}

// ---------------------------------------------------------------------------
// Naming
// ---------------------------------------------------------------------------

/// Random collision-resistant filename that keeps the original extension.
pub fn unique_filename(original: &str) -> String {
    let id = uuid::Uuid::new_v4();
    match file_extension(original) {
        Some(ext) => format!("{id}.{ext}"),
        None => id.to_string(),
    }
}

/// Full object key for an uploaded filename.
pub fn object_key(filename: &str) -> String {
    format!("{UPLOAD_PREFIX}{filename}")
}

/// Public URL of an object in `bucket`.
pub fn public_url(bucket: &str, key: &str) -> String {
    format!("{PUBLIC_BASE_URL}/{bucket}/{key}")
}

/// Object size in whole KiB, truncating.
pub fn size_kib(bytes: i64) -> i64 {
    bytes / 1024
}
