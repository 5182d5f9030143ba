use std::path::Path;

use super::error::StorageError;

const MAX_EXTENSION_LEN: usize = 16;

/// Extract a normalized extension (lowercase, leading dot) from an uploaded filename.
///
/// Returns an empty string when the filename has no usable extension.
pub fn file_extension(filename: &str) -> String {
    let ext = Path::new(filename.trim())
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();

    if ext.is_empty()
        || ext.len() > MAX_EXTENSION_LEN
        || !ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return String::new();
    }
    format!(".{}", ext.to_ascii_lowercase())
}

/// Derive the object key for an entity image: `{prefix}/{id}{.ext}`.
///
/// The same id and extension always map to the same key, so a new upload
/// replaces the previous object.
pub fn object_key(prefix: &str, id: &str, filename: &str) -> Result<String, StorageError> {
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        return Err(StorageError::InvalidKey(format!(
            "identifier '{id}' cannot be used in an object key"
        )));
    }
    Ok(format!("{prefix}/{id}{}", file_extension(filename)))
}
