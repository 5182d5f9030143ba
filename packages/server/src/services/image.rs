use common::storage::{ObjectStore, object_key};
use tracing::info;

use crate::error::AppError;

/// Record kinds that carry an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageOwner {
    Category,
    Product,
}

impl ImageOwner {
    fn key_prefix(self) -> &'static str {
        match self {
            ImageOwner::Category => "categories",
            ImageOwner::Product => "products",
        }
    }
}

/// An image read from a multipart upload.
#[derive(Debug)]
pub struct ImageUpload {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Pick the content type for an uploaded image.
///
/// A declared `image/*` type wins. A missing or generic declaration falls
/// back to a guess from the filename. Returns `None` when neither yields an
/// image type.
pub fn resolve_content_type(declared: Option<&str>, filename: &str) -> Option<String> {
    let declared = declared
        .map(|ct| ct.trim().to_ascii_lowercase())
        .filter(|ct| !ct.is_empty() && ct != "application/octet-stream");

    let content_type = match declared {
        Some(ct) => ct,
        None => mime_guess::from_path(filename).first()?.essence_str().to_string(),
    };

    content_type.starts_with("image/").then_some(content_type)
}

/// Upload an image for `id` and return its public URL.
pub async fn store_image(
    store: &dyn ObjectStore,
    owner: ImageOwner,
    id: &str,
    upload: ImageUpload,
) -> Result<String, AppError> {
    let key = object_key(owner.key_prefix(), id, &upload.filename)?;
    let size = upload.data.len();
    let url = store.put(&key, &upload.content_type, upload.data).await?;
    info!(key = %key, size, "Stored image");
    Ok(url)
}
