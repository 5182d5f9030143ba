use axum::extract::Multipart;

use crate::error::AppError;
use crate::services::image::{ImageUpload, resolve_content_type};

/// Multipart field carrying the image.
pub const IMAGE_FIELD: &str = "image";

fn invalid_file() -> AppError {
    AppError::Validation("Invalid file".into())
}

/// Read the `image` field of a multipart upload.
///
/// Missing field, unreadable body, empty content or a non-image content type
/// are all rejected as an invalid file.
pub async fn read_image(mut multipart: Multipart, max_size: usize) -> Result<ImageUpload, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::debug!("Multipart error: {e}");
        invalid_file()
    })? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type =
            resolve_content_type(field.content_type(), &filename).ok_or_else(invalid_file)?;

        let data = field.bytes().await.map_err(|e| {
            tracing::debug!("Failed to read image field: {e}");
            invalid_file()
        })?;

        if data.is_empty() {
            return Err(invalid_file());
        }
        if data.len() > max_size {
            return Err(AppError::Validation(format!(
                "Image exceeds the maximum size of {max_size} bytes"
            )));
        }

        return Ok(ImageUpload {
            filename,
            content_type,
            data: data.to_vec(),
        });
    }

    Err(invalid_file())
}
