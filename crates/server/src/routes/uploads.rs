//! Image upload route handler.
//!
//! Uploaded files get a random UUID name with a sanitized extension and
//! land in the configured upload directory, which the server also serves
//! statically under `/uploads`. Client-supplied filenames never touch the
//! filesystem.

use std::path::Path as FsPath;

use axum::{Json, extract::Multipart, extract::State, http::StatusCode};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::middleware::AdminUser;
use crate::state::AppState;

/// Extensions we accept for uploaded images.
const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// Response body: the public URL of the stored file.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}

/// `POST /api/upload` (admin, multipart)
pub async fn upload(
    State(state): State<AppState>,
    _admin: AdminUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let Some(filename) = field.file_name().map(ToOwned::to_owned) else {
            continue;
        };

        let extension = sanitized_extension(&filename)?;
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

        if data.is_empty() {
            return Err(AppError::Validation("Empty file".to_owned()));
        }

        let stored_name = format!("{}.{extension}", Uuid::new_v4());
        let upload_dir = &state.config().upload_dir;

        tokio::fs::create_dir_all(upload_dir)
            .await
            .map_err(|e| AppError::Internal(format!("upload dir unavailable: {e}")))?;
        tokio::fs::write(upload_dir.join(&stored_name), &data)
            .await
            .map_err(|e| AppError::Internal(format!("failed to store upload: {e}")))?;

        tracing::info!(file = %stored_name, size = data.len(), "Image uploaded");

        return Ok((
            StatusCode::CREATED,
            Json(UploadResponse {
                url: format!("/uploads/{stored_name}"),
            }),
        ));
    }

    Err(AppError::Validation("No file provided".to_owned()))
}

/// Extract and validate the extension from a client filename.
fn sanitized_extension(filename: &str) -> Result<String> {
    let extension = FsPath::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .ok_or_else(|| AppError::Validation("File has no extension".to_owned()))?;

    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(AppError::Validation("Unsupported file type".to_owned()));
    }

    Ok(extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitized_extension_accepts_images() {
        assert_eq!(sanitized_extension("cone.PNG").unwrap(), "png");
        assert_eq!(sanitized_extension("a.b.jpeg").unwrap(), "jpeg");
    }

    #[test]
    fn test_sanitized_extension_rejects_other_types() {
        assert!(sanitized_extension("script.sh").is_err());
        assert!(sanitized_extension("noextension").is_err());
    }
}
