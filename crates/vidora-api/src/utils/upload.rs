//! Common utilities for file upload handlers

use crate::state::{MediaKind, MediaLimits};
use axum::extract::multipart::{Field, MultipartError};
use axum::extract::Multipart;
use axum::http::StatusCode;
use vidora_core::AppError;

/// A file read from a multipart field
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub data: Vec<u8>,
    pub filename: String,
    pub content_type: String,
}

/// Parts of the publish form
#[derive(Debug, Default)]
pub struct PublishForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<UploadedFile>,
    pub video: Option<UploadedFile>,
}

/// Body limit overruns surface here while streaming and map to 413.
fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge(format!("Request body too large: {}", e.body_text()));
    }
    AppError::InvalidInput(format!("Failed to read multipart: {}", e.body_text()))
}

async fn read_file(field: Field<'_>) -> Result<UploadedFile, AppError> {
    let filename = field
        .file_name()
        .map(|s: &str| s.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let content_type = field
        .content_type()
        .map(|s: &str| s.to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string());

    let data = field.bytes().await.map_err(multipart_error)?;

    Ok(UploadedFile {
        data: data.to_vec(),
        filename,
        content_type,
    })
}

fn store_once(
    slot: &mut Option<UploadedFile>,
    file: UploadedFile,
    field_name: &str,
) -> Result<(), AppError> {
    if slot.is_some() {
        return Err(AppError::InvalidInput(format!(
            "Multiple '{}' fields are not allowed",
            field_name
        )));
    }
    *slot = Some(file);
    Ok(())
}

/// Read the publish form: text fields `title`, `description` and file fields
/// `thumbnail`, `video`. Unknown fields are ignored.
pub async fn read_publish_form(mut multipart: Multipart) -> Result<PublishForm, AppError> {
    let mut form = PublishForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field_name.as_str() {
            "title" => form.title = Some(field.text().await.map_err(multipart_error)?),
            "description" => form.description = Some(field.text().await.map_err(multipart_error)?),
            "thumbnail" => {
                let file = read_file(field).await?;
                store_once(&mut form.thumbnail, file, "thumbnail")?;
            }
            "video" => {
                let file = read_file(field).await?;
                store_once(&mut form.video, file, "video")?;
            }
            other => {
                tracing::debug!(field = %other, "Ignoring unexpected multipart field");
            }
        }
    }

    Ok(form)
}

/// Extract the single file sent under `field_name`.
/// Returns `None` when the form carries no such field.
pub async fn extract_multipart_file(
    mut multipart: Multipart,
    field_name: &str,
) -> Result<Option<UploadedFile>, AppError> {
    let mut file: Option<UploadedFile> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() == Some(field_name) {
            let uploaded = read_file(field).await?;
            store_once(&mut file, uploaded, field_name)?;
        }
    }

    Ok(file)
}

/// Validate file size
pub fn validate_file_size(file_size: usize, max_size: usize) -> Result<(), AppError> {
    if file_size > max_size {
        return Err(AppError::PayloadTooLarge(format!(
            "File size exceeds maximum allowed size of {} MB",
            max_size / 1024 / 1024
        )));
    }
    Ok(())
}

/// Normalize MIME type by stripping parameters (e.g. "image/jpeg; charset=utf-8" -> "image/jpeg").
fn normalize_mime_type(content_type: &str) -> &str {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
}

/// Validate content type against allowlist. Compares normalized MIME type only (no parameter bypass).
pub fn validate_content_type(content_type: &str, allowed_types: &[String]) -> Result<(), AppError> {
    let normalized = normalize_mime_type(content_type).to_lowercase();
    if !allowed_types.iter().any(|ct| normalized == ct.to_lowercase()) {
        return Err(AppError::InvalidInput(format!(
            "Invalid content type. Allowed types: {}",
            allowed_types.join(", ")
        )));
    }
    Ok(())
}

/// Validate file extension
pub fn validate_file_extension(
    filename: &str,
    allowed_extensions: &[String],
) -> Result<String, AppError> {
    let extension = match filename.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => String::new(),
    };

    if !allowed_extensions.contains(&extension) {
        return Err(AppError::InvalidInput(format!(
            "Invalid file extension. Allowed extensions: {}",
            allowed_extensions.join(", ")
        )));
    }

    Ok(extension)
}

/// Run every upload check for `kind` and return the normalized extension.
pub fn validate_upload(
    file: &UploadedFile,
    kind: MediaKind,
    limits: &MediaLimits,
) -> Result<String, AppError> {
    if file.data.is_empty() {
        return Err(AppError::InvalidInput(format!(
            "The {} file is empty",
            kind.field_name()
        )));
    }
    validate_file_size(file.data.len(), limits.max_file_size)?;
    validate_content_type(&file.content_type, &limits.allowed_content_types)?;
    validate_file_extension(&file.filename, &limits.allowed_extensions)
}
