//! Axum extractors and application state

use std::path::PathBuf;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Multipart, Path, Request},
    http::request::Parts,
};
use pb_attachments::UploadedFile;
use pb_core::config::AppConfig;
use pb_core::traits::Id;
use pb_services::posts::PostParams;
use pb_services::ServiceContext;
use tracing::debug;

use crate::error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub services: ServiceContext,
    /// Directory served under the public mount
    pub storage_root: PathBuf,
    pub max_body_size: usize,
}

impl AppState {
    pub fn new(services: ServiceContext, config: &AppConfig) -> Self {
        Self {
            services,
            storage_root: PathBuf::from(&config.storage.local_path),
            max_body_size: config.server.max_body_size_bytes,
        }
    }
}

/// Multipart post form: `title`, `content`, optional `picture`, optional `_method`
///
/// Missing text fields read as empty strings and fail validation later. A
/// picture part with neither a file name nor bytes counts as no picture.
#[derive(Debug, Default)]
pub struct PostForm {
    pub title: String,
    pub content: String,
    pub picture: Option<UploadedFile>,
    /// Method override marker
    pub method: Option<String>,
}

impl PostForm {
    /// Text fields are trimmed before validation and storage
    pub fn into_params(self) -> PostParams {
        PostParams {
            id: None,
            title: self.title.trim().to_string(),
            content: self.content.trim().to_string(),
            picture: self.picture,
        }
    }

    /// Whether `_method` asks for an update
    pub fn overrides_to_update(&self) -> bool {
        self.method
            .as_deref()
            .map(|m| m.trim().eq_ignore_ascii_case("PUT") || m.trim().eq_ignore_ascii_case("PATCH"))
            .unwrap_or(false)
    }

    async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = PostForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid multipart body: {}", e)))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "picture" => {
                    let file_name = field.file_name().map(str::to_string).unwrap_or_default();
                    let content_type = field.content_type().map(str::to_string);
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::bad_request(format!("Failed to read picture: {}", e)))?;

                    if file_name.is_empty() && data.is_empty() {
                        continue;
                    }
                    form.picture = Some(UploadedFile {
                        original_name: file_name,
                        content_type,
                        data,
                    });
                }
                "title" | "content" | "_method" => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| ApiError::bad_request(format!("Failed to read {}: {}", name, e)))?;
                    match name.as_str() {
                        "title" => form.title = text,
                        "content" => form.content = text,
                        _ => form.method = Some(text),
                    }
                }
                other => debug!(field = other, "Ignoring unknown form field"),
            }
        }

        Ok(form)
    }
}

#[async_trait]
impl<S> FromRequest<S> for PostForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;
        Self::from_multipart(multipart).await
    }
}

/// Post id from the `:id` path segment
///
/// Ids that do not parse are rejected with the JSON error body.
#[derive(Debug, Clone, Copy)]
pub struct PostId(pub Id);

#[async_trait]
impl<S> FromRequestParts<S> for PostId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<Id>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;
        Ok(PostId(id))
    }
}
