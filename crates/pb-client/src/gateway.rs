//! Boundary between the client and the post API

use async_trait::async_trait;
use bytes::Bytes;
use pb_core::error::ValidationErrors;
use pb_core::traits::Id;
use pb_models::Post;
use serde::Deserialize;
use thiserror::Error;

/// Gateway errors
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Validation failed: {}", .0.full_messages().join(", "))]
    Validation(ValidationErrors),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
    #[error("Invalid response: {0}")]
    Decode(String),
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// A file picked for upload, held in memory until submitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictureFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl PictureFile {
    pub fn new(file_name: impl Into<String>, content_type: Option<&str>, data: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.map(str::to_string),
            data: data.into(),
        }
    }
}

/// Payload of a create or update
#[derive(Debug, Clone, PartialEq)]
pub struct PostSubmission {
    pub title: String,
    pub content: String,
    pub picture: Option<PictureFile>,
}

/// Acknowledgment of a create or update
#[derive(Debug, Clone, Deserialize)]
pub struct PostAck {
    pub message: String,
    pub post: Post,
}

/// Acknowledgment of a delete
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteAck {
    pub message: String,
    pub id: Id,
}

/// Post operations as seen from the client
#[async_trait]
pub trait PostGateway: Send + Sync {
    async fn list(&self) -> GatewayResult<Vec<Post>>;

    async fn create(&self, submission: PostSubmission) -> GatewayResult<PostAck>;

    async fn update(&self, id: Id, submission: PostSubmission) -> GatewayResult<PostAck>;

    async fn delete(&self, id: Id) -> GatewayResult<DeleteAck>;
}
