//! API error handling
//!
//! Maps domain errors onto JSON error bodies.

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pb_core::error::{OpError, ValidationErrors};
use serde::Serialize;
use tracing::error;

/// API error types
#[derive(Debug)]
pub enum ApiError {
    NotFound { resource: &'static str, id: String },
    Validation(ValidationErrors),
    BadRequest(String),
    MethodNotAllowed(String),
    Internal(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        ApiError::BadRequest(msg.into())
    }

    pub fn method_not_allowed(msg: impl Into<String>) -> Self {
        ApiError::MethodNotAllowed(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<OpError> for ApiError {
    fn from(err: OpError) -> Self {
        match err {
            OpError::NotFound { entity, value, .. } => ApiError::NotFound { resource: entity, id: value },
            OpError::Validation(errors) => ApiError::Validation(errors),
            other => {
                error!(error = %other, code = other.error_code(), "Request failed");
                ApiError::Internal(other.to_string())
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    #[serde(rename = "_type")]
    type_name: &'static str,
    #[serde(rename = "errorIdentifier")]
    error_identifier: &'static str,
    message: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    errors: BTreeMap<String, Vec<String>>,
}

impl ErrorBody {
    fn new(error_identifier: &'static str, message: String) -> Self {
        Self {
            type_name: "Error",
            error_identifier,
            message,
            errors: BTreeMap::new(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            ApiError::NotFound { resource, id } => ErrorBody::new(
                "urn:postboard:errors:NotFound",
                format!("{} with id {} not found", resource, id),
            ),
            ApiError::Validation(errors) => {
                let mut body = ErrorBody::new(
                    "urn:postboard:errors:PropertyConstraintViolation",
                    errors.full_messages().join(", "),
                );
                body.errors = errors.errors;
                if !errors.base_errors.is_empty() {
                    body.errors.insert("base".to_string(), errors.base_errors);
                }
                body
            }
            ApiError::BadRequest(msg) => ErrorBody::new("urn:postboard:errors:InvalidRequestBody", msg),
            ApiError::MethodNotAllowed(msg) => ErrorBody::new("urn:postboard:errors:MethodNotAllowed", msg),
            ApiError::Internal(msg) => ErrorBody::new("urn:postboard:errors:InternalError", msg),
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
