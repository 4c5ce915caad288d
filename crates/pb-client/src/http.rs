//! reqwest-backed gateway

use std::collections::BTreeMap;

use async_trait::async_trait;
use pb_core::error::ValidationErrors;
use pb_core::traits::Id;
use pb_models::Post;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::gateway::{
    DeleteAck, GatewayError, GatewayResult, PostAck, PostGateway, PostSubmission,
};

#[derive(Deserialize)]
struct PostCollection {
    posts: Vec<Post>,
}

#[derive(Deserialize, Default)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    errors: BTreeMap<String, Vec<String>>,
}

/// Gateway talking to the HTTP API
pub struct HttpPostGateway {
    client: Client,
    base_url: String,
}

impl HttpPostGateway {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn form(submission: PostSubmission) -> GatewayResult<Form> {
        let mut form = Form::new()
            .text("title", submission.title)
            .text("content", submission.content);

        if let Some(file) = submission.picture {
            let mut part = Part::bytes(file.data.to_vec()).file_name(file.file_name);
            if let Some(content_type) = file.content_type {
                part = part
                    .mime_str(&content_type)
                    .map_err(|e| GatewayError::Decode(format!("Invalid content type: {}", e)))?;
            }
            form = form.part("picture", part);
        }

        Ok(form)
    }

    /// Check the status and decode a success body
    async fn read<T: DeserializeOwned>(response: Response, id: Option<Id>) -> GatewayResult<T> {
        let status = response.status();

        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| GatewayError::Decode(e.to_string()));
        }

        let body: ErrorBody = response.json().await.unwrap_or_default();
        debug!(status = status.as_u16(), message = %body.message, "Request rejected");

        Err(match status {
            StatusCode::UNPROCESSABLE_ENTITY => {
                let mut errors = ValidationErrors::new();
                for (field, messages) in body.errors {
                    for message in messages {
                        if field == "base" {
                            errors.add_base(message);
                        } else {
                            errors.add(field.clone(), message);
                        }
                    }
                }
                if errors.is_empty() {
                    errors.add_base(body.message);
                }
                GatewayError::Validation(errors)
            }
            StatusCode::NOT_FOUND => {
                GatewayError::NotFound(id.map(|id| id.to_string()).unwrap_or(body.message))
            }
            _ => GatewayError::Server {
                status: status.as_u16(),
                message: body.message,
            },
        })
    }
}

fn network(e: reqwest::Error) -> GatewayError {
    GatewayError::Network(e.to_string())
}

#[async_trait]
impl PostGateway for HttpPostGateway {
    async fn list(&self) -> GatewayResult<Vec<Post>> {
        let response = self.client.get(self.url("/posts")).send().await.map_err(network)?;
        let collection: PostCollection = Self::read(response, None).await?;
        Ok(collection.posts)
    }

    async fn create(&self, submission: PostSubmission) -> GatewayResult<PostAck> {
        let response = self
            .client
            .post(self.url("/posts"))
            .multipart(Self::form(submission)?)
            .send()
            .await
            .map_err(network)?;
        Self::read(response, None).await
    }

    async fn update(&self, id: Id, submission: PostSubmission) -> GatewayResult<PostAck> {
        // Sent as POST with a method override, the way browser forms do
        let form = Self::form(submission)?.text("_method", "PUT");
        let response = self
            .client
            .post(self.url(&format!("/posts/{}", id)))
            .multipart(form)
            .send()
            .await
            .map_err(network)?;
        Self::read(response, Some(id)).await
    }

    async fn delete(&self, id: Id) -> GatewayResult<DeleteAck> {
        let response = self
            .client
            .delete(self.url(&format!("/posts/{}", id)))
            .send()
            .await
            .map_err(network)?;
        Self::read(response, Some(id)).await
    }
}
