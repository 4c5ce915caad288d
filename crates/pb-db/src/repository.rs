//! Repository traits
//!
//! Provides generic CRUD operations for database entities.

use std::sync::Arc;

use async_trait::async_trait;
use pb_core::error::OpError;
use pb_core::traits::Id;
use pb_models::Post;

use crate::posts::{CreatePostDto, UpdatePostDto};

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<RepositoryError> for OpError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => OpError::NotFound {
                entity: "Post",
                field: "id",
                value: msg,
            },
            RepositoryError::Database(e) => OpError::Database(e.to_string()),
        }
    }
}

/// Base repository trait for CRUD operations
#[async_trait]
pub trait Repository<T, CreateDto, UpdateDto>: Send + Sync {
    /// Find an entity by ID
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<T>>;

    /// All entities in ascending id order
    async fn find_all(&self) -> RepositoryResult<Vec<T>>;

    /// Create a new entity
    async fn create(&self, dto: CreateDto) -> RepositoryResult<T>;

    /// Update an existing entity
    async fn update(&self, id: Id, dto: UpdateDto) -> RepositoryResult<T>;

    /// Delete an entity by ID
    async fn delete(&self, id: Id) -> RepositoryResult<()>;

    /// Check the backing store is reachable
    async fn ping(&self) -> RepositoryResult<()>;
}

/// Post persistence: `find_all` lists, `find_by_id` gets
pub trait PostRepository: Repository<Post, CreatePostDto, UpdatePostDto> {}

impl<R> PostRepository for R where R: Repository<Post, CreatePostDto, UpdatePostDto> {}

/// Shared handle to whichever post repository backs the application
pub type DynPostRepository = Arc<dyn PostRepository>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_op_error() {
        let err: OpError = RepositoryError::NotFound("7".into()).into();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Not found: Post with id=7");

        let err: OpError = RepositoryError::Database(sqlx::Error::PoolTimedOut).into();
        assert!(matches!(err, OpError::Database(_)));
    }
}
