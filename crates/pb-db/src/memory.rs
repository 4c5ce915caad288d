//! In-memory post repository
//!
//! Used by tests and when no database is configured.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use pb_core::traits::Id;
use pb_models::Post;
use tokio::sync::RwLock;

use crate::posts::{CreatePostDto, UpdatePostDto};
use crate::repository::{Repository, RepositoryError, RepositoryResult};

pub struct MemoryPostRepository {
    posts: RwLock<Vec<Post>>,
    next_id: AtomicI64,
}

impl Default for MemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPostRepository {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl Repository<Post, CreatePostDto, UpdatePostDto> for MemoryPostRepository {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<Post>> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Post>> {
        // ids only grow, so insertion order is id order
        Ok(self.posts.read().await.clone())
    }

    async fn create(&self, dto: CreatePostDto) -> RepositoryResult<Post> {
        let now = Utc::now();
        let post = Post {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            title: dto.title,
            content: dto.content,
            picture: dto.picture,
            created_at: now,
            updated_at: now,
        };

        self.posts.write().await.push(post.clone());
        Ok(post)
    }

    async fn update(&self, id: Id, dto: UpdatePostDto) -> RepositoryResult<Post> {
        let mut posts = self.posts.write().await;
        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;

        post.title = dto.title;
        post.content = dto.content;
        if let Some(picture) = dto.picture {
            post.picture = Some(picture);
        }
        post.updated_at = Utc::now();

        Ok(post.clone())
    }

    async fn delete(&self, id: Id) -> RepositoryResult<()> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.id != id);

        if posts.len() == before {
            return Err(RepositoryError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn ping(&self) -> RepositoryResult<()> {
        Ok(())
    }
}
