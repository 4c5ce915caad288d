//! Post repository
//!
//! Database operations for posts.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pb_core::traits::Id;
use pb_models::{PicturePath, Post};
use sqlx::FromRow;
use tracing::info;

use crate::pool::Database;
use crate::repository::{Repository, RepositoryError, RepositoryResult};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS posts (
    id BIGSERIAL PRIMARY KEY,
    title VARCHAR(255) NOT NULL,
    content TEXT NOT NULL,
    picture VARCHAR(255) NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

/// Post database entity
#[derive(Debug, Clone, FromRow)]
pub struct PostRow {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub picture: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: row.id,
            title: row.title,
            content: row.content,
            picture: row.picture.map(PicturePath::from_public),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// DTO for creating a post
#[derive(Debug, Clone)]
pub struct CreatePostDto {
    pub title: String,
    pub content: String,
    pub picture: Option<PicturePath>,
}

/// DTO for updating a post
///
/// Title and content are always replaced. A `None` picture keeps the
/// stored one.
#[derive(Debug, Clone)]
pub struct UpdatePostDto {
    pub title: String,
    pub content: String,
    pub picture: Option<PicturePath>,
}

/// PostgreSQL post repository
pub struct PgPostRepository {
    db: Database,
}

impl PgPostRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Create the posts table when it does not exist yet
    pub async fn ensure_schema(&self) -> RepositoryResult<()> {
        sqlx::query(SCHEMA).execute(self.db.pool()).await?;
        info!("Posts table ready");
        Ok(())
    }
}

#[async_trait]
impl Repository<Post, CreatePostDto, UpdatePostDto> for PgPostRepository {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, title, content, picture, created_at, updated_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.map(Post::from))
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, title, content, picture, created_at, updated_at
            FROM posts
            ORDER BY id ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn create(&self, dto: CreatePostDto) -> RepositoryResult<Post> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (title, content, picture, created_at, updated_at)
            VALUES ($1, $2, $3, NOW(), NOW())
            RETURNING id, title, content, picture, created_at, updated_at
            "#,
        )
        .bind(&dto.title)
        .bind(&dto.content)
        .bind(dto.picture.as_ref().map(PicturePath::public_path))
        .fetch_one(self.db.pool())
        .await?;

        Ok(row.into())
    }

    async fn update(&self, id: Id, dto: UpdatePostDto) -> RepositoryResult<Post> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            UPDATE posts SET
                title = $1,
                content = $2,
                picture = COALESCE($3, picture),
                updated_at = NOW()
            WHERE id = $4
            RETURNING id, title, content, picture, created_at, updated_at
            "#,
        )
        .bind(&dto.title)
        .bind(&dto.content)
        .bind(dto.picture.as_ref().map(PicturePath::public_path))
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?
        .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;

        Ok(row.into())
    }

    async fn delete(&self, id: Id) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(self.db.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn ping(&self) -> RepositoryResult<()> {
        self.db.ping().await?;
        Ok(())
    }
}
