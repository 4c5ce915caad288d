//! # pb-db
//!
//! Database layer for Postboard.
//!
//! - Connection pool management
//! - Repository trait for CRUD operations
//! - PostgreSQL and in-memory post repositories
//!
//! ## Example
//!
//! ```ignore
//! use pb_db::{Database, PgPostRepository, Repository};
//!
//! let db = Database::connect(&url, &config.database).await?;
//! let repo = PgPostRepository::new(db);
//! repo.ensure_schema().await?;
//! let posts = repo.find_all().await?;
//! ```

pub mod memory;
pub mod pool;
pub mod posts;
pub mod repository;

pub use memory::MemoryPostRepository;
pub use pool::Database;
pub use posts::{CreatePostDto, PgPostRepository, PostRow, UpdatePostDto};
pub use repository::{DynPostRepository, PostRepository, Repository, RepositoryError, RepositoryResult};
