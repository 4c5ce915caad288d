//! # pb-attachments
//!
//! Picture storage for Postboard.
//!
//! ## Features
//!
//! - Storage abstraction (local filesystem, in-memory)
//! - Stored-file naming under the upload folder
//! - Storing uploads and removing replaced or orphaned pictures
//!
//! ## Example
//!
//! ```rust,ignore
//! use pb_attachments::{AttachmentManager, MemoryStorage, UploadedFile};
//! use std::sync::Arc;
//!
//! let manager = AttachmentManager::new(Arc::new(MemoryStorage::new()), "uploads", Default::default());
//! let picture = manager.store(&UploadedFile::new("cat.png", Some("image/png"), data)).await?;
//! assert!(picture.public_path().starts_with("/storage/uploads/"));
//! ```

pub mod manager;
pub mod naming;
pub mod storage;
pub mod upload;

pub use manager::{AttachmentError, AttachmentManager, AttachmentResult};
pub use naming::generate_filename;
pub use storage::{FileMetadata, LocalStorage, MemoryStorage, Storage, StorageError, StorageResult};
pub use upload::UploadedFile;
