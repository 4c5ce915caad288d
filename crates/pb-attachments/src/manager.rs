//! Attachment manager
//!
//! Stores uploaded pictures on the public disk and removes the ones a post
//! no longer references.

use std::sync::Arc;

use pb_core::config::{FileNaming, StorageConfig};
use pb_core::error::OpError;
use pb_models::PicturePath;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::naming::generate_filename;
use crate::storage::{Storage, StorageError};
use crate::upload::UploadedFile;

/// Attachment errors
#[derive(Debug, Error)]
pub enum AttachmentError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Upload has no file name")]
    MissingFileName,
}

pub type AttachmentResult<T> = Result<T, AttachmentError>;

impl From<AttachmentError> for OpError {
    fn from(err: AttachmentError) -> Self {
        OpError::Storage(err.to_string())
    }
}

/// Writes and removes pictures on a [`Storage`] backend
pub struct AttachmentManager {
    storage: Arc<dyn Storage>,
    folder: String,
    naming: FileNaming,
}

impl AttachmentManager {
    pub fn new(storage: Arc<dyn Storage>, folder: impl Into<String>, naming: FileNaming) -> Self {
        Self {
            storage,
            folder: folder.into().trim_matches('/').to_string(),
            naming,
        }
    }

    pub fn from_config(storage: Arc<dyn Storage>, config: &StorageConfig) -> Self {
        Self::new(storage, config.upload_folder.clone(), config.file_naming)
    }

    /// Store an upload under the configured upload folder
    pub async fn store(&self, file: &UploadedFile) -> AttachmentResult<PicturePath> {
        self.store_in(file, &self.folder).await
    }

    /// Store an upload under `folder` and return its picture path
    #[instrument(skip(self, file), fields(file = %file.original_name, size = file.size()))]
    pub async fn store_in(&self, file: &UploadedFile, folder: &str) -> AttachmentResult<PicturePath> {
        if file.original_name.trim().is_empty() {
            return Err(AttachmentError::MissingFileName);
        }

        let name = generate_filename(file.extension().as_deref(), self.naming, chrono::Utc::now());
        let key = match folder.trim_matches('/') {
            "" => name,
            folder => format!("{}/{}", folder, name),
        };

        let metadata = self.storage.put(&key, file.data.clone()).await?;

        info!(
            key = %key,
            storage = self.storage.name(),
            content_type = %metadata.content_type,
            bytes = metadata.size,
            digest = %metadata.digest,
            "Picture stored"
        );

        Ok(PicturePath::stored(key))
    }

    /// Remove the file behind a picture path
    ///
    /// Missing files are not an error. Paths with no storage key are left
    /// alone.
    #[instrument(skip(self), fields(path = %picture))]
    pub async fn delete(&self, picture: &PicturePath) -> AttachmentResult<()> {
        let Some(key) = picture.storage_key() else {
            warn!("Picture path is outside the public disk, not deleting");
            return Ok(());
        };

        self.storage.delete(key).await?;
        debug!(key = %key, "Picture deleted");
        Ok(())
    }

    /// Like [`delete`](Self::delete), but only logs failures
    pub async fn delete_quietly(&self, picture: &PicturePath) {
        if let Err(e) = self.delete(picture).await {
            warn!(path = %picture, error = %e, "Failed to delete picture");
        }
    }
}
