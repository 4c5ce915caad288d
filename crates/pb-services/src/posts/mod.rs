//! Post services
//!
//! - list: every post, ascending id
//! - find: one post by id
//! - create: validate, store picture, persist
//! - update: validate, store replacement, persist, drop old picture
//! - delete: remove record, then its picture

mod create;
mod delete;
mod find;
mod list;
mod update;

pub use create::CreatePostService;
pub use delete::DeletePostService;
pub use find::FindPostService;
pub use list::ListPostsService;
pub use update::UpdatePostService;

use pb_attachments::UploadedFile;
use pb_contracts::posts::{PictureUpload, PostData};
use pb_core::traits::Id;

/// Flash messages reported by successful mutations
pub mod flash {
    pub const CREATED: &str = "Post created successfully.";
    pub const UPDATED: &str = "Post updated successfully.";
    pub const DELETED: &str = "Post deleted successfully.";
}

/// Post service params
#[derive(Debug, Clone, Default)]
pub struct PostParams {
    pub id: Option<Id>,
    pub title: String,
    pub content: String,
    pub picture: Option<UploadedFile>,
}

impl PostParams {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            content: content.into(),
            picture: None,
        }
    }

    pub fn with_picture(mut self, picture: UploadedFile) -> Self {
        self.picture = Some(picture);
        self
    }
}

impl PostData for PostParams {
    fn id(&self) -> Option<Id> {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn content(&self) -> &str {
        &self.content
    }

    fn picture(&self) -> Option<PictureUpload<'_>> {
        self.picture.as_ref().map(|file| PictureUpload {
            file_name: &file.original_name,
            content_type: file.content_type.as_deref(),
            size: file.size(),
        })
    }
}
