//! Delete Service for Posts

use pb_core::error::OpError;
use pb_core::traits::{Entity, Id};
use pb_models::Post;
use tracing::{info, instrument};

use super::flash;
use crate::base::ServiceContext;
use crate::result::ServiceResult;

/// Service for deleting posts
///
/// The record goes first and the picture after it, so an interruption can
/// only leave an orphaned file behind.
pub struct DeletePostService<'a> {
    context: &'a ServiceContext,
}

impl<'a> DeletePostService<'a> {
    pub fn new(context: &'a ServiceContext) -> Self {
        Self { context }
    }

    /// Execute the delete operation, returning the removed post
    #[instrument(skip(self))]
    pub async fn call(self, id: Id) -> ServiceResult<Post> {
        let post = match self.context.posts.find_by_id(id).await {
            Ok(Some(post)) => post,
            Ok(None) => return ServiceResult::failure(OpError::not_found(Post::TYPE_NAME, id)),
            Err(e) => return ServiceResult::failure(e),
        };

        if let Err(e) = self.context.posts.delete(post.id).await {
            return ServiceResult::failure(e);
        }

        if let Some(picture) = &post.picture {
            self.context.attachments.delete_quietly(picture).await;
        }

        info!(id = post.id, "Post deleted");
        ServiceResult::success_with_message(post, flash::DELETED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::test_support::memory_context;
    use crate::posts::{CreatePostService, ListPostsService, PostParams};
    use pb_attachments::{Storage, UploadedFile};

    #[tokio::test]
    async fn test_delete_removes_record_and_file() {
        let (context, storage) = memory_context();
        let post = CreatePostService::new(&context)
            .call(
                PostParams::new("Cat", "Meow")
                    .with_picture(UploadedFile::new("cat.svg", Some("image/svg+xml"), "<svg/>")),
            )
            .await
            .into_result()
            .unwrap();
        let key = post.picture.as_ref().unwrap().storage_key().unwrap().to_string();

        let result = DeletePostService::new(&context).call(post.id).await;
        assert_eq!(result.message(), Some(flash::DELETED));
        assert_eq!(result.result().map(|p| p.id), Some(post.id));

        let posts = ListPostsService::new(&context).call().await.into_result().unwrap();
        assert!(posts.iter().all(|p| p.id != post.id));
        assert!(!storage.exists(&key).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_with_missing_file_succeeds() {
        let (context, storage) = memory_context();
        let post = CreatePostService::new(&context)
            .call(PostParams::new("a", "b").with_picture(UploadedFile::new("a.png", None, "a")))
            .await
            .into_result()
            .unwrap();
        storage
            .delete(post.picture.as_ref().unwrap().storage_key().unwrap())
            .await
            .unwrap();

        assert!(DeletePostService::new(&context).call(post.id).await.is_success());
    }

    #[tokio::test]
    async fn test_delete_unknown_post() {
        let (context, _) = memory_context();
        let result = DeletePostService::new(&context).call(5).await;
        assert!(result.error().unwrap().is_not_found());
    }
}
