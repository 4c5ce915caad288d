//! Update Service for Posts

use pb_contracts::posts::UpdatePostContract;
use pb_contracts::Contract;
use pb_core::error::OpError;
use pb_core::traits::{Entity, Id};
use pb_db::UpdatePostDto;
use pb_models::Post;
use tracing::{info, instrument};

use super::{flash, PostParams};
use crate::base::ServiceContext;
use crate::result::ServiceResult;

/// Service for updating posts
///
/// Title and content are replaced. The picture is replaced only when a new
/// file accompanies the update; the previous file is then deleted.
pub struct UpdatePostService<'a> {
    context: &'a ServiceContext,
}

impl<'a> UpdatePostService<'a> {
    pub fn new(context: &'a ServiceContext) -> Self {
        Self { context }
    }

    /// Execute the update operation
    #[instrument(skip(self, params), fields(picture = params.picture.is_some()))]
    pub async fn call(self, id: Id, mut params: PostParams) -> ServiceResult<Post> {
        let existing = match self.context.posts.find_by_id(id).await {
            Ok(Some(post)) => post,
            Ok(None) => return ServiceResult::failure(OpError::not_found(Post::TYPE_NAME, id)),
            Err(e) => return ServiceResult::failure(e),
        };

        params.id = Some(existing.id);
        let contract = UpdatePostContract::new(&self.context.picture_rules, existing.id);
        if let Err(errors) = contract.validate(&params) {
            return ServiceResult::failure(errors);
        }

        let replacement = match &params.picture {
            Some(file) => match self.context.attachments.store(file).await {
                Ok(picture) => Some(picture),
                Err(e) => return ServiceResult::failure(e),
            },
            None => None,
        };

        let dto = UpdatePostDto {
            title: params.title,
            content: params.content,
            picture: replacement.clone(),
        };

        let post = match self.context.posts.update(existing.id, dto).await {
            Ok(post) => post,
            Err(e) => {
                if let Some(picture) = &replacement {
                    self.context.attachments.delete_quietly(picture).await;
                }
                return ServiceResult::failure(e);
            }
        };

        if let (Some(new), Some(old)) = (&replacement, &existing.picture) {
            if new.storage_key() != old.storage_key() {
                self.context.attachments.delete_quietly(old).await;
            }
        }

        info!(id = post.id, picture_replaced = replacement.is_some(), "Post updated");
        ServiceResult::success_with_message(post, flash::UPDATED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::test_support::{memory_context, memory_context_named, read_only_context};
    use pb_core::config::FileNaming;
    use pb_db::CreatePostDto;
    use crate::posts::CreatePostService;
    use pb_attachments::{Storage, UploadedFile};

    async fn create_with_picture(context: &ServiceContext) -> Post {
        CreatePostService::new(context)
            .call(
                PostParams::new("Hello", "World")
                    .with_picture(UploadedFile::new("old.png", Some("image/png"), "old")),
            )
            .await
            .into_result()
            .unwrap()
    }

    #[tokio::test]
    async fn test_update_without_file_keeps_picture() {
        let (context, storage) = memory_context();
        let post = create_with_picture(&context).await;

        let result = UpdatePostService::new(&context)
            .call(post.id, PostParams::new("Hello2", "World"))
            .await;

        assert_eq!(result.message(), Some(flash::UPDATED));
        let updated = result.into_result().unwrap();
        assert_eq!(updated.title, "Hello2");
        assert_eq!(updated.picture, post.picture);
        assert_eq!(storage.keys().await.len(), 1);
    }

    #[tokio::test]
    async fn test_update_with_file_replaces_and_deletes_old() {
        let (context, storage) = memory_context();
        let post = create_with_picture(&context).await;
        let old_key = post.picture.as_ref().unwrap().storage_key().unwrap().to_string();

        let updated = UpdatePostService::new(&context)
            .call(
                post.id,
                PostParams::new("Hello", "World")
                    .with_picture(UploadedFile::new("new.gif", Some("image/gif"), "new")),
            )
            .await
            .into_result()
            .unwrap();

        let new_key = updated.picture.as_ref().unwrap().storage_key().unwrap();
        assert!(new_key.ends_with(".gif"));
        assert!(!storage.exists(&old_key).await.unwrap());
        assert_eq!(storage.get(new_key).await.unwrap(), "new");
        assert_eq!(storage.keys().await.len(), 1);
    }

    #[tokio::test]
    async fn test_replacement_with_same_key_is_kept() {
        let (context, storage) = memory_context_named(FileNaming::Timestamp);

        // a second boundary between the two uploads yields different keys; try again
        for _ in 0..3 {
            let post = create_with_picture(&context).await;
            let old_key = post.picture.as_ref().unwrap().storage_key().unwrap().to_string();

            let updated = UpdatePostService::new(&context)
                .call(
                    post.id,
                    PostParams::new("Hello", "World")
                        .with_picture(UploadedFile::new("new.png", Some("image/png"), "new")),
                )
                .await
                .into_result()
                .unwrap();
            let new_key = updated.picture.as_ref().unwrap().storage_key().unwrap().to_string();

            if new_key == old_key {
                assert!(storage.exists(&new_key).await.unwrap());
                assert_eq!(storage.get(&new_key).await.unwrap(), "new");
                return;
            }
        }
        panic!("upload and replacement never landed in the same second");
    }

    #[tokio::test]
    async fn test_update_tolerates_already_missing_old_file() {
        let (context, storage) = memory_context();
        let post = create_with_picture(&context).await;
        let old_key = post.picture.as_ref().unwrap().storage_key().unwrap().to_string();
        storage.delete(&old_key).await.unwrap();

        let result = UpdatePostService::new(&context)
            .call(
                post.id,
                PostParams::new("Hello", "World")
                    .with_picture(UploadedFile::new("new.jpg", None, "new")),
            )
            .await;

        assert!(result.is_success());
    }

    #[tokio::test]
    async fn test_update_unknown_post() {
        let (context, _) = memory_context();
        let result = UpdatePostService::new(&context)
            .call(99, PostParams::new("a", "b"))
            .await;
        assert!(result.error().unwrap().is_not_found());
    }

    #[tokio::test]
    async fn test_invalid_update_changes_nothing() {
        let (context, storage) = memory_context();
        let post = create_with_picture(&context).await;

        let result = UpdatePostService::new(&context)
            .call(
                post.id,
                PostParams::new("", "World")
                    .with_picture(UploadedFile::new("x.png", Some("image/png"), "x")),
            )
            .await;

        assert!(result.errors().unwrap().has_error("title"));
        let stored = context.posts.find_by_id(post.id).await.unwrap().unwrap();
        assert_eq!(stored, post);
        assert_eq!(storage.keys().await.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_persist_keeps_old_picture() {
        let (context, storage) = read_only_context(vec![CreatePostDto {
            title: "a".into(),
            content: "b".into(),
            picture: Some(pb_models::PicturePath::stored("uploads/old.png")),
        }])
        .await;
        storage.put("uploads/old.png", "old".into()).await.unwrap();

        let result = UpdatePostService::new(&context)
            .call(1, PostParams::new("a", "b").with_picture(UploadedFile::new("n.png", None, "n")))
            .await;

        assert!(result.is_failure());
        assert_eq!(storage.keys().await, vec!["uploads/old.png".to_string()]);
    }
}
