//! Find Service for Posts

use pb_core::error::OpError;
use pb_core::traits::{Entity, Id};
use pb_models::Post;
use tracing::instrument;

use crate::base::ServiceContext;
use crate::result::ServiceResult;

/// Service loading a single post
pub struct FindPostService<'a> {
    context: &'a ServiceContext,
}

impl<'a> FindPostService<'a> {
    pub fn new(context: &'a ServiceContext) -> Self {
        Self { context }
    }

    #[instrument(skip(self))]
    pub async fn call(self, id: Id) -> ServiceResult<Post> {
        match self.context.posts.find_by_id(id).await {
            Ok(Some(post)) => ServiceResult::success(post),
            Ok(None) => ServiceResult::failure(OpError::not_found(Post::TYPE_NAME, id)),
            Err(e) => ServiceResult::failure(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::test_support::memory_context;
    use crate::posts::{CreatePostService, PostParams};

    #[tokio::test]
    async fn test_find_existing() {
        let (context, _) = memory_context();
        let created = CreatePostService::new(&context)
            .call(PostParams::new("A", "B"))
            .await
            .into_result()
            .unwrap();

        let found = FindPostService::new(&context).call(created.id).await.into_result().unwrap();
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn test_find_unknown() {
        let (context, _) = memory_context();
        let result = FindPostService::new(&context).call(42).await;
        assert!(result.error().unwrap().is_not_found());
    }
}
