//! List Service for Posts

use pb_models::Post;
use tracing::{debug, instrument};

use crate::base::ServiceContext;
use crate::result::ServiceResult;

/// Service returning every post in ascending id order
pub struct ListPostsService<'a> {
    context: &'a ServiceContext,
}

impl<'a> ListPostsService<'a> {
    pub fn new(context: &'a ServiceContext) -> Self {
        Self { context }
    }

    #[instrument(skip(self))]
    pub async fn call(self) -> ServiceResult<Vec<Post>> {
        match self.context.posts.find_all().await {
            Ok(posts) => {
                debug!(count = posts.len(), "Posts listed");
                ServiceResult::success(posts)
            }
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
    async fn test_empty_list() {
        let (context, _) = memory_context();
        let result = ListPostsService::new(&context).call().await;
        assert!(result.result().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_created_post_is_listed() {
        let (context, _) = memory_context();
        CreatePostService::new(&context)
            .call(PostParams::new("Hello", "World"))
            .await
            .into_result()
            .unwrap();

        let posts = ListPostsService::new(&context).call().await.into_result().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Hello");
        assert_eq!(posts[0].content, "World");
        assert!(posts[0].picture.is_none());
    }
}
