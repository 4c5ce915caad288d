//! Create Service for Posts

use pb_contracts::posts::CreatePostContract;
use pb_contracts::Contract;
use pb_db::CreatePostDto;
use pb_models::Post;
use tracing::{info, instrument};

use super::{flash, PostParams};
use crate::base::ServiceContext;
use crate::result::ServiceResult;

/// Service for creating posts
///
/// # Example
/// ```ignore
/// let service = CreatePostService::new(&context);
/// let result = service.call(PostParams::new("Hello", "World")).await;
/// ```
pub struct CreatePostService<'a> {
    context: &'a ServiceContext,
}

impl<'a> CreatePostService<'a> {
    pub fn new(context: &'a ServiceContext) -> Self {
        Self { context }
    }

    /// Execute the create operation
    #[instrument(skip(self, params), fields(title = %params.title, picture = params.picture.is_some()))]
    pub async fn call(self, params: PostParams) -> ServiceResult<Post> {
        let contract = CreatePostContract::new(&self.context.picture_rules);
        if let Err(errors) = contract.validate(&params) {
            return ServiceResult::failure(errors);
        }

        let picture = match &params.picture {
            Some(file) => match self.context.attachments.store(file).await {
                Ok(picture) => Some(picture),
                Err(e) => return ServiceResult::failure(e),
            },
            None => None,
        };

        let dto = CreatePostDto {
            title: params.title,
            content: params.content,
            picture: picture.clone(),
        };

        match self.context.posts.create(dto).await {
            Ok(post) => {
                info!(id = post.id, "Post created");
                ServiceResult::success_with_message(post, flash::CREATED)
            }
            Err(e) => {
                if let Some(picture) = &picture {
                    self.context.attachments.delete_quietly(picture).await;
                }
                ServiceResult::failure(e)
            }
        }
    }
}
