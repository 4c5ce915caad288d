//! Shared service dependencies

use std::sync::Arc;

use pb_attachments::AttachmentManager;
use pb_contracts::posts::PictureRules;
use pb_db::DynPostRepository;

/// Everything a post service needs to run
///
/// Cheap to clone; handlers build services from it per request.
#[derive(Clone)]
pub struct ServiceContext {
    pub posts: DynPostRepository,
    pub attachments: Arc<AttachmentManager>,
    pub picture_rules: Arc<PictureRules>,
}

impl ServiceContext {
    pub fn new(
        posts: DynPostRepository,
        attachments: Arc<AttachmentManager>,
        picture_rules: PictureRules,
    ) -> Self {
        Self {
            posts,
            attachments,
            picture_rules: Arc::new(picture_rules),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use pb_attachments::MemoryStorage;
    use pb_core::config::FileNaming;
    use pb_core::traits::Id;
    use pb_db::{
        CreatePostDto, MemoryPostRepository, Repository, RepositoryError, RepositoryResult,
        UpdatePostDto,
    };
    use pb_models::Post;

    /// Context over in-memory backends, returning the storage for inspection
    pub(crate) fn memory_context() -> (ServiceContext, Arc<MemoryStorage>) {
        memory_context_named(FileNaming::Unique)
    }

    pub(crate) fn memory_context_named(naming: FileNaming) -> (ServiceContext, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let attachments = AttachmentManager::new(storage.clone(), "uploads", naming);
        let context = ServiceContext::new(
            Arc::new(MemoryPostRepository::new()),
            Arc::new(attachments),
            PictureRules::default(),
        );
        (context, storage)
    }

    /// Repository that reads fine but refuses every write
    pub(crate) struct ReadOnlyPostRepository {
        pub(crate) inner: MemoryPostRepository,
    }

    #[async_trait::async_trait]
    impl Repository<Post, CreatePostDto, UpdatePostDto> for ReadOnlyPostRepository {
        async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<Post>> {
            self.inner.find_by_id(id).await
        }
        async fn find_all(&self) -> RepositoryResult<Vec<Post>> {
            self.inner.find_all().await
        }
        async fn create(&self, _dto: CreatePostDto) -> RepositoryResult<Post> {
            Err(RepositoryError::Database(sqlx::Error::PoolTimedOut))
        }
        async fn update(&self, _id: Id, _dto: UpdatePostDto) -> RepositoryResult<Post> {
            Err(RepositoryError::Database(sqlx::Error::PoolTimedOut))
        }
        async fn delete(&self, _id: Id) -> RepositoryResult<()> {
            Err(RepositoryError::Database(sqlx::Error::PoolTimedOut))
        }
        async fn ping(&self) -> RepositoryResult<()> {
            self.inner.ping().await
        }
    }

    /// Context whose repository rejects writes, seeded with `seed`
    pub(crate) async fn read_only_context(seed: Vec<CreatePostDto>) -> (ServiceContext, Arc<MemoryStorage>) {
        let inner = MemoryPostRepository::new();
        for dto in seed {
            inner.create(dto).await.unwrap();
        }

        let storage = Arc::new(MemoryStorage::new());
        let attachments = AttachmentManager::new(storage.clone(), "uploads", FileNaming::Unique);
        let context = ServiceContext::new(
            Arc::new(ReadOnlyPostRepository { inner }),
            Arc::new(attachments),
            PictureRules::default(),
        );
        (context, storage)
    }
}
