//! Post list view
//!
//! Holds the posts as last loaded. Mutations patch the list locally and,
//! unless disabled, re-fetch the whole list afterwards so the rows match
//! what is persisted.

use pb_core::traits::Id;
use pb_models::Post;
use tracing::{error, info, instrument, warn};

use crate::gateway::{GatewayResult, PostGateway};

pub const NO_PICTURE: &str = "No Picture";
pub const NO_POSTS: &str = "No posts";

/// Picture column of a row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PictureCell {
    Image(String),
    Placeholder,
}

impl PictureCell {
    /// Image source, or the placeholder text
    pub fn label(&self) -> &str {
        match self {
            PictureCell::Image(src) => src,
            PictureCell::Placeholder => NO_PICTURE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRow {
    pub id: Id,
    pub picture: PictureCell,
    pub title: String,
    pub content: String,
}

/// What the list renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListDisplay {
    Empty(&'static str),
    Rows(Vec<PostRow>),
}

pub struct PostListView {
    posts: Vec<Post>,
    resync_after_mutation: bool,
}

impl PostListView {
    pub fn new(posts: Vec<Post>) -> Self {
        Self {
            posts,
            resync_after_mutation: true,
        }
    }

    /// Fetch the list from the gateway
    pub async fn load<G: PostGateway + ?Sized>(gateway: &G) -> GatewayResult<Self> {
        Ok(Self::new(gateway.list().await?))
    }

    pub fn with_resync(mut self, enabled: bool) -> Self {
        self.resync_after_mutation = enabled;
        self
    }

    pub fn resync_after_mutation(&self) -> bool {
        self.resync_after_mutation
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn get(&self, id: Id) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    /// Replace the list with a fresh copy from the gateway
    pub async fn reload<G: PostGateway + ?Sized>(&mut self, gateway: &G) -> GatewayResult<()> {
        self.posts = gateway.list().await?;
        Ok(())
    }

    /// Insert or replace a post, keeping ascending id order
    pub fn upsert(&mut self, post: Post) {
        match self.posts.binary_search_by_key(&post.id, |p| p.id) {
            Ok(index) => self.posts[index] = post,
            Err(index) => self.posts.insert(index, post),
        }
    }

    pub fn remove(&mut self, id: Id) -> Option<Post> {
        let index = self.posts.iter().position(|p| p.id == id)?;
        Some(self.posts.remove(index))
    }

    /// Apply a created or updated post
    pub async fn post_saved<G: PostGateway + ?Sized>(&mut self, gateway: &G, post: Post) {
        self.upsert(post);
        self.resync(gateway).await;
    }

    /// Delete a post through the gateway
    ///
    /// Failures are logged and leave the list untouched.
    #[instrument(skip(self, gateway))]
    pub async fn delete<G: PostGateway + ?Sized>(&mut self, gateway: &G, id: Id) -> bool {
        match gateway.delete(id).await {
            Ok(ack) => {
                info!(id = ack.id, message = %ack.message, "Post deleted");
                self.remove(ack.id);
                self.resync(gateway).await;
                true
            }
            Err(e) => {
                error!(id = id, error = %e, "Failed to delete post");
                false
            }
        }
    }

    async fn resync<G: PostGateway + ?Sized>(&mut self, gateway: &G) {
        if !self.resync_after_mutation {
            return;
        }
        if let Err(e) = self.reload(gateway).await {
            warn!(error = %e, "Failed to reload posts, keeping local changes");
        }
    }

    pub fn rows(&self) -> Vec<PostRow> {
        self.posts
            .iter()
            .map(|post| PostRow {
                id: post.id,
                picture: match post.picture_path() {
                    Some(path) => PictureCell::Image(path.to_string()),
                    None => PictureCell::Placeholder,
                },
                title: post.title.clone(),
                content: post.content.clone(),
            })
            .collect()
    }

    pub fn render(&self) -> ListDisplay {
        if self.posts.is_empty() {
            ListDisplay::Empty(NO_POSTS)
        } else {
            ListDisplay::Rows(self.rows())
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::gateway::{DeleteAck, GatewayError, PostAck, PostSubmission};
    use async_trait::async_trait;
    use chrono::Utc;
    use pb_models::PicturePath;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use tokio::sync::Mutex;

    pub(crate) fn post(id: Id, title: &str, picture: Option<&str>) -> Post {
        let now = Utc::now();
        Post {
            id,
            title: title.to_string(),
            content: format!("{} content", title),
            picture: picture.map(PicturePath::stored),
            created_at: now,
            updated_at: now,
        }
    }

    /// In-memory gateway that records calls and can be told to fail
    #[derive(Default)]
    pub(crate) struct MockGateway {
        pub posts: Mutex<Vec<Post>>,
        pub submissions: Mutex<Vec<(Option<Id>, PostSubmission)>>,
        pub list_calls: AtomicUsize,
        pub fail_mutations: AtomicBool,
        pub fail_list: AtomicBool,
    }

    impl MockGateway {
        pub fn with_posts(posts: Vec<Post>) -> Self {
            Self {
                posts: Mutex::new(posts),
                ..Default::default()
            }
        }

        async fn save(&self, id: Option<Id>, submission: PostSubmission) -> GatewayResult<PostAck> {
            if self.fail_mutations.load(Ordering::SeqCst) {
                return Err(GatewayError::Server {
                    status: 500,
                    message: "boom".into(),
                });
            }
            self.submissions.lock().await.push((id, submission.clone()));

            let mut posts = self.posts.lock().await;
            let id = id.unwrap_or_else(|| posts.iter().map(|p| p.id).max().unwrap_or(0) + 1);
            let picture = submission
                .picture
                .as_ref()
                .map(|f| format!("uploads/{}", f.file_name));
            let mut saved = post(id, &submission.title, picture.as_deref());
            saved.content = submission.content;

            match posts.iter_mut().find(|p| p.id == id) {
                Some(existing) => {
                    if saved.picture.is_none() {
                        saved.picture = existing.picture.clone();
                    }
                    *existing = saved.clone();
                }
                None => posts.push(saved.clone()),
            }

            Ok(PostAck {
                message: "saved".into(),
                post: saved,
            })
        }
    }

    #[async_trait]
    impl PostGateway for MockGateway {
        async fn list(&self) -> GatewayResult<Vec<Post>> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_list.load(Ordering::SeqCst) {
                return Err(GatewayError::Network("offline".into()));
            }
            Ok(self.posts.lock().await.clone())
        }

        async fn create(&self, submission: PostSubmission) -> GatewayResult<PostAck> {
            self.save(None, submission).await
        }

        async fn update(&self, id: Id, submission: PostSubmission) -> GatewayResult<PostAck> {
            if !self.posts.lock().await.iter().any(|p| p.id == id) {
                return Err(GatewayError::NotFound(id.to_string()));
            }
            self.save(Some(id), submission).await
        }

        async fn delete(&self, id: Id) -> GatewayResult<DeleteAck> {
            if self.fail_mutations.load(Ordering::SeqCst) {
                return Err(GatewayError::Network("offline".into()));
            }
            let mut posts = self.posts.lock().await;
            let before = posts.len();
            posts.retain(|p| p.id != id);
            if posts.len() == before {
                return Err(GatewayError::NotFound(id.to_string()));
            }
            Ok(DeleteAck {
                message: "deleted".into(),
                id,
            })
        }
    }

    #[tokio::test]
    async fn test_load_and_render_rows() {
        let gateway = MockGateway::with_posts(vec![
            post(1, "Hello", None),
            post(2, "Cat", Some("uploads/cat.png")),
        ]);
        let view = PostListView::load(&gateway).await.unwrap();

        let rows = view.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].picture, PictureCell::Placeholder);
        assert_eq!(rows[0].picture.label(), "No Picture");
        assert_eq!(rows[1].picture.label(), "/storage/uploads/cat.png");
        assert_eq!(rows[1].title, "Cat");
    }

    #[test]
    fn test_empty_list_placeholder() {
        assert_eq!(PostListView::new(Vec::new()).render(), ListDisplay::Empty("No posts"));
    }

    #[test]
    fn test_upsert_keeps_id_order() {
        let mut view = PostListView::new(vec![post(1, "a", None), post(3, "c", None)]);
        view.upsert(post(2, "b", None));
        view.upsert(post(3, "c2", None));

        let titles: Vec<_> = view.posts().iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "c2"]);
        assert!(view.remove(2).is_some());
        assert!(view.remove(2).is_none());
    }

    #[tokio::test]
    async fn test_delete_patches_and_resyncs() {
        let gateway = MockGateway::with_posts(vec![post(1, "a", None), post(2, "b", None)]);
        let mut view = PostListView::load(&gateway).await.unwrap();

        assert!(view.delete(&gateway, 1).await);
        assert!(view.get(1).is_none());
        assert_eq!(view.posts().len(), 1);
        // load + resync
        assert_eq!(gateway.list_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_list() {
        let gateway = MockGateway::with_posts(vec![post(1, "a", None)]);
        let mut view = PostListView::load(&gateway).await.unwrap();
        gateway.fail_mutations.store(true, Ordering::SeqCst);

        assert!(!view.delete(&gateway, 1).await);
        assert!(view.get(1).is_some());
    }

    #[tokio::test]
    async fn test_failed_resync_keeps_patch() {
        let gateway = MockGateway::with_posts(vec![post(1, "a", None)]);
        let mut view = PostListView::load(&gateway).await.unwrap();
        gateway.fail_list.store(true, Ordering::SeqCst);

        view.post_saved(&gateway, post(2, "b", None)).await;
        assert_eq!(view.posts().len(), 2);
    }

    #[tokio::test]
    async fn test_resync_can_be_disabled() {
        let gateway = MockGateway::with_posts(vec![post(1, "a", None)]);
        let mut view = PostListView::load(&gateway).await.unwrap().with_resync(false);

        view.post_saved(&gateway, post(1, "renamed", None)).await;
        assert_eq!(view.get(1).unwrap().title, "renamed");
        assert_eq!(gateway.list_calls.load(Ordering::SeqCst), 1);
    }
}
