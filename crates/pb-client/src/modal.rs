//! Post form modal
//!
//! A create/edit form held entirely on the client. While open, the modal
//! owns all unsaved input; nothing reaches the server until `submit`.

use bytes::Bytes;
use pb_models::Post;
use tracing::{error, info, instrument};

use crate::gateway::{GatewayError, PictureFile, PostGateway, PostSubmission};
use crate::list::PostListView;
use crate::notify::{Notification, Notifier};

pub const CREATED_MESSAGE: &str = "Post created successfully 😊";
pub const UPDATED_MESSAGE: &str = "Post updated successfully 😊";
pub const CREATE_FAILED_MESSAGE: &str = "Failed to create post 🙃";
pub const UPDATE_FAILED_MESSAGE: &str = "Failed to update post 🙃";

#[derive(Debug, Clone, PartialEq)]
pub enum ModalState {
    Closed,
    CreateOpen,
    EditOpen(Post),
}

impl ModalState {
    pub fn is_open(&self) -> bool {
        !matches!(self, ModalState::Closed)
    }
}

/// Editable form values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub title: String,
    pub content: String,
    /// Stored picture path of the post being edited
    pub picture: Option<String>,
}

/// What the picture preview shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    None,
    /// The post's stored picture
    Stored(String),
    /// The selected, not yet uploaded file
    Local(PictureFile),
}

impl Preview {
    /// Bytes to show for a pending upload
    pub fn local_bytes(&self) -> Option<&Bytes> {
        match self {
            Preview::Local(file) => Some(&file.data),
            _ => None,
        }
    }
}

/// Result of a submit attempt
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The modal was closed; nothing was sent
    NotOpen,
    Created(Post),
    Updated(Post),
    /// The modal stays open with its fields intact
    Failed(GatewayError),
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Created(_) | SubmitOutcome::Updated(_))
    }
}

pub struct PostFormModal {
    state: ModalState,
    fields: FormFields,
    selected_file: Option<PictureFile>,
    preview: Preview,
}

impl Default for PostFormModal {
    fn default() -> Self {
        Self::new()
    }
}

impl PostFormModal {
    pub fn new() -> Self {
        Self {
            state: ModalState::Closed,
            fields: FormFields::default(),
            selected_file: None,
            preview: Preview::None,
        }
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn selected_file(&self) -> Option<&PictureFile> {
        self.selected_file.as_ref()
    }

    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    /// Open with blank fields for a new post
    pub fn open_create(&mut self) {
        self.reset();
        self.state = ModalState::CreateOpen;
    }

    /// Open with fields taken from `post`, discarding any unsaved input
    pub fn open_edit(&mut self, post: &Post) {
        self.reset();
        self.fields = FormFields {
            title: post.title.clone(),
            content: post.content.clone(),
            picture: post.picture_path().map(str::to_string),
        };
        if let Some(path) = &self.fields.picture {
            self.preview = Preview::Stored(path.clone());
        }
        self.state = ModalState::EditOpen(post.clone());
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        if self.state.is_open() {
            self.fields.title = title.into();
        }
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        if self.state.is_open() {
            self.fields.content = content.into();
        }
    }

    /// Pick a file and preview it locally
    pub fn select_file(&mut self, file: PictureFile) {
        if !self.state.is_open() {
            return;
        }
        self.preview = Preview::Local(file.clone());
        self.selected_file = Some(file);
    }

    /// Close without submitting
    pub fn cancel(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.state = ModalState::Closed;
        self.fields = FormFields::default();
        self.selected_file = None;
        self.preview = Preview::None;
    }

    fn submission(&self) -> PostSubmission {
        PostSubmission {
            title: self.fields.title.clone(),
            content: self.fields.content.clone(),
            picture: self.selected_file.clone(),
        }
    }

    /// Send the form: create when no post is being edited, update otherwise
    ///
    /// On success the modal closes, a success notification goes out and the
    /// list picks up the saved post. On failure the modal stays as it was and
    /// an error notification goes out.
    #[instrument(skip_all)]
    pub async fn submit<G, N>(
        &mut self,
        gateway: &G,
        notifier: &N,
        list: &mut PostListView,
    ) -> SubmitOutcome
    where
        G: PostGateway + ?Sized,
        N: Notifier + ?Sized,
    {
        let editing = match &self.state {
            ModalState::Closed => return SubmitOutcome::NotOpen,
            ModalState::CreateOpen => None,
            ModalState::EditOpen(post) => Some(post.id),
        };

        let submission = self.submission();
        let result = match editing {
            Some(id) => gateway.update(id, submission).await,
            None => gateway.create(submission).await,
        };

        match result {
            Ok(ack) => {
                let message = if editing.is_some() { UPDATED_MESSAGE } else { CREATED_MESSAGE };
                info!(id = ack.post.id, server_message = %ack.message, "Post saved");
                notifier.notify(Notification::success(message));
                self.reset();
                list.post_saved(gateway, ack.post.clone()).await;

                if editing.is_some() {
                    SubmitOutcome::Updated(ack.post)
                } else {
                    SubmitOutcome::Created(ack.post)
                }
            }
            Err(e) => {
                let message = if editing.is_some() {
                    UPDATE_FAILED_MESSAGE
                } else {
                    CREATE_FAILED_MESSAGE
                };
                error!(error = %e, "{}", message);
                notifier.notify(Notification::error(message));
                SubmitOutcome::Failed(e)
            }
        }
    }
}
