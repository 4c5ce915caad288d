//! # pb-client
//!
//! Client side of Postboard: the gateway to the HTTP API, the post list
//! view, and the create/edit form modal.
//!
//! ## Example
//!
//! ```rust,ignore
//! use pb_client::{HttpPostGateway, PostFormModal, PostListView, TracingNotifier};
//!
//! let gateway = HttpPostGateway::new("http://localhost:8080");
//! let mut list = PostListView::load(&gateway).await?;
//! let mut modal = PostFormModal::new();
//!
//! modal.open_create();
//! modal.set_title("Hello");
//! modal.set_content("World");
//! modal.submit(&gateway, &TracingNotifier, &mut list).await;
//! ```

pub mod gateway;
pub mod http;
pub mod list;
pub mod modal;
pub mod notify;

pub use gateway::{
    DeleteAck, GatewayError, GatewayResult, PictureFile, PostAck, PostGateway, PostSubmission,
};
pub use http::HttpPostGateway;
pub use list::{ListDisplay, PictureCell, PostListView, PostRow};
pub use modal::{FormFields, ModalState, PostFormModal, Preview, SubmitOutcome};
pub use notify::{Notification, NotificationLevel, Notifier, TracingNotifier};
