//! # pb-models
//!
//! Domain models for Postboard.
//!
//! Plain data records shared by the persistence layer, the services, the
//! HTTP surface, and the client.

pub use pb_core::traits::{Entity, Id, Identifiable, Timestamped};

pub mod picture;
pub mod post;

pub use picture::{PicturePath, PUBLIC_MOUNT};
pub use post::Post;
