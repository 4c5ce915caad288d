//! Post contracts
//!
//! - base: rules shared by create and update
//! - create: contract for new posts
//! - update: contract for existing posts

mod base;
mod create;
mod update;

pub use base::{PictureRules, PictureUpload, PostBaseContract, PostData};
pub use create::CreatePostContract;
pub use update::UpdatePostContract;

/// Validation messages reported for post attributes
pub mod messages {
    pub const BLANK: &str = "can't be blank";
    pub const TITLE_TOO_LONG: &str = "is too long (maximum is 255 characters)";
    pub const NOT_AN_IMAGE: &str = "must be an image";
    pub const NEW_RECORD: &str = "Cannot update a post that has not been saved";
}

/// Maximum title length, in characters
pub const TITLE_MAX_LENGTH: usize = 255;
