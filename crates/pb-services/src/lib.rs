//! # pb-services
//!
//! Business logic services for Postboard.
//!
//! Each operation is a service object with `new` and `call`. Services
//! validate through the contracts, write pictures through the attachment
//! manager, and persist through the post repository.

pub mod base;
pub mod posts;
pub mod result;

pub use base::ServiceContext;
pub use result::ServiceResult;
