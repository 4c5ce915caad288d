//! # pb-contracts
//!
//! Contract validation for Postboard.
//!
//! Contracts validate the attributes of an entity before the create and
//! update services touch storage or persistence.

pub mod base;
pub mod posts;

pub use base::*;
