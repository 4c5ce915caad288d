//! # pb-core
//!
//! Core types, errors, and configuration for Postboard.
//!
//! This crate provides the building blocks shared by every other crate:
//! - The domain error type and field-level validation errors
//! - Result type aliases
//! - Identifier and timestamp traits
//! - Application configuration

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::*;
pub use result::*;
pub use traits::*;
