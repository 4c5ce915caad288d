//! # pb-api
//!
//! HTTP API for Postboard.
//!
//! JSON responses for the post resource, multipart form input for
//! mutations, and static serving of the public picture mount.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routes;

pub use extractors::AppState;
pub use routes::router;
