//! API routes

use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Router,
};
use tower_http::services::ServeDir;

use crate::extractors::AppState;
use crate::handlers::{health, posts};

/// Create the complete API router
pub fn router(state: AppState) -> Router {
    let storage = ServeDir::new(&state.storage_root);
    let body_limit = DefaultBodyLimit::max(state.max_body_size);

    Router::new()
        .route("/health", get(health::health))
        .nest("/posts", posts_router())
        .nest_service("/storage", storage)
        .layer(body_limit)
        .with_state(state)
}

fn posts_router() -> Router<AppState> {
    Router::new()
        .route("/", get(posts::list_posts).post(posts::create_post))
        .route(
            "/:id",
            get(posts::get_post)
                .put(posts::update_post)
                .patch(posts::update_post)
                .post(posts::update_post_via_override)
                .delete(posts::delete_post),
        )
}
