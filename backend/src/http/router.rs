//! Router configuration for the HTTP API.
//!
//! This module sets up the static route table, middleware (CORS, compression,
//! tracing) and creates the axum router ready for serving.

use std::path::Path;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use super::handlers;
use super::render::{EditView, HtmlView, JsonView};
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    build_router(state, None)
}

/// Like [`create_router`], additionally serving files under `/static`.
pub fn create_router_with_static(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    build_router(state, Some(static_dir.as_ref()))
}

fn item_routes() -> Router<AppState> {
    Router::new()
        // JSON API
        .route(
            "/items",
            get(handlers::list_items::<JsonView>).post(handlers::create_item),
        )
        .route("/items/search", get(handlers::search_items::<JsonView>))
        .route(
            "/items/{id}",
            get(handlers::get_item::<JsonView>)
                .put(handlers::update_item::<JsonView>)
                .delete(handlers::delete_item),
        )
        // Server-rendered views
        .route("/items/html", get(handlers::list_items::<HtmlView>))
        .route("/items/html/{id}", get(handlers::get_item::<HtmlView>))
        .route("/items/html/edit/{id}", get(handlers::get_item::<EditView>))
        .route(
            "/items/html/update/{id}",
            post(handlers::update_item::<HtmlView>),
        )
}

fn build_router(state: AppState, static_dir: Option<&Path>) -> Router {
    // CORS configuration - permissive, there is no authorization model
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/health", get(handlers::health_check))
        .merge(item_routes());

    if let Some(dir) = static_dir {
        router = router.nest_service("/static", ServeDir::new(dir));
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use crate::http::templates::ItemTemplates;
    use std::sync::Arc;

    #[test]
    fn test_router_creation() {
        let repo = Arc::new(LocalRepository::new());
        let state = AppState::new(repo, ItemTemplates::embedded().unwrap());
        let _router = create_router(state.clone());
        let _with_static = create_router_with_static(state, "static");
    }
}
