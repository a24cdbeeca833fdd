//! HTTP handlers for the items API and HTML views.
//!
//! Each handler validates its input, performs exactly one store call through
//! the service layer, and hands the result to an [`ItemView`]. Handlers that
//! serve both JSON and HTML routes are generic over the view.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::Response,
    Json,
};

use super::dto::{HealthResponse, MessageResponse, SearchQuery};
use super::error::AppError;
use super::extract::{parse_item_id, require_name, ItemPayload};
use super::render::{ItemView, JsonView};
use super::state::AppState;
use crate::db::services as db_services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Item CRUD
// =============================================================================

/// POST /items
///
/// Responds `201 Created` with the stored item, including its new id.
pub async fn create_item(
    State(state): State<AppState>,
    ItemPayload(draft): ItemPayload,
) -> Result<Response, AppError> {
    let item = db_services::create_item(state.repository.as_ref(), draft).await?;
    JsonView::item(&state, StatusCode::CREATED, item)
}

/// GET /items, GET /items/html
///
/// With `?name=X` this behaves like [`search_items`]; an empty `name` is
/// rejected before the store is touched.
pub async fn list_items<V: ItemView>(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(query) = query?;
    let repo = state.repository.as_ref();

    let items = match query.name {
        Some(name) => {
            let name = require_name(Some(name))?;
            db_services::search_items_by_name(repo, &name).await?
        }
        None => db_services::list_items(repo).await?,
    };

    V::items(&state, items)
}

/// GET /items/search?name=X
pub async fn search_items<V: ItemView>(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(query) = query?;
    let name = require_name(query.name)?;

    let items = db_services::search_items_by_name(state.repository.as_ref(), &name).await?;
    V::items(&state, items)
}

/// GET /items/{id}, GET /items/html/{id}, GET /items/html/edit/{id}
pub async fn get_item<V: ItemView>(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_item_id(&raw_id)?;

    let item = db_services::get_item(state.repository.as_ref(), id).await?;
    V::item(&state, StatusCode::OK, item)
}

/// PUT /items/{id}, POST /items/html/update/{id}
///
/// Overwrites every field but the id. The response echoes the submitted
/// fields with the path id; the row is not read back.
pub async fn update_item<V: ItemView>(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    ItemPayload(draft): ItemPayload,
) -> Result<Response, AppError> {
    let id = parse_item_id(&raw_id)?;

    let item = db_services::update_item(state.repository.as_ref(), id, draft).await?;
    V::updated(&state, item)
}

/// DELETE /items/{id}
pub async fn delete_item(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> HandlerResult<MessageResponse> {
    let id = parse_item_id(&raw_id)?;

    db_services::delete_item(state.repository.as_ref(), id).await?;
    Ok(Json(MessageResponse::new("Item deleted")))
}
