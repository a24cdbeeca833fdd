//! Output-rendering strategies for item handlers.
//!
//! Handlers are written once and instantiated per route with the view that
//! should encode their result: [`JsonView`] for the REST API, [`HtmlView`] and
//! [`EditView`] for the server-rendered pages.

use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use tera::Context;

use super::error::AppError;
use super::state::AppState;
use super::templates::ItemTemplates;
use crate::models::Item;

/// How a handler turns store results into a response.
pub trait ItemView: Send + Sync + 'static {
    /// Render a single item.
    fn item(state: &AppState, status: StatusCode, item: Item) -> Result<Response, AppError>;

    /// Render a collection of items.
    fn items(state: &AppState, items: Vec<Item>) -> Result<Response, AppError>;

    /// Respond to a successful update of `item`.
    fn updated(state: &AppState, item: Item) -> Result<Response, AppError>;
}

/// Structured JSON bodies.
pub struct JsonView;

impl ItemView for JsonView {
    fn item(_state: &AppState, status: StatusCode, item: Item) -> Result<Response, AppError> {
        Ok((status, Json(item)).into_response())
    }

    fn items(_state: &AppState, items: Vec<Item>) -> Result<Response, AppError> {
        Ok(Json(items).into_response())
    }

    fn updated(state: &AppState, item: Item) -> Result<Response, AppError> {
        Self::item(state, StatusCode::OK, item)
    }
}

/// Read-only HTML pages.
pub struct HtmlView;

impl HtmlView {
    /// Canonical read view for an item.
    pub fn detail_path(item: &Item) -> String {
        format!("/items/html/{}", item.id)
    }

    fn page(state: &AppState, template: &str, context: &Context) -> Result<Response, AppError> {
        let body = state.templates.render(template, context)?;
        Ok(Html(body).into_response())
    }
}

impl ItemView for HtmlView {
    fn item(state: &AppState, status: StatusCode, item: Item) -> Result<Response, AppError> {
        let mut context = Context::new();
        context.insert("item", &item);
        let page = Self::page(state, ItemTemplates::DETAIL, &context)?;
        Ok((status, page).into_response())
    }

    fn items(state: &AppState, items: Vec<Item>) -> Result<Response, AppError> {
        let mut context = Context::new();
        context.insert("items", &items);
        Self::page(state, ItemTemplates::LIST, &context)
    }

    /// `302 Found` back to the item's read view.
    fn updated(_state: &AppState, item: Item) -> Result<Response, AppError> {
        Ok((
            StatusCode::FOUND,
            [(header::LOCATION, Self::detail_path(&item))],
        )
            .into_response())
    }
}

/// The edit form page; collections and updates behave like [`HtmlView`].
pub struct EditView;

impl ItemView for EditView {
    fn item(state: &AppState, status: StatusCode, item: Item) -> Result<Response, AppError> {
        let mut context = Context::new();
        context.insert("item", &item);
        let page = HtmlView::page(state, ItemTemplates::EDIT, &context)?;
        Ok((status, page).into_response())
    }

    fn items(state: &AppState, items: Vec<Item>) -> Result<Response, AppError> {
        HtmlView::items(state, items)
    }

    fn updated(state: &AppState, item: Item) -> Result<Response, AppError> {
        HtmlView::updated(state, item)
    }
}
