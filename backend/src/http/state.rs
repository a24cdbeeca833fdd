//! Application state for the HTTP server.

use std::sync::Arc;

use super::templates::ItemTemplates;
use crate::db::repository::ItemRepository;

/// Shared application state passed to all handlers.
///
/// The store handle is injected here at construction time; handlers never
/// reach for a global.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for database operations
    pub repository: Arc<dyn ItemRepository>,
    /// Templates used by the HTML views
    pub templates: Arc<ItemTemplates>,
}

impl AppState {
    /// Create a new application state with the given repository and templates.
    pub fn new(repository: Arc<dyn ItemRepository>, templates: ItemTemplates) -> Self {
        Self {
            repository,
            templates: Arc::new(templates),
        }
    }
}
