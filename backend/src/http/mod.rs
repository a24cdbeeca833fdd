//! HTTP server module.
//!
//! This module provides an axum-based HTTP server exposing the item store as
//! a JSON REST API and as server-rendered HTML pages.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Request parsing and validation                         │
//! │  - Rendering strategy per route (JSON / Tera HTML)        │
//! │  - CORS, compression, request tracing                     │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Service Layer (db::services)                             │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Repository Layer (db/)                                   │
//! │  - LocalRepository / PostgresRepository                   │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod render;
pub mod router;
pub mod state;
pub mod templates;

pub use config::ServerConfig;
pub use router::{create_router, create_router_with_static};
pub use state::AppState;
pub use templates::ItemTemplates;
