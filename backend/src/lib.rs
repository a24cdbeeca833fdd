//! # Items Rust Backend
//!
//! A small CRUD service over an `items` table, exposed as a JSON REST API and
//! as server-rendered HTML pages.
//!
//! ## Architecture
//!
//! - [`models`]: the item record, its identifier and the calendar-date field
//! - [`db`]: repository trait, in-memory and PostgreSQL backends, factory and
//!   configuration, plus thin service functions used by the handlers
//! - [`http`]: axum router, handlers, rendering strategies and templates
//!
//! The repository handle is built once at start-up and injected into the
//! router state; there is no global store.

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod db;
pub mod models;

#[cfg(feature = "http-server")]
pub mod http;
