//! Data Transfer Objects for the HTTP API.
//!
//! Items themselves are serialized directly from [`crate::models::Item`];
//! this module holds the request and response shapes around them.

use serde::{Deserialize, Serialize};

use super::error::AppError;
use crate::models::{ItemDate, ItemDraft};

/// Query parameters for list and search endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SearchQuery {
    /// Exact item name to filter on
    #[serde(default)]
    pub name: Option<String>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// Confirmation body for operations that return no entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// URL-encoded form submitted by the HTML edit page.
///
/// Every field arrives as text. Blank numeric fields mean zero, a blank date
/// means the zero-date, and `inactive` follows checkbox conventions.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ItemForm {
    pub family_id: String,
    pub name: String,
    pub date: String,
    pub supplier_id: String,
    pub price: String,
    pub inactive: Option<String>,
}

impl ItemForm {
    /// Convert the submitted text fields into a draft.
    pub fn into_draft(self) -> Result<ItemDraft, AppError> {
        Ok(ItemDraft {
            family_id: parse_field("family_id", &self.family_id)?,
            name: self.name,
            date: ItemDate::parse(&self.date).map_err(|e| AppError::BadRequest(e.to_string()))?,
            supplier_id: parse_field("supplier_id", &self.supplier_id)?,
            price: parse_price(&self.price)?,
            inactive: parse_checkbox(self.inactive.as_deref()),
        })
    }
}

fn parse_field<T>(field: &str, raw: &str) -> Result<T, AppError>
where
    T: std::str::FromStr + Default,
{
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(T::default());
    }
    trimmed
        .parse::<T>()
        .map_err(|_| AppError::BadRequest(format!("invalid value for {}: '{}'", field, raw)))
}

fn parse_price(raw: &str) -> Result<f64, AppError> {
    let price: f64 = parse_field("price", raw)?;
    if !price.is_finite() {
        return Err(AppError::BadRequest(format!(
            "invalid value for price: '{}'",
            raw
        )));
    }
    Ok(price)
}

fn parse_checkbox(raw: Option<&str>) -> bool {
    matches!(
        raw.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("on" | "true" | "1" | "yes")
    )
}
