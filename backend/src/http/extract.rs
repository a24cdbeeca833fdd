//! Request extractors shared by the item handlers.

use axum::{
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};

use super::dto::ItemForm;
use super::error::AppError;
use crate::models::{ItemDraft, ItemId};

/// An item body, accepted either as JSON or as an HTML form submission.
///
/// The `Content-Type` header decides: `application/x-www-form-urlencoded`
/// goes through [`ItemForm`], anything else is parsed as JSON.
#[derive(Debug)]
pub struct ItemPayload(pub ItemDraft);

impl<S> FromRequest<S> for ItemPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        if is_form {
            let Form(form) = Form::<ItemForm>::from_request(req, state).await?;
            Ok(Self(form.into_draft()?))
        } else {
            let Json(draft) = Json::<ItemDraft>::from_request(req, state).await?;
            Ok(Self(draft))
        }
    }
}

/// Parse a raw path segment into an item id.
pub fn parse_item_id(raw: &str) -> Result<ItemId, AppError> {
    raw.parse::<ItemId>()
        .map_err(|_| AppError::BadRequest("Invalid ID".to_string()))
}

/// Require a non-empty `name` search term.
pub fn require_name(name: Option<String>) -> Result<String, AppError> {
    match name {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err(AppError::BadRequest(
            "name parameter is required".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item_id() {
        assert_eq!(parse_item_id("12").unwrap(), ItemId(12));
        assert!(matches!(parse_item_id("abc"), Err(AppError::BadRequest(_))));
        assert!(matches!(parse_item_id(""), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_require_name() {
        assert_eq!(require_name(Some("Widget".into())).unwrap(), "Widget");
        assert!(require_name(Some(String::new())).is_err());
        assert!(require_name(None).is_err());
    }
}
