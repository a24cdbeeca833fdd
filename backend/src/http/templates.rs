//! Tera templates for the HTML views.
//!
//! The default set is compiled into the binary; a directory glob can replace
//! it at start-up (`TEMPLATES_GLOB`).

use tera::{Context, Tera};

/// Named template set used by [`super::render::HtmlView`].
pub struct ItemTemplates {
    tera: Tera,
}

impl ItemTemplates {
    /// Collection page.
    pub const LIST: &'static str = "items.html";
    /// Single item page.
    pub const DETAIL: &'static str = "item.html";
    /// Edit form for a single item.
    pub const EDIT: &'static str = "edit_item.html";

    /// Templates shipped with the crate.
    pub fn embedded() -> tera::Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("base.html", include_str!("../../templates/base.html")),
            (Self::LIST, include_str!("../../templates/items.html")),
            (Self::DETAIL, include_str!("../../templates/item.html")),
            (Self::EDIT, include_str!("../../templates/edit_item.html")),
        ])?;
        Ok(Self { tera })
    }

    /// Load templates from disk, e.g. `templates/**/*.html`.
    pub fn from_glob(glob: &str) -> tera::Result<Self> {
        Ok(Self {
            tera: Tera::new(glob)?,
        })
    }

    /// Render a named template with the given context.
    pub fn render(&self, name: &str, context: &Context) -> tera::Result<String> {
        self.tera.render(name, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemDate, ItemDraft, ItemId};

    #[test]
    fn test_embedded_templates_render() {
        let templates = ItemTemplates::embedded().unwrap();
        let item = ItemDraft {
            name: "<Widget>".to_string(),
            date: ItemDate::parse("2024-01-15").unwrap(),
            ..Default::default()
        }
        .with_id(ItemId(9));

        let mut context = Context::new();
        context.insert("item", &item);
        let html = templates.render(ItemTemplates::DETAIL, &context).unwrap();

        assert!(html.contains("2024-01-15"));
        assert!(html.contains("&lt;Widget&gt;"));
        assert!(html.contains("/items/html/edit/9"));
    }

    #[test]
    fn test_missing_template_is_error() {
        let templates = ItemTemplates::embedded().unwrap();
        assert!(templates.render("nope.html", &Context::new()).is_err());
    }
}
