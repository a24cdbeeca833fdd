use serde::{Deserialize, Serialize};

use super::date::ItemDate;
use crate::define_id_type;

define_id_type!(i64, ItemId);

/// A priced, dated item tied to a family and a supplier.
///
/// `family_id` and `supplier_id` are references into tables this service does
/// not own; they are stored as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Store-assigned identifier, immutable after creation
    pub id: ItemId,
    pub family_id: i32,
    pub name: String,
    pub date: ItemDate,
    pub supplier_id: i32,
    pub price: f64,
    /// Ordinary data flag, not a deletion marker
    pub inactive: bool,
}

/// Every field of an [`Item`] except its id.
///
/// This is the body accepted by create and update. Fields left out of a
/// request take their zero value instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemDraft {
    pub family_id: i32,
    pub name: String,
    pub date: ItemDate,
    pub supplier_id: i32,
    pub price: f64,
    pub inactive: bool,
}

impl ItemDraft {
    /// Attach an id, producing the full item.
    pub fn with_id(self, id: ItemId) -> Item {
        Item {
            id,
            family_id: self.family_id,
            name: self.name,
            date: self.date,
            supplier_id: self.supplier_id,
            price: self.price,
            inactive: self.inactive,
        }
    }
}

impl From<Item> for ItemDraft {
    fn from(item: Item) -> Self {
        Self {
            family_id: item.family_id,
            name: item.name,
            date: item.date,
            supplier_id: item.supplier_id,
            price: item.price,
            inactive: item.inactive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_missing_fields_default_to_zero() {
        let draft: ItemDraft = serde_json::from_str(r#"{"name":"Widget"}"#).unwrap();
        assert_eq!(draft.name, "Widget");
        assert_eq!(draft.family_id, 0);
        assert_eq!(draft.supplier_id, 0);
        assert_eq!(draft.price, 0.0);
        assert!(!draft.inactive);
        assert!(draft.date.is_zero());
    }

    #[test]
    fn test_draft_ignores_client_id() {
        let draft: ItemDraft = serde_json::from_str(r#"{"id":77,"name":"x"}"#).unwrap();
        let item = draft.with_id(ItemId::new(3));
        assert_eq!(item.id.value(), 3);
    }

    #[test]
    fn test_draft_rejects_wrong_types() {
        let result = serde_json::from_str::<ItemDraft>(r#"{"price":"cheap"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_item_json_shape() {
        let item = ItemDraft {
            family_id: 1,
            name: "Widget".to_string(),
            date: ItemDate::parse("2024-01-15").unwrap(),
            supplier_id: 2,
            price: 9.99,
            inactive: false,
        }
        .with_id(ItemId::new(5));

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["id"], 5);
        assert_eq!(value["family_id"], 1);
        assert_eq!(value["name"], "Widget");
        assert_eq!(value["date"], "2024-01-15");
        assert_eq!(value["supplier_id"], 2);
        assert_eq!(value["price"], 9.99);
        assert_eq!(value["inactive"], false);
    }

    #[test]
    fn test_item_id_from_str() {
        let id: ItemId = "42".parse().unwrap();
        assert_eq!(id, ItemId(42));
        assert!("abc".parse::<ItemId>().is_err());
        assert!("4.2".parse::<ItemId>().is_err());
        assert!(" 1".parse::<ItemId>().is_err());
        assert!("1 ".parse::<ItemId>().is_err());
    }
}
