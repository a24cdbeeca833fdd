use diesel::prelude::*;

use super::schema::items;
use crate::db::repository::{ErrorContext, RepositoryError, RepositoryResult};
use crate::models::{Item, ItemDate, ItemDraft, ItemId};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ItemRow {
    pub id: i64,
    pub family_id: i32,
    pub name: String,
    pub date: String,
    pub supplier_id: i32,
    pub price: f64,
    pub inactive: bool,
}

/// Column values written by both insert and full-row update.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = items)]
pub struct ItemChanges {
    pub family_id: i32,
    pub name: String,
    pub date: String,
    pub supplier_id: i32,
    pub price: f64,
    pub inactive: bool,
}

impl From<&ItemDraft> for ItemChanges {
    fn from(draft: &ItemDraft) -> Self {
        Self {
            family_id: draft.family_id,
            name: draft.name.clone(),
            date: draft.date.to_string(),
            supplier_id: draft.supplier_id,
            price: draft.price,
            inactive: draft.inactive,
        }
    }
}

impl TryFrom<ItemRow> for Item {
    type Error = RepositoryError;

    fn try_from(row: ItemRow) -> RepositoryResult<Self> {
        let date = ItemDate::parse(&row.date).map_err(|e| {
            RepositoryError::internal_with_context(
                e.to_string(),
                ErrorContext::new("decode_row")
                    .with_entity("item")
                    .with_entity_id(row.id),
            )
        })?;

        Ok(Item {
            id: ItemId(row.id),
            family_id: row.family_id,
            name: row.name,
            date,
            supplier_id: row.supplier_id,
            price: row.price,
            inactive: row.inactive,
        })
    }
}

pub fn rows_to_items(rows: Vec<ItemRow>) -> RepositoryResult<Vec<Item>> {
    rows.into_iter().map(Item::try_from).collect()
}
