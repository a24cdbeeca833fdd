pub mod date;
pub mod item;
pub mod macros;

pub use date::{ItemDate, ItemDateError};
pub use item::{Item, ItemDraft, ItemId};
