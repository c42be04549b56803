pub mod items;

pub use items::{CreateItemRequest, Item, ItemCatalog, ItemPage};
