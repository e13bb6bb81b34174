//! Durable key-value slots backing the shopping list.
//!
//! The list is written wholesale under [`SHOPPING_ITEMS_KEY`]; any backend
//! implementing [`KeyValueStore`] can hold it.

mod memory;
mod sqlite;

use async_trait::async_trait;

use crate::error::Result;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Slot holding the JSON-serialized item list
pub const SHOPPING_ITEMS_KEY: &str = "shoppingItems";

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a slot, `None` when nothing has been stored under `key`
    async fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite a slot
    async fn set_item(&self, key: &str, value: &str) -> Result<()>;

    async fn remove_item(&self, key: &str) -> Result<()>;
}
