use tracing::{error, info};

use crate::error::Result;
use crate::models::ShoppingItem;
use crate::storage::{KeyValueStore, SHOPPING_ITEMS_KEY};

/// Load the persisted shopping list
/// Returns an empty list when nothing is stored yet, or when the stored
/// value cannot be read or parsed (the failure is logged, not returned)
pub async fn load_items(store: &dyn KeyValueStore) -> Vec<ShoppingItem> {
    let stored = match store.get_item(SHOPPING_ITEMS_KEY).await {
        Ok(Some(stored)) => stored,
        Ok(None) => return Vec::new(),
        Err(e) => {
            error!("Failed to load items: {}", e);
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<ShoppingItem>>(&stored) {
        Ok(items) => {
            info!(count = items.len(), "Loaded shopping items");
            items
        }
        Err(e) => {
            error!("Failed to load items: {}", e);
            Vec::new()
        }
    }
}

/// Overwrite the persisted shopping list with `items`
pub async fn save_items(store: &dyn KeyValueStore, items: &[ShoppingItem]) -> Result<()> {
    let json = serde_json::to_string(items)?;
    store.set_item(SHOPPING_ITEMS_KEY, &json).await
}
