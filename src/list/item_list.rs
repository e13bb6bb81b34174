use std::sync::Arc;

use tracing::info;

use super::SaveWorker;
use crate::controllers::load_items;
use crate::error::{Result, ShopListError};
use crate::models::{ItemInput, ShoppingItem};
use crate::storage::KeyValueStore;

/// The shopping list and the only way to change it
///
/// Every effective mutation queues a full snapshot of the list for the
/// store. Write failures are logged by the save worker and never reach
/// the caller.
pub struct ItemList {
    items: Vec<ShoppingItem>,
    saver: SaveWorker,
}

impl ItemList {
    /// Load the persisted list once and start the save worker
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let items = load_items(store.as_ref()).await;
        Self {
            items,
            saver: SaveWorker::spawn(store),
        }
    }

    pub fn items(&self) -> &[ShoppingItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&ShoppingItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append a new, unpurchased item
    pub fn add(&mut self, input: &ItemInput) -> Result<&ShoppingItem> {
        let valid = input.validate()?;
        let id = self.next_id();
        info!(id = %id, name = %valid.name, "Adding item");

        self.items.push(ShoppingItem {
            id,
            name: valid.name,
            price: valid.price,
            purchased: false,
            image: valid.image,
            category: valid.category,
        });
        self.persist();

        Ok(&self.items[self.items.len() - 1])
    }

    /// Replace an item's name, price, category and image
    /// The id and purchased flag are kept
    pub fn edit(&mut self, id: &str, input: &ItemInput) -> Result<&ShoppingItem> {
        let valid = input.validate()?;
        let index = self
            .position(id)
            .ok_or_else(|| ShopListError::ItemNotFound(id.to_string()))?;
        info!(id, name = %valid.name, "Editing item");

        let item = &mut self.items[index];
        item.name = valid.name;
        item.price = valid.price;
        item.category = valid.category;
        item.image = valid.image;
        self.persist();

        Ok(&self.items[index])
    }

    /// Flip the purchased flag; returns false if no item has `id`
    pub fn toggle_purchased(&mut self, id: &str) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };

        let item = &mut self.items[index];
        item.purchased = !item.purchased;
        self.persist();
        true
    }

    /// Drop an item; returns false if no item has `id`
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };

        let removed = self.items.remove(index);
        info!(id, name = %removed.name, "Removed item");
        self.persist();
        true
    }

    pub fn clear_all(&mut self) {
        info!(count = self.items.len(), "Clearing all items");
        self.items.clear();
        self.persist();
    }

    /// Wait for every queued snapshot to reach the store
    pub async fn flush(&self) {
        self.saver.flush().await;
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    fn persist(&self) {
        self.saver.save(&self.items);
    }

    /// Millisecond timestamp, bumped past any id already in the list
    fn next_id(&self) -> String {
        let mut candidate = chrono::Utc::now().timestamp_millis();
        while self.get(&candidate.to_string()).is_some() {
            candidate += 1;
        }
        candidate.to_string()
    }
}
