use std::sync::Arc;

use rstest::*;
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};

use super::{Category, ShoppingItem};
use crate::storage::MemoryStore;

/// Test fixture that creates an in-memory SQLite database with migrations applied
///
/// This fixture can be imported and used across all storage tests to ensure
/// consistency in test database setup.
#[fixture]
pub async fn test_db() -> SqlitePool {
    // Create an in-memory SQLite database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

#[fixture]
pub fn memory_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new())
}

pub fn item(id: &str, name: &str, price: f64, purchased: bool, category: Category) -> ShoppingItem {
    ShoppingItem {
        id: id.to_string(),
        name: name.to_string(),
        price,
        purchased,
        image: None,
        category,
    }
}

/// A small mixed list: two unpurchased, one purchased
#[fixture]
pub fn sample_items() -> Vec<ShoppingItem> {
    vec![
        item("1", "Milk", 10.0, false, Category::FreshFood),
        item("2", "Dish Soap", 5.0, true, Category::Household),
        item("3", "Green Tea", 20.0, false, Category::Drinks),
    ]
}
