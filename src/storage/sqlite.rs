use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::SqlitePoolOptions;
use tracing::info;

use super::KeyValueStore;
use crate::error::Result;

/// Key-value slots kept in a single SQLite table
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open the database at `database_url`, creating it if needed, and
    /// bring the schema up to date
    pub async fn connect(database_url: &str) -> Result<Self> {
        if !sqlx::Sqlite::database_exists(database_url).await? {
            info!(database_url, "Creating database");
            sqlx::Sqlite::create_database(database_url).await?;
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        Self::migrate(&pool).await?;
        Ok(Self::new(pool))
    }

    /// Wrap an existing pool; the schema must already be migrated
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn migrate(pool: &SqlitePool) -> Result<()> {
        sqlx::migrate!("./migrations").run(pool).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value) VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = CURRENT_TIMESTAMP
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        sqlx::query("DELETE FROM kv_store WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_fixtures::test_db;
    use rstest::*;

    #[rstest]
    #[tokio::test]
    async fn test_get_missing_key(#[future] test_db: SqlitePool) {
        let store = SqliteStore::new(test_db.await);

        let value = store
            .get_item("shoppingItems")
            .await
            .expect("Failed to read slot");

        assert_eq!(value, None);
    }

    #[rstest]
    #[tokio::test]
    async fn test_set_then_get(#[future] test_db: SqlitePool) {
        let store = SqliteStore::new(test_db.await);

        store
            .set_item("shoppingItems", "[]")
            .await
            .expect("Failed to write slot");

        let value = store
            .get_item("shoppingItems")
            .await
            .expect("Failed to read slot");

        assert_eq!(value.as_deref(), Some("[]"));
    }

    #[rstest]
    #[tokio::test]
    async fn test_set_overwrites_existing_value(#[future] test_db: SqlitePool) {
        let pool = test_db.await;
        let store = SqliteStore::new(pool.clone());

        store
            .set_item("shoppingItems", "first")
            .await
            .expect("Failed to write first value");
        store
            .set_item("shoppingItems", "second")
            .await
            .expect("Failed to write second value");

        let value = store
            .get_item("shoppingItems")
            .await
            .expect("Failed to read slot");
        assert_eq!(value.as_deref(), Some("second"));

        // Still a single row for the slot
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM kv_store WHERE key = ?")
            .bind("shoppingItems")
            .fetch_one(&pool)
            .await
            .expect("Failed to count rows");
        assert_eq!(count, 1);
    }

    #[rstest]
    #[tokio::test]
    async fn test_keys_are_independent(#[future] test_db: SqlitePool) {
        let store = SqliteStore::new(test_db.await);

        store.set_item("a", "1").await.expect("Failed to write a");
        store.set_item("b", "2").await.expect("Failed to write b");
        store.remove_item("a").await.expect("Failed to remove a");

        assert_eq!(store.get_item("a").await.expect("read a"), None);
        assert_eq!(
            store.get_item("b").await.expect("read b").as_deref(),
            Some("2")
        );
    }
}
