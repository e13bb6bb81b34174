use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShopListError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Item not found with id: {0}")]
    ItemNotFound(String),

    #[error("Recipe not found with id: {0}")]
    RecipeNotFound(String),
}

/// Rejections raised while entering or editing an item
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter an item name")]
    BlankName,

    #[error("Price must be a positive number, got '{0}'")]
    InvalidPrice(String),
}

pub type Result<T> = std::result::Result<T, ShopListError>;
