mod category;
mod shopping_item;

pub mod api;

#[cfg(test)]
pub mod test_fixtures;

pub use category::{Category, CategoryFilter};
pub use shopping_item::{ItemInput, ShoppingItem, ValidItem};
