mod item_controller;
mod recipe_controller;

pub use item_controller::{load_items, save_items};
pub use recipe_controller::{DEFAULT_API_BASE_URL, RecipeClient, RecipeFetch, RecipeStatus};
