mod recipe;

pub use recipe::{MAX_INGREDIENTS, MealEnvelope, RecipeDetail, RecipeIngredient};
