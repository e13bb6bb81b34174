use std::fmt;

use serde::Deserialize;
use serde_json::{Map, Value};

/// Number of numbered ingredient/measure slots in a meal object
pub const MAX_INGREDIENTS: usize = 20;

const INGREDIENT_IMAGE_BASE: &str = "https://www.themealdb.com/images/ingredients";

/// Response body of the meal lookup endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct MealEnvelope {
    #[serde(default)]
    pub meals: Option<Vec<Map<String, Value>>>,
}

impl MealEnvelope {
    /// First meal in the envelope, if any
    pub fn into_recipe(self) -> Option<RecipeDetail> {
        let meals = self.meals?;
        meals.first().map(RecipeDetail::from_meal)
    }
}

/// Recipe shown on the detail screen; never persisted
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDetail {
    pub id: String,
    pub name: String,
    pub thumbnail: String,
    pub category: String,
    pub area: String,
    pub instructions: String,
    pub ingredients: Vec<RecipeIngredient>,
}

/// A single ingredient within a recipe
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeIngredient {
    pub name: String,
    pub measure: Option<String>,
}

impl RecipeIngredient {
    pub fn image_url(&self) -> String {
        format!("{}/{}-Small.png", INGREDIENT_IMAGE_BASE, self.name)
    }
}

fn string_field(meal: &Map<String, Value>, key: &str) -> Option<String> {
    meal.get(key).and_then(Value::as_str).map(str::to_string)
}

impl RecipeDetail {
    /// Build a recipe from one meal object, scanning the numbered
    /// `strIngredientN`/`strMeasureN` slots and skipping blank ingredients
    pub fn from_meal(meal: &Map<String, Value>) -> Self {
        let ingredients = (1..=MAX_INGREDIENTS)
            .filter_map(|i| {
                let name = string_field(meal, &format!("strIngredient{}", i))?;
                if name.trim().is_empty() {
                    return None;
                }
                Some(RecipeIngredient {
                    name,
                    measure: string_field(meal, &format!("strMeasure{}", i)),
                })
            })
            .collect();

        Self {
            id: string_field(meal, "idMeal").unwrap_or_default(),
            name: string_field(meal, "strMeal").unwrap_or_default(),
            thumbnail: string_field(meal, "strMealThumb").unwrap_or_default(),
            category: string_field(meal, "strCategory").unwrap_or_default(),
            area: string_field(meal, "strArea").unwrap_or_default(),
            instructions: string_field(meal, "strInstructions").unwrap_or_default(),
            ingredients,
        }
    }
}

impl fmt::Display for RecipeDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Recipe: {}", self.name)?;
        writeln!(f, "Category: {}", self.category)?;
        writeln!(f, "Area: {}", self.area)?;
        writeln!(f, "\nIngredients:")?;

        for ingredient in &self.ingredients {
            match ingredient.measure.as_deref().map(str::trim) {
                Some(measure) if !measure.is_empty() => {
                    writeln!(f, "  - {} {}", measure, ingredient.name)?
                }
                _ => writeln!(f, "  - {}", ingredient.name)?,
            }
        }

        if !self.instructions.is_empty() {
            writeln!(f, "\nInstructions:\n{}", self.instructions)?;
        }

        Ok(())
    }
}
