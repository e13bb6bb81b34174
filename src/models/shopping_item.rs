use serde::{Deserialize, Serialize};

use super::Category;
use crate::error::ValidationError;

/// A single entry on the shopping list, as stored in the persistent slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub purchased: bool,
    pub image: Option<String>,
    pub category: Category,
}

/// Raw form fields for adding or editing an item, before validation
#[derive(Debug, Clone, Default)]
pub struct ItemInput {
    pub name: String,
    pub price: String,
    pub category: Category,
    pub image: Option<String>,
}

/// Item fields that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidItem {
    pub name: String,
    pub price: f64,
    pub category: Category,
    pub image: Option<String>,
}

impl ItemInput {
    pub fn new(name: &str, price: &str, category: Category) -> Self {
        Self {
            name: name.to_string(),
            price: price.to_string(),
            category,
            image: None,
        }
    }

    pub fn with_image(mut self, image: &str) -> Self {
        self.image = Some(image.to_string());
        self
    }

    /// Prefill the form fields from an existing item
    pub fn from_item(item: &ShoppingItem) -> Self {
        Self {
            name: item.name.clone(),
            price: item.price.to_string(),
            category: item.category,
            image: item.image.clone(),
        }
    }

    pub fn validate(&self) -> Result<ValidItem, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::BlankName);
        }

        let price_text = self.price.trim();
        let price = price_text
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite() && *p > 0.0)
            .ok_or_else(|| ValidationError::InvalidPrice(self.price.clone()))?;

        let image = self
            .image
            .as_deref()
            .map(str::trim)
            .filter(|uri| !uri.is_empty())
            .map(str::to_string);

        Ok(ValidItem {
            name: name.to_string(),
            price,
            category: self.category,
            image,
        })
    }
}
