use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::error::{Result, ShopListError};
use crate::models::api::{MealEnvelope, RecipeDetail};

pub const DEFAULT_API_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";

/// Where a recipe lookup stands
#[derive(Debug, Clone, PartialEq)]
pub enum RecipeStatus {
    Loading,
    Success(RecipeDetail),
    NotFound,
}

/// Read-only client for the meal lookup API
#[derive(Debug, Clone)]
pub struct RecipeClient {
    http: reqwest::Client,
    base_url: String,
}

impl RecipeClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch a recipe by meal ID
    /// Returns `RecipeNotFound` when the API has no meal with that ID
    pub async fn fetch_recipe(&self, meal_id: &str) -> Result<RecipeDetail> {
        let envelope: MealEnvelope = self
            .http
            .get(format!("{}/lookup.php", self.base_url))
            .query(&[("i", meal_id)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        envelope
            .into_recipe()
            .ok_or_else(|| ShopListError::RecipeNotFound(meal_id.to_string()))
    }

    /// Resolve a lookup to a display status
    /// Any failure is logged and reported as `NotFound`
    pub async fn lookup(&self, meal_id: &str) -> RecipeStatus {
        match self.fetch_recipe(meal_id).await {
            Ok(recipe) => {
                info!(meal_id, name = %recipe.name, "Fetched recipe");
                RecipeStatus::Success(recipe)
            }
            Err(ShopListError::RecipeNotFound(_)) => {
                info!(meal_id, "No recipe for meal id");
                RecipeStatus::NotFound
            }
            Err(e) => {
                error!("Error fetching recipe details: {}", e);
                RecipeStatus::NotFound
            }
        }
    }

    /// Start a lookup in the background
    pub fn spawn_fetch(&self, meal_id: &str) -> RecipeFetch {
        let (tx, rx) = oneshot::channel();
        let client = self.clone();
        let meal_id = meal_id.to_string();

        let task = tokio::spawn(async move {
            let status = client.lookup(&meal_id).await;
            // Receiver is gone if the screen was left; nothing to deliver
            let _ = tx.send(status);
        });

        RecipeFetch { outcome: rx, task }
    }
}

/// Handle to an in-flight recipe lookup
pub struct RecipeFetch {
    outcome: oneshot::Receiver<RecipeStatus>,
    task: JoinHandle<()>,
}

impl RecipeFetch {
    /// Non-blocking poll; `None` while the lookup is still running
    pub fn try_outcome(&mut self) -> Option<RecipeStatus> {
        match self.outcome.try_recv() {
            Ok(status) => Some(status),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(RecipeStatus::NotFound),
        }
    }

    pub async fn outcome(self) -> RecipeStatus {
        self.outcome.await.unwrap_or(RecipeStatus::NotFound)
    }

    /// Abort the lookup; its outcome is discarded
    pub fn cancel(self) {
        self.task.abort();
    }
}
