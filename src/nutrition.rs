use std::time::Duration;

use axum::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::NutritionConfig;

/// Resolves a free-text food description to a calorie estimate.
///
/// Every failure mode (network, status, parse, no match) degrades to `None`;
/// implementations never surface errors to callers.
#[async_trait]
pub trait CalorieLookup: Send + Sync {
    async fn lookup_calories(&self, text: &str) -> Option<f64>;
}

/// Client for the Nutritionix natural-nutrients endpoint.
pub struct NutritionixClient {
    client: reqwest::Client,
    api_url: String,
    app_id: String,
    app_key: String,
}

#[derive(Debug, Deserialize)]
struct NutritionResponse {
    #[serde(default)]
    foods: Vec<FoodItem>,
}

#[derive(Debug, Deserialize)]
struct FoodItem {
    nf_calories: Option<f64>,
}

impl NutritionixClient {
    pub fn new(config: &NutritionConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            app_id: config.app_id.clone(),
            app_key: config.app_key.clone(),
        })
    }
}

fn first_calories(response: &NutritionResponse) -> Option<f64> {
    response.foods.first().and_then(|food| food.nf_calories)
}

#[async_trait]
impl CalorieLookup for NutritionixClient {
    async fn lookup_calories(&self, text: &str) -> Option<f64> {
        let result = self
            .client
            .post(&self.api_url)
            .header("x-app-id", &self.app_id)
            .header("x-app-key", &self.app_key)
            .json(&serde_json::json!({ "query": text }))
            .send()
            .await;

        let response = match result {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "nutrition lookup request failed");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "nutrition lookup returned non-success status");
            return None;
        }

        let body: NutritionResponse = match response.json().await {
            Ok(b) => b,
            Err(e) => {
                warn!(error = %e, "nutrition lookup response was not parseable");
                return None;
            }
        };

        match first_calories(&body) {
            Some(calories) => {
                debug!(calories, "calories resolved from nutrition service");
                Some(calories)
            }
            None => {
                warn!(query = text, "no calorie data found for food item");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_first_food_calories() {
        let body: NutritionResponse = serde_json::from_str(
            r#"{"foods": [{"nf_calories": 42.0}, {"nf_calories": 99.0}]}"#,
        )
        .expect("parse");
        assert_eq!(first_calories(&body), Some(42.0));
    }

    #[test]
    fn empty_foods_yields_none() {
        let body: NutritionResponse = serde_json::from_str(r#"{"foods": []}"#).expect("parse");
        assert_eq!(first_calories(&body), None);
    }

    #[test]
    fn missing_foods_field_yields_none() {
        let body: NutritionResponse = serde_json::from_str(r#"{}"#).expect("parse");
        assert_eq!(first_calories(&body), None);
    }

    #[test]
    fn food_without_calories_yields_none() {
        let body: NutritionResponse =
            serde_json::from_str(r#"{"foods": [{"food_name": "mystery"}]}"#).expect("parse");
        assert_eq!(first_calories(&body), None);
    }

    #[test]
    fn extra_fields_are_ignored() {
        let body: NutritionResponse = serde_json::from_str(
            r#"{"foods": [{"food_name": "apple", "nf_calories": 95.0, "serving_qty": 1}]}"#,
        )
        .expect("parse");
        assert_eq!(first_calories(&body), Some(95.0));
    }
}
