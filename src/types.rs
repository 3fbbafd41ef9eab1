//! Wire types for the prediction API

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single menu item from `/menu-items`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub price: f64,
}

#[derive(Debug, Deserialize)]
pub struct MenuItemsResponse {
    pub menu_items: Vec<MenuItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: Option<String>,
    pub model_version: String,
}

/// Regression metrics reported for the demand model
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Performance {
    pub rmse: f64,
    pub mae: f64,
    pub r2_score: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MlModel {
    #[serde(rename = "type")]
    pub model_type: String,
    pub features: u32,
    pub performance: Performance,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RlModel {
    #[serde(rename = "type")]
    pub model_type: String,
    pub state_size: u32,
    pub action_size: u32,
    pub episodes_trained: u32,
}

/// Payload of `/model-info`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelInfo {
    pub ml_model: MlModel,
    pub rl_model: RlModel,
    pub key_features: Vec<String>,
}

/// Payload of `GET /`, describing the API itself
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApiInfo {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub endpoints: BTreeMap<String, String>,
}

/// Body of `POST /predict`. Absent fields are omitted, never sent as null.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PredictionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rainfall_today: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_count: Option<i64>,
    pub event_today: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PredictionResult {
    pub item_id: String,
    pub predicted_quantity: f64,
    pub model_version: String,
}

/// Error body returned with non-2xx statuses.
///
/// Application errors carry a string `detail`; request validation errors
/// carry a list of objects, so the field stays untyped here.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub detail: serde_json::Value,
}

impl ErrorBody {
    pub fn detail_text(&self) -> String {
        match &self.detail {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}
