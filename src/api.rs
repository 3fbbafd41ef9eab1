//! HTTP client for the prediction API

use crate::types::*;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("HTTP {status}: {detail}")]
    Status {
        status: reqwest::StatusCode,
        detail: String,
    },
    /// The request never completed (offline, DNS, timeout).
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    /// Success status, but the body did not match the expected shape.
    #[error("invalid response from {endpoint}: {source}")]
    Malformed {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn docs_url(&self) -> String {
        self.url("/docs")
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn api_info(&self) -> Result<ApiInfo, ApiError> {
        self.get_json("/").await
    }

    pub async fn health(&self) -> Result<HealthResponse, ApiError> {
        self.get_json("/health").await
    }

    pub async fn menu_items(&self) -> Result<Vec<MenuItem>, ApiError> {
        let envelope: MenuItemsResponse = self.get_json("/menu-items").await?;
        Ok(envelope.menu_items)
    }

    pub async fn model_info(&self) -> Result<ModelInfo, ApiError> {
        self.get_json("/model-info").await
    }

    pub async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, ApiError> {
        let response = self
            .client
            .post(self.url("/predict"))
            .json(request)
            .send()
            .await?;
        read_json("/predict", response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &'static str) -> Result<T, ApiError> {
        let response = self.client.get(self.url(path)).send().await?;
        read_json(path, response).await
    }
}

async fn read_json<T: DeserializeOwned>(
    endpoint: &'static str,
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let status = response.status();
    debug!(endpoint, status = %status, "Response received");

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.detail_text())
            .unwrap_or_else(|_| status.canonical_reason().unwrap_or("request failed").to_string());
        return Err(ApiError::Status { status, detail });
    }

    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|source| ApiError::Malformed { endpoint, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(&server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn health_parses_model_version() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"status": "healthy", "model_version": "enhanced_v2.0"})),
            )
            .mount(&server)
            .await;

        let health = client_for(&server).health().await.unwrap();
        assert_eq!(health.model_version, "enhanced_v2.0");
        assert_eq!(health.status.as_deref(), Some("healthy"));
    }

    #[tokio::test]
    async fn error_status_carries_detail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({"detail": "item not found"})))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .predict(&PredictionRequest::default())
            .await
            .unwrap_err();
        match err {
            ApiError::Status { status, detail } => {
                assert_eq!(status.as_u16(), 400);
                assert_eq!(detail, "item not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn error_status_without_json_body_uses_reason() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/menu-items"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down"))
            .mount(&server)
            .await;

        let err = client_for(&server).menu_items().await.unwrap_err();
        assert!(matches!(err, ApiError::Status { ref detail, .. } if detail == "Service Unavailable"));
    }

    #[tokio::test]
    async fn wrong_shape_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/model-info"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ml_model": "nope"})))
            .mount(&server)
            .await;

        let err = client_for(&server).model_info().await.unwrap_err();
        assert!(matches!(err, ApiError::Malformed { endpoint: "/model-info", .. }));
    }

    #[tokio::test]
    async fn predict_sends_only_present_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .and(body_json(json!({"date": "2024-01-15", "item_id": "maggi", "current_stock": 10, "event_today": 1})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "item_id": "maggi",
                "predicted_quantity": 125,
                "model_version": "enhanced_v2.0"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request = PredictionRequest {
            date: Some("2024-01-15".into()),
            item_id: Some("maggi".into()),
            current_stock: Some(10),
            event_today: 1,
            ..Default::default()
        };
        let result = client_for(&server).predict(&request).await.unwrap();
        assert_eq!(result.predicted_quantity, 125.0);
    }

    #[tokio::test]
    async fn unreachable_server_is_transport_error() {
        let client = ApiClient::new("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();
        let err = client.health().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:8000/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.docs_url(), "http://localhost:8000/docs");
    }
}
