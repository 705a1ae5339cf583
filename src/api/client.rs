//! Monitoring API HTTP Client
//!
//! `reqwest` implementation of [`DashboardApi`].

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::{
    resolve_path, ApiError, ApiResult, DashboardApi, ALERTS_PATH, CHILDREN_PATH, SUMMARY_PATH,
};
use crate::models::{AlertView, ChildView, ListPayload, SummaryView};

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the monitoring API (e.g., "http://localhost:5000")
    pub base_url: String,
    /// Optional request timeout; requests may hang forever without one
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            request_timeout: None,
        }
    }
}

/// HTTP client for the monitoring API
pub struct HttpDashboardApi {
    client: Client,
    base_url: String,
}

impl HttpDashboardApi {
    /// Create a new client with the given configuration
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.url(path);
        tracing::debug!(url = %url, "GET");

        let response = self.client.get(&url).send().await.map_err(network_error)?;
        decode(response).await
    }

    async fn post_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.url(path);
        tracing::debug!(url = %url, "POST");

        let response = self.client.post(&url).send().await.map_err(network_error)?;
        decode(response).await
    }
}

fn network_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Network("Request timeout".to_string())
    } else {
        ApiError::Network(e.to_string())
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
    let status = response.status();
    let text = response.text().await.map_err(network_error)?;

    if !status.is_success() {
        return Err(ApiError::from_status(status.as_u16(), &text));
    }

    Ok(serde_json::from_str(&text)?)
}

#[async_trait(?Send)]
impl DashboardApi for HttpDashboardApi {
    async fn fetch_summary(&self) -> ApiResult<SummaryView> {
        self.get_json(SUMMARY_PATH).await
    }

    async fn fetch_children(&self) -> ApiResult<Vec<ChildView>> {
        let payload: ListPayload<ChildView> = self.get_json(CHILDREN_PATH).await?;
        Ok(payload.into_vec())
    }

    async fn fetch_alerts(&self) -> ApiResult<Vec<AlertView>> {
        let payload: ListPayload<AlertView> = self.get_json(ALERTS_PATH).await?;
        Ok(payload.into_vec())
    }

    async fn resolve_alert(&self, alert_id: &str) -> ApiResult<serde_json::Value> {
        self.post_json(&resolve_path(alert_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:5000");
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn test_base_url_is_normalized() {
        let api = HttpDashboardApi::new(ClientConfig {
            base_url: "http://example.test/".to_string(),
            request_timeout: None,
        })
        .unwrap();
        assert_eq!(api.base_url(), "http://example.test");
        assert_eq!(api.url(SUMMARY_PATH), "http://example.test/api/dashboard/summary");
    }
}
