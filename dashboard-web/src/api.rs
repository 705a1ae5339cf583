//! HTTP API Client
//!
//! `gloo-net` implementation of the dashboard's API seam.

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use guardian_dashboard::api::{
    resolve_path, ALERTS_PATH, CHILDREN_PATH, SUMMARY_PATH,
};
use guardian_dashboard::models::ListPayload;
use guardian_dashboard::{AlertView, ApiError, ApiResult, ChildView, DashboardApi, SummaryView};
use serde::de::DeserializeOwned;

/// Same-origin by default, like the page's own relative fetches
pub const DEFAULT_API_BASE: &str = "";

const API_BASE_KEY: &str = "guardian_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_BASE_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

/// Browser `fetch` client for the monitoring API
pub struct FetchApi {
    base_url: String,
}

impl FetchApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let status = response.status();
    let ok = response.ok();
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !ok {
        return Err(ApiError::from_status(status, &text));
    }

    Ok(serde_json::from_str(&text)?)
}

#[async_trait(?Send)]
impl DashboardApi for FetchApi {
    async fn fetch_summary(&self) -> ApiResult<SummaryView> {
        let response = Request::get(&self.url(SUMMARY_PATH))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        decode(response).await
    }

    async fn fetch_children(&self) -> ApiResult<Vec<ChildView>> {
        let response = Request::get(&self.url(CHILDREN_PATH))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let payload: ListPayload<ChildView> = decode(response).await?;
        Ok(payload.into_vec())
    }

    async fn fetch_alerts(&self) -> ApiResult<Vec<AlertView>> {
        let response = Request::get(&self.url(ALERTS_PATH))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let payload: ListPayload<AlertView> = decode(response).await?;
        Ok(payload.into_vec())
    }

    async fn resolve_alert(&self, alert_id: &str) -> ApiResult<serde_json::Value> {
        let response = Request::post(&self.url(&resolve_path(alert_id)))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        decode(response).await
    }
}
