//! Monitoring API
//!
//! The dashboard consumes four endpoints:
//!
//! - `GET /api/dashboard/summary` - Screen-time summary
//! - `GET /api/children` - Monitored children
//! - `GET /api/alerts` - Active alerts
//! - `POST /api/alerts/{id}/resolve` - Mark an alert resolved
//!
//! [`DashboardApi`] is the seam the controller talks through. The native
//! [`HttpDashboardApi`] uses `reqwest`; the browser shell in `dashboard-web/`
//! provides a `gloo-net` implementation.

#[cfg(not(target_arch = "wasm32"))]
pub mod client;
pub mod error;

#[cfg(not(target_arch = "wasm32"))]
pub use client::{ClientConfig, HttpDashboardApi};
pub use error::{ApiError, ApiResult};

use crate::models::{AlertView, ChildView, SummaryView};
use async_trait::async_trait;

pub const SUMMARY_PATH: &str = "/api/dashboard/summary";
pub const CHILDREN_PATH: &str = "/api/children";
pub const ALERTS_PATH: &str = "/api/alerts";

/// Path of the resolve endpoint; the id is percent-encoded as one segment
pub fn resolve_path(alert_id: &str) -> String {
    format!("{}/{}/resolve", ALERTS_PATH, urlencoding::encode(alert_id))
}

/// Remote operations the dashboard depends on.
///
/// Futures are not required to be `Send`: the controller runs on a single
/// event loop (a browser's, or a current-thread runtime).
#[async_trait(?Send)]
pub trait DashboardApi {
    async fn fetch_summary(&self) -> ApiResult<SummaryView>;

    async fn fetch_children(&self) -> ApiResult<Vec<ChildView>>;

    async fn fetch_alerts(&self) -> ApiResult<Vec<AlertView>>;

    /// Mark an alert resolved. The acknowledgment body only has to decode.
    async fn resolve_alert(&self, alert_id: &str) -> ApiResult<serde_json::Value>;
}
