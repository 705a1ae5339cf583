//! # Guardian Dashboard
//!
//! View controller for a parental-monitoring dashboard: a screen-time summary,
//! the monitored children and their current activity, and active alerts that
//! can be resolved in place.
//!
//! ## Modules
//!
//! - [`models`]: Wire view-models with explicit per-field defaults
//! - [`document`]: The document seam and an in-memory implementation
//! - [`controller`]: Loader, Renderer and Resolver
//! - [`api`]: The monitoring API seam and its HTTP client
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use guardian_dashboard::{ClientConfig, DashboardController, Document, HttpDashboardApi};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = HttpDashboardApi::new(ClientConfig {
//!         base_url: "http://localhost:5000".to_string(),
//!         request_timeout: None,
//!     })?;
//!     let controller =
//!         DashboardController::new(api, Document::new("dashboard-container"), "dashboard-container");
//!
//!     controller.load_dashboard().await;
//!     println!("{}", controller.document().to_html());
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod controller;
pub mod document;
pub mod models;

pub use api::{ApiError, ApiResult, DashboardApi};

#[cfg(not(target_arch = "wasm32"))]
pub use api::{ClientConfig, HttpDashboardApi};

pub use controller::{
    ActionOutcome, DashboardController, LoadOutcome, ResolveOutcome, UiAction, ViewState,
};

pub use document::{Document, Dom, DomError, Element, Node};

pub use models::{AlertView, ChildView, CurrentSession, DashboardSnapshot, Scalar, SummaryView};

pub use config::{ApiConfig, Config, ConfigError, DashboardConfig, LoggingConfig};
