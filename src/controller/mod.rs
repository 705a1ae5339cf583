//! Dashboard Controller
//!
//! Drives the load → render → resolve → load cycle against a [`DashboardApi`]
//! and a [`Dom`].
//!
//! - **Loader** ([`DashboardController::load_dashboard`]): scaffolds the view,
//!   fetches summary, children and alerts concurrently, and renders them only
//!   if all three succeed. Any failure replaces the view with an error and a
//!   retry control.
//! - **Renderer** ([`DashboardController::update_dashboard`]): fills the
//!   scaffolded sections from a [`DashboardSnapshot`].
//! - **Resolver** ([`DashboardController::resolve_alert`]): resolves an alert
//!   remotely, then reloads everything instead of patching the view.
//!
//! Overlapping loads are ordered by a generation counter: a cycle that
//! finishes after a newer one started discards its own result.
//!
//! The view reports [`ViewState::Loading`] while a resolve request is pending.
//! A failed resolve restores the prior state unless a load started meanwhile.

pub mod actions;
pub mod render;

pub use actions::{delegate_click, UiAction};

use futures_util::try_join;
use std::cell::{Cell, Ref, RefCell};

use crate::api::{ApiError, DashboardApi};
use crate::document::{Document, Dom, DomError, Element};
use crate::models::DashboardSnapshot;

/// Observable state of the dashboard view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Uninitialized,
    Loading,
    Rendered,
    Errored,
}

/// How a load cycle ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The snapshot was rendered
    Rendered,
    /// The error view was shown with this message
    Errored(String),
    /// A newer cycle started first; nothing was written after fetching
    Superseded,
}

/// How a resolve round trip ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// Resolved remotely, followed by this reload
    Resolved(LoadOutcome),
    /// Not resolved; the user was notified and the view left untouched
    Failed(ApiError),
}

/// Result of handling a [`UiAction`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Reloaded(LoadOutcome),
    Resolve(ResolveOutcome),
}

/// View controller for one dashboard container
pub struct DashboardController<A, D> {
    api: A,
    document: RefCell<D>,
    container_id: String,
    generation: Cell<u64>,
    state: Cell<ViewState>,
}

impl<A: DashboardApi, D: Dom> DashboardController<A, D> {
    pub fn new(api: A, document: D, container_id: impl Into<String>) -> Self {
        Self {
            api,
            document: RefCell::new(document),
            container_id: container_id.into(),
            generation: Cell::new(0),
            state: Cell::new(ViewState::Uninitialized),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Borrow the document. Do not hold the borrow across an `.await`.
    pub fn document(&self) -> Ref<'_, D> {
        self.document.borrow()
    }

    pub fn into_document(self) -> D {
        self.document.into_inner()
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    pub fn state(&self) -> ViewState {
        self.state.get()
    }

    /// Generation of the most recently started load cycle
    pub fn generation(&self) -> u64 {
        self.generation.get()
    }

    /// Run one full load cycle
    pub async fn load_dashboard(&self) -> LoadOutcome {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        self.state.set(ViewState::Loading);
        tracing::info!(generation, "Loading dashboard data");

        let scaffolded = self
            .document
            .borrow_mut()
            .replace_children(&self.container_id, render::scaffold());
        if let Err(e) = scaffolded {
            tracing::error!(generation, error = %e, "Dashboard container unavailable");
            self.state.set(ViewState::Errored);
            return LoadOutcome::Errored(e.to_string());
        }

        let fetched = try_join!(
            self.api.fetch_summary(),
            self.api.fetch_children(),
            self.api.fetch_alerts()
        );

        if self.generation.get() != generation {
            tracing::debug!(
                generation,
                latest = self.generation.get(),
                "Discarding superseded load"
            );
            return LoadOutcome::Superseded;
        }

        let rendered = match fetched {
            Ok((summary, children, alerts)) => {
                tracing::info!(
                    generation,
                    children = children.len(),
                    alerts = alerts.len(),
                    "Data loaded successfully"
                );
                let snapshot = DashboardSnapshot::new(summary, children, alerts);
                self.update_dashboard(&snapshot).map_err(|e| e.to_string())
            }
            Err(e) => Err(e.to_string()),
        };

        match rendered {
            Ok(()) => LoadOutcome::Rendered,
            Err(message) => {
                tracing::error!(generation, error = %message, "Error loading data");
                self.show_error(&message);
                LoadOutcome::Errored(message)
            }
        }
    }

    /// Render a snapshot into the scaffolded sections
    pub fn update_dashboard(&self, snapshot: &DashboardSnapshot) -> Result<(), DomError> {
        render::apply(&mut *self.document.borrow_mut(), snapshot)?;
        self.state.set(ViewState::Rendered);
        Ok(())
    }

    fn show_error(&self, message: &str) {
        let shown = self
            .document
            .borrow_mut()
            .replace_children(&self.container_id, render::error_view(message));
        if let Err(e) = shown {
            tracing::error!(error = %e, "Could not show error view");
        }
        self.state.set(ViewState::Errored);
    }

    /// Resolve an alert, then resync the whole view with the server
    pub async fn resolve_alert(&self, alert_id: &str) -> ResolveOutcome {
        tracing::info!(alert_id, "Resolving alert");
        let previous = self.state.replace(ViewState::Loading);
        let generation = self.generation.get();

        match self.api.resolve_alert(alert_id).await {
            Ok(ack) => {
                tracing::debug!(alert_id, ack = %ack, "Alert resolved");
                ResolveOutcome::Resolved(self.load_dashboard().await)
            }
            Err(e) => {
                tracing::warn!(alert_id, error = %e, "Error resolving alert");
                if self.generation.get() == generation {
                    self.state.set(previous);
                }
                self.document
                    .borrow_mut()
                    .notify(&format!("Failed to resolve alert: {}", e));
                ResolveOutcome::Failed(e)
            }
        }
    }

    /// Entry point for the delegated click handler
    pub async fn handle_action(&self, action: UiAction) -> ActionOutcome {
        tracing::debug!(action = action.name(), "Handling action");
        match action {
            UiAction::Retry | UiAction::Refresh => {
                ActionOutcome::Reloaded(self.load_dashboard().await)
            }
            UiAction::Resolve { alert_id } => {
                ActionOutcome::Resolve(self.resolve_alert(&alert_id).await)
            }
        }
    }
}

impl<A: DashboardApi> DashboardController<A, Document> {
    /// Click the first element matching `target` and handle whatever it asks for.
    /// Returns `None` when nothing actionable was clicked.
    pub async fn click(&self, target: &dyn Fn(&Element) -> bool) -> Option<ActionOutcome> {
        let action = delegate_click(self.document.borrow().body(), target)?;
        Some(self.handle_action(action).await)
    }

    /// Every actionable control inside the element with `id`
    pub fn bound_actions(&self, id: &str) -> Vec<UiAction> {
        self.document
            .borrow()
            .get_element_by_id(id)
            .map(actions::actions_within)
            .unwrap_or_default()
    }
}
