//! Delegated click handling
//!
//! Controls rendered by the dashboard describe themselves through `data-*`
//! attributes. One handler on the stable container turns a click on any of
//! them into a [`UiAction`], so nothing is bound per item.

use crate::document::Element;

/// Attribute naming what a control does
pub const ACTION_ATTR: &str = "data-action";
/// Attribute carrying the alert identifier on resolve controls
pub const ALERT_ID_ATTR: &str = "data-alert-id";

/// Something the user asked the dashboard to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    /// Retry control on the error view
    Retry,
    /// Manual refresh control outside the container
    Refresh,
    /// Resolve control on an alert card
    Resolve { alert_id: String },
}

impl UiAction {
    /// Decode the attributes of a clicked control
    pub fn from_attributes(action: Option<&str>, alert_id: Option<&str>) -> Option<Self> {
        match action? {
            "retry" => Some(UiAction::Retry),
            "refresh" => Some(UiAction::Refresh),
            "resolve" => Some(UiAction::Resolve {
                alert_id: alert_id.unwrap_or(crate::models::defaults::ALERT_ID).to_string(),
            }),
            _ => None,
        }
    }

    pub fn from_element(el: &Element) -> Option<Self> {
        Self::from_attributes(el.get_attribute(ACTION_ATTR), el.get_attribute(ALERT_ID_ATTR))
    }

    /// The `data-action` value naming this action
    pub fn name(&self) -> &'static str {
        match self {
            UiAction::Retry => "retry",
            UiAction::Refresh => "refresh",
            UiAction::Resolve { .. } => "resolve",
        }
    }
}

/// Every actionable control beneath `root`, in document order
pub fn actions_within(root: &Element) -> Vec<UiAction> {
    let mut controls = Vec::new();
    root.find_all(&|el| el.get_attribute(ACTION_ATTR).is_some(), &mut controls);
    controls.into_iter().filter_map(UiAction::from_element).collect()
}

/// What a click on the first element matching `target` asks for.
///
/// Like a delegated listener using `closest("[data-action]")`: the target's own
/// action wins, otherwise the nearest ancestor carrying one.
pub fn delegate_click(root: &Element, target: &dyn Fn(&Element) -> bool) -> Option<UiAction> {
    fn walk(el: &Element, target: &dyn Fn(&Element) -> bool) -> Option<Option<UiAction>> {
        if target(el) {
            return Some(UiAction::from_element(el));
        }
        for child in el.child_elements() {
            if let Some(found) = walk(child, target) {
                return Some(found.or_else(|| UiAction::from_element(el)));
            }
        }
        None
    }
    walk(root, target).flatten()
}
