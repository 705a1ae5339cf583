//! Dashboard View-Models
//!
//! Wire shapes returned by the monitoring API, decoded leniently.
//!
//! Every field is optional on the wire. Instead of scattering fallbacks through
//! the renderer, each field has a named default in [`defaults`] and an accessor
//! that applies it. A field counts as absent when it is missing, `null`, a
//! non-scalar value, or falsy (`false`, `0`, `""`).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Fallback values rendered when a field is absent or falsy
pub mod defaults {
    /// Total and productive screen time, before the " min" suffix
    pub const MINUTES: &str = "0";
    pub const ACTIVE_ALERTS: &str = "0";

    pub const CHILD_NAME: &str = "Unknown";
    pub const STATUS: &str = "Unknown";
    pub const STATUS_CLASS: &str = "unknown";
    pub const AGE: &str = "N/A";
    pub const DEVICE_TYPE: &str = "N/A";
    pub const CURRENT_APP: &str = "None";
    pub const SESSION: &str = "None";
    pub const SESSION_DURATION: &str = "0";

    pub const ALERT_ID: &str = "0";
    pub const SEVERITY: &str = "medium";
    pub const TIMESTAMP: &str = "Unknown time";
    pub const ALERT_CHILD_NAME: &str = "Unknown child";
    pub const APP_NAME: &str = "Unknown app";
    pub const MESSAGE: &str = "No details available";
}

// ============================================
// Scalars
// ============================================

/// A loosely-typed scalar as the API sends it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl Scalar {
    /// Convert a JSON value, dropping nulls, arrays and objects
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(Scalar::Bool(b)),
            Value::Number(n) => Some(Scalar::Number(n)),
            Value::String(s) => Some(Scalar::Text(s)),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Whether the value would survive a `value || fallback` check
    pub fn is_truthy(&self) -> bool {
        match self {
            Scalar::Bool(b) => *b,
            Scalar::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
            Scalar::Text(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Number(n) => f.write_str(&number_text(n)),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

/// Number text as a browser prints it: `120.0` and `1e2` read `120` and `100`,
/// exponents appear only below `1e-6` or from `1e21` upwards
fn number_text(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    let value = match n.as_f64() {
        Some(value) if value.is_finite() => value,
        _ => return n.to_string(),
    };
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return value.to_string();
    }
    let text = format!("{:e}", value);
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => text,
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Number(n.into())
    }
}

fn lenient_scalar<'de, D>(deserializer: D) -> Result<Option<Scalar>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(Scalar::from_value))
}

fn lenient_session<'de, D>(deserializer: D) -> Result<Option<CurrentSession>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .filter(Value::is_object)
        .and_then(|v| serde_json::from_value(v).ok()))
}

/// The field's display text, or `fallback` when absent or falsy
fn text_or(field: &Option<Scalar>, fallback: &str) -> String {
    match field {
        Some(value) if value.is_truthy() => value.to_string(),
        _ => fallback.to_string(),
    }
}

// ============================================
// Summary
// ============================================

/// Response of `GET /api/dashboard/summary`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryView {
    #[serde(default, deserialize_with = "lenient_scalar")]
    pub total_screen_time: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient_scalar")]
    pub productive_time: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient_scalar")]
    pub active_alerts: Option<Scalar>,
}

impl SummaryView {
    /// e.g. `"120 min"`
    pub fn total_screen_time_text(&self) -> String {
        format!("{} min", text_or(&self.total_screen_time, defaults::MINUTES))
    }

    /// e.g. `"45 min"`
    pub fn productive_time_text(&self) -> String {
        format!("{} min", text_or(&self.productive_time, defaults::MINUTES))
    }

    /// The server's own count; never derived from the alert list
    pub fn active_alerts_text(&self) -> String {
        text_or(&self.active_alerts, defaults::ACTIVE_ALERTS)
    }
}

// ============================================
// Children
// ============================================

/// What a child is doing right now
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentSession {
    #[serde(default, deserialize_with = "lenient_scalar")]
    pub app: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient_scalar")]
    pub duration: Option<Scalar>,
}

/// One entry of `GET /api/children`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChildView {
    #[serde(default, deserialize_with = "lenient_scalar")]
    pub name: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient_scalar")]
    pub age: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient_scalar")]
    pub device_type: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient_scalar")]
    pub status: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient_scalar")]
    pub current_app: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient_session")]
    pub current_session: Option<CurrentSession>,
}

impl ChildView {
    pub fn name_text(&self) -> String {
        text_or(&self.name, defaults::CHILD_NAME)
    }

    /// Status as displayed; free-form, passed through unchanged
    pub fn status_text(&self) -> String {
        text_or(&self.status, defaults::STATUS)
    }

    /// Lower-cased status used as a CSS class
    pub fn status_class(&self) -> String {
        text_or(&self.status, defaults::STATUS_CLASS).to_lowercase()
    }

    pub fn age_text(&self) -> String {
        text_or(&self.age, defaults::AGE)
    }

    pub fn device_text(&self) -> String {
        text_or(&self.device_type, defaults::DEVICE_TYPE)
    }

    pub fn current_app_text(&self) -> String {
        text_or(&self.current_app, defaults::CURRENT_APP)
    }

    /// `"<app> (<duration> min)"` when a session with an app is present
    pub fn session_text(&self) -> String {
        match &self.current_session {
            Some(session) if session.app.as_ref().is_some_and(Scalar::is_truthy) => format!(
                "{} ({} min)",
                text_or(&session.app, defaults::SESSION),
                text_or(&session.duration, defaults::SESSION_DURATION)
            ),
            _ => defaults::SESSION.to_string(),
        }
    }
}

// ============================================
// Alerts
// ============================================

/// One entry of `GET /api/alerts`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertView {
    #[serde(default, deserialize_with = "lenient_scalar")]
    pub id: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient_scalar")]
    pub severity: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient_scalar")]
    pub timestamp: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient_scalar")]
    pub child_name: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient_scalar")]
    pub app_name: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient_scalar")]
    pub message: Option<Scalar>,
}

impl AlertView {
    /// Identifier carried by the resolve control
    pub fn alert_id(&self) -> String {
        text_or(&self.id, defaults::ALERT_ID)
    }

    /// Lower-cased severity used as a CSS class
    pub fn severity_class(&self) -> String {
        text_or(&self.severity, defaults::SEVERITY).to_lowercase()
    }

    /// Upper-cased severity shown on the badge
    pub fn severity_badge(&self) -> String {
        text_or(&self.severity, defaults::SEVERITY).to_uppercase()
    }

    pub fn timestamp_text(&self) -> String {
        text_or(&self.timestamp, defaults::TIMESTAMP)
    }

    pub fn child_name_text(&self) -> String {
        text_or(&self.child_name, defaults::ALERT_CHILD_NAME)
    }

    pub fn app_name_text(&self) -> String {
        text_or(&self.app_name, defaults::APP_NAME)
    }

    pub fn message_text(&self) -> String {
        text_or(&self.message, defaults::MESSAGE)
    }
}

// ============================================
// Lists & Snapshot
// ============================================

/// A list endpoint body: either a bare array or a `{"children"|"alerts": [...]}` envelope
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListPayload<T> {
    Bare(Vec<T>),
    Wrapped {
        #[serde(alias = "children", alias = "alerts")]
        items: Vec<T>,
    },
}

impl<T> ListPayload<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            ListPayload::Bare(items) | ListPayload::Wrapped { items } => items,
        }
    }
}

/// Everything one load cycle fetched, consumed by a single render pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSnapshot {
    pub summary: SummaryView,
    pub children: Vec<ChildView>,
    pub alerts: Vec<AlertView>,
}

impl DashboardSnapshot {
    pub fn new(summary: SummaryView, children: Vec<ChildView>, alerts: Vec<AlertView>) -> Self {
        Self {
            summary,
            children,
            alerts,
        }
    }
}
