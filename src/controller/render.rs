//! Dashboard Renderer
//!
//! Builds the node trees for each phase of a load cycle and applies a
//! [`DashboardSnapshot`] to a [`Dom`]. Field fallbacks come from the
//! view-model accessors, so rendering never fails on malformed data; it can
//! only fail when the document is missing a target element.

use super::actions::{UiAction, ACTION_ATTR, ALERT_ID_ATTR};
use crate::document::{Dom, DomError, Element, Node};
use crate::models::{AlertView, ChildView, DashboardSnapshot};

// Element ids and classes owned by the dashboard
pub const SUMMARY_SECTION_ID: &str = "summary-section";
pub const CHILDREN_SECTION_ID: &str = "children-section";
pub const ALERTS_SECTION_ID: &str = "alerts-section";
pub const TOTAL_SCREEN_TIME_ID: &str = "total-screen-time";
pub const PRODUCTIVE_TIME_ID: &str = "productive-time";
pub const ACTIVE_ALERTS_ID: &str = "active-alerts";
pub const CHILDREN_CONTAINER_ID: &str = "children-container";
pub const ALERTS_CONTAINER_ID: &str = "alerts-container";
pub const LOADING_CLASS: &str = "loading";
pub const RESOLVE_CLASS: &str = "resolve-btn";

pub const LOADING_MESSAGE: &str = "Loading dashboard data...";
pub const NO_CHILDREN_MESSAGE: &str = "No children found.";
pub const NO_ALERTS_MESSAGE: &str = "No active alerts.";
pub const ERROR_TITLE: &str = "Error Loading Dashboard";

/// Loading placeholder followed by the three hidden sections
pub fn scaffold() -> Vec<Node> {
    vec![
        Element::new("div")
            .class(LOADING_CLASS)
            .text(LOADING_MESSAGE)
            .into(),
        section(SUMMARY_SECTION_ID, "Dashboard Summary")
            .child(
                Element::new("div")
                    .class("summary-cards")
                    .child(summary_card("Total Screen Time", TOTAL_SCREEN_TIME_ID, "0 min"))
                    .child(summary_card("Productive Time", PRODUCTIVE_TIME_ID, "0 min"))
                    .child(summary_card("Active Alerts", ACTIVE_ALERTS_ID, "0")),
            )
            .into(),
        section(CHILDREN_SECTION_ID, "Children")
            .child(card_container(CHILDREN_CONTAINER_ID))
            .into(),
        section(ALERTS_SECTION_ID, "Alerts")
            .child(card_container(ALERTS_CONTAINER_ID))
            .into(),
    ]
}

fn section(id: &str, title: &str) -> Element {
    Element::new("section")
        .id(id)
        .class("dashboard-section")
        .hidden()
        .child(Element::new("h2").text(title))
}

fn summary_card(title: &str, value_id: &str, initial: &str) -> Element {
    Element::new("div")
        .class("summary-card")
        .child(Element::new("h3").text(title))
        .child(Element::new("p").id(value_id).text(initial))
}

fn card_container(id: &str) -> Element {
    Element::new("div").id(id).class("card-container")
}

/// Replaces the whole dashboard after a failed load
pub fn error_view(message: &str) -> Vec<Node> {
    vec![Element::new("div")
        .class("error")
        .child(Element::new("h2").text(ERROR_TITLE))
        .child(Element::new("p").text(message))
        .child(
            Element::new("button")
                .attr(ACTION_ATTR, UiAction::Retry.name())
                .text("Retry"),
        )
        .into()]
}

pub fn child_card(child: &ChildView) -> Element {
    Element::new("div")
        .class("child-card")
        .child(Element::new("h3").text(child.name_text()))
        .child(
            Element::new("div")
                .class(format!("status {}", child.status_class()))
                .text(child.status_text()),
        )
        .child(Element::new("p").text(format!("Age: {}", child.age_text())))
        .child(Element::new("p").text(format!("Device: {}", child.device_text())))
        .child(Element::new("p").text(format!("Current App: {}", child.current_app_text())))
        .child(Element::new("p").text(format!("Current Session: {}", child.session_text())))
}

pub fn alert_card(alert: &AlertView) -> Element {
    Element::new("div")
        .class(format!("alert-card {}", alert.severity_class()))
        .child(
            Element::new("div")
                .class("alert-header")
                .child(Element::new("span").class("severity").text(alert.severity_badge()))
                .child(Element::new("span").class("timestamp").text(alert.timestamp_text())),
        )
        .child(Element::new("p").class("child-name").text(alert.child_name_text()))
        .child(Element::new("p").class("app-name").text(alert.app_name_text()))
        .child(Element::new("p").class("message").text(alert.message_text()))
        .child(
            Element::new("button")
                .class(RESOLVE_CLASS)
                .attr(ACTION_ATTR, "resolve")
                .attr(ALERT_ID_ATTR, alert.alert_id())
                .text("Resolve"),
        )
}

fn empty_message(text: &str) -> Vec<Node> {
    vec![Element::new("p").text(text).into()]
}

/// Fill the scaffolded sections from a snapshot
pub fn apply<D: Dom + ?Sized>(doc: &mut D, snapshot: &DashboardSnapshot) -> Result<(), DomError> {
    for id in [SUMMARY_SECTION_ID, CHILDREN_SECTION_ID, ALERTS_SECTION_ID] {
        doc.set_visible(id, true)?;
    }

    let summary = &snapshot.summary;
    doc.set_text(TOTAL_SCREEN_TIME_ID, &summary.total_screen_time_text())?;
    doc.set_text(PRODUCTIVE_TIME_ID, &summary.productive_time_text())?;
    doc.set_text(ACTIVE_ALERTS_ID, &summary.active_alerts_text())?;

    let children: Vec<Node> = if snapshot.children.is_empty() {
        empty_message(NO_CHILDREN_MESSAGE)
    } else {
        snapshot.children.iter().map(|c| Node::from(child_card(c))).collect()
    };
    doc.replace_children(CHILDREN_CONTAINER_ID, children)?;

    let alerts: Vec<Node> = if snapshot.alerts.is_empty() {
        empty_message(NO_ALERTS_MESSAGE)
    } else {
        snapshot.alerts.iter().map(|a| Node::from(alert_card(a))).collect()
    };
    doc.replace_children(ALERTS_CONTAINER_ID, alerts)?;

    doc.set_class_visible(LOADING_CLASS, false);
    Ok(())
}
