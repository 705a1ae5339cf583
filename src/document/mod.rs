//! Document Seam
//!
//! The controller never touches a concrete DOM. It builds [`Node`] trees and
//! applies them through the [`Dom`] trait, which is implemented by:
//! - [`Document`]: an in-memory tree used by the CLI and tests
//! - the `web-sys` adapter in `dashboard-web/` for real browsers

mod memory;

pub use memory::Document;

use askama::Template;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Operations the controller needs from a host document
pub trait Dom {
    /// Replace every child of the element with `id`
    fn replace_children(&mut self, id: &str, nodes: Vec<Node>) -> Result<(), DomError>;

    /// Replace the element's content with a single text node
    fn set_text(&mut self, id: &str, text: &str) -> Result<(), DomError>;

    /// Show or hide the element with `id`
    fn set_visible(&mut self, id: &str, visible: bool) -> Result<(), DomError>;

    /// Show or hide the first element carrying `class`, if any.
    /// Returns whether an element was found.
    fn set_class_visible(&mut self, class: &str, visible: bool) -> bool;

    /// Blocking user-visible notification (a browser `alert()`)
    fn notify(&mut self, message: &str);
}

/// Errors raised while applying a render to a document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("Element not found: #{0}")]
    MissingElement(String),

    #[error("Document error: {0}")]
    Host(String),
}

/// A node of a virtual tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    /// Concatenated text of this node and its descendants
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(text) => text.clone(),
            Node::Element(el) => el.text_content(),
        }
    }

    /// Serialize as escaped HTML
    pub fn to_html(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Text(text) => TextMarkup { text }.render_into(f).map_err(|_| fmt::Error),
            Node::Element(el) => fmt::Display::fmt(el, f),
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

/// An element with attributes and children.
///
/// `id` and `class` are stored as ordinary attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
    pub hidden: bool,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            hidden: false,
            children: Vec::new(),
        }
    }

    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn element_id(&self) -> Option<&str> {
        self.get_attribute("id")
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attribute("class")
            .map(|classes| classes.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn text_content(&self) -> String {
        self.children.iter().map(Node::text_content).collect()
    }

    /// Child elements, skipping text nodes
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Depth-first search including `self`
    pub fn find(&self, pred: &dyn Fn(&Element) -> bool) -> Option<&Element> {
        if pred(self) {
            return Some(self);
        }
        self.child_elements().find_map(|child| child.find(pred))
    }

    pub fn find_mut(&mut self, pred: &dyn Fn(&Element) -> bool) -> Option<&mut Element> {
        if pred(&*self) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|node| match node {
            Node::Element(child) => child.find_mut(pred),
            Node::Text(_) => None,
        })
    }

    /// All matching descendants (and `self`) in document order
    pub fn find_all<'a>(&'a self, pred: &dyn Fn(&Element) -> bool, out: &mut Vec<&'a Element>) {
        if pred(self) {
            out.push(self);
        }
        for child in self.child_elements() {
            child.find_all(pred, out);
        }
    }

    /// Serialize as HTML. Hidden elements get `style="display: none;"`.
    pub fn to_html(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let markup = ElementMarkup {
            tag: &self.tag,
            attributes: self
                .attributes
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str()))
                .collect(),
            hidden: self.hidden,
            children: &self.children,
        };
        markup.render_into(f).map_err(|_| fmt::Error)
    }
}

// ============================================
// Markup Templates
// ============================================

// Text and attribute values go through askama's HTML escaper; rendered
// children are already escaped and are emitted as-is.

#[derive(Template)]
#[template(
    source = r#"<{{ tag }}{% for (name, value) in attributes %} {{ name }}="{{ value }}"{% endfor %}{% if hidden %} style="display: none;"{% endif %}>{% for child in children %}{{ child|safe }}{% endfor %}</{{ tag }}>"#,
    ext = "html"
)]
struct ElementMarkup<'a> {
    tag: &'a str,
    attributes: Vec<(&'a str, &'a str)>,
    hidden: bool,
    children: &'a [Node],
}

#[derive(Template)]
#[template(source = "{{ text }}", ext = "html")]
struct TextMarkup<'a> {
    text: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_html() {
        let el = Element::new("div")
            .id("card")
            .class("alert-card high")
            .child(Element::new("span").class("severity").text("HIGH"))
            .text("tail");

        assert!(el.has_class("alert-card"));
        assert!(el.has_class("high"));
        assert!(!el.has_class("alert"));
        assert_eq!(el.text_content(), "HIGHtail");
        assert_eq!(
            el.to_html(),
            r#"<div class="alert-card high" id="card"><span class="severity">HIGH</span>tail</div>"#
        );
    }

    #[test]
    fn test_hidden_serialization() {
        let el = Element::new("section").id("summary-section").hidden();
        assert_eq!(
            el.to_html(),
            r#"<section id="summary-section" style="display: none;"></section>"#
        );
    }

    #[test]
    fn test_text_is_escaped() {
        let el = Element::new("p")
            .attr("data-alert-id", "\"x\"")
            .text("<script>alert(1)</script> & more");
        let html = el.to_html();
        assert!(html.starts_with("<p data-alert-id=\"&quot;x&quot;\">"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt; &amp; more"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_text_node_html() {
        let node = Node::Text("a < b".to_string());
        assert_eq!(node.to_html(), "a &lt; b");
        assert_eq!(node.text_content(), "a < b");
    }

    #[test]
    fn test_find_all_in_order() {
        let el = Element::new("div")
            .child(Element::new("button").class("resolve-btn").attr("data-alert-id", "1"))
            .child(
                Element::new("div")
                    .child(Element::new("button").class("resolve-btn").attr("data-alert-id", "2")),
            );

        let mut found = Vec::new();
        el.find_all(&|e| e.has_class("resolve-btn"), &mut found);
        let ids: Vec<_> = found
            .iter()
            .filter_map(|e| e.get_attribute("data-alert-id"))
            .collect();
        assert_eq!(ids, vec!["1", "2"]);
    }
}
