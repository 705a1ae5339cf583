//! In-memory document
//!
//! A minimal host page: a `<body>` holding an optional refresh control and the
//! dashboard container. Notifications are recorded instead of blocking.

use askama::Template;

use super::{Dom, DomError, Element, Node};

/// In-memory host document
#[derive(Debug, Clone)]
pub struct Document {
    body: Element,
    notifications: Vec<String>,
}

impl Document {
    /// Host page with an empty dashboard container
    pub fn new(container_id: &str) -> Self {
        let body = Element::new("body").child(Element::new("div").id(container_id));
        Self {
            body,
            notifications: Vec::new(),
        }
    }

    /// Host page with a refresh control placed before the container
    pub fn with_refresh_control(container_id: &str, refresh_id: &str) -> Self {
        let body = Element::new("body")
            .child(
                Element::new("button")
                    .id(refresh_id)
                    .attr("data-action", "refresh")
                    .text("Refresh"),
            )
            .child(Element::new("div").id(container_id));
        Self {
            body,
            notifications: Vec::new(),
        }
    }

    pub fn body(&self) -> &Element {
        &self.body
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<&Element> {
        self.body.find(&|el| el.element_id() == Some(id))
    }

    fn get_element_by_id_mut(&mut self, id: &str) -> Result<&mut Element, DomError> {
        self.body
            .find_mut(&|el| el.element_id() == Some(id))
            .ok_or_else(|| DomError::MissingElement(id.to_string()))
    }

    /// First element carrying `class`, in document order
    pub fn query_class(&self, class: &str) -> Option<&Element> {
        self.body.find(&|el| el.has_class(class))
    }

    /// Every element carrying `class`, in document order
    pub fn query_class_all(&self, class: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.body.find_all(&|el| el.has_class(class), &mut found);
        found
    }

    /// Every element carrying `class` beneath the element with `id`
    pub fn query_class_within(&self, id: &str, class: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        if let Some(root) = self.get_element_by_id(id) {
            for child in root.child_elements() {
                child.find_all(&|el| el.has_class(class), &mut found);
            }
        }
        found
    }

    /// Text of the element with `id`, if present
    pub fn text_of(&self, id: &str) -> Option<String> {
        self.get_element_by_id(id).map(Element::text_content)
    }

    /// Whether the element and all its ancestors are shown
    pub fn is_visible(&self, id: &str) -> bool {
        fn walk(el: &Element, id: &str) -> Option<bool> {
            if el.element_id() == Some(id) {
                return Some(!el.hidden);
            }
            el.child_elements()
                .find_map(|child| walk(child, id))
                .map(|visible| visible && !el.hidden)
        }
        walk(&self.body, id).unwrap_or(false)
    }

    /// Notifications raised so far, oldest first
    pub fn notifications(&self) -> &[String] {
        &self.notifications
    }

    pub fn to_html(&self) -> String {
        self.body.to_html()
    }

    /// Complete standalone page around the body
    pub fn to_page(&self, title: &str) -> askama::Result<String> {
        PageTemplate {
            title,
            body: &self.body,
        }
        .render()
    }
}

#[derive(Template)]
#[template(path = "page.html")]
struct PageTemplate<'a> {
    title: &'a str,
    body: &'a Element,
}

impl Dom for Document {
    fn replace_children(&mut self, id: &str, nodes: Vec<Node>) -> Result<(), DomError> {
        let el = self.get_element_by_id_mut(id)?;
        el.children = nodes;
        Ok(())
    }

    fn set_text(&mut self, id: &str, text: &str) -> Result<(), DomError> {
        let el = self.get_element_by_id_mut(id)?;
        el.children = vec![Node::Text(text.to_string())];
        Ok(())
    }

    fn set_visible(&mut self, id: &str, visible: bool) -> Result<(), DomError> {
        let el = self.get_element_by_id_mut(id)?;
        el.hidden = !visible;
        Ok(())
    }

    fn set_class_visible(&mut self, class: &str, visible: bool) -> bool {
        match self.body.find_mut(&|el| el.has_class(class)) {
            Some(el) => {
                el.hidden = !visible;
                true
            }
            None => false,
        }
    }

    fn notify(&mut self, message: &str) {
        self.notifications.push(message.to_string());
    }
}
