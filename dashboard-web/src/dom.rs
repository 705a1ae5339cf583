//! Browser document adapter
//!
//! Applies the controller's virtual nodes to the live page through `web-sys`.
//! Node trees arrive as escaped markup rendered by the library's templates.

use guardian_dashboard::{Dom, DomError, Node};
use wasm_bindgen::{JsCast, JsValue};

pub struct WebDom {
    document: web_sys::Document,
}

fn host_error(err: JsValue) -> DomError {
    DomError::Host(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

impl WebDom {
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }

    fn element(&self, id: &str) -> Result<web_sys::Element, DomError> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| DomError::MissingElement(id.to_string()))
    }
}

fn set_display(el: web_sys::Element, visible: bool) -> Result<(), JsValue> {
    let el: web_sys::HtmlElement = el.dyn_into()?;
    el.style()
        .set_property("display", if visible { "block" } else { "none" })
}

impl Dom for WebDom {
    fn replace_children(&mut self, id: &str, nodes: Vec<Node>) -> Result<(), DomError> {
        let markup: String = nodes.iter().map(Node::to_html).collect();
        self.element(id)?.set_inner_html(&markup);
        Ok(())
    }

    fn set_text(&mut self, id: &str, text: &str) -> Result<(), DomError> {
        self.element(id)?.set_text_content(Some(text));
        Ok(())
    }

    fn set_visible(&mut self, id: &str, visible: bool) -> Result<(), DomError> {
        set_display(self.element(id)?, visible).map_err(host_error)
    }

    fn set_class_visible(&mut self, class: &str, visible: bool) -> bool {
        match self.document.query_selector(&format!(".{}", class)) {
            Ok(Some(el)) => set_display(el, visible).is_ok(),
            _ => false,
        }
    }

    fn notify(&mut self, message: &str) {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.alert_with_message(message) {
                web_sys::console::error_1(&e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guardian_dashboard::Element;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn page_with(id: &str, class: Option<&str>) -> web_sys::Document {
        let document = web_sys::window().unwrap().document().unwrap();
        let el = document.create_element("div").unwrap();
        el.set_id(id);
        if let Some(class) = class {
            el.set_class_name(class);
        }
        document.body().unwrap().append_child(&el).unwrap();
        document
    }

    fn display_of(document: &web_sys::Document, id: &str) -> String {
        let el: web_sys::HtmlElement = document.get_element_by_id(id).unwrap().dyn_into().unwrap();
        el.style().get_property_value("display").unwrap()
    }

    #[wasm_bindgen_test]
    fn test_set_visible_toggles_display() {
        let document = page_with("visible-target", None);
        let mut dom = WebDom::new(document.clone());

        dom.set_visible("visible-target", false).unwrap();
        assert_eq!(display_of(&document, "visible-target"), "none");
        dom.set_visible("visible-target", true).unwrap();
        assert_eq!(display_of(&document, "visible-target"), "block");

        let err = dom.set_visible("absent-target", true).unwrap_err();
        assert_eq!(err, DomError::MissingElement("absent-target".to_string()));
    }

    #[wasm_bindgen_test]
    fn test_set_class_visible_first_match() {
        let document = page_with("class-target", Some("pending-spinner"));
        let mut dom = WebDom::new(document.clone());

        assert!(dom.set_class_visible("pending-spinner", false));
        assert_eq!(display_of(&document, "class-target"), "none");
        assert!(!dom.set_class_visible("no-such-class", false));
    }

    #[wasm_bindgen_test]
    fn test_replace_children_keeps_text_literal() {
        let document = page_with("replace-target", None);
        let mut dom = WebDom::new(document.clone());

        dom.replace_children(
            "replace-target",
            vec![Element::new("p").class("note").text("<b>bold</b>").into()],
        )
        .unwrap();

        let target = document.get_element_by_id("replace-target").unwrap();
        assert_eq!(target.text_content().unwrap(), "<b>bold</b>");
        assert!(target.query_selector("b").unwrap().is_none());
        assert!(target.query_selector("p.note").unwrap().is_some());
    }
}
