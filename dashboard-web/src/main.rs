//! Guardian Dashboard (browser)
//!
//! Mounts the dashboard controller on a host page that provides
//! `#dashboard-container` and, optionally, `#refresh-btn`.
//!
//! # Architecture
//!
//! Compiles to WebAssembly. Rendering goes through [`dom::WebDom`], network
//! calls through [`api::FetchApi`]. Clicks inside the container are handled by
//! one delegated listener that reads `data-action` / `data-alert-id` from the
//! clicked control, so re-rendering never rebinds handlers.

use std::rc::Rc;

use guardian_dashboard::{DashboardController, UiAction};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

mod api;
mod dom;

const CONTAINER_ID: &str = "dashboard-container";
const REFRESH_ID: &str = "refresh-btn";

type Controller = DashboardController<api::FetchApi, dom::WebDom>;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    if let Err(e) = on_page_ready() {
        web_sys::console::error_1(&e);
    }
}

/// Mount now, or once `DOMContentLoaded` fires if the page is still parsing
fn on_page_ready() -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("no document")?;

    if document.ready_state() != "loading" {
        return mount(document);
    }

    let ready_document = document.clone();
    let on_ready = Closure::once(move || {
        if let Err(e) = mount(ready_document) {
            web_sys::console::error_1(&e);
        }
    });
    document.add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())?;
    on_ready.forget();
    Ok(())
}

fn mount(document: web_sys::Document) -> Result<(), JsValue> {
    web_sys::console::log_1(&"DOM loaded, initializing dashboard...".into());

    let container = document
        .get_element_by_id(CONTAINER_ID)
        .ok_or("missing #dashboard-container")?;

    let controller: Rc<Controller> = Rc::new(DashboardController::new(
        api::FetchApi::new(api::get_api_base()),
        dom::WebDom::new(document.clone()),
        CONTAINER_ID,
    ));

    // Delegated handler on the stable container
    let on_click = {
        let controller = Rc::clone(&controller);
        Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            if let Some(action) = action_from_event(&event) {
                dispatch(&controller, action);
            }
        })
    };
    container.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();

    if let Some(refresh) = document.get_element_by_id(REFRESH_ID) {
        let controller = Rc::clone(&controller);
        let on_refresh = Closure::<dyn FnMut()>::new(move || {
            web_sys::console::log_1(&"Refresh button clicked".into());
            dispatch(&controller, UiAction::Refresh);
        });
        refresh.add_event_listener_with_callback("click", on_refresh.as_ref().unchecked_ref())?;
        on_refresh.forget();
    }

    dispatch(&controller, UiAction::Refresh);
    Ok(())
}

fn dispatch(controller: &Rc<Controller>, action: UiAction) {
    let controller = Rc::clone(controller);
    spawn_local(async move {
        let outcome = controller.handle_action(action).await;
        web_sys::console::log_1(&format!("Dashboard: {:?}", outcome).into());
    });
}

fn action_from_event(event: &web_sys::Event) -> Option<UiAction> {
    let target: web_sys::Element = event.target()?.dyn_into().ok()?;
    action_from_target(&target)
}

/// Nearest control carrying `data-action` from the click target upwards
fn action_from_target(target: &web_sys::Element) -> Option<UiAction> {
    let control = target.closest("[data-action]").ok()??;
    UiAction::from_attributes(
        control.get_attribute("data-action").as_deref(),
        control.get_attribute("data-alert-id").as_deref(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn container(markup: &str) -> web_sys::Element {
        let document = web_sys::window().unwrap().document().unwrap();
        let el = document.create_element("div").unwrap();
        el.set_inner_html(markup);
        document.body().unwrap().append_child(&el).unwrap();
        el
    }

    #[wasm_bindgen_test]
    fn test_click_inside_resolve_control() {
        let root = container(
            r#"<button class="resolve-btn" data-action="resolve" data-alert-id="7"><span class="label">Resolve</span></button>"#,
        );
        let label = root.query_selector(".label").unwrap().unwrap();
        assert_eq!(
            action_from_target(&label),
            Some(UiAction::Resolve {
                alert_id: "7".to_string()
            })
        );
    }

    #[wasm_bindgen_test]
    fn test_click_on_retry_and_plain_content() {
        let root = container(
            r#"<div class="error"><p class="detail">boom</p><button data-action="retry">Retry</button></div>"#,
        );
        let retry = root.query_selector("button").unwrap().unwrap();
        assert_eq!(action_from_target(&retry), Some(UiAction::Retry));

        let detail = root.query_selector(".detail").unwrap().unwrap();
        assert_eq!(action_from_target(&detail), None);
    }

    #[wasm_bindgen_test]
    fn test_click_event_dispatch_reads_target() {
        let root = container(r#"<button data-action="refresh">Refresh</button>"#);
        let button = root.query_selector("button").unwrap().unwrap();

        let seen = std::rc::Rc::new(std::cell::Cell::new(None));
        let on_click = {
            let seen = std::rc::Rc::clone(&seen);
            Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
                seen.set(action_from_event(&event));
            })
        };
        root.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
            .unwrap();

        let event = web_sys::Event::new_with_event_init_dict("click", web_sys::EventInit::new().bubbles(true))
            .unwrap();
        button.dispatch_event(&event).unwrap();

        assert_eq!(seen.take(), Some(UiAction::Refresh));
        drop(on_click);
    }
}
