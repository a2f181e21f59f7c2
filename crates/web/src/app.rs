use std::cell::RefCell;
use std::rc::Rc;

use carvalue_core::errors::CoreError;
use carvalue_core::models::event::PageEvent;
use carvalue_core::providers::http::HttpPredictionProvider;
use carvalue_core::PageController;
use tracing::{error, info};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use crate::config::page_settings;
use crate::dom::{js_error, DomView};
use crate::events::{self, spawn_dispatch, Listeners};
use crate::logging;
use crate::storage::LocalStorageStore;

/// Functions the markup calls from inline `onclick` handlers.
const GLOBALS: [(&str, PageEvent); 3] = [
    ("toggleTheme", PageEvent::ToggleTheme),
    ("scrollToPredict", PageEvent::ScrollToPredict),
    ("downloadReport", PageEvent::DownloadReport),
];

struct App {
    _controller: Rc<PageController>,
    _listeners: Listeners,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

/// WASM entry point, called when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    logging::init(logging::default_level());

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if document.ready_state() == "loading" {
        let on_ready = Closure::once_into_js(|| {
            if let Err(e) = mount() {
                error!(error = %e, "CarValue page failed to start");
            }
        });
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
    } else {
        mount().map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

/// Build the controller for this page and attach it to the DOM.
fn mount() -> Result<(), CoreError> {
    let window = web_sys::window().ok_or_else(|| CoreError::Dom("no window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| CoreError::Dom("no document".into()))?;
    let origin = window
        .location()
        .origin()
        .map_err(|e| CoreError::Dom(js_error(e)))?;

    let settings = page_settings(&origin);
    let provider = HttpPredictionProvider::new(&settings);
    let store = LocalStorageStore::open(&window)?;
    let controller = Rc::new(PageController::new(
        settings,
        Box::new(store),
        Box::new(provider),
        Box::new(DomView::new(document.clone())),
    )?);

    let listeners = events::bind(&document, &controller)?;
    controller.initialize()?;
    for (name, event) in GLOBALS {
        expose(&window, name, &controller, event)?;
    }

    APP.with(|slot| {
        *slot.borrow_mut() = Some(App {
            _controller: controller,
            _listeners: listeners,
        })
    });
    info!(origin = %origin, "CarValue page ready");
    Ok(())
}

/// Install `window[name]` as a function dispatching `event`.
fn expose(
    window: &Window,
    name: &str,
    controller: &Rc<PageController>,
    event: PageEvent,
) -> Result<(), CoreError> {
    let c = Rc::clone(controller);
    let callback = Closure::<dyn Fn()>::wrap(Box::new(move || spawn_dispatch(&c, event.clone())))
        .into_js_value();
    js_sys::Reflect::set(window, &JsValue::from_str(name), &callback)
        .map_err(|e| CoreError::Dom(format!("window.{name}: {}", js_error(e))))?;
    Ok(())
}
