//! DOM listeners that turn browser events into [`PageEvent`]s.

use std::rc::Rc;

use carvalue_core::errors::CoreError;
use carvalue_core::models::event::PageEvent;
use carvalue_core::models::request::FormField;
use carvalue_core::view::{classes, ids};
use carvalue_core::PageController;
use tracing::{debug, error};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, IntersectionObserver, IntersectionObserverEntry};

use crate::config::{reveal_key, REVEAL_KEY_ATTRIBUTE};
use crate::dom::{control_state, js_error};

type Handler = Closure<dyn FnMut(Event)>;
type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// Owns every callback registered with the page. Dropping it would
/// invalidate the listeners, so it lives for the lifetime of the page.
pub struct Listeners {
    _handlers: Vec<Handler>,
    _observer: Option<(IntersectionObserver, ObserverCallback)>,
}

/// Run `event` through the controller on the microtask queue.
pub fn spawn_dispatch(controller: &Rc<PageController>, event: PageEvent) {
    let controller = Rc::clone(controller);
    wasm_bindgen_futures::spawn_local(async move {
        let name = event.name();
        if let Err(e) = controller.dispatch(event).await {
            error!(event = name, error = %e, "page event failed");
        }
    });
}

fn listen(
    target: &Element,
    kind: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<Handler, CoreError> {
    let callback = Closure::<dyn FnMut(Event)>::wrap(Box::new(handler));
    target
        .add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
        .map_err(|e| CoreError::Dom(format!("{kind} listener: {}", js_error(e))))?;
    Ok(callback)
}

/// Wire the form, its controls and the reveal observer to `controller`.
pub fn bind(document: &Document, controller: &Rc<PageController>) -> Result<Listeners, CoreError> {
    let mut handlers = Vec::new();

    let form = document
        .get_element_by_id(ids::FORM)
        .ok_or_else(|| CoreError::Dom(format!("#{} missing", ids::FORM)))?;
    let c = Rc::clone(controller);
    handlers.push(listen(&form, "submit", move |event| {
        event.prevent_default();
        spawn_dispatch(&c, PageEvent::Submit);
    })?);

    for field in FormField::ALL {
        let Some(control) = document.get_element_by_id(field.id()) else {
            debug!(field = %field, "form control not on this page");
            continue;
        };

        let (c, target) = (Rc::clone(controller), control.clone());
        handlers.push(listen(&control, "blur", move |_| {
            if let Some((value, constraint_satisfied)) = control_state(&target) {
                spawn_dispatch(
                    &c,
                    PageEvent::FieldBlur {
                        field,
                        value,
                        constraint_satisfied,
                    },
                );
            }
        })?);

        let c = Rc::clone(controller);
        handlers.push(listen(&control, "input", move |_| {
            spawn_dispatch(&c, PageEvent::FieldInput { field });
        })?);

        let (c, target) = (Rc::clone(controller), control.clone());
        handlers.push(listen(&control, "change", move |_| {
            if let Some((value, _)) = control_state(&target) {
                spawn_dispatch(&c, PageEvent::FieldChange { field, value });
            }
        })?);
    }

    Ok(Listeners {
        _handlers: handlers,
        _observer: observe_cards(document, controller)?,
    })
}

/// Tag every card matching the reveal selector with a key and report
/// each one that intersects the viewport.
fn observe_cards(
    document: &Document,
    controller: &Rc<PageController>,
) -> Result<Option<(IntersectionObserver, ObserverCallback)>, CoreError> {
    let cards = document
        .query_selector_all(classes::REVEAL_SELECTOR)
        .map_err(|e| CoreError::Dom(js_error(e)))?;
    if cards.length() == 0 {
        return Ok(None);
    }

    let c = Rc::clone(controller);
    let callback = ObserverCallback::wrap(Box::new(
        move |entries: js_sys::Array, _observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if !entry.is_intersecting() {
                    continue;
                }
                if let Some(key) = entry.target().get_attribute(REVEAL_KEY_ATTRIBUTE) {
                    spawn_dispatch(&c, PageEvent::ElementVisible { key });
                }
            }
        },
    ));
    let observer = IntersectionObserver::new(callback.as_ref().unchecked_ref())
        .map_err(|e| CoreError::Dom(format!("IntersectionObserver: {}", js_error(e))))?;

    for index in 0..cards.length() {
        let Some(card) = cards.item(index).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        card.set_attribute(REVEAL_KEY_ATTRIBUTE, &reveal_key(index))
            .map_err(|e| CoreError::Dom(js_error(e)))?;
        observer.observe(&card);
    }
    debug!(cards = cards.length(), "observing cards for reveal");
    Ok(Some((observer, callback)))
}
