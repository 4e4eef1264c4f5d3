//! Small helpers over `web-sys` for a page we do not own: all lookups
//! tolerate missing nodes, and listeners live for the lifetime of the
//! page (closures are leaked on purpose).

use std::{cell::Cell, rc::Rc, time::Duration};

use wasm_bindgen::{closure::Closure, JsCast};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, EventTarget, HtmlElement, Window};

pub fn window() -> Window {
    web_sys::window().expect("no window in this environment")
}

pub fn document() -> Document {
    window().document().expect("window has no document")
}

pub fn query_all(selector: &str) -> Vec<Element> {
    let mut out = Vec::new();
    match document().query_selector_all(selector) {
        Ok(list) => {
            for i in 0..list.length() {
                if let Some(node) = list.item(i) {
                    if let Ok(el) = node.dyn_into::<Element>() {
                        out.push(el);
                    }
                }
            }
        }
        Err(e) => tracing::error!(selector, ?e, "invalid selector"),
    }
    out
}

pub fn by_id(id: &str) -> Option<Element> {
    document().get_element_by_id(id)
}

/// Attach a page-lifetime event listener.
pub fn on(target: &EventTarget, event: &str, f: impl FnMut(web_sys::Event) + 'static) {
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(f);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        tracing::error!(event, ?e, "failed to attach listener");
    }
    closure.forget();
}

pub fn add_class(el: &Element, class: &str) {
    if let Err(e) = el.class_list().add_1(class) {
        tracing::warn!(class, ?e, "failed to add class");
    }
}

pub fn remove_class(el: &Element, class: &str) {
    if let Err(e) = el.class_list().remove_1(class) {
        tracing::warn!(class, ?e, "failed to remove class");
    }
}

pub fn has_class(el: &Element, class: &str) -> bool {
    el.class_list().contains(class)
}

pub fn set_attr(el: &Element, name: &str, value: &str) {
    if let Err(e) = el.set_attribute(name, value) {
        tracing::warn!(name, ?e, "failed to set attribute");
    }
}

pub fn set_style(el: &Element, property: &str, value: &str) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        if let Err(e) = html.style().set_property(property, value) {
            tracing::warn!(property, ?e, "failed to set style property");
        }
    }
}

pub fn focus(el: &Element) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        if let Err(e) = html.focus() {
            tracing::warn!(?e, "failed to move focus");
        }
    }
}

/// Run `f` after `ms` milliseconds.
pub fn after(ms: u64, f: impl FnOnce() + 'static) {
    spawn_local(async move {
        match wasm_timer::Delay::new(Duration::from_millis(ms)).await {
            Ok(()) => f(),
            Err(e) => tracing::warn!(%e, "timer failed"),
        }
    });
}

/// Trailing-edge debounce: bursts of `schedule` calls within the window
/// collapse into one run of the last closure; intermediate ones are
/// discarded.
#[derive(Clone)]
pub struct Debouncer {
    wait_ms: u64,
    generation: Rc<Cell<u64>>,
}

impl Debouncer {
    pub fn new(wait_ms: u64) -> Debouncer {
        Debouncer {
            wait_ms,
            generation: Rc::new(Cell::new(0)),
        }
    }

    pub fn schedule(&self, f: impl FnOnce() + 'static) {
        let current = self.generation.get() + 1;
        self.generation.set(current);
        let generation = self.generation.clone();
        after(self.wait_ms, move || {
            if generation.get() == current {
                f();
            }
        });
    }
}
