//! Accessibility backfill for server-rendered markup.

use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, KeyboardEvent};

use crate::dom;

pub fn setup() {
    // buttons rendered without an accessible name get one from their text
    for button in dom::query_all("button:not([aria-label])") {
        if let Some(text) = button.text_content() {
            let text = text.trim();
            if !text.is_empty() {
                dom::set_attr(&button, "aria-label", text);
            }
        }
    }

    // Space/Enter activate custom toggles like a real button would.
    // Vote buttons get the same treatment when they are wired for voting.
    for el in dom::query_all("[data-toggle]") {
        let target = el.clone();
        dom::on(&el, "keydown", move |e| {
            if let Some(key) = e.dyn_ref::<KeyboardEvent>().map(|k| k.key()) {
                if key == " " || key == "Enter" {
                    e.prevent_default();
                    if let Some(html) = target.dyn_ref::<HtmlElement>() {
                        html.click();
                    }
                }
            }
        });
    }
}
