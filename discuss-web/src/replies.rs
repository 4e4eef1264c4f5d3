//! Reply-form toggling. Only one reply panel may be open at a time; the
//! ordering logic lives in `discuss_client::ReplyPanels`, this module
//! just applies its effect list to the document.

use std::{cell::RefCell, rc::Rc};

use discuss_client::{PanelChange, ReplyPanels};
use web_sys::Element;

use crate::{announce::Announcer, dom};

pub fn setup(announcer: Rc<Announcer>) {
    let panels = Rc::new(RefCell::new(ReplyPanels::new()));

    let toggles = dom::query_all(".reply-toggle");
    tracing::debug!(count = toggles.len(), "wiring reply toggles");
    for toggle in toggles {
        let panels = panels.clone();
        let announcer = announcer.clone();
        let handler_toggle = toggle.clone();
        dom::on(&toggle, "click", move |e| {
            e.prevent_default();
            e.stop_propagation();
            let id = match handler_toggle.get_attribute("data-comment-id") {
                Some(id) => id,
                None => {
                    tracing::warn!("reply toggle without a comment id");
                    return;
                }
            };
            if form_for(&id).is_none() {
                tracing::error!(comment_id = %id, "reply form not found");
                return;
            }
            let changes = panels.borrow_mut().toggle(&id);
            let opened = changes
                .iter()
                .any(|c| matches!(c, PanelChange::Open(_)));
            apply_changes(&changes);
            announcer.announce(if opened {
                "Reply form opened"
            } else {
                "Reply form closed"
            });
        });
    }

    for cancel in dom::query_all(".cancel-reply") {
        let panels = panels.clone();
        let announcer = announcer.clone();
        let handler_cancel = cancel.clone();
        dom::on(&cancel, "click", move |e| {
            e.prevent_default();
            e.stop_propagation();
            let id = match handler_cancel.get_attribute("data-comment-id") {
                Some(id) => id,
                None => return,
            };
            if form_for(&id).is_none() {
                tracing::error!(comment_id = %id, "reply form not found");
                return;
            }
            let changes = panels.borrow_mut().close(&id);
            apply_changes(&changes);
            announcer.announce("Reply canceled");
        });
    }
}

fn form_for(comment_id: &str) -> Option<Element> {
    dom::by_id(&format!("reply-form-{}", comment_id))
}

fn toggle_for(comment_id: &str) -> Option<Element> {
    dom::document()
        .query_selector(&format!(
            ".reply-toggle[data-comment-id=\"{}\"]",
            comment_id
        ))
        .ok()
        .flatten()
}

fn apply_changes(changes: &[PanelChange]) {
    for change in changes {
        match change {
            PanelChange::Close(id) => {
                if let Some(form) = form_for(id) {
                    dom::set_style(&form, "display", "none");
                    dom::set_attr(&form, "aria-hidden", "true");
                }
                if let Some(toggle) = toggle_for(id) {
                    dom::set_attr(&toggle, "aria-expanded", "false");
                }
            }
            PanelChange::Open(id) => {
                if let Some(form) = form_for(id) {
                    dom::set_style(&form, "display", "block");
                    dom::set_attr(&form, "aria-hidden", "false");
                }
                if let Some(toggle) = toggle_for(id) {
                    dom::set_attr(&toggle, "aria-expanded", "true");
                }
            }
            PanelChange::FocusInput(id) => {
                // focusing the textarea right after unhiding can fail in
                // some renderers, let layout settle first
                let id = id.clone();
                dom::after(50, move || {
                    if let Some(form) = form_for(&id) {
                        if let Ok(Some(textarea)) = form.query_selector("textarea") {
                            dom::focus(&textarea);
                        }
                    }
                });
            }
            PanelChange::FocusToggle(id) => {
                if let Some(toggle) = toggle_for(id) {
                    dom::focus(&toggle);
                }
            }
        }
    }
}
