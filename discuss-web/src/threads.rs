//! Collapsible comment threads, with the collapsed set remembered across
//! reloads.

use std::{cell::RefCell, rc::Rc};

use discuss_client::{toggles_collapse, ClickRegion, CollapsedThreads, ThreadState};
use wasm_bindgen::JsCast;
use web_sys::{Element, KeyboardEvent};

use crate::{dom, storage::LocalKv};

pub fn setup(store: LocalKv) {
    let collapsed = Rc::new(RefCell::new(CollapsedThreads::load(store)));

    restore_collapsed(&collapsed.borrow());
    wire_collapse_lines(&collapsed);
    wire_root_headers(&collapsed);
}

/// Re-collapse every remembered thread, without animating: the page is
/// still painting and the subtrees should simply start out hidden.
fn restore_collapsed(collapsed: &CollapsedThreads<LocalKv>) {
    let effect = ThreadState::restore_collapsed();
    for id in collapsed.iter() {
        if let Some(thread) = dom::by_id(&format!("thread-{}", id)) {
            if effect.collapsed {
                dom::add_class(&thread, "collapsed");
            }
        }
    }
    if !collapsed.is_empty() {
        tracing::debug!(count = collapsed.len(), "restored collapsed threads");
    }
}

fn wire_collapse_lines(collapsed: &Rc<RefCell<CollapsedThreads<LocalKv>>>) {
    for line in dom::query_all(".thread-collapse-line") {
        {
            let collapsed = collapsed.clone();
            let line = line.clone();
            dom::on(&line.clone(), "click", move |e| {
                e.prevent_default();
                toggle_from_affordance(&collapsed, &line);
            });
        }
        let collapsed = collapsed.clone();
        let key_line = line.clone();
        dom::on(&line, "keypress", move |e| {
            if let Some(key) = e.dyn_ref::<KeyboardEvent>().map(|k| k.key()) {
                if key == "Enter" || key == " " {
                    e.prevent_default();
                    toggle_from_affordance(&collapsed, &key_line);
                }
            }
        });
    }
}

fn toggle_from_affordance(collapsed: &Rc<RefCell<CollapsedThreads<LocalKv>>>, line: &Element) {
    match line.get_attribute("data-thread-id") {
        Some(id) => toggle_thread(collapsed, &id),
        None => tracing::warn!("collapse affordance without a thread id"),
    }
}

/// Root comments also toggle on clicks in their metadata header, as long
/// as the click does not land inside the body, the action bar or an open
/// reply form.
fn wire_root_headers(collapsed: &Rc<RefCell<CollapsedThreads<LocalKv>>>) {
    for indicator in dom::query_all(".comment-thread > .comment-item .collapse-indicator") {
        let item = match indicator.parent_element() {
            Some(item) => item,
            None => continue,
        };
        let collapsed = collapsed.clone();
        let handler_item = item.clone();
        dom::on(&item, "click", move |e| {
            let target = match e.target().and_then(|t| t.dyn_into::<Element>().ok()) {
                Some(target) => target,
                None => return,
            };
            if !toggles_collapse(region_of(&target)) {
                return;
            }
            let thread = match handler_item.closest(".comment-thread").ok().flatten() {
                Some(thread) => thread,
                None => return,
            };
            if let Some(id) = thread.get_attribute("data-comment-id") {
                toggle_thread(&collapsed, &id);
            }
        });
    }
}

fn region_of(target: &Element) -> ClickRegion {
    let within = |selector: &str| target.closest(selector).ok().flatten().is_some();
    if within(".comment-body") {
        ClickRegion::Body
    } else if within(".comment-actions") {
        ClickRegion::Actions
    } else if within(".reply-form") {
        ClickRegion::ReplyForm
    } else if within(".thread-collapse-line") {
        ClickRegion::Affordance
    } else {
        ClickRegion::Header
    }
}

/// Toggle a thread by id. A thread no longer in the document is a silent
/// no-op.
fn toggle_thread(collapsed: &Rc<RefCell<CollapsedThreads<LocalKv>>>, thread_id: &str) {
    let thread = match dom::by_id(&format!("thread-{}", thread_id)) {
        Some(thread) => thread,
        None => return,
    };

    let state = ThreadState::from_collapsed(dom::has_class(&thread, "collapsed"));
    let (next, effect) = state.toggled();

    match effect.collapsed {
        true => dom::add_class(&thread, "collapsed"),
        false => dom::remove_class(&thread, "collapsed"),
    }
    if effect.animate {
        if let Ok(Some(nested)) = thread.query_selector(".nested-comments") {
            match effect.collapsed {
                true => {
                    dom::remove_class(&nested, "animate-in");
                    dom::add_class(&nested, "animate-out");
                }
                false => {
                    dom::add_class(&nested, "animate-in");
                    dom::remove_class(&nested, "animate-out");
                }
            }
        }
    }

    match next {
        ThreadState::Collapsed => collapsed.borrow_mut().collapse(thread_id),
        ThreadState::Expanded => collapsed.borrow_mut().expand(thread_id),
    };
    tracing::debug!(thread_id, collapsed = effect.collapsed, "toggled thread");
}
