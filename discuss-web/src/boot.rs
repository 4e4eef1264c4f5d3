//! Bootstrap sequencer: wires every controller to the rendered document
//! once it is ready, and keeps the presentation in sync with viewport
//! resizes through debounce gates.

use crate::{a11y, announce::Announcer, dom, forms, layout, replies, storage::LocalKv, threads, votes};

// Trailing debounce windows for resize bursts.
const SCALE_DEBOUNCE_MS: u64 = 100;
const LAYOUT_DEBOUNCE_MS: u64 = 250;

const ALERT_AUTOHIDE_MS: u64 = 5000;
const ALERT_FADE_MS: u64 = 500;

pub fn init_on_ready() {
    let document = dom::document();
    if document.ready_state() == "loading" {
        dom::on(&document, "DOMContentLoaded", move |_| init());
    } else {
        init();
    }
}

fn init() {
    let document = dom::document();
    tracing::info!("initializing discuss client features");

    let store = LocalKv;
    let announcer = Announcer::install(&document);

    replies::setup(announcer.clone());

    // cached votes are painted before any handler can fire a request
    votes::setup(store, announcer);

    layout::install_adaptive_style();
    let width = layout::viewport_width();
    layout::set_scale(width);
    layout::apply_sizing();
    layout::apply_layout(width);

    a11y::setup();

    // comment threading only exists on post detail pages
    if document
        .query_selector(".comment-thread")
        .ok()
        .flatten()
        .is_some()
    {
        threads::setup(store);
    }

    set_active_nav_item();
    schedule_alert_autohide();
    forms::setup();

    wire_resize();
}

fn wire_resize() {
    let window = dom::window();

    let scale_debounce = dom::Debouncer::new(SCALE_DEBOUNCE_MS);
    dom::on(&window, "resize", move |_| {
        scale_debounce.schedule(|| layout::set_scale(layout::viewport_width()));
    });

    let layout_debounce = dom::Debouncer::new(LAYOUT_DEBOUNCE_MS);
    dom::on(&dom::window(), "resize", move |_| {
        layout_debounce.schedule(|| {
            let width = layout::viewport_width();
            layout::set_scale(width);
            layout::apply_sizing();
            layout::apply_layout(width);
        });
    });
}

/// Mark the nav link matching the current location as active.
fn set_active_nav_item() {
    let path = match dom::window().location().pathname() {
        Ok(path) => path,
        Err(e) => {
            tracing::warn!(?e, "could not read current path");
            return;
        }
    };
    for link in dom::query_all(".navbar-nav .nav-link") {
        if let Some(href) = link.get_attribute("href") {
            if href == path || (href != "/" && path.starts_with(&href)) {
                dom::add_class(&link, "active");
            }
        }
    }
}

/// Dismissible alerts fade out after a few seconds.
fn schedule_alert_autohide() {
    dom::after(ALERT_AUTOHIDE_MS, || {
        for alert in dom::query_all(".alert-dismissible") {
            dom::set_style(&alert, "transition", "opacity 0.5s ease");
            dom::set_style(&alert, "opacity", "0");
            let alert = alert.clone();
            dom::after(ALERT_FADE_MS, move || {
                dom::set_style(&alert, "display", "none");
            });
        }
    });
}
