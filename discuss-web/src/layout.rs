//! Viewport-responsive presentation: a single `--adaptive-scale` CSS
//! variable drives every scaled dimension through fixed multipliers.

use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::dom;

/// Shared style state. Everything scaled derives from `--adaptive-scale`,
/// which is the only value recomputed on resize.
const ADAPTIVE_STYLE: &str = "
:root {
    --adaptive-scale: 1;

    /* spacing */
    --spacing-xs: calc(0.25rem * var(--adaptive-scale));
    --spacing-sm: calc(0.5rem * var(--adaptive-scale));
    --spacing-md: calc(1rem * var(--adaptive-scale));
    --spacing-lg: calc(1.5rem * var(--adaptive-scale));
    --spacing-xl: calc(2rem * var(--adaptive-scale));

    /* font sizes */
    --font-size-xs: calc(0.75rem * var(--adaptive-scale));
    --font-size-sm: calc(0.875rem * var(--adaptive-scale));
    --font-size-md: calc(1rem * var(--adaptive-scale));
    --font-size-lg: calc(1.25rem * var(--adaptive-scale));
    --font-size-xl: calc(1.5rem * var(--adaptive-scale));
    --font-size-xxl: calc(2rem * var(--adaptive-scale));

    /* border radii */
    --border-radius-sm: calc(0.25rem * var(--adaptive-scale));
    --border-radius-md: calc(0.5rem * var(--adaptive-scale));
    --border-radius-lg: calc(0.75rem * var(--adaptive-scale));

    /* icon sizes */
    --icon-size-sm: calc(1rem * var(--adaptive-scale));
    --icon-size-md: calc(1.5rem * var(--adaptive-scale));
    --icon-size-lg: calc(2rem * var(--adaptive-scale));
}
";

pub fn install_adaptive_style() {
    let document = dom::document();
    let style = match document.create_element("style") {
        Ok(style) => style,
        Err(e) => {
            tracing::error!(?e, "failed to create adaptive style element");
            return;
        }
    };
    style.set_text_content(Some(ADAPTIVE_STYLE));
    match document.head() {
        Some(head) => {
            if let Err(e) = head.append_child(&style) {
                tracing::error!(?e, "failed to install adaptive style");
            }
        }
        None => tracing::error!("document has no head"),
    }
}

pub fn viewport_width() -> f64 {
    dom::window()
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(1200.0)
}

pub fn set_scale(width: f64) {
    let scale = discuss_client::scale_for_width(width);
    if let Some(root) = dom::document().document_element() {
        if let Some(html) = root.dyn_ref::<HtmlElement>() {
            if let Err(e) = html.style().set_property("--adaptive-scale", &scale.to_string()) {
                tracing::warn!(?e, "failed to publish adaptive scale");
            }
        }
    }
    tracing::debug!(width, scale, "updated adaptive scale");
}

/// Per-selector font sizes derived from the scale variables.
const FONT_RULES: &[(&str, &str)] = &[
    (".adaptive-text-xs", "--font-size-xs"),
    (".adaptive-text-sm", "--font-size-sm"),
    (".adaptive-text-md", "--font-size-md"),
    (".adaptive-text-lg", "--font-size-lg"),
    (".adaptive-text-xl", "--font-size-xl"),
    (".vote-btn", "--font-size-lg"),
    (".comment-meta", "--font-size-xs"),
    (".post-title", "--font-size-xl"),
    (".community-name", "--font-size-md"),
];

pub fn apply_sizing() {
    for (selector, var) in FONT_RULES {
        for el in dom::query_all(selector) {
            dom::set_style(&el, "font-size", &format!("var({})", var));
        }
    }

    for el in dom::query_all(".adaptive-p") {
        dom::set_style(&el, "padding", "var(--spacing-md)");
    }
    for el in dom::query_all(".adaptive-m") {
        dom::set_style(&el, "margin", "var(--spacing-md)");
    }
    for el in dom::query_all(".adaptive-gap") {
        dom::set_style(&el, "gap", "var(--spacing-md)");
    }

    for el in dom::query_all(".post-card") {
        dom::set_style(&el, "padding", "var(--spacing-md)");
        dom::set_style(&el, "margin", "var(--spacing-md) 0");
        dom::set_style(&el, "border-radius", "var(--border-radius-md)");
    }
    for el in dom::query_all(".comment-item") {
        dom::set_style(&el, "margin-bottom", "var(--spacing-sm)");
        dom::set_style(&el, "padding-left", "var(--spacing-md)");
    }
    for el in dom::query_all(".thread-collapse-line") {
        dom::set_style(&el, "width", "var(--spacing-xs)");
    }

    for (selector, var) in [
        (".icon-sm", "--icon-size-sm"),
        (".icon-md", "--icon-size-md"),
        (".icon-lg", "--icon-size-lg"),
    ] {
        for el in dom::query_all(selector) {
            dom::set_style(&el, "width", &format!("var({})", var));
            dom::set_style(&el, "height", &format!("var({})", var));
        }
    }
}

/// Layout adjustments that depend on discrete breakpoints rather than the
/// continuous scale.
pub fn apply_layout(width: f64) {
    let is_mobile = width < 768.0;
    let is_tablet = (768.0..=1024.0).contains(&width);
    tracing::debug!(width, is_mobile, is_tablet, "applying responsive layout");

    if is_mobile {
        // vote controls go horizontal on mobile
        for control in dom::query_all(".vote-controls") {
            dom::add_class(&control, "d-flex");
            dom::add_class(&control, "flex-row");
            dom::add_class(&control, "align-items-center");
            dom::remove_class(&control, "flex-column");
        }
        // 44px-minimum tap targets
        for el in dom::query_all(".btn, .nav-link, .vote-btn") {
            dom::add_class(&el, "mobile-friendly-tap");
        }
        for flex in dom::query_all(".d-flex:not(.flex-column)") {
            if !dom::has_class(&flex, "no-mobile-stack")
                && !dom::has_class(&flex, "navbar-nav")
                && !dom::has_class(&flex, "pagination")
            {
                dom::add_class(&flex, "mobile-stack");
            }
        }
    } else {
        for control in dom::query_all(".vote-controls") {
            dom::remove_class(&control, "d-flex");
            dom::remove_class(&control, "flex-row");
            dom::remove_class(&control, "align-items-center");
            dom::add_class(&control, "flex-column");
        }
        for el in dom::query_all(".mobile-friendly-tap") {
            dom::remove_class(&el, "mobile-friendly-tap");
        }
        for el in dom::query_all(".mobile-stack") {
            dom::remove_class(&el, "mobile-stack");
        }
    }

    if is_tablet {
        for sidebar in dom::query_all(".sidebar") {
            dom::add_class(&sidebar, "tablet-sidebar");
        }
    } else {
        for sidebar in dom::query_all(".tablet-sidebar") {
            dom::remove_class(&sidebar, "tablet-sidebar");
        }
    }
}
