//! Donation and payment form toggles. Presentational show/hide only; the
//! forms themselves are server-side.

use wasm_bindgen::JsCast;
use web_sys::{HtmlInputElement, HtmlSelectElement};

use crate::dom;

pub fn setup() {
    if let Some(select) = dom::by_id("id_donation_type") {
        tracing::debug!("initializing donation form");
        update_custom_amount();
        dom::on(&select, "change", move |_| update_custom_amount());
    }

    let radios = dom::query_all(".payment-method-radio");
    if !radios.is_empty() {
        tracing::debug!("initializing payment method visibility");
        update_payment_visibility();
        for radio in radios {
            dom::on(&radio, "change", move |_| update_payment_visibility());
        }
    }
}

/// The custom amount field only makes sense for the "other amount"
/// donation type (value "0").
fn update_custom_amount() {
    let select = match dom::by_id("id_donation_type") {
        Some(el) => el,
        None => return,
    };
    let group = match dom::by_id("custom-amount-group") {
        Some(el) => el,
        None => return,
    };
    let value = select
        .dyn_ref::<HtmlSelectElement>()
        .map(|s| s.value())
        .unwrap_or_default();
    dom::set_style(&group, "display", if value == "0" { "block" } else { "none" });
}

/// Show only the checked payment method's details block.
fn update_payment_visibility() {
    for details in dom::query_all(".payment-method-details") {
        dom::set_style(&details, "display", "none");
    }
    let checked = dom::query_all(".payment-method-radio")
        .into_iter()
        .find(|r| {
            r.dyn_ref::<HtmlInputElement>()
                .map(|i| i.checked())
                .unwrap_or(false)
        });
    if let Some(radio) = checked {
        let value = radio
            .dyn_ref::<HtmlInputElement>()
            .map(|i| i.value())
            .unwrap_or_default();
        if let Some(details) = dom::by_id(&format!("{}-details", value)) {
            dom::set_style(&details, "display", "block");
        }
    }
}
