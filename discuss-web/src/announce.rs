use std::{cell::Cell, rc::Rc};

use web_sys::{Document, Element};

use crate::dom;

/// Screen-reader live region, appended to `<body>` at startup.
///
/// Announcements clear themselves after three seconds; the generation
/// counter keeps a stale clear from wiping a newer message.
pub struct Announcer {
    region: Option<Element>,
    generation: Rc<Cell<u64>>,
}

impl Announcer {
    pub fn install(document: &Document) -> Rc<Announcer> {
        let region = match document.create_element("div") {
            Ok(el) => {
                dom::set_attr(&el, "aria-live", "polite");
                dom::add_class(&el, "sr-only");
                match document.body() {
                    Some(body) => {
                        if let Err(e) = body.append_child(&el) {
                            tracing::error!(?e, "failed to append live region");
                        }
                        Some(el)
                    }
                    None => {
                        tracing::error!("document has no body, announcements disabled");
                        None
                    }
                }
            }
            Err(e) => {
                tracing::error!(?e, "failed to create live region");
                None
            }
        };
        Rc::new(Announcer {
            region,
            generation: Rc::new(Cell::new(0)),
        })
    }

    pub fn announce(&self, message: &str) {
        let region = match &self.region {
            Some(region) => region,
            None => return,
        };
        region.set_text_content(Some(message));
        let current = self.generation.get() + 1;
        self.generation.set(current);
        let generation = self.generation.clone();
        let region = region.clone();
        dom::after(3000, move || {
            if generation.get() == current {
                region.set_text_content(Some(""));
            }
        });
    }
}
