//! AJAX voting: wires the server-rendered vote controls, talks to the
//! vote endpoint, and applies the authoritative response to the DOM and
//! the local vote cache.
//!
//! Requests are serialized per entity: while one is in flight, later
//! clicks on the same entity replace any queued click instead of racing,
//! and the latest one is sent once the in-flight request settles.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use discuss_api::{VoteDirection, VoteKind, VoteResponse, VoteTarget};
use discuss_client::{self as client, VoteCache};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlElement, HtmlInputElement, KeyboardEvent};

use crate::{announce::Announcer, dom, storage::LocalKv};

const VOTE_BUTTON_SELECTOR: &str = ".post-vote-btn, .comment-vote-btn";

pub struct Votes {
    cache: VoteCache<LocalKv>,
    announcer: Rc<Announcer>,
    flights: RefCell<HashMap<String, Flight>>,
}

struct Flight {
    /// The click queued behind the in-flight request, if any. Replaced,
    /// not appended: only the latest click matters.
    pending: Option<QueuedVote>,
}

struct QueuedVote {
    url: String,
    target: VoteTarget,
    control: Element,
}

pub fn setup(store: LocalKv, announcer: Rc<Announcer>) -> Rc<Votes> {
    let votes = Rc::new(Votes {
        cache: VoteCache::new(store),
        announcer,
        flights: RefCell::new(HashMap::new()),
    });

    // Paint remembered vote state before any network activity.
    votes.apply_cached_votes();

    for button in dom::query_all(VOTE_BUTTON_SELECTOR) {
        dom::set_attr(&button, "role", "button");
        dom::set_attr(&button, "tabindex", "0");

        {
            let button = button.clone();
            dom::on(&button.clone(), "keydown", move |e| {
                if let Some(key) = e.dyn_ref::<KeyboardEvent>().map(|k| k.key()) {
                    if key == " " || key == "Enter" {
                        e.prevent_default();
                        if let Some(html) = button.dyn_ref::<HtmlElement>() {
                            html.click();
                        }
                    }
                }
            });
        }

        let votes = votes.clone();
        let target_button = button.clone();
        dom::on(&button, "click", move |e| {
            e.prevent_default();
            Votes::on_click(&votes, &target_button);
        });
    }

    votes
}

impl Votes {
    fn on_click(votes: &Rc<Votes>, control: &Element) {
        let href = match control.get_attribute("href") {
            Some(href) => href,
            None => return,
        };

        // Anonymous users get a login link instead of a vote endpoint.
        if href.contains("login") {
            if let Err(e) = dom::window().location().set_href(&href) {
                tracing::error!(?e, "failed to navigate to login");
            }
            return;
        }

        let target = match VoteTarget::parse_href(&href) {
            Ok(target) => target,
            Err(e) => {
                tracing::error!(%e, "ignoring click on unrecognized vote control");
                return;
            }
        };
        tracing::debug!(url = %href, "vote control clicked");

        let key = format!("{}:{}", target.kind.as_str(), target.id);
        let queued = QueuedVote {
            url: href,
            target,
            control: control.clone(),
        };
        {
            let mut flights = votes.flights.borrow_mut();
            if let Some(flight) = flights.get_mut(&key) {
                tracing::debug!(%key, "vote already in flight, replacing queued click");
                flight.pending = Some(queued);
                return;
            }
            flights.insert(key.clone(), Flight { pending: None });
        }
        spawn_local(run_flight(votes.clone(), key, queued));
    }

    fn apply_cached_votes(&self) {
        for button in dom::query_all(VOTE_BUTTON_SELECTOR) {
            let href = match button.get_attribute("href") {
                Some(href) => href,
                None => continue,
            };
            let target = match VoteTarget::parse_href(&href) {
                Ok(target) => target,
                Err(_) => continue,
            };
            if let Some(stored) = self.cache.lookup(target.kind, &target.id) {
                if stored.matches(target.direction) {
                    dom::add_class(&button, "voted");
                    dom::add_class(&button, "active");
                    tracing::debug!(
                        kind = target.kind.as_str(),
                        id = %target.id,
                        "applied cached vote"
                    );
                }
            }
        }
    }

    fn apply(&self, target: &VoteTarget, resp: &VoteResponse) {
        let outcome = client::apply_response(target.kind, target.direction, resp);

        match self.count_element(target.kind, &resp.id) {
            Some(count) => {
                count.set_text_content(Some(&outcome.count_text));
                dom::set_attr(&count, "aria-label", &outcome.count_label);
            }
            None => tracing::error!(
                kind = target.kind.as_str(),
                id = %resp.id,
                "vote count element not found"
            ),
        }
        self.announcer.announce(&outcome.announcement);

        let (up, down) = self.controls(target.kind, &resp.id);
        if let Some(up) = up {
            set_voted(&up, outcome.up_active);
        }
        if let Some(down) = down {
            set_voted(&down, outcome.down_active);
        }

        self.cache.record(target.kind, &resp.id, outcome.cached);
    }

    fn count_element(&self, kind: VoteKind, id: &str) -> Option<Element> {
        match kind {
            VoteKind::Post => dom::by_id(&format!("post-{}-votes", id)),
            VoteKind::Comment => dom::by_id(&format!("comment-{}", id))?
                .query_selector(".vote-count")
                .ok()
                .flatten(),
        }
    }

    fn controls(&self, kind: VoteKind, id: &str) -> (Option<Element>, Option<Element>) {
        match kind {
            VoteKind::Post => {
                let select = |direction: VoteDirection| {
                    dom::document()
                        .query_selector(&format!(
                            ".post-vote-btn[href*=\"/posts/{}/vote/{}\"]",
                            id,
                            direction.as_str()
                        ))
                        .ok()
                        .flatten()
                };
                (select(VoteDirection::Up), select(VoteDirection::Down))
            }
            VoteKind::Comment => match dom::by_id(&format!("comment-{}", id)) {
                Some(comment) => {
                    let select = |direction: VoteDirection| {
                        comment
                            .query_selector(&format!("a[href*=\"{}\"]", direction.as_str()))
                            .ok()
                            .flatten()
                    };
                    (select(VoteDirection::Up), select(VoteDirection::Down))
                }
                None => (None, None),
            },
        }
    }
}

async fn run_flight(votes: Rc<Votes>, key: String, first: QueuedVote) {
    let mut current = first;
    loop {
        set_busy(&current.control, true);
        let result = send_vote(&current.url).await;
        set_busy(&current.control, false);

        match result {
            Ok(resp) => votes.apply(&current.target, &resp),
            Err(e) => {
                tracing::error!(url = %current.url, %e, "vote request failed");
                votes.announcer.announce("Error processing vote");
            }
        }

        let next = votes
            .flights
            .borrow_mut()
            .get_mut(&key)
            .and_then(|flight| flight.pending.take());
        match next {
            Some(queued) => current = queued,
            None => {
                votes.flights.borrow_mut().remove(&key);
                return;
            }
        }
    }
}

async fn send_vote(url: &str) -> anyhow::Result<VoteResponse> {
    let mut req = crate::CLIENT
        .get(url)
        .header("X-Requested-With", "XMLHttpRequest");
    match csrf_token() {
        Some(token) => req = req.header("X-CSRFToken", token),
        // degraded attempt, the endpoint may still accept a GET
        None => tracing::error!("CSRF token not found"),
    }
    let resp = req.send().await?;
    if !resp.status().is_success() {
        anyhow::bail!("vote endpoint answered {}", resp.status());
    }
    Ok(resp.json().await?)
}

fn csrf_token() -> Option<String> {
    let document = dom::document();
    let meta = document
        .query_selector("meta[name=\"csrf-token\"]")
        .ok()
        .flatten()
        .and_then(|m| m.get_attribute("content"));
    let cookie = document
        .dyn_ref::<web_sys::HtmlDocument>()
        .and_then(|d| d.cookie().ok())
        .and_then(|cookies| client::csrf_from_cookies(&cookies));
    let form_input = document
        .query_selector("input[name=\"csrfmiddlewaretoken\"]")
        .ok()
        .flatten()
        .and_then(|i| i.dyn_ref::<HtmlInputElement>().map(|i| i.value()));
    client::select_csrf(meta, cookie, form_input)
}

fn set_busy(control: &Element, busy: bool) {
    dom::set_attr(control, "aria-busy", if busy { "true" } else { "false" });
    match busy {
        true => dom::add_class(control, "busy"),
        false => dom::remove_class(control, "busy"),
    }
}

fn set_voted(control: &Element, active: bool) {
    match active {
        true => {
            dom::add_class(control, "voted");
            dom::add_class(control, "active");
            dom::set_attr(control, "aria-pressed", "true");
        }
        false => {
            dom::remove_class(control, "voted");
            dom::remove_class(control, "active");
            dom::set_attr(control, "aria-pressed", "false");
        }
    }
}
