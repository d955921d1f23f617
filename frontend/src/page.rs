//! Startup discovery: one pass over the static markup that collects every
//! element the behaviors need, then wires them up.

use log::{info, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, KeyboardEvent};

use crate::dom::{self, Listener};
use crate::error::BindError;
use crate::forms;
use crate::ui::{ModalKind, UiHandle};
use crate::widgets::carousel::{self, CarouselBinding};
use crate::widgets::countdown::{self, CountdownBinding};
use crate::widgets::counters;
use crate::widgets::effects;
use crate::widgets::nav;
use crate::widgets::reveal::{self, RevealBinding};

const REVEAL_SELECTOR: &str = ".reveal, .reveal-left, .reveal-right, .reveal-scale, .stagger-children";

pub struct Page {
    document: Document,
    reveal_targets: Vec<Element>,
    counters: Vec<Element>,
    hero: Option<Element>,
    countdowns: Vec<Element>,
    header: Option<Element>,
    parallax_cards: Vec<Element>,
    particles: Option<Element>,
    mobile_menu: Option<(Element, Element)>,
    anchors: Vec<Element>,
    sections: Vec<Element>,
    nav_links: Vec<Element>,
    year: Option<Element>,
    modal_triggers: Vec<(Element, ModalKind)>,
}

/// Everything that must stay alive for the behaviors to keep working.
/// Dropping it detaches all listeners, observers and timers.
#[derive(Default)]
pub struct Behaviors {
    reveal: Option<RevealBinding>,
    counters: Option<RevealBinding>,
    carousel: Option<CarouselBinding>,
    countdowns: Vec<CountdownBinding>,
    listeners: Vec<Listener>,
}

/// Logs a wiring failure and carries on without that widget.
fn keep<T>(what: &str, result: Result<T, BindError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("{} disabled: {}", what, err);
            None
        }
    }
}

impl Page {
    pub fn discover() -> Result<Self, BindError> {
        let document = dom::document()?;
        let by_id = |id: &str| document.get_element_by_id(id);
        let first = |selector: &str| document.query_selector(selector).ok().flatten();

        let mobile_menu = by_id("mobile-menu-button").zip(by_id("mobile-menu"));
        let modal_triggers = dom::query_all(&document, "[data-open-modal], [data-open-program]")
            .into_iter()
            .filter_map(|el| {
                let kind = ModalKind::from_trigger(
                    el.get_attribute("data-open-modal").as_deref(),
                    el.get_attribute("data-open-program").as_deref(),
                )?;
                Some((el, kind))
            })
            .collect();

        Ok(Self {
            reveal_targets: dom::query_all(&document, REVEAL_SELECTOR),
            counters: dom::query_all(&document, "[data-count]"),
            hero: first(".hero-slider"),
            countdowns: dom::query_all(&document, "[data-countdown]"),
            header: first("header"),
            parallax_cards: dom::query_all(&document, ".parallax-card"),
            particles: first(".hero-particles"),
            mobile_menu,
            anchors: dom::query_all(&document, "a[href^=\"#\"]"),
            sections: dom::query_all(&document, "section[id]"),
            nav_links: dom::query_all(&document, "nav a[href^=\"#\"]"),
            year: by_id("current-year"),
            modal_triggers,
            document,
        })
    }

    pub fn attach(self, ui: UiHandle) -> Behaviors {
        let mut behaviors = Behaviors::default();

        behaviors.reveal = keep("Scroll reveal", reveal::bind_reveal(self.reveal_targets)).flatten();
        behaviors.counters = keep("Stat counters", counters::bind(self.counters)).flatten();
        if let Some(hero) = self.hero {
            behaviors.carousel = keep("Hero slider", carousel::bind(hero)).flatten();
        }
        behaviors.countdowns = self.countdowns.into_iter().map(countdown::bind).collect();

        if let Some(header) = self.header {
            behaviors.listeners.extend(keep("Header shrink", effects::bind_header(header)));
        }
        behaviors
            .listeners
            .extend(keep("Parallax cards", effects::bind_parallax(self.parallax_cards)).flatten());
        if let Some(container) = &self.particles {
            keep("Hero particles", effects::spawn_particles(container));
        }

        if let Some((button, menu)) = self.mobile_menu {
            behaviors
                .listeners
                .extend(keep("Mobile menu", nav::bind_mobile_menu(button, menu)).unwrap_or_default());
        }
        behaviors.listeners.extend(
            keep("Anchor scrolling", nav::bind_anchor_links(&self.document, self.anchors)).unwrap_or_default(),
        );
        behaviors.listeners.extend(
            keep("Active nav link", nav::bind_active_link(self.sections, self.nav_links)).flatten(),
        );
        if let Some(year) = &self.year {
            nav::set_current_year(year);
        }
        keep("Structured data", nav::inject_structured_data(&self.document));

        for (trigger, kind) in self.modal_triggers {
            let ui = ui.clone();
            let bound = Listener::new(&trigger, "click", move |event| {
                event.prevent_default();
                ui.open_modal(kind);
            });
            behaviors.listeners.extend(keep("Modal trigger", bound));
        }
        behaviors
            .listeners
            .extend(keep("Escape to close", bind_escape(&self.document, ui.clone())));
        behaviors
            .listeners
            .extend(keep("Join forms", forms::bind(&self.document, ui)));

        info!(
            "Page behaviors attached: {} countdowns, {} listeners",
            behaviors.countdowns.len(),
            behaviors.listeners.len()
        );
        behaviors
    }
}

fn bind_escape(document: &Document, ui: UiHandle) -> Result<Listener, BindError> {
    Listener::new(document, "keydown", move |event| {
        let escape = event
            .dyn_ref::<KeyboardEvent>()
            .map_or(false, |key| key.key() == "Escape");
        if escape {
            ui.close_modal();
        }
    })
}

/// Body `overflow` bookkeeping for the modal. The page's own value is left
/// alone until a modal has opened at least once.
#[derive(Debug, Default)]
pub struct ScrollLock {
    engaged: bool,
}

impl ScrollLock {
    /// The `overflow` value to write for the new modal state, if any.
    pub fn update(&mut self, modal_open: bool) -> Option<&'static str> {
        if modal_open {
            self.engaged = true;
            Some("hidden")
        } else if self.engaged {
            self.engaged = false;
            Some("auto")
        } else {
            None
        }
    }
}

pub fn set_body_overflow(value: &str) {
    let body = dom::document().ok().and_then(|document| document.body());
    if let Some(body) = body {
        if let Err(err) = body.style().set_property("overflow", value) {
            warn!("Body overflow not updated: {:?}", err);
        }
    }
}
