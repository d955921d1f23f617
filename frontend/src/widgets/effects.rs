use std::cell::Cell;
use std::rc::Rc;

use log::debug;
use wasm_bindgen::JsCast;
use web_sys::js_sys::Math;
use web_sys::{Element, HtmlElement, MouseEvent};

use crate::config;
use crate::dom::{self, Listener, UiElement};
use crate::error::BindError;
use crate::frame::{self, FrameThrottle};

pub fn header_compact(scroll_y: f64) -> bool {
    scroll_y > config::HEADER_COMPACT_AFTER_PX
}

/// Shadow and zero padding once the page has scrolled past the hero top.
pub fn bind_header(header: Element) -> Result<Listener, BindError> {
    let throttle = Rc::new(FrameThrottle::new());
    let window = dom::window()?;
    Listener::new(&window, "scroll", move |_| {
        let header = header.clone();
        frame::throttled(&throttle, move || {
            let compact = header_compact(dom::scroll_y());
            header.toggle_class("shadow-lg", compact);
            if let Some(styled) = header.dyn_ref::<HtmlElement>() {
                let _ = styled
                    .style()
                    .set_property("padding", if compact { "0" } else { "" });
            }
        });
    })
}

/// Card offset in px for a pointer at `pointer`, relative to the viewport
/// center. Zero at the center, `±intensity` at the edges.
pub fn parallax_offset(pointer: (f64, f64), viewport: (f64, f64), intensity: f64) -> (f64, f64) {
    let cx = viewport.0 / 2.0;
    let cy = viewport.1 / 2.0;
    if cx <= 0.0 || cy <= 0.0 {
        return (0.0, 0.0);
    }
    let dx = (pointer.0 - cx) / cx;
    let dy = (pointer.1 - cy) / cy;
    (dx * intensity, dy * intensity)
}

fn parallax_intensity(card: &Element) -> f64 {
    card.get_attribute("data-parallax")
        .and_then(|raw| raw.trim().parse::<f64>().ok())
        .unwrap_or(config::DEFAULT_PARALLAX_INTENSITY)
}

pub fn bind_parallax(cards: Vec<Element>) -> Result<Option<Listener>, BindError> {
    if cards.is_empty() {
        return Ok(None);
    }
    let cards: Rc<Vec<(HtmlElement, f64)>> = Rc::new(
        cards
            .into_iter()
            .filter_map(|card| {
                let intensity = parallax_intensity(&card);
                card.dyn_into::<HtmlElement>().ok().map(|card| (card, intensity))
            })
            .collect(),
    );
    let pointer = Rc::new(Cell::new((0.0, 0.0)));
    let throttle = Rc::new(FrameThrottle::new());
    let document = dom::document()?;

    let listener = Listener::new(&document, "mousemove", move |event| {
        let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        // Latest position wins when several events land before the frame.
        pointer.set((f64::from(mouse.client_x()), f64::from(mouse.client_y())));
        let cards = cards.clone();
        let pointer = pointer.clone();
        frame::throttled(&throttle, move || {
            let viewport = dom::viewport_size();
            for (card, intensity) in cards.iter() {
                let (tx, ty) = parallax_offset(pointer.get(), viewport, *intensity);
                let _ = card
                    .style()
                    .set_property("transform", &format!("translate({}px, {}px)", tx, ty));
            }
        });
    })?;
    Ok(Some(listener))
}

/// Style of one floating hero particle, derived from six uniform samples in
/// `[0, 1)`.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleStyle {
    pub left_pct: f64,
    pub top_pct: f64,
    pub size_px: f64,
    pub duration_s: f64,
    pub delay_s: f64,
    pub opacity: f64,
}

impl ParticleStyle {
    pub fn from_samples(samples: [f64; 6]) -> Self {
        Self {
            left_pct: samples[0] * 100.0,
            top_pct: 80.0 + samples[1] * 20.0,
            size_px: 3.0 + samples[2] * 5.0,
            duration_s: 6.0 + samples[3] * 10.0,
            delay_s: samples[4] * 8.0,
            opacity: 0.15 + samples[5] * 0.25,
        }
    }

    fn properties(&self) -> [(&'static str, String); 7] {
        [
            ("left", format!("{}%", self.left_pct)),
            ("top", format!("{}%", self.top_pct)),
            ("width", format!("{}px", self.size_px)),
            ("height", format!("{}px", self.size_px)),
            ("animation-duration", format!("{}s", self.duration_s)),
            ("animation-delay", format!("{}s", self.delay_s)),
            ("opacity", format!("{}", self.opacity)),
        ]
    }
}

pub fn spawn_particles(container: &Element) -> Result<(), BindError> {
    let document = container.owner_document().ok_or(BindError::NoDocument)?;
    for _ in 0..config::PARTICLE_COUNT {
        let style = ParticleStyle::from_samples(std::array::from_fn(|_| Math::random()));
        let particle: HtmlElement = document.create_element("div")?.unchecked_into();
        particle.toggle_class("hero-particle", true);
        let css = particle.style();
        for (name, value) in style.properties() {
            css.set_property(name, &value)?;
        }
        container.append_child(&particle)?;
    }
    debug!("Spawned {} hero particles", config::PARTICLE_COUNT);
    Ok(())
}
