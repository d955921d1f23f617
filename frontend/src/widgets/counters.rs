use std::cell::RefCell;
use std::rc::Rc;

use log::warn;
use wasm_bindgen::closure::Closure;
use web_sys::Element;

use crate::config;
use crate::dom::UiElement;
use crate::error::BindError;
use crate::frame;
use crate::widgets::reveal::{self, RevealBinding, RevealObserver};

/// A stat counter that counts up from zero once it scrolls into view.
#[derive(Clone, Debug, PartialEq)]
pub struct CounterSpec {
    pub target: i64,
    pub prefix: String,
    pub suffix: String,
    pub duration_ms: f64,
}

impl CounterSpec {
    pub fn from_element(element: &Element) -> Option<Self> {
        let target = parse_leading_int(&element.get_attribute("data-count")?)?;
        Some(Self {
            target,
            prefix: element.get_attribute("data-prefix").unwrap_or_default(),
            suffix: element.get_attribute("data-suffix").unwrap_or_default(),
            duration_ms: config::COUNTER_DURATION_MS,
        })
    }

    /// Text for the frame `elapsed_ms` after the start, and whether the
    /// animation is done.
    pub fn frame(&self, elapsed_ms: f64) -> (String, bool) {
        let progress = (elapsed_ms / self.duration_ms).clamp(0.0, 1.0);
        if progress >= 1.0 {
            return (self.render(self.target), true);
        }
        let eased = 1.0 - (1.0 - progress).powi(3);
        let current = (eased * self.target as f64).floor() as i64;
        (self.render(current), false)
    }

    fn render(&self, value: i64) -> String {
        format!("{}{}{}", self.prefix, group_thousands(value), self.suffix)
    }
}

/// Leading integer like `parseInt(.., 10)`: "250+" is 250, "abc" is nothing.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Drives one counter with a self-rescheduling animation frame. Only one
/// frame per counter is ever pending.
fn animate(element: Element, spec: CounterSpec) {
    let slot: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let next = slot.clone();
    let mut started: Option<f64> = None;

    *slot.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
        let start = *started.get_or_insert(now);
        let (text, done) = spec.frame(now - start);
        element.set_text(&text);
        if done {
            // Dropping the closure ends the loop.
            let _ = next.borrow_mut().take();
            return;
        }
        if let Some(callback) = next.borrow().as_ref() {
            if let Err(err) = frame::request_frame(callback) {
                warn!("Counter stopped: {}", err);
            }
        }
    }) as Box<dyn FnMut(f64)>));

    let first = slot.borrow();
    if let Some(callback) = first.as_ref() {
        if let Err(err) = frame::request_frame(callback) {
            warn!("Counter not started: {}", err);
        }
    }
}

pub fn bind(counters: Vec<Element>) -> Result<Option<RevealBinding>, BindError> {
    let on_visible = RevealObserver::new(|element: &Element| {
        if let Some(spec) = CounterSpec::from_element(element) {
            animate(element.clone(), spec);
        }
    });
    reveal::bind(counters, config::COUNTER_THRESHOLD, "0px", on_visible)
}
