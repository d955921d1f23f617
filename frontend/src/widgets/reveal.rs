use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::config;
use crate::dom::UiElement;
use crate::error::BindError;

pub const REVEALED: &str = "revealed";

/// A stream of viewport-intersection events that elements can join and leave.
pub trait IntersectionSource<E> {
    fn observe(&self, target: &E);
    fn unobserve(&self, target: &E);
}

impl IntersectionSource<Element> for IntersectionObserver {
    fn observe(&self, target: &Element) {
        IntersectionObserver::observe(self, target);
    }

    fn unobserve(&self, target: &Element) {
        IntersectionObserver::unobserve(self, target);
    }
}

/// One-shot observer: each target fires its action the first time it
/// intersects and is then dropped, both from the intersection source and
/// from this observer. Only unrevealed targets are ever held.
pub struct RevealObserver<E> {
    unrevealed: Vec<E>,
    revealed: usize,
    on_reveal: Box<dyn FnMut(&E)>,
}

impl<E: UiElement> RevealObserver<E> {
    pub fn new(on_reveal: impl FnMut(&E) + 'static) -> Self {
        Self {
            unrevealed: Vec::new(),
            revealed: 0,
            on_reveal: Box::new(on_reveal),
        }
    }

    /// Applies the `revealed` class on first sight.
    pub fn with_class() -> Self {
        Self::new(|element: &E| element.toggle_class(REVEALED, true))
    }

    pub fn attach(&mut self, targets: Vec<E>, source: &impl IntersectionSource<E>) {
        for element in targets {
            source.observe(&element);
            self.unrevealed.push(element);
        }
    }

    /// Feeds a batch of `(target, is_intersecting)` entries. Entries for
    /// targets that already fired, or were never attached, are ignored.
    pub fn on_entries<'a, I>(&mut self, entries: I, source: &impl IntersectionSource<E>)
    where
        I: IntoIterator<Item = (&'a E, bool)>,
        E: 'a,
    {
        for (element, intersecting) in entries {
            if !intersecting {
                continue;
            }
            let Some(index) = self.unrevealed.iter().position(|target| target == element) else {
                continue;
            };
            let target = self.unrevealed.swap_remove(index);
            (self.on_reveal)(&target);
            source.unobserve(&target);
            self.revealed += 1;
        }
    }

    pub fn pending(&self) -> usize {
        self.unrevealed.len()
    }

    pub fn revealed(&self) -> usize {
        self.revealed
    }
}

/// Keeps a browser `IntersectionObserver` and its callback alive.
pub struct RevealBinding {
    observer: IntersectionObserver,
    _state: Rc<RefCell<RevealObserver<Element>>>,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Drop for RevealBinding {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Observes `targets` with the given visibility threshold and root margin.
/// Returns `Ok(None)` for an empty target list.
pub fn bind(
    targets: Vec<Element>,
    threshold: f64,
    root_margin: &str,
    reveal: RevealObserver<Element>,
) -> Result<Option<RevealBinding>, BindError> {
    if targets.is_empty() {
        return Ok(None);
    }
    let count = targets.len();
    let state = Rc::new(RefCell::new(reveal));

    let callback = {
        let state = state.clone();
        Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
            let entries: Vec<(Element, bool)> = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .map(|entry| (entry.target(), entry.is_intersecting()))
                .collect();
            let mut reveal = state.borrow_mut();
            reveal.on_entries(
                entries.iter().map(|(element, intersecting)| (element, *intersecting)),
                &observer,
            );
            if reveal.pending() == 0 {
                observer.disconnect();
                debug!("All {} observed elements revealed", reveal.revealed());
            }
        }) as Box<dyn FnMut(Array, IntersectionObserver)>)
    };

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    options.set_root_margin(root_margin);
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    state.borrow_mut().attach(targets, &observer);
    debug!("Observing {} elements at threshold {}", count, threshold);

    Ok(Some(RevealBinding {
        observer,
        _state: state,
        _callback: callback,
    }))
}

pub fn bind_reveal(targets: Vec<Element>) -> Result<Option<RevealBinding>, BindError> {
    bind(
        targets,
        config::REVEAL_THRESHOLD,
        config::REVEAL_ROOT_MARGIN,
        RevealObserver::with_class(),
    )
}
