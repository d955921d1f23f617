use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::{debug, info};
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, KeyboardEvent, TouchEvent};

use crate::config;
use crate::dom::{self, Listener, UiElement};
use crate::error::BindError;
use crate::schedule::{BrowserScheduler, RepeatingTask, Scheduler};

const ACTIVE: &str = "active";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CarouselState {
    Idle,
    Playing,
    Paused,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavKey {
    Next,
    Prev,
}

impl NavKey {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowRight" | "ArrowDown" => Some(NavKey::Next),
            "ArrowLeft" | "ArrowUp" => Some(NavKey::Prev),
            _ => None,
        }
    }
}

/// Vertical extent of the carousel region in viewport coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VerticalSpan {
    pub top: f64,
    pub bottom: f64,
}

impl VerticalSpan {
    pub fn intersects_viewport(&self, viewport_height: f64) -> bool {
        !(self.bottom < 0.0 || self.top > viewport_height)
    }
}

/// Everything that can interrupt the auto-advance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CarouselInput {
    DotClicked(usize),
    PointerEnter,
    PointerLeave,
    Key {
        key: NavKey,
        region: VerticalSpan,
        viewport_height: f64,
    },
    TouchStart { x: f64 },
    TouchEnd { x: f64 },
}

/// Hero slider. Exactly one slide (and its dot, when the dot count matches)
/// carries the `active` class once `init` has run.
pub struct Carousel<E: UiElement, S: Scheduler> {
    this: Weak<RefCell<Self>>,
    slides: Vec<E>,
    dots: Vec<E>,
    current: usize,
    paused: bool,
    started: bool,
    touch_start_x: f64,
    swipe_threshold: f64,
    timer: RepeatingTask<S>,
}

impl<E: UiElement, S: Scheduler> Carousel<E, S> {
    pub fn new(slides: Vec<E>, dots: Vec<E>, scheduler: S) -> Rc<RefCell<Self>> {
        Rc::new_cyclic(|this| {
            RefCell::new(Self {
                this: this.clone(),
                slides,
                dots,
                current: 0,
                paused: false,
                started: false,
                touch_start_x: 0.0,
                swipe_threshold: config::SWIPE_THRESHOLD_PX,
                timer: RepeatingTask::new(scheduler, config::CAROUSEL_INTERVAL_MS),
            })
        })
    }

    pub fn init(&mut self) {
        if self.slides.is_empty() {
            return;
        }
        if self.dots.len() != self.slides.len() {
            debug!(
                "carousel has {} slides but {} dots, dots stay untouched",
                self.slides.len(),
                self.dots.len()
            );
        }
        self.started = true;
        self.go_to(0);
        self.play();
    }

    pub fn go_to(&mut self, index: usize) {
        if index >= self.slides.len() {
            return;
        }
        for (i, slide) in self.slides.iter().enumerate() {
            slide.toggle_class(ACTIVE, i == index);
        }
        if self.dots.len() == self.slides.len() {
            for (i, dot) in self.dots.iter().enumerate() {
                dot.toggle_class(ACTIVE, i == index);
            }
        }
        self.current = index;
    }

    pub fn next(&mut self) {
        let len = self.slides.len();
        if len == 0 {
            return;
        }
        self.go_to((self.current + 1) % len);
    }

    pub fn prev(&mut self) {
        let len = self.slides.len();
        if len == 0 {
            return;
        }
        self.go_to((self.current + len - 1) % len);
    }

    pub fn play(&mut self) {
        if !self.started {
            return;
        }
        let this = self.this.clone();
        self.timer.arm(move || {
            if let Some(carousel) = this.upgrade() {
                carousel.borrow_mut().next();
            }
        });
        self.paused = false;
    }

    pub fn pause(&mut self) {
        self.timer.cancel();
        self.paused = true;
    }

    /// Gives the slide picked by the user a full interval before the next
    /// automatic advance.
    pub fn restart(&mut self) {
        self.pause();
        self.play();
    }

    pub fn handle(&mut self, input: CarouselInput) {
        if !self.started {
            return;
        }
        match input {
            CarouselInput::DotClicked(index) => {
                if index < self.slides.len() {
                    self.go_to(index);
                    self.restart();
                }
            }
            CarouselInput::PointerEnter => {
                self.pause();
                debug!("Hero slider {:?} on slide {}", self.state(), self.current());
            }
            CarouselInput::PointerLeave => {
                self.play();
                debug!("Hero slider {:?} on slide {}", self.state(), self.current());
            }
            CarouselInput::Key {
                key,
                region,
                viewport_height,
            } => {
                if !region.intersects_viewport(viewport_height) {
                    return;
                }
                match key {
                    NavKey::Next => self.next(),
                    NavKey::Prev => self.prev(),
                }
                self.restart();
            }
            CarouselInput::TouchStart { x } => self.touch_start_x = x,
            CarouselInput::TouchEnd { x } => {
                let diff = x - self.touch_start_x;
                if diff.abs() > self.swipe_threshold {
                    if diff < 0.0 {
                        self.next();
                    } else {
                        self.prev();
                    }
                    self.restart();
                }
            }
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn state(&self) -> CarouselState {
        if !self.started {
            CarouselState::Idle
        } else if self.paused {
            CarouselState::Paused
        } else {
            CarouselState::Playing
        }
    }

    #[cfg(test)]
    pub fn timer_armed(&self) -> bool {
        self.timer.is_armed()
    }
}

/// Keeps the hero slider and its listeners alive.
pub struct CarouselBinding {
    _carousel: Rc<RefCell<Carousel<Element, BrowserScheduler>>>,
    _listeners: Vec<Listener>,
}

fn send(carousel: &Weak<RefCell<Carousel<Element, BrowserScheduler>>>, input: CarouselInput) {
    if let Some(carousel) = carousel.upgrade() {
        carousel.borrow_mut().handle(input);
    }
}

fn first_touch_x(event: &Event) -> Option<f64> {
    let touch = event.dyn_ref::<TouchEvent>()?.changed_touches().get(0)?;
    Some(f64::from(touch.screen_x()))
}

/// Wires the `.hero-slider` container: slides, dots, hover, keyboard, swipe.
/// Returns `Ok(None)` when the container has no slides.
pub fn bind(container: Element) -> Result<Option<CarouselBinding>, BindError> {
    let slides = dom::query_all_in(&container, ".hero-slide");
    if slides.is_empty() {
        return Ok(None);
    }
    let dots = dom::query_all_in(&container, ".slider-dot");
    let carousel = Carousel::new(slides, dots.clone(), BrowserScheduler);
    carousel.borrow_mut().init();
    let weak = Rc::downgrade(&carousel);

    let mut listeners = Vec::new();
    for (i, dot) in dots.iter().enumerate() {
        let weak = weak.clone();
        listeners.push(Listener::new(dot, "click", move |_| {
            send(&weak, CarouselInput::DotClicked(i));
        })?);
    }

    {
        let weak = weak.clone();
        listeners.push(Listener::new(&container, "mouseenter", move |_| {
            send(&weak, CarouselInput::PointerEnter);
        })?);
    }
    {
        let weak = weak.clone();
        listeners.push(Listener::new(&container, "mouseleave", move |_| {
            send(&weak, CarouselInput::PointerLeave);
        })?);
    }

    {
        let weak = weak.clone();
        let region = container.clone();
        let document = dom::document()?;
        listeners.push(Listener::new(&document, "keydown", move |event| {
            let Some(key) = event
                .dyn_ref::<KeyboardEvent>()
                .and_then(|event| NavKey::from_key(&event.key()))
            else {
                return;
            };
            let rect = region.get_bounding_client_rect();
            let (_, viewport_height) = dom::viewport_size();
            send(
                &weak,
                CarouselInput::Key {
                    key,
                    region: VerticalSpan {
                        top: rect.top(),
                        bottom: rect.bottom(),
                    },
                    viewport_height,
                },
            );
        })?);
    }

    {
        let weak = weak.clone();
        listeners.push(Listener::passive(&container, "touchstart", move |event| {
            if let Some(x) = first_touch_x(&event) {
                send(&weak, CarouselInput::TouchStart { x });
            }
        })?);
    }
    {
        let weak = weak.clone();
        listeners.push(Listener::passive(&container, "touchend", move |event| {
            if let Some(x) = first_touch_x(&event) {
                send(&weak, CarouselInput::TouchEnd { x });
            }
        })?);
    }

    info!("Hero slider started with {} slides", carousel.borrow().len());
    Ok(Some(CarouselBinding {
        _carousel: carousel,
        _listeners: listeners,
    }))
}
