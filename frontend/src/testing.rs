//! Test doubles for the browser: a virtual-time scheduler, an element that
//! records every write, and an intersection source that records
//! observe/unobserve calls.

use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::rc::Rc;

use crate::dom::UiElement;
use crate::schedule::{Clock, Scheduler};
use crate::widgets::reveal::IntersectionSource;

struct FakeTask {
    id: u64,
    due: Cell<i64>,
    period: Option<i64>,
    alive: Rc<Cell<bool>>,
    run: RefCell<Box<dyn FnMut()>>,
}

#[derive(Default)]
struct SchedulerState {
    now: Cell<i64>,
    next_id: Cell<u64>,
    tasks: RefCell<Vec<Rc<FakeTask>>>,
}

/// Virtual time. Nothing runs until `advance` is called; tasks fire in due
/// order, ties broken by registration order.
#[derive(Clone, Default)]
pub struct FakeScheduler {
    state: Rc<SchedulerState>,
}

pub struct FakeHandle {
    alive: Rc<Cell<bool>>,
}

impl Drop for FakeHandle {
    fn drop(&mut self) {
        self.alive.set(false);
    }
}

impl FakeScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(now_ms: i64) -> Self {
        let scheduler = Self::new();
        scheduler.state.now.set(now_ms);
        scheduler
    }

    fn push(&self, delay: i64, period: Option<i64>, run: Box<dyn FnMut()>) -> FakeHandle {
        let alive = Rc::new(Cell::new(true));
        let id = self.state.next_id.get();
        self.state.next_id.set(id + 1);
        self.state.tasks.borrow_mut().push(Rc::new(FakeTask {
            id,
            due: Cell::new(self.state.now.get() + delay),
            period,
            alive: alive.clone(),
            run: RefCell::new(run),
        }));
        FakeHandle { alive }
    }

    pub fn advance(&self, ms: i64) {
        let target = self.state.now.get() + ms;
        loop {
            let next = self
                .state
                .tasks
                .borrow()
                .iter()
                .filter(|task| task.alive.get() && task.due.get() <= target)
                .min_by_key(|task| (task.due.get(), task.id))
                .cloned();
            let Some(task) = next else { break };

            self.state.now.set(task.due.get());
            match task.period {
                Some(period) => task.due.set(task.due.get() + period),
                None => task.alive.set(false),
            }
            let mut run = task.run.borrow_mut();
            (*run)();
        }
        self.state.tasks.borrow_mut().retain(|task| task.alive.get());
        self.state.now.set(target);
    }

    pub fn active_repeating(&self) -> usize {
        self.state
            .tasks
            .borrow()
            .iter()
            .filter(|task| task.alive.get() && task.period.is_some())
            .count()
    }
}

impl Scheduler for FakeScheduler {
    type Handle = FakeHandle;

    fn every(&self, period_ms: u32, task: Box<dyn FnMut()>) -> FakeHandle {
        let period = i64::from(period_ms);
        self.push(period, Some(period), task)
    }

    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> FakeHandle {
        let mut task = Some(task);
        self.push(
            i64::from(delay_ms),
            None,
            Box::new(move || {
                if let Some(task) = task.take() {
                    task();
                }
            }),
        )
    }
}

impl Clock for FakeScheduler {
    fn now_ms(&self) -> i64 {
        self.state.now.get()
    }
}

#[derive(Default, Debug)]
struct ElementState {
    classes: BTreeSet<String>,
    text: Option<String>,
    text_writes: usize,
}

/// Compares by identity, like two handles to the same DOM node.
#[derive(Clone, Default, Debug)]
pub struct FakeElement {
    state: Rc<RefCell<ElementState>>,
}

impl PartialEq for FakeElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl FakeElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn many(count: usize) -> Vec<Self> {
        (0..count).map(|_| Self::new()).collect()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.state.borrow().classes.contains(class)
    }

    pub fn text(&self) -> Option<String> {
        self.state.borrow().text.clone()
    }

    pub fn text_writes(&self) -> usize {
        self.state.borrow().text_writes
    }
}

impl UiElement for FakeElement {
    fn toggle_class(&self, class: &str, on: bool) {
        let mut state = self.state.borrow_mut();
        if on {
            state.classes.insert(class.to_string());
        } else {
            state.classes.remove(class);
        }
    }

    fn set_text(&self, text: &str) {
        let mut state = self.state.borrow_mut();
        state.text = Some(text.to_string());
        state.text_writes += 1;
    }
}

#[derive(Clone, Default)]
pub struct FakeIntersection {
    observed: Rc<RefCell<Vec<FakeElement>>>,
    unobserved: Rc<RefCell<Vec<FakeElement>>>,
}

impl FakeIntersection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_watching(&self, target: &FakeElement) -> bool {
        self.observed.borrow().contains(target) && !self.unobserved.borrow().contains(target)
    }

    pub fn watching_count(&self) -> usize {
        self.observed
            .borrow()
            .iter()
            .filter(|target| !self.unobserved.borrow().contains(target))
            .count()
    }

    pub fn unobserve_calls(&self) -> usize {
        self.unobserved.borrow().len()
    }
}

impl IntersectionSource<FakeElement> for FakeIntersection {
    fn observe(&self, target: &FakeElement) {
        self.observed.borrow_mut().push(target.clone());
    }

    fn unobserve(&self, target: &FakeElement) {
        self.unobserved.borrow_mut().push(target.clone());
    }
}
