use gloo_timers::callback::{Interval, Timeout};

/// Something that can run callbacks later. Dropping a returned handle
/// cancels the callback, the same contract as gloo's `Interval`/`Timeout`.
pub trait Scheduler: Clone + 'static {
    type Handle: 'static;

    fn every(&self, period_ms: u32, task: Box<dyn FnMut()>) -> Self::Handle;
    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Handle;
}

/// Wall clock in milliseconds since the Unix epoch.
pub trait Clock: Clone + 'static {
    fn now_ms(&self) -> i64;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserScheduler;

/// Held only so that dropping it cancels the timer.
#[allow(dead_code)]
pub enum BrowserTimer {
    Interval(Interval),
    Timeout(Timeout),
}

impl Scheduler for BrowserScheduler {
    type Handle = BrowserTimer;

    fn every(&self, period_ms: u32, task: Box<dyn FnMut()>) -> BrowserTimer {
        BrowserTimer::Interval(Interval::new(period_ms, task))
    }

    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> BrowserTimer {
        BrowserTimer::Timeout(Timeout::new(delay_ms, task))
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// A repeating task owned by one controller. At most one timer is armed at a
/// time: `arm` always cancels the previous one first.
pub struct RepeatingTask<S: Scheduler> {
    scheduler: S,
    period_ms: u32,
    handle: Option<S::Handle>,
}

impl<S: Scheduler> RepeatingTask<S> {
    pub fn new(scheduler: S, period_ms: u32) -> Self {
        Self {
            scheduler,
            period_ms,
            handle: None,
        }
    }

    pub fn arm<F>(&mut self, task: F)
    where
        F: FnMut() + 'static,
    {
        self.cancel();
        self.handle = Some(self.scheduler.every(self.period_ms, Box::new(task)));
    }

    /// Returns whether a timer was actually armed.
    pub fn cancel(&mut self) -> bool {
        self.handle.take().is_some()
    }

    #[cfg(test)]
    pub fn is_armed(&self) -> bool {
        self.handle.is_some()
    }
}
