use std::cell::Cell;
use std::rc::Rc;

use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::js_sys::Function;

use crate::dom;
use crate::error::BindError;

/// In-flight flag: at most one animation frame request pending at a time,
/// no matter how many scroll or mousemove events arrive in between.
#[derive(Debug, Default)]
pub struct FrameThrottle {
    in_flight: Cell<bool>,
}

impl FrameThrottle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the pending slot. `false` means a frame is already on its way.
    pub fn try_begin(&self) -> bool {
        !self.in_flight.replace(true)
    }

    pub fn finish(&self) {
        self.in_flight.set(false);
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.in_flight.get()
    }
}

pub fn request_frame(callback: &Closure<dyn FnMut(f64)>) -> Result<i32, BindError> {
    let id = dom::window()?.request_animation_frame(callback.as_ref().unchecked_ref())?;
    Ok(id)
}

fn request_once<F>(work: F) -> Result<i32, BindError>
where
    F: FnOnce(f64) + 'static,
{
    let callback = Closure::once_into_js(work);
    let id = dom::window()?.request_animation_frame(callback.unchecked_ref::<Function>())?;
    Ok(id)
}

/// Runs `work` on the next frame unless one is already scheduled for this
/// throttle.
pub fn throttled<F>(throttle: &Rc<FrameThrottle>, work: F)
where
    F: FnOnce() + 'static,
{
    if !throttle.try_begin() {
        return;
    }
    let guard = throttle.clone();
    let requested = request_once(move |_| {
        work();
        guard.finish();
    });
    if let Err(err) = requested {
        warn!("Animation frame request failed: {}", err);
        throttle.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_one_frame_in_flight() {
        let throttle = FrameThrottle::new();
        assert!(throttle.try_begin());
        for _ in 0..50 {
            assert!(!throttle.try_begin());
        }
        assert!(throttle.is_pending());

        throttle.finish();
        assert!(!throttle.is_pending());
        assert!(throttle.try_begin());
    }
}
