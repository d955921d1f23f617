use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_timers::callback::Timeout;
use yew::prelude::*;

use crate::config;
use crate::ui::Notice;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastPhase {
    Hidden,
    Shown,
    Leaving,
}

impl ToastPhase {
    /// How long this phase lasts and what follows it.
    pub fn next(self) -> Option<(u32, ToastPhase)> {
        match self {
            ToastPhase::Shown => Some((config::TOAST_VISIBLE_MS, ToastPhase::Leaving)),
            ToastPhase::Leaving => Some((config::TOAST_EXIT_MS, ToastPhase::Hidden)),
            ToastPhase::Hidden => None,
        }
    }

    pub fn classes(self) -> &'static str {
        match self {
            ToastPhase::Hidden => "hidden translate-x-full",
            ToastPhase::Shown => "translate-x-0",
            ToastPhase::Leaving => "translate-x-full",
        }
    }
}

fn schedule(phase: UseStateSetter<ToastPhase>, current: ToastPhase, timers: Weak<RefCell<Vec<Timeout>>>) {
    let Some((delay, next)) = current.next() else {
        return;
    };
    let Some(pending) = timers.upgrade() else {
        return;
    };
    let timeout = Timeout::new(delay, move || {
        phase.set(next);
        schedule(phase, next, timers);
    });
    pending.borrow_mut().push(timeout);
}

#[derive(Properties, PartialEq)]
pub struct ToastProps {
    /// Sequence number plus payload; a new number restarts the toast even
    /// when the text is the same.
    pub notice: Option<(u32, Notice)>,
}

#[function_component(Toast)]
pub fn toast(props: &ToastProps) -> Html {
    let phase = use_state(|| ToastPhase::Hidden);

    {
        let setter = phase.setter();
        let seq = props.notice.as_ref().map(|(seq, _)| *seq);
        use_effect_with_deps(
            move |seq| {
                let timers: Rc<RefCell<Vec<Timeout>>> = Rc::new(RefCell::new(Vec::new()));
                if seq.is_some() {
                    setter.set(ToastPhase::Shown);
                    schedule(setter, ToastPhase::Shown, Rc::downgrade(&timers));
                }
                // A newer notice cancels whatever is still pending.
                move || drop(timers)
            },
            seq,
        );
    }

    let (title, message) = match &props.notice {
        Some((_, notice)) => (notice.title.clone(), notice.message.clone()),
        None => (String::new(), String::new()),
    };

    html! {
        <div
            id="success-toast"
            class={classes!(
                "fixed", "top-24", "right-4", "z-50", "bg-white", "rounded-lg", "shadow-xl",
                "p-4", "max-w-sm", "transform", "transition-transform", "duration-300",
                phase.classes()
            )}
            role="status"
            aria-live="polite"
        >
            <div class="flex items-start">
                <i class="fas fa-check-circle text-green-500 text-xl mr-3 mt-1"></i>
                <div>
                    <h4 id="toast-title" class="font-bold text-gray-800">{title}</h4>
                    <p id="toast-message" class="text-gray-600 text-sm">{message}</p>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_run_shown_leaving_hidden() {
        let mut phase = ToastPhase::Shown;
        let mut timeline = Vec::new();
        let mut elapsed = 0;
        while let Some((delay, next)) = phase.next() {
            elapsed += delay;
            timeline.push((elapsed, next));
            phase = next;
        }
        assert_eq!(
            timeline,
            vec![(5_000, ToastPhase::Leaving), (5_300, ToastPhase::Hidden)]
        );
    }

    #[test]
    fn hidden_toast_is_off_screen() {
        assert!(ToastPhase::Hidden.classes().contains("hidden"));
        assert!(!ToastPhase::Shown.classes().contains("hidden"));
    }
}
