use log::{info, warn};
use yew::prelude::*;

mod config;
mod dom;
mod error;
mod forms;
mod frame;
mod page;
mod programs;
mod schedule;
mod ui;
mod components {
    pub mod modal;
    pub mod toast;
}
mod widgets {
    pub mod carousel;
    pub mod countdown;
    pub mod counters;
    pub mod effects;
    pub mod nav;
    pub mod reveal;
}
#[cfg(test)]
mod testing;

use components::{modal::ModalHost, toast::Toast};
use page::{Page, ScrollLock};
use ui::{ModalKind, Notice, UiHandle};

/// Overlay app: owns the modal and toast state and hands the rest of the
/// page a `UiHandle` to drive them.
#[function_component]
fn App() -> Html {
    let modal = use_state(|| None::<ModalKind>);
    let notice = use_state(|| None::<(u32, Notice)>);
    let notice_seq = use_mut_ref(|| 0u32);

    let ui = {
        let open = modal.setter();
        let close = modal.setter();
        let notify = notice.setter();
        UiHandle::new(
            Callback::from(move |kind: ModalKind| open.set(Some(kind))),
            Callback::from(move |_| close.set(None)),
            Callback::from(move |next: Notice| {
                let mut seq = notice_seq.borrow_mut();
                *seq = seq.wrapping_add(1);
                notify.set(Some((*seq, next)));
            }),
        )
    };

    // Attach page behaviors once; they live as long as the app.
    {
        let ui = ui.clone();
        use_effect_with_deps(
            move |_| {
                let behaviors = match Page::discover() {
                    Ok(page) => Some(page.attach(ui)),
                    Err(err) => {
                        warn!("Page behaviors not attached: {}", err);
                        None
                    }
                };
                move || drop(behaviors)
            },
            (),
        );
    }

    {
        let open = modal.is_some();
        let scroll_lock = use_mut_ref(ScrollLock::default);
        use_effect_with_deps(
            move |open| {
                if let Some(overflow) = scroll_lock.borrow_mut().update(*open) {
                    page::set_body_overflow(overflow);
                }
                || ()
            },
            open,
        );
    }

    html! {
        <>
            <ModalHost open={*modal} ui={ui} />
            <Toast notice={(*notice).clone()} />
        </>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting site behaviors");
    let root = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id("ui-root"));
    match root {
        Some(root) => yew::Renderer::<App>::with_root(root).render(),
        None => yew::Renderer::<App>::new().render(),
    };
}
