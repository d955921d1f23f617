use yew::prelude::*;

use crate::programs::ProgramId;
use crate::ui::{ModalKind, Notice, UiHandle};

#[derive(Properties, PartialEq)]
pub struct ModalHostProps {
    pub open: Option<ModalKind>,
    pub ui: UiHandle,
}

/// Closes when the click lands on the dimmed backdrop itself, not on the
/// dialog inside it.
fn backdrop_close(ui: &UiHandle) -> Callback<MouseEvent> {
    let ui = ui.clone();
    Callback::from(move |e: MouseEvent| {
        if e.target() == e.current_target() {
            ui.close_modal();
        }
    })
}

fn close_button(ui: &UiHandle) -> Html {
    let ui = ui.clone();
    let onclick = Callback::from(move |_: MouseEvent| ui.close_modal());
    html! {
        <button type="button" class="text-gray-500 hover:text-gray-700" aria-label="Close" {onclick}>
            <i class="fas fa-times text-xl"></i>
        </button>
    }
}

#[function_component(ModalHost)]
pub fn modal_host(props: &ModalHostProps) -> Html {
    let join_hidden = props.open != Some(ModalKind::Join);
    let program = match props.open {
        Some(ModalKind::Program(id)) => Some(id),
        _ => None,
    };

    html! {
        <>
            <div
                id="join-modal"
                class={classes!("fixed", "inset-0", "bg-black", "bg-opacity-50", "z-50", "flex", "items-center", "justify-center", "p-4", join_hidden.then(|| "hidden"))}
                onclick={backdrop_close(&props.ui)}
            >
                <div class="bg-white rounded-xl max-w-md w-full p-6">
                    <div class="flex justify-between items-center mb-4">
                        <h3 class="text-2xl font-bold text-gray-800">{"Join Our Next Session"}</h3>
                        { close_button(&props.ui) }
                    </div>
                    <div id="modal-content">
                        if !join_hidden {
                            <JoinForm />
                        }
                    </div>
                </div>
            </div>
            <div
                id="program-modal"
                class={classes!("fixed", "inset-0", "bg-black", "bg-opacity-50", "z-50", "flex", "items-center", "justify-center", "p-4", program.is_none().then(|| "hidden"))}
                onclick={backdrop_close(&props.ui)}
            >
                <div class="bg-white rounded-xl max-w-2xl w-full p-6 max-h-[90vh] overflow-y-auto">
                    <div class="flex justify-between items-center mb-4">
                        <h3 id="program-modal-title" class="text-2xl font-bold text-gray-800">
                            { program.map(|id| id.details().title).unwrap_or_default() }
                        </h3>
                        { close_button(&props.ui) }
                    </div>
                    <div id="program-modal-content">
                        if let Some(id) = program {
                            <ProgramDetails id={id} ui={props.ui.clone()} />
                        }
                    </div>
                </div>
            </div>
        </>
    }
}

/// Submission is picked up by the page-wide submit handler.
#[function_component(JoinForm)]
fn join_form() -> Html {
    html! {
        <>
            <form id="modal-join-form" class="space-y-4">
                <div>
                    <label class="block text-gray-700 mb-2" for="modal-name">{"Full Name"}</label>
                    <input type="text" id="modal-name" class="w-full px-4 py-3 border border-gray-300 rounded-lg" placeholder="John Doe" required=true />
                </div>
                <div>
                    <label class="block text-gray-700 mb-2" for="modal-email">{"KCA Email"}</label>
                    <input type="email" id="modal-email" class="w-full px-4 py-3 border border-gray-300 rounded-lg" placeholder="john.doe@students.kca.ac.ke" required=true />
                </div>
                <div class="pt-2">
                    <button type="submit" class="w-full btn-primary text-white font-semibold py-3 rounded-lg">
                        {"Join Next Session "}<i class="ml-2 fas fa-calendar-alt"></i>
                    </button>
                </div>
            </form>
            <p class="text-gray-500 text-sm text-center mt-4">{"Next session: Wednesday, 5 PM at Tech Lab 3"}</p>
        </>
    }
}

#[derive(Properties, PartialEq)]
struct ProgramDetailsProps {
    id: ProgramId,
    ui: UiHandle,
}

#[function_component(ProgramDetails)]
fn program_details(props: &ProgramDetailsProps) -> Html {
    let program = props.id.details();
    let register = {
        let ui = props.ui.clone();
        let id = props.id;
        Callback::from(move |_: MouseEvent| {
            ui.show_notification(Notice::new("Program Registration", id.registration_message()));
            ui.close_modal();
        })
    };

    html! {
        <div class="space-y-6">
            { for program.blocks.iter().map(|block| html! {
                <div class={format!("bg-{}-50 p-4 rounded-lg", block.tone)}>
                    <h4 class={format!("font-bold text-lg text-{}-800 mb-2", block.tone)}>{block.heading}</h4>
                    { for block.lines.iter().map(|line| html! { <p>{*line}</p> }) }
                </div>
            }) }
            <div>
                <h4 class="font-bold text-lg text-gray-800 mb-3">{program.list_heading}</h4>
                <ul class="space-y-2">
                    { for program.list.iter().map(|item| html! {
                        <li class="flex items-start">
                            <i class="fas fa-check text-green-500 mt-1 mr-2"></i>
                            <span>{*item}</span>
                        </li>
                    }) }
                </ul>
            </div>
            <div class="text-center pt-4">
                <button type="button" class="btn-primary text-white font-semibold py-3 px-8 rounded-lg" onclick={register}>
                    {program.cta}
                </button>
            </div>
        </div>
    }
}
