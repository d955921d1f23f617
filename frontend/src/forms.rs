use log::info;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlFormElement, HtmlInputElement};

use crate::dom::Listener;
use crate::error::BindError;
use crate::ui::{Notice, UiHandle};

/// The join forms the page knows about. Submissions never leave the
/// browser; they only produce a success toast.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoinForm {
    Page,
    Modal,
}

impl JoinForm {
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "join-form" => Some(JoinForm::Page),
            "modal-join-form" => Some(JoinForm::Modal),
            _ => None,
        }
    }

    pub fn name_field(self) -> &'static str {
        match self {
            JoinForm::Page => "name",
            JoinForm::Modal => "modal-name",
        }
    }

    pub fn notice(self, name: &str) -> Notice {
        match self {
            JoinForm::Page => Notice::new(
                "Application Submitted!",
                format!(
                    "Thanks {}! We've received your application to join Ajira Club. Check your email for next steps.",
                    name
                ),
            ),
            JoinForm::Modal => Notice::new(
                "Session Registered!",
                format!(
                    "Great {}! You're registered for our next session. See you Wednesday at 5 PM in Tech Lab 3.",
                    name
                ),
            ),
        }
    }
}

fn input_value(document: &Document, id: &str) -> String {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.value())
        .unwrap_or_default()
}

/// One delegated handler on the document, so the modal form rendered later
/// is covered too.
pub fn bind(document: &Document, ui: UiHandle) -> Result<Listener, BindError> {
    let lookup = document.clone();
    Listener::new(document, "submit", move |event| {
        let Some(form) = event
            .target()
            .and_then(|target| target.dyn_into::<HtmlFormElement>().ok())
        else {
            return;
        };
        let Some(kind) = JoinForm::from_id(&form.id()) else {
            return;
        };
        event.prevent_default();
        let name = input_value(&lookup, kind.name_field());
        info!("Simulated {:?} join form submission", kind);
        ui.show_notification(kind.notice(&name));
        form.reset();
        ui.close_modal();
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_only_join_forms() {
        assert_eq!(JoinForm::from_id("join-form"), Some(JoinForm::Page));
        assert_eq!(JoinForm::from_id("modal-join-form"), Some(JoinForm::Modal));
        assert_eq!(JoinForm::from_id("newsletter"), None);
    }

    #[test]
    fn notices_greet_by_name() {
        let page = JoinForm::Page.notice("Wanjiku");
        assert_eq!(page.title, "Application Submitted!");
        assert!(page.message.starts_with("Thanks Wanjiku!"));

        let modal = JoinForm::Modal.notice("");
        assert_eq!(modal.title, "Session Registered!");
        assert!(modal.message.starts_with("Great !"));
    }
}
