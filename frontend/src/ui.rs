use yew::Callback;

use crate::programs::ProgramId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

impl Default for Notice {
    fn default() -> Self {
        Self::new("Success!", "Your action was completed successfully.")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalKind {
    Join,
    Program(ProgramId),
}

impl ModalKind {
    /// Reads a trigger's `data-open-modal` / `data-open-program` values.
    pub fn from_trigger(open_modal: Option<&str>, open_program: Option<&str>) -> Option<Self> {
        if let Some(slug) = open_program {
            return ProgramId::from_slug(slug.trim()).map(ModalKind::Program);
        }
        match open_modal.map(str::trim) {
            Some("join") => Some(ModalKind::Join),
            _ => None,
        }
    }
}

/// What page behaviors may ask of the overlay UI. Built from the app's state
/// setters and handed to whoever needs it; nothing is reached through
/// globals.
#[derive(Clone, PartialEq)]
pub struct UiHandle {
    open_modal: Callback<ModalKind>,
    close_modal: Callback<()>,
    show_notification: Callback<Notice>,
}

impl UiHandle {
    pub fn new(
        open_modal: Callback<ModalKind>,
        close_modal: Callback<()>,
        show_notification: Callback<Notice>,
    ) -> Self {
        Self {
            open_modal,
            close_modal,
            show_notification,
        }
    }

    pub fn open_modal(&self, kind: ModalKind) {
        self.open_modal.emit(kind);
    }

    pub fn close_modal(&self) {
        self.close_modal.emit(());
    }

    pub fn show_notification(&self, notice: Notice) {
        self.show_notification.emit(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn triggers_map_to_modals() {
        assert_eq!(ModalKind::from_trigger(Some("join"), None), Some(ModalKind::Join));
        assert_eq!(
            ModalKind::from_trigger(None, Some("freelance-launchpad")),
            Some(ModalKind::Program(ProgramId::FreelanceLaunchpad))
        );
        assert_eq!(ModalKind::from_trigger(None, Some("cooking-class")), None);
        assert_eq!(ModalKind::from_trigger(Some("login"), None), None);
    }

    #[test]
    fn handle_forwards_to_callbacks() {
        let log = Rc::new(RefCell::new(Vec::<String>::new()));
        let ui = {
            let (a, b, c) = (log.clone(), log.clone(), log.clone());
            UiHandle::new(
                Callback::from(move |kind: ModalKind| a.borrow_mut().push(format!("open {:?}", kind))),
                Callback::from(move |_| b.borrow_mut().push("close".to_string())),
                Callback::from(move |notice: Notice| c.borrow_mut().push(notice.title)),
            )
        };

        ui.open_modal(ModalKind::Join);
        ui.show_notification(Notice::default());
        ui.close_modal();

        assert_eq!(*log.borrow(), vec!["open Join", "Success!", "close"]);
    }
}
