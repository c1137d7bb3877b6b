// src/view/mod.rs - The page surface the widget draws on
//
// Hosts implement `Document`; the widget resolves every element it needs once,
// through `Bindings::bind`, and refuses to start when one is missing.
pub mod memory;
pub mod terminal;

use std::fmt::Debug;

use crate::error::WidgetError;
use crate::models::Field;
use crate::render::RenderedMessage;

pub use memory::{MemoryDocument, MemoryElement};
pub use terminal::TerminalDocument;

/// Element identifiers the widget expects to find.
pub mod ids {
    pub const NAME_INPUT: &str = "userName";
    pub const EMAIL_INPUT: &str = "userEmail";
    pub const PHONE_INPUT: &str = "userPhone";
    pub const NAME_STATUS: &str = "nameStatus";
    pub const EMAIL_STATUS: &str = "emailStatus";
    pub const PHONE_STATUS: &str = "phoneStatus";
    pub const EMAIL_ERROR: &str = "emailError";
    pub const PHONE_ERROR: &str = "phoneError";
    pub const SUBMIT_BUTTON: &str = "submitOnboarding";
    pub const PROGRESS_BAR: &str = "progressBar";
    pub const ONBOARDING_FORM: &str = "onboardingForm";
    pub const ONBOARDING_COMPLETE: &str = "onboardingComplete";
    pub const WELCOME_MESSAGE: &str = "welcomeMessage";
    pub const CHAT_MESSAGES: &str = "chatMessages";
    pub const CHAT_FORM: &str = "chatForm";
    pub const CHAT_INPUT: &str = "chatInput";
    pub const SEND_BUTTON: &str = "sendBtn";
    pub const TYPING_INDICATOR: &str = "typingIndicator";

    pub const ALL: [&str; 18] = [
        NAME_INPUT,
        EMAIL_INPUT,
        PHONE_INPUT,
        NAME_STATUS,
        EMAIL_STATUS,
        PHONE_STATUS,
        EMAIL_ERROR,
        PHONE_ERROR,
        SUBMIT_BUTTON,
        PROGRESS_BAR,
        ONBOARDING_FORM,
        ONBOARDING_COMPLETE,
        WELCOME_MESSAGE,
        CHAT_MESSAGES,
        CHAT_FORM,
        CHAT_INPUT,
        SEND_BUTTON,
        TYPING_INDICATOR,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    None,
    Block,
    Flex,
}

pub trait Document {
    type Handle: Copy + Debug;

    fn element_by_id(&self, id: &str) -> Option<Self::Handle>;

    fn set_class(&mut self, element: Self::Handle, class: &str);
    fn set_text(&mut self, element: Self::Handle, text: &str);
    fn value(&self, element: Self::Handle) -> String;
    fn set_value(&mut self, element: Self::Handle, value: &str);
    fn set_disabled(&mut self, element: Self::Handle, disabled: bool);
    fn set_display(&mut self, element: Self::Handle, display: Display);
    fn set_width_percent(&mut self, element: Self::Handle, percent: f64);

    /// Appends a chat bubble as the last child of `list`.
    fn append_message(&mut self, list: Self::Handle, message: &RenderedMessage);
    fn scroll_to_bottom(&mut self, element: Self::Handle);

    /// Blocking, user-facing notice.
    fn alert(&mut self, message: &str);
}

#[derive(Debug, Clone, Copy)]
pub struct FieldBinding<H> {
    pub input: H,
    pub status: H,
    pub error: Option<H>,
}

/// Every element the widget touches, resolved once at startup.
#[derive(Debug, Clone, Copy)]
pub struct Bindings<H> {
    pub name: FieldBinding<H>,
    pub email: FieldBinding<H>,
    pub phone: FieldBinding<H>,
    pub submit_button: H,
    pub progress_bar: H,
    pub onboarding_form: H,
    pub onboarding_complete: H,
    pub welcome_message: H,
    pub chat_messages: H,
    pub chat_form: H,
    pub chat_input: H,
    pub send_button: H,
    pub typing_indicator: H,
}

impl<H: Copy + Debug> Bindings<H> {
    pub fn bind<D>(document: &D) -> Result<Self, WidgetError>
    where
        D: Document<Handle = H>,
    {
        let require = |id: &'static str| document.element_by_id(id).ok_or(WidgetError::MissingElement(id));

        Ok(Self {
            name: FieldBinding {
                input: require(ids::NAME_INPUT)?,
                status: require(ids::NAME_STATUS)?,
                error: None,
            },
            email: FieldBinding {
                input: require(ids::EMAIL_INPUT)?,
                status: require(ids::EMAIL_STATUS)?,
                error: Some(require(ids::EMAIL_ERROR)?),
            },
            phone: FieldBinding {
                input: require(ids::PHONE_INPUT)?,
                status: require(ids::PHONE_STATUS)?,
                error: Some(require(ids::PHONE_ERROR)?),
            },
            submit_button: require(ids::SUBMIT_BUTTON)?,
            progress_bar: require(ids::PROGRESS_BAR)?,
            onboarding_form: require(ids::ONBOARDING_FORM)?,
            onboarding_complete: require(ids::ONBOARDING_COMPLETE)?,
            welcome_message: require(ids::WELCOME_MESSAGE)?,
            chat_messages: require(ids::CHAT_MESSAGES)?,
            chat_form: require(ids::CHAT_FORM)?,
            chat_input: require(ids::CHAT_INPUT)?,
            send_button: require(ids::SEND_BUTTON)?,
            typing_indicator: require(ids::TYPING_INDICATOR)?,
        })
    }

    pub fn field(&self, field: Field) -> &FieldBinding<H> {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_resolves_widget_page() {
        let document = MemoryDocument::widget_page();
        let bindings = Bindings::bind(&document).unwrap();
        assert!(bindings.name.error.is_none());
        assert!(bindings.email.error.is_some());
        assert_eq!(document.element(ids::CHAT_INPUT).unwrap().id, ids::CHAT_INPUT);
        assert_eq!(
            bindings.field(Field::Phone).input,
            document.element_by_id(ids::PHONE_INPUT).unwrap()
        );
    }

    #[test]
    fn test_bind_fails_fast_on_missing_element() {
        let document = MemoryDocument::with_elements(
            ids::ALL.iter().copied().filter(|id| *id != ids::TYPING_INDICATOR),
        );
        match Bindings::bind(&document) {
            Err(WidgetError::MissingElement(id)) => assert_eq!(id, ids::TYPING_INDICATOR),
            other => panic!("expected missing element, got {:?}", other),
        }
    }
}
