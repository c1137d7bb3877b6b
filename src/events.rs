// src/events.rs - Maps page events onto widget handlers
use crate::controller::{ChatWidget, SendReport};
use crate::models::Field;
use crate::validators;
use crate::view::Document;

#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent {
    /// The user edited an onboarding input; `value` is the input's new content.
    FieldInput { field: Field, value: String },
    SubmitOnboarding,
    ChatFormSubmit,
    ChatKeyDown { key: String, shift: bool },
}

#[derive(Debug, Default)]
pub struct EventOutcome {
    /// The host must suppress its default action (form post, newline).
    pub prevent_default: bool,
    pub report: Option<SendReport>,
}

impl<D: Document> ChatWidget<D> {
    pub async fn dispatch(&mut self, event: WidgetEvent) -> EventOutcome {
        match event {
            WidgetEvent::FieldInput { field, value } => {
                self.handle_field_input(field, &value);
                EventOutcome::default()
            }
            WidgetEvent::SubmitOnboarding => {
                self.submit_onboarding().await;
                EventOutcome::default()
            }
            WidgetEvent::ChatFormSubmit => self.send_from_input().await,
            WidgetEvent::ChatKeyDown { key, shift } if key == "Enter" && !shift => {
                self.send_from_input().await
            }
            WidgetEvent::ChatKeyDown { .. } => EventOutcome::default(),
        }
    }

    fn handle_field_input(&mut self, field: Field, value: &str) {
        let is_valid = validators::validate(field, value);
        self.update_onboarding_field(field, value, is_valid);

        if value.trim().is_empty() || is_valid {
            return;
        }
        if let (Some(message), Some(error_el)) = (field.error_message(), self.bindings.field(field).error) {
            self.document.set_text(error_el, message);
        }
    }

    async fn send_from_input(&mut self) -> EventOutcome {
        let text = self.document.value(self.bindings.chat_input);
        let report = self.send_message(&text).await;
        EventOutcome {
            prevent_default: true,
            report: Some(report),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::test_support::widget;
    use crate::view::ids;

    fn input(field: Field, value: &str) -> WidgetEvent {
        WidgetEvent::FieldInput {
            field,
            value: value.to_string(),
        }
    }

    #[tokio::test]
    async fn test_invalid_email_shows_inline_error() {
        let (mut widget, _) = widget();
        widget.dispatch(input(Field::Email, "jo@")).await;
        assert_eq!(
            widget.document().element(ids::EMAIL_ERROR).unwrap().text,
            "Please enter a valid email address"
        );

        widget.dispatch(input(Field::Email, "jo@example.com")).await;
        assert_eq!(widget.document().element(ids::EMAIL_ERROR).unwrap().text, "");
        assert_eq!(widget.state().onboarding.email.as_deref(), Some("jo@example.com"));
    }

    #[tokio::test]
    async fn test_invalid_phone_error_cleared_by_blank() {
        let (mut widget, _) = widget();
        widget.dispatch(input(Field::Phone, "12")).await;
        assert_eq!(
            widget.document().element(ids::PHONE_ERROR).unwrap().text,
            "Please enter a valid phone number"
        );

        widget.dispatch(input(Field::Phone, "   ")).await;
        let phone_error = widget.document().element(ids::PHONE_ERROR).unwrap();
        assert_eq!(phone_error.text, "");
        assert_eq!(
            widget.document().element(ids::PHONE_STATUS).unwrap().class,
            "field-status"
        );
    }

    #[tokio::test]
    async fn test_whitespace_email_stays_neutral_without_error() {
        let (mut widget, _) = widget();
        widget.dispatch(input(Field::Email, "   ")).await;

        assert_eq!(widget.document().element(ids::EMAIL_ERROR).unwrap().text, "");
        assert_eq!(widget.document().element(ids::EMAIL_INPUT).unwrap().class, "");
        assert_eq!(
            widget.document().element(ids::EMAIL_STATUS).unwrap().class,
            "field-status"
        );
        assert!(widget.state().onboarding.email.is_none());
    }

    #[tokio::test]
    async fn test_name_input_uses_name_validator() {
        let (mut widget, _) = widget();
        widget.dispatch(input(Field::Name, "J")).await;
        assert_eq!(widget.document().element(ids::NAME_INPUT).unwrap().class, "invalid");
        widget.dispatch(input(Field::Name, "Jo")).await;
        assert_eq!(widget.state().onboarding.name.as_deref(), Some("Jo"));
    }

    #[tokio::test]
    async fn test_enter_sends_and_prevents_default() {
        let (mut widget, api) = widget();
        let chat_input = widget.document().element_by_id(ids::CHAT_INPUT).unwrap();
        widget.document_mut().set_value(chat_input, "Hello there");

        let outcome = widget
            .dispatch(WidgetEvent::ChatKeyDown {
                key: "Enter".to_string(),
                shift: false,
            })
            .await;

        assert!(outcome.prevent_default);
        assert!(outcome.report.unwrap().delivered);
        assert_eq!(api.chat_requests.lock().unwrap()[0].message, "Hello there");
        assert_eq!(widget.document().value(chat_input), "");
    }

    #[tokio::test]
    async fn test_shift_enter_and_other_keys_pass_through() {
        let (mut widget, api) = widget();
        let chat_input = widget.document().element_by_id(ids::CHAT_INPUT).unwrap();
        widget.document_mut().set_value(chat_input, "line one");

        let outcome = widget
            .dispatch(WidgetEvent::ChatKeyDown {
                key: "Enter".to_string(),
                shift: true,
            })
            .await;
        assert!(!outcome.prevent_default);

        let outcome = widget
            .dispatch(WidgetEvent::ChatKeyDown {
                key: "a".to_string(),
                shift: false,
            })
            .await;
        assert!(!outcome.prevent_default);
        assert!(outcome.report.is_none());
        assert!(api.chat_requests.lock().unwrap().is_empty());
        assert_eq!(widget.document().value(chat_input), "line one");
    }

    #[tokio::test]
    async fn test_form_submit_with_blank_input() {
        let (mut widget, api) = widget();
        let outcome = widget.dispatch(WidgetEvent::ChatFormSubmit).await;
        assert!(outcome.prevent_default);
        assert!(!outcome.report.unwrap().delivered);
        assert!(api.chat_requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_event_runs_onboarding() {
        let (mut widget, api) = widget();
        widget.dispatch(input(Field::Name, "Jo")).await;
        widget.dispatch(input(Field::Email, "jo@example.com")).await;
        widget.dispatch(input(Field::Phone, "555-123-4567")).await;
        assert!(!widget.document().element(ids::SUBMIT_BUTTON).unwrap().disabled);

        widget.dispatch(WidgetEvent::SubmitOnboarding).await;
        assert_eq!(api.onboard_requests.lock().unwrap().len(), 1);
        assert!(widget.state().onboarding.completed);
    }
}
