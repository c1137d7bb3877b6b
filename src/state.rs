// src/state.rs
use crate::models::{ChatMessage, OnboardingProfile, Role};
use crate::session::generate_session_id;

/// Everything the widget remembers for the lifetime of the page.
#[derive(Debug, Clone)]
pub struct WidgetState {
    pub session_id: String,
    /// User messages sent so far. Assistant replies do not count.
    pub message_count: u32,
    pub onboarding: OnboardingProfile,
    pub messages: Vec<ChatMessage>,
}

impl WidgetState {
    pub fn new() -> Self {
        Self::with_session(generate_session_id())
    }

    pub fn with_session(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            message_count: 0,
            onboarding: OnboardingProfile::default(),
            messages: Vec::new(),
        }
    }

    pub fn record(&mut self, role: Role, content: &str) -> &ChatMessage {
        self.messages.push(ChatMessage::new(role, content));
        &self.messages[self.messages.len() - 1]
    }

    /// Fraction of onboarding fields currently held, as a 0-100 width.
    pub fn progress_percent(&self) -> f64 {
        self.onboarding.filled_count() as f64 / 3.0 * 100.0
    }
}

impl Default for WidgetState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Field;

    #[test]
    fn test_new_state_is_empty() {
        let state = WidgetState::new();
        assert!(state.session_id.starts_with("session_"));
        assert_eq!(state.message_count, 0);
        assert!(state.messages.is_empty());
        assert!(!state.onboarding.completed);
    }

    #[test]
    fn test_progress_tracks_filled_fields() {
        let mut state = WidgetState::with_session("s");
        assert_eq!(state.progress_percent(), 0.0);
        state.onboarding.set(Field::Email, Some("a@b.co".to_string()));
        assert!((state.progress_percent() - 33.333).abs() < 0.01);
        state.onboarding.set(Field::Name, Some("Jo".to_string()));
        state.onboarding.set(Field::Phone, Some("5551234567".to_string()));
        assert_eq!(state.progress_percent(), 100.0);
    }

    #[test]
    fn test_record_appends_in_order() {
        let mut state = WidgetState::with_session("s");
        state.record(Role::User, "one");
        let last = state.record(Role::Assistant, "two");
        assert_eq!(last.content, "two");
        assert_eq!(state.messages.len(), 2);
        assert_eq!(state.messages[0].role, Role::User);
    }
}
