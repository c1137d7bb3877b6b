// src/controller.rs - Onboarding and chat handlers
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::api_client::ChatApi;
use crate::config::WidgetConfig;
use crate::error::WidgetError;
use crate::models::{ChatRequest, DetectedInfo, Field, Role};
use crate::render::RenderedMessage;
use crate::state::WidgetState;
use crate::validators;
use crate::view::{Bindings, Display, Document};

pub const SUBMIT_LABEL: &str = "Complete Onboarding";
pub const SUBMITTING_LABEL: &str = "Submitting...";
pub const DEFAULT_WELCOME: &str = "You're all set!";
pub const ONBOARDING_FAILED: &str = "An error occurred. Please try again.";
pub const ONBOARDING_CONNECTION_ERROR: &str = "Connection error. Please try again.";
pub const CHAT_FAILED: &str = "I apologize, but I encountered an error. Please try again.";
pub const CHAT_CONNECTION_ERROR: &str =
    "I'm having trouble connecting. Please check your connection and try again.";

/// What happened to one `send_message` call.
#[derive(Debug, Default)]
pub struct SendReport {
    /// The assistant's real reply was shown (not an apology).
    pub delivered: bool,
    /// Detached history upload started by this message, if any.
    pub history_sync: Option<JoinHandle<()>>,
}

pub struct ChatWidget<D: Document> {
    pub(crate) document: D,
    pub(crate) bindings: Bindings<D::Handle>,
    pub(crate) state: WidgetState,
    api: Arc<dyn ChatApi>,
    history_sync_every: u32,
}

impl<D: Document> ChatWidget<D> {
    pub fn new(document: D, api: Arc<dyn ChatApi>, config: &WidgetConfig) -> Result<Self, WidgetError> {
        Self::with_state(document, api, config, WidgetState::new())
    }

    pub fn with_state(
        document: D,
        api: Arc<dyn ChatApi>,
        config: &WidgetConfig,
        state: WidgetState,
    ) -> Result<Self, WidgetError> {
        if config.history_sync_every == 0 {
            return Err(WidgetError::Config(
                "history sync interval must be at least 1".to_string(),
            ));
        }
        let bindings = Bindings::bind(&document)?;

        info!("🚀 Chat widget initialized");
        info!(session_id = %state.session_id, "Session ID: {}", state.session_id);

        Ok(Self {
            document,
            bindings,
            state,
            api,
            history_sync_every: config.history_sync_every,
        })
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    pub fn bindings(&self) -> &Bindings<D::Handle> {
        &self.bindings
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn into_document(self) -> D {
        self.document
    }

    // ------------------------------------------------------------------
    // Onboarding
    // ------------------------------------------------------------------

    /// Reflects one field's validity on the page and in the profile.
    ///
    /// Blank input only resets the styling; whatever was stored stays stored.
    /// Invalid input discards the stored value.
    pub fn update_onboarding_field(&mut self, field: Field, value: &str, is_valid: bool) {
        let binding = *self.bindings.field(field);
        let trimmed = value.trim();

        if trimmed.is_empty() {
            self.document.set_class(binding.status, "field-status");
            self.document.set_class(binding.input, "");
            if let Some(error_el) = binding.error {
                self.document.set_text(error_el, "");
            }
        } else if is_valid {
            self.document.set_class(binding.status, "field-status valid");
            self.document.set_class(binding.input, "valid");
            if let Some(error_el) = binding.error {
                self.document.set_text(error_el, "");
            }
            self.state.onboarding.set(field, Some(trimmed.to_string()));
        } else {
            self.document.set_class(binding.status, "field-status invalid");
            self.document.set_class(binding.input, "invalid");
            self.state.onboarding.set(field, None);
        }

        self.update_progress();
        self.update_submit_button();
    }

    fn update_progress(&mut self) {
        let percent = self.state.progress_percent();
        self.document.set_width_percent(self.bindings.progress_bar, percent);
    }

    fn update_submit_button(&mut self) {
        let ready = self.state.onboarding.is_ready();
        self.document.set_disabled(self.bindings.submit_button, !ready);
    }

    pub async fn submit_onboarding(&mut self) {
        let Some(request) = self.state.onboarding.to_request(&self.state.session_id) else {
            return;
        };

        self.document.set_disabled(self.bindings.submit_button, true);
        self.document.set_text(self.bindings.submit_button, SUBMITTING_LABEL);

        match self.api.onboard(&request).await {
            Ok(response) if response.success => {
                self.state.onboarding.completed = true;
                let message = response
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_WELCOME.to_string());
                info!(session_id = %self.state.session_id, "✅ Onboarding completed");

                self.show_onboarding_complete(&message);
                self.add_message(
                    Role::Assistant,
                    &format!(
                        "🎉 {} I'm now ready to provide you with personalized assistance.",
                        message
                    ),
                    &[],
                );
            }
            Ok(response) => {
                warn!(session_id = %self.state.session_id, detail = ?response.detail, "Onboarding refused");
                let detail = response.detail.unwrap_or_else(|| ONBOARDING_FAILED.to_string());
                self.onboarding_failed(&detail);
            }
            Err(e) if e.is_rejection() => {
                warn!(session_id = %self.state.session_id, "Onboarding rejected: {}", e);
                let detail = e.detail().unwrap_or(ONBOARDING_FAILED).to_string();
                self.onboarding_failed(&detail);
            }
            Err(e) => {
                error!(session_id = %self.state.session_id, "Onboarding error: {}", e);
                self.onboarding_failed(ONBOARDING_CONNECTION_ERROR);
            }
        }
    }

    fn show_onboarding_complete(&mut self, message: &str) {
        self.document.set_display(self.bindings.onboarding_form, Display::None);
        self.document.set_display(self.bindings.onboarding_complete, Display::Block);
        self.document.set_text(self.bindings.welcome_message, message);
    }

    fn onboarding_failed(&mut self, message: &str) {
        self.document.alert(message);
        self.document.set_disabled(self.bindings.submit_button, false);
        self.document.set_text(self.bindings.submit_button, SUBMIT_LABEL);
    }

    // ------------------------------------------------------------------
    // Chat
    // ------------------------------------------------------------------

    fn add_message(&mut self, role: Role, content: &str, sources: &[String]) {
        self.state.record(role, content);
        let rendered = RenderedMessage::new(role, content, sources);
        self.document.append_message(self.bindings.chat_messages, &rendered);
        self.document.scroll_to_bottom(self.bindings.chat_messages);
    }

    fn show_typing(&mut self, show: bool) {
        let display = if show { Display::Flex } else { Display::None };
        self.document.set_display(self.bindings.typing_indicator, display);
    }

    pub async fn send_message(&mut self, message: &str) -> SendReport {
        if message.trim().is_empty() {
            return SendReport::default();
        }

        self.add_message(Role::User, message, &[]);
        self.state.message_count += 1;
        self.document.set_value(self.bindings.chat_input, "");
        self.show_typing(true);

        let request = ChatRequest {
            message: message.to_string(),
            session_id: self.state.session_id.clone(),
            onboarding: self.state.onboarding.clone(),
            message_count: self.state.message_count,
        };
        let result = self.api.chat(&request).await;

        self.show_typing(false);

        let delivered = match result {
            Ok(response) => {
                self.add_message(Role::Assistant, &response.response, &response.sources);
                if let Some(info) = response.detected_info {
                    self.apply_detected_info(&info);
                }
                true
            }
            Err(e) if e.is_rejection() => {
                warn!(session_id = %self.state.session_id, "Chat request rejected: {}", e);
                self.add_message(Role::Assistant, CHAT_FAILED, &[]);
                false
            }
            Err(e) => {
                error!(session_id = %self.state.session_id, "Chat error: {}", e);
                self.add_message(Role::Assistant, CHAT_CONNECTION_ERROR, &[]);
                false
            }
        };

        let history_sync = if self.state.message_count % self.history_sync_every == 0 {
            Some(self.save_chat_history())
        } else {
            None
        };

        SendReport {
            delivered,
            history_sync,
        }
    }

    /// Fills only the profile fields that are still empty.
    fn apply_detected_info(&mut self, info: &DetectedInfo) {
        for (field, value) in info.fields() {
            if self.state.onboarding.get(field).is_some() {
                continue;
            }
            debug!(field = field.as_str(), "Backfilling detected contact field");
            let input = self.bindings.field(field).input;
            self.document.set_value(input, value);
            self.update_onboarding_field(field, value, validators::validate(field, value));
        }
    }

    /// Uploads a snapshot of the log on a detached task. Failures are only logged.
    pub fn save_chat_history(&self) -> JoinHandle<()> {
        let api = Arc::clone(&self.api);
        let session_id = self.state.session_id.clone();
        let messages = self.state.messages.clone();

        tokio::spawn(async move {
            match api.save_history(&session_id, &messages).await {
                Ok(()) => debug!(session_id = %session_id, count = messages.len(), "Chat history saved"),
                Err(e) => error!(session_id = %session_id, "Failed to save chat history: {}", e),
            }
        })
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::ChatWidget;
    use crate::api_client::ChatApi;
    use crate::config::WidgetConfig;
    use crate::error::ApiError;
    use crate::models::{ChatMessage, ChatRequest, ChatResponse, OnboardRequest, OnboardResponse};
    use crate::state::WidgetState;
    use crate::view::MemoryDocument;

    /// Replays queued replies; echoes chat and accepts onboarding once the queues run dry.
    #[derive(Default)]
    pub struct ScriptedApi {
        pub onboard_replies: Mutex<VecDeque<Result<OnboardResponse, ApiError>>>,
        pub chat_replies: Mutex<VecDeque<Result<ChatResponse, ApiError>>>,
        pub onboard_requests: Mutex<Vec<OnboardRequest>>,
        pub chat_requests: Mutex<Vec<ChatRequest>>,
        pub history_posts: Mutex<Vec<(String, Vec<ChatMessage>)>>,
    }

    impl ScriptedApi {
        pub fn push_chat(&self, reply: Result<ChatResponse, ApiError>) {
            self.chat_replies.lock().unwrap().push_back(reply);
        }

        pub fn push_onboard(&self, reply: Result<OnboardResponse, ApiError>) {
            self.onboard_replies.lock().unwrap().push_back(reply);
        }
    }

    #[async_trait]
    impl ChatApi for ScriptedApi {
        async fn onboard(&self, request: &OnboardRequest) -> Result<OnboardResponse, ApiError> {
            self.onboard_requests.lock().unwrap().push(request.clone());
            let queued = self.onboard_replies.lock().unwrap().pop_front();
            queued.unwrap_or_else(|| {
                Ok(OnboardResponse {
                    success: true,
                    message: Some(format!("Welcome, {}!", request.name)),
                    detail: None,
                })
            })
        }

        async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError> {
            self.chat_requests.lock().unwrap().push(request.clone());
            let queued = self.chat_replies.lock().unwrap().pop_front();
            queued.unwrap_or_else(|| {
                Ok(ChatResponse {
                    response: format!("echo: {}", request.message),
                    ..Default::default()
                })
            })
        }

        async fn save_history(&self, session_id: &str, messages: &[ChatMessage]) -> Result<(), ApiError> {
            self.history_posts
                .lock()
                .unwrap()
                .push((session_id.to_string(), messages.to_vec()));
            Ok(())
        }
    }

    pub fn widget() -> (ChatWidget<MemoryDocument>, Arc<ScriptedApi>) {
        let api = Arc::new(ScriptedApi::default());
        let widget = ChatWidget::with_state(
            MemoryDocument::widget_page(),
            api.clone(),
            &WidgetConfig::default(),
            WidgetState::with_session("session_test_abc"),
        )
        .unwrap();
        (widget, api)
    }
}
