// src/config.rs
use crate::error::WidgetError;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_HISTORY_SYNC_EVERY: u32 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct WidgetConfig {
    /// Origin serving `/api/onboard`, `/api/chat` and `/api/chat-history/:id`.
    pub api_base_url: String,
    /// Sync the conversation log after every N user messages.
    pub history_sync_every: u32,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            history_sync_every: DEFAULT_HISTORY_SYNC_EVERY,
        }
    }
}

impl WidgetConfig {
    /// Reads `CHAT_WIDGET_API_URL` and `CHAT_WIDGET_HISTORY_SYNC_EVERY`,
    /// falling back to the defaults for anything unset.
    pub fn from_env() -> Result<Self, WidgetError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, WidgetError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("CHAT_WIDGET_API_URL") {
            let url = url.trim().trim_end_matches('/').to_string();
            if reqwest::Url::parse(&url).is_err() {
                return Err(WidgetError::Config(format!(
                    "CHAT_WIDGET_API_URL is not a valid URL: {}",
                    url
                )));
            }
            config.api_base_url = url;
        }

        if let Some(every) = lookup("CHAT_WIDGET_HISTORY_SYNC_EVERY") {
            config.history_sync_every = match every.trim().parse::<u32>() {
                Ok(n) if n >= 1 => n,
                _ => {
                    return Err(WidgetError::Config(format!(
                        "CHAT_WIDGET_HISTORY_SYNC_EVERY must be a positive integer, got '{}'",
                        every
                    )))
                }
            };
        }

        Ok(config)
    }
}
