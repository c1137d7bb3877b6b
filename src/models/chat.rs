// src/models/chat.rs
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::onboarding::{DetectedInfo, OnboardingProfile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }

    pub fn avatar(&self) -> &'static str {
        match self {
            Role::User => "👤",
            Role::Assistant => "◈",
        }
    }
}

/// One entry of the in-memory conversation log, as synced to the history endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    pub timestamp: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub session_id: String,
    pub onboarding: OnboardingProfile,
    pub message_count: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sources: Vec<String>,
    #[serde(default)]
    pub detected_info: Option<DetectedInfo>,
}

/// Treats an explicit `null` list the same as a missing one.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
