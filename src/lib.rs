// lib.rs - Chat widget controller: onboarding, chat exchange and message rendering
pub mod api_client;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod logging;
pub mod models;
pub mod render;
pub mod session;
pub mod state;
pub mod validators;
pub mod view;

// Re-export commonly used types for convenience
pub use api_client::{ChatApi, HttpChatApi};
pub use config::WidgetConfig;
pub use controller::{ChatWidget, SendReport};
pub use error::{ApiError, WidgetError};
pub use events::{EventOutcome, WidgetEvent};
pub use models::{Field, OnboardingProfile, Role};
pub use state::WidgetState;
pub use view::{Bindings, Display, Document, MemoryDocument};
