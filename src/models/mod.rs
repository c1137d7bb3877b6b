// src/models/mod.rs
pub mod chat;
pub mod onboarding;

pub use chat::*;
pub use onboarding::*;
