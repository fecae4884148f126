//! OneChat bot client for the OnePlatform SDK.
pub mod client;
pub mod config;
pub mod models;
pub mod payload;

pub use client::ChatClient;
pub use config::ChatConfig;
pub use models::{Card, Choice, ChoiceKind, Element, Friend, Profile, QuickReply};
