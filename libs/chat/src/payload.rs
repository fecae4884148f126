//! Request bodies for the chat endpoints.

use serde::Serialize;

use crate::models::{Element, QuickReply};

#[derive(Debug, Clone, Serialize)]
pub struct PushMessage<'a> {
    pub to: &'a str,
    pub bot_id: &'a str,
    #[serde(flatten)]
    pub content: MessageContent<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_notification: Option<&'a str>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MessageContent<'a> {
    Text { message: &'a str },
    Template { elements: Vec<Element> },
}

impl MessageContent<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            MessageContent::Text { .. } => "text",
            MessageContent::Template { .. } => "template",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QuickReplyMessage<'a> {
    pub to: &'a str,
    pub bot_id: &'a str,
    pub message: &'a str,
    pub quick_reply: &'a [QuickReply],
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct FriendSearch<'a> {
    pub bot_id: &'a str,
    pub key_search: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ProfileLookup<'a> {
    pub bot_id: &'a str,
    pub source: &'a str,
}
