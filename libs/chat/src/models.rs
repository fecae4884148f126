use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Friend {
    #[serde(default)]
    pub one_email: String,
    pub user_id: String,
    #[serde(rename = "one_id", default)]
    pub account_id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(rename = "one_id")]
    pub account_id: String,
    #[serde(rename = "profilepicture", default)]
    pub profile_picture: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChoiceKind {
    Link,
    Webview,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub label: String,
    #[serde(rename = "type")]
    pub kind: ChoiceKind,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

/// One card of a template message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub image: String,
    pub title: String,
    pub detail: String,
    #[serde(rename = "choice")]
    pub choices: Vec<Choice>,
}

/// Single-button card used by link and webview pushes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Card {
    pub label: String,
    pub url: String,
    pub image: String,
    pub title: String,
    pub detail: String,
}

impl Card {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    /// Webview buttons always open full size.
    pub fn to_element(&self, kind: ChoiceKind) -> Element {
        let size = match kind {
            ChoiceKind::Webview => Some("full".to_string()),
            ChoiceKind::Link => None,
        };
        Element {
            image: self.image.clone(),
            title: self.title.clone(),
            detail: self.detail.clone(),
            choices: vec![Choice {
                label: self.label.clone(),
                kind,
                url: self.url.clone(),
                size,
            }],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuickReply {
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    #[serde(default)]
    pub payload: Value,
}

impl QuickReply {
    pub fn text(label: impl Into<String>, message: impl Into<String>, payload: Value) -> Self {
        Self {
            label: label.into(),
            kind: "text".to_string(),
            message: message.into(),
            payload,
        }
    }
}
