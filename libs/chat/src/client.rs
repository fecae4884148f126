use oneplatform_core::api::{ApiRequest, check_status, join_url, parse_json};
use oneplatform_core::{ApiError, ApiResult, HttpTransport, ReqwestTransport, Response, TransportConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::ChatConfig;
use crate::models::{Card, ChoiceKind, Friend, Profile, QuickReply};
use crate::payload::{FriendSearch, MessageContent, ProfileLookup, PushMessage, QuickReplyMessage};

pub const PATH_SEARCH_FRIEND: &str = "/searchfriend";
pub const PATH_PUSH_MESSAGE: &str = "/push_message";
pub const PATH_PUSH_QUICK_REPLY: &str = "/push_quickreply";
pub const PATH_PROFILE: &str = "/getprofile";

#[derive(Debug, Deserialize)]
struct FriendSearchResult {
    #[serde(default)]
    status: String,
    friend: Friend,
}

#[derive(Debug, Deserialize)]
struct ProfileResult {
    #[serde(default)]
    status: String,
    data: Profile,
}

/// OneChat bot client. Every call authenticates with the configured bot token.
#[derive(Debug, Clone)]
pub struct ChatClient<T: HttpTransport = ReqwestTransport> {
    transport: T,
    config: ChatConfig,
}

impl ChatClient<ReqwestTransport> {
    pub fn new(config: ChatConfig) -> ApiResult<Self> {
        Self::with_transport_config(config, &TransportConfig::default())
    }

    pub fn with_transport_config(
        config: ChatConfig,
        transport: &TransportConfig,
    ) -> ApiResult<Self> {
        Ok(Self::with_transport(ReqwestTransport::new(transport)?, config))
    }
}

impl<T: HttpTransport> ChatClient<T> {
    pub fn with_transport(transport: T, config: ChatConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Looks a user up by email, OneID or display name.
    pub async fn find_friend(&self, keyword: &str) -> ApiResult<Friend> {
        if keyword.trim().is_empty() {
            return Err(ApiError::InvalidArgument("search keyword required"));
        }
        let body = FriendSearch {
            bot_id: &self.config.bot_id,
            key_search: keyword,
        };
        let response = self
            .post(join_url(&self.config.endpoint, PATH_SEARCH_FRIEND), &body)
            .await?;
        let result: FriendSearchResult = parse_json("searchfriend", &response)?;
        debug!(status = %result.status, user_id = %result.friend.user_id, "friend found");
        Ok(result.friend)
    }

    pub async fn push_text(
        &self,
        to: &str,
        message: &str,
        custom_notification: Option<&str>,
    ) -> ApiResult<()> {
        self.push(to, MessageContent::Text { message }, custom_notification)
            .await
    }

    /// Template message with a single button opening `card.url` in the browser.
    pub async fn push_link(
        &self,
        to: &str,
        card: &Card,
        custom_notification: Option<&str>,
    ) -> ApiResult<()> {
        let elements = vec![card.to_element(ChoiceKind::Link)];
        self.push(to, MessageContent::Template { elements }, custom_notification)
            .await
    }

    /// Template message with a single button opening `card.url` inside the chat webview.
    pub async fn push_webview(
        &self,
        to: &str,
        card: &Card,
        custom_notification: Option<&str>,
    ) -> ApiResult<()> {
        let elements = vec![card.to_element(ChoiceKind::Webview)];
        self.push(to, MessageContent::Template { elements }, custom_notification)
            .await
    }

    pub async fn push_quick_reply(
        &self,
        to: &str,
        message: &str,
        replies: &[QuickReply],
    ) -> ApiResult<()> {
        require_recipient(to)?;
        let body = QuickReplyMessage {
            to,
            bot_id: &self.config.bot_id,
            message,
            quick_reply: replies,
        };
        let response = self
            .post(join_url(&self.config.endpoint, PATH_PUSH_QUICK_REPLY), &body)
            .await?;
        check_status("push_quickreply", &response)?;
        info!(to, replies = replies.len(), "pushed quick reply");
        Ok(())
    }

    /// Resolves the profile behind a user's OneChat token.
    pub async fn profile(&self, one_chat_token: &str) -> ApiResult<Profile> {
        if one_chat_token.trim().is_empty() {
            return Err(ApiError::InvalidArgument("chat token required"));
        }
        let body = ProfileLookup {
            bot_id: &self.config.bot_id,
            source: one_chat_token,
        };
        let response = self
            .post(join_url(&self.config.manage_endpoint, PATH_PROFILE), &body)
            .await?;
        let result: ProfileResult = parse_json("getprofile", &response)?;
        debug!(status = %result.status, account_id = %result.data.account_id, "chat profile resolved");
        Ok(result.data)
    }

    async fn push(
        &self,
        to: &str,
        content: MessageContent<'_>,
        custom_notification: Option<&str>,
    ) -> ApiResult<()> {
        require_recipient(to)?;
        let kind = content.kind();
        let body = PushMessage {
            to,
            bot_id: &self.config.bot_id,
            content,
            custom_notification,
        };
        let response = self
            .post(join_url(&self.config.endpoint, PATH_PUSH_MESSAGE), &body)
            .await?;
        check_status("push_message", &response)?;
        info!(to, kind, "pushed chat message");
        Ok(())
    }

    async fn post<P: Serialize>(&self, url: String, body: &P) -> ApiResult<Response> {
        ApiRequest::post(url)
            .bearer(&self.config.token)
            .json(body)?
            .send(&self.transport)
            .await
    }
}

fn require_recipient(to: &str) -> ApiResult<()> {
    if to.trim().is_empty() {
        return Err(ApiError::InvalidArgument("recipient required"));
    }
    Ok(())
}
