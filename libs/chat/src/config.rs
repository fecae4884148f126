use oneplatform_core::BearerToken;
use oneplatform_core::auth::DEFAULT_TOKEN_TYPE;
use oneplatform_core::config::{ConfigError, env_lookup, require};

pub const DEFAULT_ENDPOINT: &str = "https://chat-api.one.th/message/api/v1";
pub const DEFAULT_MANAGE_ENDPOINT: &str = "https://chat-api.one.th/manage/api/v1";

pub const ENV_BOT_ID: &str = "ONECHAT_BOT_ID";
pub const ENV_TOKEN: &str = "ONECHAT_TOKEN";
pub const ENV_TOKEN_TYPE: &str = "ONECHAT_TOKEN_TYPE";
pub const ENV_ENDPOINT: &str = "ONECHAT_ENDPOINT";
pub const ENV_MANAGE_ENDPOINT: &str = "ONECHAT_MANAGE_ENDPOINT";

/// Bot identity and the two chat API roots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatConfig {
    pub bot_id: String,
    pub token: BearerToken,
    pub endpoint: String,
    pub manage_endpoint: String,
}

impl ChatConfig {
    pub fn new(bot_id: impl Into<String>, token: BearerToken) -> Self {
        Self {
            bot_id: bot_id.into(),
            token,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            manage_endpoint: DEFAULT_MANAGE_ENDPOINT.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_manage_endpoint(mut self, manage_endpoint: impl Into<String>) -> Self {
        self.manage_endpoint = manage_endpoint.into();
        self
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token_type = lookup(ENV_TOKEN_TYPE).unwrap_or_else(|| DEFAULT_TOKEN_TYPE.to_string());
        let token = BearerToken::new(token_type, require(&lookup, ENV_TOKEN)?);
        let mut config = Self::new(require(&lookup, ENV_BOT_ID)?, token);
        if let Some(endpoint) = lookup(ENV_ENDPOINT) {
            config.endpoint = endpoint;
        }
        if let Some(manage_endpoint) = lookup(ENV_MANAGE_ENDPOINT) {
            config.manage_endpoint = manage_endpoint;
        }
        Ok(config)
    }
}
