use std::fmt;

use oneplatform_core::config::{ConfigError, env_lookup, require};

pub const DEFAULT_ENDPOINT: &str = "https://one.th";

pub const ENV_CLIENT_ID: &str = "ONEID_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "ONEID_CLIENT_SECRET";
pub const ENV_REF_CODE: &str = "ONEID_REF_CODE";
pub const ENV_CALLBACK_URL: &str = "ONEID_CALLBACK_URL";
pub const ENV_ENDPOINT: &str = "ONEID_ENDPOINT";

/// Application credentials registered with OneID.
#[derive(Clone, Eq, PartialEq)]
pub struct IdentityConfig {
    pub client_id: String,
    pub client_secret: String,
    pub ref_code: String,
    pub callback_url: String,
    pub endpoint: String,
}

impl IdentityConfig {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            ref_code: String::new(),
            callback_url: String::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    pub fn with_ref_code(mut self, ref_code: impl Into<String>) -> Self {
        self.ref_code = ref_code.into();
        self
    }

    pub fn with_callback_url(mut self, callback_url: impl Into<String>) -> Self {
        self.callback_url = callback_url.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new(
            require(&lookup, ENV_CLIENT_ID)?,
            require(&lookup, ENV_CLIENT_SECRET)?,
        );
        if let Some(ref_code) = lookup(ENV_REF_CODE) {
            config.ref_code = ref_code;
        }
        if let Some(callback_url) = lookup(ENV_CALLBACK_URL) {
            config.callback_url = callback_url;
        }
        if let Some(endpoint) = lookup(ENV_ENDPOINT) {
            config.endpoint = endpoint;
        }
        Ok(config)
    }
}

impl fmt::Debug for IdentityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("ref_code", &self.ref_code)
            .field("callback_url", &self.callback_url)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}
