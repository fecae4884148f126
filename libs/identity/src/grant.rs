use std::fmt;

use serde::Serialize;

use crate::config::IdentityConfig;

pub const PATH_PASSWORD: &str = "/api/oauth/getpwd";
pub const PATH_REFRESH_TOKEN: &str = "/api/oauth/get_refresh_token";
pub const PATH_AUTHORIZATION_CODE: &str = "/oauth/token";

/// OAuth flow variant, serialized with its `grant_type` tag.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "grant_type", rename_all = "snake_case")]
pub enum Grant<'a> {
    Password {
        username: &'a str,
        password: &'a str,
    },
    RefreshToken {
        refresh_token: &'a str,
    },
    AuthorizationCode {
        code: &'a str,
        scope: &'a str,
    },
}

impl Grant<'_> {
    pub fn grant_type(&self) -> &'static str {
        match self {
            Grant::Password { .. } => "password",
            Grant::RefreshToken { .. } => "refresh_token",
            Grant::AuthorizationCode { .. } => "authorization_code",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Grant::Password { .. } => PATH_PASSWORD,
            Grant::RefreshToken { .. } => PATH_REFRESH_TOKEN,
            Grant::AuthorizationCode { .. } => PATH_AUTHORIZATION_CODE,
        }
    }
}

impl fmt::Debug for Grant<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grant::Password { username, .. } => f
                .debug_struct("Password")
                .field("username", username)
                .finish_non_exhaustive(),
            Grant::RefreshToken { .. } => f.debug_struct("RefreshToken").finish_non_exhaustive(),
            Grant::AuthorizationCode { scope, .. } => f
                .debug_struct("AuthorizationCode")
                .field("scope", scope)
                .finish_non_exhaustive(),
        }
    }
}

/// Token request body: the grant fields plus the application credentials.
#[derive(Clone, Serialize)]
pub struct GrantRequest<'a> {
    #[serde(flatten)]
    pub grant: Grant<'a>,
    pub client_id: &'a str,
    pub client_secret: &'a str,
}

impl<'a> GrantRequest<'a> {
    pub fn new(config: &'a IdentityConfig, grant: Grant<'a>) -> Self {
        Self {
            grant,
            client_id: &config.client_id,
            client_secret: &config.client_secret,
        }
    }
}

impl fmt::Debug for GrantRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrantRequest")
            .field("grant", &self.grant)
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}
