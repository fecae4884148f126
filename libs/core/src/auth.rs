use std::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_TOKEN_TYPE: &str = "Bearer";

/// Credentials rendered into `Authorization: <token_type> <access_token>`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BearerToken {
    pub token_type: String,
    pub access_token: String,
}

impl BearerToken {
    pub fn new(token_type: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            token_type: token_type.into(),
            access_token: access_token.into(),
        }
    }

    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self::new(DEFAULT_TOKEN_TYPE, access_token)
    }

    pub fn header_value(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }

    pub fn is_empty(&self) -> bool {
        self.token_type.trim().is_empty() || self.access_token.trim().is_empty()
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerToken")
            .field("token_type", &self.token_type)
            .field("access_token", &"<redacted>")
            .finish()
    }
}
