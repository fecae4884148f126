use oneplatform_core::BearerToken;
use oneplatform_identity::AuthenticationResult;

/// Token pair the directory client authenticates with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrgCredentials {
    pub token: BearerToken,
    pub refresh_token: String,
}

impl OrgCredentials {
    pub fn new(token: BearerToken, refresh_token: impl Into<String>) -> Self {
        Self {
            token,
            refresh_token: refresh_token.into(),
        }
    }
}

impl From<&AuthenticationResult> for OrgCredentials {
    fn from(result: &AuthenticationResult) -> Self {
        Self::new(result.bearer(), result.refresh_token.clone())
    }
}

impl From<AuthenticationResult> for OrgCredentials {
    fn from(result: AuthenticationResult) -> Self {
        Self::from(&result)
    }
}

/// How [`crate::OrgClient::sign_in`] obtains its first token.
#[derive(Clone, Copy)]
pub enum OrgSignIn<'a> {
    Password { username: &'a str, password: &'a str },
    RefreshToken(&'a str),
}

impl std::fmt::Debug for OrgSignIn<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrgSignIn::Password { username, .. } => f
                .debug_struct("Password")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            OrgSignIn::RefreshToken(_) => f.debug_tuple("RefreshToken").field(&"<redacted>").finish(),
        }
    }
}
