use oneplatform_core::api::{ApiRequest, join_url, parse_json};
use oneplatform_core::{
    ApiError, ApiResult, BearerToken, HttpTransport, ReqwestTransport, TransportConfig,
};
use tracing::{debug, info};

use crate::config::IdentityConfig;
use crate::grant::{Grant, GrantRequest};
use crate::models::{AccountProfile, AuthenticationResult};

pub const PATH_PROFILE: &str = "/api/account";
pub const PATH_LOGIN: &str = "/api/oauth/getcode";

const RESPONSE_TYPE: &str = "authorization_code";

/// OneID client over any [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct IdentityClient<T: HttpTransport = ReqwestTransport> {
    transport: T,
    config: IdentityConfig,
}

impl IdentityClient<ReqwestTransport> {
    pub fn new(config: IdentityConfig) -> ApiResult<Self> {
        Self::with_transport_config(config, &TransportConfig::default())
    }

    pub fn with_transport_config(
        config: IdentityConfig,
        transport: &TransportConfig,
    ) -> ApiResult<Self> {
        Ok(Self::with_transport(ReqwestTransport::new(transport)?, config))
    }
}

impl<T: HttpTransport> IdentityClient<T> {
    pub fn with_transport(transport: T, config: IdentityConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &IdentityConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn version(&self) -> &'static str {
        crate::version()
    }

    pub async fn login(&self, username: &str, password: &str) -> ApiResult<AuthenticationResult> {
        self.grant(Grant::Password { username, password }).await
    }

    pub async fn refresh_token(&self, refresh_token: &str) -> ApiResult<AuthenticationResult> {
        if refresh_token.trim().is_empty() {
            return Err(ApiError::InvalidArgument("refresh token required"));
        }
        self.grant(Grant::RefreshToken { refresh_token }).await
    }

    pub async fn verify_authorization_code(&self, code: &str) -> ApiResult<AuthenticationResult> {
        if code.trim().is_empty() {
            return Err(ApiError::InvalidArgument("authorization code required"));
        }
        self.grant(Grant::AuthorizationCode { code, scope: "" })
            .await
    }

    /// Posts `grant` to its token endpoint.
    pub async fn grant(&self, grant: Grant<'_>) -> ApiResult<AuthenticationResult> {
        let grant_type = grant.grant_type();
        let url = join_url(&self.config.endpoint, grant.path());
        let body = GrantRequest::new(&self.config, grant);
        info!(grant_type, "requesting oneid token");

        let response = ApiRequest::post(url)
            .json(&body)?
            .send(&self.transport)
            .await?;
        let result: AuthenticationResult = parse_json(grant_type, &response)?;
        debug!(
            grant_type,
            account_id = %result.account_id,
            expires_in = result.expires_in,
            "oneid token issued"
        );
        Ok(result)
    }

    pub async fn profile(&self, token: &BearerToken) -> ApiResult<AccountProfile> {
        if token.is_empty() {
            return Err(ApiError::InvalidArgument("login required"));
        }
        let response = ApiRequest::get(join_url(&self.config.endpoint, PATH_PROFILE))
            .bearer(token)
            .send(&self.transport)
            .await?;
        parse_json("profile", &response)
    }

    /// Authorization page the user is sent to for the authorization-code flow.
    pub fn login_url(&self) -> String {
        format!(
            "{}?client_id={}&response_type={}&scope=",
            join_url(&self.config.endpoint, PATH_LOGIN),
            urlencoding::encode(&self.config.client_id),
            RESPONSE_TYPE,
        )
    }

    /// `302 Found` pointing at [`IdentityClient::login_url`].
    #[cfg(feature = "axum")]
    pub fn login_redirect(&self) -> axum::response::Response {
        use axum::http::{StatusCode, header};
        use axum::response::IntoResponse;

        (StatusCode::FOUND, [(header::LOCATION, self.login_url())]).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use oneplatform_core::{Response, TransportError, TransportRequest};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingTransport {
        sent: Arc<Mutex<Vec<TransportRequest>>>,
    }

    #[async_trait]
    impl HttpTransport for RecordingTransport {
        async fn send(&self, request: TransportRequest) -> Result<Response, TransportError> {
            self.sent.lock().unwrap().push(request);
            Err(TransportError::Timeout(std::time::Duration::from_secs(5)))
        }
    }

    fn client() -> (IdentityClient<RecordingTransport>, RecordingTransport) {
        let transport = RecordingTransport::default();
        let client = IdentityClient::with_transport(
            transport.clone(),
            IdentityConfig::new("client 1", "secret").with_endpoint("https://oneid.test/"),
        );
        (client, transport)
    }

    #[test]
    fn login_url_encodes_client_id() {
        let (client, _) = client();
        assert_eq!(
            client.login_url(),
            "https://oneid.test/api/oauth/getcode?client_id=client%201&response_type=authorization_code&scope="
        );
    }

    #[tokio::test]
    async fn empty_code_is_rejected_locally() {
        let (client, transport) = client();
        for code in ["", "  "] {
            let err = client.verify_authorization_code(code).await.unwrap_err();
            assert_eq!(err.to_string(), "authorization code required");
        }
        let err = client.refresh_token(" ").await.unwrap_err();
        assert_eq!(err.to_string(), "refresh token required");
        assert!(transport.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn profile_requires_token() {
        let (client, transport) = client();
        let err = client
            .profile(&BearerToken::new("", "token"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "login required");
        assert!(transport.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn transport_errors_propagate_unchanged() {
        let (client, transport) = client();
        let err = client.login("alice", "pw").await.unwrap_err();
        assert!(err.is_transport());
        assert!(matches!(
            err,
            ApiError::Transport(TransportError::Timeout(_))
        ));
        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].url, "https://oneid.test/api/oauth/getpwd");
    }

    #[cfg(feature = "axum")]
    #[test]
    fn login_redirect_is_302() {
        let (client, _) = client();
        let response = client.login_redirect();
        assert_eq!(response.status(), axum::http::StatusCode::FOUND);
        assert_eq!(
            response.headers()[axum::http::header::LOCATION],
            client.login_url().as_str()
        );
    }
}
