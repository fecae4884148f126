//! Request/response conventions shared by the identity, chat and organize clients.

use http::Method;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::auth::BearerToken;
use crate::error::{ApiError, ApiResult};
use crate::http::{HttpTransport, Response, TransportRequest};

pub const CONTENT_TYPE_JSON: &str = "application/json";

const MAX_ERROR_MESSAGE: usize = 512;

/// JSON request with the headers every OnePlatform endpoint expects.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    inner: TransportRequest,
}

impl ApiRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            inner: TransportRequest::new(method, url)
                .header(CONTENT_TYPE.as_str(), CONTENT_TYPE_JSON),
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    pub fn bearer(mut self, token: &BearerToken) -> Self {
        self.inner = self
            .inner
            .header(AUTHORIZATION.as_str(), token.header_value());
        self
    }

    pub fn json<P>(mut self, payload: &P) -> ApiResult<Self>
    where
        P: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(payload).map_err(ApiError::Encode)?;
        self.inner = self.inner.body(body);
        Ok(self)
    }

    pub fn as_transport(&self) -> &TransportRequest {
        &self.inner
    }

    pub fn into_transport(self) -> TransportRequest {
        self.inner
    }

    pub async fn send<T>(self, transport: &T) -> ApiResult<Response>
    where
        T: HttpTransport + ?Sized,
    {
        Ok(transport.send(self.inner).await?)
    }
}

/// Any 2xx status is success; everything else becomes [`ApiError::Status`].
pub fn check_status(endpoint: &'static str, response: &Response) -> ApiResult<()> {
    if response.is_success() {
        return Ok(());
    }
    let body = response.text();
    let message = error_message(&body);
    warn!(
        endpoint,
        status = response.code(),
        message = %message,
        "api returned error status"
    );
    Err(ApiError::Status {
        status: response.status,
        message,
        body,
    })
}

pub fn decode_json<T>(endpoint: &'static str, response: &Response) -> ApiResult<T>
where
    T: DeserializeOwned,
{
    response.json::<T>().map_err(|source| ApiError::Decode {
        endpoint,
        status: response.status,
        body: response.text(),
        source,
    })
}

/// [`check_status`] followed by [`decode_json`].
pub fn parse_json<T>(endpoint: &'static str, response: &Response) -> ApiResult<T>
where
    T: DeserializeOwned,
{
    check_status(endpoint, response)?;
    decode_json(endpoint, response)
}

pub fn join_url(base: &str, path: &str) -> String {
    if path.is_empty() {
        return base.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn error_message(body: &str) -> String {
    let from_json = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| match value.get("errorMessage") {
            Some(Value::String(text)) => Some(text.clone()),
            Some(Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        });
    let message = from_json.unwrap_or_else(|| body.trim().to_string());
    truncate(message, MAX_ERROR_MESSAGE)
}

fn truncate(mut text: String, max: usize) -> String {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text.truncate(end);
    text
}
