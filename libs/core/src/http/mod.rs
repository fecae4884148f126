//! Transport layer shared by every OnePlatform client.
//!
//! A [`TransportRequest`] goes in, a fully buffered [`Response`] comes out.
//! Non-2xx statuses are returned as regular responses; interpreting them is
//! the caller's job.

mod transport;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use transport::ReqwestTransport;

#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    /// Status line in the form `"200 OK"`.
    pub status_text: String,
    /// Case-insensitive; repeated headers keep every value.
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Response {
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        let status_text = format!(
            "{} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown")
        );
        Self {
            status,
            status_text,
            headers,
            body,
        }
    }

    pub fn code(&self) -> u16 {
        self.status.as_u16()
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(&self.body)
    }

    pub fn header_values(&self, name: &str) -> Vec<&str> {
        self.headers
            .get_all(name)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Bytes>,
}

impl TransportRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers.extend(
            headers
                .into_iter()
                .map(|(name, value)| (name.into(), value.into())),
        );
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Returns the first value recorded for `name`, compared case-insensitively.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid request url `{url}`")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid header `{name}`")]
    InvalidHeader { name: String },
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("connection failed")]
    Connect(#[source] reqwest::Error),
    #[error("request failed")]
    Request(#[source] reqwest::Error),
    #[error("failed to read response body")]
    Body(#[source] reqwest::Error),
    #[error("failed to build http client")]
    Build(#[source] reqwest::Error),
}

impl TransportError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Timeout(_))
    }
}

#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: TransportRequest) -> Result<Response, TransportError>;
}

#[async_trait]
impl<T> HttpTransport for Arc<T>
where
    T: HttpTransport + ?Sized,
{
    async fn send(&self, request: TransportRequest) -> Result<Response, TransportError> {
        (**self).send(request).await
    }
}

/// Verb shorthands over [`HttpTransport::send`].
#[async_trait]
pub trait HttpTransportExt: HttpTransport {
    async fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> Result<Response, TransportError> {
        self.send(request(Method::GET, url, headers, None)).await
    }

    async fn post(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: Option<Bytes>,
    ) -> Result<Response, TransportError> {
        self.send(request(Method::POST, url, headers, body)).await
    }

    async fn put(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: Option<Bytes>,
    ) -> Result<Response, TransportError> {
        self.send(request(Method::PUT, url, headers, body)).await
    }

    async fn delete(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: Option<Bytes>,
    ) -> Result<Response, TransportError> {
        self.send(request(Method::DELETE, url, headers, body)).await
    }
}

impl<T> HttpTransportExt for T where T: HttpTransport + ?Sized {}

fn request(
    method: Method,
    url: &str,
    headers: &[(&str, &str)],
    body: Option<Bytes>,
) -> TransportRequest {
    let mut request = TransportRequest::new(method, url).headers(headers.iter().copied());
    request.body = body;
    request
}
