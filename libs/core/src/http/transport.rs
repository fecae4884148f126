use std::time::{Duration, Instant};

use async_trait::async_trait;
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use metrics::{counter, histogram};
use reqwest::{Client, Url};
use tracing::{debug, warn};

use super::{HttpTransport, Response, TransportError, TransportRequest};
use crate::config::TransportConfig;

/// [`HttpTransport`] backed by a single `reqwest::Client`.
///
/// TLS verification and the total-request timeout are fixed when the
/// transport is built; two transports never share either setting.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    timeout: Duration,
    allow_insecure_tls: bool,
}

impl ReqwestTransport {
    pub fn new(config: &TransportConfig) -> Result<Self, TransportError> {
        let mut builder = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone());
        if config.allow_insecure_tls {
            warn!("tls certificate verification disabled for this transport");
            builder = builder.danger_accept_invalid_certs(true);
        }
        let client = builder.build().map_err(TransportError::Build)?;
        Ok(Self {
            client,
            timeout: config.timeout,
            allow_insecure_tls: config.allow_insecure_tls,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether this transport accepts invalid TLS certificates.
    pub fn allows_insecure_tls(&self) -> bool {
        self.allow_insecure_tls
    }

    fn classify(&self, err: reqwest::Error, method: &Method, url: &Url) -> TransportError {
        warn!(%method, %url, error = %err, "http request failed");
        counter!(
            "oneplatform_http_errors_total",
            "method" => method.to_string()
        )
        .increment(1);
        if err.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else if err.is_connect() {
            TransportError::Connect(err)
        } else {
            TransportError::Request(err)
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<Response, TransportError> {
        let url = Url::parse(&request.url).map_err(|source| TransportError::InvalidUrl {
            url: request.url.clone(),
            source,
        })?;
        let headers = header_map(&request.headers)?;
        let method = request.method;

        let mut builder = self
            .client
            .request(method.clone(), url.clone())
            .headers(headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        debug!(%method, %url, "sending http request");
        let started = Instant::now();
        let response = builder
            .send()
            .await
            .map_err(|err| self.classify(err, &method, &url))?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(|err| {
            if err.is_timeout() {
                TransportError::Timeout(self.timeout)
            } else {
                TransportError::Body(err)
            }
        })?;

        histogram!(
            "oneplatform_http_roundtrip_seconds",
            "method" => method.to_string()
        )
        .record(started.elapsed().as_secs_f64());
        counter!(
            "oneplatform_http_requests_total",
            "method" => method.to_string(),
            "status" => status.as_str().to_string()
        )
        .increment(1);
        debug!(
            %method,
            %url,
            status = status.as_u16(),
            bytes = body.len(),
            "received http response"
        );

        Ok(Response::new(status, headers, body))
    }
}

fn header_map(headers: &[(String, String)]) -> Result<HeaderMap, TransportError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let invalid = || TransportError::InvalidHeader { name: name.clone() };
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
        let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
        map.append(header_name, header_value);
    }
    Ok(map)
}
