use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Canned response for one method + path.
#[derive(Debug, Clone)]
pub struct Stub {
    method: Method,
    path: String,
    status: StatusCode,
    body: Bytes,
    headers: Vec<(String, String)>,
    delay: Option<Duration>,
}

impl Stub {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            status: StatusCode::OK,
            body: Bytes::new(),
            headers: Vec::new(),
            delay: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn status(mut self, status: u16) -> Self {
        self.status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Bytes::from(body.to_string());
        self.header("content-type", "application/json")
    }

    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.body = Bytes::from(body.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Holds the response back; used to exercise client timeouts.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    fn matches(&self, method: &Method, path: &str) -> bool {
        &self.method == method && self.path == path
    }
}

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    pub fn header_values(&self, name: &str) -> Vec<&str> {
        self.headers
            .get_all(name)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect()
    }

    /// Body parsed as JSON, `Value::Null` when empty or not JSON.
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }
}

struct Shared {
    stubs: Vec<Stub>,
    captured: Mutex<Vec<CapturedRequest>>,
}

pub struct MockServer {
    addr: SocketAddr,
    shared: Arc<Shared>,
    handle: JoinHandle<()>,
}

impl MockServer {
    pub async fn start(stubs: Vec<Stub>) -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .context("bind mock server on localhost")?;
        let addr = listener
            .local_addr()
            .context("resolve mock server address")?;
        let shared = Arc::new(Shared {
            stubs,
            captured: Mutex::new(Vec::new()),
        });
        let app = Router::new().fallback(respond).with_state(shared.clone());
        let handle = tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, app).await {
                eprintln!("mock server error: {err}");
            }
        });
        Ok(Self {
            addr,
            shared,
            handle,
        })
    }

    /// Like [`MockServer::start`], but returns `None` when binding localhost is not
    /// permitted so the calling test can skip itself.
    pub async fn try_start(stubs: Vec<Stub>) -> Option<Self> {
        match Self::start(stubs).await {
            Ok(server) => Some(server),
            Err(err) => {
                eprintln!("skipping: {err:#}");
                None
            }
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url(), path.trim_start_matches('/'))
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.shared
            .captured
            .lock()
            .expect("mock server capture lock")
            .clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<CapturedRequest> {
        self.requests()
            .into_iter()
            .filter(|request| request.path == path)
            .collect()
    }

    /// The only request received; panics when there were zero or several.
    pub fn single_request(&self) -> CapturedRequest {
        let mut requests = self.requests();
        assert_eq!(
            requests.len(),
            1,
            "expected exactly one request, got {requests:?}"
        );
        requests.remove(0)
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn respond(
    State(shared): State<Arc<Shared>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    shared
        .captured
        .lock()
        .expect("mock server capture lock")
        .push(CapturedRequest {
            method: method.clone(),
            path: path.clone(),
            query: uri.query().map(str::to_string),
            headers,
            body,
        });

    let Some(stub) = shared
        .stubs
        .iter()
        .find(|stub| stub.matches(&method, &path))
        .cloned()
    else {
        return (StatusCode::NOT_FOUND, format!("no stub for {method} {path}")).into_response();
    };

    if let Some(delay) = stub.delay {
        tokio::time::sleep(delay).await;
    }

    let mut response = (stub.status, stub.body).into_response();
    for (name, value) in &stub.headers {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            response.headers_mut().append(name, value);
        }
    }
    response
}
