//! Shared plumbing for the OnePlatform SDK.
//!
//! The [`http`] module is the single transport every client goes through; [`api`] holds the
//! request and status conventions the OnePlatform endpoints share.
pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod http;

pub use api::{ApiRequest, CONTENT_TYPE_JSON, check_status, decode_json, join_url, parse_json};
pub use auth::BearerToken;
pub use config::{ConfigError, TransportConfig};
pub use error::{ApiError, ApiResult};
pub use crate::http::{
    HttpTransport, HttpTransportExt, ReqwestTransport, Response, TransportError, TransportRequest,
};

/// Returns the semantic version advertised by this crate.
///
/// ```
/// assert_eq!(oneplatform_core::version(), env!("CARGO_PKG_VERSION"));
/// ```
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
