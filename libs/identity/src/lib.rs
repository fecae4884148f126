//! OneID client for the OnePlatform SDK.
//!
//! Covers the three OAuth grants OneID accepts (password, refresh token, authorization code),
//! account profile lookup with a bearer token, and the login URL used to start the
//! authorization-code flow.
pub mod client;
pub mod config;
pub mod grant;
pub mod models;

pub use client::IdentityClient;
pub use config::IdentityConfig;
pub use grant::{Grant, GrantRequest};
pub use models::{AccountProfile, AuthenticationResult, Email, Employee, Mobile};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
