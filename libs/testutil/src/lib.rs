//! Test helpers shared by the OnePlatform SDK crates.
//!
//! [`MockServer`] binds an axum app on `127.0.0.1:0`, answers from a list of [`Stub`]s and
//! records every request it receives so tests can assert on the exact wire payload.

mod assertions;
mod mock_server;

pub use assertions::{assert_json_includes, json_includes};
pub use mock_server::{CapturedRequest, MockServer, Stub};
