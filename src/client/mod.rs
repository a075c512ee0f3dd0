//! Fetch capability over the remote social-graph API
//!
//! - `api` - the `SocialGraphClient` trait, error type, identity check
//! - `http` - the reqwest-backed implementation

pub mod api;
pub mod http;

pub use api::{validate_identity, FetchError, SocialGraphClient};
pub use http::HttpSocialGraphClient;
