use async_trait::async_trait;
use std::{collections::BTreeMap, fmt::Debug};
use thiserror::Error;

pub mod http;

pub use http::HttpApi;

/// Query parameters for a single call, keyed by wire name.
pub type Params = BTreeMap<&'static str, String>;

/// Errors raised while talking to the remote API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Failed to send request to {endpoint}: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with its own error payload.
    #[error("API error {code} (HTTP {status}): {message}")]
    Remote { status: u16, code: i64, message: String },

    #[error("Request failed with status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Transport used by the facade.
///
/// `endpoint` is either a method name such as `"current"` or an absolute URL.
#[async_trait]
pub trait Api: Send + Sync + Debug {
    async fn call(&self, endpoint: &str, params: &Params) -> Result<String, ApiError>;
}
