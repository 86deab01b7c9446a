use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{Api, ApiError, Params};

pub const DEFAULT_BASE_URL: &str = "http://api.weatherapi.com/v1/";

const FORMAT: &str = "json";

/// [`Api`] over HTTP GET requests.
#[derive(Debug, Clone)]
pub struct HttpApi {
    api_key: String,
    base_url: String,
    http: Client,
}

impl HttpApi {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        Self { api_key, base_url: normalize_base_url(base_url), http: Client::new() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a method name against the base URL; absolute URLs pass through.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        if is_absolute(endpoint) {
            endpoint.to_string()
        } else {
            format!("{}{}.{FORMAT}", self.base_url, endpoint.trim_start_matches('/'))
        }
    }

    /// Query string for a call: the caller's params, plus `key` for API methods.
    fn query_pairs<'a>(
        &'a self,
        endpoint: &str,
        params: &'a Params,
    ) -> Vec<(&'a str, &'a str)> {
        let mut query: Vec<(&str, &str)> =
            params.iter().map(|(k, v)| (*k, v.as_str())).collect();
        if !is_absolute(endpoint) {
            query.push(("key", self.api_key.as_str()));
        }
        query
    }
}

#[async_trait]
impl Api for HttpApi {
    async fn call(&self, endpoint: &str, params: &Params) -> Result<String, ApiError> {
        let url = self.endpoint_url(endpoint);
        debug!(%url, ?params, "calling weather API");

        let query = self.query_pairs(endpoint, params);

        let res = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|source| request_error(endpoint, source))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| request_error(endpoint, source))?;

        debug!(%url, status = status.as_u16(), bytes = body.len(), "weather API responded");

        if !status.is_success() {
            return Err(error_from_body(status.as_u16(), &body));
        }

        Ok(body)
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: i64,
    message: String,
}

fn error_from_body(status: u16, body: &str) -> ApiError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => ApiError::Remote {
            status,
            code: envelope.error.code,
            message: envelope.error.message,
        },
        Err(_) => ApiError::Status { status, body: truncate_body(body) },
    }
}

/// The request URL carries the API key, so it never ends up in the error.
fn request_error(endpoint: &str, source: reqwest::Error) -> ApiError {
    ApiError::Request { endpoint: endpoint.to_string(), source: source.without_url() }
}

fn is_absolute(endpoint: &str) -> bool {
    endpoint.starts_with("http://") || endpoint.starts_with("https://")
}

fn normalize_base_url(base_url: &str) -> String {
    format!("{}/", base_url.trim_end_matches('/'))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
