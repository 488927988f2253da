//! Wire transports shared by the client bundles.
//!
//! Each bundle owns exactly one channel; paginators and fetchers borrow it
//! through an `Arc` and never reconfigure it after construction.

pub mod connect;
pub mod grpc_web;

pub use connect::ConnectChannel;
pub use grpc_web::GrpcWebChannel;

use crate::error::{MemosError, Result};
use reqwest::header::{self, HeaderMap, HeaderValue};

/// Build a reqwest client with the bearer token installed as a default
/// header, so every call on the channel is authenticated consistently.
pub(crate) fn build_http_client(token: &str) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    if !token.is_empty() {
        let value = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| MemosError::Config("API token is not a valid header value".to_string()))?;
        headers.insert(header::AUTHORIZATION, value);
    }
    let client = reqwest::Client::builder().default_headers(headers).build()?;
    Ok(client)
}
