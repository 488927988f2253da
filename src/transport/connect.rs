//! Connect-protocol JSON transport plus the raw file endpoint.
//!
//! The newest server generation accepts its RPCs as plain JSON POSTs to
//! `{base}/{package}.{Service}/{Method}` and serves attachment binaries from
//! `{base}/file/{name}/{filename}` (the gRPC binary method was removed).
//! The original client picked these endpoints specifically to route around
//! browser CORS restrictions; here they are ordinary HTTP calls.

use crate::error::{MemosError, Result};
use crate::transport::build_http_client;
use crate::types::BinaryPayload;
use reqwest::{header, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Connect-JSON channel for one server.
pub struct ConnectChannel {
    http: reqwest::Client,
    base_url: String,
}

impl ConnectChannel {
    /// Create a channel. All I/O is deferred to the first call.
    pub fn new(base_url: &str, token: &str) -> Result<Self> {
        Ok(Self {
            http: build_http_client(token)?,
            base_url: base_url.to_string(),
        })
    }

    /// POST one RPC as JSON, e.g. `post("AttachmentService", "ListAttachments", &req)`.
    pub async fn post<Req, Resp>(&self, service: &str, method: &str, request: &Req) -> Result<Resp>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let url = format!("{}/memos.api.v1.{}/{}", self.base_url, service, method);
        let response = self
            .http
            .post(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(MemosError::NotFound(url));
        }
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(MemosError::Server { status, message });
        }
        Ok(response.json().await?)
    }

    /// GET `{base}/file/{name}/{filename}` with the channel's credentials.
    pub async fn get_file(&self, name: &str, filename: &str) -> Result<BinaryPayload> {
        let url = format!(
            "{}/file/{}/{}",
            self.base_url,
            name,
            urlencoding::encode(filename)
        );
        let response = self.http.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(MemosError::NotFound(url));
        }
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(MemosError::Server { status, message });
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = response.bytes().await?.to_vec();
        Ok(BinaryPayload { content_type, data })
    }
}
