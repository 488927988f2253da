//! Minimal unary gRPC-web transport over plain HTTP.
//!
//! A unary call is an HTTP POST of one length-prefixed frame
//! (`0x00` flag byte + u32 big-endian length + protobuf payload) with
//! `Content-Type: application/grpc-web+proto`. The response carries data
//! frames (high flag bit clear) and at most one trailer frame (flag `0x80`)
//! holding `grpc-status` / `grpc-message` as header-style text lines.

use crate::error::{MemosError, Result};
use crate::transport::build_http_client;
use prost::Message;
use reqwest::{header, StatusCode};

const GRPC_WEB_CONTENT_TYPE: &str = "application/grpc-web+proto";

/// One gRPC-web channel: shared HTTP client, base URL and service package
/// prefix (`memos.api.v2` for v0.22 servers, `memos.api.v1` afterwards).
pub struct GrpcWebChannel {
    http: reqwest::Client,
    base_url: String,
    package: &'static str,
}

impl GrpcWebChannel {
    /// Create a channel. No network I/O happens here; the connection is
    /// established lazily on the first call.
    pub fn new(base_url: &str, token: &str, package: &'static str) -> Result<Self> {
        Ok(Self {
            http: build_http_client(token)?,
            base_url: base_url.to_string(),
            package,
        })
    }

    /// Issue a unary call, e.g. `unary("MemoService", "ListMemos", &req)`.
    pub async fn unary<Req, Resp>(&self, service: &str, method: &str, request: &Req) -> Result<Resp>
    where
        Req: Message,
        Resp: Message + Default,
    {
        let url = format!("{}/{}.{}/{}", self.base_url, self.package, service, method);
        let response = self
            .http
            .post(&url)
            .header(header::CONTENT_TYPE, GRPC_WEB_CONTENT_TYPE)
            .header(header::ACCEPT, GRPC_WEB_CONTENT_TYPE)
            .header("x-grpc-web", "1")
            .body(encode_frame(request))
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

        // Some servers report the call status as plain response headers
        // instead of a trailer frame.
        if let Some(code) = header_grpc_status(response.headers()) {
            let message = response
                .headers()
                .get("grpc-message")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            status_to_result(code, message)?;
        }

        let body = response.bytes().await?;
        decode_unary(&body)
    }
}

/// Encode one protobuf message as a single gRPC-web data frame.
pub(crate) fn encode_frame<M: Message>(message: &M) -> Vec<u8> {
    let payload = message.encode_to_vec();
    let mut framed = Vec::with_capacity(payload.len() + 5);
    framed.push(0);
    framed.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    framed.extend_from_slice(&payload);
    framed
}

/// Decode a unary response body: first data frame is the message, the
/// trailer frame (if present) carries the call status.
pub(crate) fn decode_unary<Resp: Message + Default>(body: &[u8]) -> Result<Resp> {
    let mut message: Option<Resp> = None;
    let mut offset = 0usize;

    while body.len().saturating_sub(offset) >= 5 {
        let flag = body[offset];
        let len = u32::from_be_bytes([
            body[offset + 1],
            body[offset + 2],
            body[offset + 3],
            body[offset + 4],
        ]) as usize;
        let start = offset + 5;
        let end = start + len;
        if body.len() < end {
            return Err(MemosError::InvalidResponse(
                "truncated gRPC-web frame".to_string(),
            ));
        }
        let frame = &body[start..end];
        if flag & 0x80 != 0 {
            check_trailers(frame)?;
        } else if message.is_none() {
            message = Some(Resp::decode(frame)?);
        }
        offset = end;
    }

    message.ok_or_else(|| {
        MemosError::InvalidResponse("gRPC-web response had no message frame".to_string())
    })
}

fn check_trailers(frame: &[u8]) -> Result<()> {
    let text = String::from_utf8_lossy(frame);
    let mut code = 0u32;
    let mut message = String::new();
    for line in text.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        match key.trim().to_ascii_lowercase().as_str() {
            // UNKNOWN (2) on an unparseable status
            "grpc-status" => code = value.trim().parse().unwrap_or(2),
            "grpc-message" => message = value.trim().to_string(),
            _ => {}
        }
    }
    status_to_result(code, message)
}

fn status_to_result(code: u32, message: String) -> Result<()> {
    match code {
        0 => Ok(()),
        // NOT_FOUND / UNIMPLEMENTED: the service is absent on this server
        5 | 12 => Err(MemosError::NotFound(if message.is_empty() {
            format!("gRPC status {code}")
        } else {
            message
        })),
        _ => Err(MemosError::Grpc { code, message }),
    }
}

fn header_grpc_status(headers: &header::HeaderMap) -> Option<u32> {
    headers
        .get("grpc-status")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}
