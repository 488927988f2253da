//! REST JSON client for pre-v0.22 servers.
//!
//! This generation has no page tokens and no gRPC surface: memos come from
//! `/api/v1/memo` with `limit`/`offset` query parameters, resources from
//! `/api/v1/resource`, and binaries from the resource's external link or the
//! `/o/r/{id}/{filename}` path. Error responses reuse the 200 status with a
//! JSON object (`message`/`msg`/`error`) where an array is expected.

use crate::error::{MemosError, Result};
use crate::types::{BinaryPayload, Memo, Resource};
use chrono::DateTime;
use reqwest::{header, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde_json::Value;

pub(crate) struct LegacyClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyMemo {
    #[serde(default)]
    content: String,
    #[serde(default)]
    created_ts: i64,
    #[serde(default)]
    updated_ts: i64,
    #[serde(default)]
    resource_list: Vec<LegacyResource>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyResource {
    #[serde(default)]
    id: i64,
    #[serde(default)]
    uid: Option<String>,
    #[serde(default)]
    filename: String,
    #[serde(default)]
    external_link: String,
    #[serde(default, rename = "type")]
    mime_type: String,
}

impl From<LegacyResource> for Resource {
    fn from(r: LegacyResource) -> Self {
        Resource {
            name: r.id.to_string(),
            filename: r.filename,
            external_link: r.external_link,
            r#type: r.mime_type,
            uid: r.uid,
        }
    }
}

impl From<LegacyMemo> for Memo {
    fn from(m: LegacyMemo) -> Self {
        Memo {
            content: m.content,
            create_time: DateTime::from_timestamp(m.created_ts, 0),
            update_time: DateTime::from_timestamp(m.updated_ts, 0),
            resources: m.resource_list.into_iter().map(Into::into).collect(),
            attachments: Vec::new(),
        }
    }
}

impl LegacyClient {
    /// Create a client. No I/O happens until the first call.
    pub(crate) fn new(base_url: &str, token: &str) -> Result<Self> {
        Ok(Self {
            http: reqwest::Client::builder().build()?,
            base_url: base_url.to_string(),
            token: token.to_string(),
        })
    }

    // The token is attached per request instead of as a default header so
    // that external-link fetches never carry it to third-party hosts.
    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        if self.token.is_empty() {
            builder
        } else {
            builder.bearer_auth(&self.token)
        }
    }

    /// List one batch of memos, newest first.
    pub(crate) async fn list_memos(&self, limit: u32, offset: u64) -> Result<Vec<Memo>> {
        let url = format!(
            "{}/api/v1/memo?rowStatus=NORMAL&limit={}&offset={}",
            self.base_url, limit, offset
        );
        let response = self.authed(self.http.get(&url)).send().await?;
        let items: Vec<LegacyMemo> = expect_array(&url, response).await?;
        Ok(items.into_iter().map(Into::into).collect())
    }

    pub(crate) async fn list_resources(&self) -> Result<Vec<Resource>> {
        let url = format!("{}/api/v1/resource", self.base_url);
        let response = self.authed(self.http.get(&url)).send().await?;
        let items: Vec<LegacyResource> = expect_array(&url, response).await?;
        Ok(items.into_iter().map(Into::into).collect())
    }

    /// Fetch the binary content behind a resource: the external link when
    /// one is set, the server's `/o/r/` path otherwise.
    pub(crate) async fn fetch_resource(&self, resource: &Resource) -> Result<BinaryPayload> {
        let request = if resource.external_link.is_empty() {
            let id = resource.uid.as_deref().unwrap_or(&resource.name);
            let url = format!(
                "{}/o/r/{}/{}",
                self.base_url,
                id,
                urlencoding::encode(&resource.filename)
            );
            self.authed(self.http.get(&url))
        } else {
            self.http.get(&resource.external_link)
        };

        let response = request.send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(MemosError::NotFound(resource.filename.clone()));
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

/// Decode a legacy list response, which is either the expected JSON array or
/// an error envelope object.
async fn expect_array<T: serde::de::DeserializeOwned>(
    url: &str,
    response: reqwest::Response,
) -> Result<Vec<T>> {
    if response.status() == StatusCode::NOT_FOUND {
        return Err(MemosError::NotFound(url.to_string()));
    }
    if !response.status().is_success() {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        return Err(MemosError::Server { status, message });
    }
    let value: Value = response.json().await?;
    match value {
        Value::Array(_) => Ok(serde_json::from_value(value)?),
        other => Err(MemosError::InvalidResponse(envelope_message(&other))),
    }
}

fn envelope_message(value: &Value) -> String {
    for key in ["message", "msg", "error"] {
        if let Some(text) = value.get(key).and_then(Value::as_str) {
            return text.to_string();
        }
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_memo_maps_to_normalized_shape() {
        let raw: LegacyMemo = serde_json::from_str(
            r#"{
                "content": "note",
                "createdTs": 1714557600,
                "updatedTs": 1714557700,
                "resourceList": [
                    {"id": 7, "filename": "a.png", "externalLink": "", "type": "image/png"}
                ]
            }"#,
        )
        .unwrap();
        let memo: Memo = raw.into();
        assert_eq!(memo.content, "note");
        assert_eq!(memo.create_time.unwrap().timestamp(), 1_714_557_600);
        assert_eq!(memo.resources.len(), 1);
        assert_eq!(memo.resources[0].name, "7");
        assert_eq!(memo.attached_resources()[0].filename, "a.png");
    }

    #[test]
    fn envelope_message_prefers_named_keys() {
        let value: Value = serde_json::from_str(r#"{"message": "bad token"}"#).unwrap();
        assert_eq!(envelope_message(&value), "bad token");
        let value: Value = serde_json::from_str(r#"{"error": "nope"}"#).unwrap();
        assert_eq!(envelope_message(&value), "nope");
        let value: Value = serde_json::from_str(r#"{"weird": true}"#).unwrap();
        assert_eq!(envelope_message(&value), r#"{"weird":true}"#);
    }
}
