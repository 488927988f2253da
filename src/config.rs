//! Client configuration and server generation selection.

use crate::error::{MemosError, Result};

/// Server API generations this client can adapt to.
///
/// Each generation differs in request shape, entity naming and transport;
/// the factory selects one consistent strategy set per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// Pre-v0.22 REST JSON API. No native page tokens; pagination is a
    /// full scan with a synthesized offset cursor.
    Legacy,
    /// gRPC-web, `memos.api.v2` services, `ResourceService` for attachments.
    V0_22_0,
    /// gRPC-web, `memos.api.v1` services, `ResourceService` for attachments.
    V0_24_0,
    /// gRPC-web, `memos.api.v1` services, `AttachmentService` replaces
    /// `ResourceService`.
    V0_25_1,
    /// Connect-protocol JSON plus a plain HTTP file endpoint for binaries.
    V0_26_1,
}

impl ApiVersion {
    /// Parse a configured version tag.
    ///
    /// Unknown or empty tags fall back to the oldest (full-scan REST)
    /// strategy, matching how servers older than the tagging scheme behave.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "v0.22.0" => ApiVersion::V0_22_0,
            "v0.24.0" => ApiVersion::V0_24_0,
            "v0.25.1" => ApiVersion::V0_25_1,
            "v0.26.1" => ApiVersion::V0_26_1,
            _ => ApiVersion::Legacy,
        }
    }
}

/// Configuration for one memos server connection.
#[derive(Debug, Clone)]
pub struct MemosConfig {
    /// Base URL of the memos server, e.g. `https://memos.example.com`
    pub api_url: String,
    /// Access token sent as a bearer credential on every call
    pub api_token: String,
    /// Which server generation to talk to
    pub api_version: ApiVersion,
}

impl MemosConfig {
    /// Create a configuration from raw settings values.
    pub fn new(
        api_url: impl Into<String>,
        api_token: impl Into<String>,
        version_tag: &str,
    ) -> Self {
        Self {
            api_url: api_url.into(),
            api_token: api_token.into(),
            api_version: ApiVersion::from_tag(version_tag),
        }
    }

    /// Validate the URL and strip one trailing slash.
    pub(crate) fn normalized_url(&self) -> Result<String> {
        let url = self.api_url.strip_suffix('/').unwrap_or(&self.api_url);
        if url.is_empty() {
            return Err(MemosError::Config("memos API URL is empty".to_string()));
        }
        reqwest::Url::parse(url)
            .map_err(|e| MemosError::Config(format!("invalid memos API URL {url:?}: {e}")))?;
        Ok(url.to_string())
    }
}
