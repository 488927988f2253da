//! API types shared across server generations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-assigned principal identity.
///
/// Used only to scope queries on generations that require it; an empty name
/// is a valid authenticated-but-anonymous identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Opaque server-scoped name, e.g. `users/101`
    #[serde(default)]
    pub name: String,
}

impl User {
    /// Identity with a non-empty name.
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Normalized attachment descriptor.
///
/// `name` and `filename` together are sufficient to fetch the binary content
/// regardless of server generation; `external_link` may substitute for
/// server-hosted storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    /// Server-scoped opaque resource id used for binary fetch
    #[serde(default)]
    pub name: String,
    /// Display file name
    #[serde(default)]
    pub filename: String,
    /// Link to externally hosted content, empty when server-hosted
    #[serde(default)]
    pub external_link: String,
    /// MIME type
    #[serde(default)]
    pub r#type: String,
    /// Secondary identifier used by some generations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
}

/// One memo entry.
///
/// Exactly one of `resources`/`attachments` is populated depending on the
/// server generation; use [`Memo::attached_resources`] for the single
/// logical view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Memo {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub create_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub update_time: Option<DateTime<Utc>>,
    /// Attached files as named by pre-v0.25 servers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<Resource>,
    /// Attached files as named by v0.25+ servers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Resource>,
}

impl Memo {
    /// The attached files, whichever field name the server used.
    pub fn attached_resources(&self) -> &[Resource] {
        if !self.attachments.is_empty() {
            &self.attachments
        } else {
            &self.resources
        }
    }
}

/// One page of memos plus the continuation token.
///
/// An empty `next_page_token` means the listing is exhausted. An empty
/// `memos` list with a non-empty token is a valid intermediate page (servers
/// skip deleted entries), not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoPage {
    #[serde(default)]
    pub memos: Vec<Memo>,
    #[serde(default)]
    pub next_page_token: String,
}

/// Raw binary payload from a resource fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryPayload {
    /// MIME type reported by the server
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Wire shape of resource list responses across the rename generations.
///
/// Single source of truth for the `resources`/`attachments` field rename:
/// exactly one of the two keys is populated and both normalize to the same
/// [`Resource`] values.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ResourceList {
    #[serde(default)]
    pub(crate) resources: Vec<Resource>,
    #[serde(default)]
    pub(crate) attachments: Vec<Resource>,
}

impl ResourceList {
    pub(crate) fn into_resources(self) -> Vec<Resource> {
        if self.attachments.is_empty() {
            self.resources
        } else {
            self.attachments
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json(key: &str) -> String {
        format!(
            r#"{{"{key}": [{{"name": "r1", "filename": "f.png", "externalLink": "", "type": "image/png"}}]}}"#
        )
    }

    #[test]
    fn old_and_new_field_names_normalize_identically() {
        let old: ResourceList = serde_json::from_str(&sample_json("resources")).unwrap();
        let new: ResourceList = serde_json::from_str(&sample_json("attachments")).unwrap();
        let old = old.into_resources();
        let new = new.into_resources();
        assert_eq!(old, new);
        assert_eq!(old.len(), 1);
        assert_eq!(old[0].name, "r1");
        assert_eq!(old[0].filename, "f.png");
        assert_eq!(old[0].r#type, "image/png");
        assert!(old[0].uid.is_none());
    }

    #[test]
    fn memo_exposes_whichever_field_is_populated() {
        let resource = Resource {
            name: "resources/1".into(),
            ..Default::default()
        };
        let old_shape = Memo {
            resources: vec![resource.clone()],
            ..Default::default()
        };
        let new_shape = Memo {
            attachments: vec![resource],
            ..Default::default()
        };
        assert_eq!(old_shape.attached_resources(), new_shape.attached_resources());
    }

    #[test]
    fn memo_page_decodes_connect_json() {
        let page: MemoPage = serde_json::from_str(
            r#"{
                "memos": [
                    {"content": "hello", "createTime": "2024-05-01T10:00:00Z"}
                ],
                "nextPageToken": "abc"
            }"#,
        )
        .unwrap();
        assert_eq!(page.memos.len(), 1);
        assert_eq!(page.memos[0].content, "hello");
        assert!(page.memos[0].create_time.is_some());
        assert_eq!(page.next_page_token, "abc");
    }

    #[test]
    fn missing_keys_default_to_empty_page() {
        let page: MemoPage = serde_json::from_str("{}").unwrap();
        assert!(page.memos.is_empty());
        assert!(page.next_page_token.is_empty());
    }
}
