//! Hand-written protobuf messages for the gRPC-web server generations.
//!
//! These mirror the memos API service protos. Only the fields this client
//! reads or writes are declared; prost skips unknown fields on decode, so
//! the messages stay valid against fuller server responses.

use chrono::{DateTime, Utc};

// ---------------------------------------------------------------------------
// MemoService
// ---------------------------------------------------------------------------

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListMemosRequest {
    #[prost(int32, tag = "1")]
    pub page_size: i32,
    #[prost(string, tag = "2")]
    pub page_token: String,
    /// CEL filter, e.g. `creator == "users/101"`. Empty means unfiltered.
    #[prost(string, tag = "3")]
    pub filter: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListMemosResponse {
    #[prost(message, repeated, tag = "1")]
    pub memos: Vec<Memo>,
    #[prost(string, tag = "2")]
    pub next_page_token: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Memo {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(message, optional, tag = "4")]
    pub create_time: Option<::prost_types::Timestamp>,
    #[prost(message, optional, tag = "5")]
    pub update_time: Option<::prost_types::Timestamp>,
    #[prost(string, tag = "6")]
    pub content: String,
    /// Pre-v0.25 field name
    #[prost(message, repeated, tag = "12")]
    pub resources: Vec<Resource>,
    /// v0.25+ field name
    #[prost(message, repeated, tag = "13")]
    pub attachments: Vec<Resource>,
}

// ---------------------------------------------------------------------------
// ResourceService (v0.22 / v0.24) and AttachmentService (v0.25)
//
// The attachment service renamed the entity but kept the field layout, so a
// single message covers both.
// ---------------------------------------------------------------------------

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Resource {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub uid: String,
    #[prost(string, tag = "4")]
    pub filename: String,
    #[prost(string, tag = "6")]
    pub external_link: String,
    #[prost(string, tag = "7")]
    pub r#type: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListResourcesRequest {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListResourcesResponse {
    #[prost(message, repeated, tag = "1")]
    pub resources: Vec<Resource>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetResourceBinaryRequest {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub filename: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListAttachmentsRequest {
    #[prost(int32, tag = "1")]
    pub page_size: i32,
    #[prost(string, tag = "2")]
    pub page_token: String,
    #[prost(string, tag = "3")]
    pub filter: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListAttachmentsResponse {
    #[prost(message, repeated, tag = "1")]
    pub attachments: Vec<Resource>,
    #[prost(string, tag = "2")]
    pub next_page_token: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetAttachmentBinaryRequest {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub filename: String,
}

/// `google.api.HttpBody`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct HttpBody {
    #[prost(string, tag = "1")]
    pub content_type: String,
    #[prost(bytes = "vec", tag = "2")]
    pub data: Vec<u8>,
}

// ---------------------------------------------------------------------------
// AuthService
// ---------------------------------------------------------------------------

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetAuthStatusRequest {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct User {
    #[prost(string, tag = "1")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetCurrentSessionRequest {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetCurrentSessionResponse {
    #[prost(message, optional, tag = "1")]
    pub user: Option<User>,
    #[prost(message, optional, tag = "2")]
    pub last_accessed_at: Option<::prost_types::Timestamp>,
}

// ---------------------------------------------------------------------------
// Conversions into the normalized API types
// ---------------------------------------------------------------------------

fn timestamp_to_chrono(ts: &::prost_types::Timestamp) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts.seconds, ts.nanos.max(0) as u32)
}

impl From<Resource> for crate::types::Resource {
    fn from(r: Resource) -> Self {
        let uid = if r.uid.is_empty() { None } else { Some(r.uid) };
        crate::types::Resource {
            name: r.name,
            filename: r.filename,
            external_link: r.external_link,
            r#type: r.r#type,
            uid,
        }
    }
}

impl From<Memo> for crate::types::Memo {
    fn from(m: Memo) -> Self {
        crate::types::Memo {
            content: m.content,
            create_time: m.create_time.as_ref().and_then(timestamp_to_chrono),
            update_time: m.update_time.as_ref().and_then(timestamp_to_chrono),
            resources: m.resources.into_iter().map(Into::into).collect(),
            attachments: m.attachments.into_iter().map(Into::into).collect(),
        }
    }
}
