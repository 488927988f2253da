//! Resource fetchers for the gRPC-web generations.
//!
//! v0.22/v0.24 servers expose `ResourceService`; v0.25 renamed the entity
//! and serves the same calls as `AttachmentService`. Both return binaries as
//! `google.api.HttpBody` over the bundle's channel.

use crate::fetcher::{outcome_from_error, FetchOutcome, ResourceFetcher};
use crate::proto;
use crate::transport::GrpcWebChannel;
use crate::types::Resource;
use async_trait::async_trait;
use std::sync::Arc;

/// `ResourceService/ListResources` + `GetResourceBinary`.
pub struct ResourceServiceFetcher {
    channel: Arc<GrpcWebChannel>,
}

impl ResourceServiceFetcher {
    pub(crate) fn new(channel: Arc<GrpcWebChannel>) -> Self {
        Self { channel }
    }
}

#[async_trait]
impl ResourceFetcher for ResourceServiceFetcher {
    async fn list_resources(&self) -> FetchOutcome<Vec<Resource>> {
        let result: crate::error::Result<proto::ListResourcesResponse> = self
            .channel
            .unary(
                "ResourceService",
                "ListResources",
                &proto::ListResourcesRequest {},
            )
            .await;
        match result {
            Ok(response) => {
                FetchOutcome::Fetched(response.resources.into_iter().map(Into::into).collect())
            }
            Err(e) => outcome_from_error("list resources", e),
        }
    }

    async fn fetch_resource(&self, resource: &Resource) -> FetchOutcome<Vec<u8>> {
        let request = proto::GetResourceBinaryRequest {
            name: resource.name.clone(),
            filename: resource.filename.clone(),
        };
        let result: crate::error::Result<proto::HttpBody> = self
            .channel
            .unary("ResourceService", "GetResourceBinary", &request)
            .await;
        match result {
            Ok(body) => FetchOutcome::Fetched(body.data),
            Err(e) => outcome_from_error("fetch resource binary", e),
        }
    }
}

/// `AttachmentService/ListAttachments` + `GetAttachmentBinary` (v0.25).
pub struct AttachmentServiceFetcher {
    channel: Arc<GrpcWebChannel>,
}

impl AttachmentServiceFetcher {
    pub(crate) fn new(channel: Arc<GrpcWebChannel>) -> Self {
        Self { channel }
    }
}

#[async_trait]
impl ResourceFetcher for AttachmentServiceFetcher {
    async fn list_resources(&self) -> FetchOutcome<Vec<Resource>> {
        let result: crate::error::Result<proto::ListAttachmentsResponse> = self
            .channel
            .unary(
                "AttachmentService",
                "ListAttachments",
                &proto::ListAttachmentsRequest::default(),
            )
            .await;
        match result {
            Ok(response) => {
                FetchOutcome::Fetched(response.attachments.into_iter().map(Into::into).collect())
            }
            Err(e) => outcome_from_error("list attachments", e),
        }
    }

    async fn fetch_resource(&self, resource: &Resource) -> FetchOutcome<Vec<u8>> {
        let request = proto::GetAttachmentBinaryRequest {
            name: resource.name.clone(),
            filename: resource.filename.clone(),
        };
        let result: crate::error::Result<proto::HttpBody> = self
            .channel
            .unary("AttachmentService", "GetAttachmentBinary", &request)
            .await;
        match result {
            Ok(body) => FetchOutcome::Fetched(body.data),
            Err(e) => outcome_from_error("fetch attachment binary", e),
        }
    }
}
