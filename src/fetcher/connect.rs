//! Resource fetcher for the v0.26 Connect-JSON generation.
//!
//! Listing goes through the Connect-protocol `ListAttachments` call; the
//! binary itself comes from the plain `/file/{name}/{filename}` endpoint,
//! since this server generation removed `GetAttachmentBinary`.

use crate::fetcher::{outcome_from_error, FetchOutcome, ResourceFetcher};
use crate::transport::ConnectChannel;
use crate::types::{Resource, ResourceList};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

pub struct ConnectAttachmentFetcher {
    channel: Arc<ConnectChannel>,
}

impl ConnectAttachmentFetcher {
    pub(crate) fn new(channel: Arc<ConnectChannel>) -> Self {
        Self { channel }
    }
}

#[async_trait]
impl ResourceFetcher for ConnectAttachmentFetcher {
    async fn list_resources(&self) -> FetchOutcome<Vec<Resource>> {
        let result: crate::error::Result<ResourceList> = self
            .channel
            .post("AttachmentService", "ListAttachments", &json!({}))
            .await;
        match result {
            Ok(list) => FetchOutcome::Fetched(list.into_resources()),
            Err(e) => outcome_from_error("list attachments", e),
        }
    }

    async fn fetch_resource(&self, resource: &Resource) -> FetchOutcome<Vec<u8>> {
        match self
            .channel
            .get_file(&resource.name, &resource.filename)
            .await
        {
            Ok(payload) => FetchOutcome::Fetched(payload.data),
            Err(e) => outcome_from_error("fetch resource binary", e),
        }
    }
}
