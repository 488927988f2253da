//! Resource fetcher for the legacy REST generation.

use crate::fetcher::{outcome_from_error, FetchOutcome, ResourceFetcher};
use crate::legacy::LegacyClient;
use crate::types::Resource;
use async_trait::async_trait;
use std::sync::Arc;

pub struct LegacyResourceFetcher {
    client: Arc<LegacyClient>,
}

impl LegacyResourceFetcher {
    pub(crate) fn new(client: Arc<LegacyClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceFetcher for LegacyResourceFetcher {
    async fn list_resources(&self) -> FetchOutcome<Vec<Resource>> {
        match self.client.list_resources().await {
            Ok(resources) => FetchOutcome::Fetched(resources),
            Err(e) => outcome_from_error("list resources", e),
        }
    }

    async fn fetch_resource(&self, resource: &Resource) -> FetchOutcome<Vec<u8>> {
        match self.client.fetch_resource(resource).await {
            Ok(payload) => FetchOutcome::Fetched(payload.data),
            Err(e) => outcome_from_error("fetch resource", e),
        }
    }
}
