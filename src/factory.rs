//! Version factory: one consistent client bundle per configured server
//! generation, exposing a paginator and a resource fetcher over it.

use crate::auth::{AuthClient, AuthStatusClient, CurrentSessionClient};
use crate::config::{ApiVersion, MemosConfig};
use crate::error::Result;
use crate::fetcher::{
    AttachmentServiceFetcher, ConnectAttachmentFetcher, LegacyResourceFetcher, ResourceFetcher,
    ResourceServiceFetcher,
};
use crate::legacy::LegacyClient;
use crate::paginator::{
    ConnectMemoListClient, CursorPaginator, FullScanPaginator, GrpcMemoListClient, MemoFilter,
    MemoListClient, MemosPaginator,
};
use crate::transport::{ConnectChannel, GrpcWebChannel};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// The protocol clients one server generation needs, constructed once per
/// factory and borrowed by every paginator and fetcher it hands out.
enum ClientBundle {
    Legacy {
        client: Arc<LegacyClient>,
    },
    Grpc {
        channel: Arc<GrpcWebChannel>,
        memo_list: Arc<dyn MemoListClient>,
        /// v0.25 replaced `ResourceService` with `AttachmentService`.
        use_attachment_service: bool,
    },
    Connect {
        channel: Arc<ConnectChannel>,
        memo_list: Arc<dyn MemoListClient>,
    },
}

/// Adapts one configured server generation behind two uniform capability
/// objects.
///
/// # Example
///
/// ```rust,no_run
/// use memos_client::{MemosClientFactory, MemosConfig};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let factory = MemosClientFactory::new(MemosConfig::new(
///     "https://memos.example.com",
///     "token",
///     "v0.25.1",
/// ))?;
/// let paginator = factory.create_memos_paginator(None, None);
/// let fetcher = factory.create_resource_fetcher();
/// # Ok(())
/// # }
/// ```
pub struct MemosClientFactory {
    bundle: ClientBundle,
}

impl MemosClientFactory {
    /// Build the client bundle for the configured generation.
    ///
    /// Fails only on malformed configuration; no network I/O happens here.
    pub fn new(config: MemosConfig) -> Result<Self> {
        let url = config.normalized_url()?;
        let token = config.api_token.as_str();

        let bundle = match config.api_version {
            ApiVersion::Legacy => ClientBundle::Legacy {
                client: Arc::new(LegacyClient::new(&url, token)?),
            },
            ApiVersion::V0_22_0 => {
                Self::grpc_bundle(&url, token, "memos.api.v2", AuthShape::AuthStatus, true, false)?
            }
            ApiVersion::V0_24_0 => {
                Self::grpc_bundle(&url, token, "memos.api.v1", AuthShape::AuthStatus, false, false)?
            }
            ApiVersion::V0_25_1 => Self::grpc_bundle(
                &url,
                token,
                "memos.api.v1",
                AuthShape::CurrentSession,
                false,
                true,
            )?,
            ApiVersion::V0_26_1 => {
                let channel = Arc::new(ConnectChannel::new(&url, token)?);
                ClientBundle::Connect {
                    memo_list: Arc::new(ConnectMemoListClient::new(channel.clone())),
                    channel,
                }
            }
        };
        Ok(Self { bundle })
    }

    fn grpc_bundle(
        url: &str,
        token: &str,
        package: &'static str,
        auth_shape: AuthShape,
        scope_by_creator: bool,
        use_attachment_service: bool,
    ) -> Result<ClientBundle> {
        let channel = Arc::new(GrpcWebChannel::new(url, token, package)?);
        let auth: Arc<dyn AuthClient> = match auth_shape {
            AuthShape::AuthStatus => Arc::new(AuthStatusClient::new(channel.clone())),
            AuthShape::CurrentSession => Arc::new(CurrentSessionClient::new(channel.clone())),
        };
        Ok(ClientBundle::Grpc {
            memo_list: Arc::new(GrpcMemoListClient::new(
                channel.clone(),
                auth,
                scope_by_creator,
            )),
            channel,
            use_attachment_service,
        })
    }

    /// Build a memo paginator sharing this factory's transport clients.
    ///
    /// `last_time` and `filter` only steer the legacy full-scan strategy;
    /// generations with native page tokens let the server drive pagination.
    pub fn create_memos_paginator(
        &self,
        last_time: Option<DateTime<Utc>>,
        filter: Option<MemoFilter>,
    ) -> Arc<dyn MemosPaginator> {
        match &self.bundle {
            ClientBundle::Legacy { client } => {
                Arc::new(FullScanPaginator::new(client.clone(), last_time, filter))
            }
            ClientBundle::Grpc { memo_list, .. } | ClientBundle::Connect { memo_list, .. } => {
                Arc::new(CursorPaginator::new(memo_list.clone()))
            }
        }
    }

    /// Build a resource fetcher sharing this factory's transport clients.
    pub fn create_resource_fetcher(&self) -> Arc<dyn ResourceFetcher> {
        match &self.bundle {
            ClientBundle::Legacy { client } => {
                Arc::new(LegacyResourceFetcher::new(client.clone()))
            }
            ClientBundle::Grpc {
                channel,
                use_attachment_service,
                ..
            } => {
                if *use_attachment_service {
                    Arc::new(AttachmentServiceFetcher::new(channel.clone()))
                } else {
                    Arc::new(ResourceServiceFetcher::new(channel.clone()))
                }
            }
            ClientBundle::Connect { channel, .. } => {
                Arc::new(ConnectAttachmentFetcher::new(channel.clone()))
            }
        }
    }
}

enum AuthShape {
    AuthStatus,
    CurrentSession,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MemosError;

    #[test]
    fn construction_fails_fast_on_bad_url() {
        let result = MemosClientFactory::new(MemosConfig::new("", "token", "v0.25.1"));
        assert!(matches!(result, Err(MemosError::Config(_))));
    }

    #[test]
    fn construction_performs_no_io_for_every_version() {
        for tag in ["", "v0.22.0", "v0.24.0", "v0.25.1", "v0.26.1", "garbage"] {
            // The URL points nowhere routable; construction must still work.
            let factory = MemosClientFactory::new(MemosConfig::new(
                "http://192.0.2.1:59999",
                "token",
                tag,
            ))
            .unwrap();
            let _ = factory.create_memos_paginator(None, None);
            let _ = factory.create_resource_fetcher();
        }
    }
}
