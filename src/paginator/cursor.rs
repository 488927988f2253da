//! Cursor-token pagination for servers with native page tokens.
//!
//! Size and token are forwarded to the list call verbatim and the server's
//! continuation token is returned unchanged; this layer never parses or
//! rewrites token contents.

use crate::auth::AuthClient;
use crate::error::Result;
use crate::paginator::MemosPaginator;
use crate::proto;
use crate::transport::{ConnectChannel, GrpcWebChannel};
use crate::types::{MemoPage, User};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Low-level memo list call for one server generation.
#[async_trait]
pub(crate) trait MemoListClient: Send + Sync {
    async fn list_memos(
        &self,
        page_size: u32,
        page_token: &str,
        current_user: &User,
    ) -> Result<MemoPage>;
}

/// gRPC-web `MemoService/ListMemos`.
///
/// The v0.22 generation scopes listing by creator instead of authenticating
/// it via the channel; later generations ignore the identity entirely.
pub(crate) struct GrpcMemoListClient {
    channel: Arc<GrpcWebChannel>,
    auth: Arc<dyn AuthClient>,
    scope_by_creator: bool,
    /// Lazily resolved identity, cached so repeated paginator creation on
    /// one bundle never re-authenticates.
    identity: OnceCell<User>,
}

impl GrpcMemoListClient {
    pub(crate) fn new(
        channel: Arc<GrpcWebChannel>,
        auth: Arc<dyn AuthClient>,
        scope_by_creator: bool,
    ) -> Self {
        Self {
            channel,
            auth,
            scope_by_creator,
            identity: OnceCell::new(),
        }
    }

    async fn creator_filter(&self, current_user: &User) -> Result<String> {
        if !self.scope_by_creator {
            return Ok(String::new());
        }
        let user = if current_user.name.is_empty() {
            self.identity
                .get_or_try_init(|| self.auth.get_identity())
                .await?
                .clone()
        } else {
            current_user.clone()
        };
        if user.name.is_empty() {
            Ok(String::new())
        } else {
            Ok(format!("creator == \"{}\"", user.name))
        }
    }
}

#[async_trait]
impl MemoListClient for GrpcMemoListClient {
    async fn list_memos(
        &self,
        page_size: u32,
        page_token: &str,
        current_user: &User,
    ) -> Result<MemoPage> {
        let filter = self.creator_filter(current_user).await?;
        let request = proto::ListMemosRequest {
            page_size: page_size as i32,
            page_token: page_token.to_string(),
            filter,
        };
        let response: proto::ListMemosResponse = self
            .channel
            .unary("MemoService", "ListMemos", &request)
            .await?;
        Ok(MemoPage {
            memos: response.memos.into_iter().map(Into::into).collect(),
            next_page_token: response.next_page_token,
        })
    }
}

/// Connect-protocol JSON `MemoService/ListMemos` (v0.26+).
pub(crate) struct ConnectMemoListClient {
    channel: Arc<ConnectChannel>,
}

impl ConnectMemoListClient {
    pub(crate) fn new(channel: Arc<ConnectChannel>) -> Self {
        Self { channel }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConnectListMemosRequest<'a> {
    page_size: u32,
    page_token: &'a str,
}

#[async_trait]
impl MemoListClient for ConnectMemoListClient {
    async fn list_memos(
        &self,
        page_size: u32,
        page_token: &str,
        _current_user: &User,
    ) -> Result<MemoPage> {
        let request = ConnectListMemosRequest {
            page_size,
            page_token,
        };
        self.channel
            .post("MemoService", "ListMemos", &request)
            .await
    }
}

/// Paginator over any native-token list client.
pub struct CursorPaginator {
    client: Arc<dyn MemoListClient>,
}

impl CursorPaginator {
    pub(crate) fn new(client: Arc<dyn MemoListClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MemosPaginator for CursorPaginator {
    async fn list_memos(
        &self,
        page_size: u32,
        page_token: &str,
        current_user: &User,
    ) -> Result<MemoPage> {
        self.client
            .list_memos(page_size, page_token, current_user)
            .await
    }
}
