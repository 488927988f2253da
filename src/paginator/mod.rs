//! Memo pagination capabilities.
//!
//! The cursor strategy covers every generation with native page tokens; the
//! full-scan strategy synthesizes a token scheme for the legacy REST API.

mod cursor;
mod full_scan;

pub use cursor::CursorPaginator;
pub(crate) use cursor::{ConnectMemoListClient, GrpcMemoListClient, MemoListClient};
pub use full_scan::FullScanPaginator;

use crate::error::Result;
use crate::types::{MemoPage, User};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// Filter consulted by the full-scan strategy before descending to older
/// pages: `(date, memos already collected for that date) -> keep going`.
pub type MemoFilter = Arc<dyn Fn(&str, &HashMap<String, String>) -> bool + Send + Sync>;

/// Uniform pagination over one server generation.
#[async_trait]
pub trait MemosPaginator: Send + Sync {
    /// Fetch one page of memos.
    ///
    /// `page_token` is opaque: pass the empty string to start and the
    /// previous response's `next_page_token` to continue. An empty token in
    /// the response means the listing is exhausted; an empty page with a
    /// non-empty token is a valid intermediate page. Failures propagate as
    /// errors since a silently empty page would look like a finished sync.
    async fn list_memos(
        &self,
        page_size: u32,
        page_token: &str,
        current_user: &User,
    ) -> Result<MemoPage>;
}
