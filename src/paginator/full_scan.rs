//! Offset-based pagination synthesized for the legacy REST generation.
//!
//! The legacy API has no cursor concept, so the token is the decimal offset
//! of the next unseen memo in the server's newest-first order. The offset
//! grows by exactly one page per call: positions already returned are never
//! revisited within a run and time order strictly decreases page over page.

use crate::error::{MemosError, Result};
use crate::legacy::LegacyClient;
use crate::paginator::{MemoFilter, MemosPaginator};
use crate::types::{MemoPage, User};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub struct FullScanPaginator {
    client: Arc<LegacyClient>,
    /// Floor for the scan: memos older than this stop the descent.
    last_time: Option<DateTime<Utc>>,
    filter: Option<MemoFilter>,
    /// Memos collected so far, grouped by date then time of day. Feeds the
    /// caller's filter so it can decide whether to keep descending.
    collected: Mutex<HashMap<String, HashMap<String, String>>>,
}

impl FullScanPaginator {
    pub(crate) fn new(
        client: Arc<LegacyClient>,
        last_time: Option<DateTime<Utc>>,
        filter: Option<MemoFilter>,
    ) -> Self {
        Self {
            client,
            last_time,
            filter,
            collected: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl MemosPaginator for FullScanPaginator {
    async fn list_memos(
        &self,
        page_size: u32,
        page_token: &str,
        _current_user: &User,
    ) -> Result<MemoPage> {
        let offset: u64 = if page_token.is_empty() {
            0
        } else {
            page_token.parse().map_err(|_| {
                MemosError::InvalidResponse(format!("malformed page token {page_token:?}"))
            })?
        };

        let batch = self.client.list_memos(page_size, offset).await?;
        let exhausted = (batch.len() as u64) < u64::from(page_size);

        let mut memos = Vec::with_capacity(batch.len());
        let mut stop = false;
        for memo in batch {
            if let (Some(floor), Some(created)) = (self.last_time, memo.create_time) {
                if created < floor {
                    stop = true;
                    break;
                }
            }
            if let Some(filter) = &self.filter {
                let date = memo
                    .create_time
                    .map(|t| t.format("%Y-%m-%d").to_string())
                    .unwrap_or_default();
                let mut collected = self.collected.lock().expect("collected map lock");
                let for_date = collected.entry(date.clone()).or_default();
                if !filter(&date, for_date) {
                    stop = true;
                    break;
                }
                let time_key = memo
                    .create_time
                    .map(|t| t.format("%H:%M:%S").to_string())
                    .unwrap_or_default();
                for_date.insert(time_key, memo.content.clone());
            }
            memos.push(memo);
        }

        let next_page_token = if stop || exhausted {
            String::new()
        } else {
            (offset + u64::from(page_size)).to_string()
        };
        Ok(MemoPage {
            memos,
            next_page_token,
        })
    }
}
