//! Rust client for self-hosted [Memos](https://www.usememos.com) servers.
//!
//! The memos server API has changed shape across five incompatible
//! generations: a REST+JSON API, two gRPC-web generations with different
//! service packages, a generation that renamed resources to attachments,
//! and a Connect-protocol JSON variant. [`MemosClientFactory`] hides all of
//! that behind two uniform capability objects: a memo paginator and a
//! resource fetcher.
//!
//! # Example
//!
//! ```rust,no_run
//! use memos_client::{FetchOutcome, MemosClientFactory, MemosConfig, User};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let factory = MemosClientFactory::new(MemosConfig::new(
//!     "https://memos.example.com",
//!     "access-token",
//!     "v0.25.1",
//! ))?;
//!
//! let paginator = factory.create_memos_paginator(None, None);
//! let fetcher = factory.create_resource_fetcher();
//!
//! let mut token = String::new();
//! loop {
//!     let page = paginator.list_memos(50, &token, &User::default()).await?;
//!     for memo in &page.memos {
//!         for resource in memo.attached_resources() {
//!             match fetcher.fetch_resource(resource).await {
//!                 FetchOutcome::Fetched(data) => { /* write data to disk */ }
//!                 // Absent or broken attachments never abort the sync.
//!                 FetchOutcome::Unavailable | FetchOutcome::Failed(_) => {}
//!             }
//!         }
//!     }
//!     if page.next_page_token.is_empty() {
//!         break;
//!     }
//!     token = page.next_page_token;
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod factory;
pub mod fetcher;
pub mod paginator;
pub mod proto;
pub mod transport;
pub mod types;

mod legacy;

// Re-export main types
pub use config::{ApiVersion, MemosConfig};
pub use error::{MemosError, Result};
pub use factory::MemosClientFactory;
pub use fetcher::{FetchOutcome, ResourceFetcher};
pub use paginator::{MemoFilter, MemosPaginator};
pub use types::{BinaryPayload, Memo, MemoPage, Resource, User};
