//! Resource fetching capabilities.
//!
//! Fetchers never return `Err`: a failed or absent attachment must not abort
//! memo synchronization, so every failure degrades to a [`FetchOutcome`]
//! variant the caller can branch on.

mod connect;
mod grpc;
mod rest;

pub use connect::ConnectAttachmentFetcher;
pub use grpc::{AttachmentServiceFetcher, ResourceServiceFetcher};
pub use rest::LegacyResourceFetcher;

use crate::error::MemosError;
use crate::types::Resource;
use async_trait::async_trait;
use tracing::{debug, error};

/// Outcome of a resource operation.
///
/// `Unavailable` (the server generation lacks the capability) is a distinct,
/// expected outcome rather than an empty list or a failure. Callers skip
/// resource sync for the run on `Unavailable` or `Failed` instead of
/// treating either as zero resources.
#[derive(Debug)]
pub enum FetchOutcome<T> {
    /// The call succeeded.
    Fetched(T),
    /// The capability is absent on this server (404-class response or
    /// unimplemented service).
    Unavailable,
    /// The transport or server broke.
    Failed(MemosError),
}

impl<T> FetchOutcome<T> {
    /// The fetched value, if any.
    pub fn fetched(self) -> Option<T> {
        match self {
            FetchOutcome::Fetched(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, FetchOutcome::Unavailable)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FetchOutcome::Failed(_))
    }
}

/// Classify an error into an outcome, logging at the level the condition
/// deserves: absence of the feature is diagnostic, a broken transport is an
/// error.
pub(crate) fn outcome_from_error<T>(context: &str, error: MemosError) -> FetchOutcome<T> {
    if error.is_absence() {
        debug!("{context}: not available on this server: {error}");
        FetchOutcome::Unavailable
    } else {
        error!("{context}: {error}");
        FetchOutcome::Failed(error)
    }
}

/// Uniform attachment access over one server generation.
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    /// List every resource the server knows about.
    async fn list_resources(&self) -> FetchOutcome<Vec<Resource>>;

    /// Fetch the binary content behind one resource.
    async fn fetch_resource(&self, resource: &Resource) -> FetchOutcome<Vec<u8>>;
}
