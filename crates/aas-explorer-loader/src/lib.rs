//! Record loading boundary for the AAS explorer.
//!
//! The [`RecordFetcher`] trait is the sole transport seam: the rest of the
//! explorer depends on this crate, never on an HTTP client directly.
//! [`HttpFetcher`] serves production, [`InProcessFetcher`] serves tests and
//! demos with a fixed in-memory document set.
//!
//! [`Loader`] sits on top of a fetcher and resolves one AAS document plus its
//! typed sub-records from a base directory of cross-referenced JSON files.

pub mod error;
mod http;
mod ids;
mod inprocess;
mod loader;

use async_trait::async_trait;
use serde_json::Value;

pub use error::{FetchError, LoadError};
pub use http::HttpFetcher;
pub use ids::ShellIdAllocator;
pub use inprocess::InProcessFetcher;
pub use loader::{Loader, SubmodelKind};

/// Transport seam for record documents.
#[async_trait]
pub trait RecordFetcher: Send + Sync {
    /// Fetches and decodes the JSON document at `url`.
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError>;
}
