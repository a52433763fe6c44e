//! Error types for record fetching and resolution.

use thiserror::Error;

use crate::loader::SubmodelKind;

/// Transport-level failure from a [`RecordFetcher`](crate::RecordFetcher).
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("response from {url} is not valid JSON")]
    Body {
        url: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("no document at {path}")]
    NotFound { path: String },
}

/// Failure while resolving an AAS or model record.
///
/// Lower-level failures are wrapped with the path and sub-record they belong
/// to rather than swallowed; the tree expansion engine catches at the
/// node-expansion boundary and degrades that node only.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("fetch failed for {path}")]
    Fetch {
        path: String,
        #[source]
        source: FetchError,
    },

    #[error("document at {path} is not a valid {expected} document")]
    Decode {
        path: String,
        expected: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("document at {path} does not classify as a 3d model")]
    NotAModel { path: String },

    #[error("submodel descriptor {id_short} in {path} has no endpoints")]
    MissingEndpoint { path: String, id_short: String },

    #[error("error loading {submodel} from {path}")]
    Submodel {
        submodel: SubmodelKind,
        path: String,
        #[source]
        source: Box<LoadError>,
    },

    #[error("{submodel} submodel missing in AAS document {path}")]
    SubmodelMissing {
        submodel: SubmodelKind,
        path: String,
    },

    #[error("error loading AAS from {path}")]
    Aas {
        path: String,
        #[source]
        source: Box<LoadError>,
    },
}
