//! HTTP fetcher over the static record files.

use async_trait::async_trait;
use serde_json::Value;

use crate::{FetchError, RecordFetcher};

/// Reqwest-backed fetcher. A non-2xx status is a [`FetchError::Status`], not
/// a silently decoded body.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordFetcher for HttpFetcher {
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source: source.into(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|source| FetchError::Body {
                url: url.to_string(),
                source: source.into(),
            })
    }
}
