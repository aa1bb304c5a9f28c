use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use timeseek_core::{QueryRequest, SeekTimestamp};
use timeseek_logging::seek_debug;

use crate::{SearchError, SearchFailureKind, DEFAULT_ENDPOINT};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    pub endpoint: String,
    /// Deadline for establishing the connection.
    pub connect_timeout: Duration,
    /// Deadline for the whole exchange, body included.
    pub request_timeout: Duration,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Maps a (video, query) pair to a timestamp.
#[async_trait]
pub trait SearchClient: Send + Sync {
    async fn search(&self, request: &QueryRequest) -> Result<SeekTimestamp, SearchError>;
}

#[derive(Serialize)]
struct SearchPayload<'a> {
    video_id: &'a str,
    query: &'a str,
    user_id: &'a str,
}

#[derive(Deserialize)]
struct SearchResponse {
    timestamp: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct ReqwestSearchClient {
    settings: SearchSettings,
    client: reqwest::Client,
}

impl ReqwestSearchClient {
    pub fn new(settings: SearchSettings) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| SearchError::new(SearchFailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    async fn exchange(&self, endpoint: reqwest::Url, body: Vec<u8>) -> Result<f64, SearchError> {
        let response = self
            .client
            .post(endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|err| self.map_reqwest_error(err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::new(
                SearchFailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| self.map_reqwest_error(err))?;
        let parsed: SearchResponse = serde_json::from_slice(&bytes)
            .map_err(|err| SearchError::new(SearchFailureKind::Decode, err.to_string()))?;
        parsed.timestamp.ok_or_else(|| {
            SearchError::new(
                SearchFailureKind::Decode,
                "response is missing a numeric `timestamp` field",
            )
        })
    }

    fn map_reqwest_error(&self, err: reqwest::Error) -> SearchError {
        if err.is_timeout() {
            return SearchError::timeout(expired_deadline(&self.settings, err.is_connect()));
        }
        SearchError::new(SearchFailureKind::Network, err.to_string())
    }
}

/// The deadline that ran out: the connect one while the connection was
/// still being established, otherwise the one for the whole exchange.
fn expired_deadline(settings: &SearchSettings, during_connect: bool) -> Duration {
    if during_connect {
        settings.connect_timeout
    } else {
        settings.request_timeout
    }
}

#[async_trait]
impl SearchClient for ReqwestSearchClient {
    async fn search(&self, request: &QueryRequest) -> Result<SeekTimestamp, SearchError> {
        let endpoint = reqwest::Url::parse(&self.settings.endpoint)
            .map_err(|err| SearchError::new(SearchFailureKind::InvalidEndpoint, err.to_string()))?;
        let payload = SearchPayload {
            video_id: request.video_id.as_str(),
            query: &request.query,
            user_id: &request.user_id,
        };
        let body = serde_json::to_vec(&payload)
            .map_err(|err| SearchError::new(SearchFailureKind::Encode, err.to_string()))?;

        seek_debug!(
            "POST {} video_id={} query_len={}",
            endpoint,
            request.video_id,
            request.query.len()
        );

        let deadline = self.settings.request_timeout;
        let seconds = match tokio::time::timeout(deadline, self.exchange(endpoint, body)).await {
            Ok(result) => result?,
            Err(_) => return Err(SearchError::timeout(deadline)),
        };
        SeekTimestamp::from_reported(seconds)
            .map_err(|err| SearchError::new(SearchFailureKind::Decode, err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::{expired_deadline, SearchSettings};
    use std::time::Duration;

    #[test]
    fn connect_expiry_reports_the_connect_deadline() {
        let settings = SearchSettings {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            ..SearchSettings::default()
        };
        assert_eq!(expired_deadline(&settings, true), Duration::from_secs(10));
        assert_eq!(expired_deadline(&settings, false), Duration::from_secs(30));
    }
}
