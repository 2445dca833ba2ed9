use crate::constants::BODY_PREFIX_LEN;
use crate::error::Result;
use crate::types::RawRecord;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// Minimal HTTP surface the fetcher needs; tests swap in canned responses.
#[async_trait]
pub trait HttpClientPort: Send + Sync {
    async fn get(&self, url: &str) -> std::result::Result<HttpGetResult, String>;
}

#[derive(Clone, Debug)]
pub struct HttpGetResult {
    pub status: u16,
    pub body: Vec<u8>,
}

pub struct ReqwestHttp {
    client: reqwest::Client,
}

impl ReqwestHttp {
    pub fn new(timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClientPort for ReqwestHttp {
    async fn get(&self, url: &str) -> std::result::Result<HttpGetResult, String> {
        let resp = self.client.get(url).send().await.map_err(|e| e.to_string())?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await.map_err(|e| e.to_string())?.to_vec();
        Ok(HttpGetResult { status, body })
    }
}

/// Structured capture of a transport failure. The run continues with an empty
/// collection for the source; this record surfaces in the snapshot metadata so
/// consumers can tell "zero" apart from "unavailable".
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceFailure {
    pub source: String,
    pub endpoint: String,
    pub error: String,
    pub body_prefix: String,
}

/// Outcome of fetching one source collection. Malformed JSON on an otherwise
/// successful response is not represented here: that is fatal and propagates
/// as an error.
#[derive(Debug)]
pub enum FetchOutcome {
    Collection(Vec<RawRecord>),
    Unavailable(SourceFailure),
}

pub struct Fetcher {
    http: Arc<dyn HttpClientPort>,
    base_url: String,
    delay: Duration,
}

impl Fetcher {
    pub fn new(http: Arc<dyn HttpClientPort>, base_url: String, delay_ms: u64) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            delay: Duration::from_millis(delay_ms),
        }
    }

    /// Fetches one collection. HTTP >= 400 and network errors come back as
    /// `Unavailable`; a 2xx body that is not valid JSON aborts the run.
    #[instrument(skip(self, path), fields(source = %source))]
    pub async fn fetch_collection(
        &self,
        source: &'static str,
        path: &str,
    ) -> Result<FetchOutcome> {
        let url = format!("{}{}", self.base_url, path);
        let result = match self.http.get(&url).await {
            Ok(result) => result,
            Err(error) => {
                warn!("Request failed: {}", error);
                return Ok(FetchOutcome::Unavailable(SourceFailure {
                    source: source.to_string(),
                    endpoint: path.to_string(),
                    error,
                    body_prefix: String::new(),
                }));
            }
        };

        if result.status >= 400 {
            warn!("Upstream returned HTTP {}", result.status);
            return Ok(FetchOutcome::Unavailable(SourceFailure {
                source: source.to_string(),
                endpoint: path.to_string(),
                error: format!("HTTP {}", result.status),
                body_prefix: body_prefix(&result.body),
            }));
        }

        // Fatal by contract: a successful response we cannot parse means the
        // upstream changed shape, and no partial snapshot may be written.
        let payload: Value = serde_json::from_slice(&result.body)?;
        let records = unwrap_envelope(payload);
        info!("Fetched {} records", records.len());
        Ok(FetchOutcome::Collection(records))
    }

    /// Pause between consecutive requests to respect upstream rate limits.
    pub async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

/// Upstream endpoints return either a bare array or a `{ "data": [...] }`
/// envelope; anything else counts as an empty collection.
pub fn unwrap_envelope(payload: Value) -> Vec<RawRecord> {
    match payload {
        Value::Array(records) => records,
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(records)) => records,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

fn body_prefix(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    text.chars().take(BODY_PREFIX_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct StubHttp {
        status: u16,
        body: &'static str,
    }

    #[async_trait]
    impl HttpClientPort for StubHttp {
        async fn get(&self, _url: &str) -> std::result::Result<HttpGetResult, String> {
            Ok(HttpGetResult {
                status: self.status,
                body: self.body.as_bytes().to_vec(),
            })
        }
    }

    struct FailingHttp;

    #[async_trait]
    impl HttpClientPort for FailingHttp {
        async fn get(&self, _url: &str) -> std::result::Result<HttpGetResult, String> {
            Err("connection refused".to_string())
        }
    }

    fn fetcher(http: Arc<dyn HttpClientPort>) -> Fetcher {
        Fetcher::new(http, "https://example.test".to_string(), 0)
    }

    #[test]
    fn envelope_unwraps_bare_arrays_and_data_objects() {
        assert_eq!(unwrap_envelope(json!([{ "a": 1 }])).len(), 1);
        assert_eq!(unwrap_envelope(json!({ "data": [{}, {}] })).len(), 2);
        assert!(unwrap_envelope(json!({ "ok": false })).is_empty());
        assert!(unwrap_envelope(json!("nope")).is_empty());
    }

    #[tokio::test]
    async fn http_error_becomes_unavailable() {
        let f = fetcher(Arc::new(StubHttp {
            status: 503,
            body: "<html>maintenance window</html>",
        }));
        match f.fetch_collection("contratos", "/contrato").await.unwrap() {
            FetchOutcome::Unavailable(failure) => {
                assert_eq!(failure.error, "HTTP 503");
                assert_eq!(failure.source, "contratos");
                assert!(failure.body_prefix.contains("maintenance"));
            }
            FetchOutcome::Collection(_) => panic!("expected unavailable"),
        }
    }

    #[tokio::test]
    async fn network_error_becomes_unavailable() {
        let f = fetcher(Arc::new(FailingHttp));
        match f.fetch_collection("receitas", "/receita").await.unwrap() {
            FetchOutcome::Unavailable(failure) => {
                assert_eq!(failure.error, "connection refused");
            }
            FetchOutcome::Collection(_) => panic!("expected unavailable"),
        }
    }

    #[tokio::test]
    async fn malformed_json_is_fatal() {
        let f = fetcher(Arc::new(StubHttp {
            status: 200,
            body: "<html>not json</html>",
        }));
        assert!(f.fetch_collection("contratos", "/contrato").await.is_err());
    }

    #[tokio::test]
    async fn body_prefix_is_capped() {
        let body: String = "x".repeat(1000);
        let leaked: &'static str = Box::leak(body.into_boxed_str());
        let f = fetcher(Arc::new(StubHttp { status: 500, body: leaked }));
        match f.fetch_collection("despesas", "/despesa").await.unwrap() {
            FetchOutcome::Unavailable(failure) => {
                assert_eq!(failure.body_prefix.chars().count(), BODY_PREFIX_LEN);
            }
            FetchOutcome::Collection(_) => panic!("expected unavailable"),
        }
    }
}
