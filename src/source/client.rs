//! Remote record source
//!
//! Provides trait-based abstraction over the HTTP endpoints so the pipeline
//! can be exercised without network access.

use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{error, info};

/// A source of raw JSON record arrays.
///
/// Failures never cross this boundary: an implementation logs the cause and
/// returns `None`, which callers treat as "no data available".
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch the array of records published at `endpoint`.
    async fn fetch(&self, endpoint: &str) -> Option<Vec<Value>>;
}

/// HTTP implementation backed by reqwest.
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    /// Create a new HTTP source with a bounded request timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Fetch `endpoint`, surfacing the failure cause.
    pub async fn try_fetch(&self, endpoint: &str) -> Result<Vec<Value>> {
        let response = self.client.get(endpoint).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus(format!("{} returned {}", endpoint, status)));
        }

        match response.json::<Value>().await? {
            Value::Array(records) => Ok(records),
            other => Err(Error::InvalidPayload(format!(
                "expected a JSON array from {}, got {}",
                endpoint,
                json_kind(&other)
            ))),
        }
    }
}

#[async_trait]
impl RecordSource for HttpSource {
    async fn fetch(&self, endpoint: &str) -> Option<Vec<Value>> {
        info!("Fetching data from {}", endpoint);
        match self.try_fetch(endpoint).await {
            Ok(records) => {
                info!(
                    "Data fetched successfully from {} ({} record(s))",
                    endpoint,
                    records.len()
                );
                Some(records)
            }
            Err(e) => {
                error!("Error fetching data from {}: {}", endpoint, e);
                None
            }
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// In-memory source for tests.
///
/// Endpoints without a registered payload behave like a failed fetch.
#[derive(Clone, Default)]
pub struct MockSource {
    responses: Arc<Mutex<HashMap<String, Vec<Value>>>>,
    /// Endpoints requested so far, in call order
    pub called_endpoints: Arc<Mutex<Vec<String>>>,
}

impl MockSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `records` for `endpoint`
    pub async fn add_response(&self, endpoint: &str, records: Vec<Value>) {
        self.responses
            .lock()
            .await
            .insert(endpoint.to_string(), records);
    }

    /// Get the list of requested endpoints
    pub async fn get_called_endpoints(&self) -> Vec<String> {
        self.called_endpoints.lock().await.clone()
    }
}

#[async_trait]
impl RecordSource for MockSource {
    async fn fetch(&self, endpoint: &str) -> Option<Vec<Value>> {
        self.called_endpoints
            .lock()
            .await
            .push(endpoint.to_string());
        self.responses.lock().await.get(endpoint).cloned()
    }
}
