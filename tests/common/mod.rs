//! Shared fakes for integration tests

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use ghw::api::ApiFetcher;
use ghw::error::{GhwError, Result};
use serde_json::{json, Value};
use url::Url;

pub fn base_url() -> Url {
    Url::parse("https://api.example.test/api/v2").unwrap()
}

pub fn query_of(url: &Url) -> HashMap<String, String> {
    url.query_pairs().into_owned().collect()
}

/// Serves a fixed record set, slicing it by the `start`/`limit` query pair
pub struct DatasetFetcher {
    key: &'static str,
    records: Vec<Value>,
    reported_total: i64,
    fail_at_offset: Option<i64>,
    requests: Mutex<Vec<Url>>,
}

impl DatasetFetcher {
    pub fn files(records: Vec<Value>, reported_total: i64) -> Self {
        Self::new("files", records, reported_total)
    }

    pub fn buckets(records: Vec<Value>, reported_total: i64) -> Self {
        Self::new("buckets", records, reported_total)
    }

    fn new(key: &'static str, records: Vec<Value>, reported_total: i64) -> Self {
        Self {
            key,
            records,
            reported_total,
            fail_at_offset: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answer HTTP 500 once the requested offset reaches `offset`
    pub fn failing_at(mut self, offset: i64) -> Self {
        self.fail_at_offset = Some(offset);
        self
    }

    pub fn requests(&self) -> Vec<Url> {
        self.requests.lock().unwrap().clone()
    }

    /// `start` values of every request, in order
    pub fn offsets(&self) -> Vec<i64> {
        self.requests()
            .iter()
            .map(|url| query_of(url)["start"].parse().unwrap())
            .collect()
    }

    /// `limit` values of every request, in order
    pub fn limits(&self) -> Vec<i64> {
        self.requests()
            .iter()
            .map(|url| query_of(url)["limit"].parse().unwrap())
            .collect()
    }
}

#[async_trait]
impl ApiFetcher for DatasetFetcher {
    async fn get(&self, url: &Url) -> Result<Vec<u8>> {
        self.requests.lock().unwrap().push(url.clone());

        let query = query_of(url);
        let start: i64 = query["start"].parse().unwrap();
        let limit: i64 = query["limit"].parse().unwrap();

        if self.fail_at_offset.is_some_and(|fail| start >= fail) {
            return Err(GhwError::http_status(500, url.as_str()));
        }

        let from = (start.max(0) as usize).min(self.records.len());
        let to = (from + limit as usize).min(self.records.len());
        let page = &self.records[from..to];

        let mut envelope = serde_json::Map::new();
        envelope.insert(self.key.to_string(), Value::Array(page.to_vec()));
        envelope.insert("meta".to_string(), json!({"results": self.reported_total}));
        Ok(serde_json::to_vec(&Value::Object(envelope)).unwrap())
    }
}

/// Returns canned responses in order
pub struct ScriptedFetcher {
    responses: Mutex<VecDeque<Result<Vec<u8>>>>,
    requests: Mutex<Vec<Url>>,
}

impl ScriptedFetcher {
    pub fn new(responses: Vec<Result<Vec<u8>>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<Url> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ApiFetcher for ScriptedFetcher {
    async fn get(&self, url: &Url) -> Result<Vec<u8>> {
        self.requests.lock().unwrap().push(url.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected request to {}", url))
    }
}

/// A full file record as the API sends it
pub fn file_json(i: usize) -> Value {
    let id = if i % 2 == 0 {
        json!(i)
    } else {
        json!(format!("f-{}", i))
    };
    json!({
        "id": id,
        "bucket": format!("bucket-{}", i % 3),
        "bucketId": i % 3,
        "name": format!("file-{}.pdf", i),
        "url": format!("https://bucket-{}.s3.amazonaws.com/file-{}.pdf", i % 3, i),
        "size": 1000 + i,
        "type": "pdf",
        "lastModified": 1_700_000_000 + i as i64
    })
}

pub fn file_dataset(count: usize) -> Vec<Value> {
    (0..count).map(file_json).collect()
}

pub fn bucket_json(id: usize, name: &str, provider: &str) -> Value {
    json!({
        "id": id,
        "bucket": name,
        "fileCount": id * 10,
        "type": provider
    })
}
