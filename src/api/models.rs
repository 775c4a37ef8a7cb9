//! Data models for the search API
//!
//! This module defines the records returned by the files and buckets
//! endpoints, the page envelope wrapping them, and the stats snapshot.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Treat an explicit JSON `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Opaque identifier that the API sends either as a number or a string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

/// Render an optional id for tabular output
pub fn display_id(id: &Option<RecordId>) -> String {
    id.as_ref().map(ToString::to_string).unwrap_or_default()
}

/// A file found inside an open bucket
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FileRecord {
    pub id: Option<RecordId>,
    #[serde(deserialize_with = "null_as_default")]
    pub bucket: String,
    pub bucket_id: Option<RecordId>,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub size: i64,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub file_type: String,
    /// Epoch seconds
    #[serde(deserialize_with = "null_as_default")]
    pub last_modified: i64,
}

/// An open bucket
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BucketRecord {
    pub id: Option<RecordId>,
    #[serde(deserialize_with = "null_as_default")]
    pub bucket: String,
    #[serde(deserialize_with = "null_as_default")]
    pub file_count: i64,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub provider: String,
}

impl BucketRecord {
    /// Case-insensitive exact match on the provider tag
    pub fn matches_provider(&self, provider: &str) -> bool {
        self.provider.to_lowercase() == provider.to_lowercase()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub results: Option<i64>,
}

/// One page of results plus the reported total for the query
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    #[serde(
        alias = "files",
        alias = "buckets",
        default = "Vec::new",
        deserialize_with = "null_as_default"
    )]
    pub records: Vec<T>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub meta: Meta,
}

impl<T> Envelope<T> {
    /// Reported total, `None` when the API sent nothing usable
    pub fn total(&self) -> Option<u64> {
        self.meta
            .results
            .filter(|n| *n > 0)
            .map(|n| n as u64)
    }
}

/// A paginated collection exposed by the API
pub trait Resource: DeserializeOwned + Serialize + Send + Sync + 'static {
    /// Endpoint path below the API root
    const PATH: &'static str;
    /// Human readable plural used in logs
    const KIND: &'static str;
}

impl Resource for FileRecord {
    const PATH: &'static str = "/files";
    const KIND: &'static str = "files";
}

impl Resource for BucketRecord {
    const PATH: &'static str = "/buckets";
    const KIND: &'static str = "buckets";
}

/// Cloud platform hosting a bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudProvider {
    Aws,
    Azure,
    DigitalOcean,
    Gcp,
    Alibaba,
}

impl CloudProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "aws",
            CloudProvider::Azure => "azure",
            CloudProvider::DigitalOcean => "dos",
            CloudProvider::Gcp => "gcp",
            CloudProvider::Alibaba => "ali",
        }
    }
}

impl FromStr for CloudProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "aws" => Ok(CloudProvider::Aws),
            "azure" => Ok(CloudProvider::Azure),
            "dos" | "digitalocean" => Ok(CloudProvider::DigitalOcean),
            "gcp" => Ok(CloudProvider::Gcp),
            "ali" | "alibaba" => Ok(CloudProvider::Alibaba),
            other => Err(format!(
                "unknown cloud type '{}' (expected aws|azure|dos|gcp|ali)",
                other
            )),
        }
    }
}

impl fmt::Display for CloudProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate counters from the stats endpoint
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StatsSnapshot {
    pub stats: StatsCounts,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatsCounts {
    pub files_count: i64,
    pub aws_count: i64,
    pub azure_count: i64,
    pub dos_count: i64,
    pub gcp_count: i64,
    pub ali_count: i64,
}

impl StatsCounts {
    pub fn bucket_total(&self) -> i64 {
        self.aws_count + self.azure_count + self.dos_count + self.gcp_count + self.ali_count
    }
}
