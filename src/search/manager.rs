//! Search command facade
//!
//! This module ties the paginator, the sinks and the stats endpoint
//! together into the three exports the CLI offers.

use std::io::Write;
use std::path::Path;

use tracing::{debug, info, warn};
use url::Url;

use super::paginator::{PageQuery, PageSummary, Paginator};
use super::sink::{
    CsvSink, MemorySink, BUCKET_COLUMNS, BUCKET_NAME_COLUMNS, FILE_COLUMNS,
};
use crate::api::client::ApiFetcher;
use crate::api::models::{BucketRecord, CloudProvider, FileRecord, StatsSnapshot};
use crate::api::request::build_url;
use crate::error::Result;
use crate::utils::progress::FetchProgress;

/// Filters for the files endpoint
#[derive(Debug, Clone)]
pub struct FileSearch {
    pub keywords: String,
    /// Bucket id or URL
    pub bucket: String,
    /// Comma separated allow-list
    pub extensions: String,
    /// Comma separated deny-list
    pub stop_extensions: String,
    pub limit: i64,
    pub start: i64,
}

impl Default for FileSearch {
    fn default() -> Self {
        Self {
            keywords: String::new(),
            bucket: String::new(),
            extensions: String::new(),
            stop_extensions: String::new(),
            limit: 1000,
            start: 0,
        }
    }
}

impl FileSearch {
    fn filters(&self) -> Vec<(&'static str, String)> {
        vec![
            ("keywords", self.keywords.clone()),
            ("bucket", self.bucket.clone()),
            ("extensions", self.extensions.clone()),
            ("stopextensions", self.stop_extensions.clone()),
        ]
    }
}

/// Filters for the buckets endpoint
#[derive(Debug, Clone)]
pub struct BucketSearch {
    pub keywords: String,
    /// Cloud provider tag, applied by the API and again locally
    pub provider: String,
    pub limit: i64,
    pub start: i64,
    /// Emit bucket names only
    pub names_only: bool,
}

impl Default for BucketSearch {
    fn default() -> Self {
        Self {
            keywords: String::new(),
            provider: String::new(),
            limit: 1000,
            start: 0,
            names_only: false,
        }
    }
}

impl BucketSearch {
    fn filters(&self) -> Vec<(&'static str, String)> {
        vec![
            ("keywords", self.keywords.clone()),
            ("type", self.provider.clone()),
        ]
    }
}

pub struct SearchManager<'a> {
    fetcher: &'a dyn ApiFetcher,
    base_url: Url,
    show_progress: bool,
}

impl<'a> SearchManager<'a> {
    pub fn new(fetcher: &'a dyn ApiFetcher, base_url: Url) -> Self {
        Self {
            fetcher,
            base_url,
            show_progress: false,
        }
    }

    /// Draw the fetch progress line on stderr
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    fn progress(&self) -> FetchProgress {
        if self.show_progress {
            FetchProgress::stderr()
        } else {
            FetchProgress::hidden()
        }
    }

    /// Export all matching files, as CSV to `output` or as JSON to `out`
    pub async fn export_files<W: Write>(
        &self,
        search: &FileSearch,
        output: Option<&Path>,
        out: &mut W,
    ) -> Result<PageSummary> {
        let paginator = Paginator::new(self.fetcher, self.base_url.clone());
        let query = PageQuery::new(search.filters(), search.limit, search.start);
        let mut progress = self.progress();
        let keep = |_: &FileRecord| true;

        match output {
            Some(path) => {
                let mut sink = CsvSink::create(path, FILE_COLUMNS)?;
                let summary = paginator.run(&query, keep, &mut sink, &mut progress).await?;
                sink.into_inner()?;
                writeln!(out, "completed, saved to {}", path.display())?;
                Ok(summary)
            }
            None => {
                let mut sink = MemorySink::new();
                let summary = paginator.run(&query, keep, &mut sink, &mut progress).await?;
                render_json(out, sink.records())?;
                Ok(summary)
            }
        }
    }

    /// Export all matching buckets, re-filtering by provider on the client
    pub async fn export_buckets<W: Write>(
        &self,
        search: &BucketSearch,
        output: Option<&Path>,
        out: &mut W,
    ) -> Result<PageSummary> {
        if !search.provider.is_empty() {
            if let Err(e) = search.provider.parse::<CloudProvider>() {
                warn!("{}; filtering on it anyway", e);
            }
        }

        let paginator = Paginator::new(self.fetcher, self.base_url.clone());
        let query = PageQuery::new(search.filters(), search.limit, search.start);
        let mut progress = self.progress();
        let provider = search.provider.as_str();
        let keep = |bucket: &BucketRecord| provider.is_empty() || bucket.matches_provider(provider);

        match output {
            Some(path) => {
                let columns = if search.names_only {
                    BUCKET_NAME_COLUMNS
                } else {
                    BUCKET_COLUMNS
                };
                let mut sink = CsvSink::create(path, columns)?;
                let summary = paginator.run(&query, keep, &mut sink, &mut progress).await?;
                sink.into_inner()?;
                writeln!(out, "completed, saved to {}", path.display())?;
                Ok(summary)
            }
            None => {
                let mut sink = MemorySink::new();
                let summary = paginator.run(&query, keep, &mut sink, &mut progress).await?;
                if search.names_only {
                    for bucket in sink.records() {
                        writeln!(out, "{}", bucket.bucket)?;
                    }
                } else {
                    render_json(out, sink.records())?;
                }
                Ok(summary)
            }
        }
    }

    /// Fetch the stats snapshot and pass the body through untouched
    pub async fn export_stats<W: Write>(&self, output: Option<&Path>, out: &mut W) -> Result<()> {
        let url = build_url(&self.base_url, "/stats", &[])?;
        let body = self.fetcher.get(&url).await?;

        match serde_json::from_slice::<StatsSnapshot>(&body) {
            Ok(snapshot) => info!(
                "stats: {} files across {} buckets",
                snapshot.stats.files_count,
                snapshot.stats.bucket_total()
            ),
            Err(e) => debug!("stats body not in the expected shape: {}", e),
        }

        match output {
            None => {
                out.write_all(&body)?;
                out.flush()?;
            }
            Some(path) => {
                tokio::fs::write(path, &body).await?;
                writeln!(out, "stats saved to {}", path.display())?;
            }
        }

        Ok(())
    }
}

fn render_json<W: Write, T: serde::Serialize>(out: &mut W, records: &[T]) -> Result<()> {
    let rendered = serde_json::to_string_pretty(records)?;
    writeln!(out, "{}", rendered)?;
    Ok(())
}
