//! Pagination loop shared by the files and buckets commands
//!
//! Pages are fetched strictly one after another: the next request goes out
//! only once the current page has been decoded, filtered and forwarded.

use tracing::{debug, info};
use url::Url;

use super::sink::RecordSink;
use crate::api::client::ApiFetcher;
use crate::api::models::{Envelope, Resource};
use crate::api::request::build_url;
use crate::error::{GhwError, Result};
use crate::utils::progress::FetchProgress;

pub const MAX_PAGE_SIZE: i64 = 1000;

/// Clamp a requested page size; anything outside 1..=1000 becomes 1000
pub fn effective_page_size(limit: i64) -> i64 {
    if (1..=MAX_PAGE_SIZE).contains(&limit) {
        limit
    } else {
        MAX_PAGE_SIZE
    }
}

/// What to fetch: server-side filters plus paging window
#[derive(Debug, Clone)]
pub struct PageQuery {
    pub filters: Vec<(&'static str, String)>,
    pub page_size: i64,
    pub start: i64,
}

impl PageQuery {
    pub fn new(filters: Vec<(&'static str, String)>, limit: i64, start: i64) -> Self {
        Self {
            filters,
            page_size: effective_page_size(limit),
            start,
        }
    }

    fn params_at(&self, offset: i64) -> Vec<(&'static str, String)> {
        let mut params = self.filters.clone();
        params.push(("limit", self.page_size.to_string()));
        params.push(("start", offset.to_string()));
        params
    }
}

/// Outcome of a completed pagination run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSummary {
    pub pages: u32,
    /// Records forwarded to the sink after filtering
    pub forwarded: u64,
    /// Total reported on the first page, if any
    pub total: Option<u64>,
}

pub struct Paginator<'a, F: ApiFetcher + ?Sized> {
    fetcher: &'a F,
    base_url: Url,
}

impl<'a, F: ApiFetcher + ?Sized> Paginator<'a, F> {
    pub fn new(fetcher: &'a F, base_url: Url) -> Self {
        Self { fetcher, base_url }
    }

    /// Fetch every page of `R`, keep the records accepted by `keep`
    /// and forward them to `sink`.
    pub async fn run<R, S, K>(
        &self,
        query: &PageQuery,
        keep: K,
        sink: &mut S,
        progress: &mut FetchProgress,
    ) -> Result<PageSummary>
    where
        R: Resource,
        S: RecordSink<R>,
        K: Fn(&R) -> bool,
    {
        let result = self.drive(query, keep, sink, progress).await;
        match &result {
            Ok(summary) => {
                progress.finish();
                info!(
                    "fetched {} {} in {} page(s)",
                    summary.forwarded,
                    R::KIND,
                    summary.pages
                );
            }
            Err(_) => progress.abandon(),
        }
        result
    }

    async fn drive<R, S, K>(
        &self,
        query: &PageQuery,
        keep: K,
        sink: &mut S,
        progress: &mut FetchProgress,
    ) -> Result<PageSummary>
    where
        R: Resource,
        S: RecordSink<R>,
        K: Fn(&R) -> bool,
    {
        let page_size = query.page_size;
        let mut offset = query.start;
        let mut total: Option<u64> = None;
        let mut summary = PageSummary {
            pages: 0,
            forwarded: 0,
            total: None,
        };

        loop {
            let url = build_url(&self.base_url, R::PATH, &query.params_at(offset))?;
            let body = self.fetcher.get(&url).await?;
            let page: Envelope<R> = serde_json::from_slice(&body).map_err(|e| {
                GhwError::decode(format!("{} page at offset {}: {}", R::KIND, offset, e))
            })?;

            if summary.pages == 0 {
                total = page.total();
                summary.total = total;
            }
            summary.pages += 1;

            let received = page.records.len() as i64;
            let kept: Vec<R> = page.records.into_iter().filter(|r| keep(r)).collect();
            let forwarded = kept.len() as u64;
            debug!(
                "{} page at offset {}: received {}, kept {}",
                R::KIND,
                offset,
                received,
                forwarded
            );

            sink.write_page(kept)?;
            summary.forwarded += forwarded;
            progress.advance(forwarded, total);

            let next_offset = offset.checked_add(page_size);
            let exhausted = received < page_size;
            let reached_total = total.is_some_and(|t| {
                let t = i64::try_from(t).unwrap_or(i64::MAX);
                next_offset.map_or(true, |next| next >= t)
            });
            match next_offset {
                Some(next) if !exhausted && !reached_total => offset = next,
                _ => break,
            }
        }

        Ok(summary)
    }
}
