//! Pagination behaviour tests
//!
//! These tests drive the paginator against in-process fake APIs and check
//! request offsets, page-size clamping and the stop conditions.

mod common;

use common::{base_url, file_dataset, query_of, DatasetFetcher, ScriptedFetcher};
use ghw::api::FileRecord;
use ghw::error::GhwError;
use ghw::search::{MemorySink, PageQuery, Paginator};
use ghw::utils::FetchProgress;
use serde_json::json;

async fn collect_files(
    fetcher: &DatasetFetcher,
    limit: i64,
    start: i64,
) -> ghw::Result<Vec<FileRecord>> {
    let paginator = Paginator::new(fetcher, base_url());
    let mut sink = MemorySink::new();
    paginator
        .run(
            &PageQuery::new(vec![], limit, start),
            |_: &FileRecord| true,
            &mut sink,
            &mut FetchProgress::hidden(),
        )
        .await?;
    Ok(sink.into_records())
}

fn names(records: &[FileRecord]) -> Vec<String> {
    records.iter().map(|r| r.name.clone()).collect()
}

#[tokio::test]
async fn test_offsets_advance_by_page_size_until_short_page() {
    let dataset_size = 25usize;
    let expected_names: Vec<String> = (0..dataset_size)
        .map(|i| format!("file-{}.pdf", i))
        .collect();

    for page_size in [1i64, 3, 7, 10, 25, 1000] {
        let fetcher = DatasetFetcher::files(file_dataset(dataset_size), 0);
        let records = collect_files(&fetcher, page_size, 0).await.unwrap();

        let expected_requests = dataset_size as i64 / page_size + 1;
        let expected_offsets: Vec<i64> = (0..expected_requests).map(|n| n * page_size).collect();

        assert_eq!(fetcher.offsets(), expected_offsets, "page size {}", page_size);
        assert!(fetcher.limits().iter().all(|&l| l == page_size));
        assert_eq!(names(&records), expected_names, "page size {}", page_size);
    }
}

#[tokio::test]
async fn test_out_of_range_page_size_becomes_1000() {
    for limit in [0i64, -1, -1000, 1001, 5000] {
        let fetcher = DatasetFetcher::files(file_dataset(1500), 0);
        let records = collect_files(&fetcher, limit, 0).await.unwrap();

        assert_eq!(fetcher.limits(), vec![1000, 1000], "limit {}", limit);
        assert_eq!(fetcher.offsets(), vec![0, 1000]);
        assert_eq!(records.len(), 1500);
    }
}

#[tokio::test]
async fn test_zero_total_is_treated_as_unknown() {
    let fetcher = DatasetFetcher::files(file_dataset(5), 0);
    let records = collect_files(&fetcher, 2, 0).await.unwrap();

    assert_eq!(fetcher.offsets(), vec![0, 2, 4]);
    assert_eq!(records.len(), 5);
}

#[tokio::test]
async fn test_total_is_only_read_from_first_page() {
    let page = |count: usize, results: i64| -> ghw::Result<Vec<u8>> {
        let files: Vec<_> = (0..count).map(common::file_json).collect();
        Ok(serde_json::to_vec(&json!({"files": files, "meta": {"results": results}})).unwrap())
    };
    // later pages claim a total that would end the run early
    let fetcher = ScriptedFetcher::new(vec![page(2, 0), page(2, 2), page(2, 2), page(1, 2)]);

    let paginator = Paginator::new(&fetcher, base_url());
    let mut sink = MemorySink::<FileRecord>::new();
    let summary = paginator
        .run(
            &PageQuery::new(vec![], 2, 0),
            |_: &FileRecord| true,
            &mut sink,
            &mut FetchProgress::hidden(),
        )
        .await
        .unwrap();

    assert_eq!(fetcher.requests().len(), 4);
    assert_eq!(summary.total, None);
    assert_eq!(summary.forwarded, 7);
}

#[tokio::test]
async fn test_known_total_stops_on_full_page() {
    // the API reports 4 results but would keep serving full pages
    let fetcher = DatasetFetcher::files(file_dataset(10), 4);
    let records = collect_files(&fetcher, 2, 0).await.unwrap();

    assert_eq!(fetcher.offsets(), vec![0, 2]);
    assert_eq!(records.len(), 4);
}

#[tokio::test]
async fn test_start_offset_is_honoured() {
    let fetcher = DatasetFetcher::files(file_dataset(10), 10);
    let records = collect_files(&fetcher, 3, 4).await.unwrap();

    assert_eq!(fetcher.offsets(), vec![4, 7]);
    assert_eq!(
        names(&records),
        vec![
            "file-4.pdf",
            "file-5.pdf",
            "file-6.pdf",
            "file-7.pdf",
            "file-8.pdf",
            "file-9.pdf"
        ]
    );
}

#[tokio::test]
async fn test_empty_first_page_stops_immediately() {
    let fetcher = DatasetFetcher::files(vec![], 0);
    let records = collect_files(&fetcher, 100, 0).await.unwrap();

    assert_eq!(fetcher.requests().len(), 1);
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_filters_are_sent_with_every_page() {
    let fetcher = DatasetFetcher::files(file_dataset(3), 0);
    let paginator = Paginator::new(&fetcher, base_url());
    let mut sink = MemorySink::<FileRecord>::new();
    let query = PageQuery::new(
        vec![
            ("keywords", "annual report".to_string()),
            ("bucket", String::new()),
            ("extensions", "pdf,xlsx".to_string()),
        ],
        2,
        0,
    );
    paginator
        .run(&query, |_: &FileRecord| true, &mut sink, &mut FetchProgress::hidden())
        .await
        .unwrap();

    let requests = fetcher.requests();
    assert_eq!(requests.len(), 2);
    for url in &requests {
        assert_eq!(url.path(), "/api/v2/files");
        let query = query_of(url);
        assert_eq!(query["keywords"], "annual report");
        assert_eq!(query["extensions"], "pdf,xlsx");
        assert!(!query.contains_key("bucket"));
    }
}

#[tokio::test]
async fn test_error_mid_run_aborts() {
    let fetcher = DatasetFetcher::files(file_dataset(10), 0).failing_at(4);
    let err = collect_files(&fetcher, 2, 0).await.unwrap_err();

    assert!(matches!(err, GhwError::HttpStatus { status: 500, .. }));
    assert_eq!(fetcher.offsets(), vec![0, 2, 4]);
}
