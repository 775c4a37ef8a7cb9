//! Destinations for fetched records
//!
//! A run uses exactly one sink: `CsvSink` streams rows to a file and
//! flushes after every page, `MemorySink` keeps records for a final render.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::api::models::{display_id, BucketRecord, FileRecord};
use crate::error::{GhwError, Result};
use crate::utils::datetime::format_epoch_rfc3339;

/// Receives each page of records in arrival order
pub trait RecordSink<T> {
    fn write_page(&mut self, records: Vec<T>) -> Result<()>;
}

/// Accumulates records in memory
#[derive(Debug)]
pub struct MemorySink<T> {
    records: Vec<T>,
}

impl<T> MemorySink<T> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn into_records(self) -> Vec<T> {
        self.records
    }
}

impl<T> Default for MemorySink<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RecordSink<T> for MemorySink<T> {
    fn write_page(&mut self, records: Vec<T>) -> Result<()> {
        self.records.extend(records);
        Ok(())
    }
}

/// Header and row mapping for one CSV layout
pub struct Columns<T> {
    pub header: &'static [&'static str],
    pub row: fn(&T) -> Vec<String>,
}

fn file_row(file: &FileRecord) -> Vec<String> {
    vec![
        display_id(&file.id),
        file.bucket.clone(),
        display_id(&file.bucket_id),
        file.name.clone(),
        file.url.clone(),
        file.size.to_string(),
        file.file_type.clone(),
        format_epoch_rfc3339(file.last_modified),
    ]
}

fn bucket_row(bucket: &BucketRecord) -> Vec<String> {
    vec![
        display_id(&bucket.id),
        bucket.bucket.clone(),
        bucket.file_count.to_string(),
        bucket.provider.clone(),
    ]
}

fn bucket_name_row(bucket: &BucketRecord) -> Vec<String> {
    vec![bucket.bucket.clone()]
}

pub const FILE_COLUMNS: Columns<FileRecord> = Columns {
    header: &[
        "id",
        "bucket",
        "bucketId",
        "name",
        "url",
        "size",
        "type",
        "lastModified",
    ],
    row: file_row,
};

pub const BUCKET_COLUMNS: Columns<BucketRecord> = Columns {
    header: &["id", "bucket", "fileCount", "type"],
    row: bucket_row,
};

pub const BUCKET_NAME_COLUMNS: Columns<BucketRecord> = Columns {
    header: &["bucket"],
    row: bucket_name_row,
};

/// Streams records as CSV rows
pub struct CsvSink<W: Write, T> {
    writer: csv::Writer<W>,
    columns: Columns<T>,
    rows: u64,
}

impl<T> CsvSink<File, T> {
    /// Create (or truncate) `path` and write the header row
    pub fn create(path: &Path, columns: Columns<T>) -> Result<Self> {
        let file = File::create(path).map_err(|e| {
            GhwError::IoError(std::io::Error::new(
                e.kind(),
                format!("create csv {}: {}", path.display(), e),
            ))
        })?;
        Self::new(file, columns)
    }
}

impl<W: Write, T> CsvSink<W, T> {
    pub fn new(inner: W, columns: Columns<T>) -> Result<Self> {
        let mut writer = csv::Writer::from_writer(inner);
        writer.write_record(columns.header)?;
        writer.flush()?;

        Ok(Self {
            writer,
            columns,
            rows: 0,
        })
    }

    /// Number of data rows written so far
    pub fn rows(&self) -> u64 {
        self.rows
    }

    /// Flush and hand back the underlying writer
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| GhwError::IoError(e.into_error()))
    }
}

impl<W: Write, T> RecordSink<T> for CsvSink<W, T> {
    fn write_page(&mut self, records: Vec<T>) -> Result<()> {
        for record in &records {
            self.writer.write_record((self.columns.row)(record))?;
            self.rows += 1;
        }
        self.writer.flush()?;
        Ok(())
    }
}
