//! CLI commands and argument parsing
//!
//! This module defines the command-line interface using clap and
//! dispatches the files, buckets and stats commands.

use std::path::Path;
use std::str::FromStr;

use clap::{ArgAction, Parser};
use tracing::debug;

use crate::api::client::HttpFetcher;
use crate::config::{ApiKey, Config};
use crate::error::{GhwError, Result};
use crate::search::{BucketSearch, FileSearch, SearchManager};

/// Long flags that may also be written with a single dash
const LONG_FLAGS: &[&str] = &[
    "apikey",
    "cmd",
    "keywords",
    "ext",
    "noext",
    "bucket",
    "limit",
    "start",
    "type",
    "onlybucket",
    "debug",
    "help",
    "version",
];

/// Rewrite `-flag` / `-flag=value` to `--flag` / `--flag=value` for known
/// long flags so both spellings parse. Everything after `--` is untouched.
pub fn normalize_args<I, S>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut normalized = Vec::new();
    let mut passthrough = false;

    for (index, arg) in args.into_iter().map(Into::into).enumerate() {
        if index == 0 || passthrough {
            normalized.push(arg);
            continue;
        }
        if arg == "--" {
            passthrough = true;
            normalized.push(arg);
            continue;
        }

        let is_single_dash_long = arg
            .strip_prefix('-')
            .filter(|rest| !rest.starts_with('-'))
            .map(|rest| rest.split('=').next().unwrap_or(rest))
            .is_some_and(|name| LONG_FLAGS.contains(&name));

        if is_single_dash_long {
            normalized.push(format!("-{}", arg));
        } else {
            normalized.push(arg);
        }
    }

    normalized
}

/// Which export to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchCommand {
    Files,
    Buckets,
    Stats,
}

impl FromStr for SearchCommand {
    type Err = GhwError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "files" => Ok(SearchCommand::Files),
            "buckets" => Ok(SearchCommand::Buckets),
            "stats" => Ok(SearchCommand::Stats),
            _ => Err(GhwError::config(format!("unknown cmd {}", s))),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "ghw")]
#[command(about = "Search open cloud buckets and files, export results as JSON or CSV")]
#[command(version, author)]
pub struct Cli {
    /// API key (or set env GHW_API_KEY)
    #[arg(long, env = "GHW_API_KEY", hide_env_values = true)]
    pub apikey: Option<String>,

    /// Command: files|buckets|stats
    #[arg(long, default_value = "files")]
    pub cmd: String,

    /// Search keywords
    #[arg(long, default_value = "")]
    pub keywords: String,

    /// Comma separated extensions filter, e.g. pdf,docx
    #[arg(long, default_value = "")]
    pub ext: String,

    /// Comma separated extensions to exclude
    #[arg(long, default_value = "")]
    pub noext: String,

    /// Bucket id or url
    #[arg(long, default_value = "")]
    pub bucket: String,

    /// Page size (1-1000). All pages are fetched until results are exhausted
    #[arg(long, default_value_t = 1000, allow_negative_numbers = true)]
    pub limit: i64,

    /// Start offset (files/buckets)
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub start: i64,

    /// Output csv file path. If empty, print json
    #[arg(short = 'o', value_name = "PATH")]
    pub output: Option<String>,

    /// Bucket cloud type filter: aws|azure|dos|gcp|ali
    #[arg(long = "type", value_name = "TYPE", default_value = "")]
    pub cloud_type: String,

    /// Output only bucket names (one per line or single column CSV).
    /// An explicit value needs `=`, as in `-onlybucket=false`
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true"
    )]
    pub onlybucket: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Output path, with an empty `-o` meaning standard output
    pub fn output_path(&self) -> Option<&Path> {
        self.output
            .as_deref()
            .filter(|path| !path.is_empty())
            .map(Path::new)
    }

    /// Layer command-line values over the loaded configuration
    pub fn apply_to(&self, mut config: Config) -> Config {
        if let Some(key) = self.apikey.as_deref().filter(|key| !key.is_empty()) {
            config.api_key = Some(ApiKey::new(key));
        }
        if self.debug {
            config.debug = true;
        }
        config
    }

    pub fn file_search(&self) -> FileSearch {
        FileSearch {
            keywords: self.keywords.clone(),
            bucket: self.bucket.clone(),
            extensions: self.ext.clone(),
            stop_extensions: self.noext.clone(),
            limit: self.limit,
            start: self.start,
        }
    }

    pub fn bucket_search(&self) -> BucketSearch {
        BucketSearch {
            keywords: self.keywords.clone(),
            provider: self.cloud_type.clone(),
            limit: self.limit,
            start: self.start,
            names_only: self.onlybucket,
        }
    }

    pub async fn execute(self, config: Config) -> Result<()> {
        let config = self.apply_to(config);
        config.validate()?;
        let command: SearchCommand = self.cmd.parse()?;
        debug!("running {:?} against {}", command, config.base_url);

        let fetcher = HttpFetcher::from_config(&config)?;
        let manager = SearchManager::new(&fetcher, config.base_url()?).with_progress(true);
        let mut out = std::io::stdout();
        let output = self.output_path();

        match command {
            SearchCommand::Files => {
                manager
                    .export_files(&self.file_search(), output, &mut out)
                    .await?;
            }
            SearchCommand::Buckets => {
                manager
                    .export_buckets(&self.bucket_search(), output, &mut out)
                    .await?;
            }
            SearchCommand::Stats => manager.export_stats(output, &mut out).await?,
        }

        Ok(())
    }
}
