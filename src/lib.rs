//! ghw - search open cloud buckets from the command line
//!
//! A command-line client for a bucket and file search API. It pages
//! through files and buckets matching a query and exports them as JSON
//! or CSV, and fetches aggregate statistics.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod search;
pub mod utils;

// Re-export commonly used types
pub use error::{GhwError, Result};
