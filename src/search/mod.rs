//! Search and export module
//!
//! This module drives paginated queries against the files and buckets
//! endpoints and routes the results to CSV files or rendered output.

pub mod manager;
pub mod paginator;
pub mod sink;

pub use manager::*;
pub use paginator::*;
pub use sink::*;
