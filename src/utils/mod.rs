//! Utility functions module
//!
//! This module contains HTTP client construction, timestamp formatting,
//! and progress reporting helpers.

pub mod datetime;
pub mod network;
pub mod progress;

pub use datetime::*;
pub use network::*;
pub use progress::*;
