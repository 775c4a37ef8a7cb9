//! Search API module
//!
//! This module contains the record types returned by the API, URL
//! construction, and the authenticated fetcher.

pub mod client;
pub mod models;
pub mod request;

pub use client::*;
pub use models::*;
pub use request::*;
