//! CLI module for ghw
//!
//! This module contains all command-line interface related functionality,
//! including argument parsing and command execution.

pub mod commands;

pub use commands::*;
