//! Command-line interface for item-pager.
//!
//! Provides commands for fetching all pages of an items API and for
//! filtering or searching the fetched items.

mod commands;

pub use commands::{parse_cli, run, run_with_cli, Cli, Commands};
