//! Export module for fetched items.
//!
//! Provides JSON snapshot writing and loading.

pub mod snapshot;

pub use snapshot::{read_snapshot, write_snapshot, ItemSnapshot};
