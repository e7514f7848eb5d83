//! Item model and the queries that run over fetched items.

pub mod filter;
pub mod types;

pub use filter::{filter_by_kind, search};
pub use types::*;
