//! item-pager: fetch every page of a paginated items API, then filter or
//! search the results.
//!
//! Items are tagged records (events, meetings, tasks). The [`pager`] walks
//! pages strictly in order, [`items`] holds the model plus the pure kind
//! filter and keyword search, and [`export`] saves results for offline use.

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod items;
pub mod logging;
pub mod pager;

pub use config::{ClientConfig, ConfigError};
pub use error::{FetchError, FetchResult};
pub use items::{filter_by_kind, search, Item, ItemKind, PageResponse, Pagination};
pub use pager::{FetchedItems, HttpPageSource, PageSource, Pager};
