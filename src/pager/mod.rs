//! Sequential page walker.
//!
//! [`Pager`] asks a [`PageSource`] for page 1, reads the pagination metadata
//! that comes back, and keeps requesting the next page until the reported
//! page count is reached. Requests never overlap; a failed page ends the
//! walk and its error is returned to the caller.
//!
//! # Example
//!
//! ```ignore
//! use item_pager::config::ClientConfig;
//! use item_pager::pager::{HttpPageSource, Pager};
//!
//! let config = ClientConfig::from_env()?;
//! let source = HttpPageSource::new(&config)?;
//! let fetched = Pager::new(Arc::new(source), config.per_page).fetch_all().await?;
//! println!("{} items over {} pages", fetched.items.len(), fetched.pages_fetched);
//! ```

pub mod http;

use std::sync::Arc;

use async_stream::stream;
use async_trait::async_trait;
use futures::{Stream, TryStreamExt};
use tracing::{debug, info, warn};

use crate::error::FetchResult;
use crate::items::{Item, PageResponse};

pub use http::HttpPageSource;

/// Anything that can serve one page of items.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch page `page` (1-indexed) holding up to `per_page` items.
    async fn fetch_page(&self, page: u32, per_page: u32) -> FetchResult<PageResponse>;
}

/// Everything gathered by [`Pager::fetch_all`].
#[derive(Debug, Clone, Default)]
pub struct FetchedItems {
    /// Items from every page, in page order.
    pub items: Vec<Item>,
    /// `total` as reported by the last page.
    pub total: u64,
    pub pages_fetched: u32,
    /// Server request id of each page, in page order.
    pub request_ids: Vec<String>,
}

/// Walks every page of a [`PageSource`].
pub struct Pager {
    source: Arc<dyn PageSource>,
    per_page: u32,
}

impl Pager {
    pub fn new(source: Arc<dyn PageSource>, per_page: u32) -> Self {
        Self { source, per_page }
    }

    /// Lazily yields validated pages, one request at a time.
    ///
    /// The stream ends after the page whose number reaches the reported page
    /// count, or right after the first error.
    pub fn pages(&self) -> impl Stream<Item = FetchResult<PageResponse>> {
        let source = Arc::clone(&self.source);
        let per_page = self.per_page;

        stream! {
            let mut page = 1u32;
            loop {
                let result = fetch_validated(&*source, page, per_page).await;
                let last = match &result {
                    Ok(response) => response.pagination.is_last_page(),
                    Err(_) => true,
                };
                yield result;

                if last {
                    break;
                }
                page += 1;
            }
        }
    }

    /// Fetches all pages and concatenates their items.
    ///
    /// # Errors
    ///
    /// Returns the first `FetchError` hit by any page; nothing gathered before
    /// it is returned.
    pub async fn fetch_all(&self) -> FetchResult<FetchedItems> {
        let pages = self.pages();
        futures::pin_mut!(pages);

        let mut fetched = FetchedItems::default();
        while let Some(page) = pages.try_next().await? {
            fetched.total = page.pagination.total;
            fetched.pages_fetched += 1;
            fetched.request_ids.push(page.request_id);
            fetched.items.extend(page.data);
        }

        if fetched.items.len() as u64 != fetched.total {
            warn!(
                received = fetched.items.len(),
                reported = fetched.total,
                "Item count differs from reported total"
            );
        }

        info!(
            items = fetched.items.len(),
            pages = fetched.pages_fetched,
            "Fetched all pages"
        );

        Ok(fetched)
    }

    /// Fetches all pages and returns only the items.
    pub async fn fetch_all_items(&self) -> FetchResult<Vec<Item>> {
        Ok(self.fetch_all().await?.items)
    }
}

/// Fetch one page and check it answers the request.
async fn fetch_validated(
    source: &dyn PageSource,
    page: u32,
    per_page: u32,
) -> FetchResult<PageResponse> {
    debug!(page, per_page, "Fetching page");
    let response = source.fetch_page(page, per_page).await?;
    response.validate(page)?;
    debug!(
        page,
        pages = response.pagination.pages,
        items = response.data.len(),
        request_id = %response.request_id,
        "Page fetched"
    );
    Ok(response)
}
