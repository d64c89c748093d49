use serde::{Deserialize, Serialize};
use std::future::Future;

// ============================================================================
// Pagination
// ============================================================================
//
// Lists use `page`/`limit` query parameters and accumulate across "load
// more" calls. Refreshing resets to page 1. Every page is a fresh round
// trip; nothing is cached, deduplicated or prefetched.
//
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    pub const DEFAULT_LIMIT: u32 = 20;

    /// Pages are 1-based; zero is bumped to one for both fields
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    pub fn first(limit: u32) -> Self {
        Self::new(1, limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(Self::DEFAULT_LIMIT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: u32,
    pub limit: u32,
    #[serde(default)]
    pub total: u64,
    pub total_pages: u32,
}

/// List response: `{ "data": [...], "meta": {...} }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

/// Items accumulated across pages of one list
#[derive(Debug, Clone)]
pub struct PagedList<T> {
    items: Vec<T>,
    limit: u32,
    loaded_page: u32,
    total_pages: Option<u32>,
    total: Option<u64>,
}

impl<T> PagedList<T> {
    pub fn new(limit: u32) -> Self {
        Self {
            items: Vec::new(),
            limit: limit.max(1),
            loaded_page: 0,
            total_pages: None,
            total: None,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Last page appended; 0 before the first load
    pub fn loaded_page(&self) -> u32 {
        self.loaded_page
    }

    /// Total reported by the most recent page
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    pub fn has_more(&self) -> bool {
        match self.total_pages {
            None => true,
            Some(total_pages) => self.loaded_page < total_pages,
        }
    }

    pub fn next_request(&self) -> Option<PageRequest> {
        self.has_more()
            .then(|| PageRequest::new(self.loaded_page + 1, self.limit))
    }

    /// Append a fetched page
    ///
    /// The page counter always advances, even if the server echoes a stale
    /// page number.
    pub fn extend(&mut self, page: Paginated<T>) {
        self.loaded_page = page.meta.page.max(self.loaded_page + 1);
        self.total_pages = Some(page.meta.total_pages);
        self.total = Some(page.meta.total);
        self.items.extend(page.data);
    }

    /// Pull-to-refresh: drop everything and start again from page 1
    pub fn refresh(&mut self) {
        self.items.clear();
        self.loaded_page = 0;
        self.total_pages = None;
        self.total = None;
    }

    /// Fetch and append the next page; returns how many items arrived
    pub async fn load_more<F, Fut, E>(&mut self, fetch: F) -> Result<usize, E>
    where
        F: FnOnce(PageRequest) -> Fut,
        Fut: Future<Output = Result<Paginated<T>, E>>,
    {
        let Some(request) = self.next_request() else {
            return Ok(0);
        };

        let page = fetch(request).await?;
        let received = page.data.len();
        self.extend(page);

        tracing::debug!(
            page = self.loaded_page,
            received = received,
            has_more = self.has_more(),
            "Loaded page"
        );

        Ok(received)
    }

    /// Keep loading until the last page
    pub async fn load_all<F, Fut, E>(&mut self, mut fetch: F) -> Result<usize, E>
    where
        F: FnMut(PageRequest) -> Fut,
        Fut: Future<Output = Result<Paginated<T>, E>>,
    {
        let mut received = 0;
        while self.has_more() {
            received += self.load_more(&mut fetch).await?;
        }
        Ok(received)
    }
}
