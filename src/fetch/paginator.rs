//! Continuation-marker paginator

use crate::error::AuditError;
use std::future::Future;
use tracing::debug;

/// One response of a paginated list operation
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Marker to pass back for the next page, absent on the last page
    pub next_marker: Option<String>,
}

impl<T> Page<T> {
    /// A final page with no continuation
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_marker: None,
        }
    }

    pub fn with_marker(items: Vec<T>, next_marker: impl Into<String>) -> Self {
        Self {
            items,
            next_marker: Some(next_marker.into()),
        }
    }
}

/// Walks a list operation page by page, following `next_marker`.
///
/// The walk cannot be restarted: once the last page has been returned, or an
/// error has been reported, every further call yields `Ok(None)`.
pub struct Paginator<F> {
    list: F,
    marker: Option<String>,
    finished: bool,
    pages_fetched: usize,
}

impl<F> Paginator<F> {
    pub fn new(list: F) -> Self {
        Self {
            list,
            marker: None,
            finished: false,
            pages_fetched: 0,
        }
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Fetch the next page, or `None` when the listing is exhausted
    pub async fn next_page<T, Fut>(&mut self) -> Result<Option<Vec<T>>, AuditError>
    where
        F: FnMut(Option<String>) -> Fut,
        Fut: Future<Output = Result<Page<T>, AuditError>>,
    {
        if self.finished {
            return Ok(None);
        }

        let requested = self.marker.take();
        let page = match (self.list)(requested.clone()).await {
            Ok(page) => page,
            Err(e) => {
                self.finished = true;
                return Err(e);
            }
        };
        self.pages_fetched += 1;

        debug!(
            "Fetched page {} with {} items (marker: {:?}, next: {:?})",
            self.pages_fetched,
            page.items.len(),
            requested,
            page.next_marker
        );

        match page.next_marker {
            Some(next) if requested.as_deref() == Some(next.as_str()) => {
                self.finished = true;
                return Err(AuditError::StalledPagination(next));
            }
            Some(next) => self.marker = Some(next),
            None => self.finished = true,
        }

        Ok(Some(page.items))
    }
}

/// Call `list` until no continuation marker is returned and collect every item
/// in server order. Any error aborts the walk and nothing collected so far is
/// returned.
pub async fn fetch_all<T, F, Fut>(list: F) -> Result<Vec<T>, AuditError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>, AuditError>>,
{
    let mut paginator = Paginator::new(list);
    let mut items = Vec::new();

    while let Some(page) = paginator.next_page().await? {
        items.extend(page);
    }

    debug!(
        "Pagination finished after {} pages, {} items",
        paginator.pages_fetched(),
        items.len()
    );
    Ok(items)
}
