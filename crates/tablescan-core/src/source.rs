//! The seam between the scanner and the store.

use std::sync::Mutex;

use async_trait::async_trait;
use tablescan_model::{AttributeValue, Cursor, Item, PageRequest, ScanPage};

use crate::error::ScanError;

/// One-page-at-a-time access to a scannable store.
///
/// The scanner drives this trait strictly sequentially: each call's cursor
/// is the one the previous page handed back, starting from `None`. An
/// implementation owns everything below the page boundary -- transport,
/// auth, wire serialization -- and reports failures through the
/// [`ScanError`] taxonomy.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch one page of scan results.
    async fn fetch_page(
        &self,
        request: &PageRequest,
        cursor: Option<&Cursor>,
    ) -> Result<ScanPage, ScanError>;
}

/// In-memory page source serving pre-chunked pages.
///
/// A test double for scanner consumers: hand it the pages "the store" would
/// return (post remote filter, post projection) and it plays them back in
/// order, chaining synthetic cursors between them. Requests are recorded
/// for inspection so tests can assert what reached the store.
#[derive(Debug, Default)]
pub struct FixtureSource {
    pages: Vec<Vec<Item>>,
    requests: Mutex<Vec<PageRequest>>,
}

impl FixtureSource {
    /// A source that returns everything in one page.
    #[must_use]
    pub fn single(items: Vec<Item>) -> Self {
        Self::paged(vec![items])
    }

    /// A source that returns the given pages in order.
    #[must_use]
    pub fn paged(pages: Vec<Vec<Item>>) -> Self {
        Self {
            pages,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every request received so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<PageRequest> {
        self.requests.lock().expect("requests lock poisoned").clone()
    }

    fn cursor_for(page: usize) -> Cursor {
        let mut key = Item::new();
        key.insert("page".to_owned(), AttributeValue::N(page.to_string()));
        Cursor::from_key(key).expect("synthetic cursor key is never empty")
    }

    fn page_index(cursor: Option<&Cursor>) -> Result<usize, ScanError> {
        let Some(cursor) = cursor else { return Ok(0) };
        cursor
            .as_key()
            .get("page")
            .and_then(AttributeValue::as_n)
            .and_then(|n| n.parse().ok())
            .ok_or_else(|| ScanError::connection("fixture received a foreign cursor"))
    }
}

#[async_trait]
impl PageSource for FixtureSource {
    async fn fetch_page(
        &self,
        request: &PageRequest,
        cursor: Option<&Cursor>,
    ) -> Result<ScanPage, ScanError> {
        self.requests
            .lock()
            .expect("requests lock poisoned")
            .push(request.clone());

        let index = Self::page_index(cursor)?;
        let items = self.pages.get(index).cloned().unwrap_or_default();
        let last_evaluated_key =
            (index + 1 < self.pages.len()).then(|| Self::cursor_for(index + 1));
        Ok(ScanPage {
            items,
            last_evaluated_key,
        })
    }
}
