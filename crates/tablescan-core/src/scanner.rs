//! The filtered scanner: paginate, deserialize, post-filter, count.

use std::time::Instant;

use futures::future::Either;
use futures::stream::{self, Stream};
use tablescan_model::{Cursor, Item, PageRequest, TableRef};
use typed_builder::TypedBuilder;

use crate::error::ScanError;
use crate::expression::{ExpressionBuilder, FilterExpr, Projection};
use crate::record::FromItem;
use crate::source::PageSource;

/// Per-invocation scan options.
///
/// The scanner never overrides the store's page sizing; the only knobs are
/// the read-consistency passthrough and an optional deadline checked before
/// each page request.
#[derive(Debug, Clone, Default, TypedBuilder)]
pub struct ScanOptions {
    /// Request strongly consistent reads. Passed through to the store
    /// unchanged; the scanner attaches no semantics to it.
    #[builder(default = false)]
    pub consistent_read: bool,

    /// Abandon the scan with [`ScanError::DeadlineExceeded`] once this
    /// instant has passed. Checked between pages only; an in-flight page
    /// fetch is never interrupted.
    #[builder(default, setter(strip_option))]
    pub deadline: Option<Instant>,
}

/// Final output of a collecting scan: the records that passed both the
/// remote filter and the local predicate, in store order, plus their count.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanResult<R> {
    /// Matching records in the order the store returned them.
    pub records: Vec<R>,
    /// Number of matching records.
    pub count: usize,
}

/// Scans a table through a [`PageSource`], applying a remote filter, a
/// projection, and a local predicate.
///
/// Each invocation owns its cursor and accumulator exclusively; the scanner
/// itself is stateless between calls and can be shared freely.
#[derive(Debug, Clone)]
pub struct FilteredScanner<S> {
    source: S,
}

impl<S: PageSource> FilteredScanner<S> {
    /// Wrap a page source.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Scan the whole table and collect every matching record.
    ///
    /// `filter` narrows rows server-side before they cross the wire;
    /// `predicate` narrows records client-side after deserialization.
    /// Either may be a no-op (`None` / `|_| true`). Pagination is
    /// transparent and strictly sequential.
    ///
    /// # Errors
    /// Fails with [`ScanError`] on the first unrecoverable fault. Nothing
    /// is retried, and a failure on a later page discards all earlier
    /// results -- there is no partial-success mode.
    pub async fn scan<R, P>(
        &self,
        table: &TableRef,
        filter: Option<FilterExpr>,
        projection: Option<Projection>,
        mut predicate: P,
        options: &ScanOptions,
    ) -> Result<ScanResult<R>, ScanError>
    where
        R: FromItem,
        P: FnMut(&R) -> bool,
    {
        let request = build_request(table, filter, projection, options)?;
        let mut records = Vec::new();
        let mut cursor: Option<Cursor> = None;
        let mut pages = 0_usize;
        loop {
            check_deadline(options.deadline)?;
            let page = self.source.fetch_page(&request, cursor.as_ref()).await?;
            tracing::debug!(
                table = %request.table_name,
                page = pages,
                items = page.items.len(),
                has_more = page.last_evaluated_key.is_some(),
                "fetched scan page"
            );
            pages += 1;
            for item in &page.items {
                let record = R::from_item(item)?;
                if predicate(&record) {
                    records.push(record);
                }
            }
            match page.last_evaluated_key {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }
        let count = records.len();
        tracing::debug!(table = %request.table_name, pages, count, "scan complete");
        Ok(ScanResult { records, count })
    }

    /// Scan lazily: matching records are yielded as pages arrive instead of
    /// being collected.
    ///
    /// Semantics are identical to [`FilteredScanner::scan`], including
    /// fail-fast: the first error terminates the stream with `Err` and no
    /// further items follow. Dropping the stream between pages cancels the
    /// scan.
    pub fn scan_stream<'a, R, P>(
        &'a self,
        table: &TableRef,
        filter: Option<FilterExpr>,
        projection: Option<Projection>,
        predicate: P,
        options: &ScanOptions,
    ) -> impl Stream<Item = Result<R, ScanError>> + 'a
    where
        R: FromItem + 'a,
        P: FnMut(&R) -> bool + 'a,
    {
        let request = match build_request(table, filter, projection, options) {
            Ok(request) => request,
            Err(err) => return Either::Left(stream::once(async move { Err(err) })),
        };
        let state = StreamState {
            request,
            cursor: None,
            buffer: Vec::new().into_iter(),
            exhausted: false,
            predicate,
            deadline: options.deadline,
            pages: 0,
        };
        Either::Right(stream::try_unfold(state, move |mut state| async move {
            loop {
                while let Some(item) = state.buffer.next() {
                    let record = R::from_item(&item)?;
                    if (state.predicate)(&record) {
                        return Ok(Some((record, state)));
                    }
                }
                if state.exhausted {
                    return Ok(None);
                }
                check_deadline(state.deadline)?;
                let page = self
                    .source
                    .fetch_page(&state.request, state.cursor.as_ref())
                    .await?;
                tracing::debug!(
                    table = %state.request.table_name,
                    page = state.pages,
                    items = page.items.len(),
                    has_more = page.last_evaluated_key.is_some(),
                    "fetched scan page"
                );
                state.pages += 1;
                state.cursor = page.last_evaluated_key;
                state.exhausted = state.cursor.is_none();
                state.buffer = page.items.into_iter();
            }
        }))
    }
}

struct StreamState<P> {
    request: PageRequest,
    cursor: Option<Cursor>,
    buffer: std::vec::IntoIter<Item>,
    exhausted: bool,
    predicate: P,
    deadline: Option<Instant>,
    pages: usize,
}

fn build_request(
    table: &TableRef,
    filter: Option<FilterExpr>,
    projection: Option<Projection>,
    options: &ScanOptions,
) -> Result<PageRequest, ScanError> {
    let mut builder = ExpressionBuilder::new();
    if let Some(filter) = filter {
        builder = builder.with_filter(filter);
    }
    if let Some(projection) = projection {
        builder = builder.with_projection(projection);
    }
    let wire = builder.build()?;
    Ok(PageRequest {
        table_name: table.as_str().to_owned(),
        filter_expression: wire.filter_expression,
        projection_expression: wire.projection_expression,
        expression_attribute_names: wire.names,
        expression_attribute_values: wire.values,
        consistent_read: options.consistent_read.then_some(true),
    })
}

fn check_deadline(deadline: Option<Instant>) -> Result<(), ScanError> {
    if deadline.is_some_and(|d| Instant::now() >= d) {
        return Err(ScanError::DeadlineExceeded);
    }
    Ok(())
}
