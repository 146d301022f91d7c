use thiserror::Error;
use tracing::{debug, info, warn};

use crate::archive::lister::list_candidates;
use crate::event::filter::{drain_object, ObjectVerdict, TimeWindow};
use crate::event::record::DecodeError;
use crate::event::stream::gzip_lines;
use crate::sink::{Sink, SinkError};
use crate::store::{ObjectStore, StoreError};

#[derive(Debug, Error)]
pub enum ExtractError {
    /// Pagination state is unrecoverable after a failed listing call and a
    /// partial key set would silently under-report, so this aborts the run.
    #[error("listing failed: {0}")]
    Listing(#[source] StoreError),

    #[error("sink error: {0}")]
    Sink(#[from] SinkError),
}

/// Why one candidate object was skipped without aborting the run.
#[derive(Debug, Error)]
enum SkipReason {
    #[error("fetch failed: {0}")]
    Fetch(#[from] StoreError),

    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),
}

#[derive(Debug, Clone)]
pub struct ExtractRequest {
    pub prefix: String,
    pub window: TimeWindow,
    pub event_type: String,
    /// Listing-time end-time pruning. Off means every listed key is fetched;
    /// the per-record predicate keeps the output identical.
    pub prune: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Keys that survived listing (after pruning).
    pub candidates: usize,
    /// Objects fetched and drained to a verdict.
    pub fetched: usize,
    /// Objects skipped over a fetch or decode failure.
    pub skipped: usize,
    /// Rows appended to the sink.
    pub matched_rows: usize,
    /// Whether the run stopped before exhausting the candidate set.
    pub stopped_early: bool,
}

/// Drive one extraction: list candidates, drain each in listing order, stop
/// early once content is known to lie past the window. One object at a time,
/// one sink writer; a failed object is logged and skipped, never fatal.
pub async fn run_extract(
    store: &dyn ObjectStore,
    sink: &mut dyn Sink,
    request: &ExtractRequest,
) -> Result<RunSummary, ExtractError> {
    let mut summary = RunSummary::default();

    let result = drain_candidates(store, sink, request, &mut summary).await;

    // flush on every exit path, including fatal listing/sink errors
    let finish_result = sink.finish();
    result?;
    finish_result?;

    info!(
        candidates = summary.candidates,
        fetched = summary.fetched,
        skipped = summary.skipped,
        matched_rows = summary.matched_rows,
        stopped_early = summary.stopped_early,
        "extract complete"
    );

    Ok(summary)
}

async fn drain_candidates(
    store: &dyn ObjectStore,
    sink: &mut dyn Sink,
    request: &ExtractRequest,
    summary: &mut RunSummary,
) -> Result<(), ExtractError> {
    let prune_before = request.prune.then(|| request.window.start());

    let candidates = list_candidates(store, &request.prefix, prune_before)
        .await
        .map_err(ExtractError::Listing)?;
    summary.candidates = candidates.len();

    for key in &candidates {
        match fetch_and_filter(store, key, request).await {
            Ok(ObjectVerdict::Drained(records)) => {
                summary.fetched += 1;
                let appended = sink.append(&records)?;
                summary.matched_rows += appended;
                debug!(key = %key, rows = appended, "object drained");
            }
            Ok(ObjectVerdict::EndsBeforeWindow) => {
                summary.fetched += 1;
                debug!(key = %key, "object ends before window");
            }
            Ok(ObjectVerdict::BeginsAfterWindow) => {
                summary.fetched += 1;
                summary.stopped_early = true;
                info!(key = %key, "object begins past window end, stopping");
                break;
            }
            Err(reason) => {
                summary.skipped += 1;
                warn!(key = %key, error = %reason, "skipping object");
            }
        }
    }

    Ok(())
}

async fn fetch_and_filter(
    store: &dyn ObjectStore,
    key: &str,
    request: &ExtractRequest,
) -> Result<ObjectVerdict, SkipReason> {
    let payload = store.get(key).await?;
    let verdict = drain_object(gzip_lines(payload), &request.window, &request.event_type)?;
    Ok(verdict)
}
