use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::archive::key::embedded_end_time;
use crate::store::{ObjectStore, StoreError};

/// List every archived key under `prefix`, in the order the store returns
/// them, pruning keys whose embedded end-time falls before `prune_before`.
///
/// Pruning is a download-avoidance heuristic, not a correctness filter: the
/// per-record window predicate downstream still decides what is emitted, so
/// passing `None` (no pruning) only costs extra fetches. Keys that do not
/// match the naming convention cannot be classified and are kept rather than
/// silently dropped.
///
/// A listing-call failure is fatal: pagination state is lost and a partial
/// key set would silently under-report results.
pub async fn list_candidates(
    store: &dyn ObjectStore,
    prefix: &str,
    prune_before: Option<DateTime<Utc>>,
) -> Result<Vec<String>, StoreError> {
    let mut keys = Vec::new();
    let mut continuation: Option<String> = None;
    let mut pages = 0usize;
    let mut pruned = 0usize;

    loop {
        let page = store.list_page(prefix, continuation.take()).await?;
        pages += 1;

        for key in page.keys {
            if let Some(window_start) = prune_before {
                match embedded_end_time(&key) {
                    Ok(end_time) if end_time < window_start => {
                        debug!(key = %key, end_time = %end_time, "pruned, ends before window");
                        pruned += 1;
                        continue;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        warn!(key = %key, error = %e, "unclassifiable key, keeping for download");
                    }
                }
            }
            keys.push(key);
        }

        match page.next_continuation {
            Some(token) => continuation = Some(token),
            None => break,
        }
    }

    debug!(pages, kept = keys.len(), pruned, "listing complete");

    Ok(keys)
}
