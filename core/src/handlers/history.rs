use tracing::debug;

use crate::error::ApiError;
use crate::models::{HistoryEntry, HistoryRequest};
use crate::state::AppState;

/// Return every record written for the user's email, across however many
/// store pages it takes. The store decides the page size; this flow follows
/// the continuation cursor until it runs out and concatenates eagerly, so
/// callers always observe the full result set.
pub async fn search_history(
    state: &AppState,
    request: &HistoryRequest,
) -> Result<Vec<HistoryEntry>, ApiError> {
    let mut entries = Vec::new();
    let mut cursor = None;

    loop {
        let page = state
            .records
            .query_page(&request.email_id, cursor)
            .await
            .map_err(ApiError::HistoryQuery)?;
        entries.extend(page.entries);
        match page.next {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    debug!(count = entries.len(), "Search history assembled");
    Ok(entries)
}
