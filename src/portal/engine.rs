//! Pagination engine: fetch every manifest row for one call sign.
//!
//! Drives the transport session page by page, normalizing rows as they
//! arrive. Failure handling is positional: a first-page failure means no
//! data exists yet and the run fails outright; a later-page failure
//! truncates pagination but keeps everything already fetched, because
//! partial results are still valuable to the caller.

use crate::config::PortalConfig;
use crate::error::FetchError;
use crate::manifest::{Leg, ManifestRecord};
use crate::portal::normalize::normalize_row;
use crate::portal::session::PortalSession;
use crate::progress::{emit, ProgressEventKind, ProgressSender};

/// Terminal failure of one call-sign run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunFailure {
    /// Human-readable description of what went wrong.
    pub reason: String,
    /// Bounded raw-body excerpt when the failure was a parse error.
    pub raw_snippet: Option<String>,
}

impl From<FetchError> for RunFailure {
    fn from(e: FetchError) -> Self {
        Self {
            raw_snippet: e.snippet().map(str::to_string),
            reason: e.to_string(),
        }
    }
}

/// Result of one call-sign run: all fetched records, or a terminal
/// failure with nothing retained.
pub type RunOutcome = Result<Vec<ManifestRecord>, RunFailure>;

/// Fetch all manifest rows for `call_sign`, paging until done.
///
/// Termination: the row list comes back empty, the accumulated count
/// reaches the server-reported total, or a page comes back shorter than
/// the requested page size (guards against a total that undercounts and
/// would otherwise loop forever).
pub async fn run(
    session: &PortalSession,
    config: &PortalConfig,
    leg: Leg,
    call_sign: &str,
    progress: &Option<ProgressSender>,
) -> RunOutcome {
    let mut seq = 0u64;
    emit(
        progress,
        &mut seq,
        ProgressEventKind::RunStarted {
            leg,
            call_sign: call_sign.to_string(),
        },
    );

    session.warm_up().await;

    let mut records: Vec<ManifestRecord> = Vec::new();
    let mut page: u32 = 1;

    loop {
        emit(
            progress,
            &mut seq,
            ProgressEventKind::PageStarted {
                call_sign: call_sign.to_string(),
                page,
            },
        );

        let page_result = match session.fetch_page(call_sign, page, config.page_size).await {
            Ok(p) => p,
            Err(e) if records.is_empty() => {
                tracing::warn!("{call_sign}: first page failed: {e}");
                return Err(RunFailure::from(e));
            }
            Err(e) => {
                // Keep what we have; a later-page failure never discards
                // already-fetched pages.
                tracing::warn!(
                    "{call_sign}: page {page} failed after {} record(s), stopping: {e}",
                    records.len()
                );
                emit(
                    progress,
                    &mut seq,
                    ProgressEventKind::RunTruncated {
                        call_sign: call_sign.to_string(),
                        records_kept: records.len(),
                        reason: e.to_string(),
                    },
                );
                break;
            }
        };

        if page_result.rows.is_empty() {
            break;
        }

        let fetched = page_result.rows.len();
        for row in &page_result.rows {
            records.push(normalize_row(row, call_sign));
        }

        if records.len() as u64 >= page_result.total {
            break;
        }
        if fetched < config.page_size as usize {
            break;
        }

        page += 1;
        tokio::time::sleep(config.page_delay).await;
    }

    emit(
        progress,
        &mut seq,
        ProgressEventKind::RunCompleted {
            call_sign: call_sign.to_string(),
            records: records.len(),
        },
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_failure_from_fetch_error() {
        let failure = RunFailure::from(FetchError::Status(502));
        assert_eq!(failure.reason, "server error: HTTP 502");
        assert!(failure.raw_snippet.is_none());

        let failure = RunFailure::from(FetchError::Parse {
            message: "expected value".into(),
            snippet: Some("<html>".into()),
        });
        assert_eq!(failure.raw_snippet.as_deref(), Some("<html>"));
    }
}
