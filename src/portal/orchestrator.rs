//! Multi-query orchestrator: run the engine per call sign, merge, classify.
//!
//! The south and north runs have no data dependency on each other, so
//! they execute concurrently — but the merge is pinned to fixed leg
//! order (south then north) regardless of which network call finishes
//! first, keeping output reproducible across runs. Each run gets its own
//! fresh session; sessions are never pooled across user-triggered
//! queries.

use serde::Serialize;

use crate::config::PortalConfig;
use crate::error::ValidationError;
use crate::manifest::{CallSigns, Leg, ManifestRecord};
use crate::portal::engine::{self, RunFailure, RunOutcome};
use crate::portal::session::PortalSession;
use crate::progress::ProgressSender;

/// One failed call-sign run, attributed to its leg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegFailure {
    pub leg: Leg,
    pub call_sign: String,
    pub reason: String,
    /// Bounded raw-body excerpt, when the portal returned something
    /// unparsable.
    pub raw_snippet: Option<String>,
}

impl std::fmt::Display for LegFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} query failed: {}",
            self.leg, self.call_sign, self.reason
        )
    }
}

/// Classified result of a full orchestrator invocation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AggregateOutcome {
    /// Every run failed; nothing to show.
    AllFailed { failures: Vec<LegFailure> },
    /// Every run succeeded but returned no rows.
    Empty,
    /// Some records arrived and at least one run failed. Both sides are
    /// surfaced; neither is discarded.
    PartialFailure {
        records: Vec<ManifestRecord>,
        failures: Vec<LegFailure>,
    },
    /// Records and no failures.
    Success { records: Vec<ManifestRecord> },
}

impl AggregateOutcome {
    /// Merged records, empty for `AllFailed` and `Empty`.
    pub fn records(&self) -> &[ManifestRecord] {
        match self {
            Self::PartialFailure { records, .. } | Self::Success { records } => records,
            _ => &[],
        }
    }

    /// Per-leg failures, empty for `Empty` and `Success`.
    pub fn failures(&self) -> &[LegFailure] {
        match self {
            Self::AllFailed { failures } | Self::PartialFailure { failures, .. } => failures,
            _ => &[],
        }
    }
}

/// Run the engine once per supplied call sign and classify the result.
///
/// Fails fast with a [`ValidationError`] before any network activity
/// when neither call sign is present. Never retries a failed leg; retry
/// is the caller's decision.
pub async fn run_query(
    config: &PortalConfig,
    signs: &CallSigns,
    progress: Option<ProgressSender>,
) -> Result<AggregateOutcome, ValidationError> {
    let legs = signs.legs();
    if legs.is_empty() {
        return Err(ValidationError::NoCallSign);
    }

    let runs = futures::future::join_all(legs.into_iter().map(|(leg, call_sign)| {
        let progress = progress.clone();
        async move {
            let outcome = match PortalSession::new(config) {
                Ok(session) => engine::run(&session, config, leg, &call_sign, &progress).await,
                Err(e) => Err(RunFailure::from(e)),
            };
            (leg, call_sign, outcome)
        }
    }))
    .await;

    Ok(classify(runs))
}

/// Merge per-leg outcomes (already in fixed leg order) into the 4-way
/// aggregate classification.
fn classify(runs: Vec<(Leg, String, RunOutcome)>) -> AggregateOutcome {
    let mut records: Vec<ManifestRecord> = Vec::new();
    let mut failures: Vec<LegFailure> = Vec::new();

    for (leg, call_sign, outcome) in runs {
        match outcome {
            Ok(mut fetched) => records.append(&mut fetched),
            Err(failure) => failures.push(LegFailure {
                leg,
                call_sign,
                reason: failure.reason,
                raw_snippet: failure.raw_snippet,
            }),
        }
    }

    match (records.is_empty(), failures.is_empty()) {
        (true, false) => AggregateOutcome::AllFailed { failures },
        (true, true) => AggregateOutcome::Empty,
        (false, false) => AggregateOutcome::PartialFailure { records, failures },
        (false, true) => AggregateOutcome::Success { records },
    }
}
