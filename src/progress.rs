// Copyright 2026 Portside Contributors
// SPDX-License-Identifier: Apache-2.0

//! Progress event types and broadcast channel for query telemetry.
//!
//! The engine emits `ProgressEvent`s while a run is in flight. They flow
//! through a `tokio::sync::broadcast` channel to any subscriber (the CLI
//! status line, tests). When no subscriber exists, events are silently
//! dropped. The core only emits; routing events to a display surface is
//! the subscriber's job.

use serde::{Deserialize, Serialize};

use crate::manifest::Leg;

/// A progress event emitted during a query run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressEvent {
    /// Monotonically increasing sequence number within one run.
    pub seq: u64,
    /// The kind of progress event.
    pub event: ProgressEventKind,
}

/// The specific kind of progress event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProgressEventKind {
    /// A call-sign run has started.
    RunStarted { leg: Leg, call_sign: String },
    /// A page fetch is about to be issued.
    PageStarted { call_sign: String, page: u32 },
    /// A later page failed; the run kept what it had.
    RunTruncated {
        call_sign: String,
        records_kept: usize,
        reason: String,
    },
    /// A call-sign run finished.
    RunCompleted { call_sign: String, records: usize },
}

impl std::fmt::Display for ProgressEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RunStarted { leg, call_sign } => {
                write!(f, "querying {leg} call sign {call_sign}...")
            }
            Self::PageStarted { call_sign, page } => {
                write!(f, "reading page {page} for {call_sign}...")
            }
            Self::RunTruncated {
                call_sign,
                records_kept,
                reason,
            } => write!(
                f,
                "{call_sign}: stopped early after {records_kept} record(s): {reason}"
            ),
            Self::RunCompleted { call_sign, records } => {
                write!(f, "{call_sign}: {records} record(s) fetched")
            }
        }
    }
}

/// Sender handle for emitting progress events.
pub type ProgressSender = tokio::sync::broadcast::Sender<ProgressEvent>;

/// Receiver handle for consuming progress events.
pub type ProgressReceiver = tokio::sync::broadcast::Receiver<ProgressEvent>;

/// Create a new progress broadcast channel with a bounded buffer.
///
/// 128 events covers a full dual-leg run with generous headroom (one
/// event per page plus a handful of lifecycle events).
pub fn channel() -> (ProgressSender, ProgressReceiver) {
    tokio::sync::broadcast::channel(128)
}

/// Emit a progress event, silently ignoring send errors (which occur
/// when no receivers are listening).
pub fn emit(tx: &Option<ProgressSender>, seq: &mut u64, event: ProgressEventKind) {
    if let Some(sender) = tx {
        *seq += 1;
        let _ = sender.send(ProgressEvent { seq: *seq, event });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_strings() {
        let started = ProgressEventKind::PageStarted {
            call_sign: "KHH123".into(),
            page: 3,
        };
        assert_eq!(started.to_string(), "reading page 3 for KHH123...");

        let truncated = ProgressEventKind::RunTruncated {
            call_sign: "KHH123".into(),
            records_kept: 1000,
            reason: "server error: HTTP 502".into(),
        };
        assert!(truncated.to_string().contains("1000 record(s)"));
        assert!(truncated.to_string().contains("HTTP 502"));
    }

    #[test]
    fn test_emit_without_receivers_does_not_panic() {
        let (tx, rx) = channel();
        drop(rx);
        let mut seq = 0;
        emit(
            &Some(tx),
            &mut seq,
            ProgressEventKind::RunCompleted {
                call_sign: "X".into(),
                records: 0,
            },
        );
        assert_eq!(seq, 1);
    }

    #[test]
    fn test_emit_none_sender_is_noop() {
        let mut seq = 0;
        emit(
            &None,
            &mut seq,
            ProgressEventKind::RunStarted {
                leg: Leg::South,
                call_sign: "X".into(),
            },
        );
        assert_eq!(seq, 0);
    }

    #[test]
    fn test_event_serialization_tags_kind() {
        let event = ProgressEvent {
            seq: 1,
            event: ProgressEventKind::PageStarted {
                call_sign: "KHH123".into(),
                page: 1,
            },
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("PageStarted"));
        assert!(json.contains("KHH123"));
    }
}
