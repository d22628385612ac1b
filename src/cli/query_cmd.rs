//! `portside query` — fetch manifests for one or two call signs.
//!
//! Thin presentation shell around the orchestrator: resolves call signs
//! (flags, falling back to the remembered ones), streams progress to
//! stderr, renders the aggregate outcome, and applies the local S/O
//! filter. All filtering here operates on already-fetched records; no
//! extra network traffic.

use anyhow::{bail, Result};

use crate::cli::{output, recall::RecallStore};
use crate::config::PortalConfig;
use crate::manifest::{CallSigns, ManifestRecord};
use crate::portal::orchestrator::{self, AggregateOutcome};
use crate::progress;

/// Run the query command.
pub async fn run(
    south: Option<String>,
    north: Option<String>,
    filter: Option<String>,
    base_url: Option<String>,
    page_size: Option<u32>,
) -> Result<()> {
    let store = RecallStore::default_store();

    let mut signs = CallSigns::new(south, north);
    if signs.is_empty() {
        if let Some(store) = &store {
            signs = store.load();
            if !signs.is_empty() && !output::is_quiet() && !output::is_json() {
                eprintln!("  using remembered call signs");
            }
        }
    }
    if signs.is_empty() {
        bail!("no call sign given and none remembered; pass --south and/or --north");
    }

    let mut config = base_url
        .map(PortalConfig::with_base_url)
        .unwrap_or_default();
    if let Some(size) = page_size {
        config.page_size = size;
    }

    // Progress events print from a spawned task; the engine never
    // touches the terminal itself.
    let (tx, mut rx) = progress::channel();
    let printer = tokio::spawn(async move {
        while let Ok(event) = rx.recv().await {
            if !output::is_quiet() && !output::is_json() {
                eprintln!("  {}", event.event);
            }
        }
    });

    let outcome = orchestrator::run_query(&config, &signs, Some(tx)).await?;
    let _ = printer.await;

    // Remember what we just queried with, best-effort.
    if let Some(store) = &store {
        store.save(&signs);
    }

    render(&outcome, filter.as_deref())
}

/// Case-insensitive substring filter over order numbers.
pub fn filter_records<'a>(
    records: &'a [ManifestRecord],
    keyword: &str,
) -> Vec<&'a ManifestRecord> {
    let needle = keyword.trim().to_lowercase();
    records
        .iter()
        .filter(|r| needle.is_empty() || r.order_number.to_lowercase().contains(&needle))
        .collect()
}

fn render(outcome: &AggregateOutcome, filter: Option<&str>) -> Result<()> {
    let shown = match filter {
        Some(keyword) => filter_records(outcome.records(), keyword),
        None => outcome.records().iter().collect(),
    };

    if output::is_json() {
        let failures: Vec<serde_json::Value> = outcome
            .failures()
            .iter()
            .map(|f| serde_json::to_value(f).unwrap_or_default())
            .collect();
        let records: Vec<serde_json::Value> = shown
            .iter()
            .map(|r| serde_json::to_value(r).unwrap_or_default())
            .collect();
        output::print_json(&serde_json::json!({
            "outcome": outcome_name(outcome),
            "total": outcome.records().len(),
            "shown": records.len(),
            "records": records,
            "failures": failures,
        }));
        return Ok(());
    }

    for failure in outcome.failures() {
        eprintln!("  Warning: {failure}");
        if let Some(snippet) = &failure.raw_snippet {
            eprintln!("    server said: {snippet}");
        }
    }

    match outcome {
        AggregateOutcome::AllFailed { failures } => {
            let joined: Vec<String> = failures.iter().map(|f| f.to_string()).collect();
            bail!("{}", joined.join("; "));
        }
        AggregateOutcome::Empty => {
            if !output::is_quiet() {
                eprintln!("  no records found.");
            }
            Ok(())
        }
        AggregateOutcome::PartialFailure { records, .. }
        | AggregateOutcome::Success { records } => {
            if !output::is_quiet() {
                match filter {
                    Some(keyword) => eprintln!(
                        "  {} of {} record(s) match '{}':",
                        shown.len(),
                        records.len(),
                        keyword
                    ),
                    None => eprintln!("  {} record(s):", records.len()),
                }
                eprintln!();
                for r in &shown {
                    eprintln!(
                        "    {:<20} {:>6} pkg  {:<16}  {:<10} {}",
                        r.order_number, r.quantity, r.warehoused_at, r.call_sign, r.vessel_name
                    );
                }
            }
            Ok(())
        }
    }
}

fn outcome_name(outcome: &AggregateOutcome) -> &'static str {
    match outcome {
        AggregateOutcome::AllFailed { .. } => "all_failed",
        AggregateOutcome::Empty => "empty",
        AggregateOutcome::PartialFailure { .. } => "partial_failure",
        AggregateOutcome::Success { .. } => "success",
    }
}
