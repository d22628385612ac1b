//! Row normalizer: raw portal rows → [`ManifestRecord`].
//!
//! Pure and infallible. Upstream data quality is noisy (absent fields,
//! zero-or-null counts, truncated timestamps); every malformed input
//! degrades to a documented sentinel or passthrough value so a bad row
//! can never abort a run.

use serde_json::Value;

use crate::manifest::ManifestRecord;

/// Sentinel order number for rows without an S/O.
pub const NO_ORDER_NUMBER: &str = "no S/O";

/// Sentinel shown while goods have not been warehoused yet.
pub const NO_TIMESTAMP: &str = "no timestamp yet";

/// Convert one raw portal row into a canonical record tagged with the
/// call sign that produced it.
pub fn normalize_row(row: &Value, call_sign: &str) -> ManifestRecord {
    ManifestRecord {
        order_number: order_number(row.get("soNo")),
        declaration_number: string_field(row.get("declNo")),
        vessel_name: string_field(row.get("vslName")),
        quantity: coerce_quantity(row.get("packQty1")),
        warehoused_at: format_warehoused(row.get("inWareDate1")),
        call_sign: call_sign.to_string(),
    }
}

fn order_number(value: Option<&Value>) -> String {
    match value.and_then(Value::as_str) {
        Some(s) if !s.trim().is_empty() => s.to_string(),
        _ => NO_ORDER_NUMBER.to_string(),
    }
}

fn string_field(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Package count as a non-negative integer string. Absent, null, and
/// non-numeric values collapse to "0"; negative counts clamp to 0.
fn coerce_quantity(value: Option<&Value>) -> String {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.unwrap_or(0).max(0).to_string()
}

/// Warehousing timestamp in `YYYY/MM/DD HH:MM` form.
///
/// The raw layout is position-based: `YYYYMMDD`, one separator
/// character, then `HHMMSS` (e.g. `"20251216 153545"`). Missing,
/// non-string, or shorter-than-12-character values yield the sentinel;
/// if substring extraction fails on a long-enough value, the raw string
/// passes through unchanged rather than failing the record.
fn format_warehoused(value: Option<&Value>) -> String {
    let raw = match value.and_then(Value::as_str) {
        Some(s) if s.chars().count() >= 12 => s,
        _ => return NO_TIMESTAMP.to_string(),
    };
    match (
        raw.get(0..4),
        raw.get(4..6),
        raw.get(6..8),
        raw.get(9..11),
        raw.get(11..13),
    ) {
        (Some(year), Some(month), Some(day), Some(hour), Some(minute)) => {
            format!("{year}/{month}/{day} {hour}:{minute}")
        }
        _ => raw.to_string(),
    }
}
