// Copyright 2026 Portside Contributors
// SPDX-License-Identifier: Apache-2.0

//! Canonical manifest record types shared by the engine and the CLI.

use serde::{Deserialize, Serialize};

/// Which call-sign slot a query ran under.
///
/// A cargo owner may hold two independently registered codes; results
/// from both are merged into one view, always in `South`-then-`North`
/// order so output is reproducible across runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Leg {
    South,
    North,
}

impl std::fmt::Display for Leg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Leg::South => write!(f, "south"),
            Leg::North => write!(f, "north"),
        }
    }
}

/// The one or two call signs a query runs with.
///
/// Blank or whitespace-only entries count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallSigns {
    pub south: Option<String>,
    pub north: Option<String>,
}

impl CallSigns {
    pub fn new(south: Option<String>, north: Option<String>) -> Self {
        Self { south, north }
    }

    /// Non-empty call signs in fixed leg order, trimmed.
    pub fn legs(&self) -> Vec<(Leg, String)> {
        let mut legs = Vec::new();
        if let Some(code) = trimmed(&self.south) {
            legs.push((Leg::South, code));
        }
        if let Some(code) = trimmed(&self.north) {
            legs.push((Leg::North, code));
        }
        legs
    }

    pub fn is_empty(&self) -> bool {
        self.legs().is_empty()
    }
}

fn trimmed(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// One cargo-manifest row in its stable, display-ready shape.
///
/// Invariants upheld by the normalizer: `quantity` is always a
/// non-negative integer rendered as text, `warehoused_at` is either a
/// `YYYY/MM/DD HH:MM` timestamp or a sentinel, and `call_sign` is never
/// empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestRecord {
    /// Shipping-order number, or the "no S/O" sentinel.
    pub order_number: String,
    /// Customs declaration number. Retained even though the default
    /// rendering does not show it.
    pub declaration_number: String,
    /// Vessel name as reported by the portal.
    pub vessel_name: String,
    /// Package count as a non-negative integer string.
    pub quantity: String,
    /// Warehousing time, `YYYY/MM/DD HH:MM` or the "no timestamp yet"
    /// sentinel.
    pub warehoused_at: String,
    /// The call sign that produced this record.
    pub call_sign: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leg_display() {
        assert_eq!(Leg::South.to_string(), "south");
        assert_eq!(Leg::North.to_string(), "north");
    }

    #[test]
    fn test_legs_skips_blank_entries() {
        let signs = CallSigns::new(Some("  ".into()), Some(" KHH123 ".into()));
        assert_eq!(signs.legs(), vec![(Leg::North, "KHH123".to_string())]);
        assert!(!signs.is_empty());
    }

    #[test]
    fn test_legs_fixed_order() {
        let signs = CallSigns::new(Some("S1".into()), Some("N1".into()));
        let legs = signs.legs();
        assert_eq!(legs[0], (Leg::South, "S1".to_string()));
        assert_eq!(legs[1], (Leg::North, "N1".to_string()));
    }

    #[test]
    fn test_empty_when_both_blank() {
        assert!(CallSigns::default().is_empty());
        assert!(CallSigns::new(Some(String::new()), None).is_empty());
    }
}
