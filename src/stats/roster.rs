//! Roster aggregation - reach potential totals

use crate::types::RosterEntry;

/// Derived statistics over a follower or friend roster.
///
/// Replaced in full whenever another roster page is merged in.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterStats {
    /// Raw roster entries in fetch order
    pub entries: Vec<RosterEntry>,

    /// Combined follower count across the roster - how many accounts a
    /// repost could reach
    pub total_reach_potential: u64,

    /// Mean follower count per entry, rounded to 2 decimals (0 when empty)
    pub average_reach_potential: f64,
}

impl RosterStats {
    /// Stats over an empty roster.
    pub fn empty() -> Self {
        aggregate_roster(Vec::new())
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

/// Sum follower counts across a roster and derive the average.
///
/// Pure, total, deterministic; an empty roster yields zeros.
pub fn aggregate_roster(entries: Vec<RosterEntry>) -> RosterStats {
    let total_reach_potential: u64 = entries.iter().map(|e| e.follower_count).sum();

    let average_reach_potential = if entries.is_empty() {
        0.0
    } else {
        let avg = total_reach_potential as f64 / entries.len() as f64;
        (avg * 100.0).round() / 100.0
    };

    RosterStats {
        entries,
        total_reach_potential,
        average_reach_potential,
    }
}
