use bevy::prelude::*;
use crate::shared::*;

/// Running totals of money flow, for end-of-season summaries.
#[derive(Resource, Debug, Clone, Default)]
pub struct EconomyStats {
    pub total_gold_earned: u64,
    pub total_gold_spent: u64,
    pub total_transactions: u64,
}

/// Tallies GoldChangeEvents into EconomyStats.
///
/// The ledger itself is already updated by the market systems; this only
/// keeps score.
pub fn track_gold_changes(
    mut gold_events: EventReader<GoldChangeEvent>,
    mut stats: ResMut<EconomyStats>,
) {
    for ev in gold_events.read() {
        if ev.amount >= 0 {
            stats.total_gold_earned = stats.total_gold_earned.saturating_add(ev.amount as u64);
        } else {
            stats.total_gold_spent = stats.total_gold_spent.saturating_add(ev.amount.unsigned_abs());
        }
        stats.total_transactions += 1;
        debug!("[Economy] Gold {:+}: {}", ev.amount, ev.reason);
    }
}

/// Format a gold amount as a display string (e.g. "1,234g").
pub fn format_gold(amount: u32) -> String {
    let s = amount.to_string();
    let mut result = String::new();
    let digits: Vec<char> = s.chars().collect();
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*ch);
    }
    result.push('g');
    result
}
