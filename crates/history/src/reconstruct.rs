//! Daily snapshot reconstruction from flow events.
//!
//! A pure fold: events sorted newest-first, each one applied in inverse to
//! a running (supply, borrow) pair seeded from the current snapshot. Both
//! totals clamp to zero after every step so accumulated rounding in the
//! source data cannot leave a small negative balance. The per-day state
//! captured is the state as of the start of that day; walking backward,
//! that is the last state computed for the day.

use chrono::{DateTime, NaiveDate};
use marginscope_domain::{FlowEvent, FlowKind};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Pool supply and borrow totals as of the start of one calendar day (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailySnapshot {
    pub date: NaiveDate,
    pub supply_usd: Decimal,
    pub borrow_usd: Decimal,
}

impl DailySnapshot {
    /// Borrow as a fraction of supply. Zero when the pool holds nothing.
    #[must_use]
    pub fn utilization(&self) -> Decimal {
        if self.supply_usd.is_zero() {
            return Decimal::ZERO;
        }
        self.borrow_usd / self.supply_usd
    }
}

/// Undoes one event against the running totals, clamping at zero.
fn apply_inverse(supply: Decimal, borrow: Decimal, event: &FlowEvent) -> (Decimal, Decimal) {
    let (supply, borrow) = match event.kind {
        FlowKind::Supply => (supply - event.amount_usd, borrow),
        FlowKind::Withdraw => (supply + event.amount_usd, borrow),
        FlowKind::Borrow => (supply, borrow - event.amount_usd),
        FlowKind::Repay => (supply, borrow + event.amount_usd),
    };
    (supply.max(Decimal::ZERO), borrow.max(Decimal::ZERO))
}

/// Applies one event in its original (forward) direction, clamping at zero.
fn apply_forward(supply: Decimal, borrow: Decimal, event: &FlowEvent) -> (Decimal, Decimal) {
    let (supply, borrow) = match event.kind {
        FlowKind::Supply => (supply + event.amount_usd, borrow),
        FlowKind::Withdraw => (supply - event.amount_usd, borrow),
        FlowKind::Borrow => (supply, borrow + event.amount_usd),
        FlowKind::Repay => (supply, borrow - event.amount_usd),
    };
    (supply.max(Decimal::ZERO), borrow.max(Decimal::ZERO))
}

fn event_date(event: &FlowEvent) -> Option<NaiveDate> {
    let date = DateTime::from_timestamp_millis(event.timestamp_ms).map(|dt| dt.date_naive());
    if date.is_none() {
        tracing::warn!(
            timestamp_ms = event.timestamp_ms,
            "flow event timestamp out of range, skipping"
        );
    }
    date
}

/// Reconstructs the daily supply/borrow series for `[range_start, range_end]`.
///
/// `range_end` is treated as today: its row always carries the true current
/// snapshot rather than a reconstructed start-of-day state. A day without
/// events shows the state that held throughout it, which is the start-of-day
/// state of the next event day (nothing changed in between); when no event
/// day follows, the state is already the current totals. Output is ascending
/// by date, one snapshot per day in the range.
#[must_use]
pub fn reconstruct(
    current_supply_usd: Decimal,
    current_borrow_usd: Decimal,
    events: &[FlowEvent],
    range_start: NaiveDate,
    range_end: NaiveDate,
) -> Vec<DailySnapshot> {
    if range_start > range_end {
        return Vec::new();
    }

    let mut ordered: Vec<&FlowEvent> = events.iter().collect();
    ordered.sort_by_key(|event| std::cmp::Reverse(event.timestamp_ms));

    let current = (
        current_supply_usd.max(Decimal::ZERO),
        current_borrow_usd.max(Decimal::ZERO),
    );
    let (mut supply, mut borrow) = current;

    // Start-of-day states keyed by date. Walking newest-first, every undo
    // within a day overwrites the previous one, so the surviving entry is
    // the state before the day's first event.
    let mut day_states: BTreeMap<NaiveDate, (Decimal, Decimal)> = BTreeMap::new();

    for event in &ordered {
        let Some(date) = event_date(event) else {
            continue;
        };
        (supply, borrow) = apply_inverse(supply, borrow, event);
        day_states.insert(date, (supply, borrow));
    }

    let mut series = Vec::new();
    let mut day = range_start;
    while day <= range_end {
        // Today shows the real snapshot, not a reconstruction. Any other
        // day holds the next event day's start-of-day state; with no event
        // on or after it, nothing has changed since, so it already equals
        // the current totals.
        let (supply_usd, borrow_usd) = if day == range_end {
            current
        } else {
            day_states
                .range(day..)
                .next()
                .map(|(_, state)| *state)
                .unwrap_or(current)
        };
        series.push(DailySnapshot {
            date: day,
            supply_usd,
            borrow_usd,
        });
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }

    tracing::debug!(
        days = series.len(),
        events = events.len(),
        "daily series reconstructed"
    );

    series
}

/// Replays events forward from the first snapshot's start-of-day state.
///
/// Counterpart of [`reconstruct`] for verifying the round trip: applying
/// every event dated at or after the first snapshot's day, in ascending
/// order, must land back on the current totals.
#[must_use]
pub fn replay_forward(series: &[DailySnapshot], events: &[FlowEvent]) -> (Decimal, Decimal) {
    let Some(first) = series.first() else {
        return (Decimal::ZERO, Decimal::ZERO);
    };

    let mut ordered: Vec<&FlowEvent> = events
        .iter()
        .filter(|event| event_date(event).is_some_and(|date| date >= first.date))
        .collect();
    ordered.sort_by_key(|event| event.timestamp_ms);

    let mut supply = first.supply_usd;
    let mut borrow = first.borrow_usd;
    for event in ordered {
        (supply, borrow) = apply_forward(supply, borrow, event);
    }
    (supply, borrow)
}
