//! Pool-wide verdict aggregation.
//!
//! Folds the zero-shock scenario and the pool's nearest trigger distance
//! into one qualitative label for the dashboard header. Total over every
//! input combination; an empty pool short-circuits to robust before any
//! ratio math can divide by zero.

use crate::distance::TriggerDistance;
use crate::simulator::ScenarioResult;
use marginscope_domain::PoolTier;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Trigger distance (percent) below which the pool is fragile.
#[must_use]
pub fn fragile_distance_pct() -> Decimal {
    Decimal::from(5)
}

/// Trigger distance (percent) below which the pool is on watch.
#[must_use]
pub fn watch_distance_pct() -> Decimal {
    Decimal::from(15)
}

/// Share of critical positions above which the pool is on watch.
#[must_use]
pub fn critical_share_limit() -> Decimal {
    Decimal::new(3, 1)
}

/// Qualitative pool health plus the distance that drove it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoolVerdict {
    pub tier: PoolTier,
    /// Nearest trigger distance in percent, `None` when unreachable.
    pub nearest_trigger_pct: Option<Decimal>,
}

/// Derives the pool verdict from the current state and nearest trigger.
///
/// `zero_shock` must be the result of `simulate(positions, 0)` over the
/// same position set that `nearest` and `total_positions` describe.
#[must_use]
pub fn verdict(
    zero_shock: &ScenarioResult,
    nearest: &TriggerDistance,
    total_positions: usize,
) -> PoolVerdict {
    let nearest_pct = nearest.nearest_abs_pct();

    // No counterparties, no counterparty risk.
    if total_positions == 0 {
        return PoolVerdict {
            tier: PoolTier::Robust,
            nearest_trigger_pct: nearest_pct,
        };
    }

    let within = |limit: Decimal| nearest_pct.is_some_and(|pct| pct < limit);

    let tier = if zero_shock.liquidatable_count > 0 || within(fragile_distance_pct()) {
        PoolTier::Fragile
    } else {
        let critical_share =
            Decimal::from(zero_shock.critical_count as u64) / Decimal::from(total_positions as u64);
        if within(watch_distance_pct()) || critical_share > critical_share_limit() {
            PoolTier::Watch
        } else {
            PoolTier::Robust
        }
    };

    tracing::debug!(?tier, nearest_trigger_pct = ?nearest_pct, "pool verdict");

    PoolVerdict {
        tier,
        nearest_trigger_pct: nearest_pct,
    }
}
