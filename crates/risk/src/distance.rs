//! Distance-to-liquidation solver.
//!
//! Inverse counterpart of the shock simulator: instead of asking "what does
//! a -10% move do", it solves for the minimal base-asset price move that
//! would make a position liquidatable. Uses the same first-order model as
//! the simulator: only base-denominated legs move with the price, quote
//! legs are the numeraire, and `target = threshold * debt` is held fixed.

use crate::classifier::classify;
use marginscope_domain::{MarginPosition, RiskTier};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Net base exposure below which a position's ratio is treated as
/// insensitive to the price move, in USD.
#[must_use]
pub fn exposure_epsilon_usd() -> Decimal {
    Decimal::new(1, 2)
}

/// Nearest liquidation-triggering price moves, in percent.
///
/// `drop_pct` is negative (a fall triggers), `rise_pct` positive. `None`
/// means no finite trigger exists in that direction under a pure
/// base-price shock.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TriggerDistance {
    pub drop_pct: Option<Decimal>,
    pub rise_pct: Option<Decimal>,
}

impl TriggerDistance {
    /// Distance to the nearest trigger in either direction, as a positive
    /// magnitude. `None` when neither direction has a finite trigger.
    #[must_use]
    pub fn nearest_abs_pct(&self) -> Option<Decimal> {
        match (self.drop_pct, self.rise_pct) {
            (Some(drop), Some(rise)) => Some(drop.abs().min(rise)),
            (Some(drop), None) => Some(drop.abs()),
            (None, Some(rise)) => Some(rise),
            (None, None) => None,
        }
    }
}

/// Solves for the minimal base-asset price move that liquidates `position`.
///
/// Already-liquidatable positions have zero distance by definition and are
/// reported separately by the caller; they (and debt-free positions) yield
/// no trigger here. A position whose net base exposure is within
/// [`exposure_epsilon_usd`] of zero is insensitive to the modeled shock,
/// so no finite trigger exists. This mirrors the linear approximation of
/// the simulator rather than a higher-order solve.
#[must_use]
pub fn nearest_trigger(position: &MarginPosition) -> TriggerDistance {
    if position.is_debt_free() || classify(position) == RiskTier::Liquidatable {
        return TriggerDistance::default();
    }

    let exposure = position.net_base_exposure_usd();
    if exposure.abs() <= exposure_epsilon_usd() {
        return TriggerDistance::default();
    }

    let target_collateral = position.liquidation_threshold * position.debt_value_usd();
    let change_needed = (target_collateral - position.collateral_value_usd()) / exposure;
    let pct = change_needed * Decimal::ONE_HUNDRED;

    if pct < Decimal::ZERO {
        TriggerDistance {
            drop_pct: Some(pct),
            rise_pct: None,
        }
    } else {
        TriggerDistance {
            drop_pct: None,
            rise_pct: Some(pct),
        }
    }
}

/// Reduces per-position triggers to the pool-wide nearest drop and rise.
///
/// The two directions reduce independently: nearest drop is the
/// least-negative drop across positions, nearest rise the smallest
/// positive rise.
#[must_use]
pub fn pool_nearest_trigger(positions: &[MarginPosition]) -> TriggerDistance {
    let mut nearest = TriggerDistance::default();

    for position in positions {
        let trigger = nearest_trigger(position);

        if let Some(drop) = trigger.drop_pct {
            nearest.drop_pct = Some(match nearest.drop_pct {
                Some(current) => current.max(drop),
                None => drop,
            });
        }
        if let Some(rise) = trigger.rise_pct {
            nearest.rise_pct = Some(match nearest.rise_pct {
                Some(current) => current.min(rise),
                None => rise,
            });
        }
    }

    tracing::debug!(
        drop_pct = ?nearest.drop_pct,
        rise_pct = ?nearest.rise_pct,
        positions = positions.len(),
        "pool nearest trigger solved"
    );

    nearest
}
