//! Price-shock scenario simulator.
//!
//! Applies a hypothetical uniform percentage change to the base asset's
//! price across a position set and reports the aggregate damage. Each
//! scenario is computed from scratch off the input snapshot; nothing is
//! carried between calls, so `simulate(positions, 0)` is the canonical
//! current-state reference and any grid of scenarios can be run in any
//! order with identical results.

use crate::classifier::classify;
use marginscope_domain::{MarginPosition, PositionId, RiskTier};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The scenario grid the dashboard displays by default, in percent.
#[must_use]
pub fn default_shock_grid_pct() -> Vec<Decimal> {
    [-20, -15, -10, -5, 0, 5, 10]
        .into_iter()
        .map(Decimal::from)
        .collect()
}

/// Aggregate outcome of one price-shock scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// The uniform base-asset price change applied, in percent.
    pub price_change_pct: Decimal,
    /// Positions liquidatable at this shock.
    pub liquidatable_count: usize,
    /// Positions in the critical band at this shock.
    pub critical_count: usize,
    /// Sum of (shocked) debt value over liquidatable positions.
    pub total_debt_at_risk_usd: Decimal,
    /// Positions liquidatable here but not at zero shock.
    pub newly_liquidated: Vec<PositionId>,
}

/// Derives the position as it would look after a uniform base-price move.
///
/// Only the base-denominated legs scale; quote legs are the numeraire.
/// Scaled legs are clamped to zero so a shock below -100% cannot flip
/// comparison semantics with negative values. The input is never mutated.
fn shocked(position: &MarginPosition, multiplier: Decimal) -> MarginPosition {
    MarginPosition {
        id: position.id.clone(),
        base_collateral_usd: (position.base_collateral_usd * multiplier).max(Decimal::ZERO),
        quote_collateral_usd: position.quote_collateral_usd,
        base_debt_usd: (position.base_debt_usd * multiplier).max(Decimal::ZERO),
        quote_debt_usd: position.quote_debt_usd,
        liquidation_threshold: position.liquidation_threshold,
    }
}

/// Simulates one price-shock scenario over the full position set.
///
/// Accepts any real-valued percentage; the default grid is just what the
/// dashboard happens to display.
#[must_use]
pub fn simulate(positions: &[MarginPosition], price_change_pct: Decimal) -> ScenarioResult {
    let multiplier = Decimal::ONE + price_change_pct / Decimal::ONE_HUNDRED;

    let mut liquidatable_count = 0;
    let mut critical_count = 0;
    let mut total_debt_at_risk_usd = Decimal::ZERO;
    let mut newly_liquidated = Vec::new();

    for position in positions {
        let moved = shocked(position, multiplier);

        match classify(&moved) {
            RiskTier::Liquidatable => {
                liquidatable_count += 1;
                total_debt_at_risk_usd += moved.debt_value_usd();
                if classify(position) != RiskTier::Liquidatable {
                    newly_liquidated.push(position.id.clone());
                }
            }
            RiskTier::Critical => critical_count += 1,
            RiskTier::Watch | RiskTier::Healthy => {}
        }
    }

    tracing::debug!(
        %price_change_pct,
        liquidatable_count,
        critical_count,
        %total_debt_at_risk_usd,
        "scenario simulated"
    );

    ScenarioResult {
        price_change_pct,
        liquidatable_count,
        critical_count,
        total_debt_at_risk_usd,
        newly_liquidated,
    }
}

/// Runs [`simulate`] for every percentage in `grid_pct`, in order.
#[must_use]
pub fn simulate_grid(positions: &[MarginPosition], grid_pct: &[Decimal]) -> Vec<ScenarioResult> {
    grid_pct
        .iter()
        .map(|pct| simulate(positions, *pct))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify_batch;
    use rust_decimal_macros::dec;

    fn position(
        id: &str,
        base_c: Decimal,
        quote_c: Decimal,
        base_d: Decimal,
        quote_d: Decimal,
        threshold: Decimal,
    ) -> MarginPosition {
        MarginPosition::try_new(PositionId::new(id), base_c, quote_c, base_d, quote_d, threshold)
            .unwrap()
    }

    fn sample_pool() -> Vec<MarginPosition> {
        vec![
            position("long", dec!(200), dec!(0), dec!(0), dec!(150), dec!(1.1)),
            position("short", dec!(0), dec!(300), dec!(200), dec!(0), dec!(1.1)),
            position("broke", dec!(100), dec!(0), dec!(0), dec!(100), dec!(1.1)),
            position("free", dec!(500), dec!(0), dec!(0), dec!(0), dec!(1.1)),
        ]
    }

    #[test]
    fn test_zero_shock_matches_classifier() {
        let positions = sample_pool();
        let result = simulate(&positions, dec!(0));
        let counts = classify_batch(&positions);

        assert_eq!(result.liquidatable_count, counts[&RiskTier::Liquidatable]);
        assert_eq!(result.critical_count, counts[&RiskTier::Critical]);
        assert!(result.newly_liquidated.is_empty());
        // Only "broke" is liquidatable at rest.
        assert_eq!(result.total_debt_at_risk_usd, dec!(100));
    }

    #[test]
    fn test_zero_shock_is_idempotent() {
        let positions = sample_pool();
        let first = simulate(&positions, dec!(0));
        let second = simulate(&positions, dec!(0));
        assert_eq!(first, second);
    }

    #[test]
    fn test_drop_liquidates_long_exposure() {
        // "long" triggers at -17.5%; -20% pushes it under.
        let positions = sample_pool();
        let result = simulate(&positions, dec!(-20));

        assert!(result.newly_liquidated.contains(&PositionId::new("long")));
        assert!(!result.newly_liquidated.contains(&PositionId::new("short")));
        assert_eq!(result.liquidatable_count, 2);
    }

    #[test]
    fn test_rise_liquidates_short_exposure() {
        // "short" triggers at +40%.
        let positions = sample_pool();
        let result = simulate(&positions, dec!(45));

        assert!(result.newly_liquidated.contains(&PositionId::new("short")));
        assert!(!result.newly_liquidated.contains(&PositionId::new("long")));
    }

    #[test]
    fn test_same_asset_exposure_ratio_is_invariant() {
        // Collateral and debt both in the base asset scale together, so the
        // ratio cannot move under a uniform shock.
        let p = position("p", dec!(150), dec!(0), dec!(100), dec!(0), dec!(1.1));
        assert_eq!(p.risk_ratio(), dec!(1.5));

        let at_rest = simulate(std::slice::from_ref(&p), dec!(0));
        let at_drop = simulate(std::slice::from_ref(&p), dec!(-30));

        assert_eq!(at_rest.liquidatable_count, 0);
        assert_eq!(at_drop.liquidatable_count, 0);
        assert!(at_drop.newly_liquidated.is_empty());
    }

    #[test]
    fn test_monotonic_in_drop_for_long_exposure() {
        let p = position("p", dec!(200), dec!(0), dec!(0), dec!(150), dec!(1.1));
        let grid = [dec!(0), dec!(-5), dec!(-10), dec!(-17.5), dec!(-25), dec!(-40)];

        let mut last = 0;
        for pct in grid {
            let count = simulate(std::slice::from_ref(&p), pct).liquidatable_count;
            assert!(count >= last, "liquidatable count regressed at {pct}%");
            last = count;
        }
        assert_eq!(last, 1);
    }

    #[test]
    fn test_monotonic_in_rise_for_short_exposure() {
        let p = position("p", dec!(0), dec!(300), dec!(200), dec!(0), dec!(1.1));

        let mut last = 0;
        for pct in [dec!(0), dec!(10), dec!(25), dec!(40), dec!(60)] {
            let count = simulate(std::slice::from_ref(&p), pct).liquidatable_count;
            assert!(count >= last, "liquidatable count regressed at {pct}%");
            last = count;
        }
        assert_eq!(last, 1);
    }

    #[test]
    fn test_shock_below_minus_100_clamps_base_legs() {
        let p = position("p", dec!(200), dec!(50), dec!(0), dec!(150), dec!(1.1));
        let result = simulate(std::slice::from_ref(&p), dec!(-150));

        // Base collateral clamps to 0 rather than going negative; the
        // position is deep underwater but the numbers stay well-formed.
        assert_eq!(result.liquidatable_count, 1);
        assert_eq!(result.total_debt_at_risk_usd, dec!(150));
    }

    #[test]
    fn test_input_positions_are_untouched() {
        let positions = sample_pool();
        let before = positions.clone();
        let _ = simulate(&positions, dec!(-20));

        for (a, b) in positions.iter().zip(before.iter()) {
            assert_eq!(a.base_collateral_usd, b.base_collateral_usd);
            assert_eq!(a.base_debt_usd, b.base_debt_usd);
        }
    }

    #[test]
    fn test_grid_runs_every_scenario() {
        let positions = sample_pool();
        let grid = default_shock_grid_pct();
        let results = simulate_grid(&positions, &grid);

        assert_eq!(results.len(), grid.len());
        for (result, pct) in results.iter().zip(grid.iter()) {
            assert_eq!(result.price_change_pct, *pct);
        }
    }

    #[test]
    fn test_off_grid_percentage_accepted() {
        let positions = sample_pool();
        let result = simulate(&positions, dec!(-17.5001));
        assert!(result.liquidatable_count >= 1);
    }
}
