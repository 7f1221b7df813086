//! Risk tier classification.
//!
//! Tier boundaries are pure functions of a position's risk ratio and its
//! liquidation threshold. All comparisons are inclusive (`<=`): a position
//! exactly at its threshold is liquidatable. Every other engine component
//! classifies through this module so the boundary choice stays consistent.

use marginscope_domain::{MarginPosition, RiskTier};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Relative buffer above the liquidation threshold that still counts as
/// critical: ratio within `threshold * 1.2`.
#[must_use]
pub fn critical_buffer() -> Decimal {
    Decimal::new(12, 1)
}

/// Upper bound of the watch band, as a multiple of the threshold.
#[must_use]
pub fn watch_buffer() -> Decimal {
    Decimal::new(15, 1)
}

/// Classifies a single position into its current risk tier.
///
/// Debt-free positions are always `Healthy`; they cannot be liquidated no
/// matter what their collateral is worth.
#[must_use]
pub fn classify(position: &MarginPosition) -> RiskTier {
    if position.is_debt_free() {
        return RiskTier::Healthy;
    }

    let ratio = position.risk_ratio();
    let threshold = position.liquidation_threshold;

    if ratio <= threshold {
        RiskTier::Liquidatable
    } else if ratio <= threshold * critical_buffer() {
        RiskTier::Critical
    } else if ratio <= threshold * watch_buffer() {
        RiskTier::Watch
    } else {
        RiskTier::Healthy
    }
}

/// Classifies a full position set and counts positions per tier.
///
/// Every tier is present in the result, zero-valued if empty. Equivalent to
/// calling [`classify`] per position and tallying.
#[must_use]
pub fn classify_batch(positions: &[MarginPosition]) -> HashMap<RiskTier, usize> {
    let mut counts: HashMap<RiskTier, usize> =
        RiskTier::ALL.iter().map(|tier| (*tier, 0)).collect();

    for position in positions {
        *counts.entry(classify(position)).or_insert(0) += 1;
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use marginscope_domain::PositionId;
    use rust_decimal_macros::dec;

    fn position(collateral: Decimal, debt: Decimal, threshold: Decimal) -> MarginPosition {
        MarginPosition::try_new(
            PositionId::new("p"),
            collateral,
            dec!(0),
            debt,
            dec!(0),
            threshold,
        )
        .unwrap()
    }

    #[test]
    fn test_debt_free_is_healthy() {
        let p = position(dec!(0), dec!(0), dec!(1.1));
        assert_eq!(classify(&p), RiskTier::Healthy);
    }

    #[test]
    fn test_at_threshold_is_liquidatable() {
        // ratio 1.1 == threshold, inclusive boundary
        let p = position(dec!(110), dec!(100), dec!(1.1));
        assert_eq!(classify(&p), RiskTier::Liquidatable);
    }

    #[test]
    fn test_below_threshold_is_liquidatable() {
        let p = position(dec!(100), dec!(100), dec!(1.1));
        assert_eq!(classify(&p), RiskTier::Liquidatable);
    }

    #[test]
    fn test_critical_band() {
        // threshold 1.1, critical up to 1.32; ratio 1.32 inclusive
        let p = position(dec!(132), dec!(100), dec!(1.1));
        assert_eq!(classify(&p), RiskTier::Critical);
    }

    #[test]
    fn test_watch_band() {
        // watch up to 1.65 for threshold 1.1
        let p = position(dec!(150), dec!(100), dec!(1.1));
        assert_eq!(classify(&p), RiskTier::Watch);
    }

    #[test]
    fn test_healthy_above_watch() {
        let p = position(dec!(200), dec!(100), dec!(1.1));
        assert_eq!(classify(&p), RiskTier::Healthy);
    }

    #[test]
    fn test_batch_matches_individual() {
        let positions = vec![
            position(dec!(100), dec!(100), dec!(1.1)),
            position(dec!(120), dec!(100), dec!(1.1)),
            position(dec!(150), dec!(100), dec!(1.1)),
            position(dec!(500), dec!(100), dec!(1.1)),
            position(dec!(0), dec!(0), dec!(1.1)),
        ];

        let counts = classify_batch(&positions);

        for tier in RiskTier::ALL {
            let individual = positions.iter().filter(|p| classify(p) == tier).count();
            assert_eq!(counts[&tier], individual, "tier {tier} mismatch");
        }
        assert_eq!(counts.values().sum::<usize>(), positions.len());
    }

    #[test]
    fn test_batch_empty_set_has_all_tiers() {
        let counts = classify_batch(&[]);
        assert_eq!(counts.len(), 4);
        assert!(counts.values().all(|c| *c == 0));
    }
}
