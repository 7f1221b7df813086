use serde::{Deserialize, Serialize};

/// Solvency tier of a single margin position.
///
/// Ordered from worst to best. Boundaries are inclusive: a position exactly
/// at its liquidation threshold is `Liquidatable`, not merely `Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    /// Risk ratio at or below the liquidation threshold.
    Liquidatable,
    /// Within the 20% relative buffer above the threshold.
    Critical,
    /// Elevated but not imminent risk.
    Watch,
    /// Comfortable buffer, including debt-free positions.
    Healthy,
}

impl RiskTier {
    /// All tiers, worst first. Handy for ordered aggregate displays.
    pub const ALL: [RiskTier; 4] = [
        RiskTier::Liquidatable,
        RiskTier::Critical,
        RiskTier::Watch,
        RiskTier::Healthy,
    ];
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RiskTier::Liquidatable => "liquidatable",
            RiskTier::Critical => "critical",
            RiskTier::Watch => "watch",
            RiskTier::Healthy => "healthy",
        };
        write!(f, "{label}")
    }
}

/// Qualitative health of the pool as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolTier {
    /// No liquidatable positions and no nearby trigger.
    Robust,
    /// A trigger within watch distance or a high critical share.
    Watch,
    /// Already-liquidatable positions, or a trigger close by.
    Fragile,
}

impl std::fmt::Display for PoolTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PoolTier::Robust => "robust",
            PoolTier::Watch => "watch",
            PoolTier::Fragile => "fragile",
        };
        write!(f, "{label}")
    }
}
