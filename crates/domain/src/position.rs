use crate::error::DomainError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Opaque, indexer-assigned position identifier, stable across refresh cycles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PositionId(pub String);

impl PositionId {
    /// Creates a new position id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for PositionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ratio reported for debt-free positions.
///
/// A position with zero debt cannot be liquidated; its risk ratio is
/// undefined, so consumers get this sentinel instead of a division by zero.
#[must_use]
pub fn risk_ratio_sentinel() -> Decimal {
    Decimal::from(999)
}

/// One margin account's risk-relevant state at a point in time.
///
/// All values are already denominated in USD by the upstream data layer
/// (indexer + oracle pricing). Collateral and debt are split by the pair's
/// base and quote asset because price shocks move only the base-denominated
/// legs. Immutable once built: simulation derives fresh values rather than
/// editing a position in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarginPosition {
    pub id: PositionId,
    pub base_collateral_usd: Decimal,
    pub quote_collateral_usd: Decimal,
    pub base_debt_usd: Decimal,
    pub quote_debt_usd: Decimal,
    /// Minimum acceptable collateral/debt ratio for this account
    /// (protocol parameter, e.g. 1.05 for a 5% buffer).
    pub liquidation_threshold: Decimal,
}

impl MarginPosition {
    /// Validates and builds a position.
    ///
    /// # Errors
    /// Returns `DomainError` if any USD field is negative or the
    /// liquidation threshold is not strictly positive.
    pub fn try_new(
        id: PositionId,
        base_collateral_usd: Decimal,
        quote_collateral_usd: Decimal,
        base_debt_usd: Decimal,
        quote_debt_usd: Decimal,
        liquidation_threshold: Decimal,
    ) -> Result<Self, DomainError> {
        let check = |field: &'static str, value: Decimal| {
            if value < Decimal::ZERO {
                Err(DomainError::NegativeUsd { field, value })
            } else {
                Ok(())
            }
        };
        check("base_collateral_usd", base_collateral_usd)?;
        check("quote_collateral_usd", quote_collateral_usd)?;
        check("base_debt_usd", base_debt_usd)?;
        check("quote_debt_usd", quote_debt_usd)?;

        if liquidation_threshold <= Decimal::ZERO {
            return Err(DomainError::InvalidThreshold(liquidation_threshold));
        }

        Ok(Self {
            id,
            base_collateral_usd,
            quote_collateral_usd,
            base_debt_usd,
            quote_debt_usd,
            liquidation_threshold,
        })
    }

    /// Total collateral value across both legs.
    #[must_use]
    pub fn collateral_value_usd(&self) -> Decimal {
        self.base_collateral_usd + self.quote_collateral_usd
    }

    /// Total debt value across both legs.
    #[must_use]
    pub fn debt_value_usd(&self) -> Decimal {
        self.base_debt_usd + self.quote_debt_usd
    }

    /// Whether this position owes nothing and thus can never be liquidated.
    #[must_use]
    pub fn is_debt_free(&self) -> bool {
        self.debt_value_usd().is_zero()
    }

    /// Collateral value divided by debt value.
    ///
    /// Debt-free positions report [`risk_ratio_sentinel`].
    #[must_use]
    pub fn risk_ratio(&self) -> Decimal {
        let debt = self.debt_value_usd();
        if debt.is_zero() {
            return risk_ratio_sentinel();
        }
        self.collateral_value_usd() / debt
    }

    /// Net exposure to the base asset's price: base collateral minus base
    /// debt. The sign decides whether a price drop hurts (positive) or
    /// helps (negative) this position.
    #[must_use]
    pub fn net_base_exposure_usd(&self) -> Decimal {
        self.base_collateral_usd - self.base_debt_usd
    }
}
