use crate::error::DomainError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of pool flow event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowKind {
    /// Lender deposited into the pool; increases supply.
    Supply,
    /// Lender withdrew from the pool; decreases supply.
    Withdraw,
    /// Borrower drew down the pool; increases borrow.
    Borrow,
    /// Borrower paid back; decreases borrow.
    Repay,
}

/// One timestamped supply/borrow delta, in USD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowEvent {
    /// Unix timestamp in milliseconds.
    pub timestamp_ms: i64,
    pub kind: FlowKind,
    pub amount_usd: Decimal,
}

impl FlowEvent {
    /// Validates and builds a flow event.
    ///
    /// # Errors
    /// Returns `DomainError::NegativeAmount` if the amount is negative.
    pub fn try_new(
        timestamp_ms: i64,
        kind: FlowKind,
        amount_usd: Decimal,
    ) -> Result<Self, DomainError> {
        if amount_usd < Decimal::ZERO {
            return Err(DomainError::NegativeAmount(amount_usd));
        }
        Ok(Self {
            timestamp_ms,
            kind,
            amount_usd,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_valid_event() {
        let e = FlowEvent::try_new(1_700_000_000_000, FlowKind::Supply, dec!(250)).unwrap();
        assert_eq!(e.kind, FlowKind::Supply);
        assert_eq!(e.amount_usd, dec!(250));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let err = FlowEvent::try_new(0, FlowKind::Repay, dec!(-1)).unwrap_err();
        assert_eq!(err, DomainError::NegativeAmount(dec!(-1)));
    }
}
