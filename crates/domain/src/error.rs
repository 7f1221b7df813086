use rust_decimal::Decimal;
use thiserror::Error;

/// Caller contract violations when constructing domain values.
///
/// The engine itself assumes validated inputs; these errors surface at the
/// boundary where raw records are turned into domain types.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// A USD-denominated field was negative.
    #[error("negative USD value for {field}: {value}")]
    NegativeUsd {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: Decimal,
    },
    /// The liquidation threshold must be strictly positive.
    #[error("liquidation threshold must be positive, got {0}")]
    InvalidThreshold(Decimal),
    /// A flow event carried a negative amount.
    #[error("negative flow amount: {0}")]
    NegativeAmount(Decimal),
}
