//! Core domain types for the margin-lending risk engine.
//!
//! This crate holds the normalized, already-valued view of the protocol's
//! state: margin positions denominated in USD, risk tier vocabulary, and
//! pool flow events. It contains pure data and pure derivations only; the
//! risk and history crates build their computations on top of it.

/// Prelude module for convenient imports.
pub mod prelude;

/// Risk tier and pool tier enums.
pub mod enums;
/// Domain error types.
pub mod error;
/// Pool flow events (supply/withdraw/borrow/repay).
pub mod flow;
/// Margin position model.
pub mod position;

pub use enums::{PoolTier, RiskTier};
pub use error::DomainError;
pub use flow::{FlowEvent, FlowKind};
pub use position::{MarginPosition, PositionId, risk_ratio_sentinel};
