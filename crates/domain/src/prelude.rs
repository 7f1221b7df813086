//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```rust
//! use marginscope_domain::prelude::*;
//! ```

pub use crate::enums::{PoolTier, RiskTier};
pub use crate::error::DomainError;
pub use crate::flow::{FlowEvent, FlowKind};
pub use crate::position::{MarginPosition, PositionId, risk_ratio_sentinel};
