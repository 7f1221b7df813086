//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```rust
//! use marginscope_risk::prelude::*;
//! ```

// Classifier
pub use crate::classifier::{classify, classify_batch, critical_buffer, watch_buffer};

// Distance solver
pub use crate::distance::{
    TriggerDistance, exposure_epsilon_usd, nearest_trigger, pool_nearest_trigger,
};

// Shock simulator
pub use crate::simulator::{ScenarioResult, default_shock_grid_pct, simulate, simulate_grid};

// Verdict
pub use crate::verdict::{PoolVerdict, verdict};
