//! Margin position risk and liquidation simulation engine.
//!
//! Everything in this crate is a pure, synchronous function over validated
//! [`marginscope_domain`] positions:
//! - Tier classification of individual positions and whole position sets
//! - Inverse solving for the nearest liquidation-triggering price move
//! - Forward simulation of uniform base-asset price shocks
//! - A qualitative pool-wide verdict combining the above
//!
//! Callers own fetching and refresh cadence; re-running the pipeline on a
//! fresh snapshot is the only update model.

/// Prelude module for convenient imports.
pub mod prelude;

/// Risk tier classification.
pub mod classifier;
/// Distance-to-liquidation solver.
pub mod distance;
/// Price-shock scenario simulator.
pub mod simulator;
/// Pool-wide verdict aggregation.
pub mod verdict;

pub use classifier::{classify, classify_batch};
pub use distance::{TriggerDistance, nearest_trigger, pool_nearest_trigger};
pub use simulator::{ScenarioResult, default_shock_grid_pct, simulate, simulate_grid};
pub use verdict::{PoolVerdict, verdict};
