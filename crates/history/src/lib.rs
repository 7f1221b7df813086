//! Historical pool state reconstruction.
//!
//! The indexer hands us the pool's current supply and borrow totals plus a
//! list of timestamped flow events; this crate derives the day-by-day
//! series behind them by walking the events backward from the present and
//! undoing each delta. The output feeds the dashboard's liquidity and
//! utilization charts.

/// Prelude module for convenient imports.
pub mod prelude;

/// Daily snapshot reconstruction from flow events.
pub mod reconstruct;

pub use reconstruct::{DailySnapshot, reconstruct, replay_forward};
