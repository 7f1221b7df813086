//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```rust
//! use marginscope_history::prelude::*;
//! ```

pub use crate::reconstruct::{DailySnapshot, reconstruct, replay_forward};
