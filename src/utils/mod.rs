//! Utility Module
//!
//! - [`Timer`]: frame clock supplying the per-tick delta

pub mod time;

pub use time::Timer;
