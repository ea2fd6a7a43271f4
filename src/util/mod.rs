//! Small shared utilities.

/// Per-frame timing and smoothed FPS tracking.
pub mod frame_timing;

pub use frame_timing::FrameTiming;
