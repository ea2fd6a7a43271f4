//! Camera system for 3D scene viewing.
//!
//! Provides a damped orbital camera: raw input accumulates into pending
//! deltas, and each frame applies a damped fraction so motion eases out
//! instead of stopping dead.

/// Damped orbital camera controller and its GPU resources.
pub mod controller;
/// Core camera struct and GPU uniform types.
pub mod core;
/// Pure orbit state: yaw/pitch/distance with damped pending deltas.
pub mod orbit;

pub use controller::OrbitController;
pub use core::{Camera, CameraUniform};
pub use orbit::Orbit;
