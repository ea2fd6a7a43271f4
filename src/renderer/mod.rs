//! Point-field rendering.
//!
//! [`FieldDisplay`] is the seam between parameter logic and the GPU: the
//! session pushes finished fields through it without seeing any rendering
//! types. [`PointsRenderer`] is the wgpu implementation target:
//! blended, distance-attenuated point sprites.

/// wgpu point-sprite renderer.
pub mod points;

pub use points::PointsRenderer;

use crate::galaxy::PointField;

/// Sink for generated point fields.
///
/// Implementations own at most one field's GPU resources at a time:
/// displaying a field releases whatever the previous call allocated.
/// Viewport changes and frame pacing are deliberately not part of this
/// seam; they are window-shell concerns that never flow through parameter
/// logic.
pub trait FieldDisplay {
    /// Replace the displayed field. `point_size` is the sprite side length
    /// in world units.
    fn display_field(&mut self, field: &PointField, point_size: f32);
}
