use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Upper bound on the point count accepted from presets or the panel.
/// Generation is O(count) on the UI thread; past this it visibly stutters.
pub const MAX_POINT_COUNT: u32 = 1_000_000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Galaxy", inline)]
#[serde(default)]
/// Field-shaping parameters. Any change here regenerates the point field;
/// the generator consumes these values unchecked, so they pass through
/// [`sanitize`](Self::sanitize) at every configuration boundary.
pub struct GalaxyOptions {
    /// Outer radius of the disc in world units.
    #[schemars(title = "Radius", range(min = 0.0, max = 15.0), extend("step" = 1.0))]
    pub radius: f32,
    /// Number of points in the field.
    #[schemars(title = "Count", range(min = 1, max = 50_000), extend("step" = 1))]
    pub count: u32,
    /// Point sprite size in world units (distance-attenuated).
    #[schemars(title = "Point Size", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub point_size: f32,
    /// Number of spiral arms.
    #[schemars(title = "Branches", range(min = 1, max = 10), extend("step" = 1))]
    pub branches: u32,
    /// Radius-dependent twist: a point at radius `r` is rotated by
    /// `r * spin` radians along its arm.
    #[schemars(title = "Spin", range(min = 1.0, max = 10.0), extend("step" = 1.0))]
    pub spin: f32,
    /// Jitter amplitude as a fraction of each point's radius.
    #[schemars(title = "Randomness", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub randomness: f32,
    /// RGB color at the disc center.
    #[schemars(title = "Inside Color")]
    pub inside_color: [f32; 3],
    /// RGB color at the outer edge.
    #[schemars(title = "Outside Color")]
    pub outside_color: [f32; 3],
}

impl Default for GalaxyOptions {
    fn default() -> Self {
        Self {
            radius: 8.0,
            count: 50_000,
            point_size: 0.02,
            branches: 3,
            spin: 1.0,
            randomness: 0.1,
            inside_color: [1.0, 96.0 / 255.0, 48.0 / 255.0],
            outside_color: [27.0 / 255.0, 57.0 / 255.0, 132.0 / 255.0],
        }
    }
}

impl GalaxyOptions {
    /// Clamp every field into the range the generator can safely consume.
    ///
    /// `branches = 0` would divide by zero in the arm-angle computation and
    /// negative radius/randomness would produce degenerate geometry, so
    /// out-of-range values are clamped rather than rejected.
    pub fn sanitize(&mut self) {
        self.radius = self.radius.max(0.0);
        self.count = self.count.min(MAX_POINT_COUNT);
        self.point_size = self.point_size.max(0.0);
        self.branches = self.branches.max(1);
        self.randomness = self.randomness.max(0.0);
        for c in self
            .inside_color
            .iter_mut()
            .chain(self.outside_color.iter_mut())
        {
            *c = c.clamp(0.0, 1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_clamps_degenerate_values() {
        let mut opts = GalaxyOptions {
            radius: -3.0,
            count: 2 * MAX_POINT_COUNT,
            point_size: -0.5,
            branches: 0,
            randomness: -1.0,
            inside_color: [2.0, -0.5, 0.5],
            ..GalaxyOptions::default()
        };
        opts.sanitize();
        assert_eq!(opts.radius, 0.0);
        assert_eq!(opts.count, MAX_POINT_COUNT);
        assert_eq!(opts.point_size, 0.0);
        assert_eq!(opts.branches, 1);
        assert_eq!(opts.randomness, 0.0);
        assert_eq!(opts.inside_color, [1.0, 0.0, 0.5]);
    }

    #[test]
    fn sanitize_keeps_valid_values() {
        let mut opts = GalaxyOptions::default();
        let before = opts.clone();
        opts.sanitize();
        assert_eq!(opts, before);
    }

    #[test]
    fn count_zero_is_valid() {
        // Zero points is a legal (empty) field, only negative-like
        // overflow values are clamped.
        let mut opts = GalaxyOptions {
            count: 0,
            ..GalaxyOptions::default()
        };
        opts.sanitize();
        assert_eq!(opts.count, 0);
    }
}
