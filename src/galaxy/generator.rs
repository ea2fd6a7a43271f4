use std::f32::consts::TAU;

use rand::Rng;

use crate::galaxy::field::PointField;
use crate::options::GalaxyOptions;

/// Generate a spiral point field from the given parameters.
///
/// Pure: the only effect is allocating the two output buffers. The random
/// source is injected so callers control reproducibility: the viewer passes
/// an OS-seeded generator, tests a fixed seed.
///
/// Each point draws a radius uniform in `[0, radius)`, is assigned to one of
/// `branches` evenly spaced arms by index residue, twisted along the arm by
/// `radius * spin` radians, and jittered by three independent draws scaled
/// with `randomness * radius`. Color interpolates from `inside_color` at the
/// center to `outside_color` at the edge.
///
/// Parameters must already be sanitized (`branches >= 1`, non-negative
/// radius/randomness); see
/// [`GalaxyOptions::sanitize`](crate::options::GalaxyOptions::sanitize);
/// the generator performs no validation of its own.
pub fn generate<R: Rng + ?Sized>(
    params: &GalaxyOptions,
    rng: &mut R,
) -> PointField {
    let count = params.count as usize;
    let branches = params.branches as usize;
    let mut positions = Vec::with_capacity(count * 3);
    let mut colors = Vec::with_capacity(count * 3);

    for i in 0..count {
        let r = rng.random::<f32>() * params.radius;
        let arm = (i % branches) as f32 / params.branches as f32 * TAU;
        let twist = r * params.spin;
        let amplitude = params.randomness * r;
        let jx = (rng.random::<f32>() - 0.5) * amplitude;
        let jy = (rng.random::<f32>() - 0.5) * amplitude;
        let jz = (rng.random::<f32>() - 0.5) * amplitude;

        positions.push((arm + twist).sin() * r + jx);
        positions.push(jy);
        positions.push((arm + twist).cos() * r + jz);

        // 0/0 at radius = 0 would poison every color with NaN; a degenerate
        // disc is defined to be fully inside-colored.
        let t = if params.radius > 0.0 {
            r / params.radius
        } else {
            0.0
        };
        for c in 0..3 {
            colors.push(lerp(
                params.inside_color[c],
                params.outside_color[c],
                t,
            ));
        }
    }

    PointField::new(positions, colors)
}

/// Componentwise linear interpolation, exact at `t = 0`.
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn base_params() -> GalaxyOptions {
        GalaxyOptions {
            radius: 8.0,
            count: 1000,
            branches: 3,
            spin: 1.0,
            randomness: 0.0,
            ..GalaxyOptions::default()
        }
    }

    /// Normalize an angle into `[0, TAU)`.
    fn wrap(angle: f32) -> f32 {
        let a = angle.rem_euclid(TAU);
        if TAU - a < 1e-3 {
            0.0
        } else {
            a
        }
    }

    /// Recover `(r, base_angle)` for an unjittered point.
    fn polar(x: f32, z: f32, spin: f32) -> (f32, f32) {
        let r = x.hypot(z);
        (r, wrap(x.atan2(z) - r * spin))
    }

    #[test]
    fn buffers_are_three_floats_per_point() {
        let params = GalaxyOptions {
            count: 1234,
            ..base_params()
        };
        let field = generate(&params, &mut StdRng::seed_from_u64(1));
        assert_eq!(field.len(), 1234);
        assert_eq!(field.positions().len(), 3 * 1234);
        assert_eq!(field.colors().len(), 3 * 1234);
    }

    #[test]
    fn zero_count_yields_empty_buffers() {
        let params = GalaxyOptions {
            count: 0,
            ..base_params()
        };
        let field = generate(&params, &mut StdRng::seed_from_u64(1));
        assert!(field.is_empty());
        assert!(field.positions().is_empty());
        assert!(field.colors().is_empty());
    }

    #[test]
    fn zero_radius_is_fully_inside_colored() {
        let params = GalaxyOptions {
            radius: 0.0,
            count: 512,
            randomness: 1.0,
            ..base_params()
        };
        let field = generate(&params, &mut StdRng::seed_from_u64(2));
        for triple in field.colors().chunks_exact(3) {
            assert_eq!(triple, params.inside_color);
        }
        for v in field.positions() {
            assert!(v.is_finite());
        }
    }

    #[test]
    fn same_seed_reproduces_the_field() {
        let params = GalaxyOptions {
            randomness: 0.4,
            ..base_params()
        };
        let a = generate(&params, &mut StdRng::seed_from_u64(7));
        let b = generate(&params, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);

        let c = generate(&params, &mut StdRng::seed_from_u64(8));
        assert_ne!(a.positions(), c.positions());
    }

    #[test]
    fn base_angle_set_has_one_entry_per_branch() {
        let params = GalaxyOptions {
            branches: 4,
            count: 4000,
            spin: 0.0,
            ..base_params()
        };
        let field = generate(&params, &mut StdRng::seed_from_u64(3));

        let mut distinct: Vec<f32> = Vec::new();
        for p in field.positions().chunks_exact(3) {
            let (r, angle) = polar(p[0], p[2], 0.0);
            if r < 1e-4 {
                continue;
            }
            if !distinct.iter().any(|a| (a - angle).abs() < 1e-3) {
                distinct.push(angle);
            }
        }
        assert_eq!(distinct.len(), 4);
    }

    #[test]
    fn arm_membership_is_deterministic_in_index() {
        let params = GalaxyOptions {
            branches: 5,
            count: 100,
            spin: 0.0,
            ..base_params()
        };
        let field = generate(&params, &mut StdRng::seed_from_u64(4));
        let pos = field.positions();

        // Index i and i + branches land on the same arm regardless of the
        // random radius draws.
        for i in 0..40 {
            let j = i + 5;
            let (ri, ai) = polar(pos[3 * i], pos[3 * i + 2], 0.0);
            let (rj, aj) = polar(pos[3 * j], pos[3 * j + 2], 0.0);
            if ri < 1e-4 || rj < 1e-4 {
                continue;
            }
            assert!(
                (ai - aj).abs() < 1e-4 || (TAU - (ai - aj).abs()) < 1e-4,
                "indices {i} and {j} landed on different arms"
            );
        }
    }

    #[test]
    fn color_is_monotonic_in_radius() {
        let params = GalaxyOptions {
            count: 2000,
            spin: 0.0,
            ..base_params()
        };
        let field = generate(&params, &mut StdRng::seed_from_u64(5));
        let pos = field.positions();
        let colors = field.colors();

        let mut order: Vec<usize> = (0..field.len()).collect();
        order.sort_by(|&a, &b| {
            let ra = pos[3 * a].hypot(pos[3 * a + 2]);
            let rb = pos[3 * b].hypot(pos[3 * b + 2]);
            ra.total_cmp(&rb)
        });

        for c in 0..3 {
            let direction = params.outside_color[c] - params.inside_color[c];
            for pair in order.windows(2) {
                let delta = colors[3 * pair[1] + c] - colors[3 * pair[0] + c];
                assert!(
                    delta * direction >= 0.0,
                    "component {c} moved against the ramp"
                );
            }
        }
    }

    #[test]
    fn reference_galaxy_matches_expected_shape() {
        // radius 8, 1000 points, 3 branches, spin 1, no jitter.
        let params = base_params();
        let field = generate(&params, &mut StdRng::seed_from_u64(6));
        assert_eq!(field.len(), 1000);

        // No jitter: the disc is perfectly flat.
        for p in field.positions().chunks_exact(3) {
            assert_eq!(p[1], 0.0);
        }

        // Un-twisting each point leaves exactly three base angles.
        let expected = [0.0, TAU / 3.0, 2.0 * TAU / 3.0];
        let mut seen = [false; 3];
        for p in field.positions().chunks_exact(3) {
            let (r, angle) = polar(p[0], p[2], params.spin);
            if r < 1e-4 {
                continue;
            }
            let slot = expected
                .iter()
                .position(|e| {
                    (e - angle).abs() < 2e-3 || (TAU - (e - angle).abs()) < 2e-3
                });
            let Some(slot) = slot else {
                unreachable!("unexpected base angle {angle}");
            };
            seen[slot] = true;
        }
        assert_eq!(seen, [true; 3]);
    }
}
