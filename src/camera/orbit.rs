use std::f32::consts::FRAC_PI_2;

use glam::{Vec2, Vec3};

use crate::options::CameraOptions;

/// Pitch stops just short of the poles so the view never flips.
const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;
/// Orbit distance clamp range.
const MIN_DISTANCE: f32 = 1.0;
const MAX_DISTANCE: f32 = 500.0;
/// Pending deltas below this magnitude are snapped to zero.
const SETTLE_EPSILON: f32 = 1e-4;

/// Base scale converting pixels of drag into radians of orbit.
const ROTATE_SCALE: f32 = 0.005;
/// Base scale converting pixels of drag into focus translation, relative to
/// the orbit distance.
const PAN_SCALE: f32 = 0.001;

/// Damped yaw/pitch/distance orbit around a focus point.
///
/// Input accumulates into pending deltas; [`update`](Self::update) applies
/// `pending * damping` each frame and decays the remainder, reproducing the
/// eased orbit feel of a damping-enabled orbit controller. Purely
/// mathematical; GPU upload lives in
/// [`OrbitController`](crate::camera::OrbitController).
#[derive(Debug, Clone)]
pub struct Orbit {
    yaw: f32,
    pitch: f32,
    distance: f32,
    focus: Vec3,

    pending_rotate: Vec2,
    pending_pan: Vec2,
    pending_zoom: f32,

    /// Rotation sensitivity multiplier.
    pub rotate_speed: f32,
    /// Pan sensitivity multiplier.
    pub pan_speed: f32,
    /// Zoom sensitivity multiplier.
    pub zoom_speed: f32,
    /// Fraction of pending input applied per frame (1.0 = no inertia).
    pub damping: f32,
}

impl Orbit {
    /// Orbit looking from `eye` toward `focus`.
    #[must_use]
    pub fn from_eye(eye: Vec3, focus: Vec3, options: &CameraOptions) -> Self {
        let offset = eye - focus;
        let distance = offset.length().clamp(MIN_DISTANCE, MAX_DISTANCE);
        Self {
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).clamp(-1.0, 1.0).asin(),
            distance,
            focus,
            pending_rotate: Vec2::ZERO,
            pending_pan: Vec2::ZERO,
            pending_zoom: 0.0,
            rotate_speed: options.rotate_speed,
            pan_speed: options.pan_speed,
            zoom_speed: options.zoom_speed,
            damping: options.damping,
        }
    }

    /// Queue an orbit rotation from a pointer drag, in pixels.
    pub fn rotate(&mut self, delta: Vec2) {
        self.pending_rotate += delta * self.rotate_speed * ROTATE_SCALE;
    }

    /// Queue a focus-point pan from a pointer drag, in pixels.
    pub fn pan(&mut self, delta: Vec2) {
        self.pending_pan += delta * self.pan_speed;
    }

    /// Queue a zoom step (positive = toward the focus point).
    pub fn zoom(&mut self, delta: f32) {
        self.pending_zoom += delta * self.zoom_speed;
    }

    /// Apply the damped fraction of pending input. Returns `true` while the
    /// orbit is still settling.
    pub fn update(&mut self) -> bool {
        let k = self.damping.clamp(0.01, 1.0);

        let rotate = self.pending_rotate * k;
        self.yaw -= rotate.x;
        self.pitch = (self.pitch - rotate.y).clamp(-PITCH_LIMIT, PITCH_LIMIT);

        let pan = self.pending_pan * k * PAN_SCALE * self.distance;
        let (right, up) = self.basis();
        self.focus += right * -pan.x + up * pan.y;

        let zoom = self.pending_zoom * k;
        self.distance = (self.distance * (1.0 - zoom))
            .clamp(MIN_DISTANCE, MAX_DISTANCE);

        let decay = 1.0 - k;
        self.pending_rotate *= decay;
        self.pending_pan *= decay;
        self.pending_zoom *= decay;

        let mut moving = true;
        if self.pending_rotate.length() < SETTLE_EPSILON
            && self.pending_pan.length() < SETTLE_EPSILON
            && self.pending_zoom.abs() < SETTLE_EPSILON
        {
            self.pending_rotate = Vec2::ZERO;
            self.pending_pan = Vec2::ZERO;
            self.pending_zoom = 0.0;
            moving = false;
        }
        moving
    }

    /// Current eye position.
    #[must_use]
    pub fn eye(&self) -> Vec3 {
        let dir = Vec3::new(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        );
        self.focus + dir * self.distance
    }

    /// Current focus (look-at) point.
    #[must_use]
    pub fn focus(&self) -> Vec3 {
        self.focus
    }

    /// Current orbit distance.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Adopt new sensitivity and damping settings.
    pub fn apply_options(&mut self, options: &CameraOptions) {
        self.rotate_speed = options.rotate_speed;
        self.pan_speed = options.pan_speed;
        self.zoom_speed = options.zoom_speed;
        self.damping = options.damping;
    }

    /// Camera-space right and up vectors for panning.
    fn basis(&self) -> (Vec3, Vec3) {
        let forward = (self.focus - self.eye()).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);
        (right, up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orbit() -> Orbit {
        Orbit::from_eye(
            Vec3::new(10.0, 10.0, 10.0),
            Vec3::ZERO,
            &CameraOptions::default(),
        )
    }

    #[test]
    fn from_eye_recovers_the_eye_position() {
        let orbit = orbit();
        let eye = orbit.eye();
        assert!((eye - Vec3::new(10.0, 10.0, 10.0)).length() < 1e-4);
    }

    #[test]
    fn rotation_is_applied_gradually() {
        let mut orbit = orbit();
        let start = orbit.eye();
        orbit.rotate(Vec2::new(120.0, 0.0));

        let _ = orbit.update();
        let after_one = orbit.eye();
        assert!((after_one - start).length() > 0.0);

        // Damping: more of the queued rotation lands on later frames.
        for _ in 0..200 {
            let _ = orbit.update();
        }
        let settled = orbit.eye();
        assert!((settled - after_one).length() > (after_one - start).length());
    }

    #[test]
    fn update_reports_settling() {
        let mut orbit = orbit();
        orbit.rotate(Vec2::new(50.0, 20.0));
        assert!(orbit.update());
        for _ in 0..500 {
            let _ = orbit.update();
        }
        assert!(!orbit.update());
    }

    #[test]
    fn zoom_clamps_distance() {
        let mut orbit = orbit();
        for _ in 0..200 {
            orbit.zoom(10.0);
            let _ = orbit.update();
        }
        assert!(orbit.distance() >= MIN_DISTANCE);

        for _ in 0..400 {
            orbit.zoom(-10.0);
            let _ = orbit.update();
        }
        assert!(orbit.distance() <= MAX_DISTANCE);
    }

    #[test]
    fn pitch_never_reaches_the_poles() {
        let mut orbit = orbit();
        for _ in 0..1000 {
            orbit.rotate(Vec2::new(0.0, -500.0));
            let _ = orbit.update();
        }
        // Up stays well-defined: eye direction never parallel to +Y.
        let dir = (orbit.eye() - orbit.focus()).normalize();
        assert!(dir.dot(Vec3::Y).abs() < 1.0 - 1e-5);
    }
}
