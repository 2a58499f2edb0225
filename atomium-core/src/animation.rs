/// Per-frame animation state.
///
/// Four independent modes can be combined:
///
/// - [`OrbitControls`]: damped camera orbit driven by pointer drags.
/// - [`AxialLoop`]: sawtooth translation of the group along one axis.
/// - [`Spin`]: constant angular velocity on two axes.
/// - [`PointerRotation`]: group rotation set directly from the pointer.
///
/// [`Animator`] holds whichever modes are configured and advances them once
/// per tick. A tick that would produce non-finite state is discarded.

use std::f32::consts::{PI, TAU};

use nalgebra::Vector3;

use crate::config::{AnimationConfig, AxialConfig, OrbitConfig, PointerConfig, SpinConfig};
use crate::error::{require_positive, AtomiumError, Result};
use crate::projection::Camera;
use crate::transform::{Axis, Pose, RotationState};
use crate::viewport::Viewport;

/// Keeps the polar angle off the poles.
const POLAR_EPSILON: f32 = 1e-6;

/// Zoom factor per wheel notch.
const DOLLY_STEP: f32 = 0.95;

/// Sawtooth offset along one axis.
///
/// The offset is derived from an integer step count, so it never drifts:
/// after `n` ticks it is `lower + n * increment` until the next value would
/// reach `upper`, at which point it lands exactly on `lower`.
#[derive(Debug, Clone, PartialEq)]
pub struct AxialLoop {
    axis: Axis,
    increment: f64,
    lower: f64,
    upper: f64,
    steps: u64,
}

impl AxialLoop {
    pub fn new(config: &AxialConfig) -> Result<Self> {
        let increment = require_positive("increment", config.increment)?;
        let (lower, upper) = config.range.bounds();
        let span = require_positive("loop range", upper - lower)?;
        if increment > span {
            return Err(AtomiumError::invalid("increment", increment));
        }

        Ok(Self {
            axis: config.axis,
            increment: increment as f64,
            lower: lower as f64,
            upper: upper as f64,
            steps: 0,
        })
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn offset(&self) -> f32 {
        (self.lower + self.steps as f64 * self.increment) as f32
    }

    pub fn bounds(&self) -> (f32, f32) {
        (self.lower as f32, self.upper as f32)
    }

    /// Advance one tick and return the new offset.
    pub fn advance(&mut self) -> f32 {
        let next = self.steps + 1;
        let candidate = self.lower + next as f64 * self.increment;
        // values within rounding of the limit count as reaching it
        let tolerance = self.increment * 1e-6;
        self.steps = if candidate >= self.upper - tolerance { 0 } else { next };
        self.offset()
    }

    pub fn apply(&self, pose: &mut Pose) {
        pose.set_axis(self.axis, self.offset());
    }
}

/// Constant per-tick rotation on the x and y axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spin {
    pub rate_x: f32,
    pub rate_y: f32,
}

impl Spin {
    pub fn new(config: &SpinConfig) -> Self {
        Self {
            rate_x: config.rate_x,
            rate_y: config.rate_y,
        }
    }

    pub fn advance(&self, rotation: &mut RotationState) {
        rotation.rotate(self.rate_x, self.rate_y, 0.0);
    }
}

/// Rotation taken straight from the pointer position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerRotation {
    pub sensitivity_x: f32,
    pub sensitivity_y: f32,
}

impl PointerRotation {
    pub fn new(config: &PointerConfig) -> Self {
        Self {
            sensitivity_x: config.sensitivity_x,
            sensitivity_y: config.sensitivity_y,
        }
    }

    /// `nx`, `ny` are in `[-1, 1]` with y pointing up.
    pub fn apply(&self, nx: f32, ny: f32, rotation: &mut RotationState) {
        rotation.y = nx * self.sensitivity_x;
        rotation.x = -ny * self.sensitivity_y;
    }
}

/// Damped orbit of the camera around its target.
///
/// Drags add angular velocity; every tick moves the camera by
/// `velocity * damping` and decays the velocity by `1 - damping`, so the
/// total rotation converges to the dragged amount.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    config: OrbitConfig,
    radius: f32,
    theta: f32,
    phi: f32,
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
    drag: Option<(f32, f32)>,
}

impl OrbitControls {
    pub fn new(config: &OrbitConfig, camera: &Camera) -> Result<Self> {
        let damping = require_positive("damping", config.damping)?;
        if damping > 1.0 {
            return Err(AtomiumError::invalid("damping", damping));
        }
        require_positive("rotate_speed", config.rotate_speed)?;

        let offset = camera.position - camera.target;
        let radius = require_positive("orbit radius", offset.norm())?;

        Ok(Self {
            config: *config,
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
            drag: None,
        })
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Azimuth and polar angle in radians.
    pub fn angles(&self) -> (f32, f32) {
        (self.theta, self.phi)
    }

    pub fn angular_velocity(&self) -> (f32, f32) {
        (self.delta_theta, self.delta_phi)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.drag = Some((x, y));
    }

    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    pub fn pointer_move(&mut self, x: f32, y: f32, viewport_height: u32) {
        let Some((last_x, last_y)) = self.drag else {
            return;
        };
        let height = viewport_height.max(1) as f32;
        self.delta_theta -= TAU * (x - last_x) / height * self.config.rotate_speed;
        self.delta_phi -= TAU * (y - last_y) / height * self.config.rotate_speed;
        self.drag = Some((x, y));
    }

    /// Positive deltas move the camera away from the target.
    pub fn wheel(&mut self, delta_y: f32) {
        if !self.config.enable_zoom || delta_y == 0.0 {
            return;
        }
        if delta_y > 0.0 {
            self.scale /= DOLLY_STEP;
        } else {
            self.scale *= DOLLY_STEP;
        }
    }

    /// Advance one tick and place the camera.
    pub fn update(&mut self, camera: &mut Camera) {
        let damping = self.config.damping;
        self.theta += self.delta_theta * damping;
        self.phi = (self.phi + self.delta_phi * damping).clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        self.radius = (self.radius * self.scale).clamp(self.config.min_distance, self.config.max_distance);
        self.scale = 1.0;

        self.delta_theta *= 1.0 - damping;
        self.delta_phi *= 1.0 - damping;

        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        let offset = Vector3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta) * self.radius;
        camera.position = camera.target + offset;
    }
}

/// Result of one animation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Advanced,
    /// The candidate state was not finite; the previous state was kept.
    Rejected,
}

/// All configured animation modes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Animator {
    pub orbit: Option<OrbitControls>,
    pub axial: Option<AxialLoop>,
    pub spin: Option<Spin>,
    pub pointer: Option<PointerRotation>,
}

impl Animator {
    pub fn new(config: &AnimationConfig, camera: &Camera) -> Result<Self> {
        Ok(Self {
            orbit: config
                .orbit
                .as_ref()
                .map(|c| OrbitControls::new(c, camera))
                .transpose()?,
            axial: config.axial.as_ref().map(AxialLoop::new).transpose()?,
            spin: config.spin.as_ref().map(Spin::new),
            pointer: config.pointer.as_ref().map(PointerRotation::new),
        })
    }

    /// Advance every frame-driven mode once.
    ///
    /// The new state is computed on copies and committed only if it is
    /// finite, so one bad frame never corrupts the running animation.
    pub fn tick(&mut self, pose: &mut Pose, camera: &mut Camera) -> TickOutcome {
        let mut next = self.clone();
        let mut next_pose = *pose;
        let mut next_camera = *camera;

        if let Some(axial) = next.axial.as_mut() {
            axial.advance();
            axial.apply(&mut next_pose);
        }
        if let Some(spin) = next.spin.as_ref() {
            spin.advance(&mut next_pose.rotation);
        }
        if let Some(orbit) = next.orbit.as_mut() {
            orbit.update(&mut next_camera);
        }

        let camera_ok = next_camera.position.iter().all(|v| v.is_finite());
        if !next_pose.is_finite() || !camera_ok {
            tracing::warn!(?next_pose, "discarding non-finite animation frame");
            return TickOutcome::Rejected;
        }

        *self = next;
        *pose = next_pose;
        *camera = next_camera;
        TickOutcome::Advanced
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        if let Some(orbit) = self.orbit.as_mut() {
            orbit.pointer_down(x, y);
        }
    }

    pub fn pointer_up(&mut self) {
        if let Some(orbit) = self.orbit.as_mut() {
            orbit.pointer_up();
        }
    }

    /// Route a pointer move to the orbit drag and the pointer rotation.
    pub fn pointer_move(&mut self, x: f32, y: f32, viewport: &Viewport, pose: &mut Pose) {
        if !x.is_finite() || !y.is_finite() {
            tracing::debug!(x, y, "ignoring non-finite pointer position");
            return;
        }
        if let Some(orbit) = self.orbit.as_mut() {
            orbit.pointer_move(x, y, viewport.height());
        }
        if let Some(pointer) = self.pointer.as_ref() {
            let (nx, ny) = viewport.normalized_pointer(x, y);
            pointer.apply(nx, ny, &mut pose.rotation);
        }
    }

    pub fn wheel(&mut self, delta_y: f32) {
        if let Some(orbit) = self.orbit.as_mut() {
            orbit.wheel(delta_y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoopRange;
    use nalgebra::Point3;

    fn lattice_loop() -> AxialLoop {
        AxialLoop::new(&AxialConfig {
            axis: Axis::Z,
            increment: 0.05,
            range: LoopRange::ZeroTo(50.0),
        })
        .unwrap()
    }

    #[test]
    fn test_axial_loop_wraps_exactly_on_tick_1000() {
        let mut axial = lattice_loop();
        for tick in 1..1000 {
            let offset = axial.advance();
            assert!(offset > 0.0 && offset < 50.0, "tick {tick}: {offset}");
        }
        assert!((axial.offset() - 49.95).abs() < 1e-4);
        assert_eq!(axial.advance(), 0.0);
        assert!((axial.advance() - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_axial_loop_stays_in_range() {
        let mut axial = lattice_loop();
        let mut previous = axial.offset();
        for _ in 0..25_000 {
            let offset = axial.advance();
            assert!((0.0..50.0).contains(&offset));
            if offset != 0.0 {
                assert!((offset - previous - 0.05).abs() < 1e-3);
            }
            previous = offset;
        }
    }

    #[test]
    fn test_symmetric_loop_resets_to_lower_bound() {
        let mut axial = AxialLoop::new(&AxialConfig {
            axis: Axis::Y,
            increment: 0.5,
            range: LoopRange::Symmetric(2.0),
        })
        .unwrap();
        assert_eq!(axial.offset(), -2.0);
        let offsets: Vec<f32> = (0..9).map(|_| axial.advance()).collect();
        assert_eq!(offsets, vec![-1.5, -1.0, -0.5, 0.0, 0.5, 1.0, 1.5, -2.0, -1.5]);
    }

    #[test]
    fn test_axial_loop_rejects_bad_config() {
        let bad = |increment, range| AxialLoop::new(&AxialConfig { axis: Axis::Z, increment, range });
        assert!(bad(0.0, LoopRange::ZeroTo(50.0)).is_err());
        assert!(bad(f32::NAN, LoopRange::ZeroTo(50.0)).is_err());
        assert!(bad(0.05, LoopRange::ZeroTo(0.0)).is_err());
        assert!(bad(60.0, LoopRange::ZeroTo(50.0)).is_err());
    }

    #[test]
    fn test_spin_is_monotonic() {
        let spin = Spin::new(&SpinConfig {
            rate_x: 0.005,
            rate_y: 0.01,
        });
        let mut rotation = RotationState::zero();
        let mut last = rotation;
        for _ in 0..5_000 {
            spin.advance(&mut rotation);
            assert!(rotation.x >= last.x && rotation.y >= last.y);
            last = rotation;
        }
        assert!(rotation.y > TAU);
    }

    #[test]
    fn test_pointer_rotation_sets_not_accumulates() {
        let pointer = PointerRotation::new(&PointerConfig {
            sensitivity_x: 0.5,
            sensitivity_y: 0.25,
        });
        let mut rotation = RotationState::zero();
        pointer.apply(1.0, 1.0, &mut rotation);
        pointer.apply(1.0, 1.0, &mut rotation);
        assert_eq!(rotation.y, 0.5);
        assert_eq!(rotation.x, -0.25);
        pointer.apply(0.0, 0.0, &mut rotation);
        assert_eq!(rotation.y, 0.0);
        assert_eq!(rotation.x, 0.0);
    }

    fn orbit_camera() -> Camera {
        let mut camera = Camera::new(800, 600);
        camera.position = Point3::new(0.0, 0.0, 80.0);
        camera
    }

    #[test]
    fn test_orbit_without_input_is_still() {
        let mut camera = orbit_camera();
        let mut orbit = OrbitControls::new(&OrbitConfig::default(), &camera).unwrap();
        for _ in 0..10 {
            orbit.update(&mut camera);
        }
        assert!((camera.position - Point3::new(0.0, 0.0, 80.0)).norm() < 1e-3);
    }

    #[test]
    fn test_orbit_damping_converges_to_drag() {
        let mut camera = orbit_camera();
        let mut orbit = OrbitControls::new(&OrbitConfig::default(), &camera).unwrap();
        orbit.pointer_down(400.0, 300.0);
        orbit.pointer_move(460.0, 300.0, 600);
        orbit.pointer_up();

        let (velocity, _) = orbit.angular_velocity();
        let expected = -TAU * 60.0 / 600.0;
        assert!((velocity - expected).abs() < 1e-6);

        orbit.update(&mut camera);
        let (theta, _) = orbit.angles();
        assert!((theta - expected * 0.05).abs() < 1e-6);

        for _ in 0..1_000 {
            orbit.update(&mut camera);
        }
        let (theta, _) = orbit.angles();
        assert!((theta - expected).abs() < 1e-4);
        assert!(orbit.angular_velocity().0.abs() < 1e-6);
        assert!(((camera.position - camera.target).norm() - 80.0).abs() < 1e-3);
    }

    #[test]
    fn test_orbit_ignores_moves_without_drag() {
        let camera = orbit_camera();
        let mut orbit = OrbitControls::new(&OrbitConfig::default(), &camera).unwrap();
        orbit.pointer_move(10.0, 10.0, 600);
        assert_eq!(orbit.angular_velocity(), (0.0, 0.0));
    }

    #[test]
    fn test_orbit_polar_clamp() {
        let mut camera = orbit_camera();
        let mut orbit = OrbitControls::new(&OrbitConfig { damping: 1.0, ..OrbitConfig::default() }, &camera).unwrap();
        orbit.pointer_down(0.0, 0.0);
        orbit.pointer_move(0.0, 10_000.0, 600);
        orbit.update(&mut camera);
        let (_, phi) = orbit.angles();
        assert!(phi > 0.0 && phi < 1e-3);
        assert!(camera.position.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_zoom_respects_flag() {
        let mut camera = orbit_camera();
        let locked = OrbitConfig {
            enable_zoom: false,
            ..OrbitConfig::default()
        };
        let mut orbit = OrbitControls::new(&locked, &camera).unwrap();
        orbit.wheel(120.0);
        orbit.update(&mut camera);
        assert!((orbit.radius() - 80.0).abs() < 1e-4);

        let mut orbit = OrbitControls::new(&OrbitConfig::default(), &camera).unwrap();
        orbit.wheel(-120.0);
        orbit.update(&mut camera);
        assert!((orbit.radius() - 76.0).abs() < 1e-3);
    }

    #[test]
    fn test_invalid_damping() {
        let camera = orbit_camera();
        for damping in [0.0, -0.1, 1.5, f32::NAN] {
            let config = OrbitConfig {
                damping,
                ..OrbitConfig::default()
            };
            assert!(OrbitControls::new(&config, &camera).is_err());
        }
    }

    #[test]
    fn test_animator_combines_modes() {
        let config = crate::AtomiumConfig::background_lattice().animation;
        let mut camera = orbit_camera();
        let mut animator = Animator::new(&config, &camera).unwrap();
        let mut pose = Pose::identity();

        for _ in 0..10 {
            assert_eq!(animator.tick(&mut pose, &mut camera), TickOutcome::Advanced);
        }
        assert!((pose.position.z - 0.5).abs() < 1e-5);
        assert!(animator.orbit.is_some());
    }

    #[test]
    fn test_non_finite_frame_keeps_prior_state() {
        let mut camera = orbit_camera();
        let mut animator = Animator {
            spin: Some(Spin {
                rate_x: f32::NAN,
                rate_y: 0.01,
            }),
            ..Animator::default()
        };
        let mut pose = Pose::identity();
        pose.rotation.y = 1.0;

        assert_eq!(animator.tick(&mut pose, &mut camera), TickOutcome::Rejected);
        assert_eq!(pose.rotation.y, 1.0);
        assert!(pose.is_finite());
    }

    #[test]
    fn test_pointer_move_routes_to_rotation() {
        let config = crate::AtomiumConfig::pointer_reactive().animation;
        let camera = orbit_camera();
        let mut animator = Animator::new(&config, &camera).unwrap();
        let viewport = Viewport::new(800, 600);
        let mut pose = Pose::identity();

        animator.pointer_move(800.0, 300.0, &viewport, &mut pose);
        assert!((pose.rotation.y - 0.5).abs() < 1e-6);
        animator.pointer_move(f32::NAN, 0.0, &viewport, &mut pose);
        assert!((pose.rotation.y - 0.5).abs() < 1e-6);
    }
}
