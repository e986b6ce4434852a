use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use constants::render_settings::{
    ORBIT_DAMPING_FACTOR, ORBIT_MAX_DISTANCE, ORBIT_MIN_DISTANCE, ORBIT_PAN_SPEED,
    ORBIT_ROTATE_SPEED, ORBIT_ZOOM_ENABLED, ORBIT_ZOOM_STEP,
};

use crate::engine::core::app_state::ViewerCamera;

const PHI_EPSILON: f32 = 1e-4;

/// Orbit camera state around a target point, in spherical coordinates.
///
/// Input accumulates into pending deltas; every frame `update` applies a
/// `damping_factor` share of them and decays the remainder, which gives the
/// camera its inertial glide after the pointer is released.
#[derive(Resource, Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    pub radius: f32,
    /// Azimuth around the Y axis, measured from +Z.
    pub theta: f32,
    /// Polar angle from +Y.
    pub phi: f32,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub zoom_enabled: bool,
    pub min_distance: f32,
    pub max_distance: f32,
    pending_rotation: Vec2,
    pending_pan: Vec3,
}

impl OrbitControls {
    /// Controls placing the camera at `target + offset`.
    pub fn from_offset(target: Vec3, offset: Vec3) -> Self {
        let radius = offset.length();
        let (theta, phi) = if radius > f32::EPSILON {
            (
                offset.x.atan2(offset.z),
                (offset.y / radius).clamp(-1.0, 1.0).acos(),
            )
        } else {
            (0.0, std::f32::consts::FRAC_PI_2)
        };

        Self {
            target,
            radius: radius.clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE),
            theta,
            phi: phi.clamp(PHI_EPSILON, std::f32::consts::PI - PHI_EPSILON),
            enable_damping: true,
            damping_factor: ORBIT_DAMPING_FACTOR,
            zoom_enabled: ORBIT_ZOOM_ENABLED,
            min_distance: ORBIT_MIN_DISTANCE,
            max_distance: ORBIT_MAX_DISTANCE,
            pending_rotation: Vec2::ZERO,
            pending_pan: Vec3::ZERO,
        }
    }

    /// Queue a rotation from a pointer drag in pixels.
    pub fn rotate(&mut self, drag: Vec2) {
        self.pending_rotation -= drag * ORBIT_ROTATE_SPEED;
    }

    /// Queue a pan from a pointer drag in pixels, along the camera's screen axes.
    pub fn pan(&mut self, drag: Vec2, right: Vec3, up: Vec3) {
        let scale = self.radius * ORBIT_PAN_SPEED;
        self.pending_pan += (right * -drag.x + up * drag.y) * scale;
    }

    /// Dolly in (positive `lines`) or out. Returns whether zoom is enabled.
    pub fn zoom(&mut self, lines: f32) -> bool {
        if !self.zoom_enabled {
            return false;
        }
        self.radius =
            (self.radius * ORBIT_ZOOM_STEP.powf(lines)).clamp(self.min_distance, self.max_distance);
        true
    }

    /// Advance the damping integration by one frame and return the camera transform.
    pub fn update(&mut self) -> Transform {
        let share = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };

        self.theta += self.pending_rotation.x * share;
        self.phi = (self.phi + self.pending_rotation.y * share)
            .clamp(PHI_EPSILON, std::f32::consts::PI - PHI_EPSILON);
        self.target += self.pending_pan * share;

        if self.enable_damping {
            self.pending_rotation *= 1.0 - self.damping_factor;
            self.pending_pan *= 1.0 - self.damping_factor;
        } else {
            self.pending_rotation = Vec2::ZERO;
            self.pending_pan = Vec3::ZERO;
        }

        self.transform()
    }

    pub fn position(&self) -> Vec3 {
        let sin_phi = self.phi.sin();
        self.target
            + self.radius
                * Vec3::new(
                    sin_phi * self.theta.sin(),
                    self.phi.cos(),
                    sin_phi * self.theta.cos(),
                )
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position()).looking_at(self.target, Vec3::Y)
    }

    #[cfg(test)]
    pub fn is_settled(&self) -> bool {
        self.pending_rotation.length_squared() < 1e-12 && self.pending_pan.length_squared() < 1e-12
    }
}

/// Feed pointer input into the controls and move the session camera.
///
/// Left drag orbits, right or middle drag pans, the wheel zooms.
pub fn orbit_controller(
    mut camera_query: Query<&mut Transform, With<ViewerCamera>>,
    controls: Option<ResMut<OrbitControls>>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
) {
    let Some(mut controls) = controls else {
        return;
    };
    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };

    let drag: Vec2 = mouse_motion.read().map(|motion| motion.delta).sum();
    if drag != Vec2::ZERO {
        if mouse_button.pressed(MouseButton::Left) {
            controls.rotate(drag);
        } else if mouse_button.any_pressed([MouseButton::Right, MouseButton::Middle]) {
            let right = camera_transform.right().as_vec3();
            let up = camera_transform.up().as_vec3();
            controls.pan(drag, right, up);
        }
    }

    let mut scroll_accum = 0.0;
    for event in scroll_events.read() {
        scroll_accum += match event.unit {
            MouseScrollUnit::Line => event.y,
            MouseScrollUnit::Pixel => event.y * 0.05,
        };
    }
    if scroll_accum.abs() > f32::EPSILON {
        controls.zoom(scroll_accum);
    }

    *camera_transform = controls.update();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_starts_exactly_at_offset() {
        for offset in [
            Vec3::new(0.0, 0.0, 20.0),
            Vec3::new(0.0, -5.0, 15.0),
            Vec3::new(0.0, 0.0, 0.4),
            Vec3::new(0.0, 0.0, 110.0),
        ] {
            let controls = OrbitControls::from_offset(Vec3::ZERO, offset);
            assert!(
                controls.position().abs_diff_eq(offset, 1e-4),
                "{offset} became {}",
                controls.position()
            );
        }
    }

    #[test]
    fn camera_faces_target() {
        let controls = OrbitControls::from_offset(Vec3::ZERO, Vec3::new(0.0, -5.0, 15.0));
        let transform = controls.transform();
        let expected = (Vec3::ZERO - transform.translation).normalize();
        assert!(transform.forward().as_vec3().abs_diff_eq(expected, 1e-4));
    }

    #[test]
    fn damping_applies_a_quarter_per_frame() {
        let mut controls = OrbitControls::from_offset(Vec3::ZERO, Vec3::new(0.0, 0.0, 20.0));
        let start_theta = controls.theta;
        controls.rotate(Vec2::new(-100.0, 0.0));
        let full = 100.0 * ORBIT_ROTATE_SPEED;

        controls.update();
        assert!((controls.theta - start_theta - full * 0.25).abs() < 1e-5);

        controls.update();
        assert!((controls.theta - start_theta - full * (0.25 + 0.25 * 0.75)).abs() < 1e-5);
    }

    #[test]
    fn damping_glides_to_the_full_delta() {
        let mut controls = OrbitControls::from_offset(Vec3::ZERO, Vec3::new(0.0, 0.0, 20.0));
        let start_theta = controls.theta;
        controls.rotate(Vec2::new(-100.0, 0.0));

        for _ in 0..200 {
            controls.update();
        }
        assert!(controls.is_settled());
        assert!((controls.theta - start_theta - 100.0 * ORBIT_ROTATE_SPEED).abs() < 1e-4);
    }

    #[test]
    fn without_damping_delta_applies_at_once() {
        let mut controls = OrbitControls::from_offset(Vec3::ZERO, Vec3::new(0.0, 0.0, 20.0));
        controls.enable_damping = false;
        controls.pan(Vec2::new(10.0, 0.0), Vec3::X, Vec3::Y);
        controls.update();
        assert!(controls.is_settled());
        assert!(controls.target.x < 0.0);
    }

    #[test]
    fn polar_angle_never_flips_over_the_pole() {
        let mut controls = OrbitControls::from_offset(Vec3::ZERO, Vec3::new(0.0, 0.0, 20.0));
        controls.enable_damping = false;
        controls.rotate(Vec2::new(0.0, 100_000.0));
        controls.update();
        assert!(controls.phi > 0.0);
        controls.rotate(Vec2::new(0.0, -200_000.0));
        controls.update();
        assert!(controls.phi < std::f32::consts::PI);
    }

    #[test]
    fn zoom_respects_flag_and_limits() {
        let mut controls = OrbitControls::from_offset(Vec3::ZERO, Vec3::new(0.0, 0.0, 20.0));
        assert!(controls.zoom(1.0));
        assert!(controls.radius < 20.0);

        controls.zoom(-10_000.0);
        assert_eq!(controls.radius, controls.max_distance);

        controls.zoom_enabled = false;
        assert!(!controls.zoom(5.0));
        assert_eq!(controls.radius, controls.max_distance);
    }

    #[test]
    fn zero_offset_keeps_a_usable_radius() {
        let controls = OrbitControls::from_offset(Vec3::ZERO, Vec3::ZERO);
        assert!(controls.radius >= ORBIT_MIN_DISTANCE);
        assert!(controls.position().is_finite());
    }
}
