//! Drag-to-look desktop camera controls with keyboard fly movement.
//!
//! Orientation is kept as latitude/longitude in degrees. Each tick the pointer
//! velocity (pixels per second, scaled by `look_speed`) is subtracted from the
//! angles, latitude is clamped, and the camera is turned to face the point one
//! unit away along the resulting spherical direction.

use engine_core::{map_linear, Spherical, Transform, Vec2, Vec3};
use std::f32::consts::PI;
use winit::event::ElementState;
use winit::keyboard::KeyCode;

use crate::controller::CameraController;
use crate::keys::{MoveDirection, MoveFlags};

/// Latitude limit in degrees; keeps the look direction off the poles.
pub const MAX_LATITUDE: f32 = 85.0;

/// Clamp a latitude (degrees) into `[-MAX_LATITUDE, MAX_LATITUDE]`.
pub fn clamp_latitude(lat: f32) -> f32 {
    lat.clamp(-MAX_LATITUDE, MAX_LATITUDE)
}

/// Polar angle (radians from +Y) for a latitude in degrees.
///
/// With a vertical constraint the angle is remapped linearly from `[0, PI]`
/// into `[min, max]`.
pub fn polar_angle(lat: f32, vertical_range: Option<(f32, f32)>) -> f32 {
    let phi = (90.0 - lat).to_radians();
    match vertical_range {
        Some((min, max)) => map_linear(phi, 0.0, PI, min, max),
        None => phi,
    }
}

/// Desktop look/move controller.
#[derive(Debug, Clone)]
pub struct DesktopControls {
    pub enabled: bool,

    pub movement_speed: f32,
    pub look_speed: f32,

    pub look_vertical: bool,
    pub auto_forward: bool,

    /// Scale forward speed with height above `height_min`.
    pub height_speed: bool,
    pub height_coef: f32,
    pub height_min: f32,
    pub height_max: f32,

    /// Remap the polar angle into `[vertical_min, vertical_max]`.
    pub constrain_vertical: bool,
    pub vertical_min: f32,
    pub vertical_max: f32,

    /// When set, held keys only move the camera during a pointer drag.
    pub keyboard_requires_drag: bool,

    pointer_drag: bool,
    pointer: Vec2,
    prev_pointer: Vec2,
    pointer_delta: Vec2,
    view_half: Vec2,

    moves: MoveFlags,

    lat: f32,
    lon: f32,
    target_position: Vec3,
}

impl Default for DesktopControls {
    fn default() -> Self {
        Self {
            enabled: true,
            movement_speed: 1.0,
            look_speed: 0.005,
            look_vertical: true,
            auto_forward: false,
            height_speed: false,
            height_coef: 1.0,
            height_min: 0.0,
            height_max: 1.0,
            constrain_vertical: false,
            vertical_min: 0.0,
            vertical_max: PI,
            keyboard_requires_drag: false,
            pointer_drag: false,
            pointer: Vec2::ZERO,
            prev_pointer: Vec2::ZERO,
            pointer_delta: Vec2::ZERO,
            view_half: Vec2::ZERO,
            moves: MoveFlags::default(),
            lat: 0.0,
            lon: 0.0,
            target_position: Vec3::new(0.0, 100.0, 1.0),
        }
    }
}

impl DesktopControls {
    /// Create controls for a viewport and take the initial orientation from `camera`.
    pub fn new(camera: &Transform, viewport_width: f32, viewport_height: f32) -> Self {
        let mut controls = Self::default();
        controls.handle_resize(viewport_width, viewport_height);
        controls.set_orientation(camera);
        controls
    }

    /// Recompute the half-viewport used to centre pointer coordinates.
    pub fn handle_resize(&mut self, width: f32, height: f32) {
        self.view_half = Vec2::new(width, height) / 2.0;
    }

    fn to_local(&self, page_x: f32, page_y: f32) -> Vec2 {
        Vec2::new(page_x, page_y) - self.view_half
    }

    /// Begin a drag at a page position.
    pub fn on_pointer_down(&mut self, page_x: f32, page_y: f32) {
        self.pointer = self.to_local(page_x, page_y);
        self.prev_pointer = self.pointer;
        self.pointer_drag = true;
    }

    /// Track the pointer; ignored outside a drag.
    pub fn on_pointer_move(&mut self, page_x: f32, page_y: f32) {
        if !self.pointer_drag {
            return;
        }
        self.pointer = self.to_local(page_x, page_y);
    }

    pub fn on_pointer_up(&mut self) {
        self.pointer_drag = false;
    }

    /// Update movement flags from a key event. Unbound keys are ignored.
    pub fn on_key(&mut self, key: KeyCode, state: ElementState) {
        if let Some(direction) = MoveDirection::from_key(key) {
            self.moves.set(direction, state.is_pressed());
        }
    }

    /// Face `target` and re-derive latitude/longitude from the new facing.
    pub fn look_at(&mut self, camera: &mut Transform, target: Vec3) {
        camera.look_at(target, Vec3::Y);
        self.set_orientation(camera);
    }

    /// Read latitude/longitude back from the camera's forward direction.
    pub fn set_orientation(&mut self, camera: &Transform) {
        let spherical = Spherical::from_vec3(camera.forward());
        self.lat = 90.0 - spherical.phi.to_degrees();
        self.lon = spherical.theta.to_degrees();
    }

    /// Advance one frame: keyboard translation, then drag look.
    pub fn tick(&mut self, camera: &mut Transform, delta: f32) -> Transform {
        if !self.enabled {
            return *camera;
        }

        if self.pointer_drag || !self.keyboard_requires_drag {
            self.apply_movement(camera, delta);
        }

        if self.pointer_drag {
            self.apply_look(camera, delta);
        }

        *camera
    }

    fn apply_movement(&self, camera: &mut Transform, delta: f32) {
        let auto_speed = if self.height_speed {
            let y = camera.position.y.clamp(self.height_min, self.height_max);
            delta * ((y - self.height_min) * self.height_coef)
        } else {
            0.0
        };

        let step = delta * self.movement_speed;
        let m = &self.moves;

        if m.forward || (self.auto_forward && !m.backward) {
            camera.translate_local(Vec3::Z, -(step + auto_speed));
        }
        if m.backward {
            camera.translate_local(Vec3::Z, step);
        }
        if m.left {
            camera.translate_local(Vec3::X, -step);
        }
        if m.right {
            camera.translate_local(Vec3::X, step);
        }
        if m.up {
            camera.translate_local(Vec3::Y, step);
        }
        if m.down {
            camera.translate_local(Vec3::Y, -step);
        }
    }

    fn apply_look(&mut self, camera: &mut Transform, delta: f32) {
        self.pointer_delta = self.pointer - self.prev_pointer;

        // Velocity is per second, so a zero-length frame has none to offer.
        if delta > 0.0 {
            let vertical_ratio = if self.constrain_vertical {
                PI / (self.vertical_max - self.vertical_min)
            } else {
                1.0
            };

            let velocity = self.pointer_delta / delta * self.look_speed;
            self.lon -= velocity.x;
            if self.look_vertical {
                self.lat -= velocity.y * vertical_ratio;
            }
            self.lat = clamp_latitude(self.lat);

            let phi = polar_angle(self.lat, self.vertical_range());
            let theta = self.lon.to_radians();
            self.target_position = Spherical::new(1.0, phi, theta).to_vec3() + camera.position;
            camera.look_at(self.target_position, Vec3::Y);
        }

        self.prev_pointer = self.pointer;
    }

    fn vertical_range(&self) -> Option<(f32, f32)> {
        self.constrain_vertical
            .then_some((self.vertical_min, self.vertical_max))
    }

    /// Unit look direction described by the current latitude/longitude.
    pub fn look_direction(&self) -> Vec3 {
        Spherical::new(1.0, polar_angle(self.lat, self.vertical_range()), self.lon.to_radians())
            .to_vec3()
    }

    pub fn latitude(&self) -> f32 {
        self.lat
    }

    pub fn longitude(&self) -> f32 {
        self.lon
    }

    /// Pointer movement consumed by the last look update.
    pub fn pointer_delta(&self) -> Vec2 {
        self.pointer_delta
    }
}

impl CameraController for DesktopControls {
    fn update(&mut self, camera: &mut Transform, dt: f32) {
        self.tick(camera, dt);
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera_at_height() -> Transform {
        Transform::from_position(Vec3::new(0.0, 100.0, 0.0))
    }

    #[test]
    fn clamp_latitude_stays_in_bounds() {
        for lat in [-1000.0, -85.1, -3.0, 0.0, 42.0, 85.0, 90.0, 1e6] {
            let c = clamp_latitude(lat);
            assert!((-MAX_LATITUDE..=MAX_LATITUDE).contains(&c), "{lat} -> {c}");
        }
    }

    #[test]
    fn constrained_polar_angle_stays_in_range() {
        let range = Some((0.5, 2.0));
        for lat in [-200.0, -85.0, 0.0, 30.0, 85.0, 300.0] {
            let phi = polar_angle(clamp_latitude(lat), range);
            assert!((0.5..=2.0).contains(&phi), "{lat} -> {phi}");
        }
    }

    #[test]
    fn look_at_is_inverted_by_look_direction() {
        let mut camera = camera_at_height();
        let mut controls = DesktopControls::new(&camera, 800.0, 600.0);
        let target = Vec3::new(120.0, 160.0, 500.0);
        controls.look_at(&mut camera, target);
        let expected = (target - camera.position).normalize();
        assert!(controls.look_direction().abs_diff_eq(expected, 1e-4));
    }

    #[test]
    fn repeated_look_at_is_idempotent() {
        let mut camera = camera_at_height();
        let mut controls = DesktopControls::new(&camera, 800.0, 600.0);
        controls.look_at(&mut camera, Vec3::new(0.0, 100.0, 500.0));
        let (lat, lon) = (controls.latitude(), controls.longitude());
        controls.look_at(&mut camera, Vec3::new(0.0, 100.0, 500.0));
        assert!((controls.latitude() - lat).abs() < 1e-4);
        assert!((controls.longitude() - lon).abs() < 1e-4);
        assert!(lat.abs() < 1e-3);
        assert!((lon - 90.0).abs() < 1e-3);
    }

    #[test]
    fn still_drag_keeps_facing() {
        let mut camera = camera_at_height();
        let mut controls = DesktopControls::new(&camera, 800.0, 600.0);
        controls.look_at(&mut camera, Vec3::new(0.0, 100.0, 500.0));
        let before = camera.forward();
        controls.on_pointer_down(400.0, 300.0);
        controls.tick(&mut camera, 1.0 / 60.0);
        assert!(camera.forward().abs_diff_eq(before, 1e-4));
    }

    #[test]
    fn look_uses_pointer_velocity() {
        let mut camera = camera_at_height();
        let mut controls = DesktopControls::new(&camera, 800.0, 600.0);
        controls.look_at(&mut camera, Vec3::new(0.0, 100.0, 500.0));
        let lon0 = controls.longitude();

        controls.on_pointer_down(400.0, 300.0);
        controls.on_pointer_move(410.0, 300.0);
        controls.tick(&mut camera, 0.5);
        // 10 px over 0.5 s at 0.005 per px/s.
        assert!((controls.longitude() - (lon0 - 0.1)).abs() < 1e-4);
        assert_eq!(controls.pointer_delta(), Vec2::new(10.0, 0.0));

        // Same offset in a frame ten times shorter turns ten times further.
        let lon1 = controls.longitude();
        controls.on_pointer_move(420.0, 300.0);
        controls.tick(&mut camera, 0.05);
        assert!((controls.longitude() - (lon1 - 1.0)).abs() < 1e-4);
    }

    #[test]
    fn vertical_drag_is_clamped() {
        let mut camera = camera_at_height();
        let mut controls = DesktopControls::new(&camera, 800.0, 600.0);
        controls.on_pointer_down(0.0, 0.0);
        controls.on_pointer_move(0.0, -100_000.0);
        controls.tick(&mut camera, 0.01);
        assert_eq!(controls.latitude(), MAX_LATITUDE);
        assert!(camera.forward().y > 0.99);
    }

    #[test]
    fn look_ignored_without_drag() {
        let mut camera = camera_at_height();
        let mut controls = DesktopControls::new(&camera, 800.0, 600.0);
        let rotation = camera.rotation;
        controls.on_pointer_move(700.0, 10.0);
        controls.tick(&mut camera, 0.016);
        assert_eq!(camera.rotation, rotation);
    }

    #[test]
    fn zero_delta_skips_look() {
        let mut camera = camera_at_height();
        let mut controls = DesktopControls::new(&camera, 800.0, 600.0);
        controls.on_pointer_down(0.0, 0.0);
        controls.on_pointer_move(50.0, 50.0);
        controls.tick(&mut camera, 0.0);
        assert!(controls.latitude().is_finite());
        assert!(controls.longitude().is_finite());
    }

    #[test]
    fn keys_move_camera_without_drag() {
        let mut camera = camera_at_height();
        let mut controls = DesktopControls::new(&camera, 800.0, 600.0);
        controls.movement_speed = 10.0;
        controls.on_key(KeyCode::KeyW, ElementState::Pressed);
        controls.tick(&mut camera, 0.5);
        // Identity rotation faces -Z.
        assert!(camera.position.abs_diff_eq(Vec3::new(0.0, 100.0, -5.0), 1e-4));

        controls.on_key(KeyCode::KeyW, ElementState::Released);
        controls.on_key(KeyCode::KeyR, ElementState::Pressed);
        controls.tick(&mut camera, 1.0);
        assert!((camera.position.y - 110.0).abs() < 1e-4);
    }

    #[test]
    fn keyboard_can_require_drag() {
        let mut camera = camera_at_height();
        let mut controls = DesktopControls::new(&camera, 800.0, 600.0);
        controls.keyboard_requires_drag = true;
        controls.on_key(KeyCode::ArrowRight, ElementState::Pressed);
        controls.tick(&mut camera, 1.0);
        assert_eq!(camera.position, Vec3::new(0.0, 100.0, 0.0));
    }

    #[test]
    fn height_speed_boosts_forward() {
        let mut camera = Transform::from_position(Vec3::new(0.0, 5.0, 0.0));
        let mut controls = DesktopControls::new(&camera, 800.0, 600.0);
        controls.height_speed = true;
        controls.height_min = 0.0;
        controls.height_max = 10.0;
        controls.height_coef = 2.0;
        controls.on_key(KeyCode::ArrowUp, ElementState::Pressed);
        controls.tick(&mut camera, 1.0);
        // 1.0 base + 1.0 * (5 - 0) * 2.0 boost.
        assert!((camera.position.z + 11.0).abs() < 1e-4);
    }

    #[test]
    fn disabled_controls_do_nothing() {
        let mut camera = camera_at_height();
        let mut controls = DesktopControls::new(&camera, 800.0, 600.0);
        controls.enabled = false;
        controls.on_key(KeyCode::KeyS, ElementState::Pressed);
        let out = controls.tick(&mut camera, 1.0);
        assert_eq!(out, camera_at_height());
    }

    #[test]
    fn resize_recentres_pointer() {
        let camera = camera_at_height();
        let mut controls = DesktopControls::new(&camera, 800.0, 600.0);
        controls.handle_resize(200.0, 100.0);
        controls.on_pointer_down(100.0, 50.0);
        controls.on_pointer_move(150.0, 50.0);
        assert_eq!(controls.pointer, Vec2::new(50.0, 0.0));
        assert_eq!(controls.prev_pointer, Vec2::ZERO);
    }
}
