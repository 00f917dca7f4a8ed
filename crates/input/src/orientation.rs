//! Camera rotation from a handheld device's orientation sensor.

use engine_core::{Quat, Transform};
use glam::EulerRot;
use std::f32::consts::FRAC_PI_2;

use crate::controller::CameraController;

/// One sensor reading, angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DeviceOrientation {
    /// Rotation about the device Z axis (compass heading).
    pub alpha: f32,
    /// Rotation about the device X axis (front-back tilt).
    pub beta: f32,
    /// Rotation about the device Y axis (left-right tilt).
    pub gamma: f32,
}

impl DeviceOrientation {
    pub fn new(alpha: f32, beta: f32, gamma: f32) -> Self {
        Self { alpha, beta, gamma }
    }
}

/// Camera rotation for a device pose. All angles in radians.
///
/// The sensor frame looks down its own -Z when lying flat, so the pose is
/// tilted back a quarter turn about X, then counter-rotated for the screen.
pub fn device_quaternion(alpha: f32, beta: f32, gamma: f32, screen_orientation: f32) -> Quat {
    Quat::from_euler(EulerRot::YXZ, alpha, beta, -gamma)
        * Quat::from_rotation_x(-FRAC_PI_2)
        * Quat::from_rotation_z(-screen_orientation)
}

/// Overwrites the camera rotation with the latest sensor reading.
#[derive(Debug, Clone, Default)]
pub struct OrientationControls {
    pub enabled: bool,
    /// Added to the heading, radians.
    pub alpha_offset: f32,
    /// Screen rotation in degrees (0, 90, -90, 180).
    screen_orientation: f32,
    reading: Option<DeviceOrientation>,
}

impl OrientationControls {
    pub fn new() -> Self {
        Self {
            enabled: true,
            ..Default::default()
        }
    }

    pub fn set_reading(&mut self, reading: DeviceOrientation) {
        self.reading = Some(reading);
    }

    pub fn set_screen_orientation(&mut self, degrees: f32) {
        self.screen_orientation = degrees;
    }

    pub fn reading(&self) -> Option<DeviceOrientation> {
        self.reading
    }
}

impl CameraController for OrientationControls {
    fn update(&mut self, camera: &mut Transform, _dt: f32) {
        if !self.enabled {
            return;
        }
        let Some(r) = self.reading else {
            return;
        };
        camera.rotation = device_quaternion(
            r.alpha.to_radians() + self.alpha_offset,
            r.beta.to_radians(),
            r.gamma.to_radians(),
            self.screen_orientation.to_radians(),
        );
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}
