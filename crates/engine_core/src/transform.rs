//! Transform component and utilities for spatial positioning.

use std::f32::consts::FRAC_PI_2;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};

/// Local axis a placed model faces along.
pub const MODEL_FORWARD: Vec3 = Vec3::Z;

/// Rotation turning [`MODEL_FORWARD`] onto the horizontal bearing `yaw`.
///
/// Bearings are measured like the cylindrical azimuth, from +X toward +Z, so a
/// model with yaw `a` faces `(cos a, 0, sin a)`.
pub fn yaw_rotation(yaw: f32) -> Quat {
    Quat::from_rotation_y(FRAC_PI_2 - yaw)
}

/// A 3D transform representing position, rotation, and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform at the given position.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform at `position` facing bearing `yaw`, uniformly scaled.
    pub fn from_position_yaw_scale(position: Vec3, yaw: f32, scale: f32) -> Self {
        Self {
            position,
            rotation: yaw_rotation(yaw),
            scale: Vec3::splat(scale),
        }
    }

    /// Create the model matrix for this transform.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Get the forward direction (negative Z in right-handed coordinates).
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }

    /// Direction a placed model faces.
    pub fn heading(&self) -> Vec3 {
        self.rotation * MODEL_FORWARD
    }

    /// Translate along one of the transform's own axes.
    pub fn translate_local(&mut self, axis: Vec3, distance: f32) {
        self.position += self.rotation * (axis * distance);
    }

    /// Replace the rotation with a pure heading toward bearing `yaw`.
    pub fn set_yaw(&mut self, yaw: f32) {
        self.rotation = yaw_rotation(yaw);
    }

    /// Turn so that `forward()` points at `target`.
    ///
    /// Leaves the rotation untouched when the target coincides with the
    /// position or lies straight along `up`, where no unique facing exists.
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        let forward = target - self.position;
        if forward.length_squared() <= 0.0001 {
            return;
        }
        if forward.normalize().cross(up).length_squared() <= 1e-10 {
            return;
        }
        self.rotation = Quat::from_mat4(&Mat4::look_at_rh(self.position, target, up)).inverse();
    }
}

/// Raw transform data handed to the renderer (instance data).
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct TransformRaw {
    pub model: [[f32; 4]; 4],
}

impl From<&Transform> for TransformRaw {
    fn from(transform: &Transform) -> Self {
        Self {
            model: transform.to_matrix().to_cols_array_2d(),
        }
    }
}

impl From<Transform> for TransformRaw {
    fn from(transform: Transform) -> Self {
        Self::from(&transform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn look_at_points_forward_at_target() {
        let mut t = Transform::from_position(Vec3::new(0.0, 100.0, 0.0));
        let target = Vec3::new(30.0, 140.0, 500.0);
        t.look_at(target, Vec3::Y);
        let expected = (target - t.position).normalize();
        assert!(t.forward().abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn look_at_straight_up_keeps_rotation() {
        let mut t = Transform::from_position(Vec3::ZERO);
        t.look_at(Vec3::new(0.0, 10.0, 0.0), Vec3::Y);
        assert_eq!(t.rotation, Quat::IDENTITY);
    }

    #[test]
    fn heading_follows_bearing() {
        for i in 0..12 {
            let yaw = i as f32 * 0.55 - 3.0;
            let t = Transform::from_position_yaw_scale(Vec3::ZERO, yaw, 2.0);
            let expected = Vec3::new(yaw.cos(), 0.0, yaw.sin());
            assert!(t.heading().abs_diff_eq(expected, 1e-5), "yaw {yaw}");
        }
    }

    #[test]
    fn translate_local_follows_rotation() {
        let mut t = Transform::from_position(Vec3::ZERO);
        t.set_yaw(std::f32::consts::PI);
        // Bearing pi faces world -X.
        t.translate_local(MODEL_FORWARD, 10.0);
        assert!(t.position.abs_diff_eq(Vec3::new(-10.0, 0.0, 0.0), 1e-4));
    }

    #[test]
    fn raw_matrix_carries_translation() {
        let t = Transform::from_position_yaw_scale(Vec3::new(1.0, 2.0, 3.0), 0.3, 80.0);
        let raw = TransformRaw::from(&t);
        assert_eq!(raw.model[3][0], 1.0);
        assert_eq!(raw.model[3][1], 2.0);
        assert_eq!(raw.model[3][2], 3.0);
    }
}
