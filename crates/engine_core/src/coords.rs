//! Cylindrical and spherical coordinates around the world Y axis.
//!
//! Azimuth `theta` is measured in the XZ plane from +X toward +Z, so a point at
//! radius `r` and azimuth `theta` sits at `(r cos theta, y, r sin theta)`. The
//! spherical polar angle `phi` is measured down from +Y. Both representations
//! share the same azimuth, which keeps conversions between them exact.

use glam::Vec3;

/// Cylindrical coordinates: horizontal radius, azimuth (radians) and height.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cylindrical {
    pub radius: f32,
    pub theta: f32,
    pub y: f32,
}

impl Cylindrical {
    pub fn new(radius: f32, theta: f32, y: f32) -> Self {
        Self { radius, theta, y }
    }

    pub fn from_vec3(v: Vec3) -> Self {
        Self {
            radius: (v.x * v.x + v.z * v.z).sqrt(),
            theta: v.z.atan2(v.x),
            y: v.y,
        }
    }

    pub fn to_vec3(&self) -> Vec3 {
        Vec3::new(
            self.radius * self.theta.cos(),
            self.y,
            self.radius * self.theta.sin(),
        )
    }
}

/// Spherical coordinates: distance from origin, polar angle from +Y and azimuth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    pub phi: f32,
    pub theta: f32,
}

impl Default for Spherical {
    fn default() -> Self {
        Self {
            radius: 1.0,
            phi: 0.0,
            theta: 0.0,
        }
    }
}

impl Spherical {
    pub fn new(radius: f32, phi: f32, theta: f32) -> Self {
        Self { radius, phi, theta }
    }

    /// Convert a cartesian vector. The zero vector maps to `phi = theta = 0`.
    pub fn from_vec3(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            return Self::new(0.0, 0.0, 0.0);
        }
        Self {
            radius,
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
            theta: v.z.atan2(v.x),
        }
    }

    pub fn to_vec3(&self) -> Vec3 {
        let ring = self.radius * self.phi.sin();
        Vec3::new(
            ring * self.theta.cos(),
            self.radius * self.phi.cos(),
            ring * self.theta.sin(),
        )
    }
}

/// Linear remap of `x` from `[a1, a2]` to `[b1, b2]`. No clamping.
pub fn map_linear(x: f32, a1: f32, a2: f32, b1: f32, b2: f32) -> f32 {
    b1 + (x - a1) * (b2 - b1) / (a2 - a1)
}
