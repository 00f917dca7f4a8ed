//! Common interface for anything that drives the camera each frame.

use engine_core::Transform;

/// A camera driver updated once per frame.
///
/// Several controllers may be registered at once; each is updated in turn
/// against the same camera, so their effects compose in registration order.
pub trait CameraController {
    fn update(&mut self, camera: &mut Transform, dt: f32);

    fn is_enabled(&self) -> bool {
        true
    }
}
