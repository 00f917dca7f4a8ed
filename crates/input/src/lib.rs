//! Camera input handling: desktop drag-look, keyboard fly and device orientation.

pub mod controller;
pub mod desktop;
pub mod keys;
pub mod orientation;

pub use controller::CameraController;
pub use desktop::{clamp_latitude, polar_angle, DesktopControls, MAX_LATITUDE};
pub use keys::{key_from_dom_code, MoveDirection, MoveFlags};
pub use orientation::{device_quaternion, DeviceOrientation, OrientationControls};

// Re-export for convenience
pub use winit::event::{ElementState, MouseButton};
pub use winit::keyboard::KeyCode;
