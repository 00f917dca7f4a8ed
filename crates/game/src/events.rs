//! Input entry points for SimulationState: host interactions, pointer and
//! keyboard, device orientation, and the winit adapter over them.

use engine_core::{Vec2, Vec3};
use input::{key_from_dom_code, DeviceOrientation, OrientationControls};
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::scene::SceneLoader;
use crate::state::SimulationState;

impl SimulationState {
    /// The start interaction: load the scene once. A failed load leaves the
    /// simulation waiting so the host can try again.
    pub fn on_start(&mut self, loader: &mut dyn SceneLoader) {
        if self.started {
            return;
        }
        self.started = true;
        if let Err(e) = self.load_scene(loader) {
            log::warn!("Scene load failed: {}", e);
            self.started = false;
            return;
        }
        self.apply_extra_bias();
    }

    pub fn on_pointer_down(&mut self, page_x: f32, page_y: f32) {
        self.desktop.on_pointer_down(page_x, page_y);
    }

    pub fn on_pointer_move(&mut self, page_x: f32, page_y: f32) {
        self.desktop.on_pointer_move(page_x, page_y);
    }

    pub fn on_pointer_up(&mut self) {
        self.desktop.on_pointer_up();
    }

    pub fn on_key(&mut self, key: KeyCode, state: ElementState) {
        self.desktop.on_key(key, state);
    }

    /// Keyboard input by legacy DOM key code. Unbound codes are ignored.
    pub fn on_dom_key(&mut self, code: u32, pressed: bool) {
        let Some(key) = key_from_dom_code(code) else {
            return;
        };
        let state = if pressed {
            ElementState::Pressed
        } else {
            ElementState::Released
        };
        self.desktop.on_key(key, state);
    }

    pub fn on_resize(&mut self, width: f32, height: f32) {
        self.desktop.handle_resize(width, height);
    }

    /// A device orientation reading. `None`, a zero heading or a heading that
    /// is not a number means the device has no usable sensor yet.
    pub fn on_device_orientation(&mut self, reading: Option<DeviceOrientation>, screen_orientation: f32) {
        if !self.started {
            return;
        }
        let Some(reading) = reading.filter(|r| r.alpha.is_finite() && r.alpha != 0.0) else {
            return;
        };
        if let Some(controls) = self.orientation.as_mut() {
            controls.set_reading(reading);
            controls.set_screen_orientation(screen_orientation);
            return;
        }

        let mut controls = OrientationControls::new();
        controls.set_reading(reading);
        controls.set_screen_orientation(screen_orientation);
        input::CameraController::update(&mut controls, &mut self.camera, 0.0);
        self.orientation = Some(controls);

        let arena = &self.config.arena;
        let target = Vec3::new(0.0, arena.camera_height, arena.radius);
        self.camera.look_at(target, Vec3::Y);
        log::info!("Device orientation controls attached");
    }

    /// A click on the arena. Enough of them during the opening unlock extra mode.
    pub fn on_arena_click(&mut self) {
        self.extra.clicks += 1;
        let needed = self.config.arena.extra_mode_clicks;
        if self.extra.clicks < needed {
            log::info!("{}...", self.extra.clicks);
        } else if self.is_opening() && !self.extra.active {
            self.extra.active = true;
            log::info!("EXTRA MODE START!!");
            self.apply_extra_bias();
        }
    }

    /// Fire a projectile along the camera's view. Ignored during the opening
    /// and after game over.
    pub fn on_fire(&mut self) {
        if self.is_opening() || self.is_game_over() {
            return;
        }
        self.weapons.fire(&mut self.world, &self.camera);
    }

    /// Route a winit window event. Left button drags the view, Space fires,
    /// movement keys fly the camera.
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::Resized(size) => {
                self.on_resize(size.width as f32, size.height as f32);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(position.x as f32, position.y as f32);
                self.on_pointer_move(self.cursor.x, self.cursor.y);
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                if state.is_pressed() {
                    let pointer = self.cursor;
                    self.on_pointer_down(pointer.x, pointer.y);
                } else {
                    self.on_pointer_up();
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(key) = event.physical_key else {
                    return;
                };
                if key == KeyCode::Space {
                    if event.state.is_pressed() && !event.repeat {
                        self.on_fire();
                    }
                    return;
                }
                self.on_key(key, event.state);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameMode;
    use crate::scene::{BuiltinScene, ClipLibrary};
    use crate::state::tests::{config, started};
    use crate::state::Phase;
    use rand::prelude::*;
    use std::f32::consts::PI;

    #[test]
    fn start_loads_once() {
        let cfg = config(GameMode::Carousel);
        let mut sim = SimulationState::with_rng(cfg.clone(), StdRng::seed_from_u64(1));
        let mut loader = BuiltinScene::new(&cfg.clips, &cfg.demo);
        sim.on_start(&mut loader);
        sim.on_start(&mut loader);
        assert_eq!(loader.loads(), 1);
        assert_eq!(sim.actor_count(), 8);
    }

    #[test]
    fn missing_clip_keeps_waiting() {
        let cfg = config(GameMode::Shooting);
        let mut sim = SimulationState::with_rng(cfg, StdRng::seed_from_u64(1));
        let mut lib = ClipLibrary::new();
        lib.insert("Shoebill_idle", 1.0);
        sim.on_start(&mut BuiltinScene::from_library(lib));
        assert_eq!(sim.phase(), Phase::Waiting);
        assert_eq!(sim.actor_count(), 0);
        // Spawn boundaries pass silently.
        sim.frame(2.5);
        assert_eq!(sim.actor_count(), 0);
    }

    #[test]
    fn fire_is_ignored_during_opening() {
        let mut sim = started(GameMode::Shooting);
        sim.on_fire();
        assert_eq!(sim.projectile_count(), 0);
    }

    #[test]
    fn ten_clicks_during_opening_unlock_extra_mode() {
        let mut sim = started(GameMode::Carousel);
        let ring = sim.actors();
        for _ in 0..9 {
            sim.on_arena_click();
        }
        assert!(!sim.extra_mode().active);
        sim.on_arena_click();
        assert!(sim.extra_mode().active);
        let (t, s) = sim.actor(ring[0]).unwrap();
        assert!((s.yaw - PI).abs() < 1e-5);
        assert!(t.heading().abs_diff_eq(Vec3::new(-1.0, 0.0, 0.0), 1e-5));

        // Further clicks do not stack the bias.
        sim.on_arena_click();
        let (_, s) = sim.actor(ring[0]).unwrap();
        assert!((s.yaw - PI).abs() < 1e-5);
    }

    #[test]
    fn clicks_after_opening_do_nothing() {
        let mut sim = started(GameMode::Carousel);
        sim.frame(0.6);
        assert_eq!(sim.phase(), Phase::Playing);
        for _ in 0..12 {
            sim.on_arena_click();
        }
        assert!(!sim.extra_mode().active);
    }

    #[test]
    fn orientation_needs_start_and_heading() {
        let cfg = config(GameMode::Carousel);
        let mut sim = SimulationState::with_rng(cfg.clone(), StdRng::seed_from_u64(1));
        sim.on_device_orientation(Some(DeviceOrientation::new(10.0, 90.0, 0.0)), 0.0);
        assert!(sim.orientation.is_none());

        sim.on_start(&mut BuiltinScene::new(&cfg.clips, &cfg.demo));
        sim.on_device_orientation(None, 0.0);
        sim.on_device_orientation(Some(DeviceOrientation::new(0.0, 90.0, 0.0)), 0.0);
        assert!(sim.orientation.is_none());
        sim.on_device_orientation(Some(DeviceOrientation::new(f32::NAN, 90.0, 0.0)), 0.0);
        assert!(sim.orientation.is_none());

        sim.on_device_orientation(Some(DeviceOrientation::new(10.0, 90.0, 0.0)), 0.0);
        assert!(sim.orientation.is_some());
        assert!(sim.camera.forward().abs_diff_eq(Vec3::Z, 1e-4));

        sim.on_device_orientation(Some(DeviceOrientation::new(90.0, 90.0, 0.0)), 0.0);
        let reading = sim.orientation.as_ref().unwrap().reading().unwrap();
        assert_eq!(reading.alpha, 90.0);
    }

    #[test]
    fn orientation_drives_camera_after_opening() {
        let mut sim = started(GameMode::Carousel);
        sim.frame(0.6);
        sim.on_device_orientation(Some(DeviceOrientation::new(90.0, 90.0, 0.0)), 0.0);
        sim.frame(0.016);
        assert!(sim.camera.forward().abs_diff_eq(-Vec3::X, 1e-4));
    }

    #[test]
    fn dom_keys_move_the_camera() {
        let mut sim = started(GameMode::Carousel);
        sim.frame(0.6);
        let before = sim.camera.position;
        sim.on_dom_key(87, true);
        sim.frame(0.5);
        sim.on_dom_key(87, false);
        let moved = sim.camera.position - before;
        // Facing +Z at 1 unit per second.
        assert!(moved.abs_diff_eq(Vec3::new(0.0, 0.0, 0.5), 1e-3));
        sim.frame(0.5);
        assert!((sim.camera.position - before).abs_diff_eq(moved, 1e-6));
    }
}
