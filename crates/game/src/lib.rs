//! Shoebill arena simulation.
//!
//! `SimulationState` owns everything: the ECS world of shoebills and
//! projectiles, the camera and its controllers, the spawn clock and the UI
//! signals. The host feeds it input through the `on_*` entry points, calls
//! [`SimulationState::frame`] once per display frame and hands the resulting
//! [`FrameSnapshot`] to its renderer.

pub mod actor;
pub mod animation;
pub mod config;
mod events;
pub mod hud;
pub mod movement;
pub mod population;
pub mod render;
pub mod scene;
pub mod spawner;
pub mod state;
mod update;
pub mod weapons;

pub use actor::{ActorSpec, Destination, MovementMode, Shoebill};
pub use animation::{AnimState, AnimTrigger, Animator};
pub use config::{ConfigError, GameConfig, GameMode};
pub use hud::{HudSignals, Signal};
pub use render::{ActorInstance, FrameSnapshot, LastFrame, RenderSink};
pub use scene::{AssetError, BuiltinScene, ClipLibrary, LoadedScene, SceneLoader};
pub use state::{Phase, SimulationState};
