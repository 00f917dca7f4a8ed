//! Game configuration (arena, spawning, weapons, controls). Loaded from config.ron at startup.

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::path::{Path, PathBuf};

/// Which variant of the arena loop to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Shoebills walk straight at the player; shoot them before one gets too close.
    #[default]
    Shooting,
    /// A merry-go-round ring of shoebills; newcomers fly in and land.
    Carousel,
}

/// Errors reading the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// All tunables. Every field falls back to its default when absent from the file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub mode: GameMode,
    pub arena: ArenaConfig,
    pub spawn: SpawnConfig,
    pub weapons: WeaponConfig,
    pub controls: ControlsConfig,
    pub clips: ClipNames,
    pub demo: DemoConfig,
}

/// Arena geometry and difficulty.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Radius of the starting ring.
    pub radius: f32,
    /// Shoebills in the starting ring (carousel mode).
    pub ring_count: usize,
    /// Approach speed in units per second.
    pub level: f32,
    /// An approaching shoebill closer than this ends the game.
    pub loss_radius: f32,
    /// Camera eye height.
    pub camera_height: f32,
    /// Carousel turn rate as a fraction of PI per second.
    pub circling_rate: f32,
    /// 1-in-N chance of extra mode at startup; 0 disables the roll.
    pub extra_mode_chance: u32,
    /// Arena clicks during the opening that unlock extra mode.
    pub extra_mode_clicks: u32,
    /// Yaw bias given to ring shoebills in extra mode, radians.
    pub extra_mode_bias: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            radius: 500.0,
            ring_count: 8,
            level: 50.0,
            loss_radius: 50.0,
            camera_height: 100.0,
            circling_rate: 0.1,
            extra_mode_chance: 10,
            extra_mode_clicks: 10,
            extra_mode_bias: PI / 2.0,
        }
    }
}

/// Population cadence and placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Seconds between spawn attempts in shooting mode.
    pub shooting_interval: f32,
    /// Seconds between spawn attempts in carousel mode.
    pub carousel_interval: f32,
    /// Spawns are skipped unless the frame rate is above this.
    pub min_fps: f32,
    /// Timed spawns are skipped once this many shoebills are alive.
    pub max_actors: usize,
    /// Scale of the shoebills placed at load.
    pub base_scale: f32,
    /// Smallest random scale for spawned shoebills.
    pub scale_min: u32,
    /// Spawned scale is `scale_min + rand(0..scale_range)`.
    pub scale_range: u32,
    /// Where fliers appear, horizontally and vertically.
    pub flight_start_radius: f32,
    pub flight_start_height: f32,
    /// Fliers land somewhere in `[min, max)` from the centre.
    pub landing_radius_min: f32,
    pub landing_radius_max: f32,
    pub flight_speed: f32,
    pub landing_speed: f32,
    /// Distance at which a flier counts as arrived.
    pub arrival_threshold: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            shooting_interval: 2.0,
            carousel_interval: 10.0,
            min_fps: 40.0,
            max_actors: 120,
            base_scale: 100.0,
            scale_min: 80,
            scale_range: 20,
            flight_start_radius: 1500.0,
            flight_start_height: 300.0,
            landing_radius_min: 250.0,
            landing_radius_max: 750.0,
            flight_speed: 50.0,
            landing_speed: 50.0,
            arrival_threshold: 50.0,
        }
    }
}

/// Projectile behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    /// Distance in front of the camera where projectiles appear.
    pub muzzle_offset: f32,
    /// Outward speed of the projectile path, units per second.
    pub spiral_speed: f32,
    /// Height of the point the projectile path expands from.
    pub pivot_height: f32,
    /// A ray hit closer than this counts.
    pub hit_distance: f32,
    pub score_per_hit: u32,
    /// Seconds before a missed projectile is discarded.
    pub projectile_lifetime: f32,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            muzzle_offset: 50.0,
            spiral_speed: 500.0,
            pivot_height: 100.0,
            hit_distance: 50.0,
            score_per_hit: 50,
            projectile_lifetime: 8.0,
        }
    }
}

/// Desktop look/move settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub movement_speed: f32,
    pub look_speed: f32,
    pub look_vertical: bool,
    pub auto_forward: bool,
    pub constrain_vertical: bool,
    pub vertical_min: f32,
    pub vertical_max: f32,
    pub height_speed: bool,
    pub height_coef: f32,
    pub height_min: f32,
    pub height_max: f32,
    pub keyboard_requires_drag: bool,
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            movement_speed: 1.0,
            look_speed: 0.005,
            look_vertical: true,
            auto_forward: false,
            constrain_vertical: false,
            vertical_min: 0.0,
            vertical_max: PI,
            height_speed: false,
            height_coef: 1.0,
            height_min: 0.0,
            height_max: 1.0,
            keyboard_requires_drag: false,
            viewport_width: 1280.0,
            viewport_height: 720.0,
        }
    }
}

/// Animation clip names looked up in the loaded scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipNames {
    pub idle: String,
    pub walk: String,
    pub fly: String,
    pub fly_end: String,
}

impl Default for ClipNames {
    fn default() -> Self {
        Self {
            idle: "Shoebill_idle".into(),
            walk: "Shoebill_walk".into(),
            fly: "Shoebill_fly".into(),
            fly_end: "Shoebill_fly_end".into(),
        }
    }
}

/// Headless driver settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub seconds: f32,
    pub fps: f32,
    /// Seconds between scripted shots.
    pub fire_interval: f32,
    /// Fixed RNG seed; entropy when unset.
    pub seed: Option<u64>,
    /// Clip durations of the built-in scene, seconds.
    pub idle_duration: f32,
    pub walk_duration: f32,
    pub fly_duration: f32,
    pub fly_end_duration: f32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            seconds: 30.0,
            fps: 60.0,
            fire_interval: 0.5,
            seed: None,
            idle_duration: 2.0,
            walk_duration: 1.2,
            fly_duration: 0.8,
            fly_end_duration: 1.5,
        }
    }
}

impl GameConfig {
    /// Spawn interval for the configured mode.
    pub fn spawn_interval(&self) -> f32 {
        match self.mode {
            GameMode::Shooting => self.spawn.shooting_interval,
            GameMode::Carousel => self.spawn.carousel_interval,
        }
    }

    /// Load config from `config.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        let path = config_path();
        if !path.exists() {
            return Self::default();
        }
        match Self::from_path(&path) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Invalid config at {:?}: {}, using defaults", path, e);
                Self::default()
            }
        }
    }

    /// Read and parse a config file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path)?;
        Ok(ron::from_str(&data)?)
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("config.ron")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_fills_defaults() {
        let cfg: GameConfig = ron::from_str("(mode: Carousel, arena: (radius: 300.0))").unwrap();
        assert_eq!(cfg.mode, GameMode::Carousel);
        assert_eq!(cfg.arena.radius, 300.0);
        assert_eq!(cfg.arena.ring_count, 8);
        assert_eq!(cfg.weapons.score_per_hit, 50);
        assert_eq!(cfg.spawn_interval(), 10.0);
    }

    #[test]
    fn empty_config_is_default() {
        let cfg: GameConfig = ron::from_str("()").unwrap();
        assert_eq!(cfg.mode, GameMode::Shooting);
        assert_eq!(cfg.spawn_interval(), 2.0);
        assert_eq!(cfg.clips.idle, "Shoebill_idle");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = GameConfig::from_path(Path::new("/definitely/not/here/config.ron")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = std::env::temp_dir().join(format!("shoebill-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.ron");
        std::fs::write(&path, "(mode: Sideways)").unwrap();
        let err = GameConfig::from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
