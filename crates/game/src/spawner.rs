//! Shoebill spawning: ring placement at load, then a fixed-interval clock.
//!
//! The clock counts interval boundaries, not elapsed spawns: when a boundary
//! passes while spawning is blocked (opening, low frame rate, population cap)
//! the attempt is dropped, never queued.

use std::f32::consts::{PI, TAU};

use engine_core::{Cylindrical, Vec3};
use rand::prelude::*;

use crate::actor::{ActorSpec, Destination, MovementMode};
use crate::animation::AnimState;
use crate::config::{GameConfig, SpawnConfig};

/// State the spawn clock is gated on.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpawnGate {
    pub opening: bool,
    pub game_over: bool,
    pub alive: usize,
}

/// Why a boundary passed without a spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Opening,
    LowFps,
    AtCapacity,
}

/// Outcome of one clock tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnDecision {
    /// No boundary this frame.
    Wait,
    Spawn,
    Skipped(SkipReason),
}

/// Fixed-cadence spawner. Owns the game's random source.
pub struct Spawner {
    /// Seconds between spawn attempts.
    pub interval: f32,
    /// Spawns need a frame rate strictly above this.
    pub min_fps: f32,
    pub max_actors: usize,
    total_time: f32,
    /// Next boundary, in intervals. Starts at 1.
    events_count: u32,
    rng: StdRng,
}

impl Spawner {
    pub fn new(config: &GameConfig, rng: StdRng) -> Self {
        Self {
            interval: config.spawn_interval(),
            min_fps: config.spawn.min_fps,
            max_actors: config.spawn.max_actors,
            total_time: 0.0,
            events_count: 1,
            rng,
        }
    }

    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Advance the clock. At most one boundary is consumed per call; the clock
    /// stops counting boundaries once the game is over.
    pub fn tick(&mut self, dt: f32, fps: f32, gate: SpawnGate) -> SpawnDecision {
        self.total_time += dt.max(0.0);
        if gate.game_over || self.total_time <= self.interval * self.events_count as f32 {
            return SpawnDecision::Wait;
        }
        self.events_count += 1;
        if gate.opening {
            SpawnDecision::Skipped(SkipReason::Opening)
        } else if fps <= self.min_fps {
            SpawnDecision::Skipped(SkipReason::LowFps)
        } else if gate.alive >= self.max_actors {
            SpawnDecision::Skipped(SkipReason::AtCapacity)
        } else {
            SpawnDecision::Spawn
        }
    }

    /// True with probability 1/n. Never for n = 0.
    pub fn one_in(&mut self, n: u32) -> bool {
        n > 0 && self.rng.gen_range(0..n) == 0
    }

    /// A walker somewhere in `[radius, 3 * radius)`, facing the centre.
    pub fn random_walker(&mut self, spawn: &SpawnConfig, radius: f32) -> ActorSpec {
        let scale = self.random_scale(spawn);
        let span = (radius * 2.0).max(1.0) as u32;
        let r = self.rng.gen_range(0..span) as f32 + radius;
        let theta = TAU * self.rng.gen::<f32>();
        ActorSpec {
            position: Cylindrical::new(r, theta, 0.0).to_vec3(),
            yaw: theta + PI,
            scale,
            mode: MovementMode::Approaching,
            anim: AnimState::Walk,
            destination: None,
            ring_slot: None,
        }
    }

    /// A flier high above the arena edge, lined up with a random landing spot.
    pub fn random_flier(&mut self, spawn: &SpawnConfig) -> ActorSpec {
        let scale = self.random_scale(spawn);
        let lo = spawn.landing_radius_min;
        let hi = spawn.landing_radius_max.max(lo + 1.0);
        let destination = Destination::new(
            self.rng.gen_range(lo..hi),
            TAU * self.rng.gen::<f32>(),
        );
        ActorSpec {
            position: Cylindrical::new(
                spawn.flight_start_radius,
                destination.theta,
                spawn.flight_start_height,
            )
            .to_vec3(),
            yaw: destination.theta + PI,
            scale,
            mode: MovementMode::FlyingIn,
            anim: AnimState::Fly,
            destination: Some(destination),
            ring_slot: None,
        }
    }

    fn random_scale(&mut self, spawn: &SpawnConfig) -> f32 {
        (spawn.scale_min + self.rng.gen_range(0..spawn.scale_range.max(1))) as f32
    }
}

/// Slot `index` of an evenly spaced ring, facing along the ring.
/// Returns the position and yaw; `bias` is added to the yaw.
pub fn ring_placement(index: usize, count: usize, radius: f32, bias: f32) -> (Vec3, f32) {
    let phi = TAU / count.max(1) as f32 * index as f32;
    (
        Cylindrical::new(radius, phi, 0.0).to_vec3(),
        phi + PI / 2.0 + bias,
    )
}
