//! The single owned simulation state and its lifecycle.

use engine_core::{Time, Transform, TransformRaw, Vec2, Vec3};
use hecs::{Entity, World};
use input::{CameraController, DesktopControls, OrientationControls};
use physics::CollisionWorld;
use rand::prelude::*;

use crate::actor::{ActorSpec, MovementMode, Shoebill};
use crate::animation::{AnimState, Animator, AnimTrigger};
use crate::config::{GameConfig, GameMode};
use crate::hud::HudSignals;
use crate::movement::MovementParams;
use crate::population::Population;
use crate::render::{ActorInstance, FrameSnapshot, RenderSink};
use crate::scene::{AssetError, SceneLoader, ShoebillClips};
use crate::spawner::{ring_placement, Spawner};
use crate::weapons::WeaponSystem;

/// Coarse lifecycle phase, derived from the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No scene yet; waiting for the start interaction.
    Waiting,
    /// Scene loaded, lead shoebill idling. Only animations run.
    Opening,
    Playing,
    GameOver,
}

/// Opening bookkeeping. `consumed` flips exactly once.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpeningState {
    pub lead: Option<Entity>,
    pub consumed: bool,
}

/// Extra mode: ring shoebills turned a quarter off their path.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtraMode {
    pub active: bool,
    pub clicks: u32,
    /// Bias already folded into the ring shoebills' yaw.
    pub applied: bool,
}

pub struct SimulationState {
    pub config: GameConfig,
    pub world: World,
    pub population: Population,
    pub camera: Transform,
    pub desktop: DesktopControls,
    /// Appended on the first usable device orientation event.
    pub orientation: Option<OrientationControls>,
    pub time: Time,
    pub spawner: Spawner,
    pub weapons: WeaponSystem,
    pub collisions: CollisionWorld,
    pub hud: HudSignals,
    pub(crate) movement: MovementParams,
    pub(crate) clips: Option<ShoebillClips>,
    pub(crate) opening: OpeningState,
    pub(crate) extra: ExtraMode,
    pub(crate) started: bool,
    /// Last cursor position seen by the window adapter.
    pub(crate) cursor: Vec2,
}

impl SimulationState {
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Build with a caller-supplied random source (fixed seeds in tests).
    pub fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        let eye = Vec3::new(0.0, config.arena.camera_height, 0.0);
        let mut camera = Transform::from_position(eye);

        let c = &config.controls;
        let mut desktop = DesktopControls::new(&camera, c.viewport_width, c.viewport_height);
        desktop.movement_speed = c.movement_speed;
        desktop.look_speed = c.look_speed;
        desktop.look_vertical = c.look_vertical;
        desktop.auto_forward = c.auto_forward;
        desktop.constrain_vertical = c.constrain_vertical;
        desktop.vertical_min = c.vertical_min;
        desktop.vertical_max = c.vertical_max;
        desktop.height_speed = c.height_speed;
        desktop.height_coef = c.height_coef;
        desktop.height_min = c.height_min;
        desktop.height_max = c.height_max;
        desktop.keyboard_requires_drag = c.keyboard_requires_drag;
        desktop.look_at(
            &mut camera,
            Vec3::new(0.0, config.arena.camera_height, config.arena.radius),
        );

        let mut spawner = Spawner::new(&config, rng);
        let extra = ExtraMode {
            active: spawner.one_in(config.arena.extra_mode_chance),
            ..Default::default()
        };
        if extra.active {
            log::info!("Extra mode rolled at startup");
        }

        Self {
            movement: MovementParams::from_config(&config.arena, &config.spawn),
            weapons: WeaponSystem::new(&config.weapons),
            world: World::new(),
            population: Population::new(),
            camera,
            desktop,
            orientation: None,
            time: Time::new(),
            spawner,
            collisions: CollisionWorld::new(),
            hud: HudSignals::default(),
            clips: None,
            opening: OpeningState::default(),
            extra,
            started: false,
            cursor: Vec2::ZERO,
            config,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.clips.is_none() {
            Phase::Waiting
        } else if !self.opening.consumed {
            Phase::Opening
        } else if *self.hud.game_over.get() {
            Phase::GameOver
        } else {
            Phase::Playing
        }
    }

    /// True until the opening edge has fired, including before the scene loads.
    pub fn is_opening(&self) -> bool {
        !self.opening.consumed
    }

    pub fn is_game_over(&self) -> bool {
        *self.hud.game_over.get()
    }

    pub fn score(&self) -> u32 {
        *self.hud.score.get()
    }

    pub fn extra_mode(&self) -> ExtraMode {
        self.extra
    }

    pub fn lead(&self) -> Option<Entity> {
        self.opening.lead
    }

    /// Live shoebills in spawn order.
    pub fn actors(&self) -> Vec<Entity> {
        self.population.iter().collect()
    }

    pub fn actor_count(&self) -> usize {
        self.population.len()
    }

    pub fn projectile_count(&self) -> usize {
        self.weapons.len()
    }

    /// Pose and mode of a live shoebill.
    pub fn actor(&self, entity: Entity) -> Option<(Transform, Shoebill)> {
        let mut q = self.world.query_one::<(&Transform, &Shoebill)>(entity).ok()?;
        q.get().map(|(t, s)| (*t, *s))
    }

    pub fn animation_state(&self, entity: Entity) -> Option<AnimState> {
        self.world.get::<&Animator>(entity).ok().map(|a| a.state())
    }

    /// Load the scene and place the starting shoebills.
    pub(crate) fn load_scene(&mut self, loader: &mut dyn SceneLoader) -> Result<(), AssetError> {
        let scene = loader.load_scene()?;
        let clips = ShoebillClips::resolve(&scene.clips, &self.config.clips)?;
        self.clips = Some(clips);
        log::info!("Scene loaded with {} clips", scene.clips.len());
        self.place_initial_actors();
        Ok(())
    }

    fn place_initial_actors(&mut self) {
        let arena = self.config.arena.clone();
        let bias = if self.extra.active { arena.extra_mode_bias } else { 0.0 };
        self.extra.applied = self.extra.active;
        let (count, mode, extra_yaw) = match self.config.mode {
            GameMode::Shooting => (1, MovementMode::Approaching, std::f32::consts::FRAC_PI_2),
            GameMode::Carousel => (arena.ring_count, MovementMode::Circling, 0.0),
        };
        for slot in 0..count {
            let (position, yaw) = ring_placement(slot, arena.ring_count, arena.radius, bias);
            let spec = ActorSpec {
                mode,
                ring_slot: Some(slot),
                ..ActorSpec::idle(position, yaw + extra_yaw, self.config.spawn.base_scale)
            };
            if let Some(entity) = self.spawn_actor(&spec) {
                if slot == 0 {
                    self.opening.lead = Some(entity);
                }
            }
        }
    }

    /// Add a shoebill. Returns None before the scene has loaded.
    pub fn spawn_actor(&mut self, spec: &ActorSpec) -> Option<Entity> {
        let clips = self.clips?;
        Some(self.population.spawn(&mut self.world, spec, &clips))
    }

    /// Remove a shoebill. Returns false if it was not live.
    pub fn despawn_actor(&mut self, entity: Entity) -> bool {
        self.population.remove(&mut self.world, entity)
    }

    /// Spawn one shoebill of the mode's kind at a random spot.
    pub(crate) fn spawn_random(&mut self) -> Option<Entity> {
        self.clips?;
        let spec = match self.config.mode {
            GameMode::Shooting => self
                .spawner
                .random_walker(&self.config.spawn, self.config.arena.radius),
            GameMode::Carousel => self.spawner.random_flier(&self.config.spawn),
        };
        self.spawn_actor(&spec)
    }

    /// The opening edge: idle shoebills start walking, music comes up and
    /// the first extra shoebill appears.
    pub(crate) fn end_opening(&mut self) {
        if self.opening.consumed {
            return;
        }
        self.opening.consumed = true;
        if let Some(clips) = self.clips {
            for (_, animator) in self.world.query_mut::<&mut Animator>() {
                animator.trigger(AnimTrigger::OpeningEnded, &clips);
            }
        }
        self.hud.music_volume.set(1.0);
        self.spawn_random();
        log::info!("Opening over, {} shoebills in the arena", self.population.len());
    }

    /// Fold the extra-mode bias into the ring shoebills' yaw, once.
    pub(crate) fn apply_extra_bias(&mut self) {
        if !self.extra.active || self.extra.applied || self.clips.is_none() {
            return;
        }
        let bias = self.config.arena.extra_mode_bias;
        for (_, (transform, shoebill)) in self.world.query_mut::<(&mut Transform, &mut Shoebill)>() {
            if shoebill.ring_slot.is_some() {
                shoebill.yaw += bias;
                transform.set_yaw(shoebill.yaw);
            }
        }
        self.extra.applied = true;
    }

    /// Controllers in the order they were attached.
    pub(crate) fn controllers_mut(&mut self) -> Vec<&mut dyn CameraController> {
        let mut controllers: Vec<&mut dyn CameraController> = Vec::with_capacity(2);
        controllers.push(&mut self.desktop);
        if let Some(o) = self.orientation.as_mut() {
            controllers.push(o);
        }
        controllers
    }

    /// Everything the renderer needs for this frame.
    pub fn snapshot(&self) -> FrameSnapshot {
        let actors = self
            .population
            .iter()
            .filter_map(|e| {
                let mut q = self.world.query_one::<(&Transform, &Animator)>(e).ok()?;
                q.get().map(|(t, a)| ActorInstance {
                    model: TransformRaw::from(t),
                    blend: a.weights(),
                })
            })
            .collect();
        let projectiles = self
            .weapons
            .projectiles()
            .iter()
            .filter_map(|&e| self.world.get::<&Transform>(e).ok().map(|t| TransformRaw::from(&*t)))
            .collect();
        FrameSnapshot {
            camera: TransformRaw::from(&self.camera),
            actors,
            projectiles,
        }
    }

    pub fn present(&self, sink: &mut dyn RenderSink) {
        sink.present(&self.snapshot());
    }
}
