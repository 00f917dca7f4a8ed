//! Per-frame simulation step.
//!
//! Order within a frame: spawn clock, animations (which may end the opening),
//! camera controllers, movement, projectiles. Removals found while walking the
//! population are collected and applied once the walk is done.

use engine_core::Transform;
use hecs::Entity;

use crate::actor::{HitShape, Shoebill};
use crate::animation::{AnimState, AnimTrigger, Animator};
use crate::movement::{ActorPose, MovementEvent};
use crate::spawner::{SpawnDecision, SpawnGate};
use crate::state::SimulationState;

impl SimulationState {
    /// Advance the simulation by `delta` seconds.
    pub fn frame(&mut self, delta: f32) {
        let dt = if delta.is_finite() { delta.max(0.0) } else { 0.0 };
        self.time.advance_seconds(dt);

        self.update_spawning(dt);
        self.update_animations(dt);

        if self.is_opening() {
            return;
        }

        let mut camera = self.camera;
        for controller in self.controllers_mut() {
            if controller.is_enabled() {
                controller.update(&mut camera, dt);
            }
        }
        self.camera = camera;

        if self.is_game_over() {
            return;
        }

        self.update_movement(dt);
        self.update_projectiles(dt);
    }

    fn update_spawning(&mut self, dt: f32) {
        let gate = SpawnGate {
            opening: self.is_opening(),
            game_over: self.is_game_over(),
            alive: self.population.len(),
        };
        match self.spawner.tick(dt, self.time.fps(), gate) {
            SpawnDecision::Spawn => {
                self.spawn_random();
            }
            SpawnDecision::Skipped(reason) => {
                log::trace!("Spawn skipped at {:.2}s: {:?}", self.spawner.total_time(), reason);
            }
            SpawnDecision::Wait => {}
        }
    }

    fn update_animations(&mut self, dt: f32) {
        let lead = self.opening.lead;
        let watching_lead = self.is_opening();
        let mut lead_looped = false;
        for (entity, animator) in self.world.query_mut::<&mut Animator>() {
            let step = animator.update(dt);
            if watching_lead
                && Some(entity) == lead
                && animator.state() == AnimState::Idle
                && step.loops_completed > 0
            {
                lead_looped = true;
            }
        }
        if lead_looped {
            self.end_opening();
        }
    }

    fn update_movement(&mut self, dt: f32) {
        let Some(clips) = self.clips else {
            return;
        };
        let params = self.movement;
        let mut losses: Vec<Entity> = Vec::new();

        for entity in self.population.iter() {
            let Ok((transform, shoebill, animator)) = self
                .world
                .query_one_mut::<(&mut Transform, &mut Shoebill, &mut Animator)>(entity)
            else {
                continue;
            };
            let pose = ActorPose {
                position: transform.position,
                yaw: shoebill.yaw,
                destination: shoebill.destination,
            };
            let update = shoebill.mode.policy().advance(pose, dt, &params);
            transform.position = update.position;
            shoebill.yaw = update.yaw;
            transform.set_yaw(update.yaw);

            let Some(event) = update.event else {
                continue;
            };
            shoebill.mode = shoebill.mode.after(event);
            match event {
                MovementEvent::CrossedLossRadius => losses.push(entity),
                MovementEvent::ReachedDestination => {
                    animator.trigger(AnimTrigger::ReachedDestination, &clips);
                }
                MovementEvent::Landed => {
                    animator.trigger(AnimTrigger::Landed, &clips);
                    shoebill.destination = None;
                }
            }
        }

        if losses.is_empty() {
            return;
        }
        for entity in losses {
            self.population.remove(&mut self.world, entity);
        }
        self.hud.game_over.set(true);
        log::info!("Game over, final score {}", self.score());
    }

    fn update_projectiles(&mut self, dt: f32) {
        if self.weapons.is_empty() {
            return;
        }

        self.collisions.clear();
        for entity in self.population.iter() {
            let Ok(mut q) = self.world.query_one::<(&Transform, &HitShape)>(entity) else {
                continue;
            };
            let Some((transform, shape)) = q.get() else {
                continue;
            };
            for (node, part) in &shape.parts {
                self.collisions.insert(part.to_world(*node, transform));
            }
        }

        let population = &self.population;
        let hits = self.weapons.update(&mut self.world, &mut self.collisions, dt, |node| {
            population.siblings_of(node)
        });

        for hit in hits {
            let Some(owner) = self.population.owner_of(hit.node) else {
                continue;
            };
            if self.population.remove(&mut self.world, owner) {
                self.hud.add_score(self.config.weapons.score_per_hit);
                log::debug!(
                    "Shoebill {:?} hit at {:.1} units, score {}",
                    owner,
                    hit.distance,
                    self.score()
                );
            }
        }
    }
}
