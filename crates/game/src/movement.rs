//! Per-mode movement policies.
//!
//! Each policy is a pure step: it takes a shoebill's pose and the frame delta
//! and returns the new pose plus, at most, one event for the caller to react
//! to. Policies never touch the world, so the caller can collect removals and
//! mode changes and apply them after the traversal.

use std::f32::consts::PI;

use engine_core::{Cylindrical, Vec3};

use crate::actor::{Destination, MovementMode};
use crate::config::{ArenaConfig, SpawnConfig};

/// Tunables shared by all policies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementParams {
    /// Approach speed, units per second.
    pub level: f32,
    /// Radius below which an approaching shoebill ends the game.
    pub loss_radius: f32,
    /// Circling turn rate, radians per second.
    pub circling_speed: f32,
    pub flight_speed: f32,
    pub landing_speed: f32,
    /// Horizontal distance at which a flier counts as arrived.
    pub arrival_threshold: f32,
}

impl Default for MovementParams {
    fn default() -> Self {
        Self::from_config(&ArenaConfig::default(), &SpawnConfig::default())
    }
}

impl MovementParams {
    pub fn from_config(arena: &ArenaConfig, spawn: &SpawnConfig) -> Self {
        Self {
            level: arena.level,
            loss_radius: arena.loss_radius,
            circling_speed: arena.circling_rate * PI,
            flight_speed: spawn.flight_speed,
            landing_speed: spawn.landing_speed,
            arrival_threshold: spawn.arrival_threshold,
        }
    }
}

/// Input to a policy step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorPose {
    pub position: Vec3,
    pub yaw: f32,
    pub destination: Option<Destination>,
}

/// Something the caller has to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementEvent {
    /// A flier is within the arrival threshold and should start landing.
    ReachedDestination,
    /// A landing flier reached the ground.
    Landed,
    /// An approaching shoebill came closer than the loss radius.
    CrossedLossRadius,
}

/// Output of a policy step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementUpdate {
    pub position: Vec3,
    pub yaw: f32,
    pub event: Option<MovementEvent>,
}

impl MovementUpdate {
    fn unchanged(pose: &ActorPose) -> Self {
        Self {
            position: pose.position,
            yaw: pose.yaw,
            event: None,
        }
    }
}

pub trait MovementPolicy {
    fn advance(&self, pose: ActorPose, dt: f32, params: &MovementParams) -> MovementUpdate;
}

/// Turn about the vertical axis at `circling_speed`, keeping radius and height.
///
/// Azimuth and heading advance together, so a shoebill facing along the ring
/// keeps walking along it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Circling;

impl MovementPolicy for Circling {
    fn advance(&self, pose: ActorPose, dt: f32, params: &MovementParams) -> MovementUpdate {
        let rad = dt * params.circling_speed;
        let mut cyl = Cylindrical::from_vec3(pose.position);
        cyl.theta += rad;
        MovementUpdate {
            position: cyl.to_vec3(),
            yaw: pose.yaw + rad,
            event: None,
        }
    }
}

/// Walk straight at the centre at `level` units per second, keeping height.
///
/// The loss check is strict: landing exactly on the loss radius is safe.
#[derive(Debug, Clone, Copy, Default)]
pub struct RadialApproach;

impl MovementPolicy for RadialApproach {
    fn advance(&self, pose: ActorPose, dt: f32, params: &MovementParams) -> MovementUpdate {
        let mut cyl = Cylindrical::from_vec3(pose.position);
        cyl.radius -= dt * params.level;
        let event = (cyl.radius < params.loss_radius).then_some(MovementEvent::CrossedLossRadius);
        MovementUpdate {
            position: cyl.to_vec3(),
            yaw: pose.yaw,
            event,
        }
    }
}

/// Fly level toward the destination until within the arrival threshold.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlightApproach;

impl MovementPolicy for FlightApproach {
    fn advance(&self, pose: ActorPose, dt: f32, params: &MovementParams) -> MovementUpdate {
        let Some(dest) = pose.destination else {
            return MovementUpdate::unchanged(&pose);
        };
        let target = dest.point();
        let offset = Vec3::new(target.x - pose.position.x, 0.0, target.z - pose.position.z);
        let remaining = offset.length();
        if remaining < params.arrival_threshold {
            return MovementUpdate {
                event: Some(MovementEvent::ReachedDestination),
                ..MovementUpdate::unchanged(&pose)
            };
        }
        let step = (dt * params.flight_speed).min(remaining);
        let position = pose.position + offset / remaining * step;
        let event = (remaining - step < params.arrival_threshold)
            .then_some(MovementEvent::ReachedDestination);
        MovementUpdate {
            position,
            yaw: pose.yaw,
            event,
        }
    }
}

/// Sink straight down at `landing_speed` until the ground.
#[derive(Debug, Clone, Copy, Default)]
pub struct Landing;

impl MovementPolicy for Landing {
    fn advance(&self, pose: ActorPose, dt: f32, params: &MovementParams) -> MovementUpdate {
        let mut position = pose.position;
        position.y -= dt * params.landing_speed;
        let mut event = None;
        if position.y <= 0.0 {
            position.y = 0.0;
            event = Some(MovementEvent::Landed);
        }
        MovementUpdate {
            position,
            yaw: pose.yaw,
            event,
        }
    }
}

/// Stay put.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hold;

impl MovementPolicy for Hold {
    fn advance(&self, pose: ActorPose, _dt: f32, _params: &MovementParams) -> MovementUpdate {
        MovementUpdate::unchanged(&pose)
    }
}

impl MovementMode {
    pub fn policy(self) -> &'static dyn MovementPolicy {
        match self {
            MovementMode::Circling => &Circling,
            MovementMode::Approaching => &RadialApproach,
            MovementMode::FlyingIn => &FlightApproach,
            MovementMode::Landing => &Landing,
            MovementMode::Idle => &Hold,
        }
    }

    /// Mode a shoebill switches to after a movement event.
    pub fn after(self, event: MovementEvent) -> MovementMode {
        match (self, event) {
            (MovementMode::FlyingIn, MovementEvent::ReachedDestination) => MovementMode::Landing,
            (MovementMode::Landing, MovementEvent::Landed) => MovementMode::Idle,
            (mode, _) => mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pose(position: Vec3) -> ActorPose {
        ActorPose {
            position,
            yaw: 0.0,
            destination: None,
        }
    }

    fn radius(p: Vec3) -> f32 {
        (p.x * p.x + p.z * p.z).sqrt()
    }

    #[test]
    fn circling_rotates_position_and_heading_together() {
        let params = MovementParams::default();
        let start = Vec3::new(300.0, 0.0, 400.0);
        let dt = 0.7;
        let rad = dt * PI / 10.0;
        let out = Circling.advance(pose(start), dt, &params);
        let expected = Vec3::new(
            start.x * rad.cos() - start.z * rad.sin(),
            0.0,
            start.x * rad.sin() + start.z * rad.cos(),
        );
        assert!(out.position.abs_diff_eq(expected, 1e-2));
        assert!((out.yaw - rad).abs() < 1e-6);
        assert!((radius(out.position) - 500.0).abs() < 1e-2);
    }

    #[test]
    fn circling_walks_where_it_faces() {
        let params = MovementParams::default();
        let theta = 1.3_f32;
        let mut p = ActorPose {
            position: Cylindrical::new(500.0, theta, 0.0).to_vec3(),
            yaw: theta + PI / 2.0,
            destination: None,
        };
        for _ in 0..50 {
            let out = Circling.advance(p, 0.016, &params);
            let travel = (out.position - p.position).normalize();
            let facing = engine_core::Transform::from_position_yaw_scale(out.position, out.yaw, 1.0)
                .heading();
            assert!(travel.dot(facing) > 0.999, "travel {travel:?} facing {facing:?}");
            p.position = out.position;
            p.yaw = out.yaw;
        }
    }

    #[test]
    fn approach_decays_linearly() {
        let params = MovementParams::default();
        let mut p = pose(Vec3::new(0.0, 20.0, 500.0));
        for _ in 0..10 {
            let out = RadialApproach.advance(p, 0.5, &params);
            assert!(out.event.is_none());
            p.position = out.position;
        }
        assert!((radius(p.position) - 250.0).abs() < 1e-3);
        assert!((p.position.y - 20.0).abs() < 1e-6);
    }

    #[test]
    fn approach_loss_is_strict() {
        let params = MovementParams::default();
        let out = RadialApproach.advance(pose(Vec3::new(100.0, 0.0, 0.0)), 1.0, &params);
        assert!((radius(out.position) - 50.0).abs() < 1e-4);
        assert_eq!(out.event, None);
        let out = RadialApproach.advance(pose(out.position), 0.01, &params);
        assert_eq!(out.event, Some(MovementEvent::CrossedLossRadius));
    }

    #[test]
    fn flight_reaches_destination_then_lands() {
        let params = MovementParams::default();
        let dest = Destination::new(500.0, 0.0);
        let mut p = ActorPose {
            position: Cylindrical::new(1500.0, 0.0, 300.0).to_vec3(),
            yaw: PI,
            destination: Some(dest),
        };
        let mut mode = MovementMode::FlyingIn;
        let mut arrived_at = None;
        for frame in 0..400 {
            let out = mode.policy().advance(p, 0.1, &params);
            p.position = out.position;
            if let Some(ev) = out.event {
                if ev == MovementEvent::ReachedDestination {
                    arrived_at = Some(frame);
                }
                mode = mode.after(ev);
                if ev == MovementEvent::Landed {
                    break;
                }
            }
        }
        // Inside the threshold once 955 of the 1000 units are covered.
        assert_eq!(arrived_at, Some(190));
        assert_eq!(mode, MovementMode::Idle);
        assert_eq!(p.position.y, 0.0);
        assert!((p.position.x - 545.0).abs() < 1e-2);
    }

    #[test]
    fn hold_does_nothing() {
        let p = pose(Vec3::new(1.0, 2.0, 3.0));
        let out = Hold.advance(p, 5.0, &MovementParams::default());
        assert_eq!(out.position, p.position);
        assert_eq!(out.event, None);
    }
}
