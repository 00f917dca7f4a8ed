//! Shoebill entity types and components.

use engine_core::{Cylindrical, Transform, Vec3};
use hecs::{Entity, World};
use physics::{LocalSphere, NodeId};

use crate::animation::{AnimState, Animator};
use crate::scene::ShoebillClips;

/// How a shoebill moves each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementMode {
    /// Turning about the arena centre at a fixed radius.
    Circling,
    /// Walking straight at the centre.
    Approaching,
    /// Flying level toward its landing spot.
    FlyingIn,
    /// Descending onto its landing spot.
    Landing,
    /// Standing still.
    Idle,
}

/// Landing spot of a flier, in cylindrical terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Destination {
    pub radius: f32,
    pub theta: f32,
}

impl Destination {
    pub fn new(radius: f32, theta: f32) -> Self {
        Self { radius, theta }
    }

    /// Ground point of the landing spot.
    pub fn point(&self) -> Vec3 {
        Cylindrical::new(self.radius, self.theta, 0.0).to_vec3()
    }
}

/// Shoebill component. The entity's `Transform` is derived from `yaw`, `scale`
/// and the position the movement policy produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shoebill {
    pub yaw: f32,
    pub scale: f32,
    pub mode: MovementMode,
    pub destination: Option<Destination>,
    /// Slot in the starting ring, if placed there.
    pub ring_slot: Option<usize>,
}

/// Hit spheres of one shoebill, each registered as its own node.
#[derive(Debug, Clone, Default)]
pub struct HitShape {
    pub parts: Vec<(NodeId, LocalSphere)>,
}

impl HitShape {
    /// Body, head and legs of the shoebill model, in model units (about 1.3 tall).
    pub fn shoebill_parts() -> [LocalSphere; 3] {
        [
            LocalSphere::new(Vec3::new(0.0, 0.7, 0.0), 0.3),
            LocalSphere::new(Vec3::new(0.0, 1.1, 0.15), 0.18),
            LocalSphere::new(Vec3::new(0.0, 0.3, 0.0), 0.12),
        ]
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.parts.iter().map(|(node, _)| *node)
    }
}

/// Everything needed to place a new shoebill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorSpec {
    pub position: Vec3,
    pub yaw: f32,
    pub scale: f32,
    pub mode: MovementMode,
    pub anim: AnimState,
    pub destination: Option<Destination>,
    pub ring_slot: Option<usize>,
}

impl ActorSpec {
    /// A grounded shoebill at `position`, standing idle.
    pub fn idle(position: Vec3, yaw: f32, scale: f32) -> Self {
        Self {
            position,
            yaw,
            scale,
            mode: MovementMode::Idle,
            anim: AnimState::Idle,
            destination: None,
            ring_slot: None,
        }
    }
}

/// Bundle for spawning a shoebill entity.
pub struct ShoebillBundle {
    pub transform: Transform,
    pub shoebill: Shoebill,
    pub animator: Animator,
    pub shape: HitShape,
}

impl ShoebillBundle {
    pub fn new(spec: &ActorSpec, clips: &ShoebillClips, nodes: [NodeId; 3]) -> Self {
        let parts = HitShape::shoebill_parts();
        Self {
            transform: Transform::from_position_yaw_scale(spec.position, spec.yaw, spec.scale),
            shoebill: Shoebill {
                yaw: spec.yaw,
                scale: spec.scale,
                mode: spec.mode,
                destination: spec.destination,
                ring_slot: spec.ring_slot,
            },
            animator: Animator::new(spec.anim, clips),
            shape: HitShape {
                parts: nodes.into_iter().zip(parts).collect(),
            },
        }
    }

    /// Spawn this bundle into the world.
    pub fn spawn(self, world: &mut World) -> Entity {
        world.spawn((self.transform, self.shoebill, self.animator, self.shape))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use physics::NodeIdAllocator;

    fn clips() -> ShoebillClips {
        ShoebillClips {
            idle: 1.0,
            walk: 1.0,
            fly: 1.0,
            fly_end: 1.0,
        }
    }

    #[test]
    fn bundle_registers_three_parts() {
        let mut ids = NodeIdAllocator::new();
        let nodes = [ids.allocate(), ids.allocate(), ids.allocate()];
        let spec = ActorSpec::idle(Vec3::new(0.0, 0.0, 200.0), 0.0, 100.0);
        let mut world = World::new();
        let e = ShoebillBundle::new(&spec, &clips(), nodes).spawn(&mut world);
        let shape = world.get::<&HitShape>(e).unwrap();
        assert_eq!(shape.nodes().collect::<Vec<_>>(), nodes.to_vec());
        let t = world.get::<&Transform>(e).unwrap();
        let body = shape.parts[0].1.to_world(shape.parts[0].0, &t);
        assert!(body.center.abs_diff_eq(Vec3::new(0.0, 70.0, 200.0), 1e-3));
        assert!((body.radius - 30.0).abs() < 1e-4);
    }

    #[test]
    fn destination_point_is_on_the_ground() {
        let d = Destination::new(300.0, std::f32::consts::FRAC_PI_2);
        assert!(d.point().abs_diff_eq(Vec3::new(0.0, 0.0, 300.0), 1e-3));
    }
}
