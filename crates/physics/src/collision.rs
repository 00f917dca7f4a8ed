//! Collider nodes and their identities.

use engine_core::{Transform, Vec3};

/// Identifies one collider node. Owners keep a map from node back to entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// Hands out unique node ids for the lifetime of a simulation.
#[derive(Debug, Default)]
pub struct NodeIdAllocator {
    next: u64,
}

impl NodeIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }
}

/// A sphere collider in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereCollider {
    pub node: NodeId,
    pub center: Vec3,
    pub radius: f32,
}

impl SphereCollider {
    pub fn new(node: NodeId, center: Vec3, radius: f32) -> Self {
        Self { node, center, radius }
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.distance_squared(self.center) <= self.radius * self.radius
    }
}

/// A sphere in an owner's model space, placed into the world by the owner's transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalSphere {
    pub offset: Vec3,
    pub radius: f32,
}

impl LocalSphere {
    pub fn new(offset: Vec3, radius: f32) -> Self {
        Self { offset, radius }
    }

    /// World-space collider for this part. Non-uniform scale uses the largest axis for the radius.
    pub fn to_world(&self, node: NodeId, transform: &Transform) -> SphereCollider {
        SphereCollider {
            node,
            center: transform.position + transform.rotation * (self.offset * transform.scale),
            radius: self.radius * transform.scale.max_element(),
        }
    }
}
