//! Per-frame set of world-space colliders.

use crate::collision::{NodeId, SphereCollider};

/// All colliders that ray queries run against.
///
/// Rebuilt from entity transforms each frame; nodes removed mid-frame stop
/// answering queries immediately.
#[derive(Debug, Default)]
pub struct CollisionWorld {
    pub(crate) colliders: Vec<SphereCollider>,
}

impl CollisionWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every collider, keeping the allocation.
    pub fn clear(&mut self) {
        self.colliders.clear();
    }

    pub fn insert(&mut self, collider: SphereCollider) {
        self.colliders.push(collider);
    }

    /// Remove all colliders for the given nodes. Returns how many were removed.
    pub fn remove_nodes(&mut self, nodes: &[NodeId]) -> usize {
        let before = self.colliders.len();
        self.colliders.retain(|c| !nodes.contains(&c.node));
        before - self.colliders.len()
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    pub fn colliders(&self) -> impl Iterator<Item = &SphereCollider> {
        self.colliders.iter()
    }
}
