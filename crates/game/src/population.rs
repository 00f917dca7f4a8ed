//! Live shoebill set: spawn order plus the node-to-owner registry used to
//! resolve ray hits.

use std::collections::HashMap;

use hecs::{Entity, World};
use physics::{NodeId, NodeIdAllocator};

use crate::actor::{ActorSpec, ShoebillBundle};
use crate::scene::ShoebillClips;

#[derive(Debug, Default)]
pub struct Population {
    order: Vec<Entity>,
    owners: HashMap<NodeId, Entity>,
    ids: NodeIdAllocator,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a shoebill and register its hit nodes.
    pub fn spawn(&mut self, world: &mut World, spec: &ActorSpec, clips: &ShoebillClips) -> Entity {
        let nodes = [self.ids.allocate(), self.ids.allocate(), self.ids.allocate()];
        let entity = ShoebillBundle::new(spec, clips, nodes).spawn(world);
        for node in nodes {
            self.owners.insert(node, entity);
        }
        self.order.push(entity);
        log::debug!(
            "Spawned shoebill {:?} at {:?} ({:?}, scale {})",
            entity,
            spec.position,
            spec.mode,
            spec.scale
        );
        entity
    }

    /// Despawn a shoebill and forget its nodes. Returns false if it was not live.
    pub fn remove(&mut self, world: &mut World, entity: Entity) -> bool {
        let Some(idx) = self.order.iter().position(|&e| e == entity) else {
            return false;
        };
        self.order.remove(idx);
        self.owners.retain(|_, owner| *owner != entity);
        world.despawn(entity).ok();
        true
    }

    /// Shoebill a hit node belongs to.
    pub fn owner_of(&self, node: NodeId) -> Option<Entity> {
        self.owners.get(&node).copied()
    }

    /// Every node of the shoebill owning `node`.
    pub fn siblings_of(&self, node: NodeId) -> Vec<NodeId> {
        let Some(owner) = self.owner_of(node) else {
            return vec![node];
        };
        let mut nodes: Vec<NodeId> = self
            .owners
            .iter()
            .filter(|(_, o)| **o == owner)
            .map(|(n, _)| *n)
            .collect();
        nodes.sort();
        nodes
    }

    /// Live shoebills in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.order.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
