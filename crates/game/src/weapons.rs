//! Projectiles fired from the camera and their hit detection.
//!
//! A projectile does not travel along its aim ray. Each frame it is pushed
//! outward from a pivot above the arena centre, and a short ray cast from its
//! new position along the original aim decides whether it struck a shoebill.

use engine_core::{Lifetime, Spherical, Transform, Vec3};
use hecs::{Entity, World};
use physics::{CollisionWorld, NodeId, Ray, RaycastHit};

use crate::config::WeaponConfig;

/// Projectile component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    /// Unit aim direction, fixed at fire time.
    pub direction: Vec3,
}

impl Projectile {
    pub fn ray(&self, position: Vec3) -> Ray {
        Ray::new(position, self.direction)
    }
}

/// Where a projectile fired from `camera` appears.
pub fn muzzle_position(camera: &Transform, offset: f32) -> Vec3 {
    camera.position + camera.forward() * offset
}

/// One frame of projectile travel: grow the distance from the pivot
/// `(0, pivot_height, 0)` by `dt * speed`, keeping the bearing from it.
pub fn spiral_step(position: Vec3, dt: f32, pivot_height: f32, speed: f32) -> Vec3 {
    let pivot = Vec3::new(0.0, pivot_height, 0.0);
    let mut s = Spherical::from_vec3(position - pivot);
    s.radius += dt * speed;
    s.to_vec3() + pivot
}

/// Projectile bookkeeping. Projectiles are processed in firing order.
pub struct WeaponSystem {
    projectiles: Vec<Entity>,
    params: WeaponConfig,
}

impl WeaponSystem {
    pub fn new(params: &WeaponConfig) -> Self {
        Self {
            projectiles: Vec::new(),
            params: params.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.projectiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }

    pub fn projectiles(&self) -> &[Entity] {
        &self.projectiles
    }

    /// Spawn a projectile in front of the camera, aimed along its view.
    pub fn fire(&mut self, world: &mut World, camera: &Transform) -> Entity {
        let direction = camera.forward().normalize_or_zero();
        let position = muzzle_position(camera, self.params.muzzle_offset);
        let entity = world.spawn((
            Transform::from_position(position),
            Projectile { direction },
            Lifetime::new(self.params.projectile_lifetime),
        ));
        self.projectiles.push(entity);
        log::trace!("Projectile fired from {:?} toward {:?}", position, direction);
        entity
    }

    /// Move every projectile, test it against `collisions` and expire old ones.
    ///
    /// A struck shoebill's nodes (as reported by `owner_nodes`) leave
    /// `collisions` at once, so later projectiles this frame cannot score it
    /// again. Returns the hits in processing order.
    pub fn update(
        &mut self,
        world: &mut World,
        collisions: &mut CollisionWorld,
        dt: f32,
        owner_nodes: impl Fn(NodeId) -> Vec<NodeId>,
    ) -> Vec<RaycastHit> {
        let mut hits = Vec::new();
        let mut spent = Vec::new();

        for &entity in &self.projectiles {
            let Ok((transform, projectile, lifetime)) =
                world.query_one_mut::<(&mut Transform, &Projectile, &mut Lifetime)>(entity)
            else {
                spent.push(entity);
                continue;
            };
            transform.position = spiral_step(
                transform.position,
                dt,
                self.params.pivot_height,
                self.params.spiral_speed,
            );
            let ray = projectile.ray(transform.position);
            if let Some(hit) = collisions.raycast(&ray, self.params.hit_distance) {
                collisions.remove_nodes(&owner_nodes(hit.node));
                hits.push(hit);
                spent.push(entity);
                continue;
            }
            if lifetime.update(dt) {
                log::trace!("Projectile {:?} expired", entity);
                spent.push(entity);
            }
        }

        for entity in &spent {
            world.despawn(*entity).ok();
        }
        self.projectiles.retain(|e| !spent.contains(e));
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use physics::SphereCollider;

    fn camera() -> Transform {
        let mut t = Transform::from_position(Vec3::new(0.0, 100.0, 0.0));
        t.look_at(Vec3::new(0.0, 100.0, 500.0), Vec3::Y);
        t
    }

    #[test]
    fn muzzle_is_in_front_of_camera() {
        let p = muzzle_position(&camera(), 50.0);
        assert!(p.abs_diff_eq(Vec3::new(0.0, 100.0, 50.0), 1e-3));
    }

    #[test]
    fn spiral_grows_distance_from_pivot() {
        let p = spiral_step(Vec3::new(0.0, 100.0, 50.0), 0.1, 100.0, 500.0);
        assert!(p.abs_diff_eq(Vec3::new(0.0, 100.0, 100.0), 1e-3));
        let q = spiral_step(Vec3::new(30.0, 140.0, 0.0), 1.0, 100.0, 500.0);
        // 50 from the pivot along (0.6, 0.8, 0), then 500 further.
        assert!(q.abs_diff_eq(Vec3::new(330.0, 540.0, 0.0), 1e-2));
    }

    #[test]
    fn hit_removes_projectile_and_target_nodes() {
        let mut world = World::new();
        let mut weapons = WeaponSystem::new(&WeaponConfig::default());
        let mut collisions = CollisionWorld::new();
        collisions.insert(SphereCollider::new(NodeId(1), Vec3::new(0.0, 100.0, 130.0), 20.0));
        collisions.insert(SphereCollider::new(NodeId(2), Vec3::new(0.0, 130.0, 130.0), 5.0));
        weapons.fire(&mut world, &camera());
        weapons.fire(&mut world, &camera());

        let hits = weapons.update(&mut world, &mut collisions, 0.1, |_| vec![NodeId(1), NodeId(2)]);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].node, NodeId(1));
        assert!((hits[0].distance - 10.0).abs() < 1e-2);
        assert!(collisions.is_empty());
        // The second projectile had nothing left to hit.
        assert_eq!(weapons.len(), 1);
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn far_target_is_not_hit() {
        let mut world = World::new();
        let mut weapons = WeaponSystem::new(&WeaponConfig::default());
        let mut collisions = CollisionWorld::new();
        collisions.insert(SphereCollider::new(NodeId(1), Vec3::new(0.0, 100.0, 300.0), 20.0));
        weapons.fire(&mut world, &camera());
        let hits = weapons.update(&mut world, &mut collisions, 0.1, |n| vec![n]);
        assert!(hits.is_empty());
        assert_eq!(collisions.len(), 1);
        assert_eq!(weapons.len(), 1);
    }

    #[test]
    fn missed_projectiles_expire() {
        let mut world = World::new();
        let params = WeaponConfig {
            projectile_lifetime: 1.0,
            ..WeaponConfig::default()
        };
        let mut weapons = WeaponSystem::new(&params);
        let mut collisions = CollisionWorld::new();
        weapons.fire(&mut world, &camera());
        weapons.update(&mut world, &mut collisions, 0.6, |n| vec![n]);
        assert_eq!(weapons.len(), 1);
        weapons.update(&mut world, &mut collisions, 0.6, |n| vec![n]);
        assert!(weapons.is_empty());
        assert_eq!(world.len(), 0);
    }
}
