//! Raycasting for projectile hit detection.

use crate::collision::NodeId;
use crate::CollisionWorld;
use engine_core::Vec3;

/// A half-line with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray; the direction is normalized (zero stays zero and never hits).
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn point_at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }

    /// Distance to the first crossing of a sphere's surface in front of the origin.
    ///
    /// From inside the sphere this is the exit point.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        if self.direction == Vec3::ZERO {
            return None;
        }
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }
        let root = discriminant.sqrt();
        let near = -b - root;
        let far = -b + root;
        if near >= 0.0 {
            Some(near)
        } else if far >= 0.0 {
            Some(far)
        } else {
            None
        }
    }
}

/// Result of a raycast query.
#[derive(Debug, Clone, Copy)]
pub struct RaycastHit {
    /// The collider node that was hit.
    pub node: NodeId,
    /// Distance along the ray to the hit point.
    pub distance: f32,
    /// World position of the hit.
    pub point: Vec3,
    /// Surface normal at the hit point.
    pub normal: Vec3,
}

impl CollisionWorld {
    /// Cast a ray and return the nearest hit closer than `max_distance`.
    pub fn raycast(&self, ray: &Ray, max_distance: f32) -> Option<RaycastHit> {
        self.raycast_filtered(ray, max_distance, |_| true)
    }

    /// Like [`CollisionWorld::raycast`], skipping nodes the filter rejects.
    pub fn raycast_filtered(
        &self,
        ray: &Ray,
        max_distance: f32,
        filter: impl Fn(NodeId) -> bool,
    ) -> Option<RaycastHit> {
        self.hits(ray, max_distance, &filter)
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    fn hits<'a>(
        &'a self,
        ray: &'a Ray,
        max_distance: f32,
        filter: &'a dyn Fn(NodeId) -> bool,
    ) -> impl Iterator<Item = RaycastHit> + 'a {
        self.colliders
            .iter()
            .filter(move |c| filter(c.node))
            .filter_map(move |c| {
                let distance = ray.intersect_sphere(c.center, c.radius)?;
                if distance >= max_distance {
                    return None;
                }
                let point = ray.point_at(distance);
                Some(RaycastHit {
                    node: c.node,
                    distance,
                    point,
                    normal: (point - c.center).normalize_or_zero(),
                })
            })
    }
}
