//! Ray queries against sphere colliders for projectile hit detection.
//!
//! There are no rigid bodies here: colliders are rebuilt from entity
//! transforms each frame and only answer ray casts.

pub mod collision;
pub mod collision_world;
pub mod raycast;

pub use collision::*;
pub use collision_world::*;
pub use raycast::*;
