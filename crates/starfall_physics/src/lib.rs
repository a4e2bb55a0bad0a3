//! Kinematic physics for Starfall
//!
//! This crate provides the movement layer of the simulation:
//! - Collision shapes (spheres, AABBs, the floor plane)
//! - Boolean overlap tests with layer/mask filtering
//! - Spatial queries (ground probe, water volume lookup)
//! - The player avatar's locomotion state machine

pub mod collision;
pub mod player;
pub mod query;
pub mod shapes;

// Re-export commonly used types
pub use collision::{
    aabb_vs_aabb, colliders_overlap, sphere_vs_aabb, sphere_vs_sphere, CollisionFilter,
    CollisionLayer,
};
pub use player::{InputSnapshot, Locomotion, PlayerConfig, PlayerController};
pub use query::{GroundHit, SpatialQuery};
pub use shapes::{Aabb3, Collider, Plane3, Sphere3};
