//! Collision shapes for the kinematic simulation
//!
//! Lightweight primitives used for overlap tests and ground probes.
//! There is no contact resolution here; the gameplay model is kinematic.

use serde::{Deserialize, Serialize};
use starfall_math::Vec3;

/// A sphere defined by center and radius
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Sphere3 {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere3 {
    /// Create a new sphere at the given center with the given radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Create a unit sphere at the origin
    pub fn unit() -> Self {
        Self::new(Vec3::ZERO, 1.0)
    }

    /// Check if a point is inside or on the sphere
    pub fn contains(&self, point: Vec3) -> bool {
        (point - self.center).length_squared() <= self.radius * self.radius
    }

    /// Translate the sphere by a delta
    pub fn translated(&self, delta: Vec3) -> Self {
        Self::new(self.center + delta, self.radius)
    }
}

/// An axis-aligned bounding box
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Aabb3 {
    /// Minimum corner (all components are minimums)
    pub min: Vec3,
    /// Maximum corner (all components are maximums)
    pub max: Vec3,
}

impl Aabb3 {
    /// Create a new AABB from min and max corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB centered at a position with given half-extents
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Create a unit cube centered at the origin
    pub fn unit() -> Self {
        Self::from_center_half_extents(Vec3::ZERO, Vec3::splat(0.5))
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the half-extents (half the size in each dimension)
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Check if a point is inside or on the AABB
    pub fn contains(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Check if a point's XZ coordinates fall inside the box footprint
    pub fn footprint_contains(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Get the closest point inside or on the AABB to a given point
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        point.clamp_components(self.min, self.max)
    }

    /// Translate the AABB by a delta
    pub fn translated(&self, delta: Vec3) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }
}

/// An infinite horizontal plane at a fixed height, used for the arena floor
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Plane3 {
    /// Y coordinate of the plane surface
    pub height: f32,
}

impl Plane3 {
    /// Create a horizontal floor plane at the given Y height
    pub fn floor(height: f32) -> Self {
        Self { height }
    }

    /// Signed distance from a point to the plane (positive = above)
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        point.y - self.height
    }

    /// Check if a point is above the plane
    pub fn is_above(&self, point: Vec3) -> bool {
        self.signed_distance(point) > 0.0
    }
}

/// Collider enum for storing different collision shape types
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub enum Collider {
    Sphere(Sphere3),
    Aabb(Aabb3),
}

impl Collider {
    /// Get the center of the collider
    pub fn center(&self) -> Vec3 {
        match self {
            Collider::Sphere(s) => s.center,
            Collider::Aabb(b) => b.center(),
        }
    }

    /// Translate the collider by a delta
    pub fn translated(&self, delta: Vec3) -> Self {
        match self {
            Collider::Sphere(s) => Collider::Sphere(s.translated(delta)),
            Collider::Aabb(b) => Collider::Aabb(b.translated(delta)),
        }
    }
}
