//! Overlap tests and collision filtering
//!
//! Provides boolean overlap tests between spheres and AABBs, plus a
//! layer/mask system for filtering which objects interact. The gameplay
//! model is kinematic, so tests report overlap only; there is no contact
//! manifold or penetration resolution.

use bitflags::bitflags;

use crate::shapes::{Aabb3, Collider, Sphere3};

bitflags! {
    /// Collision layers for filtering which objects interact
    ///
    /// Each layer is a bit in a 32-bit mask. Objects can belong to multiple
    /// layers and define which layers they interact with via a mask.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct CollisionLayer: u32 {
        /// Player avatar
        const PLAYER = 1 << 0;
        /// Enemies (patrollers, explosives)
        const ENEMY = 1 << 1;
        /// Collectibles and power-ups
        const PICKUP = 1 << 2;
        /// Static and kinematic world geometry (floor, platforms)
        const STATIC = 1 << 3;
        /// Water volumes
        const WATER = 1 << 4;
        /// All layers
        const ALL = 0xFFFFFFFF;
    }
}

/// Collision filter determining what an object interacts with
///
/// Two objects A and B interact if:
/// - (A.layer & B.mask) != 0, AND
/// - (B.layer & A.mask) != 0
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollisionFilter {
    /// Which layer(s) this object belongs to
    pub layer: CollisionLayer,
    /// Which layer(s) this object interacts with
    pub mask: CollisionLayer,
}

impl CollisionFilter {
    /// Create a new collision filter with specified layer and mask
    pub fn new(layer: CollisionLayer, mask: CollisionLayer) -> Self {
        Self { layer, mask }
    }

    /// Check if this filter allows interaction with another filter
    pub fn collides_with(&self, other: &Self) -> bool {
        self.layer.intersects(other.mask) && other.layer.intersects(self.mask)
    }

    /// Filter for the player avatar: interacts with everything except water
    /// pushback (water volumes are sampled, not collided with)
    pub fn player() -> Self {
        Self {
            layer: CollisionLayer::PLAYER,
            mask: CollisionLayer::ALL & !CollisionLayer::WATER,
        }
    }

    /// Filter for enemies: interact with the player and static geometry,
    /// never with each other or with pickups
    pub fn enemy() -> Self {
        Self {
            layer: CollisionLayer::ENEMY,
            mask: CollisionLayer::PLAYER | CollisionLayer::STATIC,
        }
    }

    /// Filter for collectibles and power-ups: detected by the player only
    pub fn pickup() -> Self {
        Self {
            layer: CollisionLayer::PICKUP,
            mask: CollisionLayer::PLAYER,
        }
    }

    /// Filter for static world geometry
    pub fn static_world() -> Self {
        Self {
            layer: CollisionLayer::STATIC,
            mask: CollisionLayer::ALL,
        }
    }
}

/// Test sphere vs sphere overlap
pub fn sphere_vs_sphere(a: &Sphere3, b: &Sphere3) -> bool {
    let min_dist = a.radius + b.radius;
    (b.center - a.center).length_squared() <= min_dist * min_dist
}

/// Test sphere vs AABB overlap
pub fn sphere_vs_aabb(sphere: &Sphere3, aabb: &Aabb3) -> bool {
    let closest = aabb.closest_point(sphere.center);
    (sphere.center - closest).length_squared() <= sphere.radius * sphere.radius
}

/// Test AABB vs AABB overlap
pub fn aabb_vs_aabb(a: &Aabb3, b: &Aabb3) -> bool {
    a.min.x <= b.max.x
        && a.max.x >= b.min.x
        && a.min.y <= b.max.y
        && a.max.y >= b.min.y
        && a.min.z <= b.max.z
        && a.max.z >= b.min.z
}

/// Test overlap between two colliders of any shape
pub fn colliders_overlap(a: &Collider, b: &Collider) -> bool {
    match (a, b) {
        (Collider::Sphere(a), Collider::Sphere(b)) => sphere_vs_sphere(a, b),
        (Collider::Sphere(s), Collider::Aabb(b)) => sphere_vs_aabb(s, b),
        (Collider::Aabb(b), Collider::Sphere(s)) => sphere_vs_aabb(s, b),
        (Collider::Aabb(a), Collider::Aabb(b)) => aabb_vs_aabb(a, b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starfall_math::Vec3;

    #[test]
    fn test_sphere_vs_sphere() {
        let a = Sphere3::new(Vec3::ZERO, 1.0);
        let b = Sphere3::new(Vec3::new(1.5, 0.0, 0.0), 1.0);
        let c = Sphere3::new(Vec3::new(3.0, 0.0, 0.0), 0.5);

        assert!(sphere_vs_sphere(&a, &b));
        assert!(!sphere_vs_sphere(&a, &c));
    }

    #[test]
    fn test_sphere_vs_aabb() {
        let aabb = Aabb3::unit();
        let touching = Sphere3::new(Vec3::new(1.0, 0.0, 0.0), 0.6);
        let apart = Sphere3::new(Vec3::new(5.0, 0.0, 0.0), 1.0);

        assert!(sphere_vs_aabb(&touching, &aabb));
        assert!(!sphere_vs_aabb(&apart, &aabb));
    }

    #[test]
    fn test_sphere_center_inside_aabb() {
        let aabb = Aabb3::from_center_half_extents(Vec3::ZERO, Vec3::splat(2.0));
        let inside = Sphere3::new(Vec3::new(0.5, 0.5, 0.5), 0.1);
        assert!(sphere_vs_aabb(&inside, &aabb));
    }

    #[test]
    fn test_aabb_vs_aabb() {
        let a = Aabb3::from_center_half_extents(Vec3::ZERO, Vec3::splat(1.0));
        let b = Aabb3::from_center_half_extents(Vec3::new(1.5, 0.0, 0.0), Vec3::splat(1.0));
        let c = Aabb3::from_center_half_extents(Vec3::new(5.0, 0.0, 0.0), Vec3::splat(1.0));

        assert!(aabb_vs_aabb(&a, &b));
        assert!(!aabb_vs_aabb(&a, &c));
    }

    #[test]
    fn test_colliders_overlap_mixed() {
        let sphere = Collider::Sphere(Sphere3::new(Vec3::new(1.0, 0.0, 0.0), 0.6));
        let aabb = Collider::Aabb(Aabb3::unit());
        assert!(colliders_overlap(&sphere, &aabb));
        assert!(colliders_overlap(&aabb, &sphere));
    }

    #[test]
    fn test_filter_player_vs_pickup() {
        let player = CollisionFilter::player();
        let pickup = CollisionFilter::pickup();
        assert!(player.collides_with(&pickup));
        assert!(pickup.collides_with(&player));
    }

    #[test]
    fn test_filter_enemy_vs_enemy() {
        let a = CollisionFilter::enemy();
        let b = CollisionFilter::enemy();
        assert!(!a.collides_with(&b));
    }

    #[test]
    fn test_filter_enemy_vs_pickup() {
        let enemy = CollisionFilter::enemy();
        let pickup = CollisionFilter::pickup();
        assert!(!enemy.collides_with(&pickup));
    }

    #[test]
    fn test_filter_player_vs_enemy() {
        let player = CollisionFilter::player();
        let enemy = CollisionFilter::enemy();
        assert!(player.collides_with(&enemy));
    }
}
