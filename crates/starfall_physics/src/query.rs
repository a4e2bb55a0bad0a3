//! Spatial queries against the static and kinematic world
//!
//! The ground probe is a short downward ray from the avatar center against
//! the floor plane and the platform AABBs. Water volumes are sampled by
//! point containment.

use starfall_math::Vec3;

use crate::shapes::{Aabb3, Plane3};

/// Result of a downward ground probe
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroundHit {
    /// Distance from the probe origin down to the surface
    pub distance: f32,
    /// Y coordinate of the surface that was hit
    pub surface_y: f32,
}

/// A read-only view of the world used for probes and volume lookups
///
/// Borrowed fresh each tick so platform colliders reflect their
/// already-advanced kinematic positions.
#[derive(Clone, Copy, Debug)]
pub struct SpatialQuery<'a> {
    /// The arena floor
    pub floor: Plane3,
    /// Top surfaces the avatar can stand on (platforms, current positions)
    pub platforms: &'a [Aabb3],
    /// Water volumes (swimming is entered inside their extent)
    pub water: &'a [Aabb3],
}

impl<'a> SpatialQuery<'a> {
    /// Create a query view over the given world geometry
    pub fn new(floor: Plane3, platforms: &'a [Aabb3], water: &'a [Aabb3]) -> Self {
        Self {
            floor,
            platforms,
            water,
        }
    }

    /// Cast a ray straight down from `origin`, up to `max_distance`
    ///
    /// Returns the nearest standable surface below the origin: the floor
    /// plane, or the top face of a platform whose footprint contains the
    /// origin. Surfaces above the origin are never reported.
    pub fn ground_probe(&self, origin: Vec3, max_distance: f32) -> Option<GroundHit> {
        let mut best: Option<GroundHit> = None;

        let floor_dist = origin.y - self.floor.height;
        if (0.0..=max_distance).contains(&floor_dist) {
            best = Some(GroundHit {
                distance: floor_dist,
                surface_y: self.floor.height,
            });
        }

        for platform in self.platforms {
            if !platform.footprint_contains(origin) {
                continue;
            }
            let dist = origin.y - platform.max.y;
            if !(0.0..=max_distance).contains(&dist) {
                continue;
            }
            if best.map_or(true, |b| dist < b.distance) {
                best = Some(GroundHit {
                    distance: dist,
                    surface_y: platform.max.y,
                });
            }
        }

        best
    }

    /// Check whether a point is inside any water volume
    pub fn in_water(&self, point: Vec3) -> bool {
        self.water.iter().any(|volume| volume.contains(point))
    }
}
