//! World container for the simulation
//!
//! The GameWorld owns the player avatar, all game objects, and the static
//! geometry (floor, arena bounds, water volumes). Objects are stored in a
//! slotmap so removal never invalidates other keys.

use log::warn;
use slotmap::SlotMap;
use starfall_math::Vec3;
use starfall_physics::{Aabb3, InputSnapshot, Plane3, PlayerConfig, PlayerController, SpatialQuery};

use crate::object::{GameObject, ObjectKey, ObjectKind, PlatformMotion};

/// The complete mutable state of a running simulation
pub struct GameWorld {
    /// The player avatar
    pub player: PlayerController,
    /// All non-player objects
    objects: SlotMap<ObjectKey, GameObject>,
    /// The arena floor
    pub floor: Plane3,
    /// Half-extent of the playable square on XZ; patrollers reverse here
    pub bounds: f32,
    /// Water volumes
    water: Vec<Aabb3>,
    /// Where the avatar returns after taking a respawn hit
    pub respawn_point: Vec3,
    /// Y below which the avatar is considered fallen out of the world
    pub kill_plane: f32,
    /// Total simulated time (drives platform motion)
    elapsed: f32,
}

impl GameWorld {
    /// Create an empty world with the given geometry and player
    pub fn new(floor: Plane3, bounds: f32, respawn_point: Vec3, player_config: PlayerConfig) -> Self {
        Self {
            player: PlayerController::new(respawn_point, player_config),
            objects: SlotMap::with_key(),
            floor,
            bounds,
            water: Vec::new(),
            respawn_point,
            kill_plane: floor.height - 20.0,
            elapsed: 0.0,
        }
    }

    /// Add an object to the world, returning its key
    pub fn spawn(&mut self, object: GameObject) -> ObjectKey {
        self.objects.insert(object)
    }

    /// Add a water volume
    pub fn add_water(&mut self, volume: Aabb3) {
        self.water.push(volume);
    }

    /// Get an object by key; stale keys return None
    pub fn get(&self, key: ObjectKey) -> Option<&GameObject> {
        self.objects.get(key)
    }

    /// Get a mutable object by key
    pub fn get_mut(&mut self, key: ObjectKey) -> Option<&mut GameObject> {
        self.objects.get_mut(key)
    }

    /// Remove an object; safe to call with a stale key
    pub fn remove(&mut self, key: ObjectKey) -> Option<GameObject> {
        self.objects.remove(key)
    }

    /// Mark an object inactive without invalidating its key
    pub fn deactivate(&mut self, key: ObjectKey) {
        if let Some(object) = self.objects.get_mut(key) {
            object.active = false;
        }
    }

    /// Number of objects (active or not)
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Iterate over all objects
    pub fn iter(&self) -> impl Iterator<Item = (ObjectKey, &GameObject)> {
        self.objects.iter()
    }

    /// Iterate over all objects mutably
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ObjectKey, &mut GameObject)> {
        self.objects.iter_mut()
    }

    /// Iterate over active objects only
    pub fn iter_active(&self) -> impl Iterator<Item = (ObjectKey, &GameObject)> {
        self.objects.iter().filter(|(_, o)| o.active)
    }

    /// Water volumes
    pub fn water(&self) -> &[Aabb3] {
        &self.water
    }

    /// Total simulated time
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Advance platform motion and display spin by one frame
    ///
    /// Oscillating platforms are positioned analytically from elapsed time,
    /// so their motion never drifts with frame-rate jitter.
    pub fn advance_kinematics(&mut self, dt: f32) {
        self.elapsed += dt;
        let t = self.elapsed;
        for (key, object) in self.objects.iter_mut() {
            if object.active && !object.position.is_finite() {
                warn!("object {:?} has a non-finite position, deactivating", key);
                object.active = false;
                continue;
            }
            if let Some(spin) = &mut object.spin {
                spin.advance(dt);
            }
            if let ObjectKind::Platform { home, motion } = object.kind {
                if let PlatformMotion::Oscillating {
                    axis,
                    amplitude,
                    period,
                } = motion
                {
                    let phase = (t / period) * std::f32::consts::TAU;
                    object.position = home + axis * (amplitude * phase.sin());
                }
            }
        }
    }

    /// Collect current platform AABBs into `out`
    pub fn collect_platform_colliders(&self, out: &mut Vec<Aabb3>) {
        out.clear();
        for (_, object) in self.objects.iter() {
            if !object.active {
                continue;
            }
            if let ObjectKind::Platform { .. } = object.kind {
                if let starfall_physics::Collider::Aabb(aabb) = object.collider() {
                    out.push(aabb);
                }
            }
        }
    }

    /// Advance the player avatar against the current world geometry
    pub fn update_player(&mut self, input: &InputSnapshot, dt: f32) {
        let mut platforms = Vec::new();
        self.collect_platform_colliders(&mut platforms);
        let query = SpatialQuery::new(self.floor, &platforms, &self.water);
        self.player.update(input, dt, &query);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::GameObject;

    fn test_world() -> GameWorld {
        GameWorld::new(
            Plane3::floor(0.0),
            90.0,
            Vec3::new(0.0, 2.0, 0.0),
            PlayerConfig::default(),
        )
    }

    #[test]
    fn test_spawn_and_get() {
        let mut world = test_world();
        let key = world.spawn(GameObject::coin(Vec3::new(1.0, 1.0, 0.0)));

        assert_eq!(world.object_count(), 1);
        assert!(world.get(key).is_some());
    }

    #[test]
    fn test_stale_key_after_remove() {
        let mut world = test_world();
        let key = world.spawn(GameObject::coin(Vec3::ZERO));
        world.remove(key);

        assert!(world.get(key).is_none());
        assert!(world.remove(key).is_none());
    }

    #[test]
    fn test_deactivate_keeps_key_valid() {
        let mut world = test_world();
        let key = world.spawn(GameObject::star(Vec3::ZERO));
        world.deactivate(key);

        let star = world.get(key).expect("key still valid");
        assert!(!star.active);
        assert_eq!(world.iter_active().count(), 0);
    }

    #[test]
    fn test_oscillating_platform_moves_and_returns() {
        let mut world = test_world();
        let home = Vec3::new(0.0, 5.0, 0.0);
        let key = world.spawn(GameObject::platform(
            home,
            Vec3::new(2.0, 0.5, 2.0),
            PlatformMotion::Oscillating {
                axis: Vec3::Y,
                amplitude: 3.0,
                period: 4.0,
            },
        ));

        // Quarter period: peak displacement
        world.advance_kinematics(1.0);
        let peak = world.get(key).unwrap().position;
        assert!((peak.y - 8.0).abs() < 0.001);

        // Full period from start: back home
        world.advance_kinematics(3.0);
        let back = world.get(key).unwrap().position;
        assert!((back.y - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_static_platform_does_not_move() {
        let mut world = test_world();
        let home = Vec3::new(3.0, 2.0, 3.0);
        let key = world.spawn(GameObject::platform(
            home,
            Vec3::splat(1.0),
            PlatformMotion::Static,
        ));

        world.advance_kinematics(10.0);
        assert_eq!(world.get(key).unwrap().position, home);
    }

    #[test]
    fn test_non_finite_object_is_deactivated() {
        let mut world = test_world();
        let key = world.spawn(GameObject::coin(Vec3::ZERO));
        world.get_mut(key).unwrap().position.y = f32::NAN;

        world.advance_kinematics(0.016);
        assert!(!world.get(key).unwrap().active);
    }

    #[test]
    fn test_collect_platform_colliders_skips_non_platforms() {
        let mut world = test_world();
        world.spawn(GameObject::coin(Vec3::ZERO));
        world.spawn(GameObject::platform(
            Vec3::new(0.0, 4.0, 0.0),
            Vec3::splat(1.0),
            PlatformMotion::Static,
        ));

        let mut out = Vec::new();
        world.collect_platform_colliders(&mut out);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_player_lands_on_platform_via_world() {
        let mut world = test_world();
        world.spawn(GameObject::platform(
            Vec3::new(0.0, 5.0, 0.0),
            Vec3::new(3.0, 0.5, 3.0),
            PlatformMotion::Static,
        ));
        world.player.position = Vec3::new(0.0, 8.0, 0.0);

        for _ in 0..200 {
            world.update_player(&InputSnapshot::default(), 0.016);
            if world.player.grounded {
                break;
            }
        }

        let expected = 5.5 + world.player.config().half_height;
        assert!((world.player.position.y - expected).abs() < 0.01);
    }
}
