//! Enemy behaviour: patrol movement and explosive fuse logic
//!
//! Patrollers walk a cardinal heading, picking a new one when a timer runs
//! out and reversing when they reach the arena bounds. Explosives sit
//! dormant until the player comes close, then burn a fixed fuse and
//! detonate; a detonation ignites other dormant explosives in its blast
//! radius without resetting fuses that are already burning.

use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use starfall_math::Vec3;

use crate::events::{DamageSource, GameEvent};
use crate::object::{EnemyBrain, FuseState, ObjectKey, ObjectKind};
use crate::world::GameWorld;

/// Tunables for enemy behaviour
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EnemyConfig {
    /// Shortest time between patrol heading changes (seconds)
    pub patrol_turn_min: f32,
    /// Longest time between patrol heading changes (seconds)
    pub patrol_turn_max: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            patrol_turn_min: 2.0,
            patrol_turn_max: 5.0,
        }
    }
}

const CARDINALS: [Vec3; 4] = [
    Vec3::new(1.0, 0.0, 0.0),
    Vec3::new(-1.0, 0.0, 0.0),
    Vec3::new(0.0, 0.0, 1.0),
    Vec3::new(0.0, 0.0, -1.0),
];

/// Drives all enemy brains each tick
pub struct EnemySystem {
    config: EnemyConfig,
    rng: SmallRng,
}

impl EnemySystem {
    /// Create the system with a fixed seed (0 seeds from entropy)
    pub fn new(config: EnemyConfig, seed: u64) -> Self {
        let rng = if seed == 0 {
            SmallRng::from_entropy()
        } else {
            SmallRng::seed_from_u64(seed)
        };
        Self { config, rng }
    }

    /// Advance every enemy by one frame
    ///
    /// Blast damage is pushed into `events` rather than applied here; the
    /// dispatcher applies it after pickups resolve.
    pub fn update(&mut self, world: &mut GameWorld, dt: f32, events: &mut Vec<GameEvent>) {
        let bounds = world.bounds;
        let player_pos = world.player.position;

        // Movement and fuse countdown
        let mut detonations: Vec<(ObjectKey, Vec3, f32)> = Vec::new();
        for (key, object) in world.iter_mut() {
            if !object.active {
                continue;
            }
            let position = object.position;
            match &mut object.kind {
                ObjectKind::Enemy(EnemyBrain::Patroller(patroller)) => {
                    patroller.until_turn -= dt;
                    if patroller.until_turn <= 0.0 {
                        patroller.heading = CARDINALS[self.rng.gen_range(0..CARDINALS.len())];
                        patroller.until_turn = self
                            .rng
                            .gen_range(self.config.patrol_turn_min..=self.config.patrol_turn_max);
                    }
                    object.position = position + patroller.heading * (patroller.speed * dt);
                    clamp_to_bounds(object, bounds);
                }
                ObjectKind::Enemy(EnemyBrain::Explosive(explosive)) => {
                    if let FuseState::Fused { remaining } = explosive.fuse {
                        let remaining = remaining - dt;
                        if remaining <= 0.0 {
                            explosive.fuse = FuseState::Detonated;
                            detonations.push((key, position, explosive.blast_radius));
                        } else {
                            explosive.fuse = FuseState::Fused { remaining };
                        }
                    }
                }
                _ => {}
            }
        }

        // Detonations: damage the player, defeat patrollers in the blast,
        // chain-ignite dormant explosives
        for (key, center, blast_radius) in detonations {
            debug!("detonation at {:?} (radius {})", center, blast_radius);
            events.push(GameEvent::EnemyDetonated {
                key,
                position: center,
            });
            if player_pos.distance(center) <= blast_radius {
                events.push(GameEvent::PlayerDamaged {
                    source: DamageSource::Explosion(key),
                });
            }
            for (other_key, object) in world.iter_mut() {
                if !object.active || object.position.distance(center) > blast_radius {
                    continue;
                }
                match &mut object.kind {
                    ObjectKind::Enemy(EnemyBrain::Explosive(explosive)) => {
                        // Burning fuses keep their remaining time
                        if explosive.fuse == FuseState::Dormant {
                            explosive.fuse = FuseState::Fused {
                                remaining: explosive.fuse_time,
                            };
                        }
                    }
                    ObjectKind::Enemy(EnemyBrain::Patroller(_)) => {
                        object.active = false;
                        events.push(GameEvent::EnemyDefeated { key: other_key });
                    }
                    _ => {}
                }
            }
        }

        // Player proximity lights dormant fuses
        for (_, object) in world.iter_mut() {
            if !object.active {
                continue;
            }
            if let ObjectKind::Enemy(EnemyBrain::Explosive(explosive)) = &mut object.kind {
                if explosive.fuse == FuseState::Dormant
                    && object.position.distance(player_pos) <= explosive.ignition_radius
                {
                    debug!("fuse lit at {:?}", object.position);
                    explosive.fuse = FuseState::Fused {
                        remaining: explosive.fuse_time,
                    };
                }
            }
        }
    }
}

/// Keep a patroller inside the arena, reversing its heading at the edge
fn clamp_to_bounds(object: &mut crate::object::GameObject, bounds: f32) {
    let patroller = match &mut object.kind {
        ObjectKind::Enemy(EnemyBrain::Patroller(p)) => p,
        _ => return,
    };
    let p = &mut object.position;
    if p.x.abs() > bounds {
        p.x = p.x.clamp(-bounds, bounds);
        patroller.heading = -patroller.heading;
    }
    if p.z.abs() > bounds {
        p.z = p.z.clamp(-bounds, bounds);
        patroller.heading = -patroller.heading;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::GameObject;
    use starfall_physics::{Plane3, PlayerConfig};

    fn world_with_player_at(position: Vec3) -> GameWorld {
        let mut world = GameWorld::new(
            Plane3::floor(0.0),
            90.0,
            Vec3::new(0.0, 1.0, 0.0),
            PlayerConfig::default(),
        );
        world.player.position = position;
        world
    }

    fn system() -> EnemySystem {
        EnemySystem::new(EnemyConfig::default(), 42)
    }

    fn fuse_of(world: &GameWorld, key: ObjectKey) -> FuseState {
        match world.get(key).expect("object exists").kind {
            ObjectKind::Enemy(EnemyBrain::Explosive(e)) => e.fuse,
            _ => panic!("expected explosive"),
        }
    }

    #[test]
    fn test_patroller_moves() {
        let mut world = world_with_player_at(Vec3::new(50.0, 1.0, 50.0));
        let key = world.spawn(GameObject::patroller(Vec3::new(0.0, 0.4, 0.0), 2.0));
        let mut events = Vec::new();
        let mut system = system();

        system.update(&mut world, 0.5, &mut events);
        let moved = world.get(key).unwrap().position;
        assert!((moved - Vec3::new(0.0, 0.4, 0.0)).length() > 0.5);
        assert!(events.is_empty());
    }

    #[test]
    fn test_patroller_heading_stays_cardinal() {
        let mut world = world_with_player_at(Vec3::new(50.0, 1.0, 50.0));
        let key = world.spawn(GameObject::patroller(Vec3::ZERO, 2.0));
        let mut events = Vec::new();
        let mut system = system();

        for _ in 0..500 {
            system.update(&mut world, 0.016, &mut events);
            if let ObjectKind::Enemy(EnemyBrain::Patroller(p)) = world.get(key).unwrap().kind {
                let h = p.heading;
                assert!(h.y == 0.0);
                assert!((h.x.abs() - 1.0).abs() < 0.0001 || (h.z.abs() - 1.0).abs() < 0.0001);
                assert!((h.length() - 1.0).abs() < 0.0001);
            }
        }
    }

    #[test]
    fn test_patroller_reverses_at_bounds() {
        let mut world = world_with_player_at(Vec3::new(-50.0, 1.0, -50.0));
        world.bounds = 5.0;
        let key = world.spawn(GameObject::patroller(Vec3::new(4.9, 0.4, 0.0), 10.0));
        let mut events = Vec::new();
        let mut system = system();

        for _ in 0..1000 {
            system.update(&mut world, 0.016, &mut events);
            let p = world.get(key).unwrap().position;
            assert!(p.x.abs() <= 5.0 + 0.0001);
            assert!(p.z.abs() <= 5.0 + 0.0001);
        }
    }

    #[test]
    fn test_explosive_ignites_on_proximity() {
        let mut world = world_with_player_at(Vec3::new(3.0, 1.0, 0.0));
        let key = world.spawn(GameObject::explosive(Vec3::ZERO, 4.0, 3.0, 5.0));
        let mut events = Vec::new();
        let mut system = system();

        system.update(&mut world, 0.016, &mut events);
        assert!(matches!(fuse_of(&world, key), FuseState::Fused { .. }));
    }

    #[test]
    fn test_explosive_stays_dormant_when_far() {
        let mut world = world_with_player_at(Vec3::new(20.0, 1.0, 0.0));
        let key = world.spawn(GameObject::explosive(Vec3::ZERO, 4.0, 3.0, 5.0));
        let mut events = Vec::new();
        let mut system = system();

        system.update(&mut world, 0.016, &mut events);
        assert_eq!(fuse_of(&world, key), FuseState::Dormant);
    }

    #[test]
    fn test_fuse_burns_down_and_detonates() {
        let mut world = world_with_player_at(Vec3::new(3.0, 1.0, 0.0));
        let key = world.spawn(GameObject::explosive(Vec3::ZERO, 4.0, 0.5, 5.0));
        let mut events = Vec::new();
        let mut system = system();

        system.update(&mut world, 0.016, &mut events);
        assert!(matches!(fuse_of(&world, key), FuseState::Fused { .. }));

        system.update(&mut world, 1.0, &mut events);
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::EnemyDetonated { .. })));
        // Player within blast radius takes damage
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::PlayerDamaged {
                source: DamageSource::Explosion(_)
            }
        )));
    }

    #[test]
    fn test_blast_outside_radius_spares_player() {
        let mut world = world_with_player_at(Vec3::new(3.0, 1.0, 0.0));
        world.spawn(GameObject::explosive(Vec3::ZERO, 4.0, 0.5, 5.0));
        let mut events = Vec::new();
        let mut system = system();

        system.update(&mut world, 0.016, &mut events);
        // Step out of the blast radius before the fuse runs out
        world.player.position = Vec3::new(20.0, 1.0, 0.0);
        system.update(&mut world, 1.0, &mut events);

        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::EnemyDetonated { .. })));
        assert!(!events
            .iter()
            .any(|e| matches!(e, GameEvent::PlayerDamaged { .. })));
    }

    #[test]
    fn test_blast_ignites_dormant_neighbour() {
        let mut world = world_with_player_at(Vec3::new(3.0, 1.0, 0.0));
        let first = world.spawn(GameObject::explosive(Vec3::ZERO, 4.0, 0.5, 5.0));
        // Out of the player's ignition range, inside the first one's blast
        let second = world.spawn(GameObject::explosive(Vec3::new(4.5, 0.0, 0.0), 1.0, 3.0, 5.0));
        let mut events = Vec::new();
        let mut system = system();

        system.update(&mut world, 0.016, &mut events);
        assert_eq!(fuse_of(&world, second), FuseState::Dormant);

        system.update(&mut world, 1.0, &mut events);
        assert!(matches!(fuse_of(&world, second), FuseState::Fused { .. }));
        // The detonated one is marked, not yet removed (dispatcher removes it)
        assert_eq!(fuse_of(&world, first), FuseState::Detonated);
    }

    #[test]
    fn test_blast_defeats_patroller_in_radius() {
        let mut world = world_with_player_at(Vec3::new(30.0, 1.0, 0.0));
        world.spawn(GameObject::explosive(Vec3::ZERO, 4.0, 0.5, 5.0));
        let near = world.spawn(GameObject::patroller(Vec3::new(3.0, 0.4, 0.0), 0.0));
        let far = world.spawn(GameObject::patroller(Vec3::new(30.0, 0.4, 5.0), 0.0));

        // Light the fuse by hand and let it burn out
        for (_, object) in world.iter_mut() {
            if let ObjectKind::Enemy(EnemyBrain::Explosive(e)) = &mut object.kind {
                e.fuse = FuseState::Fused { remaining: 0.5 };
            }
        }
        let mut events = Vec::new();
        let mut system = system();
        system.update(&mut world, 1.0, &mut events);

        assert!(events.contains(&GameEvent::EnemyDefeated { key: near }));
        assert!(!world.get(near).unwrap().active);
        assert!(world.get(far).unwrap().active);
    }

    #[test]
    fn test_chain_does_not_reset_burning_fuse() {
        let mut world = world_with_player_at(Vec3::new(100.0, 1.0, 100.0));
        let first = world.spawn(GameObject::explosive(Vec3::ZERO, 4.0, 0.5, 5.0));
        let second = world.spawn(GameObject::explosive(Vec3::new(3.0, 0.0, 0.0), 4.0, 10.0, 5.0));

        // Light both fuses by hand
        for key in [first, second] {
            if let Some(object) = world.get_mut(key) {
                if let ObjectKind::Enemy(EnemyBrain::Explosive(e)) = &mut object.kind {
                    e.fuse = FuseState::Fused {
                        remaining: e.fuse_time,
                    };
                }
            }
        }

        let mut events = Vec::new();
        let mut system = system();
        // First detonates; second has been burning for the same 1.0s
        system.update(&mut world, 1.0, &mut events);

        match fuse_of(&world, second) {
            FuseState::Fused { remaining } => {
                assert!((remaining - 9.0).abs() < 0.0001, "fuse was reset: {}", remaining);
            }
            other => panic!("expected burning fuse, got {:?}", other),
        }
    }
}
