//! World construction with up-front validation
//!
//! The builder collects geometry and objects, then validates everything in
//! one pass before the world exists. A bad level definition fails at build
//! time instead of misbehaving mid-session.

use std::fmt;

use starfall_math::Vec3;
use starfall_physics::{Aabb3, Plane3, PlayerConfig};

use crate::object::{EnemyBrain, GameObject, ObjectKind, PlatformMotion};
use crate::world::GameWorld;

/// Error type for world construction
#[derive(Debug)]
pub enum WorldBuildError {
    /// Arena bounds must be positive
    InvalidBounds(f32),
    /// The jump multiplier table must not be empty
    EmptyJumpTable,
    /// A player tunable is out of range
    InvalidPlayerConfig(String),
    /// The respawn point lies outside the arena
    RespawnOutOfBounds(Vec3),
    /// An object's parameters are out of range
    InvalidObject(String),
}

impl fmt::Display for WorldBuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldBuildError::InvalidBounds(b) => {
                write!(f, "Arena bounds must be positive, got {}", b)
            }
            WorldBuildError::EmptyJumpTable => {
                write!(f, "Jump multiplier table must have at least one entry")
            }
            WorldBuildError::InvalidPlayerConfig(msg) => {
                write!(f, "Invalid player config: {}", msg)
            }
            WorldBuildError::RespawnOutOfBounds(p) => {
                write!(f, "Respawn point {:?} is outside the arena", p)
            }
            WorldBuildError::InvalidObject(msg) => write!(f, "Invalid object: {}", msg),
        }
    }
}

impl std::error::Error for WorldBuildError {}

/// Builder for a [`GameWorld`]
pub struct WorldBuilder {
    floor_height: f32,
    bounds: f32,
    respawn_point: Vec3,
    player_config: PlayerConfig,
    objects: Vec<GameObject>,
    water: Vec<Aabb3>,
}

impl Default for WorldBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldBuilder {
    pub fn new() -> Self {
        Self {
            floor_height: 0.0,
            bounds: 90.0,
            respawn_point: Vec3::new(0.0, 2.0, 0.0),
            player_config: PlayerConfig::default(),
            objects: Vec::new(),
            water: Vec::new(),
        }
    }

    pub fn with_floor_height(mut self, height: f32) -> Self {
        self.floor_height = height;
        self
    }

    pub fn with_bounds(mut self, bounds: f32) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_respawn_point(mut self, point: Vec3) -> Self {
        self.respawn_point = point;
        self
    }

    pub fn with_player_config(mut self, config: PlayerConfig) -> Self {
        self.player_config = config;
        self
    }

    pub fn add_object(mut self, object: GameObject) -> Self {
        self.objects.push(object);
        self
    }

    pub fn add_water(mut self, volume: Aabb3) -> Self {
        self.water.push(volume);
        self
    }

    /// Validate everything and construct the world
    pub fn build(self) -> Result<GameWorld, WorldBuildError> {
        if self.bounds <= 0.0 {
            return Err(WorldBuildError::InvalidBounds(self.bounds));
        }
        if self.player_config.chain_multiplier.is_empty() {
            return Err(WorldBuildError::EmptyJumpTable);
        }
        if self.player_config.walk_speed <= 0.0 || self.player_config.run_speed <= 0.0 {
            return Err(WorldBuildError::InvalidPlayerConfig(
                "speeds must be positive".to_string(),
            ));
        }
        if self.player_config.gravity <= 0.0 {
            return Err(WorldBuildError::InvalidPlayerConfig(
                "gravity must be positive".to_string(),
            ));
        }
        if self.respawn_point.x.abs() > self.bounds || self.respawn_point.z.abs() > self.bounds {
            return Err(WorldBuildError::RespawnOutOfBounds(self.respawn_point));
        }
        for object in &self.objects {
            validate_object(object)?;
        }

        let mut world = GameWorld::new(
            Plane3::floor(self.floor_height),
            self.bounds,
            self.respawn_point,
            self.player_config,
        );
        for volume in self.water {
            world.add_water(volume);
        }
        for object in self.objects {
            world.spawn(object);
        }
        Ok(world)
    }
}

fn validate_object(object: &GameObject) -> Result<(), WorldBuildError> {
    match object.kind {
        ObjectKind::Platform {
            motion:
                PlatformMotion::Oscillating {
                    amplitude, period, ..
                },
            ..
        } => {
            if period <= 0.0 {
                return Err(WorldBuildError::InvalidObject(format!(
                    "platform period must be positive, got {}",
                    period
                )));
            }
            if amplitude < 0.0 {
                return Err(WorldBuildError::InvalidObject(format!(
                    "platform amplitude must not be negative, got {}",
                    amplitude
                )));
            }
        }
        ObjectKind::Enemy(EnemyBrain::Explosive(e)) => {
            if e.ignition_radius <= 0.0 || e.blast_radius <= 0.0 || e.fuse_time <= 0.0 {
                return Err(WorldBuildError::InvalidObject(
                    "explosive radii and fuse time must be positive".to_string(),
                ));
            }
        }
        ObjectKind::Enemy(EnemyBrain::Patroller(p)) => {
            if p.speed < 0.0 {
                return Err(WorldBuildError::InvalidObject(format!(
                    "patrol speed must not be negative, got {}",
                    p.speed
                )));
            }
        }
        ObjectKind::PowerUp { duration, .. } => {
            if duration <= 0.0 {
                return Err(WorldBuildError::InvalidObject(format!(
                    "power-up duration must be positive, got {}",
                    duration
                )));
            }
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::EffectKind;

    #[test]
    fn test_build_default() {
        let world = WorldBuilder::new().build().expect("default builds");
        assert_eq!(world.object_count(), 0);
        assert_eq!(world.bounds, 90.0);
    }

    #[test]
    fn test_build_spawns_objects() {
        let world = WorldBuilder::new()
            .add_object(GameObject::coin(Vec3::new(1.0, 1.0, 0.0)))
            .add_object(GameObject::patroller(Vec3::new(5.0, 0.4, 0.0), 2.0))
            .build()
            .expect("valid world");
        assert_eq!(world.object_count(), 2);
    }

    #[test]
    fn test_rejects_bad_bounds() {
        let result = WorldBuilder::new().with_bounds(-1.0).build();
        assert!(matches!(result, Err(WorldBuildError::InvalidBounds(_))));
    }

    #[test]
    fn test_rejects_empty_jump_table() {
        let mut config = PlayerConfig::default();
        config.chain_multiplier.clear();
        let result = WorldBuilder::new().with_player_config(config).build();
        assert!(matches!(result, Err(WorldBuildError::EmptyJumpTable)));
    }

    #[test]
    fn test_rejects_respawn_outside_bounds() {
        let result = WorldBuilder::new()
            .with_bounds(10.0)
            .with_respawn_point(Vec3::new(50.0, 2.0, 0.0))
            .build();
        assert!(matches!(
            result,
            Err(WorldBuildError::RespawnOutOfBounds(_))
        ));
    }

    #[test]
    fn test_rejects_zero_period_platform() {
        let result = WorldBuilder::new()
            .add_object(GameObject::platform(
                Vec3::new(0.0, 5.0, 0.0),
                Vec3::splat(1.0),
                PlatformMotion::Oscillating {
                    axis: Vec3::Y,
                    amplitude: 2.0,
                    period: 0.0,
                },
            ))
            .build();
        assert!(matches!(result, Err(WorldBuildError::InvalidObject(_))));
    }

    #[test]
    fn test_rejects_zero_duration_powerup() {
        let result = WorldBuilder::new()
            .add_object(GameObject::power_up(Vec3::ZERO, EffectKind::Flight, 0.0))
            .build();
        assert!(matches!(result, Err(WorldBuildError::InvalidObject(_))));
    }

    #[test]
    fn test_error_display() {
        let err = WorldBuildError::InvalidBounds(-3.0);
        assert!(err.to_string().contains("-3"));
    }
}
