//! Simulation core for Starfall
//!
//! This crate provides the gameplay layer on top of the physics crate:
//! - The world container (player, objects, geometry)
//! - Enemy behaviour (patrollers, explosives)
//! - The collision event dispatcher and damage rules
//! - Timed power-ups with scheduled reversals
//! - Game state counters and the world builder

pub mod builder;
pub mod enemy;
pub mod events;
pub mod object;
pub mod powerup;
pub mod state;
pub mod world;

// Re-export commonly used types
pub use builder::{WorldBuildError, WorldBuilder};
pub use enemy::{EnemyConfig, EnemySystem};
pub use events::{DamagePolicy, DamageSource, EventDispatcher, GameEvent, GameHooks, NoHooks};
pub use object::{
    ColliderShape, CollectibleKind, EffectKind, EnemyBrain, Explosive, FuseState, GameObject,
    ObjectKey, ObjectKind, Patroller, PlatformMotion, Spinner,
};
pub use powerup::PowerUpManager;
pub use state::{GamePhase, GameState, RulesConfig};
pub use world::GameWorld;
