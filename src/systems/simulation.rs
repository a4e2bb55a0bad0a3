//! The per-tick simulation loop
//!
//! Composes the subsystems in a fixed order each tick:
//! 1. Platform motion
//! 2. Player locomotion
//! 3. Enemy behaviour (blast damage is queued, not applied)
//! 4. Event dispatch (pickups, contact, queued damage, fall-out)
//! 5. Power-up timers and reversals
//!
//! The order is part of the gameplay contract: a pickup and a hit in the
//! same tick resolves the pickup first.

use starfall_core::{
    EnemySystem, EventDispatcher, GameEvent, GameHooks, GamePhase, GameState, GameWorld, NoHooks,
    PowerUpManager,
};
use starfall_physics::InputSnapshot;

use crate::config::AppConfig;

/// Result of one simulation tick
pub struct TickReport {
    /// Every gameplay event that fired this tick, in application order
    pub events: Vec<GameEvent>,
}

/// Owns the world and all gameplay subsystems
pub struct SimulationLoop {
    world: GameWorld,
    state: GameState,
    enemies: EnemySystem,
    dispatcher: EventDispatcher,
    powerups: PowerUpManager,
    max_dt: f32,
    /// Scratch queue reused across ticks
    queued: Vec<GameEvent>,
}

impl SimulationLoop {
    /// Wire up the subsystems around an already-built world
    pub fn new(world: GameWorld, config: &AppConfig) -> Self {
        let rules = config.rules.to_rules_config();
        let state = GameState::new(&rules);
        Self {
            world,
            state,
            enemies: EnemySystem::new(config.enemies.to_enemy_config(), config.simulation.rng_seed),
            dispatcher: EventDispatcher::new(rules),
            powerups: PowerUpManager::new(),
            max_dt: config.simulation.max_dt,
            queued: Vec::new(),
        }
    }

    pub fn world(&self) -> &GameWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut GameWorld {
        &mut self.world
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn powerups(&self) -> &PowerUpManager {
        &self.powerups
    }

    /// Whether the session has ended
    pub fn is_over(&self) -> bool {
        self.state.phase == GamePhase::GameOver
    }

    /// Advance the simulation by one frame
    pub fn tick(&mut self, input: &InputSnapshot, dt: f32) -> TickReport {
        self.tick_with_hooks(input, dt, &mut NoHooks)
    }

    /// Advance the simulation by one frame, forwarding events to hooks
    pub fn tick_with_hooks(
        &mut self,
        input: &InputSnapshot,
        dt: f32,
        hooks: &mut dyn GameHooks,
    ) -> TickReport {
        // A stalled frame must not turn into a physics catapult
        let dt = dt.clamp(0.0, self.max_dt);

        if self.is_over() {
            return TickReport { events: Vec::new() };
        }

        self.world.advance_kinematics(dt);
        self.world.update_player(input, dt);
        self.enemies.update(&mut self.world, dt, &mut self.queued);
        let events = self.dispatcher.resolve(
            &mut self.world,
            &mut self.state,
            &mut self.powerups,
            &mut self.queued,
            hooks,
        );
        self.powerups.tick(dt, &mut self.world.player);

        TickReport { events }
    }
}
