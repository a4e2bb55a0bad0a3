//! Game state counters and damage rules

use serde::{Deserialize, Serialize};

use crate::events::DamagePolicy;

/// Whether the session is still running
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    /// Terminal; entered once when health reaches zero
    GameOver,
}

/// Damage and stomp rules
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Health at session start
    pub max_health: u32,
    /// What a damage hit does to the player
    pub damage_policy: DamagePolicy,
    /// Fraction of an enemy's height the avatar must clear for a stomp
    pub stomp_height_fraction: f32,
    /// Upward impulse granted by a stomp
    pub stomp_bounce: f32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            max_health: 8,
            damage_policy: DamagePolicy::Both,
            stomp_height_fraction: 0.7,
            stomp_bounce: 6.0,
        }
    }
}

/// Counters for a running session, mutated only by the event dispatcher
#[derive(Clone, Debug)]
pub struct GameState {
    pub coins: u32,
    pub stars: u32,
    pub health: u32,
    pub phase: GamePhase,
}

impl GameState {
    pub fn new(rules: &RulesConfig) -> Self {
        Self {
            coins: 0,
            stars: 0,
            health: rules.max_health,
            phase: GamePhase::Playing,
        }
    }

    /// Record a coin
    pub fn add_coin(&mut self) {
        self.coins += 1;
    }

    /// Record a star
    pub fn add_star(&mut self) {
        self.stars += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_uses_rules() {
        let rules = RulesConfig::default();
        let state = GameState::new(&rules);
        assert_eq!(state.health, rules.max_health);
        assert_eq!(state.coins, 0);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_counters_accumulate() {
        let rules = RulesConfig::default();
        let mut state = GameState::new(&rules);
        state.add_coin();
        state.add_coin();
        state.add_star();
        assert_eq!(state.coins, 2);
        assert_eq!(state.stars, 1);
    }
}
