//! Timed power-up effects and their scheduled reversals
//!
//! Granting an effect applies it to the avatar immediately and schedules a
//! reversal. Picking the same effect up again refreshes the timer rather
//! than stacking a second reversal, so an early revert can never cut a
//! fresh pickup short.

use log::info;
use starfall_physics::PlayerController;

use crate::object::EffectKind;

struct ActiveEffect {
    effect: EffectKind,
    remaining: f32,
}

/// Tracks active timed effects on the player
#[derive(Default)]
pub struct PowerUpManager {
    active: Vec<ActiveEffect>,
}

impl PowerUpManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an effect and schedule its reversal
    pub fn grant(&mut self, effect: EffectKind, duration: f32, player: &mut PlayerController) {
        match effect {
            EffectKind::Flight => player.set_flight(true),
        }

        if let Some(entry) = self.active.iter_mut().find(|e| e.effect == effect) {
            // Refresh, never stack
            entry.remaining = duration;
            info!("{:?} refreshed for {:.1}s", effect, duration);
        } else {
            self.active.push(ActiveEffect { effect, remaining: duration });
            info!("{:?} active for {:.1}s", effect, duration);
        }
    }

    /// Whether an effect is currently active
    pub fn is_active(&self, effect: EffectKind) -> bool {
        self.active.iter().any(|e| e.effect == effect)
    }

    /// Seconds until an effect reverts, if active
    pub fn remaining(&self, effect: EffectKind) -> Option<f32> {
        self.active
            .iter()
            .find(|e| e.effect == effect)
            .map(|e| e.remaining)
    }

    /// Advance timers and revert expired effects
    pub fn tick(&mut self, dt: f32, player: &mut PlayerController) {
        let mut index = 0;
        while index < self.active.len() {
            self.active[index].remaining -= dt;
            if self.active[index].remaining <= 0.0 {
                let entry = self.active.swap_remove(index);
                Self::revert(entry.effect, player);
            } else {
                index += 1;
            }
        }
    }

    /// Revert every active effect (used on respawn into a new session)
    pub fn clear(&mut self, player: &mut PlayerController) {
        for entry in self.active.drain(..) {
            Self::revert(entry.effect, player);
        }
    }

    fn revert(effect: EffectKind, player: &mut PlayerController) {
        info!("{:?} expired", effect);
        match effect {
            // set_flight is idempotent, so a double revert is harmless
            EffectKind::Flight => player.set_flight(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starfall_math::Vec3;
    use starfall_physics::{Locomotion, PlayerConfig};

    fn player() -> PlayerController {
        PlayerController::new(Vec3::new(0.0, 5.0, 0.0), PlayerConfig::default())
    }

    #[test]
    fn test_grant_applies_and_reverts() {
        let mut manager = PowerUpManager::new();
        let mut player = player();

        manager.grant(EffectKind::Flight, 10.0, &mut player);
        assert!(player.is_flying());
        assert!(manager.is_active(EffectKind::Flight));

        manager.tick(10.5, &mut player);
        assert!(!player.is_flying());
        assert!(!manager.is_active(EffectKind::Flight));
        assert_eq!(player.state(), Locomotion::Airborne);
    }

    #[test]
    fn test_partial_tick_keeps_effect() {
        let mut manager = PowerUpManager::new();
        let mut player = player();

        manager.grant(EffectKind::Flight, 10.0, &mut player);
        manager.tick(4.0, &mut player);
        assert!(player.is_flying());
        let remaining = manager.remaining(EffectKind::Flight).expect("still active");
        assert!((remaining - 6.0).abs() < 0.0001);
    }

    #[test]
    fn test_repickup_refreshes_instead_of_stacking() {
        let mut manager = PowerUpManager::new();
        let mut player = player();

        manager.grant(EffectKind::Flight, 10.0, &mut player);
        manager.tick(8.0, &mut player);
        manager.grant(EffectKind::Flight, 10.0, &mut player);

        // The old reversal is gone; only the fresh timer runs
        manager.tick(4.0, &mut player);
        assert!(player.is_flying());
        manager.tick(7.0, &mut player);
        assert!(!player.is_flying());
    }

    #[test]
    fn test_clear_reverts_everything() {
        let mut manager = PowerUpManager::new();
        let mut player = player();

        manager.grant(EffectKind::Flight, 10.0, &mut player);
        manager.clear(&mut player);
        assert!(!player.is_flying());
        assert!(!manager.is_active(EffectKind::Flight));
    }
}
