//! Gameplay events and the collision dispatcher
//!
//! The dispatcher runs once per tick, after movement and enemy AI. It turns
//! geometric overlaps into gameplay events in a fixed order: pickups first,
//! then enemy contact, then queued blast damage, then the fall-out check.
//! Each event is applied to the game state and forwarded to the hooks.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use starfall_math::Vec3;
use starfall_physics::{colliders_overlap, Collider, CollisionFilter};

use crate::object::{CollectibleKind, EffectKind, EnemyBrain, ObjectKey, ObjectKind};
use crate::powerup::PowerUpManager;
use crate::state::{GamePhase, GameState, RulesConfig};
use crate::world::GameWorld;

/// What caused a damage event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageSource {
    /// Walked into an enemy
    EnemyContact(ObjectKey),
    /// Caught in a detonation
    Explosion(ObjectKey),
    /// Fell below the kill plane
    FellOut,
}

/// A gameplay event produced during one tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameEvent {
    CoinCollected { key: ObjectKey },
    StarCollected { key: ObjectKey },
    PowerUpCollected {
        key: ObjectKey,
        effect: EffectKind,
        duration: f32,
    },
    EnemyStomped { key: ObjectKey },
    /// An enemy was destroyed by a blast rather than a stomp
    EnemyDefeated { key: ObjectKey },
    EnemyDetonated { key: ObjectKey, position: Vec3 },
    PlayerDamaged { source: DamageSource },
    GameOver,
}

/// How a damage event affects the player
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamagePolicy {
    /// Teleport back to the respawn point
    Respawn,
    /// Decrement the health counter
    Health,
    /// Both: decrement health and respawn
    Both,
}

/// Observer for gameplay events (UI, audio, logging)
///
/// All methods default to no-ops; the simulation never depends on a hook
/// being present.
pub trait GameHooks {
    fn on_event(&mut self, _event: &GameEvent) {}
}

/// Hooks implementation that does nothing
pub struct NoHooks;

impl GameHooks for NoHooks {}

/// Resolves overlaps into events and applies them to the game state
pub struct EventDispatcher {
    rules: RulesConfig,
    /// The avatar's layer/mask pair; objects that fail the filter are
    /// skipped before any geometric test
    player_filter: CollisionFilter,
}

impl EventDispatcher {
    pub fn new(rules: RulesConfig) -> Self {
        Self {
            rules,
            player_filter: CollisionFilter::player(),
        }
    }

    /// Run one dispatch pass
    ///
    /// `queued` holds damage events produced earlier in the tick (blasts).
    /// Returns every event that fired, in application order.
    pub fn resolve(
        &mut self,
        world: &mut GameWorld,
        state: &mut GameState,
        powerups: &mut PowerUpManager,
        queued: &mut Vec<GameEvent>,
        hooks: &mut dyn GameHooks,
    ) -> Vec<GameEvent> {
        let mut fired = Vec::new();

        if state.phase == GamePhase::GameOver {
            queued.clear();
            return fired;
        }

        let player_collider = Collider::Aabb(world.player.collider());

        self.resolve_pickups(world, &player_collider, &mut fired);
        self.resolve_enemy_contact(world, &player_collider, &mut fired);
        fired.append(queued);

        if world.player.position.y < world.kill_plane {
            fired.push(GameEvent::PlayerDamaged {
                source: DamageSource::FellOut,
            });
        }

        self.apply(world, state, powerups, &mut fired);

        for event in &fired {
            debug!("event: {:?}", event);
            hooks.on_event(event);
        }
        fired
    }

    fn resolve_pickups(
        &self,
        world: &mut GameWorld,
        player: &Collider,
        fired: &mut Vec<GameEvent>,
    ) {
        let mut picked = Vec::new();
        for (key, object) in world.iter_active() {
            if !self.player_filter.collides_with(&object.filter()) {
                continue;
            }
            let event = match object.kind {
                ObjectKind::Collectible(kind) => {
                    if !colliders_overlap(player, &object.collider()) {
                        continue;
                    }
                    match kind {
                        CollectibleKind::Coin => GameEvent::CoinCollected { key },
                        CollectibleKind::Star => GameEvent::StarCollected { key },
                    }
                }
                ObjectKind::PowerUp { effect, duration } => {
                    if !colliders_overlap(player, &object.collider()) {
                        continue;
                    }
                    GameEvent::PowerUpCollected {
                        key,
                        effect,
                        duration,
                    }
                }
                _ => continue,
            };
            picked.push(event);
        }
        fired.extend(picked);
    }

    fn resolve_enemy_contact(
        &self,
        world: &mut GameWorld,
        player: &Collider,
        fired: &mut Vec<GameEvent>,
    ) {
        let player_y = world.player.position.y;
        let descending = world.player.velocity.y < 0.0;

        let mut contacts = Vec::new();
        for (key, object) in world.iter_active() {
            if !self.player_filter.collides_with(&object.filter()) {
                continue;
            }
            let brain = match object.kind {
                ObjectKind::Enemy(brain) => brain,
                _ => continue,
            };
            if !colliders_overlap(player, &object.collider()) {
                continue;
            }
            match brain {
                EnemyBrain::Patroller(_) => {
                    // A stomp requires the avatar to be above most of the
                    // enemy's body and falling onto it.
                    let height = object.shape.half_height() * 2.0;
                    let stomp_line =
                        object.position.y + height * self.rules.stomp_height_fraction;
                    if descending && player_y > stomp_line {
                        contacts.push(GameEvent::EnemyStomped { key });
                    } else {
                        contacts.push(GameEvent::PlayerDamaged {
                            source: DamageSource::EnemyContact(key),
                        });
                    }
                }
                // Explosives hurt through their blast, not by touch
                EnemyBrain::Explosive(_) => {}
            }
        }
        fired.extend(contacts);
    }

    fn apply(
        &mut self,
        world: &mut GameWorld,
        state: &mut GameState,
        powerups: &mut PowerUpManager,
        fired: &mut Vec<GameEvent>,
    ) {
        let mut damaged = false;

        for event in fired.iter() {
            match *event {
                GameEvent::CoinCollected { key } => {
                    world.remove(key);
                    state.add_coin();
                }
                GameEvent::StarCollected { key } => {
                    // Stars stay in the world but become inert
                    world.deactivate(key);
                    state.add_star();
                    info!("star collected ({} total)", state.stars);
                }
                GameEvent::PowerUpCollected {
                    key,
                    effect,
                    duration,
                } => {
                    // Spent pickups stay in the registry, inactive
                    world.deactivate(key);
                    powerups.grant(effect, duration, &mut world.player);
                }
                GameEvent::EnemyStomped { key } => {
                    world.remove(key);
                    world.player.bounce(self.rules.stomp_bounce);
                }
                GameEvent::EnemyDefeated { key } | GameEvent::EnemyDetonated { key, .. } => {
                    world.remove(key);
                }
                GameEvent::PlayerDamaged { source } => {
                    // One hit per tick; later events of the same tick saw
                    // the pre-respawn position
                    if damaged {
                        continue;
                    }
                    damaged = true;
                    // Falling out always respawns, whatever the policy
                    let force_respawn = source == DamageSource::FellOut;
                    self.take_damage(world, state, force_respawn);
                }
                GameEvent::GameOver => {}
            }
        }

        // The terminal transition is reported upward exactly once
        if state.health == 0 && state.phase == GamePhase::Playing {
            state.phase = GamePhase::GameOver;
            info!("game over ({} coins, {} stars)", state.coins, state.stars);
            fired.push(GameEvent::GameOver);
        }
    }

    /// Apply one damage hit per the configured policy
    fn take_damage(&self, world: &mut GameWorld, state: &mut GameState, force_respawn: bool) {
        let policy = self.rules.damage_policy;
        if force_respawn || matches!(policy, DamagePolicy::Respawn | DamagePolicy::Both) {
            let spawn = world.respawn_point;
            world.player.respawn(spawn);
        }
        if matches!(policy, DamagePolicy::Health | DamagePolicy::Both) {
            state.health = state.health.saturating_sub(1);
        }
    }
}
