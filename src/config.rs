//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`SFALL_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

use starfall_core::{DamagePolicy, EnemyConfig, RulesConfig};
use starfall_physics::PlayerConfig;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Player locomotion configuration
    #[serde(default)]
    pub player: PlayerSection,
    /// Enemy behaviour configuration
    #[serde(default)]
    pub enemies: EnemySection,
    /// Scoring and damage rules
    #[serde(default)]
    pub rules: RulesSection,
    /// Arena configuration
    #[serde(default)]
    pub world: WorldSection,
    /// Simulation loop configuration
    #[serde(default)]
    pub simulation: SimulationSection,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            player: PlayerSection::default(),
            enemies: EnemySection::default(),
            rules: RulesSection::default(),
            world: WorldSection::default(),
            simulation: SimulationSection::default(),
            debug: DebugConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`SFALL_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        // Load default config (required)
        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // SFALL_PLAYER__WALK_SPEED=5.0 -> player.walk_speed = 5.0
        figment = figment.merge(Env::prefixed("SFALL_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Player locomotion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSection {
    /// Walk speed (units per second)
    pub walk_speed: f32,
    /// Run speed with the modifier held (units per second)
    pub run_speed: f32,
    /// Turn rate (degrees per second)
    pub turn_rate: f32,
    /// Downward acceleration (units per second squared)
    pub gravity: f32,
    /// Grounded jump velocity (units per second)
    pub jump_force: f32,
    /// Jump-force multipliers per chain step; length = maximum chain
    pub chain_multiplier: Vec<f32>,
    /// Fraction of movement authority while airborne
    pub air_control: f32,
    /// Vertical nudge rate while swimming (units per second)
    pub swim_rate: f32,
    /// Clamp on vertical speed while swimming (units per second)
    pub swim_vertical_cap: f32,
    /// Vertical nudge rate while flying (units per second)
    pub flight_rate: f32,
    /// Minimum horizontal speed for a long jump (units per second)
    pub long_jump_min_speed: f32,
    /// Forward speed factor at the long-jump instant
    pub long_jump_speed_factor: f32,
    /// Long-jump vertical impulse as a fraction of jump force
    pub long_jump_lift: f32,
    /// Half the avatar's height
    pub half_height: f32,
    /// Half the avatar's width
    pub half_width: f32,
    /// Extra ground-probe reach below the feet
    pub probe_epsilon: f32,
}

impl Default for PlayerSection {
    fn default() -> Self {
        let c = PlayerConfig::default();
        Self {
            walk_speed: c.walk_speed,
            run_speed: c.run_speed,
            turn_rate: c.turn_rate,
            gravity: c.gravity,
            jump_force: c.jump_force,
            chain_multiplier: c.chain_multiplier,
            air_control: c.air_control,
            swim_rate: c.swim_rate,
            swim_vertical_cap: c.swim_vertical_cap,
            flight_rate: c.flight_rate,
            long_jump_min_speed: c.long_jump_min_speed,
            long_jump_speed_factor: c.long_jump_speed_factor,
            long_jump_lift: c.long_jump_lift,
            half_height: c.half_height,
            half_width: c.half_width,
            probe_epsilon: c.probe_epsilon,
        }
    }
}

impl PlayerSection {
    /// Convert to the physics crate's player config
    pub fn to_player_config(&self) -> PlayerConfig {
        PlayerConfig {
            walk_speed: self.walk_speed,
            run_speed: self.run_speed,
            turn_rate: self.turn_rate,
            gravity: self.gravity,
            jump_force: self.jump_force,
            chain_multiplier: self.chain_multiplier.clone(),
            air_control: self.air_control,
            swim_rate: self.swim_rate,
            swim_vertical_cap: self.swim_vertical_cap,
            flight_rate: self.flight_rate,
            long_jump_min_speed: self.long_jump_min_speed,
            long_jump_speed_factor: self.long_jump_speed_factor,
            long_jump_lift: self.long_jump_lift,
            half_height: self.half_height,
            half_width: self.half_width,
            probe_epsilon: self.probe_epsilon,
        }
    }
}

/// Enemy behaviour configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemySection {
    /// Shortest time between patrol heading changes (seconds)
    pub patrol_turn_min: f32,
    /// Longest time between patrol heading changes (seconds)
    pub patrol_turn_max: f32,
}

impl Default for EnemySection {
    fn default() -> Self {
        let c = EnemyConfig::default();
        Self {
            patrol_turn_min: c.patrol_turn_min,
            patrol_turn_max: c.patrol_turn_max,
        }
    }
}

impl EnemySection {
    /// Convert to the core crate's enemy config
    pub fn to_enemy_config(&self) -> EnemyConfig {
        EnemyConfig {
            patrol_turn_min: self.patrol_turn_min,
            patrol_turn_max: self.patrol_turn_max,
        }
    }
}

/// Damage and stomp rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesSection {
    /// Health at session start
    pub max_health: u32,
    /// What damage does: "respawn", "health", or "both"
    pub damage_policy: DamagePolicy,
    /// Fraction of an enemy's height required for a stomp
    pub stomp_height_fraction: f32,
    /// Upward impulse after a stomp
    pub stomp_bounce: f32,
}

impl Default for RulesSection {
    fn default() -> Self {
        let c = RulesConfig::default();
        Self {
            max_health: c.max_health,
            damage_policy: c.damage_policy,
            stomp_height_fraction: c.stomp_height_fraction,
            stomp_bounce: c.stomp_bounce,
        }
    }
}

impl RulesSection {
    /// Convert to the core crate's rules config
    pub fn to_rules_config(&self) -> RulesConfig {
        RulesConfig {
            max_health: self.max_health,
            damage_policy: self.damage_policy,
            stomp_height_fraction: self.stomp_height_fraction,
            stomp_bounce: self.stomp_bounce,
        }
    }
}

/// Arena configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSection {
    /// Floor Y position
    pub floor_height: f32,
    /// Half-extent of the playable square on XZ
    pub bounds: f32,
    /// Respawn point [x, y, z]
    pub respawn_point: [f32; 3],
}

impl Default for WorldSection {
    fn default() -> Self {
        Self {
            floor_height: 0.0,
            bounds: 90.0,
            respawn_point: [0.0, 2.0, 0.0],
        }
    }
}

/// Simulation loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSection {
    /// Cap on a single frame's delta time (seconds)
    pub max_dt: f32,
    /// Seed for enemy behaviour randomness (0 = seed from entropy)
    pub rng_seed: u64,
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            max_dt: 0.1,
            rng_seed: 0,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
