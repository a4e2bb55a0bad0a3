//! Starfall - headless platformer simulation
//!
//! Runs a scripted session in a demo arena and logs the gameplay events.
//! The binary exists to exercise the full stack end to end; embedders use
//! the library crates directly.

mod config;
mod systems;

use starfall_core::{
    EffectKind, GameEvent, GameHooks, GameObject, PlatformMotion, WorldBuilder,
};
use starfall_math::Vec3;
use starfall_physics::{Aabb3, InputSnapshot};

use config::AppConfig;
use systems::SimulationLoop;

/// Logs every gameplay event as it fires
struct LoggingHooks;

impl GameHooks for LoggingHooks {
    fn on_event(&mut self, event: &GameEvent) {
        log::info!("{:?}", event);
    }
}

/// Build the demo arena: a coin run, patrollers, a bomb cluster, a moving
/// platform over a pond, and a wing pickup guarding the star.
fn build_demo_world(config: &AppConfig) -> Result<starfall_core::GameWorld, Box<dyn std::error::Error>> {
    let respawn = Vec3::from(config.world.respawn_point);
    let mut builder = WorldBuilder::new()
        .with_floor_height(config.world.floor_height)
        .with_bounds(config.world.bounds)
        .with_respawn_point(respawn)
        .with_player_config(config.player.to_player_config());

    // A line of coins leading away from the spawn
    for i in 0..10 {
        builder = builder.add_object(GameObject::coin(Vec3::new(0.0, 1.0, 4.0 + i as f32 * 2.0)));
    }

    // Patrollers roaming the open field
    builder = builder
        .add_object(GameObject::patroller(Vec3::new(8.0, 0.4, 12.0), 2.0))
        .add_object(GameObject::patroller(Vec3::new(-8.0, 0.4, 18.0), 2.5));

    // A bomb cluster close enough to chain
    builder = builder
        .add_object(GameObject::explosive(Vec3::new(15.0, 0.5, 8.0), 4.0, 3.0, 5.0))
        .add_object(GameObject::explosive(Vec3::new(18.0, 0.5, 8.0), 4.0, 3.0, 5.0));

    // A platform bobbing over the pond
    builder = builder
        .add_object(GameObject::platform(
            Vec3::new(-12.0, 4.0, 10.0),
            Vec3::new(3.0, 0.5, 3.0),
            PlatformMotion::Oscillating {
                axis: Vec3::Y,
                amplitude: 2.0,
                period: 6.0,
            },
        ))
        .add_water(Aabb3::from_center_half_extents(
            Vec3::new(-12.0, -2.0, 10.0),
            Vec3::new(8.0, 2.0, 8.0),
        ));

    // Wings, then the star up high
    builder = builder
        .add_object(GameObject::power_up(
            Vec3::new(0.0, 1.0, 26.0),
            EffectKind::Flight,
            12.0,
        ))
        .add_object(GameObject::star(Vec3::new(0.0, 12.0, 32.0)));

    Ok(builder.build()?)
}

/// Scripted input for a given simulation time
///
/// The jump edge is raised by the caller; this covers the held axes only.
fn scripted_input(t: f32) -> InputSnapshot {
    let mut input = InputSnapshot::default();
    match t {
        // Run forward through the coin line
        t if t < 4.0 => {
            input.move_forward = 1.0;
            input.run_held = true;
        }
        // Long-jump posture across the field
        t if t < 4.5 => {
            input.move_forward = 1.0;
            input.run_held = true;
            input.long_jump_held = true;
        }
        // Keep moving toward the wings
        t if t < 8.0 => {
            input.move_forward = 1.0;
        }
        // Fly up toward the star
        t if t < 14.0 => {
            input.move_forward = 0.3;
            input.vertical = 1.0;
        }
        _ => {}
    }
    input
}

fn main() {
    // Load configuration before logging so the log level applies
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&config.debug.log_level),
    )
    .init();
    log::info!("Starting Starfall");

    let world = match build_demo_world(&config) {
        Ok(world) => world,
        Err(e) => {
            log::error!("Failed to build demo world: {}", e);
            std::process::exit(1);
        }
    };
    log::info!("Demo arena: {} objects", world.object_count());

    let mut sim = SimulationLoop::new(world, &config);
    let mut hooks = LoggingHooks;

    // 20 seconds of scripted play at 60 Hz
    let dt = 1.0 / 60.0;
    let mut t = 0.0;
    let mut jumped = false;
    while t < 20.0 && !sim.is_over() {
        let mut input = scripted_input(t);
        // jump_pressed is an edge, so raise it for a single tick
        if t >= 4.0 && !jumped {
            input.jump_pressed = true;
            jumped = true;
        }
        sim.tick_with_hooks(&input, dt, &mut hooks);
        t += dt;
    }

    let state = sim.state();
    log::info!(
        "Session done: {} coins / {} stars / {} health left",
        state.coins,
        state.stars,
        state.health
    );
}
