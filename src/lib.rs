//! Starfall - a headless platformer simulation core
//!
//! Re-exports the configuration layer and the simulation loop; the gameplay
//! types live in the `starfall_core` and `starfall_physics` crates.

pub mod config;
pub mod systems;

pub use config::AppConfig;
pub use systems::{SimulationLoop, TickReport};
