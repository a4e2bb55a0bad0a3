//! Application systems
//!
//! The simulation loop lives here, kept out of main.rs for testability.

mod simulation;

pub use simulation::{SimulationLoop, TickReport};
