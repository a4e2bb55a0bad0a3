//! Math types for the Starfall simulation
//!
//! Provides the [`Vec3`] vector type used throughout the physics and
//! gameplay crates. Y is the vertical axis.

mod vec3;

pub use vec3::Vec3;
