//! Simulation engine for STRONGHOLD.
//!
//! Owns the hecs ECS world, advances it one explicit tick at a time,
//! and produces `WorldSnapshot`s for rendering and UI adapters.
//! Completely headless: given the same seed, commands, and tick
//! timestamps, the simulation replays identically.

pub mod balance;
pub mod camera;
pub mod engine;
pub mod systems;
pub mod world_setup;

pub use engine::{GameWorld, WorldConfig};
pub use stronghold_core as core;

#[cfg(test)]
mod tests;
