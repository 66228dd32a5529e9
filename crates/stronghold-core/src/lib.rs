//! Core types and definitions for the STRONGHOLD simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry, timers, components, commands, state snapshots, events,
//! errors, and constants. It has no dependency on any ECS or runtime
//! framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod timer;
pub mod types;
