//! Events emitted by the simulation for UI and sound adapters.

use serde::{Deserialize, Serialize};

/// One tick's worth of notable happenings, delivered in the snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A new wave began.
    WaveStarted { wave: u32 },
    /// The regen schedule activated a mob.
    MobSpawned { id: u32, wave: u32 },
    /// A mob was destroyed and swept.
    MobDestroyed { id: u32 },
    /// A tower launched a projectile.
    ProjectileLaunched { tower_id: u32, target_id: u32 },
    /// A mob struck the statue.
    StatueStruck { remaining_health: i32 },
    /// The statue fell. Game-over policy lives in the adapter.
    StatueDestroyed,
    /// A held tower was committed to the world.
    TowerPlaced { id: u32, x: f64, y: f64 },
}
