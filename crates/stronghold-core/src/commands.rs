//! Player commands sent from the adapter to the simulation.
//!
//! Commands are queued and drained at the next tick boundary, so the
//! tick stays the only place simulation state mutates.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Initialize (or fully reset) the world and start playing.
    StartGame,
    /// Pause the simulation.
    Pause,
    /// Resume from pause.
    Resume,

    // --- Deploy mode ---
    /// Roll a random tower and hold it for placement.
    EnterDeployMode,
    /// Commit the held tower at a world position (top-left corner).
    PlaceTower { x: f64, y: f64 },
    /// Drop the held tower without placing it.
    CancelDeploy,

    /// Advance to the next wave (the adapter decides when the current
    /// wave counts as cleared).
    NextWave,
}
