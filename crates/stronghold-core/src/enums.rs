//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// The closed set of unit kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    /// The defended objective. Stationary, hittable.
    Statue,
    /// Stationary attacker: periodically launches projectiles at a mob.
    Tower,
    /// Moving attacker: advances toward the statue each logic step.
    Mob,
    /// Homing shot fired by a tower at a single target.
    Projectile,
}

/// Tower grade rolled when entering deploy mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TowerTier {
    /// Baseline damage and fire rate.
    #[default]
    Standard,
    /// Low damage, high fire rate.
    Rapid,
    /// Slow firing; its projectiles freeze the struck mob.
    Frost,
}

/// Projectile effect on impact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Plain damage.
    #[default]
    Normal,
    /// Damage plus a timed freeze of the target's action timers.
    Ice,
}

/// Top-level world state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Constructed but not yet initialized (or purged).
    #[default]
    Idle,
    /// Simulation advancing.
    Active,
    /// Frozen; ticks advance nothing until resumed.
    Paused,
    /// The statue was destroyed. The adapter decides what to show.
    GameOver,
}
