//! Error taxonomy for fallible world operations.
//!
//! Lookups that may legitimately find nothing return `Option` instead;
//! these errors are for operations whose contract was violated. During
//! steady-state play the engine prefers a defensive no-op plus a
//! `log::warn!` over propagating a fatal error.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    /// A world operation was called before `init_state`.
    #[error("world is not initialized")]
    NotInitialized,

    /// A unit id no longer resolves to a live entity.
    #[error("unit {0} no longer exists")]
    UnitGone(u32),

    /// Deploy-mode operation without a held tower.
    #[error("no tower held for placement")]
    NothingInHand,

    /// Tower placement rejected: the footprint overlaps a live unit.
    #[error("placement at ({x:.0}, {y:.0}) is blocked by unit {blocking}")]
    SpotOccupied { x: f64, y: f64, blocking: u32 },

    /// Tower placement rejected: the footprint leaves the world.
    #[error("placement at ({x:.0}, {y:.0}) is outside the world")]
    OutOfBounds { x: f64, y: f64 },
}
