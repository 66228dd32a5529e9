//! World snapshot — the complete visible state handed to adapters each tick.

use serde::{Deserialize, Serialize};

use crate::enums::{GamePhase, UnitKind};
use crate::events::GameEvent;
use crate::types::SimTime;

/// Read-only view of the world after one tick. Everything a renderer
/// or debug HUD needs; no mutation methods leak through.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub wave: u32,
    /// Live (non-destroyed) mobs.
    pub cur_mob_count: u32,
    /// Mobs destroyed this wave. Monotonic within a wave.
    pub dead_mob_count: u32,
    /// Mobs activated this wave.
    pub used_mob_count: u32,
    /// Mob quota for the wave.
    pub mob_quota: u32,
    /// A tower is held and awaiting placement.
    pub deploy_mode: bool,
    /// The statue has been destroyed.
    pub game_over: bool,
    /// Draw list in insertion order — iterate front to back.
    pub units: Vec<UnitView>,
    /// Happenings since the previous snapshot.
    pub events: Vec<GameEvent>,
}

/// Draw data for one unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitView {
    pub id: u32,
    pub kind: UnitKind,
    /// Top-left corner, world units.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub destroyed: bool,
    /// Present on hittable units only.
    pub health: Option<i32>,
    pub max_health: Option<i32>,
}
