//! ECS components for hecs entities.
//!
//! Components are plain data structs; game logic lives in systems.
//! `Body` (geometry) is defined in `types.rs` and attached as a
//! component too, as is `Velocity`.

use serde::{Deserialize, Serialize};

use crate::enums::{ProjectileKind, TowerTier, UnitKind};
use crate::timer::PollTimer;
use crate::types::Vec2;

/// Common identity carried by every entity in the world.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    /// Stable id, unique for the lifetime of a world.
    pub id: u32,
    pub kind: UnitKind,
    /// One-way flag: once true the unit is inert and pending removal
    /// by the sweep. No code revives a destroyed unit.
    pub destroyed: bool,
}

/// Marks the defended objective.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Statue;

/// Stationary attacker state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tower {
    pub tier: TowerTier,
    pub damage: i32,
    /// Targeting radius, measured center to center.
    pub range: f64,
    pub shot: ProjectileKind,
    /// Gates projectile launches.
    pub attack: PollTimer,
}

/// Moving attacker state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mob {
    /// Wave index this mob was derived from.
    pub wave: u32,
    /// Damage dealt per strike on the statue.
    pub damage: i32,
    /// Displacement per movement step.
    pub speed: f64,
    /// Set when the regen schedule activates this mob.
    pub created: bool,
    /// Gates movement steps.
    pub movement: PollTimer,
    /// Gates statue strikes while in contact.
    pub strike: PollTimer,
}

/// Marks a projectile. Target handle and homing state live sim-side
/// (`Seeker`), since the core crate carries no ECS dependency.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub kind: ProjectileKind,
}

/// Hit points. Present only on hittable units (statue, mobs).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn full(max: i32) -> Self {
        Self { current: max, max }
    }
}

/// The displacement applied on the entity's last movement step.
/// Read by predictive homing to lead moving targets.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Velocity(pub Vec2);

/// Crowd-control marker: the entity's timers are paused until the
/// remaining time runs out.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Frozen {
    pub remaining_ms: u64,
}
