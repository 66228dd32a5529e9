//! Per-tick simulation systems.
//!
//! The engine runs them in a fixed order: tower attack, mob movement,
//! projectile homing, then the destruction sweep. Systems communicate
//! only through components and the engine's event buffer.

pub mod attack;
pub mod cleanup;
pub mod homing;
pub mod movement;
pub mod snapshot;

use hecs::{Entity, World};

use stronghold_core::components::{Health, Mob, Tower, Unit};

use crate::systems::homing::Seeker;

/// Outcome of applying damage to a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitResult {
    /// Target missing, not hittable, or already destroyed.
    Ignored,
    Damaged { remaining: i32 },
    Destroyed,
}

/// Apply damage to a hittable unit.
///
/// Idempotent once destroyed: the destroyed flag is one-way and hits on
/// a destroyed unit are no-ops, so a unit can never be destroyed twice
/// no matter how many projectiles connect in one tick. Counters are
/// touched only by the sweep, never here.
pub fn apply_hit(world: &mut World, target: Entity, damage: i32) -> HitResult {
    let Ok((unit, health)) = world.query_one_mut::<(&mut Unit, &mut Health)>(target) else {
        return HitResult::Ignored;
    };
    if unit.destroyed {
        return HitResult::Ignored;
    }
    health.current = (health.current - damage).max(0);
    if health.current == 0 {
        unit.destroyed = true;
        HitResult::Destroyed
    } else {
        HitResult::Damaged {
            remaining: health.current,
        }
    }
}

/// Pause or resume every internal timer the entity owns. Position and
/// health are untouched; a frozen mob stands where it is.
pub fn set_timers_paused(world: &mut World, entity: Entity, paused: bool) {
    if let Ok(mut mob) = world.get::<&mut Mob>(entity) {
        if paused {
            mob.movement.pause();
            mob.strike.pause();
        } else {
            mob.movement.resume();
            mob.strike.resume();
        }
    }
    if let Ok(mut tower) = world.get::<&mut Tower>(entity) {
        if paused {
            tower.attack.pause();
        } else {
            tower.attack.resume();
        }
    }
    if let Ok(mut seeker) = world.get::<&mut Seeker>(entity) {
        if paused {
            seeker.movement.pause();
        } else {
            seeker.movement.resume();
        }
    }
}
