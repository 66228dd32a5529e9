//! Tower fire control: pick the nearest live mob in range and launch a
//! projectile at it on the tower's attack cadence.

use hecs::{Entity, World};

use stronghold_core::components::{Mob, Tower, Unit};
use stronghold_core::enums::ProjectileKind;
use stronghold_core::events::GameEvent;
use stronghold_core::types::{Body, Vec2};

use crate::world_setup;

pub fn run(
    world: &mut World,
    units: &mut Vec<Entity>,
    next_id: &mut u32,
    delta_ms: u64,
    events: &mut Vec<GameEvent>,
) {
    // Phase 1: advance cadences and collect towers whose timers fired.
    // The timer is consumed whether or not a target is found — a tower
    // with nothing in range wastes the shot rather than banking it.
    let mut ready: Vec<(u32, Vec2, i32, f64, ProjectileKind)> = Vec::new();
    for (_entity, (unit, tower, body)) in world.query_mut::<(&Unit, &mut Tower, &Body)>() {
        if unit.destroyed {
            continue;
        }
        tower.attack.advance(delta_ms);
        if tower.attack.is_usable() {
            tower.attack.consume();
            ready.push((unit.id, body.center(), tower.damage, tower.range, tower.shot));
        }
    }

    // Phase 2: target selection and spawning, now that the tower query
    // borrow is released.
    for (tower_id, center, damage, range, shot) in ready {
        let Some((target, target_id)) = select_target(world, center, range) else {
            continue;
        };
        world_setup::spawn_projectile(world, units, next_id, center, target, shot, damage);
        events.push(GameEvent::ProjectileLaunched {
            tower_id,
            target_id,
        });
    }
}

/// Nearest live, activated mob within `range` of `from`, measured
/// center to center.
fn select_target(world: &World, from: Vec2, range: f64) -> Option<(Entity, u32)> {
    let mut best: Option<(Entity, u32, f64)> = None;
    for (entity, (unit, mob, body)) in world.query::<(&Unit, &Mob, &Body)>().iter() {
        if unit.destroyed || !mob.created {
            continue;
        }
        let dist = from.distance(body.center());
        if dist > range {
            continue;
        }
        if best.map_or(true, |(_, _, d)| dist < d) {
            best = Some((entity, unit.id, dist));
        }
    }
    best.map(|(entity, id, _)| (entity, id))
}
