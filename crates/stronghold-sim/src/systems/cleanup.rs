//! End-of-tick destruction sweep.
//!
//! The only place entities leave the world and the only place the mob
//! counters move, so a unit destroyed by any number of causes in one
//! tick is still counted exactly once.

use hecs::{Entity, World};

use stronghold_core::components::Unit;
use stronghold_core::enums::UnitKind;
use stronghold_core::events::GameEvent;

#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    units: &mut Vec<Entity>,
    despawn_buffer: &mut Vec<Entity>,
    cur_mob_count: &mut u32,
    dead_mob_count: &mut u32,
    game_over: &mut bool,
    events: &mut Vec<GameEvent>,
) {
    despawn_buffer.clear();
    let mut swept: Vec<(Entity, u32, UnitKind)> = Vec::new();
    for (entity, unit) in world.query_mut::<&Unit>() {
        if unit.destroyed {
            swept.push((entity, unit.id, unit.kind));
        }
    }

    for (entity, id, kind) in swept {
        match kind {
            UnitKind::Mob => {
                *cur_mob_count = cur_mob_count.saturating_sub(1);
                *dead_mob_count += 1;
                events.push(GameEvent::MobDestroyed { id });
            }
            UnitKind::Statue => {
                *game_over = true;
                events.push(GameEvent::StatueDestroyed);
            }
            UnitKind::Tower | UnitKind::Projectile => {}
        }
        despawn_buffer.push(entity);
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
        units.retain(|&e| e != entity);
    }
}
