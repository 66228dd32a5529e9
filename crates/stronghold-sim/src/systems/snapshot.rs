//! Snapshot assembly: project the ECS world into the read-only
//! `WorldSnapshot` handed to adapters.

use hecs::{Entity, World};

use stronghold_core::components::{Health, Unit};
use stronghold_core::enums::GamePhase;
use stronghold_core::events::GameEvent;
use stronghold_core::state::{UnitView, WorldSnapshot};
use stronghold_core::types::{Body, SimTime};

/// View of a single unit, if it still has its identity and geometry.
pub fn view_unit(world: &World, entity: Entity) -> Option<UnitView> {
    let unit = world.get::<&Unit>(entity).ok()?;
    let body = world.get::<&Body>(entity).ok()?;
    let health = world.get::<&Health>(entity).ok().map(|h| (h.current, h.max));
    Some(UnitView {
        id: unit.id,
        kind: unit.kind,
        x: body.pos().x,
        y: body.pos().y,
        width: body.size().x,
        height: body.size().y,
        destroyed: unit.destroyed,
        health: health.map(|(current, _)| current),
        max_health: health.map(|(_, max)| max),
    })
}

/// Draw list in insertion order.
pub fn unit_views(world: &World, units: &[Entity]) -> Vec<UnitView> {
    units
        .iter()
        .filter_map(|&entity| view_unit(world, entity))
        .collect()
}

#[allow(clippy::too_many_arguments)]
pub fn build(
    world: &World,
    units: &[Entity],
    time: SimTime,
    phase: GamePhase,
    wave: u32,
    cur_mob_count: u32,
    dead_mob_count: u32,
    used_mob_count: u32,
    mob_quota: u32,
    deploy_mode: bool,
    game_over: bool,
    events: Vec<GameEvent>,
) -> WorldSnapshot {
    WorldSnapshot {
        time,
        phase,
        wave,
        cur_mob_count,
        dead_mob_count,
        used_mob_count,
        mob_quota,
        deploy_mode,
        game_over,
        units: unit_views(world, units),
        events,
    }
}
