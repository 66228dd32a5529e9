//! Mob movement and statue strikes.
//!
//! Each activated mob steps straight toward the statue's center on its
//! movement cadence. A mob whose hit rect touches the statue's stops
//! and strikes on its strike cadence instead. Frozen mobs thaw here.

use hecs::{Entity, World};

use stronghold_core::components::{Frozen, Mob, Statue, Unit, Velocity};
use stronghold_core::events::GameEvent;
use stronghold_core::types::{Body, Vec2};

use crate::systems::{apply_hit, HitResult};

pub fn run(world: &mut World, delta_ms: u64, events: &mut Vec<GameEvent>) {
    let statue = {
        let mut query = world.query::<(&Unit, &Body, &Statue)>();
        query
            .iter()
            .find(|(_, (unit, _, _))| !unit.destroyed)
            .map(|(entity, (_, body, _))| (entity, body.center(), body.hit_rect()))
    };
    let Some((statue_entity, statue_center, statue_rect)) = statue else {
        // No live statue means nothing to march on or strike.
        return;
    };

    let mut strike_total = 0i32;
    let mut thawed: Vec<Entity> = Vec::new();

    for (entity, (unit, mob, body, vel, frozen)) in
        world.query_mut::<(&Unit, &mut Mob, &mut Body, &mut Velocity, Option<&mut Frozen>)>()
    {
        if unit.destroyed || !mob.created {
            continue;
        }

        if let Some(frozen) = frozen {
            // The freeze countdown runs on wall delta; the mob's own
            // timers stay paused until it expires.
            frozen.remaining_ms = frozen.remaining_ms.saturating_sub(delta_ms);
            if frozen.remaining_ms == 0 {
                mob.movement.resume();
                mob.strike.resume();
                thawed.push(entity);
            }
            vel.0 = Vec2::ZERO;
            continue;
        }

        mob.movement.advance(delta_ms);
        mob.strike.advance(delta_ms);

        if body.hit_rect().intersects(&statue_rect) {
            vel.0 = Vec2::ZERO;
            if mob.strike.is_usable() {
                mob.strike.consume();
                strike_total += mob.damage;
            }
        } else if mob.movement.is_usable() {
            mob.movement.consume();
            let step = (statue_center - body.center()).normalize_or_zero() * mob.speed;
            body.translate(step);
            vel.0 = step;
        }
    }

    for entity in thawed {
        let _ = world.remove_one::<Frozen>(entity);
    }

    if strike_total > 0 {
        match apply_hit(world, statue_entity, strike_total) {
            HitResult::Damaged { remaining } => events.push(GameEvent::StatueStruck {
                remaining_health: remaining,
            }),
            HitResult::Destroyed => events.push(GameEvent::StatueStruck {
                remaining_health: 0,
            }),
            HitResult::Ignored => {}
        }
    }
}
