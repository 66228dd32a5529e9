//! Projectile homing, predictive lead, and impact resolution.

use hecs::{Entity, World};

use stronghold_core::components::{Frozen, Mob, Projectile, Unit, Velocity};
use stronghold_core::constants::ICE_FREEZE_MS;
use stronghold_core::enums::ProjectileKind;
use stronghold_core::timer::PollTimer;
use stronghold_core::types::Body;

use crate::systems::{apply_hit, set_timers_paused};

/// Sim-side homing state attached to every projectile.
///
/// `target` is a non-owning hecs handle. Generational entity ids make a
/// despawned target's handle invalid, so a stale handle can never
/// dereference another unit's components — the seeker just self-destroys.
#[derive(Debug, Clone)]
pub struct Seeker {
    pub target: Entity,
    pub damage: i32,
    pub speed: f64,
    /// Gates homing steps.
    pub movement: PollTimer,
}

pub fn run(world: &mut World, delta_ms: u64) {
    let shots: Vec<Entity> = world
        .query_mut::<(&Seeker, &Projectile)>()
        .into_iter()
        .map(|(entity, _)| entity)
        .collect();
    for entity in shots {
        step(world, entity, delta_ms);
    }
}

/// One homing step for a single projectile:
/// 1. gate on the movement cadence,
/// 2. validate the target is still alive (self-destroy otherwise),
/// 3. resolve impact by containment inside the target's hit rect,
/// 4. otherwise advance toward the target's center, leading mobs by
///    their last movement step.
fn step(world: &mut World, entity: Entity, delta_ms: u64) {
    {
        let Ok(mut seeker) = world.get::<&mut Seeker>(entity) else {
            return;
        };
        seeker.movement.advance(delta_ms);
        if !seeker.movement.is_usable() {
            return;
        }
        seeker.movement.consume();
    }
    if !matches!(world.get::<&Unit>(entity), Ok(unit) if !unit.destroyed) {
        return;
    }

    let (target, damage, speed) = match world.get::<&Seeker>(entity) {
        Ok(seeker) => (seeker.target, seeker.damage, seeker.speed),
        Err(_) => return,
    };
    let kind = match world.get::<&Projectile>(entity) {
        Ok(projectile) => projectile.kind,
        Err(_) => return,
    };

    let target_alive = matches!(world.get::<&Unit>(target), Ok(unit) if !unit.destroyed);
    if !target_alive {
        self_destroy(world, entity);
        return;
    }

    let target_body = world
        .get::<&Body>(target)
        .map(|body| (body.center(), body.hit_rect()));
    let (target_center, target_rect) = match target_body {
        Ok(values) => values,
        Err(_) => {
            self_destroy(world, entity);
            return;
        }
    };
    let (own_center, own_rect) = match world.get::<&Body>(entity) {
        Ok(body) => (body.center(), body.hit_rect()),
        Err(_) => return,
    };

    // Impact is containment, not overlap: the shot must be fully inside
    // the target before it connects.
    if target_rect.contains_rect(&own_rect) {
        self_destroy(world, entity);
        apply_hit(world, target, damage);
        if kind == ProjectileKind::Ice {
            freeze(world, target);
        }
        return;
    }

    let mut step = (target_center - own_center).normalize_or_zero() * speed;
    if world.satisfies::<&Mob>(target).unwrap_or(false) {
        // Lead a moving mob by adding its last displacement, so the
        // shot aims at where the mob is going.
        if let Ok(vel) = world.get::<&Velocity>(target) {
            step += vel.0;
        }
    }
    if let Ok(mut body) = world.get::<&mut Body>(entity) {
        body.translate(step);
    }
    if let Ok(mut vel) = world.get::<&mut Velocity>(entity) {
        vel.0 = step;
    }
}

fn self_destroy(world: &mut World, entity: Entity) {
    if let Ok(mut unit) = world.get::<&mut Unit>(entity) {
        unit.destroyed = true;
    }
}

/// Apply an ice freeze: pause the target's timers and attach (or renew)
/// the countdown. Freezing a destroyed unit is a no-op.
fn freeze(world: &mut World, target: Entity) {
    if !matches!(world.get::<&Unit>(target), Ok(unit) if !unit.destroyed) {
        return;
    }
    set_timers_paused(world, target, true);
    let _ = world.insert_one(
        target,
        Frozen {
            remaining_ms: ICE_FREEZE_MS,
        },
    );
}
