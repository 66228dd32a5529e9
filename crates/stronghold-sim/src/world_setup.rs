//! Entity spawn factories.
//!
//! Every entity enters the world through one of these, which keeps the
//! component sets per kind in a single place and the insertion-ordered
//! unit list in sync with the ECS world.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use stronghold_core::components::{Health, Mob, Projectile, Statue, Tower, Unit, Velocity};
use stronghold_core::constants::*;
use stronghold_core::enums::{ProjectileKind, TowerTier, UnitKind};
use stronghold_core::timer::{PollTimer, REPEAT_INFINITE};
use stronghold_core::types::{Body, Vec2};

use crate::balance::MobStats;
use crate::systems::homing::Seeker;

pub fn spawn_statue(world: &mut World, units: &mut Vec<Entity>, next_id: &mut u32) -> Entity {
    let id = alloc_id(next_id);
    let entity = world.spawn((
        Unit {
            id,
            kind: UnitKind::Statue,
            destroyed: false,
        },
        Statue,
        Body::new(Vec2::new(STATUE_X, STATUE_Y), Vec2::splat(STATUE_SIZE)),
        Health::full(STATUE_MAX_HEALTH),
    ));
    units.push(entity);
    entity
}

pub fn spawn_tower(
    world: &mut World,
    units: &mut Vec<Entity>,
    next_id: &mut u32,
    pos: Vec2,
    tier: TowerTier,
) -> Entity {
    let id = alloc_id(next_id);
    let (damage, interval_ms, range, shot) = tower_tier_params(tier);
    let mut attack = PollTimer::create(interval_ms, REPEAT_INFINITE);
    attack.start();
    let entity = world.spawn((
        Unit {
            id,
            kind: UnitKind::Tower,
            destroyed: false,
        },
        Tower {
            tier,
            damage,
            range,
            shot,
            attack,
        },
        Body::new(pos, Vec2::new(TOWER_SPACE_WIDTH, TOWER_SPACE_HEIGHT)),
    ));
    units.push(entity);
    entity
}

/// Activate a mob at the spawn point with the wave's stats.
pub fn spawn_mob(
    world: &mut World,
    units: &mut Vec<Entity>,
    next_id: &mut u32,
    wave: u32,
    stats: &MobStats,
) -> Entity {
    let id = alloc_id(next_id);
    let mut movement = PollTimer::create(MOB_MOVE_INTERVAL_MS, REPEAT_INFINITE);
    movement.start();
    let mut strike = PollTimer::create(MOB_STRIKE_INTERVAL_MS, REPEAT_INFINITE);
    strike.start();
    let entity = world.spawn((
        Unit {
            id,
            kind: UnitKind::Mob,
            destroyed: false,
        },
        Mob {
            wave,
            damage: stats.damage,
            speed: stats.speed,
            created: true,
            movement,
            strike,
        },
        Body::new(Vec2::new(MOB_SPAWN_X, MOB_SPAWN_Y), Vec2::splat(MOB_SIZE)),
        Health::full(stats.health),
        Velocity::default(),
    ));
    units.push(entity);
    entity
}

/// Launch a projectile from `from_center` at a live target entity.
/// `target` is a non-owning handle: the seeker revalidates it every
/// step and self-destroys if the target is gone.
pub fn spawn_projectile(
    world: &mut World,
    units: &mut Vec<Entity>,
    next_id: &mut u32,
    from_center: Vec2,
    target: Entity,
    kind: ProjectileKind,
    damage: i32,
) -> Entity {
    let id = alloc_id(next_id);
    let mut movement = PollTimer::create(PROJECTILE_MOVE_INTERVAL_MS, REPEAT_INFINITE);
    movement.start();
    let entity = world.spawn((
        Unit {
            id,
            kind: UnitKind::Projectile,
            destroyed: false,
        },
        Projectile { kind },
        Seeker {
            target,
            damage,
            speed: PROJECTILE_SPEED,
            movement,
        },
        Body::from_center(from_center, Vec2::splat(PROJECTILE_SIZE)),
        Velocity::default(),
    ));
    units.push(entity);
    entity
}

/// Damage, attack interval, range, and shot kind per tower tier.
pub fn tower_tier_params(tier: TowerTier) -> (i32, u64, f64, ProjectileKind) {
    match tier {
        TowerTier::Standard => (10, 1000, 400.0, ProjectileKind::Normal),
        TowerTier::Rapid => (4, 400, 300.0, ProjectileKind::Normal),
        TowerTier::Frost => (6, 1200, 350.0, ProjectileKind::Ice),
    }
}

/// Roll the tier for a freshly drawn tower: 60% standard, 30% rapid,
/// 10% frost.
pub fn random_tier(rng: &mut ChaCha8Rng) -> TowerTier {
    match rng.gen_range(0..10) {
        0..=5 => TowerTier::Standard,
        6..=8 => TowerTier::Rapid,
        _ => TowerTier::Frost,
    }
}

fn alloc_id(next_id: &mut u32) -> u32 {
    let id = *next_id;
    *next_id += 1;
    id
}
