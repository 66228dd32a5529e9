#[cfg(test)]
mod tests {
    use hecs::{Entity, World};

    use stronghold_core::commands::PlayerCommand;
    use stronghold_core::components::{Frozen, Health, Mob, Statue, Unit, Velocity};
    use stronghold_core::constants::*;
    use stronghold_core::enums::{GamePhase, ProjectileKind, TowerTier, UnitKind};
    use stronghold_core::error::GameError;
    use stronghold_core::events::GameEvent;
    use stronghold_core::timer::{PollTimer, REPEAT_INFINITE};
    use stronghold_core::types::{Body, Vec2};

    use crate::balance::WaveBalance;
    use crate::engine::{GameWorld, WorldConfig};
    use crate::systems::{self, homing, movement, HitResult};
    use crate::world_setup;

    fn active_world() -> GameWorld {
        let mut gw = GameWorld::new(WorldConfig::default());
        gw.init_state();
        gw
    }

    fn world_with_quota(quota: u32) -> GameWorld {
        let balance = WaveBalance {
            mob_quota: quota,
            ..WaveBalance::default()
        };
        let mut gw = GameWorld::new(WorldConfig {
            balance,
            ..WorldConfig::default()
        });
        gw.init_state();
        gw
    }

    /// Minimal mob for scenario worlds driven directly through systems.
    fn scenario_mob(world: &mut World, center: Vec2, size: f64, vel: Vec2) -> Entity {
        let mut movement = PollTimer::create(MOB_MOVE_INTERVAL_MS, REPEAT_INFINITE);
        movement.start();
        let mut strike = PollTimer::create(MOB_STRIKE_INTERVAL_MS, REPEAT_INFINITE);
        strike.start();
        world.spawn((
            Unit {
                id: 99,
                kind: UnitKind::Mob,
                destroyed: false,
            },
            Mob {
                wave: 1,
                damage: 5,
                speed: 1.0,
                created: true,
                movement,
                strike,
            },
            Body::from_center(center, Vec2::splat(size)),
            Health::full(50),
            Velocity(vel),
        ))
    }

    // ---- init / reset ----

    #[test]
    fn test_init_state_spawns_statue_and_tower() {
        let mut gw = active_world();
        let snapshot = gw.tick(0);
        // Tick 0 also activates the first mob of the wave.
        let kinds: Vec<UnitKind> = snapshot.units.iter().map(|u| u.kind).collect();
        assert_eq!(
            kinds,
            vec![UnitKind::Statue, UnitKind::Tower, UnitKind::Mob]
        );
        assert_eq!(snapshot.wave, 1);
        assert_eq!(snapshot.phase, GamePhase::Active);
        assert_eq!(snapshot.units[0].health, Some(STATUE_MAX_HEALTH));
    }

    #[test]
    fn test_init_state_twice_is_a_full_reset() {
        let mut gw = active_world();
        gw.tick(0);
        gw.tick(1500);
        assert_eq!(gw.cur_mob_count(), 2);
        assert_eq!(gw.world_time_secs(), 1);

        gw.init_state();
        assert_eq!(gw.cur_mob_count(), 0);
        assert_eq!(gw.used_mob_count(), 0);
        assert_eq!(gw.wave(), 1);
        assert_eq!(gw.world_time_secs(), 0);
        assert_eq!(gw.units().len(), 2);
    }

    #[test]
    fn test_tick_before_init_is_inert() {
        let mut gw = GameWorld::new(WorldConfig::default());
        let snapshot = gw.tick(500);
        assert_eq!(snapshot.phase, GamePhase::Idle);
        assert!(snapshot.units.is_empty());
        assert!(!gw.spawn_mob(1000));
    }

    #[test]
    fn test_purge_and_reset_returns_to_idle() {
        let mut gw = active_world();
        gw.tick(0);
        gw.purge_and_reset();
        assert_eq!(gw.phase(), GamePhase::Idle);
        assert!(gw.units().is_empty());
        let snapshot = gw.tick(100);
        assert!(snapshot.units.is_empty());
    }

    // ---- mob regen ----

    #[test]
    fn test_first_spawn_is_unconditional() {
        let mut gw = active_world();
        assert!(gw.spawn_mob(77));
        assert_eq!(gw.cur_mob_count(), 1);
        assert_eq!(gw.used_mob_count(), 1);
    }

    #[test]
    fn test_regen_is_rate_limited_not_queued() {
        let mut gw = active_world();
        assert!(gw.spawn_mob(1000));
        assert!(!gw.spawn_mob(1500));
        // Exactly one interval elapsed is still too soon.
        assert!(!gw.spawn_mob(2000));
        assert!(gw.spawn_mob(2001));
        assert_eq!(gw.used_mob_count(), 2);
    }

    #[test]
    fn test_regen_stops_at_quota() {
        let mut gw = world_with_quota(3);
        for i in 0..5u64 {
            gw.spawn_mob(i * 2000);
        }
        assert_eq!(gw.used_mob_count(), 3);
        assert_eq!(gw.cur_mob_count(), 3);
    }

    #[test]
    fn test_backwards_timestamp_clamps_delta() {
        let mut gw = active_world();
        gw.tick(0);
        gw.tick(1500);
        assert_eq!(gw.world_time_secs(), 1);
        assert_eq!(gw.cur_mob_count(), 2);
        let x = gw.units()[2].x;

        // A clock rewind clamps the elapsed time to zero: no timer
        // fires, no mob regenerates, nothing moves.
        let snapshot = gw.tick(700);
        assert_eq!(gw.world_time_secs(), 1);
        assert_eq!(gw.cur_mob_count(), 2);
        assert_eq!(gw.units()[2].x, x);
        assert!(snapshot.events.is_empty());

        // Time resumes from the rewound timestamp.
        gw.tick(2000);
        assert_eq!(gw.world_time_secs(), 2);
    }

    #[test]
    fn test_tick_drives_regen() {
        let mut gw = active_world();
        gw.tick(0);
        assert_eq!(gw.cur_mob_count(), 1);
        gw.tick(500);
        assert_eq!(gw.cur_mob_count(), 1);
        gw.tick(1100);
        assert_eq!(gw.cur_mob_count(), 2);
    }

    // ---- hits and the destruction sweep ----

    #[test]
    fn test_hit_is_idempotent_once_destroyed() {
        let mut gw = world_with_quota(1);
        let snapshot = gw.tick(0);
        let mob_id = snapshot.units[2].id;

        assert_eq!(gw.hit_unit(mob_id, 999), HitResult::Destroyed);
        assert_eq!(gw.hit_unit(mob_id, 999), HitResult::Ignored);

        let snapshot = gw.tick(10);
        assert_eq!(snapshot.cur_mob_count, 0);
        assert_eq!(snapshot.dead_mob_count, 1);
        assert!(snapshot
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::MobDestroyed { id } if *id == mob_id)));

        // The unit is gone; repeated hits change nothing.
        assert_eq!(gw.hit_unit(mob_id, 1), HitResult::Ignored);
        let snapshot = gw.tick(20);
        assert_eq!(snapshot.dead_mob_count, 1);
    }

    #[test]
    fn test_partial_hit_reports_remaining() {
        let mut gw = world_with_quota(1);
        let snapshot = gw.tick(0);
        let mob_id = snapshot.units[2].id;
        let full = snapshot.units[2].health.unwrap();
        assert_eq!(
            gw.hit_unit(mob_id, 7),
            HitResult::Damaged {
                remaining: full - 7
            }
        );
    }

    #[test]
    fn test_wave_cleared_needs_full_quota_dead() {
        let mut gw = world_with_quota(1);
        let snapshot = gw.tick(0);
        assert!(!gw.wave_cleared());
        gw.hit_unit(snapshot.units[2].id, 999);
        gw.tick(10);
        assert!(gw.wave_cleared());
    }

    // ---- waves ----

    #[test]
    fn test_next_wave_resets_counters_and_scales_stats() {
        let mut gw = world_with_quota(1);
        let snapshot = gw.tick(0);
        gw.hit_unit(snapshot.units[2].id, 999);
        gw.tick(10);
        assert_eq!(gw.dead_mob_count(), 1);

        gw.next_wave();
        assert_eq!(gw.wave(), 2);
        assert_eq!(gw.cur_mob_count(), 0);
        assert_eq!(gw.dead_mob_count(), 0);
        assert_eq!(gw.used_mob_count(), 0);

        // The regen schedule is rearmed: the next tick spawns at once,
        // with wave-2 stats.
        let snapshot = gw.tick(20);
        let mob = snapshot
            .units
            .iter()
            .find(|u| u.kind == UnitKind::Mob)
            .unwrap();
        assert_eq!(mob.max_health, Some(MOB_BASE_HEALTH + MOB_HEALTH_PER_WAVE));
        assert!(snapshot
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::MobSpawned { wave: 2, .. })));
    }

    #[test]
    fn test_next_wave_despawns_survivors() {
        let mut gw = active_world();
        gw.tick(0);
        gw.tick(1100);
        assert_eq!(gw.cur_mob_count(), 2);
        gw.next_wave();
        assert!(gw.units().iter().all(|u| u.kind != UnitKind::Mob));
    }

    // ---- movement and strikes ----

    #[test]
    fn test_mob_marches_toward_statue() {
        let mut gw = active_world();
        gw.tick(0);
        let before = gw.units()[2].x;
        gw.tick(20);
        let after = gw.units()[2].x;
        assert!(after > before, "mob advances toward the statue");
    }

    #[test]
    fn test_mob_in_contact_strikes_on_cadence() {
        let mut gw = world_with_quota(1);
        let snapshot = gw.tick(0);
        let mob_id = snapshot.units[2].id;
        let mob = gw.entity_of(mob_id).unwrap();
        gw.world_mut()
            .get::<&mut Body>(mob)
            .unwrap()
            .move_to(Vec2::new(STATUE_X, STATUE_Y));

        let snapshot = gw.tick(10);
        assert_eq!(snapshot.units[0].health, Some(STATUE_MAX_HEALTH));

        let snapshot = gw.tick(520);
        assert_eq!(
            snapshot.units[0].health,
            Some(STATUE_MAX_HEALTH - MOB_BASE_DAMAGE)
        );
        assert!(snapshot
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::StatueStruck { .. })));
        // In contact the mob stands still.
        assert_eq!(snapshot.units[2].x, STATUE_X);
    }

    #[test]
    fn test_statue_destruction_ends_the_game() {
        let mut gw = world_with_quota(1);
        let snapshot = gw.tick(0);
        let statue_id = snapshot.units[0].id;
        assert_eq!(gw.hit_unit(statue_id, 9999), HitResult::Destroyed);

        let snapshot = gw.tick(10);
        assert!(snapshot.game_over);
        assert_eq!(snapshot.phase, GamePhase::GameOver);
        assert!(snapshot
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::StatueDestroyed)));
        assert!(snapshot.units.iter().all(|u| u.kind != UnitKind::Statue));

        // Further ticks advance nothing.
        let tick = gw.time().tick;
        gw.tick(5000);
        assert_eq!(gw.time().tick, tick);
    }

    // ---- towers and projectiles ----

    #[test]
    fn test_tower_fires_at_mob_in_range() {
        let mut gw = active_world();
        gw.spawn_test_tower(Vec2::new(60.0, 200.0), TowerTier::Standard);
        gw.tick(0);
        let snapshot = gw.tick(1100);
        assert!(snapshot
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::ProjectileLaunched { .. })));
        assert!(snapshot
            .units
            .iter()
            .any(|u| u.kind == UnitKind::Projectile));
    }

    #[test]
    fn test_projectiles_eventually_destroy_the_mob() {
        let mut gw = world_with_quota(1);
        gw.spawn_test_tower(Vec2::new(60.0, 200.0), TowerTier::Standard);
        let mut destroyed = false;
        for i in 0..1000u64 {
            let snapshot = gw.tick(i * 10);
            if snapshot.dead_mob_count >= 1 {
                destroyed = true;
                break;
            }
        }
        assert!(destroyed, "the mob falls to tower fire");
        assert!(!gw.game_over());
    }

    #[test]
    fn test_unit_at_prefers_last_added() {
        let mut gw = active_world();
        let second = gw.spawn_test_tower(Vec2::new(400.0, 500.0), TowerTier::Standard);
        // (410, 510) is inside both the starting tower and the new one.
        let hit = gw.unit_at(Vec2::new(410.0, 510.0)).unwrap();
        assert_eq!(hit.id, second);
        assert!(gw.unit_at(Vec2::new(1900.0, 1100.0)).is_none());
    }

    // ---- deploy mode ----

    #[test]
    fn test_place_tower_requires_a_held_tower() {
        let mut gw = active_world();
        assert_eq!(
            gw.place_tower(Vec2::new(1500.0, 900.0)),
            Err(GameError::NothingInHand)
        );
    }

    #[test]
    fn test_failed_placement_keeps_the_tower_in_hand() {
        let mut gw = active_world();
        gw.enter_deploy_mode().unwrap();
        // The statue blocks its own footprint.
        let err = gw.place_tower(Vec2::new(STATUE_X, STATUE_Y)).unwrap_err();
        assert!(matches!(err, GameError::SpotOccupied { .. }));
        assert!(gw.is_deploy_mode());

        assert!(matches!(
            gw.place_tower(Vec2::new(1990.0, 100.0)),
            Err(GameError::OutOfBounds { .. })
        ));
        assert!(gw.is_deploy_mode());

        let id = gw.place_tower(Vec2::new(1500.0, 900.0)).unwrap();
        assert!(!gw.is_deploy_mode());
        assert!(gw.units().iter().any(|u| u.id == id));
    }

    #[test]
    fn test_cancel_deploy_drops_the_hand() {
        let mut gw = active_world();
        gw.enter_deploy_mode().unwrap();
        gw.cancel_deploy();
        assert!(!gw.is_deploy_mode());
        assert_eq!(
            gw.place_tower(Vec2::new(1500.0, 900.0)),
            Err(GameError::NothingInHand)
        );
    }

    // ---- freezing ----

    #[test]
    fn test_freeze_unit_halts_movement() {
        let mut gw = active_world();
        let snapshot = gw.tick(0);
        let mob_id = snapshot.units[2].id;
        gw.freeze_unit(mob_id).unwrap();

        let before = gw.units()[2].x;
        gw.tick(50);
        assert_eq!(gw.units()[2].x, before, "frozen mob stands still");

        gw.unfreeze_unit(mob_id).unwrap();
        gw.tick(100);
        assert!(gw.units()[2].x > before);
    }

    #[test]
    fn test_freeze_unknown_unit_fails() {
        let mut gw = active_world();
        assert_eq!(gw.freeze_unit(777), Err(GameError::UnitGone(777)));
    }

    // ---- homing scenarios ----

    #[test]
    fn test_projectile_steps_toward_stationary_target() {
        let mut world = World::new();
        let target = world.spawn((
            Unit {
                id: 1,
                kind: UnitKind::Statue,
                destroyed: false,
            },
            Statue,
            Body::from_center(Vec2::new(10.0, 0.0), Vec2::splat(4.0)),
            Health::full(100),
        ));
        let mut units = Vec::new();
        let mut next_id = 2;
        let shot = world_setup::spawn_projectile(
            &mut world,
            &mut units,
            &mut next_id,
            Vec2::ZERO,
            target,
            ProjectileKind::Normal,
            5,
        );

        homing::run(&mut world, PROJECTILE_MOVE_INTERVAL_MS);
        let center = world.get::<&Body>(shot).unwrap().center();
        assert!((center - Vec2::new(PROJECTILE_SPEED, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_projectile_leads_a_moving_mob() {
        let mut world = World::new();
        let target = scenario_mob(&mut world, Vec2::new(10.0, 0.0), 2.0, Vec2::new(1.0, 0.0));
        let mut units = Vec::new();
        let mut next_id = 100;
        let shot = world_setup::spawn_projectile(
            &mut world,
            &mut units,
            &mut next_id,
            Vec2::ZERO,
            target,
            ProjectileKind::Normal,
            5,
        );

        homing::run(&mut world, PROJECTILE_MOVE_INTERVAL_MS);
        let center = world.get::<&Body>(shot).unwrap().center();
        // Base step (3, 0) plus the mob's last displacement (1, 0).
        assert!((center - Vec2::new(PROJECTILE_SPEED + 1.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_projectile_self_destroys_on_dead_target() {
        let mut world = World::new();
        let target = scenario_mob(&mut world, Vec2::new(10.0, 0.0), 2.0, Vec2::ZERO);
        let mut units = Vec::new();
        let mut next_id = 100;
        let shot = world_setup::spawn_projectile(
            &mut world,
            &mut units,
            &mut next_id,
            Vec2::ZERO,
            target,
            ProjectileKind::Normal,
            5,
        );
        world.get::<&mut Unit>(target).unwrap().destroyed = true;

        homing::run(&mut world, PROJECTILE_MOVE_INTERVAL_MS);
        assert!(world.get::<&Unit>(shot).unwrap().destroyed);
        assert_eq!(world.get::<&Health>(target).unwrap().current, 50);
    }

    #[test]
    fn test_impact_requires_full_containment() {
        let mut world = World::new();
        // Big target; the shot spawns already inside its hit rect.
        let target = scenario_mob(&mut world, Vec2::ZERO, 100.0, Vec2::ZERO);
        let mut units = Vec::new();
        let mut next_id = 100;
        let shot = world_setup::spawn_projectile(
            &mut world,
            &mut units,
            &mut next_id,
            Vec2::ZERO,
            target,
            ProjectileKind::Normal,
            5,
        );

        homing::run(&mut world, PROJECTILE_MOVE_INTERVAL_MS);
        assert!(world.get::<&Unit>(shot).unwrap().destroyed);
        assert_eq!(world.get::<&Health>(target).unwrap().current, 45);
    }

    #[test]
    fn test_ice_impact_freezes_then_thaws() {
        let mut world = World::new();
        let target = scenario_mob(&mut world, Vec2::ZERO, 100.0, Vec2::ZERO);
        // Statue far away so the movement system has an objective.
        world.spawn((
            Unit {
                id: 1,
                kind: UnitKind::Statue,
                destroyed: false,
            },
            Statue,
            Body::from_center(Vec2::new(1000.0, 1000.0), Vec2::splat(10.0)),
            Health::full(100),
        ));
        let mut units = Vec::new();
        let mut next_id = 100;
        world_setup::spawn_projectile(
            &mut world,
            &mut units,
            &mut next_id,
            Vec2::ZERO,
            target,
            ProjectileKind::Ice,
            5,
        );

        homing::run(&mut world, PROJECTILE_MOVE_INTERVAL_MS);
        assert!(world.get::<&Frozen>(target).is_ok());
        assert!(world.get::<&Mob>(target).unwrap().movement.is_paused());

        let mut events = Vec::new();
        movement::run(&mut world, ICE_FREEZE_MS, &mut events);
        assert!(world.get::<&Frozen>(target).is_err(), "freeze expired");
        assert!(!world.get::<&Mob>(target).unwrap().movement.is_paused());
    }

    #[test]
    fn test_timer_pause_helper_covers_all_timers() {
        let mut world = World::new();
        let mob = scenario_mob(&mut world, Vec2::ZERO, 2.0, Vec2::ZERO);
        systems::set_timers_paused(&mut world, mob, true);
        assert!(world.get::<&Mob>(mob).unwrap().movement.is_paused());
        assert!(world.get::<&Mob>(mob).unwrap().strike.is_paused());
        systems::set_timers_paused(&mut world, mob, false);
        assert!(!world.get::<&Mob>(mob).unwrap().movement.is_paused());
    }

    // ---- commands, pause, determinism ----

    #[test]
    fn test_commands_drain_at_tick_boundary() {
        let mut gw = GameWorld::new(WorldConfig::default());
        gw.queue_command(PlayerCommand::StartGame);
        gw.queue_command(PlayerCommand::EnterDeployMode);
        gw.queue_command(PlayerCommand::PlaceTower { x: 1500.0, y: 900.0 });
        let snapshot = gw.tick(0);
        assert_eq!(snapshot.phase, GamePhase::Active);
        assert!(!snapshot.deploy_mode);
        let towers = snapshot
            .units
            .iter()
            .filter(|u| u.kind == UnitKind::Tower)
            .count();
        assert_eq!(towers, 2);
        assert!(snapshot
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::TowerPlaced { .. })));
    }

    #[test]
    fn test_pause_stops_time_resume_continues() {
        let mut gw = active_world();
        gw.tick(0);
        gw.tick(1500);
        assert_eq!(gw.world_time_secs(), 1);
        let tick = gw.time().tick;

        gw.queue_command(PlayerCommand::Pause);
        gw.tick(2000);
        gw.tick(10_000);
        assert_eq!(gw.world_time_secs(), 1);
        assert_eq!(gw.time().tick, tick);
        assert_eq!(gw.phase(), GamePhase::Paused);

        gw.queue_command(PlayerCommand::Resume);
        gw.tick(10_500);
        assert_eq!(gw.world_time_secs(), 2);
        assert!(gw.time().tick > tick);
    }

    #[test]
    fn test_same_seed_same_commands_same_run() {
        let run = || {
            let mut gw = GameWorld::new(WorldConfig::default());
            gw.queue_command(PlayerCommand::StartGame);
            let mut log = Vec::new();
            for i in 0..100u64 {
                if i == 20 {
                    gw.queue_command(PlayerCommand::EnterDeployMode);
                    gw.queue_command(PlayerCommand::PlaceTower { x: 1500.0, y: 900.0 });
                }
                let snapshot = gw.tick(i * 50);
                log.push(serde_json::to_string(&snapshot).unwrap());
            }
            log
        };
        assert_eq!(run(), run());
    }
}
