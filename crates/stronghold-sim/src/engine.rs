//! `GameWorld` — the headless simulation engine.
//!
//! Owns the hecs world, the insertion-ordered unit list, the wave and
//! regen schedule, the command queue, and per-tick orchestration. Time
//! only moves when `tick(now_ms)` is called with an explicit timestamp,
//! so a fixed seed plus a fixed sequence of commands and timestamps
//! replays the exact same run.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use stronghold_core::commands::PlayerCommand;
use stronghold_core::components::Unit;
use stronghold_core::constants::*;
use stronghold_core::enums::{GamePhase, TowerTier, UnitKind};
use stronghold_core::error::GameError;
use stronghold_core::events::GameEvent;
use stronghold_core::state::{UnitView, WorldSnapshot};
use stronghold_core::timer::{CallbackTimer, TimerHandle, TimerScheduler, REPEAT_INFINITE};
use stronghold_core::types::{Body, Rect, SimTime, Vec2};

use crate::balance::{MobStats, WaveBalance};
use crate::systems;
use crate::world_setup;

/// Construction parameters for a [`GameWorld`].
#[derive(Debug, Clone)]
pub struct WorldConfig {
    /// Seed for the deterministic RNG (tower tier rolls).
    pub seed: u64,
    /// Minimum time between mob activations.
    pub regen_interval_ms: u64,
    pub balance: WaveBalance,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            regen_interval_ms: REGEN_INTERVAL_MS,
            balance: WaveBalance::default(),
        }
    }
}

pub struct GameWorld {
    world: World,
    /// Insertion-ordered unit list — the draw order, and the priority
    /// order (reversed) for point queries.
    units: Vec<Entity>,
    phase: GamePhase,
    wave: u32,
    mob_stats: MobStats,
    cur_mob_count: u32,
    dead_mob_count: u32,
    used_mob_count: u32,
    regen_interval_ms: u64,
    /// Timestamp of the last mob activation; `None` means the next
    /// attempt spawns unconditionally.
    last_regen_at: Option<u64>,
    last_now_ms: Option<u64>,
    in_hand: Option<TowerTier>,
    game_over: bool,
    next_unit_id: u32,
    tick_count: u64,
    seed: u64,
    rng: ChaCha8Rng,
    balance: WaveBalance,
    scheduler: TimerScheduler,
    clock: Option<TimerHandle>,
    /// Seconds of play, bumped by the world-clock timer.
    world_time: Arc<AtomicU64>,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<GameEvent>,
    initialized: bool,
}

impl GameWorld {
    pub fn new(config: WorldConfig) -> Self {
        Self {
            world: World::new(),
            units: Vec::new(),
            phase: GamePhase::Idle,
            wave: 0,
            mob_stats: config.balance.mob_stats(1),
            cur_mob_count: 0,
            dead_mob_count: 0,
            used_mob_count: 0,
            regen_interval_ms: config.regen_interval_ms,
            last_regen_at: None,
            last_now_ms: None,
            in_hand: None,
            game_over: false,
            next_unit_id: 1,
            tick_count: 0,
            seed: config.seed,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            balance: config.balance,
            scheduler: TimerScheduler::new(),
            clock: None,
            world_time: Arc::new(AtomicU64::new(0)),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            initialized: false,
        }
    }

    /// Build the initial world: statue, starting tower, wave 1 armed.
    /// Calling this on a live world is a full reset, not an error.
    pub fn init_state(&mut self) {
        self.world.clear();
        self.units.clear();
        self.scheduler.clear();
        self.events.clear();
        self.despawn_buffer.clear();
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
        self.wave = 1;
        self.mob_stats = self.balance.mob_stats(1);
        self.cur_mob_count = 0;
        self.dead_mob_count = 0;
        self.used_mob_count = 0;
        self.last_regen_at = None;
        self.last_now_ms = None;
        self.in_hand = None;
        self.game_over = false;
        self.next_unit_id = 1;
        self.tick_count = 0;
        self.world_time.store(0, Ordering::Relaxed);

        let seconds = Arc::clone(&self.world_time);
        let mut clock = CallbackTimer::new(WORLD_CLOCK_INTERVAL_MS, REPEAT_INFINITE, move || {
            seconds.fetch_add(1, Ordering::Relaxed);
        });
        clock.start();
        self.clock = Some(self.scheduler.register(clock));

        world_setup::spawn_statue(&mut self.world, &mut self.units, &mut self.next_unit_id);
        world_setup::spawn_tower(
            &mut self.world,
            &mut self.units,
            &mut self.next_unit_id,
            Vec2::new(FIRST_TOWER_X, FIRST_TOWER_Y),
            TowerTier::Standard,
        );

        self.phase = GamePhase::Active;
        self.initialized = true;
        self.events.push(GameEvent::WaveStarted { wave: self.wave });
        log::info!("world initialized, wave {} armed", self.wave);
    }

    /// Tear the world down to the pre-init state.
    pub fn purge_and_reset(&mut self) {
        self.world.clear();
        self.units.clear();
        self.scheduler.clear();
        self.clock = None;
        self.command_queue.clear();
        self.events.clear();
        self.despawn_buffer.clear();
        self.phase = GamePhase::Idle;
        self.wave = 0;
        self.cur_mob_count = 0;
        self.dead_mob_count = 0;
        self.used_mob_count = 0;
        self.last_regen_at = None;
        self.last_now_ms = None;
        self.in_hand = None;
        self.game_over = false;
        self.next_unit_id = 1;
        self.tick_count = 0;
        self.world_time.store(0, Ordering::Relaxed);
        self.initialized = false;
    }

    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Advance the simulation to `now_ms` and return the resulting
    /// snapshot. Queued commands are drained first, then the systems
    /// run in a fixed order while the phase is active.
    pub fn tick(&mut self, now_ms: u64) -> WorldSnapshot {
        self.process_commands();

        if !self.initialized {
            return self.build_snapshot();
        }

        // A timestamp earlier than the last one clamps to zero elapsed
        // time instead of failing.
        let delta_ms = match self.last_now_ms {
            Some(prev) => now_ms.saturating_sub(prev),
            None => 0,
        };
        self.last_now_ms = Some(now_ms);

        if self.phase == GamePhase::Active {
            self.tick_count += 1;
            self.scheduler.advance(delta_ms);
            self.spawn_mob(now_ms);
            systems::attack::run(
                &mut self.world,
                &mut self.units,
                &mut self.next_unit_id,
                delta_ms,
                &mut self.events,
            );
            systems::movement::run(&mut self.world, delta_ms, &mut self.events);
            systems::homing::run(&mut self.world, delta_ms);
            systems::cleanup::run(
                &mut self.world,
                &mut self.units,
                &mut self.despawn_buffer,
                &mut self.cur_mob_count,
                &mut self.dead_mob_count,
                &mut self.game_over,
                &mut self.events,
            );
            if self.game_over {
                self.phase = GamePhase::GameOver;
                log::info!("statue destroyed, game over at wave {}", self.wave);
            }
        }

        self.build_snapshot()
    }

    /// Activate the next mob of the wave if the quota allows and the
    /// regen interval has elapsed. Rate limiting, not queueing — time
    /// missed while the quota was blocked is not caught up later.
    pub fn spawn_mob(&mut self, now_ms: u64) -> bool {
        if !self.initialized {
            log::warn!("spawn_mob before init_state ignored");
            return false;
        }
        if self.used_mob_count >= self.balance.mob_quota {
            return false;
        }
        if let Some(last) = self.last_regen_at {
            if now_ms.saturating_sub(last) <= self.regen_interval_ms {
                return false;
            }
        }
        self.last_regen_at = Some(now_ms);
        let entity = world_setup::spawn_mob(
            &mut self.world,
            &mut self.units,
            &mut self.next_unit_id,
            self.wave,
            &self.mob_stats,
        );
        self.used_mob_count += 1;
        self.cur_mob_count += 1;
        let id = self
            .world
            .get::<&Unit>(entity)
            .map(|unit| unit.id)
            .unwrap_or(0);
        self.events.push(GameEvent::MobSpawned {
            id,
            wave: self.wave,
        });
        true
    }

    /// Advance to the next wave: despawn every remaining mob, reset the
    /// wave counters, and rearm the regen schedule with scaled stats.
    pub fn next_wave(&mut self) {
        if !self.initialized {
            log::warn!("next_wave before init_state ignored");
            return;
        }
        self.despawn_mobs();
        self.wave += 1;
        self.cur_mob_count = 0;
        self.dead_mob_count = 0;
        self.used_mob_count = 0;
        self.mob_stats = self.balance.mob_stats(self.wave);
        self.last_regen_at = None;
        self.events.push(GameEvent::WaveStarted { wave: self.wave });
        log::info!("wave {} armed", self.wave);
    }

    /// True when the wave quota has been fully activated and no mob is
    /// left standing.
    pub fn wave_cleared(&self) -> bool {
        self.used_mob_count >= self.balance.mob_quota && self.cur_mob_count == 0
    }

    fn despawn_mobs(&mut self) {
        self.despawn_buffer.clear();
        for (entity, unit) in self.world.query_mut::<&Unit>() {
            if unit.kind == UnitKind::Mob {
                self.despawn_buffer.push(entity);
            }
        }
        for entity in self.despawn_buffer.drain(..) {
            let _ = self.world.despawn(entity);
            self.units.retain(|&e| e != entity);
        }
    }

    /// Topmost live unit whose hit rect strictly contains `p`. Scans in
    /// reverse insertion order, so the most recently added unit wins.
    pub fn unit_at(&self, p: Vec2) -> Option<UnitView> {
        for &entity in self.units.iter().rev() {
            let Ok(unit) = self.world.get::<&Unit>(entity) else {
                continue;
            };
            if unit.destroyed {
                continue;
            }
            let Ok(body) = self.world.get::<&Body>(entity) else {
                continue;
            };
            if body.hit_rect().contains_point(p) {
                return systems::snapshot::view_unit(&self.world, entity);
            }
        }
        None
    }

    /// Draw list in insertion order.
    pub fn units(&self) -> Vec<UnitView> {
        systems::snapshot::unit_views(&self.world, &self.units)
    }

    /// Pause a unit's internal timers. Position and health are left
    /// untouched; a destroyed unit is skipped with a warning.
    pub fn freeze_unit(&mut self, id: u32) -> Result<(), GameError> {
        self.set_unit_frozen(id, true)
    }

    pub fn unfreeze_unit(&mut self, id: u32) -> Result<(), GameError> {
        self.set_unit_frozen(id, false)
    }

    fn set_unit_frozen(&mut self, id: u32, frozen: bool) -> Result<(), GameError> {
        let entity = self.entity_by_id(id).ok_or(GameError::UnitGone(id))?;
        let destroyed = self
            .world
            .get::<&Unit>(entity)
            .map(|unit| unit.destroyed)
            .unwrap_or(true);
        if destroyed {
            log::warn!("freeze toggle on destroyed unit {id} ignored");
            return Ok(());
        }
        systems::set_timers_paused(&mut self.world, entity, frozen);
        Ok(())
    }

    /// Draw a random tower into the hand, entering deploy mode.
    pub fn enter_deploy_mode(&mut self) -> Result<TowerTier, GameError> {
        if !self.initialized {
            return Err(GameError::NotInitialized);
        }
        let tier = world_setup::random_tier(&mut self.rng);
        self.in_hand = Some(tier);
        Ok(tier)
    }

    pub fn is_deploy_mode(&self) -> bool {
        self.in_hand.is_some()
    }

    /// Return the held tower without placing it.
    pub fn cancel_deploy(&mut self) {
        self.in_hand = None;
    }

    /// Place the held tower with its top-left corner at `pos`. Fails if
    /// nothing is held, the footprint leaves the world, or it overlaps
    /// any live non-projectile unit; a failed placement keeps the tower
    /// in hand.
    pub fn place_tower(&mut self, pos: Vec2) -> Result<u32, GameError> {
        if !self.initialized {
            return Err(GameError::NotInitialized);
        }
        let tier = self.in_hand.ok_or(GameError::NothingInHand)?;
        let footprint =
            Rect::from_pos_size(pos, Vec2::new(TOWER_SPACE_WIDTH, TOWER_SPACE_HEIGHT));
        if footprint.left < 0.0
            || footprint.top < 0.0
            || footprint.right > WORLD_WIDTH
            || footprint.bottom > WORLD_HEIGHT
        {
            return Err(GameError::OutOfBounds { x: pos.x, y: pos.y });
        }
        if let Some(blocking) = self.blocking_unit(&footprint) {
            return Err(GameError::SpotOccupied {
                x: pos.x,
                y: pos.y,
                blocking,
            });
        }
        let entity = world_setup::spawn_tower(
            &mut self.world,
            &mut self.units,
            &mut self.next_unit_id,
            pos,
            tier,
        );
        self.in_hand = None;
        let id = self
            .world
            .get::<&Unit>(entity)
            .map(|unit| unit.id)
            .unwrap_or(0);
        self.events.push(GameEvent::TowerPlaced {
            id,
            x: pos.x,
            y: pos.y,
        });
        Ok(id)
    }

    fn blocking_unit(&self, footprint: &Rect) -> Option<u32> {
        for &entity in self.units.iter().rev() {
            let Ok(unit) = self.world.get::<&Unit>(entity) else {
                continue;
            };
            // Projectiles pass through; they never block placement.
            if unit.destroyed || unit.kind == UnitKind::Projectile {
                continue;
            }
            let Ok(body) = self.world.get::<&Body>(entity) else {
                continue;
            };
            if body.hit_rect().intersects(footprint) {
                return Some(unit.id);
            }
        }
        None
    }

    // --- telemetry ---

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn wave(&self) -> u32 {
        self.wave
    }

    pub fn cur_mob_count(&self) -> u32 {
        self.cur_mob_count
    }

    pub fn dead_mob_count(&self) -> u32 {
        self.dead_mob_count
    }

    pub fn used_mob_count(&self) -> u32 {
        self.used_mob_count
    }

    pub fn mob_quota(&self) -> u32 {
        self.balance.mob_quota
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn world_time_secs(&self) -> u64 {
        self.world_time.load(Ordering::Relaxed)
    }

    pub fn time(&self) -> SimTime {
        SimTime {
            tick: self.tick_count,
            world_time_secs: self.world_time_secs(),
        }
    }

    // --- internals ---

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartGame => self.init_state(),
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                    if let Some(handle) = self.clock {
                        self.scheduler.pause(handle);
                    }
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                    if let Some(handle) = self.clock {
                        self.scheduler.resume(handle);
                    }
                }
            }
            PlayerCommand::EnterDeployMode => {
                if let Err(err) = self.enter_deploy_mode() {
                    log::warn!("enter deploy mode rejected: {err}");
                }
            }
            PlayerCommand::PlaceTower { x, y } => {
                if let Err(err) = self.place_tower(Vec2::new(x, y)) {
                    log::warn!("place tower rejected: {err}");
                }
            }
            PlayerCommand::CancelDeploy => self.cancel_deploy(),
            PlayerCommand::NextWave => self.next_wave(),
        }
    }

    fn build_snapshot(&mut self) -> WorldSnapshot {
        let events = std::mem::take(&mut self.events);
        systems::snapshot::build(
            &self.world,
            &self.units,
            self.time(),
            self.phase,
            self.wave,
            self.cur_mob_count,
            self.dead_mob_count,
            self.used_mob_count,
            self.balance.mob_quota,
            self.is_deploy_mode(),
            self.game_over,
            events,
        )
    }

    fn entity_by_id(&self, id: u32) -> Option<Entity> {
        self.units.iter().copied().find(|&entity| {
            self.world
                .get::<&Unit>(entity)
                .map(|unit| unit.id == id)
                .unwrap_or(false)
        })
    }

    // --- test support ---

    #[cfg(test)]
    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[cfg(test)]
    pub(crate) fn entity_of(&self, id: u32) -> Option<Entity> {
        self.entity_by_id(id)
    }

    #[cfg(test)]
    pub(crate) fn hit_unit(&mut self, id: u32, damage: i32) -> systems::HitResult {
        match self.entity_by_id(id) {
            Some(entity) => systems::apply_hit(&mut self.world, entity, damage),
            None => systems::HitResult::Ignored,
        }
    }

    #[cfg(test)]
    pub(crate) fn spawn_test_tower(&mut self, pos: Vec2, tier: TowerTier) -> u32 {
        let entity = world_setup::spawn_tower(
            &mut self.world,
            &mut self.units,
            &mut self.next_unit_id,
            pos,
            tier,
        );
        self.world
            .get::<&Unit>(entity)
            .map(|unit| unit.id)
            .unwrap_or(0)
    }
}
