//! Simulation constants and tuning parameters.

// --- World ---

/// Logical world width (world units).
pub const WORLD_WIDTH: f64 = 2000.0;

/// Logical world height (world units).
pub const WORLD_HEIGHT: f64 = 1200.0;

/// World-clock interval: one increment of `world_time_secs`.
pub const WORLD_CLOCK_INTERVAL_MS: u64 = 1000;

// --- Statue ---

pub const STATUE_X: f64 = 500.0;
pub const STATUE_Y: f64 = 300.0;
pub const STATUE_SIZE: f64 = 128.0;
pub const STATUE_MAX_HEALTH: i32 = 100;

// --- Towers ---

/// Footprint a tower occupies, width and height.
pub const TOWER_SPACE_WIDTH: f64 = 96.0;
pub const TOWER_SPACE_HEIGHT: f64 = 96.0;

/// Starting tower placed at world init.
pub const FIRST_TOWER_X: f64 = 367.0;
pub const FIRST_TOWER_Y: f64 = 467.0;

// --- Mobs ---

/// Spawn point for regenerated mobs (top-left corner).
pub const MOB_SPAWN_X: f64 = 90.0;
pub const MOB_SPAWN_Y: f64 = 90.0;

pub const MOB_SIZE: f64 = 64.0;

/// Interval between mob movement steps.
pub const MOB_MOVE_INTERVAL_MS: u64 = 10;

/// Interval between strikes while a mob is in contact with the statue.
pub const MOB_STRIKE_INTERVAL_MS: u64 = 500;

/// Mob quota per wave.
pub const MAX_MOB: u32 = 10;

/// Interval between mob regenerations. Rate limiting, not queueing:
/// a missed interval is not caught up later.
pub const REGEN_INTERVAL_MS: u64 = 1000;

// --- Projectiles ---

pub const PROJECTILE_SIZE: f64 = 16.0;

/// Interval between projectile homing steps.
pub const PROJECTILE_MOVE_INTERVAL_MS: u64 = 10;

/// Displacement per homing step (world units).
pub const PROJECTILE_SPEED: f64 = 3.0;

/// Freeze duration applied by an Ice projectile.
pub const ICE_FREEZE_MS: u64 = 1500;

// --- Wave balance defaults ---

pub const MOB_BASE_HEALTH: i32 = 20;
pub const MOB_HEALTH_PER_WAVE: i32 = 10;
pub const MOB_BASE_DAMAGE: i32 = 5;
pub const MOB_DAMAGE_PER_WAVE: i32 = 2;

/// Displacement per mob movement step (world units).
pub const MOB_BASE_SPEED: f64 = 1.0;
pub const MOB_SPEED_PER_WAVE: f64 = 0.1;

// --- Camera ---

/// How far the camera may overscroll past each world edge (world units).
pub const CAMERA_MARGIN: f64 = 125.0;

pub const ZOOM_MIN: f64 = 0.5;
pub const ZOOM_MAX: f64 = 2.0;

/// Finger travel (device px) below which a gesture still counts as a tap.
pub const TOUCH_SLOP: f64 = 8.0;

/// Per-frame decay applied to the fling velocity by `auto_scroll`.
pub const AUTO_SCROLL_FRICTION: f64 = 0.90;

/// Fling velocity magnitude below which auto-scroll stops.
pub const AUTO_SCROLL_EPSILON: f64 = 0.5;
