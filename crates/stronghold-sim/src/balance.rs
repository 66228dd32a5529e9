//! Per-wave mob stat scaling.
//!
//! Exact balance numbers are configuration, not contract: adapters may
//! substitute their own `WaveBalance` when constructing the world.

use serde::{Deserialize, Serialize};

use stronghold_core::constants::*;

/// Parameters deriving mob stats from the wave index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveBalance {
    pub base_health: i32,
    pub health_per_wave: i32,
    pub base_damage: i32,
    pub damage_per_wave: i32,
    pub base_speed: f64,
    pub speed_per_wave: f64,
    /// Mobs spawned per wave.
    pub mob_quota: u32,
}

impl Default for WaveBalance {
    fn default() -> Self {
        Self {
            base_health: MOB_BASE_HEALTH,
            health_per_wave: MOB_HEALTH_PER_WAVE,
            base_damage: MOB_BASE_DAMAGE,
            damage_per_wave: MOB_DAMAGE_PER_WAVE,
            base_speed: MOB_BASE_SPEED,
            speed_per_wave: MOB_SPEED_PER_WAVE,
            mob_quota: MAX_MOB,
        }
    }
}

impl WaveBalance {
    /// Derive the stats for mobs of a given wave (1-based).
    pub fn mob_stats(&self, wave: u32) -> MobStats {
        let n = wave.saturating_sub(1);
        MobStats {
            health: self.base_health + self.health_per_wave * n as i32,
            damage: self.base_damage + self.damage_per_wave * n as i32,
            speed: self.base_speed + self.speed_per_wave * f64::from(n),
        }
    }
}

/// Stats applied to every mob spawned in a wave.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MobStats {
    pub health: i32,
    pub damage: i32,
    pub speed: f64,
}
