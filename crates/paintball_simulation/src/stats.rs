//! Счётчики стрельбища (для headless отчёта и тестов)

use bevy::prelude::*;

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RangeStats {
    pub lock_requests: u32,
    pub shots_fired: u32,
    /// Выстрелы в Locked, луч ни во что не попал
    pub misses: u32,
    pub decals_spawned: u32,
    pub decals_removed: u32,
    pub sounds_played: u32,
    pub recoils_started: u32,
}

impl RangeStats {
    /// Decals, которые ещё живут
    pub fn live_decals(&self) -> u32 {
        self.decals_spawned.saturating_sub(self.decals_removed)
    }
}
