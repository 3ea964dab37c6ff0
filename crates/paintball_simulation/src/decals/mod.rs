//! Decals domain — отпечатки paintball шариков
//!
//! Содержит:
//! - SplatterPalette (3 материала, равномерный выбор)
//! - Decal + DecalLifetime (у каждого decal свой deadline)
//! - spawn_decal / expire_decals / dispose_decal
//!
//! Lifecycle: создаётся при попадании → живёт decal_lifetime (3000ms) →
//! удаляется безусловно. Отмены нет.

use bevy::prelude::*;

use crate::RangeSet;

pub mod components;
pub mod systems;

pub use components::*;
pub use systems::*;

pub struct DecalPlugin;

impl Plugin for DecalPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SplatterPalette>()
            .add_event::<DecalRemoved>()
            .register_type::<Decal>()
            .register_type::<DecalLifetime>()
            .add_systems(Update, expire_decals.in_set(RangeSet::Cleanup));
    }
}
