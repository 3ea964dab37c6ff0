//! Scene domain — построение стрельбища и проверка asset'ов
//!
//! Содержит:
//! - AssetManifest / probe_asset / probe_manifest (отсутствующий asset → warning)
//! - build_range / setup_range (ground, props, камера, оружие, crosshair, модель)
//! - RangeHandles (entities сцены)

use bevy::prelude::*;

pub mod assets;
pub mod setup;

pub use assets::*;
pub use setup::*;

/// Plugin: строит сцену в Startup
///
/// Без него сцену собирает host (или тест) сам.
pub struct RangeScenePlugin;

impl Plugin for RangeScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AssetManifest>()
            .add_systems(Startup, setup_range);
    }
}
