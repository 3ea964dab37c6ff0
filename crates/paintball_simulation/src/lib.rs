//! Paintball Range Simulation Core
//!
//! Headless ECS-ядро стрельбища на Bevy 0.16.
//!
//! Pipeline одного клика:
//! PointerDown → lock request | center raycast → decal (+ палитра) →
//! звук + recoil → удаление decal через 3000ms
//!
//! Рендер, аудио и windowing — внешние collaborators (host). ECS владеет
//! только состоянием: pointer lock, decals и их deadlines, анимации.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod animation;
pub mod config;
pub mod decals;
pub mod feedback;
pub mod input;
pub mod logger;
pub mod picking;
pub mod scene;
pub mod shooting;
pub mod stats;

// Re-export основных типов
pub use animation::{AnimationStarted, KeyframeAnimation, KeyframeAnimationPlugin};
pub use config::{ConfigError, RangeConfig};
pub use decals::{Decal, DecalLifetime, DecalPlugin, DecalRemoved, SplatterPalette};
pub use feedback::{FeedbackPlugin, PlaySound, ShotSounds, WeaponModel};
pub use input::{
    HeadlessPointerLockPlugin, InputPlugin, PointerButton, PointerDown, PointerLock,
    PointerLockChanged, PointerLockRequested,
};
pub use picking::{PickSurface, ShooterCamera, SurfaceHit};
pub use scene::{AssetAvailability, RangeHandles, RangeScenePlugin};
pub use shooting::{ShootingPlugin, ShotHit};
pub use stats::RangeStats;

/// Порядок систем в Update (один кадр)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeSet {
    /// Применение PointerLockChanged от windowing слоя
    Input,
    /// Pointer-down → lock request / выстрел
    Shooting,
    /// Keyframe анимации (recoil, turntable)
    Animation,
    /// Удаление decals с истёкшим deadline
    Cleanup,
}

/// Главный plugin стрельбища (всё, кроме построения сцены)
pub struct RangePlugin;

impl Plugin for RangePlugin {
    fn build(&self, app: &mut App) {
        // Seed мог задать create_headless_app — не перетираем
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app.init_resource::<RangeConfig>()
            .init_resource::<RangeStats>()
            .configure_sets(
                Update,
                (
                    RangeSet::Input,
                    RangeSet::Shooting,
                    RangeSet::Animation,
                    RangeSet::Cleanup,
                )
                    .chain(),
            )
            .add_plugins((
                InputPlugin,
                DecalPlugin,
                KeyframeAnimationPlugin,
                FeedbackPlugin,
                ShootingPlugin,
            ));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    logger::init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed));

    app
}

/// Snapshot компонентов `T` для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
