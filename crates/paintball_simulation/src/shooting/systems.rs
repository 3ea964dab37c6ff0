//! Shoot interaction handler
//!
//! Pipeline (один pointer-down):
//! PointerDown → classify → [RequestLock | Fire] →
//! center ray → nearest_hit → decal + sound + recoil → DecalLifetime

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_rapier3d::prelude::Collider;

use super::components::{classify_pointer_down, PointerAction, ShotHit};
use crate::animation::AnimationStarted;
use crate::config::RangeConfig;
use crate::decals::{spawn_decal, SplatterPalette};
use crate::feedback::{start_recoil, PlaySound, ShotSounds, WeaponModel};
use crate::input::{PointerDown, PointerLock, PointerLockRequested};
use crate::logger;
use crate::picking::{center_ray, nearest_hit, PickSurface, ShooterCamera};
use crate::stats::RangeStats;
use crate::DeterministicRng;

/// Всё, что нужно выстрелу — явно, без глобального состояния сцены
#[derive(SystemParam)]
pub struct ShotContext<'w, 's> {
    pub commands: Commands<'w, 's>,
    pub cameras: Query<'w, 's, (&'static Transform, &'static ShooterCamera)>,
    pub surfaces: Query<'w, 's, (Entity, &'static Transform, &'static Collider), With<PickSurface>>,
    pub weapons: Query<'w, 's, &'static WeaponModel>,
    pub palette: Res<'w, SplatterPalette>,
    pub sounds: Res<'w, ShotSounds>,
    pub config: Res<'w, RangeConfig>,
    pub rng: ResMut<'w, DeterministicRng>,
    pub time: Res<'w, Time>,
    pub stats: ResMut<'w, RangeStats>,
    pub hits: EventWriter<'w, ShotHit>,
    pub play_sound: EventWriter<'w, PlaySound>,
    pub animations: EventWriter<'w, AnimationStarted>,
}

impl ShotContext<'_, '_> {
    /// Выстрел из центра viewport
    ///
    /// Промах → `None`, никаких эффектов. Попадание → ровно один decal,
    /// один звук, один recoil (если оружие есть) и один deadline удаления.
    pub fn fire(&mut self) -> Option<ShotHit> {
        self.stats.shots_fired += 1;

        let Ok((camera_transform, shooter)) = self.cameras.single() else {
            logger::log_warning("Shot ignored: no single ShooterCamera in scene");
            self.stats.misses += 1;
            return None;
        };
        let weapon = shooter.weapon;

        let ray = center_ray(camera_transform);
        let Some(hit) = nearest_hit(
            ray,
            self.config.shooting.max_ray_distance,
            self.surfaces.iter(),
        ) else {
            self.stats.misses += 1;
            return None;
        };

        // Порядок RNG: материал, затем звук (детерминизм по seed)
        let material = self.palette.pick(&mut self.rng.rng);
        let sound = self.sounds.pick(&mut self.rng.rng);

        let now = self.time.elapsed();
        let decal = spawn_decal(
            &mut self.commands,
            &hit,
            self.config.shooting.decal_size,
            material,
            now,
            self.config.shooting.decal_lifetime(),
        );
        self.stats.decals_spawned += 1;

        if let Some(handle) = self.sounds.get(sound) {
            self.play_sound.write(PlaySound {
                sound: handle.clone(),
            });
            self.stats.sounds_played += 1;
        }

        let recoil = self.recoil(weapon);

        logger::log(&format!(
            "🎯 Splat {:?} on {:?} at {:?} (material {}, sound {})",
            decal, hit.surface, hit.point, material, sound
        ));

        let shot = ShotHit {
            decal,
            surface: hit.surface,
            point: hit.point,
            normal: hit.normal,
            material,
            sound,
            recoil,
        };
        self.hits.write(shot.clone());

        Some(shot)
    }

    /// Recoil на оружии; отсутствующее оружие — только warning
    fn recoil(&mut self, weapon: Option<Entity>) -> Option<Entity> {
        let Some(weapon) = weapon else {
            logger::log_warning("No weapon attached to camera, recoil skipped");
            return None;
        };

        let Ok(model) = self.weapons.get(weapon).copied() else {
            logger::log_warning(&format!(
                "Weapon {:?} has no WeaponModel (despawned?), recoil skipped",
                weapon
            ));
            return None;
        };

        if !start_recoil(
            &mut self.commands,
            &mut self.animations,
            weapon,
            &model,
            &self.config.recoil,
        ) {
            return None;
        }

        self.stats.recoils_started += 1;
        Some(weapon)
    }
}

/// System: обработка pointer-down событий (в порядке поступления)
pub fn handle_pointer_down(
    mut pointer: EventReader<PointerDown>,
    lock: Res<PointerLock>,
    mut lock_requests: EventWriter<PointerLockRequested>,
    mut ctx: ShotContext,
) {
    for event in pointer.read() {
        match classify_pointer_down(*lock, event.button) {
            PointerAction::RequestLock => {
                lock_requests.write(PointerLockRequested);
                ctx.stats.lock_requests += 1;
            }
            PointerAction::Fire => {
                ctx.fire();
            }
            PointerAction::Ignore => {}
        }
    }
}
