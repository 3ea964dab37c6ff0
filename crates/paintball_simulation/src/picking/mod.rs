//! Picking domain — raycast из центра viewport
//!
//! Архитектура:
//! - ShooterCamera: perspective камера, луч через центр экрана = camera forward
//! - PickSurface + Collider (rapier shape): всё, во что можно попасть
//! - nearest_hit: brute-force cast по всем surfaces, минимальная дистанция
//!
//! Rapier pipeline (RapierContext) не нужен: используем только геометрию
//! Collider, поэтому picking работает в headless App без physics step.

use bevy::prelude::*;
use bevy_rapier3d::prelude::Collider;

/// Камера стрелка
///
/// `Transform` = глаз, `forward()` = направление взгляда.
/// `weapon` — модель оружия, привязанная к камере (может отсутствовать,
/// если asset не загрузился).
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct ShooterCamera {
    pub weapon: Option<Entity>,
}

/// Маркер: поверхность участвует в picking
///
/// Crosshair, decals и оружие этот маркер НЕ получают.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PickSurface;

/// Результат picking: ближайшая поверхность на луче
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    pub surface: Entity,
    /// Точка попадания (world space)
    pub point: Vec3,
    /// Нормаль поверхности в точке попадания (unit length)
    pub normal: Vec3,
    /// Дистанция от origin луча
    pub distance: f32,
}

/// Луч через центр viewport камеры
pub fn center_ray(camera: &Transform) -> Ray3d {
    Ray3d::new(camera.translation, camera.forward())
}

/// Ближайшее пересечение луча с поверхностями
///
/// `surfaces`: (entity, world transform, collider shape).
/// Попадания дальше `max_distance` игнорируются.
pub fn nearest_hit<'a>(
    ray: Ray3d,
    max_distance: f32,
    surfaces: impl IntoIterator<Item = (Entity, &'a Transform, &'a Collider)>,
) -> Option<SurfaceHit> {
    let mut best: Option<SurfaceHit> = None;

    for (entity, transform, collider) in surfaces {
        let Some(intersection) = collider.cast_ray_and_get_normal(
            transform.translation,
            transform.rotation,
            ray.origin,
            *ray.direction,
            max_distance,
            true,
        ) else {
            continue;
        };

        let distance = intersection.time_of_impact;
        if best.is_some_and(|b| b.distance <= distance) {
            continue;
        }

        best = Some(SurfaceHit {
            surface: entity,
            point: intersection.point,
            normal: intersection.normal.normalize_or(Vec3::Y),
            distance,
        });
    }

    best
}
