//! Decal systems — spawn, timed cleanup, idempotent disposal

use bevy::prelude::*;
use std::time::Duration;

use super::components::{Decal, DecalLifetime, DecalRemoved};
use crate::logger;
use crate::picking::SurfaceHit;
use crate::stats::RangeStats;

/// Transform decal'а: в точке попадания, local +Z вдоль нормали
pub fn decal_transform(hit: &SurfaceHit, size: f32) -> Transform {
    Transform {
        translation: hit.point,
        rotation: Quat::from_rotation_arc(Vec3::Z, hit.normal),
        scale: Vec3::splat(size),
    }
}

/// Spawn decal + его собственный deadline удаления
///
/// `now` — Time::elapsed текущего кадра, `lifetime` — через сколько удалить.
pub fn spawn_decal(
    commands: &mut Commands,
    hit: &SurfaceHit,
    size: f32,
    material: usize,
    now: Duration,
    lifetime: Duration,
) -> Entity {
    commands
        .spawn((
            Name::new("decal"),
            decal_transform(hit, size),
            Decal {
                surface: hit.surface,
                normal: hit.normal,
                size,
                material,
                spawned_at: now,
            },
            DecalLifetime {
                despawn_at: now + lifetime,
            },
        ))
        .id()
}

/// Удаляет decal, если он ещё существует
///
/// Идемпотентно: повторный вызов (или вызов для уже снесённой сцены)
/// возвращает `false` и ничего не делает. Не-decal entities не трогаем.
pub fn dispose_decal(world: &mut World, decal: Entity) -> bool {
    if world.get::<Decal>(decal).is_none() {
        return false;
    }

    if !world.despawn(decal) {
        return false;
    }

    world.send_event(DecalRemoved { decal });
    if let Some(mut stats) = world.get_resource_mut::<RangeStats>() {
        stats.decals_removed += 1;
    }

    true
}

/// System: удаляет decals с истёкшим deadline
///
/// Decal живёт, пока `Time::elapsed < despawn_at`; удаление — в этом же кадре,
/// через command queue (apply в конце schedule).
///
/// `Time` здесь virtual: delta кадра ограничена `Time<Virtual>::max_delta`
/// (250ms по умолчанию). После долгого stall'а хоста decal живёт дольше
/// 3000ms wall clock, но никогда не меньше.
pub fn expire_decals(
    mut commands: Commands,
    decals: Query<(Entity, &DecalLifetime), With<Decal>>,
    time: Res<Time>,
) {
    let now = time.elapsed();

    for (entity, lifetime) in decals.iter() {
        if !lifetime.expired(now) {
            continue;
        }

        logger::log(&format!("🧽 Decal {:?} expired at {:?}", entity, now));
        commands.queue(move |world: &mut World| {
            dispose_decal(world, entity);
        });
    }
}
