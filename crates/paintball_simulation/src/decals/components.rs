//! Decal components — splatter palette, decal, lifetime

use bevy::prelude::*;
use rand::Rng;
use std::time::Duration;

/// Splatter material (PBR, albedo с alpha)
#[derive(Debug, Clone, PartialEq)]
pub struct SplatterMaterial {
    /// "blue-splatter", "green-splatter", ...
    pub name: String,
    /// Albedo texture относительно asset root
    pub texture: String,
    pub roughness: f32,
    /// Depth bias против z-fighting с поверхностью
    pub z_offset: f32,
}

impl SplatterMaterial {
    /// `color` → "<color>-splatter" + textures/paintball-splatters/<color>.png
    pub fn from_color(color: &str) -> Self {
        Self {
            name: format!("{color}-splatter"),
            texture: format!("textures/paintball-splatters/{color}.png"),
            roughness: 1.0,
            z_offset: -0.25,
        }
    }
}

/// Фиксированная палитра splatter материалов
///
/// Выбор равномерный (`pick`). Палитра не бывает пустой: `Default` = 3 цвета.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SplatterPalette {
    materials: Vec<SplatterMaterial>,
}

impl Default for SplatterPalette {
    fn default() -> Self {
        Self {
            materials: ["blue", "green", "orange"]
                .into_iter()
                .map(SplatterMaterial::from_color)
                .collect(),
        }
    }
}

impl SplatterPalette {
    /// `None` для пустого списка
    pub fn new(materials: Vec<SplatterMaterial>) -> Option<Self> {
        if materials.is_empty() {
            return None;
        }
        Some(Self { materials })
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SplatterMaterial> {
        self.materials.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SplatterMaterial> {
        self.materials.iter()
    }

    /// Равномерный индекс материала
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        rng.gen_range(0..self.materials.len())
    }
}

/// Decal: отпечаток шарика на поверхности
///
/// Transform decal'а: translation = точка попадания,
/// local +Z = нормаль поверхности, scale = size.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Decal {
    /// Поверхность, на которую спроецирован decal
    pub surface: Entity,
    pub normal: Vec3,
    pub size: f32,
    /// Индекс в SplatterPalette
    pub material: usize,
    /// Time::elapsed на момент создания
    pub spawned_at: Duration,
}

/// Deadline удаления decal'а
///
/// Свой у каждого decal — общих таймеров нет, удаления не влияют друг на друга.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct DecalLifetime {
    /// Time::elapsed, начиная с которого decal удаляется
    pub despawn_at: Duration,
}

impl DecalLifetime {
    pub fn expired(&self, now: Duration) -> bool {
        now >= self.despawn_at
    }
}

/// Event: decal удалён (по таймауту или явно)
#[derive(Event, Debug, Clone, Copy)]
pub struct DecalRemoved {
    pub decal: Entity,
}
