//! Shooting state machine и события выстрела
//!
//! Два состояния (PointerLock): Unlocked → Locked.
//! - Unlocked + ЛКМ → запрос lock, выстрела нет
//! - Locked + ЛКМ → выстрел (raycast → decal/sound/recoil)
//! - прочие кнопки → ничего

use bevy::prelude::*;

use crate::input::{PointerButton, PointerLock};

/// Что делать с pointer-down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    RequestLock,
    Fire,
    Ignore,
}

/// Классификация pointer-down по состоянию lock и кнопке
pub fn classify_pointer_down(lock: PointerLock, button: PointerButton) -> PointerAction {
    match (button, lock) {
        (PointerButton::Primary, PointerLock::Unlocked) => PointerAction::RequestLock,
        (PointerButton::Primary, PointerLock::Locked) => PointerAction::Fire,
        _ => PointerAction::Ignore,
    }
}

/// Event: выстрел попал в поверхность (все эффекты уже поставлены в очередь)
#[derive(Event, Debug, Clone)]
pub struct ShotHit {
    pub decal: Entity,
    pub surface: Entity,
    pub point: Vec3,
    pub normal: Vec3,
    /// Индекс в SplatterPalette
    pub material: usize,
    /// Индекс в ShotSounds
    pub sound: usize,
    /// Оружие, на котором запущен recoil (None — оружия нет)
    pub recoil: Option<Entity>,
}
