//! Input domain — pointer events и pointer lock
//!
//! Содержит:
//! - PointerDown / PointerButton (events от host input слоя)
//! - PointerLock (resource: Unlocked / Locked)
//! - PointerLockRequested / PointerLockChanged (handshake с windowing слоем)
//!
//! Shoot handler только ПРОСИТ lock. Переходы PointerLock делает
//! `apply_pointer_lock_changes` по событиям windowing слоя.

use bevy::prelude::*;

use crate::logger;
use crate::RangeSet;

pub mod events;

pub use events::*;

/// Pointer lock state (захвачен ли указатель для mouse look)
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerLock {
    #[default]
    Unlocked,
    Locked,
}

impl PointerLock {
    pub fn is_locked(&self) -> bool {
        matches!(self, PointerLock::Locked)
    }
}

/// System: применяет PointerLockChanged события (в порядке поступления)
pub fn apply_pointer_lock_changes(
    mut changes: EventReader<PointerLockChanged>,
    mut lock: ResMut<PointerLock>,
) {
    for change in changes.read() {
        let next = if change.locked {
            PointerLock::Locked
        } else {
            PointerLock::Unlocked
        };

        if *lock != next {
            logger::log(&format!("🔒 Pointer lock: {:?} → {:?}", *lock, next));
            *lock = next;
        }
    }
}

/// Plugin: pointer events + lock state
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PointerLock>()
            .add_event::<PointerDown>()
            .add_event::<PointerLockRequested>()
            .add_event::<PointerLockChanged>()
            .add_systems(Update, apply_pointer_lock_changes.in_set(RangeSet::Input));
    }
}

/// System: headless windowing — каждый запрос lock удовлетворяется
///
/// Changed событие применяется в RangeSet::Input следующего кадра
/// (как pointerlockchange в браузере — асинхронно).
pub fn grant_pointer_lock_requests(
    mut requests: EventReader<PointerLockRequested>,
    mut changes: EventWriter<PointerLockChanged>,
) {
    if requests.read().count() > 0 {
        changes.write(PointerLockChanged { locked: true });
    }
}

/// Plugin: stand-in windowing слоя для headless симуляции и тестов
///
/// Без него lock никогда не захватывается (никто не отвечает на запрос).
pub struct HeadlessPointerLockPlugin;

impl Plugin for HeadlessPointerLockPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            grant_pointer_lock_requests.after(RangeSet::Shooting),
        );
    }
}
