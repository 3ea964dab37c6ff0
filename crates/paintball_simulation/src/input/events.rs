//! Pointer input events
//!
//! Генерируются windowing/input слоем (host) и обрабатываются ECS systems.

use bevy::prelude::Event;

/// Кнопка указателя
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// ЛКМ (button 0)
    Primary,
    /// ПКМ
    Secondary,
    Middle,
}

/// Event: pointer-down над canvas
///
/// # Архитектура
/// - Emit: host input layer (по одному на нажатие)
/// - Consume: `handle_pointer_down` (shooting)
#[derive(Event, Debug, Clone, Copy)]
pub struct PointerDown {
    pub button: PointerButton,
}

impl PointerDown {
    pub fn primary() -> Self {
        Self {
            button: PointerButton::Primary,
        }
    }
}

/// Event: shoot handler просит захватить указатель
///
/// Единственный side effect pointer-down в состоянии Unlocked.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct PointerLockRequested;

/// Event: windowing слой сообщает новое состояние pointer lock
///
/// Единственный источник переходов `PointerLock` (в обе стороны).
#[derive(Event, Debug, Clone, Copy)]
pub struct PointerLockChanged {
    pub locked: bool,
}
