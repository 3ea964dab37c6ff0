//! Shooting domain — pointer-down → lock или выстрел
//!
//! Содержит:
//! - PointerAction + classify_pointer_down (state machine Unlocked/Locked)
//! - ShotContext (SystemParam: камера, поверхности, палитра, звуки, rng, clock)
//! - handle_pointer_down (system) и ShotHit (event)

use bevy::prelude::*;

use crate::RangeSet;

pub mod components;
pub mod systems;

pub use components::*;
pub use systems::*;

pub struct ShootingPlugin;

impl Plugin for ShootingPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ShotHit>()
            .add_systems(Update, handle_pointer_down.in_set(RangeSet::Shooting));
    }
}
