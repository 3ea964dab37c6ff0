//! Feedback domain — звук выстрела и recoil оружия
//!
//! ECS только решает ЧТО проиграть:
//! - PlaySound → audio collaborator (host)
//! - KeyframeAnimation на WeaponModel → advance_keyframe_animations

use bevy::prelude::*;
use rand::Rng;

use crate::animation::{recoil_clip, AnimationStarted, KeyframeAnimation};
use crate::config::RecoilConfig;

/// Звук по handle (имя + путь относительно asset root)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundHandle {
    pub name: String,
    pub path: String,
}

impl SoundHandle {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Набор звуков выстрела (выбор равномерный)
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ShotSounds {
    sounds: Vec<SoundHandle>,
}

impl Default for ShotSounds {
    fn default() -> Self {
        Self {
            sounds: vec![
                SoundHandle::new("paintball1", "sounds/paintball/paintball_shoot1-91934.mp3"),
                SoundHandle::new("paintball2", "sounds/paintball/paintball_shoot2-107651.mp3"),
            ],
        }
    }
}

impl ShotSounds {
    /// `None` для пустого набора
    pub fn new(sounds: Vec<SoundHandle>) -> Option<Self> {
        if sounds.is_empty() {
            return None;
        }
        Some(Self { sounds })
    }

    pub fn len(&self) -> usize {
        self.sounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sounds.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SoundHandle> {
        self.sounds.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SoundHandle> {
        self.sounds.iter()
    }

    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        rng.gen_range(0..self.sounds.len())
    }
}

/// Event: проиграть звук (ECS → audio)
#[derive(Event, Debug, Clone)]
pub struct PlaySound {
    pub sound: SoundHandle,
}

/// Модель оружия, привязанная к камере
///
/// `rest` — поза покоя в local space камеры, от неё строится recoil.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct WeaponModel {
    pub rest: Vec3,
}

/// Запускает recoil на оружии (перезапускает, если уже идёт)
///
/// Возвращает `false`, если weapon entity уже не существует.
pub fn start_recoil(
    commands: &mut Commands,
    started: &mut EventWriter<AnimationStarted>,
    weapon: Entity,
    model: &WeaponModel,
    config: &RecoilConfig,
) -> bool {
    let Ok(mut weapon_commands) = commands.get_entity(weapon) else {
        return false;
    };

    let clip = recoil_clip(model.rest, config);
    let name = clip.name.clone();

    weapon_commands.try_insert(KeyframeAnimation::new(clip, config.speed));

    started.write(AnimationStarted {
        target: weapon,
        clip: name,
    });
    true
}

pub struct FeedbackPlugin;

impl Plugin for FeedbackPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ShotSounds>()
            .add_event::<PlaySound>()
            .register_type::<WeaponModel>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_default_sounds() {
        let sounds = ShotSounds::default();
        assert_eq!(sounds.len(), 2);
        assert!(sounds.iter().all(|s| s.path.starts_with("sounds/paintball/")));
    }

    #[test]
    fn test_both_sounds_get_picked() {
        let sounds = ShotSounds::default();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut seen = [false; 2];

        for _ in 0..100 {
            seen[sounds.pick(&mut rng)] = true;
        }

        assert_eq!(seen, [true, true]);
    }

    #[test]
    fn test_empty_sounds_rejected() {
        assert!(ShotSounds::new(Vec::new()).is_none());
    }
}
