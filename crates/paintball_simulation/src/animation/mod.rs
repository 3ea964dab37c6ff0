//! Keyframe animation — таблицы ключей для Transform свойств
//!
//! Используется для:
//! - recoil ("jerk") оружия после выстрела (Once, 20fps × speed 20 = 0.1s)
//! - turntable вращения display модели (Cycle, 10fps × speed 0.5)
//!
//! Интерполяция линейная, за пределами таблицы — clamp к крайним ключам.

use bevy::prelude::*;

use crate::config::RecoilConfig;
use crate::RangeSet;

/// Ключ: значение свойства в кадре `frame`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    pub frame: f32,
    pub value: f32,
}

impl Keyframe {
    pub const fn new(frame: f32, value: f32) -> Self {
        Self { frame, value }
    }
}

/// Какое свойство Transform анимирует track
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatedProperty {
    PositionY,
    PositionZ,
    /// Yaw (остальные углы сохраняются)
    RotationY,
}

impl AnimatedProperty {
    pub fn write(&self, transform: &mut Transform, value: f32) {
        match self {
            AnimatedProperty::PositionY => transform.translation.y = value,
            AnimatedProperty::PositionZ => transform.translation.z = value,
            AnimatedProperty::RotationY => {
                let (_, x, z) = transform.rotation.to_euler(EulerRot::YXZ);
                transform.rotation = Quat::from_euler(EulerRot::YXZ, value, x, z);
            }
        }
    }
}

/// Track: ключи одного свойства, отсортированы по frame
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeTrack {
    pub property: AnimatedProperty,
    keys: Vec<Keyframe>,
}

impl KeyframeTrack {
    pub fn new(property: AnimatedProperty, mut keys: Vec<Keyframe>) -> Self {
        keys.sort_by(|a, b| a.frame.total_cmp(&b.frame));
        Self { property, keys }
    }

    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    pub fn last_frame(&self) -> f32 {
        self.keys.last().map(|k| k.frame).unwrap_or(0.0)
    }

    /// Значение в кадре `frame` (линейно между соседними ключами)
    pub fn sample(&self, frame: f32) -> Option<f32> {
        let first = self.keys.first()?;
        let last = self.keys.last()?;

        if frame <= first.frame {
            return Some(first.value);
        }
        if frame >= last.frame {
            return Some(last.value);
        }

        let next = self.keys.iter().position(|k| k.frame > frame)?;
        let (a, b) = (self.keys[next - 1], self.keys[next]);
        let t = (frame - a.frame) / (b.frame - a.frame);

        Some(a.value + (b.value - a.value) * t)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopMode {
    /// Проигрывается один раз, финальная поза остаётся
    Once,
    /// Зацикливается бесконечно
    Cycle,
}

/// Clip: набор tracks с общим frame rate
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeClip {
    pub name: String,
    pub frame_rate: f32,
    pub tracks: Vec<KeyframeTrack>,
    pub loop_mode: LoopMode,
}

impl KeyframeClip {
    /// Длина clip'а в кадрах (последний ключ среди всех tracks)
    pub fn length_frames(&self) -> f32 {
        self.tracks
            .iter()
            .map(KeyframeTrack::last_frame)
            .fold(0.0, f32::max)
    }

    /// Длительность при speed ratio `speed`
    pub fn duration_secs(&self, speed: f32) -> f32 {
        if self.frame_rate <= 0.0 || speed <= 0.0 {
            return 0.0;
        }
        self.length_frames() / (self.frame_rate * speed)
    }

    pub fn apply(&self, frame: f32, transform: &mut Transform) {
        for track in &self.tracks {
            if let Some(value) = track.sample(frame) {
                track.property.write(transform, value);
            }
        }
    }
}

/// Активная анимация на entity
///
/// Новая вставка заменяет текущую (restart), как повторный выстрел
/// перезапускает recoil. Первый кадр после вставки всегда показывает
/// frame 0, время начинает идти со следующего.
#[derive(Component, Debug, Clone)]
pub struct KeyframeAnimation {
    pub clip: KeyframeClip,
    pub elapsed_frames: f32,
    pub speed: f32,
    started: bool,
}

impl KeyframeAnimation {
    pub fn new(clip: KeyframeClip, speed: f32) -> Self {
        Self {
            clip,
            elapsed_frames: 0.0,
            speed,
            started: false,
        }
    }

    pub fn is_started(&self) -> bool {
        self.started
    }
}

/// Event: на entity запущена анимация
#[derive(Event, Debug, Clone)]
pub struct AnimationStarted {
    pub target: Entity,
    pub clip: String,
}

/// Recoil: ствол подпрыгивает и уходит назад (к стрелку, +Z в local space
/// камеры), затем возвращается
///
/// Ключи строятся от rest позы (не от текущей), поэтому серия быстрых
/// выстрелов не "уводит" оружие.
pub fn recoil_clip(rest: Vec3, config: &RecoilConfig) -> KeyframeClip {
    let fr = config.frame_rate;
    let intensity = config.intensity;

    KeyframeClip {
        name: "recoil".into(),
        frame_rate: fr,
        tracks: vec![
            KeyframeTrack::new(
                AnimatedProperty::PositionY,
                vec![
                    Keyframe::new(0.0, rest.y),
                    Keyframe::new(fr, rest.y + intensity),
                    Keyframe::new(2.0 * fr, rest.y),
                ],
            ),
            KeyframeTrack::new(
                AnimatedProperty::PositionZ,
                vec![
                    Keyframe::new(0.0, rest.z),
                    Keyframe::new(fr, rest.z + intensity * 2.0),
                    Keyframe::new(2.0 * fr, rest.z),
                ],
            ),
        ],
        loop_mode: LoopMode::Once,
    }
}

/// Turntable: полный оборот по yaw за 20 кадров (10fps)
pub fn turntable_clip() -> KeyframeClip {
    const FRAME_RATE: f32 = 10.0;

    KeyframeClip {
        name: "turntable".into(),
        frame_rate: FRAME_RATE,
        tracks: vec![KeyframeTrack::new(
            AnimatedProperty::RotationY,
            vec![
                Keyframe::new(0.0, 0.0),
                Keyframe::new(FRAME_RATE, std::f32::consts::PI),
                Keyframe::new(2.0 * FRAME_RATE, std::f32::consts::TAU),
            ],
        )],
        loop_mode: LoopMode::Cycle,
    }
}

/// System: продвигает все активные анимации и пишет значения в Transform
pub fn advance_keyframe_animations(
    mut commands: Commands,
    mut animated: Query<(Entity, &mut KeyframeAnimation, &mut Transform)>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    for (entity, mut animation, mut transform) in animated.iter_mut() {
        if !animation.started {
            animation.started = true;
            animation.clip.apply(0.0, &mut transform);
            continue;
        }

        let step = delta * animation.clip.frame_rate * animation.speed;
        animation.elapsed_frames += step;

        let length = animation.clip.length_frames();

        match animation.clip.loop_mode {
            LoopMode::Once => {
                if animation.elapsed_frames >= length {
                    animation.clip.apply(length, &mut transform);
                    commands.entity(entity).remove::<KeyframeAnimation>();
                    continue;
                }
            }
            LoopMode::Cycle => {
                if length > 0.0 {
                    animation.elapsed_frames = animation.elapsed_frames.rem_euclid(length);
                }
            }
        }

        let frame = animation.elapsed_frames;
        animation.clip.apply(frame, &mut transform);
    }
}

pub struct KeyframeAnimationPlugin;

impl Plugin for KeyframeAnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AnimationStarted>().add_systems(
            Update,
            advance_keyframe_animations.in_set(RangeSet::Animation),
        );
    }
}
