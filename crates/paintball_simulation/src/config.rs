//! Range configuration (RON)
//!
//! Каждая секция `#[serde(default)]` — в файле можно указать только то, что
//! отличается от defaults. Ошибка чтения/парсинга не фатальна: вызывающий
//! логирует и берёт `RangeConfig::default()`.

use bevy::prelude::*;
use serde::Deserialize;
use std::{fs, path::Path, time::Duration};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse RON: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Полный конфиг стрельбища
#[derive(Debug, Deserialize, Resource, Clone, PartialEq, Default)]
#[serde(default)]
pub struct RangeConfig {
    pub shooting: ShootingConfig,
    pub recoil: RecoilConfig,
    pub camera: CameraConfig,
    pub weapon: WeaponConfig,
    pub world: WorldConfig,
    pub display_model: DisplayModelConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ShootingConfig {
    /// Размер decal (куб size × size × size, метры)
    pub decal_size: f32,
    /// Через сколько decal удаляется
    pub decal_lifetime_ms: u64,
    /// Дальность picking ray
    pub max_ray_distance: f32,
}

impl Default for ShootingConfig {
    fn default() -> Self {
        Self {
            decal_size: 4.0,
            decal_lifetime_ms: 3000,
            max_ray_distance: 1000.0,
        }
    }
}

impl ShootingConfig {
    pub fn decal_lifetime(&self) -> Duration {
        Duration::from_millis(self.decal_lifetime_ms)
    }
}

/// Параметры "jerk" анимации оружия
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RecoilConfig {
    /// Кадров в секунду keyframe таблицы
    pub frame_rate: f32,
    /// Подъём по Y; отдача назад по Z = 2 × intensity
    pub intensity: f32,
    /// Speed ratio проигрывания
    pub speed: f32,
}

impl Default for RecoilConfig {
    fn default() -> Self {
        Self {
            frame_rate: 20.0,
            intensity: 0.5,
            speed: 20.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub look_at: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 2.0, 8.0],
            look_at: [0.0, 0.0, 0.0],
        }
    }
}

impl CameraConfig {
    pub fn transform(&self) -> Transform {
        let position = Vec3::from_array(self.position);
        let target = Vec3::from_array(self.look_at);

        // Degenerate look_at (совпадает с позицией) → смотрим вдоль -Z
        if position.distance_squared(target) < f32::EPSILON {
            return Transform::from_translation(position);
        }

        Transform::from_translation(position).looking_at(target, Vec3::Y)
    }
}

/// Оружие относительно камеры (local space камеры, -Z = вперёд)
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WeaponConfig {
    pub offset: [f32; 3],
    pub scale: f32,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            offset: [2.0, -2.0, -5.0],
            scale: 0.5,
        }
    }
}

/// Static prop мира (box collider для picking)
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct WorldProp {
    pub name: String,
    pub position: [f32; 3],
    pub half_extents: [f32; 3],
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// Корень asset'ов (models/, textures/, sounds/)
    pub asset_root: String,
    /// Сдвиг всего мира по Y
    pub lift: f32,
    /// Размер ground plane (ширина = глубина)
    pub ground_size: f32,
    pub props: Vec<WorldProp>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            asset_root: "assets".into(),
            lift: 0.0,
            ground_size: 20.0,
            props: vec![
                WorldProp {
                    name: "house_01".into(),
                    position: [0.0, 5.0, -30.0],
                    half_extents: [8.0, 5.0, 8.0],
                },
                WorldProp {
                    name: "car_01".into(),
                    position: [10.0, 1.0, -10.0],
                    half_extents: [2.0, 1.0, 1.0],
                },
                WorldProp {
                    name: "bench_01".into(),
                    position: [-6.0, 0.5, -4.0],
                    half_extents: [1.5, 0.5, 0.5],
                },
            ],
        }
    }
}

/// Вращающаяся модель на стрельбище
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DisplayModelConfig {
    pub position: [f32; 3],
    pub scale: f32,
    /// Speed ratio turntable анимации
    pub spin_speed: f32,
}

impl Default for DisplayModelConfig {
    fn default() -> Self {
        Self {
            position: [-480.0, 5.0, 450.0],
            scale: 300.0,
            spin_speed: 0.5,
        }
    }
}

impl RangeConfig {
    pub fn from_ron_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(raw)?)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_ron_str(&data)
    }

    /// Конфиг + ошибка (если файл не прочитан/не распарсен — defaults)
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<ConfigError>) {
        match Self::load_from_file(path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }
}
