//! Asset manifest + probing
//!
//! Загрузку/декодирование делает движок (host). Здесь только проверяем, что
//! файл есть: отсутствующий asset → warning + соответствующая фича
//! выключается. Startup никогда не падает.

use bevy::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::decals::SplatterPalette;
use crate::feedback::ShotSounds;
use crate::logger;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssetError {
    #[error("asset not found: {0}")]
    Missing(String),

    #[error("asset is not a file: {0}")]
    NotAFile(String),
}

/// Пути asset'ов стрельбища (относительно asset root)
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct AssetManifest {
    pub world_model: String,
    pub display_model: String,
    pub gun_model: String,
    pub crosshair_texture: String,
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self {
            world_model: "models/city/Lowpoly_City_Free_Pack.obj".into(),
            display_model: "models/human/DinklageLikenessSculpt.glb".into(),
            gun_model: "models/gun/p90.obj".into(),
            crosshair_texture: "textures/crossHair/pngwing.com.png".into(),
        }
    }
}

/// Проверка одного asset'а
pub fn probe_asset(root: impl AsRef<Path>, relative: &str) -> Result<PathBuf, AssetError> {
    let path = root.as_ref().join(relative);

    if !path.exists() {
        return Err(AssetError::Missing(path.display().to_string()));
    }
    if !path.is_file() {
        return Err(AssetError::NotAFile(path.display().to_string()));
    }

    Ok(path)
}

/// Какие опциональные части сцены можно строить
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct AssetAvailability {
    pub world: bool,
    pub display_model: bool,
    pub gun: bool,
    pub crosshair: bool,
    /// Все asset'ы, которые не прошли probe (включая текстуры и звуки)
    pub missing: Vec<String>,
}

impl AssetAvailability {
    /// Всё на месте (тесты / host с собственной загрузкой)
    pub fn all() -> Self {
        Self {
            world: true,
            display_model: true,
            gun: true,
            crosshair: true,
            missing: Vec::new(),
        }
    }

    /// Ничего нет — только ground и камера
    pub fn none() -> Self {
        Self {
            world: false,
            display_model: false,
            gun: false,
            crosshair: false,
            missing: Vec::new(),
        }
    }
}

/// Probe всего manifest'а + текстур палитры + звуков выстрела
///
/// Каждый провал логируется как warning. Текстуры и звуки не выключают фичи:
/// материал остаётся в палитре, звук — в наборе.
pub fn probe_manifest(
    root: impl AsRef<Path>,
    manifest: &AssetManifest,
    palette: &SplatterPalette,
    sounds: &ShotSounds,
) -> AssetAvailability {
    let root = root.as_ref();
    let mut missing = Vec::new();

    let mut check = |what: &str, relative: &str| match probe_asset(root, relative) {
        Ok(_) => true,
        Err(e) => {
            logger::log_warning(&format!("Unable to load {}: {}", what, e));
            missing.push(relative.to_string());
            false
        }
    };

    let world = check("world model", &manifest.world_model);
    let display_model = check("display model", &manifest.display_model);
    let gun = check("gun model", &manifest.gun_model);
    let crosshair = check("crosshair texture", &manifest.crosshair_texture);

    for material in palette.iter() {
        check(&material.name, &material.texture);
    }
    for sound in sounds.iter() {
        check(&sound.name, &sound.path);
    }

    AssetAvailability {
        world,
        display_model,
        gun,
        crosshair,
        missing,
    }
}
