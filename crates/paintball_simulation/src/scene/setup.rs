//! Range construction — ground, props, камера, оружие, crosshair, display model
//!
//! Порядок: ground → world props → display model → camera → weapon/crosshair
//! (дети камеры). Опциональные части строятся только если asset доступен.

use bevy::prelude::*;
use bevy_rapier3d::prelude::Collider;
use std::f32::consts::PI;

use super::assets::{probe_manifest, AssetAvailability, AssetManifest};
use crate::animation::{turntable_clip, AnimationStarted, KeyframeAnimation};
use crate::config::RangeConfig;
use crate::decals::SplatterPalette;
use crate::feedback::{ShotSounds, WeaponModel};
use crate::logger;
use crate::picking::{PickSurface, ShooterCamera};

/// Толщина ground box (top face на y=0)
const GROUND_HALF_THICKNESS: f32 = 0.05;

/// Расстояние crosshair перед камерой
const CROSSHAIR_DISTANCE: f32 = 5.0;
const CROSSHAIR_SIZE: f32 = 0.15;

/// Радиус picking сферы display модели (в единицах модели, до scale)
const DISPLAY_MODEL_RADIUS: f32 = 0.1;

/// Маркер: crosshair (никогда не участвует в picking)
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Crosshair;

/// Маркер: вращающаяся display модель
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct DisplayModel;

/// Entities построенной сцены
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct RangeHandles {
    pub camera: Entity,
    pub ground: Entity,
    pub props: Vec<Entity>,
    pub weapon: Option<Entity>,
    pub crosshair: Option<Entity>,
    pub display_model: Option<Entity>,
}

/// Строит сцену стрельбища
pub fn build_range(
    commands: &mut Commands,
    config: &RangeConfig,
    availability: &AssetAvailability,
) -> RangeHandles {
    let half = config.world.ground_size / 2.0;
    let ground = commands
        .spawn((
            Name::new("ground"),
            Transform::from_xyz(0.0, -GROUND_HALF_THICKNESS, 0.0),
            Collider::cuboid(half, GROUND_HALF_THICKNESS, half),
            PickSurface,
        ))
        .id();

    let props = if availability.world {
        spawn_world_props(commands, config)
    } else {
        logger::log_warning("World model unavailable, range has ground only");
        Vec::new()
    };

    let display_model = availability
        .display_model
        .then(|| spawn_display_model(commands, config));

    let camera = commands
        .spawn((Name::new("camera"), config.camera.transform()))
        .id();

    let weapon = if availability.gun {
        Some(spawn_weapon(commands, config, camera))
    } else {
        logger::log_warning("Gun model unavailable, shots will have no recoil");
        None
    };

    commands.entity(camera).insert(ShooterCamera { weapon });

    let crosshair = availability.crosshair.then(|| {
        commands
            .spawn((
                Name::new("crosshair"),
                Crosshair,
                Transform::from_xyz(0.0, 0.0, -CROSSHAIR_DISTANCE)
                    .with_scale(Vec3::splat(CROSSHAIR_SIZE)),
                ChildOf(camera),
            ))
            .id()
    });

    logger::log_info(&format!(
        "Range built: {} props, weapon: {}, display model: {}",
        props.len(),
        weapon.is_some(),
        display_model.is_some()
    ));

    RangeHandles {
        camera,
        ground,
        props,
        weapon,
        crosshair,
        display_model,
    }
}

fn spawn_world_props(commands: &mut Commands, config: &RangeConfig) -> Vec<Entity> {
    let lift = Vec3::new(0.0, config.world.lift, 0.0);

    config
        .world
        .props
        .iter()
        .map(|prop| {
            commands
                .spawn((
                    Name::new(prop.name.clone()),
                    Transform::from_translation(Vec3::from_array(prop.position) + lift),
                    Collider::cuboid(
                        prop.half_extents[0],
                        prop.half_extents[1],
                        prop.half_extents[2],
                    ),
                    PickSurface,
                ))
                .id()
        })
        .collect()
}

fn spawn_display_model(commands: &mut Commands, config: &RangeConfig) -> Entity {
    let model = &config.display_model;

    commands
        .spawn((
            Name::new("display_model"),
            DisplayModel,
            Transform::from_translation(Vec3::from_array(model.position))
                .with_scale(Vec3::splat(model.scale)),
            Collider::ball(DISPLAY_MODEL_RADIUS * model.scale),
            PickSurface,
            KeyframeAnimation::new(turntable_clip(), model.spin_speed),
        ))
        .id()
}

fn spawn_weapon(commands: &mut Commands, config: &RangeConfig, camera: Entity) -> Entity {
    let rest = Vec3::from_array(config.weapon.offset);

    commands
        .spawn((
            Name::new("p90"),
            WeaponModel { rest },
            Transform::from_translation(rest)
                .with_rotation(Quat::from_euler(EulerRot::YXZ, 7.0 * PI / 8.0, PI / 16.0, 0.0))
                .with_scale(Vec3::splat(config.weapon.scale)),
            ChildOf(camera),
        ))
        .id()
}

/// Startup system: probe asset'ов и построение сцены
///
/// Если `AssetAvailability` уже вставлен (host/тесты) — probe не делается.
pub fn setup_range(
    mut commands: Commands,
    config: Res<RangeConfig>,
    manifest: Res<AssetManifest>,
    palette: Res<SplatterPalette>,
    sounds: Res<ShotSounds>,
    preset: Option<Res<AssetAvailability>>,
    mut started: EventWriter<AnimationStarted>,
) {
    let availability = match preset {
        Some(preset) => preset.clone(),
        None => probe_manifest(&config.world.asset_root, &manifest, &palette, &sounds),
    };

    let handles = build_range(&mut commands, &config, &availability);

    if let Some(model) = handles.display_model {
        started.write(AnimationStarted {
            target: model,
            clip: "turntable".into(),
        });
    }

    commands.insert_resource(availability);
    commands.insert_resource(handles);
}
