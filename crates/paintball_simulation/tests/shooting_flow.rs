//! Shooting flow integration test
//!
//! Headless App, виртуальное время шагами по 100ms.
//!
//! Проверяем:
//! - Unlocked: только lock request, никаких эффектов
//! - Locked + hit: ровно один decal / звук / recoil / deadline
//! - Locked + miss: ничего
//! - Decal живёт ровно 3000ms, удаления независимы и идемпотентны

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy_rapier3d::prelude::Collider;
use std::time::Duration;

use paintball_simulation::decals::dispose_decal;
use paintball_simulation::*;

const STEP: Duration = Duration::from_millis(100);

/// Всё, что pipeline отдал наружу (events читаются ровно один раз)
#[derive(Resource, Default)]
struct Captured {
    lock_requests: usize,
    hits: Vec<ShotHit>,
    sounds: Vec<PlaySound>,
    animations: Vec<AnimationStarted>,
    removed: Vec<Entity>,
}

fn capture(
    mut captured: ResMut<Captured>,
    mut lock_requests: EventReader<PointerLockRequested>,
    mut hits: EventReader<ShotHit>,
    mut sounds: EventReader<PlaySound>,
    mut animations: EventReader<AnimationStarted>,
    mut removed: EventReader<DecalRemoved>,
) {
    captured.lock_requests += lock_requests.read().count();
    captured.hits.extend(hits.read().cloned());
    captured.sounds.extend(sounds.read().cloned());
    captured.animations.extend(animations.read().cloned());
    captured.removed.extend(removed.read().map(|e| e.decal));
}

/// Helper: App стрельбища без сцены (сцену собирает тест)
fn create_range_app(seed: u64) -> App {
    let mut app = create_headless_app(seed);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(STEP))
        .add_plugins((RangePlugin, HeadlessPointerLockPlugin))
        .init_resource::<Captured>()
        .add_systems(Update, capture.after(RangeSet::Cleanup));
    app
}

struct Scenario {
    camera: Entity,
    ground: Entity,
    weapon: Entity,
}

/// Helper: ground (top face y=0, нормаль +Y) + камера над ним, смотрит вниз
fn spawn_scenario(app: &mut App) -> Scenario {
    let world = app.world_mut();

    let ground = world
        .spawn((
            Transform::from_xyz(0.0, -0.5, 0.0),
            Collider::cuboid(10.0, 0.5, 10.0),
            PickSurface,
        ))
        .id();

    let rest = Vec3::new(2.0, -2.0, -5.0);
    let weapon = world
        .spawn((Transform::from_translation(rest), WeaponModel { rest }))
        .id();

    let camera = world
        .spawn((
            Transform::from_xyz(0.0, 5.0, 0.0).looking_at(Vec3::ZERO, Vec3::Z),
            ShooterCamera {
                weapon: Some(weapon),
            },
        ))
        .id();

    Scenario {
        camera,
        ground,
        weapon,
    }
}

fn click(app: &mut App, button: PointerButton) {
    app.world_mut().send_event(PointerDown { button });
}

/// Helper: захват lock (request → grant → apply на следующем кадре)
fn engage_lock(app: &mut App) {
    click(app, PointerButton::Primary);
    app.update();
    app.update();
    assert_eq!(*app.world().resource::<PointerLock>(), PointerLock::Locked);

    app.world_mut().resource_mut::<Captured>().lock_requests = 0;
}

fn decal_count(app: &mut App) -> usize {
    let mut query = app.world_mut().query::<&Decal>();
    query.iter(app.world()).count()
}

fn now(app: &App) -> Duration {
    app.world().resource::<Time>().elapsed()
}

#[test]
fn test_unlocked_click_only_requests_lock() {
    let mut app = create_range_app(42);
    spawn_scenario(&mut app);

    click(&mut app, PointerButton::Primary);
    app.update();

    let captured = app.world().resource::<Captured>();
    assert_eq!(captured.lock_requests, 1);
    assert!(captured.hits.is_empty());
    assert!(captured.sounds.is_empty());
    assert!(captured.animations.is_empty());

    let stats = *app.world().resource::<RangeStats>();
    assert_eq!(stats.lock_requests, 1);
    assert_eq!(stats.shots_fired, 0);
    assert_eq!(decal_count(&mut app), 0);
}

#[test]
fn test_locked_hit_spawns_exactly_one_of_each() {
    let mut app = create_range_app(42);
    let scenario = spawn_scenario(&mut app);
    engage_lock(&mut app);

    click(&mut app, PointerButton::Primary);
    app.update();
    let fired_at = now(&app);

    let captured = app.world().resource::<Captured>();
    assert_eq!(captured.lock_requests, 0);
    assert_eq!(captured.hits.len(), 1);
    assert_eq!(captured.sounds.len(), 1);
    assert_eq!(captured.animations.len(), 1);
    assert_eq!(captured.animations[0].target, scenario.weapon);
    assert_eq!(captured.animations[0].clip, "recoil");

    let hit = captured.hits[0].clone();
    assert_eq!(hit.surface, scenario.ground);
    assert_eq!(hit.recoil, Some(scenario.weapon));
    assert!(hit.material < 3);

    assert_eq!(decal_count(&mut app), 1);

    let world = app.world();
    let decal = world.get::<Decal>(hit.decal).unwrap();
    let lifetime = world.get::<DecalLifetime>(hit.decal).unwrap();
    assert_eq!(decal.spawned_at, fired_at);
    assert_eq!(decal.size, 4.0);
    assert_eq!(lifetime.despawn_at, fired_at + Duration::from_millis(3000));

    let stats = *world.resource::<RangeStats>();
    assert_eq!(stats.shots_fired, 1);
    assert_eq!(stats.decals_spawned, 1);
    assert_eq!(stats.sounds_played, 1);
    assert_eq!(stats.recoils_started, 1);
    assert_eq!(stats.misses, 0);

    // Кадр выстрела: recoil стоит на frame 0
    let recoil = world.get::<KeyframeAnimation>(scenario.weapon).unwrap();
    assert!(recoil.is_started());
    assert_eq!(recoil.elapsed_frames, 0.0);

    // 100ms ≥ 0.1s recoil: следующий кадр доигрывает и снимает анимацию
    app.update();
    let world = app.world();
    assert!(world.get::<KeyframeAnimation>(scenario.weapon).is_none());
    assert_eq!(
        world.get::<Transform>(scenario.weapon).unwrap().translation,
        Vec3::new(2.0, -2.0, -5.0)
    );
}

#[test]
fn test_locked_miss_has_no_effects() {
    let mut app = create_range_app(42);
    let scenario = spawn_scenario(&mut app);
    engage_lock(&mut app);

    // Камера смотрит в небо
    *app.world_mut().get_mut::<Transform>(scenario.camera).unwrap() =
        Transform::from_xyz(0.0, 5.0, 0.0).looking_at(Vec3::new(0.0, 10.0, 0.0), Vec3::Z);

    click(&mut app, PointerButton::Primary);
    app.update();

    let captured = app.world().resource::<Captured>();
    assert!(captured.hits.is_empty());
    assert!(captured.sounds.is_empty());
    assert!(captured.animations.is_empty());
    assert_eq!(decal_count(&mut app), 0);
    assert!(app.world().get::<KeyframeAnimation>(scenario.weapon).is_none());

    let stats = *app.world().resource::<RangeStats>();
    assert_eq!(stats.shots_fired, 1);
    assert_eq!(stats.misses, 1);
}

#[test]
fn test_secondary_button_does_nothing() {
    let mut app = create_range_app(42);
    spawn_scenario(&mut app);

    click(&mut app, PointerButton::Secondary);
    app.update();
    assert_eq!(app.world().resource::<Captured>().lock_requests, 0);

    engage_lock(&mut app);
    click(&mut app, PointerButton::Secondary);
    app.update();

    assert!(app.world().resource::<Captured>().hits.is_empty());
    assert_eq!(decal_count(&mut app), 0);
}

#[test]
fn test_decal_lives_exactly_3000ms() {
    let mut app = create_range_app(42);
    spawn_scenario(&mut app);
    engage_lock(&mut app);

    click(&mut app, PointerButton::Primary);
    app.update();

    let hit = app.world().resource::<Captured>().hits[0].clone();
    assert!(hit.point.distance(Vec3::ZERO) < 1e-4, "point = {:?}", hit.point);
    assert!((hit.normal - Vec3::Y).length() < 1e-4, "normal = {:?}", hit.normal);

    let transform = *app.world().get::<Transform>(hit.decal).unwrap();
    assert!(((transform.rotation * Vec3::Z) - Vec3::Y).length() < 1e-4);

    let despawn_at = app
        .world()
        .get::<DecalLifetime>(hit.decal)
        .unwrap()
        .despawn_at;

    let mut removed = false;
    for _ in 0..50 {
        app.update();
        let alive = app.world().get_entity(hit.decal).is_ok();

        if now(&app) < despawn_at {
            assert!(alive, "decal removed early at {:?}", now(&app));
        } else {
            assert!(!alive, "decal still alive at {:?}", now(&app));
            removed = true;
            break;
        }
    }

    assert!(removed);
    app.update();
    assert_eq!(app.world().resource::<Captured>().removed, vec![hit.decal]);
    assert_eq!(app.world().resource::<RangeStats>().live_decals(), 0);
}

#[test]
fn test_host_stall_never_expires_decal_early() {
    let mut app = create_range_app(42);
    spawn_scenario(&mut app);
    engage_lock(&mut app);

    click(&mut app, PointerButton::Primary);
    app.update();
    let fired_at = now(&app);
    assert_eq!(decal_count(&mut app), 1);

    // Host stall: кадры по 1s real time, virtual time режется до max_delta (250ms)
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs(1)));
    for _ in 0..4 {
        app.update();
    }

    assert!(now(&app) - fired_at < Duration::from_millis(3000));
    assert_eq!(decal_count(&mut app), 1);
    assert!(app.world().resource::<Captured>().removed.is_empty());
}

#[test]
fn test_overlapping_decals_expire_independently() {
    let mut app = create_range_app(42);
    spawn_scenario(&mut app);
    engage_lock(&mut app);

    click(&mut app, PointerButton::Primary);
    app.update();
    let first = app.world().resource::<Captured>().hits[0].decal;

    // +1s
    for _ in 0..10 {
        app.update();
    }

    click(&mut app, PointerButton::Primary);
    app.update();
    let second = app.world().resource::<Captured>().hits[1].decal;
    let second_deadline = app.world().get::<DecalLifetime>(second).unwrap().despawn_at;

    // Ждём, пока первый исчезнет
    while app.world().get_entity(first).is_ok() {
        app.update();
    }
    assert!(now(&app) < second_deadline);
    assert!(app.world().get_entity(second).is_ok());

    while app.world().get_entity(second).is_ok() {
        app.update();
    }
    assert!(now(&app) >= second_deadline);
    app.update();
    assert_eq!(app.world().resource::<Captured>().removed, vec![first, second]);
}

#[test]
fn test_cleanup_is_idempotent() {
    let mut app = create_range_app(42);
    spawn_scenario(&mut app);
    engage_lock(&mut app);

    click(&mut app, PointerButton::Primary);
    app.update();
    let decal = app.world().resource::<Captured>().hits[0].decal;

    // Сцена сносит decal раньше таймера
    assert!(dispose_decal(app.world_mut(), decal));
    assert!(!dispose_decal(app.world_mut(), decal));

    // Устаревший deadline не ломает кадр
    for _ in 0..40 {
        app.update();
    }

    assert!(!dispose_decal(app.world_mut(), decal));
    assert_eq!(app.world().resource::<RangeStats>().decals_removed, 1);
}

#[test]
fn test_missing_weapon_is_guarded() {
    let mut app = create_range_app(42);
    let scenario = spawn_scenario(&mut app);
    engage_lock(&mut app);

    // Оружие не привязано
    app.world_mut()
        .get_mut::<ShooterCamera>(scenario.camera)
        .unwrap()
        .weapon = None;
    click(&mut app, PointerButton::Primary);
    app.update();

    // Оружие привязано, но уже despawned
    app.world_mut()
        .get_mut::<ShooterCamera>(scenario.camera)
        .unwrap()
        .weapon = Some(scenario.weapon);
    app.world_mut().despawn(scenario.weapon);
    click(&mut app, PointerButton::Primary);
    app.update();

    let captured = app.world().resource::<Captured>();
    assert_eq!(captured.hits.len(), 2);
    assert_eq!(captured.sounds.len(), 2);
    assert!(captured.animations.is_empty());
    assert!(captured.hits.iter().all(|h| h.recoil.is_none()));
    assert_eq!(decal_count(&mut app), 2);
}

#[test]
fn test_palette_coverage_over_1000_shots() {
    let mut app = create_range_app(7);
    spawn_scenario(&mut app);
    engage_lock(&mut app);

    for _ in 0..1000 {
        click(&mut app, PointerButton::Primary);
    }
    app.update();

    let captured = app.world().resource::<Captured>();
    assert_eq!(captured.hits.len(), 1000);

    let mut per_material = [0usize; 3];
    for hit in &captured.hits {
        per_material[hit.material] += 1;
    }
    assert!(
        per_material.iter().all(|&n| n > 0),
        "degenerate palette picks: {:?}",
        per_material
    );

    let mut per_sound = [0usize; 2];
    for hit in &captured.hits {
        per_sound[hit.sound] += 1;
    }
    assert!(per_sound.iter().all(|&n| n > 0), "sound picks: {:?}", per_sound);
}
