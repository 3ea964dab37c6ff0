//! Headless сессия стрельбища
//!
//! Строит сцену из конфига (RON, первый аргумент; по умолчанию `range.ron`),
//! захватывает pointer lock и стреляет по таймеру. В конце печатает RangeStats.

use bevy::time::TimeUpdateStrategy;
use std::time::Duration;

use paintball_simulation::logger;
use paintball_simulation::{
    create_headless_app, HeadlessPointerLockPlugin, PointerDown, RangeConfig, RangePlugin,
    RangeScenePlugin, RangeStats,
};

const TICKS: u32 = 600;
const FIRE_EVERY: u32 = 30;

fn main() {
    let seed = 42;
    let config_path = std::env::args().nth(1).unwrap_or_else(|| "range.ron".into());

    let mut app = create_headless_app(seed);

    let (config, error) = RangeConfig::load_or_default(&config_path);
    if let Some(e) = error {
        logger::log_warning(&format!("Config {}: {} (using defaults)", config_path, e));
    }

    app.insert_resource(config)
        // 60 FPS виртуального времени, независимо от скорости машины
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / 60.0,
        )))
        .add_plugins((RangePlugin, RangeScenePlugin, HeadlessPointerLockPlugin));

    logger::log_info(&format!("Starting headless paintball range (seed: {})", seed));

    for tick in 0..TICKS {
        // Первый клик захватывает lock, дальше — выстрелы
        if tick % FIRE_EVERY == 0 {
            app.world_mut().send_event(PointerDown::primary());
        }

        app.update();

        if tick % 60 == 0 {
            let stats = *app.world().resource::<RangeStats>();
            logger::log_info(&format!(
                "Tick {}: {} shots, {} live decals",
                tick,
                stats.shots_fired,
                stats.live_decals()
            ));
        }
    }

    let stats = app.world().resource::<RangeStats>();
    logger::log_info(&format!("Session complete: {:?}", stats));
}
