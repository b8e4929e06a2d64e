//! Headless арена Emberfall
//!
//! Запускает Bevy App без рендера: игрок против кольца врагов.
//!
//! Использование: `emberfall_simulation [seed] [tuning.ron]`

use std::time::Duration;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use emberfall_simulation::arena::ArenaPlugin;
use emberfall_simulation::logger::{log_error, log_info, set_log_level, LogLevel};
use emberfall_simulation::{
    create_headless_app, Combatant, Dead, GameplayTuning, Health, Player, ProgressionLedger,
    SimulationPlugin,
};

const TICKS: usize = 3600; // 60 секунд при 60Hz

fn main() {
    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|raw| raw.parse().ok()).unwrap_or(42);

    let mut app = create_headless_app(seed);
    set_log_level(LogLevel::Info);

    if let Some(path) = args.next() {
        match GameplayTuning::load(&path) {
            Ok(tuning) => {
                app.insert_resource(tuning);
            }
            Err(err) => {
                log_error(&format!("Failed to load tuning from {path}: {err}"));
                std::process::exit(1);
            }
        }
    }

    log_info(&format!("Starting Emberfall headless arena (seed: {})", seed));

    // Каждый update = ровно один fixed tick
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / 60.0)))
        .add_plugins((SimulationPlugin, ArenaPlugin));

    for tick in 0..TICKS {
        app.update();

        if tick % 600 == 0 {
            report(&mut app, tick);
        }

        if alive_enemies(&mut app) == 0 {
            log_info(&format!("Arena cleared at tick {}", tick));
            break;
        }
    }

    report(&mut app, TICKS);
    log_info("Simulation complete!");
}

fn alive_enemies(app: &mut App) -> usize {
    let world = app.world_mut();
    world
        .query_filtered::<(), (With<Combatant>, Without<Player>, Without<Dead>)>()
        .iter(world)
        .count()
}

fn report(app: &mut App, tick: usize) {
    let enemies = alive_enemies(app);
    let world = app.world_mut();
    let mut players = world.query_filtered::<(&Health, &ProgressionLedger), With<Player>>();

    for (health, ledger) in players.iter(world) {
        log_info(&format!(
            "Tick {}: HP {:.0}/{:.0}, level {}, XP {:.0}/{:.0}, enemies left: {}",
            tick,
            health.current(),
            health.max(),
            ledger.level(),
            ledger.current_xp(),
            ledger.xp_to_next_level(),
            enemies
        ));
    }
}
