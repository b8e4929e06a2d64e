//! Emberfall Simulation Core
//!
//! ECS-ядро action-RPG на Bevy 0.16: vitals, progression, melee combat.
//!
//! Слои:
//! - Core (этот crate): game state, правила боя и прокачки, события
//! - Host (render/input/UI): ray-cast, radius query, HUD по событиям
//!
//! Host пишет intents (`MeleeAttackIntent`, `ExperienceGranted`,
//! `StatAllocationIntent`) в `SimulationSet::Input`, core их обрабатывает
//! в `SimulationSet::Core` и отвечает событиями.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod arena;
pub mod combat;
pub mod components;
pub mod config;
pub mod logger;
pub mod progression;
pub mod spawn;
pub mod vitals;

// Re-export базовых типов для удобства
pub use combat::{
    calculate_damage, AttackOutcome, AttackPerformed, AttackRefused, DamageDealt, Dead,
    DespawnAfter, EntityDied, MeleeAttackIntent, MeleeAttacker,
};
pub use components::*;
pub use config::{ConfigError, GameplayTuning};
pub use logger::init_logger;
pub use progression::{
    ExperienceGranted, ExperienceProgress, LeveledUp, ProgressionError, ProgressionLedger,
    StatAllocationIntent, StatKind, StatPointAllocated,
};
pub use spawn::{spawn_enemy, spawn_player, SpawnError};
pub use vitals::{HealthChanged, ManaChanged, VitalsError, VitalsPool};

/// Фазы FixedUpdate tick'а
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Host systems: intents и grants
    Input,
    /// Core: combat → deaths → progression → regen → cleanup
    Core,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Input events
            .add_event::<MeleeAttackIntent>()
            .add_event::<ExperienceGranted>()
            .add_event::<StatAllocationIntent>()
            // Output events
            .add_event::<HealthChanged>()
            .add_event::<ManaChanged>()
            .add_event::<ExperienceProgress>()
            .add_event::<LeveledUp>()
            .add_event::<StatPointAllocated>()
            .add_event::<AttackPerformed>()
            .add_event::<AttackRefused>()
            .add_event::<DamageDealt>()
            .add_event::<EntityDied>()
            // Tuning: host может вставить свой до плагина (RON), иначе defaults
            .init_resource::<GameplayTuning>()
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .configure_sets(FixedUpdate, (SimulationSet::Input, SimulationSet::Core).chain())
            .add_systems(
                FixedUpdate,
                (
                    combat::process_melee_attack_intents,
                    combat::handle_deaths,
                    progression::apply_experience_grants,
                    progression::apply_stat_allocations,
                    vitals::regenerate_vitals,
                    combat::despawn_after_timeout,
                )
                    .chain() // Последовательное выполнение для детерминизма
                    .in_set(SimulationSet::Core),
            );

        // Детерминистичный RNG (seed по умолчанию, если host не задал свой)
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
