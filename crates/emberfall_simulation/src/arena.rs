//! Headless arena: минимальный host поверх core
//!
//! Делает то, что в игре делает render/input слой:
//! - спавн игрока и кольца врагов (позиции из DeterministicRng)
//! - подход к ближайшему врагу (вместо navigation)
//! - radius query brute-force + aim point → MeleeAttackIntent
//! - трата stat points по заданному порядку → StatAllocationIntent
//!
//! Все системы в `SimulationSet::Input`, поэтому core видит intents в том же tick.

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;
use crate::combat::{Dead, MeleeAttackIntent, MeleeAttacker};
use crate::components::{Combatant, Player};
use crate::config::GameplayTuning;
use crate::progression::{ProgressionLedger, StatAllocationIntent, StatKind};
use crate::spawn::{spawn_enemy, spawn_player};
use crate::{DeterministicRng, SimulationSet};

/// Параметры арены (host-side, не часть GameplayTuning)
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub enemy_count: usize,
    pub inner_radius: f32,
    pub outer_radius: f32,
    /// Вероятность elite для каждого врага (0..=1)
    pub elite_chance: f32,
    /// Скорость подхода игрока (м/с)
    pub player_speed: f32,
    /// Порядок вложения stat points (по кругу)
    pub allocation_order: Vec<StatKind>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            enemy_count: 8,
            inner_radius: 6.0,
            outer_radius: 12.0,
            elite_chance: 0.2,
            player_speed: 3.0,
            allocation_order: vec![
                StatKind::Strength,
                StatKind::Vitality,
                StatKind::Defense,
                StatKind::Intelligence,
            ],
        }
    }
}

/// Arena Plugin (требует SimulationPlugin для событий и tuning)
///
/// Порядок в FixedUpdate (SimulationSet::Input):
/// 1. chase_nearest_enemy - сближение
/// 2. player_auto_attack - intent на attack cadence
/// 3. auto_allocate_stat_points - intents на свободные очки
pub struct ArenaPlugin;

impl Plugin for ArenaPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ArenaConfig>()
            .add_systems(Startup, spawn_arena)
            .add_systems(
                FixedUpdate,
                (chase_nearest_enemy, player_auto_attack, auto_allocate_stat_points)
                    .chain()
                    .in_set(SimulationSet::Input),
            );
    }
}

/// Позиция врага в кольце: равномерный угол + jitter, радиус в [inner, outer]
pub fn ring_position(rng: &mut impl Rng, index: usize, count: usize, inner: f32, outer: f32) -> Vec3 {
    let slot = TAU / count.max(1) as f32;
    let angle = slot * index as f32 + rng.gen_range(-0.25f32..=0.25) * slot;
    let (low, high) = (inner.min(outer), inner.max(outer));
    let radius = rng.gen_range(low..=high);

    Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius)
}

/// Startup system: игрок в центре + кольцо врагов
pub fn spawn_arena(
    mut commands: Commands,
    tuning: Res<GameplayTuning>,
    config: Res<ArenaConfig>,
    mut rng: ResMut<DeterministicRng>,
) {
    match spawn_player(&mut commands, &tuning, Vec3::ZERO) {
        Ok(player) => crate::logger::log_info(&format!("🧍 Player spawned: {:?}", player)),
        Err(err) => {
            crate::logger::log_error(&format!("Arena: failed to spawn player: {err}"));
            return;
        }
    }

    let elite_chance = f64::from(config.elite_chance.clamp(0.0, 1.0));
    let mut elites = 0usize;
    for index in 0..config.enemy_count {
        let position = ring_position(
            &mut rng.rng,
            index,
            config.enemy_count,
            config.inner_radius,
            config.outer_radius,
        );
        let elite = rng.rng.gen_bool(elite_chance);

        match spawn_enemy(&mut commands, &tuning, position, elite) {
            Ok(_) => elites += usize::from(elite),
            Err(err) => {
                crate::logger::log_error(&format!("Arena: failed to spawn enemy: {err}"));
                return;
            }
        }
    }

    crate::logger::log_info(&format!(
        "🏟️ Arena ready (seed: {}, enemies: {}, elites: {})",
        rng.seed, config.enemy_count, elites
    ));
}

type LivingEnemies<'w, 's> =
    Query<'w, 's, (Entity, &'static Transform), (With<Combatant>, Without<Player>, Without<Dead>)>;

/// Ближайший живой враг (brute-force, ties → меньший entity index)
fn nearest_enemy(enemies: &LivingEnemies, from: Vec3) -> Option<(Entity, Vec3)> {
    enemies
        .iter()
        .map(|(entity, transform)| (entity, transform.translation))
        .min_by(|(a_entity, a), (b_entity, b)| {
            a.distance_squared(from)
                .total_cmp(&b.distance_squared(from))
                .then(a_entity.index().cmp(&b_entity.index()))
        })
}

/// System: игрок идёт к ближайшему врагу, пока тот вне attack range
pub fn chase_nearest_enemy(
    mut players: Query<(&mut Transform, &MeleeAttacker), (With<Player>, Without<Dead>)>,
    enemies: LivingEnemies,
    config: Res<ArenaConfig>,
    time: Res<Time<Fixed>>,
) {
    let step = config.player_speed * time.delta_secs();

    for (mut transform, attacker) in players.iter_mut() {
        let Some((_, target)) = nearest_enemy(&enemies, transform.translation) else {
            continue;
        };

        let offset = (target - transform.translation).with_y(0.0);
        // Останавливаемся чуть внутри range, чтобы цель попадала в radius query
        let distance = offset.length() - attacker.attack_range * 0.8;
        if distance <= 0.0 {
            continue;
        }

        transform.translation += offset.normalize_or_zero() * step.min(distance);
    }
}

/// System: radius query + aim на ближайшего → MeleeAttackIntent
///
/// Intent пишется только когда cooldown готов и в радиусе есть враги,
/// иначе swing уходит в пустоту.
pub fn player_auto_attack(
    players: Query<(Entity, &Transform, &MeleeAttacker), (With<Player>, Without<Dead>)>,
    enemies: LivingEnemies,
    time: Res<Time<Fixed>>,
    mut intents: EventWriter<MeleeAttackIntent>,
) {
    let now = time.elapsed_secs();

    for (player, transform, attacker) in players.iter() {
        if !attacker.can_attack(now) {
            continue;
        }

        let position = transform.translation;
        let range_squared = attacker.attack_range * attacker.attack_range;
        let candidates: Vec<Entity> = enemies
            .iter()
            .filter(|(_, enemy)| enemy.translation.distance_squared(position) <= range_squared)
            .map(|(entity, _)| entity)
            .collect();

        if candidates.is_empty() {
            continue;
        }

        let aim_point = nearest_enemy(&enemies, position).map(|(_, target)| target);
        intents.write(MeleeAttackIntent {
            attacker: player,
            aim_point,
            candidates,
        });
    }
}

/// System: свободные stat points → StatAllocationIntent по allocation_order
pub fn auto_allocate_stat_points(
    players: Query<(Entity, &ProgressionLedger), (With<Player>, Without<Dead>)>,
    config: Res<ArenaConfig>,
    mut intents: EventWriter<StatAllocationIntent>,
) {
    let order = &config.allocation_order;
    if order.is_empty() {
        return;
    }

    for (player, ledger) in players.iter() {
        let spent = ledger.allocation().total() as usize;
        for offset in 0..ledger.available_stat_points() as usize {
            intents.write(StatAllocationIntent {
                entity: player,
                stat: order[(spent + offset) % order.len()],
            });
        }
    }
}
