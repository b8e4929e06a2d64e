//! Damage calculation и death handling
//!
//! Формула урона:
//! - raw = base_damage × damage_multiplier (нет progression → 1.0)
//! - applied = raw × mitigation_factor(armor) - применяется в Health pool

use bevy::prelude::*;
use crate::components::{ExperienceReward, Player};
use crate::config::GameplayTuning;
use crate::progression::ExperienceGranted;
use super::EntityDied;

/// Компонент-маркер: боец мёртв (health == 0)
///
/// Мёртвые не регенерируют, не атакуют, не являются целями и не получают опыт.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Dead;

/// Компонент-маркер: деспавн entity после указанного времени
///
/// Ставится врагам при смерти. Игрок не деспавнится - остаётся с `Dead`.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct DespawnAfter {
    /// Время деспавна (elapsed fixed time, секунды)
    pub despawn_time: f32,
}

/// Вычисляет raw damage (до armor)
pub fn calculate_damage(base_damage: f32, damage_multiplier: Option<f32>) -> f32 {
    base_damage * damage_multiplier.unwrap_or(1.0)
}

/// Система: обработка EntityDied
///
/// 1. Маркер `Dead` (выключает бойца из боя и регенерации)
/// 2. Не-игрокам - `DespawnAfter` (corpse linger из tuning)
/// 3. Если у жертвы есть `ExperienceReward` и известен убийца - `ExperienceGranted`
pub fn handle_deaths(
    mut commands: Commands,
    mut death_events: EventReader<EntityDied>,
    victims: Query<(Has<Player>, Option<&ExperienceReward>)>,
    mut grants: EventWriter<ExperienceGranted>,
    tuning: Res<GameplayTuning>,
    time: Res<Time<Fixed>>,
) {
    let now = time.elapsed_secs();

    for event in death_events.read() {
        let Ok((is_player, reward)) = victims.get(event.entity) else {
            continue;
        };

        if let Ok(mut entity_commands) = commands.get_entity(event.entity) {
            entity_commands.try_insert(Dead);
            if !is_player {
                entity_commands.try_insert(DespawnAfter {
                    despawn_time: now + tuning.death.corpse_linger_seconds,
                });
            }
        }

        if let (Some(killer), Some(reward)) = (event.killer, reward) {
            grants.write(ExperienceGranted {
                entity: killer,
                amount: reward.0,
            });
        }

        crate::logger::log_info(&format!(
            "💀 {:?} died (killer: {:?}, player: {})",
            event.entity, event.killer, is_player
        ));
    }
}

/// Система: деспавн entities с истёкшим DespawnAfter timeout
///
/// Lifecycle host часть: ядро только помечает, удаление - здесь.
pub fn despawn_after_timeout(
    mut commands: Commands,
    query: Query<(Entity, &DespawnAfter)>,
    time: Res<Time<Fixed>>,
) {
    let current_time = time.elapsed_secs();

    for (entity, despawn_after) in query.iter() {
        if current_time >= despawn_after.despawn_time {
            crate::logger::log(&format!("⚰️ Despawning entity {:?}", entity));
            commands.entity(entity).try_despawn();
        }
    }
}
