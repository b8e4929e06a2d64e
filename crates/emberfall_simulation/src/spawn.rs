//! Spawn helpers: собирают бойца из tuning
//!
//! Размещение в мире (spawn area, respawn) - забота host'а, здесь только состав
//! компонентов и стартовые значения.

use bevy::prelude::*;
use thiserror::Error;
use crate::combat::MeleeAttacker;
use crate::components::{Combatant, Elite, ExperienceReward, Health, Mana, Player};
use crate::config::GameplayTuning;
use crate::progression::{ProgressionError, ProgressionLedger};
use crate::vitals::{VitalsError, VitalsPool};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpawnError {
    #[error("invalid vitals tuning: {0}")]
    Vitals(#[from] VitalsError),
    #[error("invalid progression tuning: {0}")]
    Progression(#[from] ProgressionError),
}

/// Игрок: health + mana, melee attack, progression ledger
pub fn spawn_player(
    commands: &mut Commands,
    tuning: &GameplayTuning,
    position: Vec3,
) -> Result<Entity, SpawnError> {
    let health = VitalsPool::new(tuning.player.health.max, tuning.player.health.regen_per_second)?;
    let mana = VitalsPool::new(tuning.player.mana.max, tuning.player.mana.regen_per_second)?;
    let ledger = ProgressionLedger::new(tuning.progression)?;

    let entity = commands
        .spawn((
            Transform::from_translation(position),
            // Combatant (Required: DamageMultiplier 1.0 + Armor 0)
            Combatant,
            Player,
            Health(health),
            Mana(mana),
            MeleeAttacker::from_tuning(&tuning.melee),
            ledger,
        ))
        .id();

    Ok(entity)
}

/// Враг: пассивный damage sink с наградой за убийство
///
/// Elite получает max health × elite_health_multiplier один раз при создании.
pub fn spawn_enemy(
    commands: &mut Commands,
    tuning: &GameplayTuning,
    position: Vec3,
    elite: bool,
) -> Result<Entity, SpawnError> {
    let enemy = &tuning.enemy;
    let mut health = VitalsPool::new(enemy.health.max, enemy.health.regen_per_second)?;
    if elite {
        health = health.scaled(enemy.elite_health_multiplier);
    }

    let mut entity_commands = commands.spawn((
        Transform::from_translation(position),
        Combatant,
        Health(health),
        ExperienceReward(enemy.experience_reward),
    ));
    if elite {
        entity_commands.insert(Elite);
    }

    Ok(entity_commands.id())
}
