//! Progression systems: ExperienceGranted → ledger, StatAllocationIntent → ledger

use bevy::prelude::*;
use crate::combat::Dead;
use crate::components::{Armor, DamageMultiplier, Health, Mana};
use crate::vitals::{HealthChanged, ManaChanged};
use super::{
    CombatantSheet, ExperienceGranted, ExperienceProgress, LeveledUp, ProgressionLedger,
    StatAllocationIntent, StatEffect, StatPointAllocated,
};

type LedgerQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static mut ProgressionLedger,
        &'static mut Health,
        Option<&'static mut Mana>,
        &'static mut DamageMultiplier,
        &'static mut Armor,
    ),
    Without<Dead>,
>;

/// System: начисление опыта
///
/// 1. Читаем ExperienceGranted
/// 2. ledger.add_experience (может дать несколько level-ups за раз)
/// 3. ExperienceProgress, затем на каждый уровень: HealthChanged/ManaChanged (full heal) + LeveledUp
///
/// Невалидный grant (отрицательный/NaN) отклоняется без мутаций.
pub fn apply_experience_grants(
    mut grants: EventReader<ExperienceGranted>,
    mut ledgers: LedgerQuery,
    mut progress_events: EventWriter<ExperienceProgress>,
    mut level_events: EventWriter<LeveledUp>,
    mut health_events: EventWriter<HealthChanged>,
    mut mana_events: EventWriter<ManaChanged>,
) {
    for grant in grants.read() {
        let Ok((mut ledger, mut health, mut mana, mut multiplier, mut armor)) =
            ledgers.get_mut(grant.entity)
        else {
            crate::logger::log(&format!(
                "ExperienceGranted: {:?} has no ledger or is dead, skipping",
                grant.entity
            ));
            continue;
        };

        let mut sheet = CombatantSheet {
            health: &mut health,
            mana: mana.as_deref_mut(),
            damage_multiplier: &mut multiplier,
            armor: &mut armor,
        };

        let gain = match ledger.add_experience(grant.amount, &mut sheet) {
            Ok(gain) => gain,
            Err(err) => {
                crate::logger::log_warning(&format!(
                    "ExperienceGranted rejected for {:?}: {}",
                    grant.entity, err
                ));
                continue;
            }
        };

        progress_events.write(ExperienceProgress {
            entity: grant.entity,
            fraction: gain.progress,
        });

        for level_up in &gain.level_ups {
            health_events.write(HealthChanged::from_change(grant.entity, level_up.health));
            if let Some(change) = level_up.mana {
                mana_events.write(ManaChanged::from_change(grant.entity, change));
            }
            level_events.write(LeveledUp {
                entity: grant.entity,
                level: level_up.level,
            });

            crate::logger::log_info(&format!(
                "⭐ {:?} reached level {} (stat points: {})",
                grant.entity,
                level_up.level,
                ledger.available_stat_points()
            ));
        }
    }
}

/// System: распределение stat points
///
/// Нет свободных очков / нет mana для intelligence → отказ (warning), очко не тратится.
pub fn apply_stat_allocations(
    mut intents: EventReader<StatAllocationIntent>,
    mut ledgers: LedgerQuery,
    mut allocated_events: EventWriter<StatPointAllocated>,
    mut health_events: EventWriter<HealthChanged>,
    mut mana_events: EventWriter<ManaChanged>,
) {
    for intent in intents.read() {
        let Ok((mut ledger, mut health, mut mana, mut multiplier, mut armor)) =
            ledgers.get_mut(intent.entity)
        else {
            continue;
        };

        let mut sheet = CombatantSheet {
            health: &mut health,
            mana: mana.as_deref_mut(),
            damage_multiplier: &mut multiplier,
            armor: &mut armor,
        };

        let effect = match ledger.allocate_stat_point(intent.stat, &mut sheet) {
            Ok(effect) => effect,
            Err(err) => {
                crate::logger::log_warning(&format!(
                    "Stat allocation {:?} refused for {:?}: {}",
                    intent.stat, intent.entity, err
                ));
                continue;
            }
        };

        match effect {
            StatEffect::MaxHealth(change) => {
                health_events.write(HealthChanged::from_change(intent.entity, change));
            }
            StatEffect::MaxMana(change) => {
                mana_events.write(ManaChanged::from_change(intent.entity, change));
            }
            StatEffect::DamageMultiplier { .. } | StatEffect::Armor { .. } => {}
        }

        allocated_events.write(StatPointAllocated {
            entity: intent.entity,
            stat: intent.stat,
            remaining_points: ledger.available_stat_points(),
        });

        crate::logger::log(&format!(
            "{:?} allocated {:?} → {:?} ({} points left)",
            intent.entity,
            intent.stat,
            effect,
            ledger.available_stat_points()
        ));
    }
}

