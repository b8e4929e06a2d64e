//! Melee combat systems (ECS обёртка над AttackSwing).

use bevy::prelude::*;
use crate::components::{Armor, DamageMultiplier, Health};
use crate::vitals::HealthChanged;
use crate::combat::{
    AttackPerformed, AttackRefused, AttackSwing, DamageDealt, Dead, EntityDied, MeleeAttackIntent,
    MeleeAttacker,
};

type AttackerQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static mut MeleeAttacker,
        &'static mut Transform,
        Option<&'static DamageMultiplier>,
    ),
    Without<Dead>,
>;

type DefenderQuery<'w, 's> =
    Query<'w, 's, (&'static Transform, &'static mut Health, Option<&'static Armor>), Without<Dead>>;

/// System: Process melee attack intents.
///
/// Для каждого intent:
/// 1. Cooldown gate (per-attacker). На cooldown → `AttackRefused`, дальше не идём
/// 2. Direction + facing update
/// 3. Cone filter по `candidates` (radius query уже сделан снаружи)
/// 4. Урон всем в конусе → `HealthChanged`, `DamageDealt`, `EntityDied` при depletion
/// 5. Один `AttackPerformed` (даже при нуле попаданий)
///
/// Кандидаты без Health (или мёртвые) молча пропускаются.
#[allow(clippy::too_many_arguments)]
pub fn process_melee_attack_intents(
    mut intents: EventReader<MeleeAttackIntent>,
    mut actors: ParamSet<(AttackerQuery, DefenderQuery)>,
    time: Res<Time<Fixed>>,
    mut performed_events: EventWriter<AttackPerformed>,
    mut refused_events: EventWriter<AttackRefused>,
    mut damage_events: EventWriter<DamageDealt>,
    mut health_events: EventWriter<HealthChanged>,
    mut died_events: EventWriter<EntityDied>,
) {
    let now = time.elapsed_secs();

    for intent in intents.read() {
        // Фаза 1: attacker (mutable Transform) - swing
        let swing = {
            let mut attackers = actors.p0();
            let Ok((mut attacker, mut transform, multiplier)) = attackers.get_mut(intent.attacker) else {
                crate::logger::log(&format!(
                    "MeleeAttackIntent: {:?} cannot attack (no MeleeAttacker or dead)",
                    intent.attacker
                ));
                continue;
            };

            match AttackSwing::begin(
                &mut attacker,
                &mut transform,
                multiplier.map(|m| m.0),
                intent.aim_point,
                now,
            ) {
                Ok(swing) => swing,
                Err(remaining) => {
                    refused_events.write(AttackRefused {
                        attacker: intent.attacker,
                        remaining,
                    });
                    crate::logger::log(&format!(
                        "⏳ {:?} attack on cooldown ({:.2}s left)",
                        intent.attacker, remaining
                    ));
                    continue;
                }
            }
        };

        // Фаза 2: defenders (mutable Health)
        let mut defenders = actors.p1();
        let mut hits = 0usize;
        for &candidate in &intent.candidates {
            if candidate == intent.attacker {
                continue;
            }

            let Ok((transform, mut health, armor)) = defenders.get_mut(candidate) else {
                continue;
            };

            let armor = armor.map_or(0.0, |a| a.0);
            let Some(change) = swing.strike(transform.translation, &mut health, armor) else {
                continue;
            };
            hits += 1;

            health_events.write(HealthChanged::from_change(candidate, change));
            damage_events.write(DamageDealt {
                attacker: intent.attacker,
                target: candidate,
                raw_damage: swing.damage,
                applied_damage: -change.applied,
                target_died: change.depleted,
            });

            if change.depleted {
                died_events.write(EntityDied {
                    entity: candidate,
                    killer: Some(intent.attacker),
                });
            }

            crate::logger::log(&format!(
                "💥 Melee hit (attacker: {:?}, target: {:?}, applied: {:.1}, HP: {:.1}/{:.1})",
                intent.attacker,
                candidate,
                -change.applied,
                health.current(),
                health.max()
            ));
        }

        performed_events.write(AttackPerformed {
            attacker: intent.attacker,
            origin: swing.origin,
            direction: swing.direction,
            timestamp: swing.timestamp,
        });

        crate::logger::log(&format!(
            "⚔️ {:?} attacked ({} candidates, {} hit)",
            intent.attacker,
            intent.candidates.len(),
            hits
        ));
    }
}
