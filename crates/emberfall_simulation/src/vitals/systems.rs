//! Vitals systems (регенерация health/mana)

use bevy::prelude::*;
use crate::combat::Dead;
use crate::components::{Health, Mana};
use super::{HealthChanged, ManaChanged};

/// Система: regenerate health и mana для всех живых бойцов
///
/// Работает в FixedUpdate для детерминизма. Regen не является healing-событием
/// для mitigation (положительный amount), и мёртвые не регенерируют.
pub fn regenerate_vitals(
    mut healths: Query<(Entity, &mut Health), Without<Dead>>,
    mut manas: Query<(Entity, &mut Mana), Without<Dead>>,
    mut health_events: EventWriter<HealthChanged>,
    mut mana_events: EventWriter<ManaChanged>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (entity, mut health) in healths.iter_mut() {
        if let Some(change) = health.regenerate(delta) {
            health_events.write(HealthChanged::from_change(entity, change));
        }
    }

    for (entity, mut mana) in manas.iter_mut() {
        if let Some(change) = mana.regenerate(delta) {
            mana_events.write(ManaChanged::from_change(entity, change));
        }
    }
}
