//! Vitals notifications (UI bars, sounds, эффекты)

use bevy::prelude::*;
use super::PoolChange;

/// Health изменился. `fraction` = current / max, всегда в [0, 1].
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct HealthChanged {
    pub entity: Entity,
    pub fraction: f32,
}

/// Mana изменилась. `fraction` = current / max, всегда в [0, 1].
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ManaChanged {
    pub entity: Entity,
    pub fraction: f32,
}

impl HealthChanged {
    pub fn from_change(entity: Entity, change: PoolChange) -> Self {
        Self { entity, fraction: change.fraction }
    }
}

impl ManaChanged {
    pub fn from_change(entity: Entity, change: PoolChange) -> Self {
        Self { entity, fraction: change.fraction }
    }
}
