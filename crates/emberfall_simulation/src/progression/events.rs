//! Progression events
//!
//! Input (от quest/kill/UI слоя): `ExperienceGranted`, `StatAllocationIntent`
//! Output (UI, эффекты): `ExperienceProgress`, `LeveledUp`, `StatPointAllocated`

use bevy::prelude::*;
use super::StatKind;

/// Начислить опыт бойцу (kill reward, quest, debug)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ExperienceGranted {
    pub entity: Entity,
    pub amount: f32,
}

/// Игрок хочет вложить stat point
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct StatAllocationIntent {
    pub entity: Entity,
    pub stat: StatKind,
}

/// XP bar: current_xp / xp_to_next_level сразу после начисления
///
/// Может кратковременно быть > 1.0 (до разрешения level-ups).
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ExperienceProgress {
    pub entity: Entity,
    pub fraction: f32,
}

/// Новый уровень (по одному событию на каждый уровень)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct LeveledUp {
    pub entity: Entity,
    pub level: u32,
}

/// Stat point потрачен
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct StatPointAllocated {
    pub entity: Entity,
    pub stat: StatKind,
    pub remaining_points: u32,
}
