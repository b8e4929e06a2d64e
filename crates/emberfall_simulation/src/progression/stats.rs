//! Stat points: виды статов и счётчики распределённых очков

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Куда можно вложить stat point
///
/// - Strength → damage multiplier
/// - Intelligence → max mana
/// - Vitality → max health
/// - Defense → armor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum StatKind {
    Strength,
    Intelligence,
    Vitality,
    Defense,
}

impl StatKind {
    pub const ALL: [StatKind; 4] = [
        StatKind::Strength,
        StatKind::Intelligence,
        StatKind::Vitality,
        StatKind::Defense,
    ];
}

/// Сколько очков вложено в каждый stat (за всё время, respec нет)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
pub struct StatAllocation {
    pub strength: u32,
    pub intelligence: u32,
    pub vitality: u32,
    pub defense: u32,
}

impl StatAllocation {
    pub fn points(&self, stat: StatKind) -> u32 {
        match stat {
            StatKind::Strength => self.strength,
            StatKind::Intelligence => self.intelligence,
            StatKind::Vitality => self.vitality,
            StatKind::Defense => self.defense,
        }
    }

    pub fn total(&self) -> u32 {
        self.strength + self.intelligence + self.vitality + self.defense
    }

    pub(crate) fn increment(&mut self, stat: StatKind) {
        match stat {
            StatKind::Strength => self.strength += 1,
            StatKind::Intelligence => self.intelligence += 1,
            StatKind::Vitality => self.vitality += 1,
            StatKind::Defense => self.defense += 1,
        }
    }
}
