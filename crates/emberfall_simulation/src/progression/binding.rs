//! Binding бойца к progression ledger
//!
//! Ledger мутирует pools/атрибуты бойца напрямую, но только через этот trait:
//! так ledger не знает ни про ECS Query, ни про то, есть ли у бойца mana.

use crate::components::{Armor, DamageMultiplier, Health, Mana};
use crate::vitals::VitalsPool;

/// Доступ к изменяемым характеристикам одного бойца
pub trait VitalsBinding {
    fn health(&mut self) -> &mut VitalsPool;

    /// `None` - у бойца нет mana pool
    fn mana(&mut self) -> Option<&mut VitalsPool>;

    fn damage_multiplier(&mut self) -> &mut f32;

    fn armor(&mut self) -> &mut f32;
}

/// Binding поверх ECS компонентов (собирается из Query item на время одного вызова)
pub struct CombatantSheet<'a> {
    pub health: &'a mut Health,
    pub mana: Option<&'a mut Mana>,
    pub damage_multiplier: &'a mut DamageMultiplier,
    pub armor: &'a mut Armor,
}

impl VitalsBinding for CombatantSheet<'_> {
    fn health(&mut self) -> &mut VitalsPool {
        &mut self.health.0
    }

    fn mana(&mut self) -> Option<&mut VitalsPool> {
        self.mana.as_deref_mut().map(|mana| &mut mana.0)
    }

    fn damage_multiplier(&mut self) -> &mut f32 {
        &mut self.damage_multiplier.0
    }

    fn armor(&mut self) -> &mut f32 {
        &mut self.armor.0
    }
}

/// Standalone stat sheet (без World): headless расчёты и тесты
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatSheet {
    pub health: VitalsPool,
    pub mana: Option<VitalsPool>,
    pub damage_multiplier: f32,
    pub armor: f32,
}

impl StatSheet {
    /// Baseline: multiplier 1.0, armor 0
    pub fn new(health: VitalsPool, mana: Option<VitalsPool>) -> Self {
        Self {
            health,
            mana,
            damage_multiplier: 1.0,
            armor: 0.0,
        }
    }
}

impl VitalsBinding for StatSheet {
    fn health(&mut self) -> &mut VitalsPool {
        &mut self.health
    }

    fn mana(&mut self) -> Option<&mut VitalsPool> {
        self.mana.as_mut()
    }

    fn damage_multiplier(&mut self) -> &mut f32 {
        &mut self.damage_multiplier
    }

    fn armor(&mut self) -> &mut f32 {
        &mut self.armor
    }
}
