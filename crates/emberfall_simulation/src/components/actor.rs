//! Базовые компоненты бойцов: Combatant, Health, Mana, Armor, DamageMultiplier

use bevy::prelude::*;
use crate::vitals::VitalsPool;

/// Боец (игрок или враг) - базовый компонент для всего, что участвует в бою
///
/// Автоматически добавляет Health, DamageMultiplier, Armor, Transform через Required Components.
/// Mana опциональна (у врагов её нет).
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Health, DamageMultiplier, Armor, Transform)]
pub struct Combatant;

/// Здоровье бойца
///
/// Инвариант: 0 ≤ current ≤ max (держит VitalsPool)
/// Отрицательные изменения проходят через armor mitigation.
#[derive(Component, Debug, Clone, Copy, Deref, DerefMut, Reflect)]
#[reflect(Component)]
pub struct Health(pub VitalsPool);

impl Default for Health {
    fn default() -> Self {
        Self(VitalsPool::full(100.0, 0.0)) // Default 100 HP, без regen
    }
}

/// Мана бойца (без mitigation - armor защищает только health)
#[derive(Component, Debug, Clone, Copy, Deref, DerefMut, Reflect)]
#[reflect(Component)]
pub struct Mana(pub VitalsPool);

impl Default for Mana {
    fn default() -> Self {
        Self(VitalsPool::full(100.0, 0.0))
    }
}

/// Множитель исходящего урона (baseline 1.0, растёт от strength)
#[derive(Component, Debug, Clone, Copy, PartialEq, Deref, DerefMut, Reflect)]
#[reflect(Component)]
pub struct DamageMultiplier(pub f32);

impl Default for DamageMultiplier {
    fn default() -> Self {
        Self(1.0)
    }
}

/// Armor (baseline 0, растёт от defense). Входит в mitigation_factor.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Deref, DerefMut, Reflect)]
#[reflect(Component)]
pub struct Armor(pub f32);

/// Маркер элитного врага: max health ×2 при спавне
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Elite;

/// XP, которое получит убийца этого бойца
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct ExperienceReward(pub f32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_default_full() {
        let health = Health::default();
        assert_eq!(health.current(), 100.0);
        assert_eq!(health.max(), 100.0);
        assert!(health.is_full());
    }

    #[test]
    fn test_health_deref_mutation() {
        let mut health = Health::default();
        let change = health.modify(-30.0).unwrap();

        assert_eq!(health.current(), 70.0);
        assert!((change.fraction - 0.7).abs() < 1e-6);
        assert!(!change.depleted);
    }

    #[test]
    fn test_baselines() {
        assert_eq!(DamageMultiplier::default().0, 1.0);
        assert_eq!(Armor::default().0, 0.0);
    }

    #[test]
    fn test_combatant_requires_vitals() {
        let mut world = World::new();
        let entity = world.spawn(Combatant).id();

        assert!(world.get::<Health>(entity).is_some());
        assert!(world.get::<DamageMultiplier>(entity).is_some());
        assert!(world.get::<Armor>(entity).is_some());
        assert!(world.get::<Transform>(entity).is_some());
        assert!(world.get::<Mana>(entity).is_none());
    }
}
