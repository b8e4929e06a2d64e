//! Combat events
//!
//! Input: `MeleeAttackIntent` (от input/host слоя - уже с результатом radius query)
//! Output: `AttackPerformed`, `AttackRefused`, `DamageDealt`, `EntityDied`

use bevy::prelude::*;

/// Боец хочет выполнить basic melee attack
///
/// Spatial часть (ray-cast, radius query) делает внешний слой:
/// - `aim_point` - точка попадания луча (None → точка на attack_range вперёд)
/// - `candidates` - все бойцы в радиусе attack_range от атакующего
#[derive(Event, Debug, Clone, PartialEq)]
pub struct MeleeAttackIntent {
    pub attacker: Entity,
    pub aim_point: Option<Vec3>,
    pub candidates: Vec<Entity>,
}

/// Атака выполнена (cooldown пройден). Ровно одно событие на атаку,
/// даже если в конус никто не попал. Для VFX / анимации.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AttackPerformed {
    pub attacker: Entity,
    pub origin: Vec3,
    /// Unit vector
    pub direction: Vec3,
    pub timestamp: f32,
}

/// Атака отклонена cooldown'ом (ожидаемая ситуация, не ошибка)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AttackRefused {
    pub attacker: Entity,
    /// Секунд до готовности
    pub remaining: f32,
}

/// Урон нанесён (после mitigation)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamageDealt {
    pub attacker: Entity,
    pub target: Entity,
    /// base_damage × damage_multiplier (до armor)
    pub raw_damage: f32,
    /// Сколько health реально снято (после armor и clamp)
    pub applied_damage: f32,
    pub target_died: bool,
}

/// Боец умер (health 0). Один раз на переход > 0 → 0.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}
