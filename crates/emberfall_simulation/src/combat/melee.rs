//! Melee combat: cooldown gate, направление удара, cone filter, урон.
//!
//! # Attack Flow
//!
//! ```text
//! MeleeAttackIntent (input layer: aim point + radius query result)
//!   ↓
//! AttackSwing::begin - cooldown gate (per-attacker), direction, facing update
//!   ↓
//! swing.strike(candidate) - cone filter (half-angle), armor mitigation
//!   ↓
//! DamageDealt / HealthChanged / EntityDied + один AttackPerformed
//! ```
//!
//! Модель "все цели в конусе получают полный урон": без falloff,
//! без выбора одной цели.

use bevy::prelude::*;
use crate::components::Health;
use crate::config::MeleeTuning;
use crate::vitals::PoolChange;
use super::calculate_damage;

/// Точка origin для VFX - на столько вперёд от атакующего (по новому facing)
pub const ATTACK_ORIGIN_OFFSET: f32 = 1.0;

/// Допуск на границе конуса (rad): только float noise от acos в f32 (~1e-7).
/// Граница включительная, всё что дальше half_angle + 1e-6 - мимо.
pub const CONE_ANGLE_TOLERANCE: f32 = 1e-6;

// ============================================================================
// Components
// ============================================================================

/// Способность выполнять basic melee attack
///
/// Cooldown считается по timestamp'ам (elapsed fixed time), не по таймеру:
/// атака разрешена, если с последней успешной прошло ≥ cooldown.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct MeleeAttacker {
    /// Урон до damage multiplier
    pub base_damage: f32,
    /// Радиус для radius query (использует внешний spatial слой)
    pub attack_range: f32,
    /// Полная ширина конуса (градусы)
    pub attack_angle_degrees: f32,
    /// Секунд между атаками
    pub cooldown: f32,
    /// Время последней успешной атаки (None - ещё не атаковал)
    pub last_attack_at: Option<f32>,
}

impl Default for MeleeAttacker {
    fn default() -> Self {
        Self::from_tuning(&MeleeTuning::default())
    }
}

impl MeleeAttacker {
    pub fn from_tuning(tuning: &MeleeTuning) -> Self {
        Self {
            base_damage: tuning.base_damage,
            attack_range: tuning.attack_range,
            attack_angle_degrees: tuning.attack_angle_degrees,
            cooldown: tuning.cooldown_seconds,
            last_attack_at: None,
        }
    }

    pub fn half_angle_radians(&self) -> f32 {
        (self.attack_angle_degrees * 0.5).to_radians()
    }

    pub fn can_attack(&self, now: f32) -> bool {
        match self.last_attack_at {
            None => true,
            Some(last) => now - last >= self.cooldown,
        }
    }

    /// Секунд до готовности (0 если готов)
    pub fn cooldown_remaining(&self, now: f32) -> f32 {
        match self.last_attack_at {
            None => 0.0,
            Some(last) => (last + self.cooldown - now).max(0.0),
        }
    }

    /// Для cooldown индикатора: 1.0 сразу после атаки → 0.0 когда готов
    pub fn cooldown_fraction(&self, now: f32) -> f32 {
        if self.cooldown <= 0.0 {
            return 0.0;
        }
        (self.cooldown_remaining(now) / self.cooldown).clamp(0.0, 1.0)
    }
}

// ============================================================================
// Swing
// ============================================================================

/// Одна одобренная атака (cooldown уже потрачен)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackSwing {
    pub attacker_position: Vec3,
    /// Точка для VFX (attacker + facing × ATTACK_ORIGIN_OFFSET)
    pub origin: Vec3,
    /// Unit vector от атакующего к aim point (3D, не только горизонталь)
    pub direction: Vec3,
    pub half_angle: f32,
    /// base_damage × damage_multiplier
    pub damage: f32,
    pub timestamp: f32,
}

impl AttackSwing {
    /// Cooldown gate + direction resolution.
    ///
    /// `Err(remaining)` - атака на cooldown, ничего не изменилось.
    /// При успехе: `last_attack_at = now`, facing атакующего повёрнут
    /// к aim point в горизонтальной плоскости.
    pub fn begin(
        attacker: &mut MeleeAttacker,
        transform: &mut Transform,
        damage_multiplier: Option<f32>,
        aim_point: Option<Vec3>,
        now: f32,
    ) -> Result<Self, f32> {
        if !attacker.can_attack(now) {
            return Err(attacker.cooldown_remaining(now));
        }
        attacker.last_attack_at = Some(now);

        let position = transform.translation;
        let forward = transform.forward().as_vec3();

        // Нет попадания луча → точка на attack_range прямо перед бойцом
        let target_point = aim_point.unwrap_or(position + forward * attacker.attack_range);
        let direction = (target_point - position).try_normalize().unwrap_or(forward);

        // Facing - только горизонтальная проекция (вертикальный aim facing не трогает)
        if let Some(flat) = Vec3::new(direction.x, 0.0, direction.z).try_normalize() {
            transform.look_to(flat, Vec3::Y);
        }

        Ok(Self {
            attacker_position: position,
            origin: position + transform.forward().as_vec3() * ATTACK_ORIGIN_OFFSET,
            direction,
            half_angle: attacker.half_angle_radians(),
            damage: calculate_damage(attacker.base_damage, damage_multiplier),
            timestamp: now,
        })
    }

    pub fn covers(&self, target_position: Vec3) -> bool {
        is_within_cone(self.direction, target_position - self.attacker_position, self.half_angle)
    }

    /// Бьёт кандидата, если он в конусе. `None` - вне конуса
    /// (или non-finite урон, который pool отклоняет).
    pub fn strike(&self, target_position: Vec3, health: &mut Health, armor: f32) -> Option<PoolChange> {
        if !self.covers(target_position) {
            return None;
        }
        health.modify_mitigated(-self.damage, armor).ok()
    }
}

/// Half-angle test: угол между direction и to_target ≤ half_angle (включительно)
///
/// Кандидат в той же точке, что и атакующий, считается попавшим.
pub fn is_within_cone(direction: Vec3, to_target: Vec3, half_angle: f32) -> bool {
    if to_target.length_squared() <= f32::EPSILON {
        return true;
    }
    let length = direction.length() * to_target.length();
    if length <= f32::EPSILON {
        return true;
    }
    // std acos, не glam approx: иначе погрешность больше допуска
    let angle = (direction.dot(to_target) / length).clamp(-1.0, 1.0).acos();
    angle <= half_angle + CONE_ANGLE_TOLERANCE
}

// ============================================================================
// Standalone resolver (без World)
// ============================================================================

/// Кандидат на удар. `health: None` - сущность без health (пропускается).
pub struct Defender<'a> {
    pub entity: Entity,
    pub position: Vec3,
    pub health: Option<&'a mut Health>,
    pub armor: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitReport {
    pub target: Entity,
    pub change: PoolChange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttackReport {
    pub origin: Vec3,
    pub direction: Vec3,
    pub timestamp: f32,
    pub damage: f32,
    pub hits: Vec<HitReport>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttackOutcome {
    /// Refusal, не ошибка: ни урона, ни AttackPerformed
    OnCooldown { remaining: f32 },
    Performed(AttackReport),
}

/// Полный цикл одной атаки над уже собранными кандидатами
///
/// `damage_multiplier: None` - у атакующего нет progression binding (1.0).
pub fn attempt_attack(
    attacker: &mut MeleeAttacker,
    transform: &mut Transform,
    damage_multiplier: Option<f32>,
    aim_point: Option<Vec3>,
    defenders: &mut [Defender<'_>],
    now: f32,
) -> AttackOutcome {
    let swing = match AttackSwing::begin(attacker, transform, damage_multiplier, aim_point, now) {
        Ok(swing) => swing,
        Err(remaining) => return AttackOutcome::OnCooldown { remaining },
    };

    let hits = defenders
        .iter_mut()
        .filter_map(|defender| {
            let health = defender.health.as_deref_mut()?;
            let change = swing.strike(defender.position, health, defender.armor)?;
            Some(HitReport {
                target: defender.entity,
                change,
            })
        })
        .collect();

    AttackOutcome::Performed(AttackReport {
        origin: swing.origin,
        direction: swing.direction,
        timestamp: swing.timestamp,
        damage: swing.damage,
        hits,
    })
}
