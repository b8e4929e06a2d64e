//! VitalsPool - clamped ресурс (health или mana) с регенерацией
//!
//! Инвариант: 0 ≤ current ≤ max, max > 0
//!
//! Pool не знает про ECS и события: каждая мутация возвращает `PoolChange`,
//! а системы превращают его в `HealthChanged` / `ManaChanged` / `EntityDied`.

use bevy::prelude::*;
use thiserror::Error;

/// Константа в формуле mitigation: armor / (armor + ARMOR_SCALE)
pub const ARMOR_SCALE: f32 = 100.0;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum VitalsError {
    #[error("pool max must be > 0 (got {0})")]
    NonPositiveMax(f32),
    #[error("max pool delta must be >= 0 (got {0})")]
    NegativeMaxDelta(f32),
    #[error("amount must be finite (got {0})")]
    NonFiniteAmount(f32),
}

/// Множитель урона от armor: 1 - armor / (armor + 100)
///
/// - armor 0 → 1.0 (полный урон)
/// - armor 100 → 0.5
/// - armor → ∞ → стремится к 0, но никогда его не достигает
///
/// Считается как 100 / (armor + 100): та же формула без катастрофической
/// потери точности в f32 при огромном armor. Отрицательный armor = 0.
pub fn mitigation_factor(armor: f32) -> f32 {
    let armor = armor.max(0.0);
    ARMOR_SCALE / (armor + ARMOR_SCALE)
}

/// Результат одной мутации pool
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoolChange {
    /// current / max после мутации, всегда в [0, 1]
    pub fraction: f32,
    /// Фактическое изменение current (после mitigation и clamp)
    pub applied: f32,
    /// Переход current > 0 → current == 0 произошёл именно в этой мутации
    pub depleted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct VitalsPool {
    current: f32,
    max: f32,
    regen_rate: f32, // units per second
}

impl VitalsPool {
    /// Создаёт полный pool (current = max)
    pub fn new(max: f32, regen_rate: f32) -> Result<Self, VitalsError> {
        if !max.is_finite() {
            return Err(VitalsError::NonFiniteAmount(max));
        }
        if max <= 0.0 {
            return Err(VitalsError::NonPositiveMax(max));
        }
        if !regen_rate.is_finite() {
            return Err(VitalsError::NonFiniteAmount(regen_rate));
        }
        Ok(Self::full(max, regen_rate))
    }

    /// Для заведомо валидных констант внутри crate
    pub(crate) const fn full(max: f32, regen_rate: f32) -> Self {
        Self {
            current: max,
            max,
            regen_rate,
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn regen_rate(&self) -> f32 {
        self.regen_rate
    }

    pub fn fraction(&self) -> f32 {
        self.current / self.max
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    pub fn has_at_least(&self, amount: f32) -> bool {
        self.current >= amount
    }

    /// Добавляет `amount` к current с clamp в [0, max] (без mitigation)
    ///
    /// Non-finite amount отклоняется, pool не меняется.
    pub fn modify(&mut self, amount: f32) -> Result<PoolChange, VitalsError> {
        if !amount.is_finite() {
            return Err(VitalsError::NonFiniteAmount(amount));
        }
        Ok(self.apply(amount))
    }

    /// Как `modify`, но отрицательный amount сначала умножается на
    /// `mitigation_factor(armor)`. Используется только для health.
    pub fn modify_mitigated(&mut self, amount: f32, armor: f32) -> Result<PoolChange, VitalsError> {
        if !amount.is_finite() {
            return Err(VitalsError::NonFiniteAmount(amount));
        }
        let amount = if amount < 0.0 {
            amount * mitigation_factor(armor)
        } else {
            amount
        };
        Ok(self.apply(amount))
    }

    /// Clamp + depletion detection. amount уже проверен на finite.
    fn apply(&mut self, amount: f32) -> PoolChange {
        let was_alive = self.current > 0.0;
        let before = self.current;
        self.current = (self.current + amount).clamp(0.0, self.max);

        PoolChange {
            fraction: self.fraction(),
            applied: self.current - before,
            depleted: was_alive && self.current <= 0.0,
        }
    }

    /// Увеличивает max на `delta` и "лечит в прирост" (current += delta)
    ///
    /// Уменьшение max не поддерживается - stat points только растут.
    pub fn set_max(&mut self, delta: f32) -> Result<PoolChange, VitalsError> {
        if !delta.is_finite() {
            return Err(VitalsError::NonFiniteAmount(delta));
        }
        if delta < 0.0 {
            return Err(VitalsError::NegativeMaxDelta(delta));
        }

        self.max += delta;
        Ok(self.apply(delta))
    }

    /// Полное восстановление (эквивалент modify(max))
    pub fn restore_full(&mut self) -> PoolChange {
        self.apply(self.max)
    }

    /// Tick регенерации. `None` если pool уже полный (нечего сообщать).
    pub fn regenerate(&mut self, delta_time: f32) -> Option<PoolChange> {
        let amount = self.regen_rate * delta_time;
        if self.current >= self.max || self.regen_rate <= 0.0 || !amount.is_finite() {
            return None;
        }
        Some(self.apply(amount))
    }

    /// Множит max и current (elite враги при спавне)
    pub(crate) fn scaled(self, factor: f32) -> Self {
        Self {
            current: self.current * factor,
            max: self.max * factor,
            regen_rate: self.regen_rate,
        }
    }
}
