//! ProgressionLedger - опыт, уровни, банк stat points
//!
//! # State machine
//!
//! Состояние = (level, current_xp). Терминального состояния нет.
//!
//! ```text
//! add_experience(amount)
//!   ↓
//! current_xp += amount → ExperienceProgress (fraction, может быть > 1.0)
//!   ↓
//! while current_xp >= xp_to_next_level:
//!     level_up() → full heal (health + mana) → LeveledUp(level)
//! ```
//!
//! После обработки всегда `current_xp < xp_to_next_level`.

use bevy::prelude::*;
use thiserror::Error;
use crate::config::ProgressionConfig;
use crate::vitals::{PoolChange, VitalsError};
use super::{StatAllocation, StatKind, VitalsBinding};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProgressionError {
    #[error("experience grant must be a finite non-negative amount (got {0})")]
    InvalidExperience(f32),
    #[error("no stat points available")]
    NoStatPointsAvailable,
    #[error("combatant has no capability for {0:?}")]
    MissingCapability(StatKind),
    #[error("invalid progression config: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Vitals(#[from] VitalsError),
}

/// Один level-up внутри `add_experience`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelUp {
    pub level: u32,
    pub health: PoolChange,
    pub mana: Option<PoolChange>,
}

/// Результат `add_experience`
#[derive(Debug, Clone, PartialEq)]
pub struct ExperienceGain {
    /// current_xp / xp_to_next_level сразу после начисления (до level-ups)
    pub progress: f32,
    /// Level-ups в порядке получения (пусто, если порог не достигнут)
    pub level_ups: Vec<LevelUp>,
}

/// Эффект одного вложенного stat point
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatEffect {
    DamageMultiplier { total: f32 },
    MaxMana(PoolChange),
    MaxHealth(PoolChange),
    Armor { total: f32 },
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct ProgressionLedger {
    config: ProgressionConfig,
    level: u32,
    current_xp: f32,
    xp_to_next_level: f32,
    available_stat_points: u32,
    allocation: StatAllocation,
}

impl ProgressionLedger {
    /// Стартовый уровень из config, очки за уже "пройденные" уровни выданы сразу
    pub fn new(config: ProgressionConfig) -> Result<Self, ProgressionError> {
        config
            .validate()
            .map_err(|e| ProgressionError::InvalidConfig(e.to_string()))?;

        let level = config.starting_level;
        let available_stat_points = (level - 1)
            .checked_mul(config.points_per_level)
            .ok_or_else(|| ProgressionError::InvalidConfig("stat points overflow".into()))?;
        Ok(Self {
            config,
            level,
            current_xp: 0.0,
            xp_to_next_level: xp_requirement(&config, level),
            available_stat_points,
            allocation: StatAllocation::default(),
        })
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn current_xp(&self) -> f32 {
        self.current_xp
    }

    pub fn xp_to_next_level(&self) -> f32 {
        self.xp_to_next_level
    }

    pub fn available_stat_points(&self) -> u32 {
        self.available_stat_points
    }

    pub fn allocation(&self) -> &StatAllocation {
        &self.allocation
    }

    pub fn config(&self) -> &ProgressionConfig {
        &self.config
    }

    pub fn progress_fraction(&self) -> f32 {
        self.current_xp / self.xp_to_next_level
    }

    /// Начисляет опыт и eagerly разрешает все level-ups
    pub fn add_experience(
        &mut self,
        amount: f32,
        binding: &mut impl VitalsBinding,
    ) -> Result<ExperienceGain, ProgressionError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(ProgressionError::InvalidExperience(amount));
        }

        self.current_xp += amount;
        let progress = self.progress_fraction();

        let mut level_ups = Vec::new();
        while self.current_xp >= self.xp_to_next_level {
            level_ups.push(self.level_up(binding));
        }

        Ok(ExperienceGain { progress, level_ups })
    }

    /// Full heal - на каждый уровень, не один раз за grant
    fn level_up(&mut self, binding: &mut impl VitalsBinding) -> LevelUp {
        self.current_xp -= self.xp_to_next_level;
        self.level = self.level.saturating_add(1);
        self.available_stat_points = self
            .available_stat_points
            .saturating_add(self.config.points_per_level);
        self.xp_to_next_level = xp_requirement(&self.config, self.level);

        let health = binding.health().restore_full();
        let mana = binding.mana().map(|mana| mana.restore_full());

        LevelUp {
            level: self.level,
            health,
            mana,
        }
    }

    /// Тратит один stat point. Эффект аддитивный и необратимый.
    ///
    /// Без свободных очков или без нужного pool - отказ без мутаций.
    pub fn allocate_stat_point(
        &mut self,
        stat: StatKind,
        binding: &mut impl VitalsBinding,
    ) -> Result<StatEffect, ProgressionError> {
        if self.available_stat_points == 0 {
            return Err(ProgressionError::NoStatPointsAvailable);
        }

        let effects = self.config.effects;
        let effect = match stat {
            StatKind::Strength => {
                let multiplier = binding.damage_multiplier();
                *multiplier += effects.damage_multiplier_per_strength;
                StatEffect::DamageMultiplier { total: *multiplier }
            }
            StatKind::Intelligence => {
                let mana = binding
                    .mana()
                    .ok_or(ProgressionError::MissingCapability(stat))?;
                StatEffect::MaxMana(mana.set_max(effects.max_mana_per_intelligence)?)
            }
            StatKind::Vitality => {
                StatEffect::MaxHealth(binding.health().set_max(effects.max_health_per_vitality)?)
            }
            StatKind::Defense => {
                let armor = binding.armor();
                *armor += effects.armor_per_defense;
                StatEffect::Armor { total: *armor }
            }
        };

        self.allocation.increment(stat);
        self.available_stat_points -= 1;

        Ok(effect)
    }
}

/// xp_to_next = base_xp * multiplier^(level - 1)
pub fn xp_requirement(config: &ProgressionConfig, level: u32) -> f32 {
    let exponent = level.saturating_sub(1).min(i32::MAX as u32) as i32;
    config.base_xp * config.xp_multiplier.powi(exponent)
}
