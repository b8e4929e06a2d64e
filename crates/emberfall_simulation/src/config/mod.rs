//! Gameplay tuning: все числа геймплея в одном `Resource`
//!
//! Загружается из RON (`tuning.ron`), отсутствующие поля берутся из `Default`.
//! После парсинга конфиг валидируется - невалидный tuning не попадает в World.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse RON: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Failed to serialize tuning: {0}")]
    Serialize(#[from] ron::Error),
    #[error("Invalid tuning: {0}")]
    Invalid(String),
}

/// Параметры одного vitals pool (health или mana)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoolTuning {
    pub max: f32,
    pub regen_per_second: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub health: PoolTuning,
    pub mana: PoolTuning,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            health: PoolTuning { max: 100.0, regen_per_second: 1.0 },
            mana: PoolTuning { max: 100.0, regen_per_second: 2.0 },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub health: PoolTuning,
    /// Множитель max health для `Elite` (применяется один раз при спавне)
    pub elite_health_multiplier: f32,
    /// XP, которое получает убийца
    pub experience_reward: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            health: PoolTuning { max: 50.0, regen_per_second: 0.0 },
            elite_health_multiplier: 2.0,
            experience_reward: 25.0,
        }
    }
}

/// Basic melee attack (конус перед атакующим)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeleeTuning {
    pub base_damage: f32,
    pub attack_range: f32,
    /// Полная ширина конуса в градусах (half-angle = attack_angle / 2)
    pub attack_angle_degrees: f32,
    pub cooldown_seconds: f32,
}

impl Default for MeleeTuning {
    fn default() -> Self {
        Self {
            base_damage: 10.0,
            attack_range: 5.0,
            attack_angle_degrees: 90.0,
            cooldown_seconds: 0.5,
        }
    }
}

/// Фиксированный эффект одного stat point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatPointEffects {
    pub damage_multiplier_per_strength: f32,
    pub max_mana_per_intelligence: f32,
    pub max_health_per_vitality: f32,
    pub armor_per_defense: f32,
}

impl Default for StatPointEffects {
    fn default() -> Self {
        Self {
            damage_multiplier_per_strength: 2.0,
            max_mana_per_intelligence: 5.0,
            max_health_per_vitality: 10.0,
            armor_per_defense: 1.0,
        }
    }
}

/// Кривая опыта: xp_to_next = base_xp * xp_multiplier^(level - 1)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    pub starting_level: u32,
    pub base_xp: f32,
    pub xp_multiplier: f32,
    pub points_per_level: u32,
    pub effects: StatPointEffects,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            starting_level: 1,
            base_xp: 100.0,
            xp_multiplier: 1.5,
            points_per_level: 5,
            effects: StatPointEffects::default(),
        }
    }
}

impl ProgressionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.starting_level < 1 {
            return Err(ConfigError::Invalid("progression.starting_level must be >= 1".into()));
        }
        if !(self.base_xp > 0.0) {
            return Err(ConfigError::Invalid("progression.base_xp must be > 0".into()));
        }
        if !(self.xp_multiplier > 1.0) || !self.xp_multiplier.is_finite() || !self.base_xp.is_finite() {
            return Err(ConfigError::Invalid(
                "progression.xp_multiplier must be > 1 and base_xp finite".into(),
            ));
        }
        if (self.starting_level - 1).checked_mul(self.points_per_level).is_none() {
            return Err(ConfigError::Invalid(
                "progression.starting_level × points_per_level overflows stat points".into(),
            ));
        }
        let exponent = i32::try_from(self.starting_level - 1).unwrap_or(i32::MAX);
        if !(self.base_xp * self.xp_multiplier.powi(exponent)).is_finite() {
            return Err(ConfigError::Invalid(
                "progression.starting_level is too high for the xp curve".into(),
            ));
        }

        let effects = &self.effects;
        let per_point = [
            effects.damage_multiplier_per_strength,
            effects.max_mana_per_intelligence,
            effects.max_health_per_vitality,
            effects.armor_per_defense,
        ];
        if per_point.iter().any(|value| !(*value >= 0.0)) {
            return Err(ConfigError::Invalid("progression.effects must be non-negative".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeathTuning {
    /// Сколько секунд труп врага остаётся в мире до despawn (0 = следующий tick)
    pub corpse_linger_seconds: f32,
}

impl Default for DeathTuning {
    fn default() -> Self {
        Self { corpse_linger_seconds: 0.0 }
    }
}

/// Все tunable параметры геймплея
#[derive(Resource, Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayTuning {
    pub player: PlayerTuning,
    pub enemy: EnemyTuning,
    pub melee: MeleeTuning,
    pub progression: ProgressionConfig,
    pub death: DeathTuning,
}

impl GameplayTuning {
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let tuning: Self = ron::from_str(source)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let pools = [
            ("player.health", self.player.health),
            ("player.mana", self.player.mana),
            ("enemy.health", self.enemy.health),
        ];
        for (name, pool) in pools {
            if !(pool.max > 0.0) {
                return Err(ConfigError::Invalid(format!("{name}.max must be > 0")));
            }
            if !(pool.regen_per_second >= 0.0) {
                return Err(ConfigError::Invalid(format!("{name}.regen_per_second must be >= 0")));
            }
        }

        if !(self.enemy.elite_health_multiplier > 0.0) {
            return Err(ConfigError::Invalid("enemy.elite_health_multiplier must be > 0".into()));
        }
        if !(self.enemy.experience_reward >= 0.0) {
            return Err(ConfigError::Invalid("enemy.experience_reward must be >= 0".into()));
        }

        let melee = &self.melee;
        if !(melee.attack_angle_degrees > 0.0 && melee.attack_angle_degrees <= 360.0) {
            return Err(ConfigError::Invalid("melee.attack_angle_degrees must be in (0, 360]".into()));
        }
        let melee_values = [melee.base_damage, melee.attack_range, melee.cooldown_seconds];
        if melee_values.iter().any(|value| !(*value >= 0.0 && value.is_finite())) {
            return Err(ConfigError::Invalid("melee values must be finite and non-negative".into()));
        }

        if !(self.death.corpse_linger_seconds >= 0.0) {
            return Err(ConfigError::Invalid("death.corpse_linger_seconds must be >= 0".into()));
        }

        self.progression.validate()
    }
}
