//! ECS Components для бойцов
//!
//! Организация по доменам:
//! - actor: базовые характеристики (Combatant, Health, Mana, Armor, DamageMultiplier)
//! - player: player control marker (Player)
//!
//! Боевые и progression компоненты живут в своих модулях
//! (`combat::MeleeAttacker`, `progression::ProgressionLedger`).

pub mod actor;
pub mod player;

// Re-exports для удобного импорта
pub use actor::*;
pub use player::*;
