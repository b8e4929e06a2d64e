//! Progression: опыт, уровни, stat points
//!
//! Ledger сам по себе - чистая state machine (тестируется без World).
//! ECS слой: `ProgressionLedger` как компонент + две системы, которые читают
//! input события и рассылают output события.

pub mod binding;
pub mod events;
pub mod ledger;
pub mod stats;
pub mod systems;

#[cfg(test)]
mod ledger_tests;

pub use binding::{CombatantSheet, StatSheet, VitalsBinding};
pub use events::{
    ExperienceGranted, ExperienceProgress, LeveledUp, StatAllocationIntent, StatPointAllocated,
};
pub use ledger::{xp_requirement, ExperienceGain, LevelUp, ProgressionError, ProgressionLedger, StatEffect};
pub use stats::{StatAllocation, StatKind};
pub use systems::{apply_experience_grants, apply_stat_allocations};
