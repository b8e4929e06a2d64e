//! Vitals: clamped resource pools (health, mana), mitigation, регенерация

pub mod events;
pub mod pool;
pub mod systems;

#[cfg(test)]
mod pool_tests;

pub use events::{HealthChanged, ManaChanged};
pub use pool::{mitigation_factor, PoolChange, VitalsError, VitalsPool, ARMOR_SCALE};
pub use systems::regenerate_vitals;
