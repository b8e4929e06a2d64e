//! Combat systems (ECS обёртки над melee/damage правилами)

pub mod melee;

pub use melee::*;
