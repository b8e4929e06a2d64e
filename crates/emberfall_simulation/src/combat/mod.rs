//! Combat system module
//!
//! ECS ответственность:
//! - Game state: MeleeAttacker (cooldown timestamps), Dead, DespawnAfter
//! - Combat rules: cooldown gate, cone filter, damage × multiplier, armor mitigation
//! - Events: AttackPerformed, AttackRefused, DamageDealt, EntityDied
//!
//! Внешний слой (input / spatial / lifecycle host):
//! - ray-cast aim point и radius query → MeleeAttackIntent
//! - VFX/анимация по AttackPerformed
//! - удаление мёртвых (despawn_after_timeout - минимальный host внутри crate)

pub mod damage;
pub mod events;
pub mod melee;
pub mod systems;


// Re-export основных типов
pub use damage::{calculate_damage, despawn_after_timeout, handle_deaths, Dead, DespawnAfter};
pub use events::{AttackPerformed, AttackRefused, DamageDealt, EntityDied, MeleeAttackIntent};
pub use melee::{
    attempt_attack, is_within_cone, AttackOutcome, AttackReport, AttackSwing, Defender, HitReport,
    MeleeAttacker, ATTACK_ORIGIN_OFFSET, CONE_ANGLE_TOLERANCE,
};
pub use systems::process_melee_attack_intents;
