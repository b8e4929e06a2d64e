//! Player control marker component
//!
//! Отмечает бойца, которым управляет игрок (в отличие от пассивных врагов).

use bevy::prelude::Component;

/// Marker component для player-controlled бойца
///
/// - Death handling не despawn'ит игрока - только ставит `Dead`
/// - Arena host атакует только от имени `With<Player>`
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;
