//! Combat module
//!
//! ECS ответственность:
//! - Боевые характеристики оружия игрока (cooldown, дальность, урон)
//! - Melee resolution по лучу взгляда
//! - Применение урона к `SessionState` (военком и игрок)
//!
//! Урон приходит events'ами из AI (удары военкома), player input (melee)
//! и shooting (агрегированные попадания пуль), применяется в `SimulationSet::Damage`.

use bevy::prelude::*;

pub mod damage;
pub mod melee;
pub mod weapon_stats;

// Re-export основных типов
pub use damage::{apply_damage, DamageSource, PlayerDamageCause, PlayerDamaged, VoenkomDamaged};
pub use melee::{resolve_melee, MeleeOutcome};
pub use weapon_stats::WeaponStats;

use crate::SimulationSet;

/// Combat Plugin
///
/// Регистрирует damage events и `apply_damage` в FixedUpdate.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<VoenkomDamaged>().add_event::<PlayerDamaged>();

        app.add_systems(FixedUpdate, apply_damage.in_set(SimulationSet::Damage));
    }
}
