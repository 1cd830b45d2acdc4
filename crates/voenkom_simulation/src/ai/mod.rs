//! AI module: военком и соседский ребёнок
//!
//! Архитектура:
//! - `voenkom_fsm::step`: чистый автомат (brain + context → переходы и эффекты)
//! - `systems::voenkom_fsm_system`: context из мира, эффекты в events / SessionState
//! - `kid`: скриптовый ребёнок (выкрики + прыжки)
//! - `phrases`: пулы реплик

use bevy::prelude::*;

pub mod components;
pub mod kid;
pub mod phrases;
pub mod systems;
pub mod voenkom_fsm;

// Re-export основных типов
pub use components::{taunt_interval, DeathSequence, Voenkom, VoenkomConfig, VoenkomPose, VoenkomState};
pub use kid::{kid_heckler_system, Kid};
pub use systems::voenkom_fsm_system;
pub use voenkom_fsm::{step, VoenkomContext, VoenkomEffect, VoenkomStep};

use crate::SimulationSet;

/// AI Plugin
///
/// Регистрирует AI системы в FixedUpdate (`SimulationSet::Antagonist`).
/// Порядок выполнения:
/// 1. voenkom_fsm_system: тик автомата военкома
/// 2. kid_heckler_system: ребёнок видит уже обновлённое состояние военкома
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<VoenkomConfig>();

        app.add_systems(
            FixedUpdate,
            (voenkom_fsm_system, kid_heckler_system)
                .chain() // Последовательное выполнение для детерминизма
                .in_set(SimulationSet::Antagonist),
        );
    }
}
