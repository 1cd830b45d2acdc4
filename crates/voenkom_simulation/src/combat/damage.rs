//! Damage application
//!
//! Все источники урона за тик приходят events'ами и применяются одной системой
//! в `SimulationSet::Damage`: через guards `SessionState` (после game over /
//! victory урон не проходит).

use bevy::prelude::*;

use crate::item_system::WeaponKind;
use crate::presentation::UiEvent;
use crate::session::SessionState;

/// Откуда пришёл урон по военкому
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageSource {
    Melee(WeaponKind),
    /// Агрегат всех попаданий пуль за тик
    Projectile { hits: u32 },
}

/// Событие: урон военкому
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoenkomDamaged {
    pub amount: u32,
    pub source: DamageSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerDamageCause {
    /// Удар военкома в рукопашной
    Strike,
    /// Задержание (5 сек неподвижности)
    Capture,
}

/// Событие: урон игроку
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerDamaged {
    pub amount: u32,
    pub cause: PlayerDamageCause,
}

/// Система: применяет весь урон тика к `SessionState`
///
/// 1. Урон военкому (провоцирует Attacking, может отозвать повестку)
/// 2. Урон игроку / задержание
pub fn apply_damage(
    mut session: ResMut<SessionState>,
    mut voenkom_events: EventReader<VoenkomDamaged>,
    mut player_events: EventReader<PlayerDamaged>,
    mut ui_events: EventWriter<UiEvent>,
) {
    for event in voenkom_events.read() {
        let report = session.damage_voenkom(event.amount);
        if report.applied == 0 {
            continue;
        }

        crate::log(&format!(
            "Voenkom took {} damage ({:?}), hp {}",
            report.applied, event.source, session.voenkom_hp
        ));

        if report.summons_withdrawn {
            ui_events.write(UiEvent::HideSummons);
        }
        if report.killed {
            crate::log_info("⚰️ Voenkom killed: victory");
        }
    }

    for event in player_events.read() {
        match event.cause {
            PlayerDamageCause::Strike => {
                let applied = session.take_damage(event.amount);
                if applied > 0 {
                    crate::log(&format!("Player took {} damage, hp {}", applied, session.player_hp));
                }
            }
            PlayerDamageCause::Capture => {
                if session.capture_player() {
                    crate::log_info("Player captured: game over");
                }
            }
        }

        if session.is_game_over && session.summons_shown {
            session.summons_shown = false;
            ui_events.write(UiEvent::HideSummons);
        }
    }
}
