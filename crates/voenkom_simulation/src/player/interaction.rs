//! Player interaction resolver
//!
//! Чистые функции (тестируются без ECS) + системы, которые применяют
//! их результат: cue, UI events, урон по военкому.

use bevy::prelude::*;
use rand::Rng;

use super::{InteractionTarget, Player, PlayerAction, PlayerConfig, PlayerInput, PlayerView};
use crate::ai::{Voenkom, VoenkomState};
use crate::combat::{resolve_melee, DamageSource, MeleeOutcome, VoenkomDamaged, WeaponStats};
use crate::item_system::{item_in_view, WeaponKind};
use crate::presentation::{AudioCue, CueRequest, UiEvent};
use crate::session::SessionState;
use crate::world::{HotSpot, RoomGeometry};
use crate::DeterministicRng;

/// Результат нажатия атаки
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttackOutcome {
    /// У глазка или партия не идёт
    Rejected,
    CoolingDown,
    /// Глок без патронов (cooldown не трогаем)
    EmptyClick,
    Fired { bullet_id: u64, summons_withdrawn: bool },
    Melee { weapon: WeaponKind, outcome: MeleeOutcome },
}

#[derive(Debug, Clone, PartialEq)]
pub enum PickupOutcome {
    PickedUp(WeaponKind),
    Dropped(String),
    Nothing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseOutcome {
    EnteredPeephole,
    ExitedPeephole,
    DoorToggled { open: bool },
    Nothing,
}

/// Цель под прицелом: предмет важнее hot-spot'ов двери
pub fn find_interaction_target(
    session: &SessionState,
    geometry: &RoomGeometry,
    view: &PlayerView,
    config: &PlayerConfig,
) -> Option<InteractionTarget> {
    if let Some(item) = item_in_view(
        &session.world_items,
        view.eye,
        view.look,
        config.pickup_reach,
        config.pickup_alignment,
    ) {
        return Some(InteractionTarget::Item {
            id: item.id.clone(),
            name: item.display_name.clone(),
        });
    }

    geometry
        .hot_spot_in_view(view.eye, view.look, config.use_reach, session.door_open)
        .map(InteractionTarget::HotSpot)
}

pub fn interaction_hint(target: Option<&InteractionTarget>, door_open: bool) -> String {
    match target {
        Some(InteractionTarget::Item { name, .. }) => format!("G: Взять {}", name),
        Some(InteractionTarget::HotSpot(HotSpot::Peephole)) => "F: Глазок".to_string(),
        Some(InteractionTarget::HotSpot(HotSpot::DoorHandle)) => {
            let label = if door_open { "F: Закрыть" } else { "F: Открыть" };
            label.to_string()
        }
        None => String::new(),
    }
}

/// Атака текущим оружием.
///
/// Cooldown отсчитывается от последней успешной атаки по session clock.
/// Melee урон не применяется здесь: вызывающий отправляет `VoenkomDamaged`.
pub fn resolve_attack(
    session: &mut SessionState,
    player: &mut Player,
    geometry: &RoomGeometry,
    view: &PlayerView,
    voenkom_feet: Option<Vec3>,
) -> AttackOutcome {
    if session.peephole_active || !session.accepts_player_actions() {
        return AttackOutcome::Rejected;
    }

    let weapon = session.current_weapon();
    let stats = WeaponStats::for_kind(weapon);
    if !stats.is_ready(session.clock, player.last_attack_at) {
        return AttackOutcome::CoolingDown;
    }

    if stats.ranged {
        if !session.use_ammo() {
            return AttackOutcome::EmptyClick;
        }
        player.last_attack_at = Some(session.clock);
        let bullet_id = session.spawn_bullet(view.muzzle, view.look);
        let summons_withdrawn = session.provoke();
        return AttackOutcome::Fired {
            bullet_id,
            summons_withdrawn,
        };
    }

    player.last_attack_at = Some(session.clock);
    let outcome = resolve_melee(geometry, view.eye, view.look, weapon, session.door_open, voenkom_feet);
    AttackOutcome::Melee { weapon, outcome }
}

/// G: подобрать предмет под прицелом, иначе выбросить оружие из рук
pub fn pickup_or_drop(
    session: &mut SessionState,
    feet: Vec3,
    view: &PlayerView,
    config: &PlayerConfig,
    rng: &mut impl Rng,
) -> PickupOutcome {
    let target = item_in_view(
        &session.world_items,
        view.eye,
        view.look,
        config.pickup_reach,
        config.pickup_alignment,
    )
    .map(|item| item.id.clone());

    if let Some(id) = target {
        return session
            .pickup_item(&id)
            .map_or(PickupOutcome::Nothing, PickupOutcome::PickedUp);
    }

    session
        .drop_active_item(feet, view.look, rng)
        .map_or(PickupOutcome::Nothing, PickupOutcome::Dropped)
}

/// F: выйти из глазка / посмотреть в глазок / открыть-закрыть дверь
pub fn use_interaction(session: &mut SessionState, player: &mut Player) -> UseOutcome {
    if session.peephole_active {
        session.set_peephole(false);
        return UseOutcome::ExitedPeephole;
    }

    match player.interaction_target {
        Some(InteractionTarget::HotSpot(HotSpot::Peephole)) if !session.door_open => {
            session.set_peephole(true);
            session.set_interaction_text("");
            player.interaction_target = None;
            player.peephole_agitation = 0.0;
            UseOutcome::EnteredPeephole
        }
        Some(InteractionTarget::HotSpot(HotSpot::DoorHandle)) => {
            let open = session.toggle_door();
            session.set_interaction_text("");
            UseOutcome::DoorToggled { open }
        }
        _ => UseOutcome::Nothing,
    }
}

// ============================================================================
// Systems
// ============================================================================

/// Система: цель под прицелом + hint (только пока партия идёт и не у глазка)
pub fn update_interaction_target(
    mut session: ResMut<SessionState>,
    geometry: Res<RoomGeometry>,
    config: Res<PlayerConfig>,
    mut player_query: Query<(&mut Player, &Transform)>,
) {
    let Ok((mut player, transform)) = player_query.single_mut() else {
        return;
    };

    let target = if session.accepts_player_actions() && !session.peephole_active {
        let view = player.view(transform.translation, &config);
        find_interaction_target(&session, &geometry, &view, &config)
    } else {
        None
    };

    let hint = interaction_hint(target.as_ref(), session.door_open);
    if session.interaction_text != hint {
        session.set_interaction_text(hint);
    }
    if player.interaction_target != target {
        player.interaction_target = target;
    }
}

/// Система: очередь действий игрока
#[allow(clippy::too_many_arguments)]
pub fn process_player_actions(
    mut input: ResMut<PlayerInput>,
    mut session: ResMut<SessionState>,
    mut rng: ResMut<DeterministicRng>,
    geometry: Res<RoomGeometry>,
    config: Res<PlayerConfig>,
    mut player_query: Query<(&mut Player, &Transform)>,
    voenkom_query: Query<&Transform, With<Voenkom>>,
    mut cue_events: EventWriter<CueRequest>,
    mut ui_events: EventWriter<UiEvent>,
    mut damage_events: EventWriter<VoenkomDamaged>,
) {
    if input.actions.is_empty() {
        return;
    }
    let actions = std::mem::take(&mut input.actions);

    if !session.accepts_player_actions() {
        crate::log(&format!("Ignoring {} player action(s): session not running", actions.len()));
        return;
    }

    let Ok((mut player, transform)) = player_query.single_mut() else {
        crate::log_warning("Player actions without a Player entity");
        return;
    };
    let feet = transform.translation;

    for action in actions {
        let view = player.view(feet, &config);

        match action {
            PlayerAction::Attack => {
                let voenkom_feet = if session.voenkom_state == VoenkomState::Dead {
                    None
                } else {
                    voenkom_query.single().ok().map(|transform| transform.translation)
                };

                match resolve_attack(&mut session, &mut player, &geometry, &view, voenkom_feet) {
                    AttackOutcome::Rejected | AttackOutcome::CoolingDown => {}
                    AttackOutcome::EmptyClick => {
                        cue_events.write(CueRequest(AudioCue::EmptyClick));
                    }
                    AttackOutcome::Fired {
                        bullet_id,
                        summons_withdrawn,
                    } => {
                        cue_events.write(CueRequest(AudioCue::Gunshot));
                        if summons_withdrawn {
                            ui_events.write(UiEvent::HideSummons);
                        }
                        crate::log(&format!("🔫 Bullet {} fired, ammo left {}", bullet_id, session.ammo));
                    }
                    AttackOutcome::Melee { weapon, outcome } => {
                        cue_events.write(CueRequest(AudioCue::Swing));
                        match outcome {
                            MeleeOutcome::HitVoenkom { damage, .. } => {
                                cue_events.write(CueRequest(AudioCue::Hit));
                                damage_events.write(VoenkomDamaged {
                                    amount: damage,
                                    source: DamageSource::Melee(weapon),
                                });
                            }
                            MeleeOutcome::HitScenery { .. } => {
                                cue_events.write(CueRequest(AudioCue::WallHit));
                            }
                            MeleeOutcome::Miss => {}
                        }
                    }
                }
            }
            PlayerAction::PickupOrDrop => {
                if session.peephole_active {
                    continue;
                }
                pickup_or_drop(&mut session, feet, &view, &config, &mut rng.rng);
            }
            PlayerAction::Use => {
                let outcome = use_interaction(&mut session, &mut player);
                if outcome != UseOutcome::Nothing {
                    crate::log(&format!("Use: {:?}", outcome));
                }
            }
            PlayerAction::SelectSlot(slot) => {
                if !session.select_slot(slot) {
                    crate::log_warning(&format!("Slot {} out of range", slot));
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "interaction_tests.rs"]
mod interaction_tests;
