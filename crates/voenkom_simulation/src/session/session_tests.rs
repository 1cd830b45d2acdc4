//! Tests for session state guards and inventory transitions.

use super::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn running() -> SessionState {
    SessionState::started(0.0)
}

#[test]
fn test_new_session_defaults() {
    let session = SessionState::default();
    assert!(!session.is_started());
    assert_eq!(session.elapsed(), 0.0);
    assert_eq!(session.player_hp, MAX_PLAYER_HP);
    assert_eq!(session.voenkom_hp, MAX_VOENKOM_HP);
    assert_eq!(session.ammo, STARTING_AMMO);
    assert_eq!(session.voenkom_state, VoenkomState::Waiting);
    assert_eq!(session.world_items.len(), 4);
    assert_eq!(session.message, INTRO_MESSAGE);
}

#[test]
fn test_elapsed_follows_clock() {
    let mut session = SessionState::started(3.0);
    session.clock = 13.5;
    assert!((session.elapsed() - 10.5).abs() < 1e-5);
}

#[test]
fn test_player_damage_clamps_at_zero() {
    let mut session = running();

    assert_eq!(session.take_damage(30), 30);
    assert_eq!(session.player_hp, 70);

    assert_eq!(session.take_damage(500), 70);
    assert_eq!(session.player_hp, 0);
    assert!(session.is_game_over);
    assert_eq!(session.outcome, Some(GameOutcome::Killed));
    assert_eq!(session.message, KILLED_MESSAGE);
}

#[test]
fn test_no_damage_after_game_over() {
    let mut session = running();
    session.take_damage(100);
    let voenkom_hp = session.voenkom_hp;

    assert_eq!(session.take_damage(10), 0);
    let report = session.damage_voenkom(50);
    assert_eq!(report, VoenkomDamageReport::default());
    assert_eq!(session.voenkom_hp, voenkom_hp);
}

#[test]
fn test_voenkom_death_on_exact_zero() {
    let mut session = running();

    session.damage_voenkom(100);
    assert_eq!(session.voenkom_state, VoenkomState::Attacking);

    let report = session.damage_voenkom(50);
    assert!(report.killed);
    assert_eq!(session.voenkom_hp, 0);
    assert_eq!(session.voenkom_state, VoenkomState::Dead);
    assert!(session.is_victory);
    assert_eq!(session.outcome, Some(GameOutcome::Victory));
    assert_eq!(session.message, VICTORY_MESSAGE);
}

#[test]
fn test_overkill_does_not_go_negative_and_dead_is_sticky() {
    let mut session = running();

    let report = session.damage_voenkom(400);
    assert_eq!(report.applied, MAX_VOENKOM_HP);
    assert_eq!(session.voenkom_hp, 0);

    assert_eq!(session.damage_voenkom(25), VoenkomDamageReport::default());
    // Победа замораживает и урон по игроку
    assert_eq!(session.take_damage(20), 0);
    assert_eq!(session.player_hp, MAX_PLAYER_HP);
}

#[test]
fn test_damage_while_offering_withdraws_summons() {
    let mut session = running();
    session.voenkom_state = VoenkomState::Offering;
    session.summons_shown = true;

    let report = session.damage_voenkom(25);

    assert!(report.summons_withdrawn);
    assert!(!session.summons_shown);
    assert_eq!(session.voenkom_state, VoenkomState::Attacking);
    assert_eq!(session.message, REJECT_MESSAGE);
    assert_eq!(session.voenkom_hp, 125);
}

#[test]
fn test_damage_provokes_waiting_and_checking() {
    for state in [VoenkomState::Waiting, VoenkomState::Checking, VoenkomState::Chasing] {
        let mut session = running();
        session.voenkom_state = state;
        session.damage_voenkom(10);
        assert_eq!(session.voenkom_state, VoenkomState::Attacking);
    }
}

#[test]
fn test_provoke_is_idempotent() {
    let mut session = running();
    session.voenkom_state = VoenkomState::Attacking;
    assert!(!session.provoke());
    assert_eq!(session.voenkom_state, VoenkomState::Attacking);

    session.voenkom_state = VoenkomState::Dead;
    assert!(!session.provoke());
    assert_eq!(session.voenkom_state, VoenkomState::Dead);
}

#[test]
fn test_capture_is_lethal_once() {
    let mut session = running();
    session.take_damage(10);

    assert!(session.capture_player());
    assert_eq!(session.player_hp, 0);
    assert_eq!(session.outcome, Some(GameOutcome::Captured));
    assert!(!session.capture_player());
}

#[test]
fn test_accept_summons_is_compliance_ending() {
    let mut session = running();
    session.voenkom_state = VoenkomState::Offering;

    // Prompt ещё не показан
    assert!(!session.accept_summons());

    session.summons_shown = true;
    assert!(session.accept_summons());
    assert!(session.is_game_over);
    assert!(session.voenkom_frozen);
    assert_eq!(session.player_hp, 0);
    assert_eq!(session.voenkom_state, VoenkomState::Offering);
    assert_eq!(session.outcome, Some(GameOutcome::Compliance));
}

#[test]
fn test_reject_summons() {
    let mut session = running();
    session.voenkom_state = VoenkomState::Offering;
    session.summons_shown = true;

    assert!(session.reject_summons());
    assert_eq!(session.voenkom_state, VoenkomState::Attacking);
    assert!(!session.summons_shown);
    assert!(!session.reject_summons());
}

#[test]
fn test_pickup_then_drop_preserves_kind() {
    let mut session = running();
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    assert_eq!(session.pickup_item("machete-1"), Some(WeaponKind::Machete));
    assert!(session.world_items.iter().all(|item| item.id != "machete-1"));
    assert_eq!(session.current_weapon(), WeaponKind::Machete);
    assert_eq!(session.message, "Подобрано: Мачете");

    let id = session
        .drop_active_item(Vec3::new(0.0, 0.0, 2.0), Vec3::NEG_Z, &mut rng)
        .unwrap();
    let dropped = session.world_items.iter().find(|item| item.id == id).unwrap();

    assert_eq!(dropped.kind, WeaponKind::Machete);
    assert!((dropped.position - Vec3::new(0.0, 1.7, 0.5)).length() < 1e-5);
    assert_eq!(session.current_weapon(), WeaponKind::Fist);
    assert_eq!(session.message, "Предмет выброшен");
}

#[test]
fn test_pickup_unknown_id_is_noop() {
    let mut session = running();
    let before = session.world_items.clone();

    assert_eq!(session.pickup_item("rpg-1"), None);
    assert_eq!(session.world_items, before);
}

#[test]
fn test_drop_with_empty_hands_is_noop() {
    let mut session = running();
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    assert!(session.drop_active_item(Vec3::ZERO, Vec3::NEG_Z, &mut rng).is_none());
    assert_eq!(session.world_items.len(), 4);
}

#[test]
fn test_swap_drops_old_weapon_at_picked_position() {
    let mut session = running();

    // Заполняем все 9 слотов битами
    for slot in 0..crate::equipment::INVENTORY_SLOTS {
        session.select_slot(slot);
        session.world_items.push(WorldItem::new(format!("bat-x{}", slot), WeaponKind::Bat, Vec3::ZERO, Vec3::ZERO));
        session.pickup_item(&format!("bat-x{}", slot));
    }
    session.select_slot(0);
    let axe_position = Vec3::new(-2.0, 1.3, 3.5);

    assert_eq!(session.pickup_item("axe-1"), Some(WeaponKind::Axe));
    assert_eq!(session.current_weapon(), WeaponKind::Axe);

    let displaced = session.world_items.last().unwrap();
    assert_eq!(displaced.kind, WeaponKind::Bat);
    assert_eq!(displaced.position, axe_position);
    assert_eq!(displaced.rotation, Vec3::ZERO);
}

#[test]
fn test_ammo_runs_out() {
    let mut session = running();
    for _ in 0..STARTING_AMMO {
        assert!(session.use_ammo());
    }
    assert!(!session.use_ammo());
    assert_eq!(session.ammo, 0);
}

#[test]
fn test_toggle_door_messages() {
    let mut session = running();

    assert!(session.toggle_door());
    assert_eq!(session.message, "Дверь открыта");
    assert!(!session.toggle_door());
    assert_eq!(session.message, "Дверь закрыта");
}
