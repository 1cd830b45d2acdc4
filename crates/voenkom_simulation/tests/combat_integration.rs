//! Combat integration test
//!
//! Игрок против военкома в полном App:
//! - Glock: 6 пуль по 25 = ровно 150 HP военкома
//! - Cooldown'ы по session clock (0.4 сек Glock, 1.25 сек мачете)
//! - Пустой магазин: щелчок, без выстрела

mod common;

use bevy::prelude::*;
use common::*;
use voenkom_simulation::session::VICTORY_MESSAGE;
use voenkom_simulation::*;

/// Дверь открыта рано, военком дошёл до точки вручения
fn app_with_voenkom_in_doorway(seed: u64) -> App {
    let mut app = started_app(seed);
    run_seconds(&mut app, 2.0);
    open_door(&mut app);
    run_seconds(&mut app, 3.0);
    assert_eq!(session(&app).voenkom_state, VoenkomState::Offering);
    app
}

#[test]
fn test_six_bullets_kill_voenkom() {
    let mut app = app_with_voenkom_in_doorway(42);
    assert!(session_mut(&mut app).pickup_item("glock-1").is_some());
    place_player(&mut app, Vec3::new(0.0, 0.0, 2.0), 0.0);

    for _ in 0..6 {
        push_action(&mut app, PlayerAction::Attack);
        run_seconds(&mut app, 0.5);
    }
    run_seconds(&mut app, 1.0);

    let state = session(&app);
    assert_eq!(state.ammo, 0);
    assert_eq!(state.voenkom_hp, 0);
    assert_eq!(state.voenkom_state, VoenkomState::Dead);
    assert!(state.is_victory);
    assert!(!state.is_game_over, "после победы игрок продолжает ходить");
    assert_eq!(state.outcome, Some(GameOutcome::Victory));
    assert_eq!(state.message, VICTORY_MESSAGE);
    assert!(state.player_hp > 0);
    assert_eq!(count_cues(&app, AudioCue::Gunshot), 6);

    // Тело проваливается под пол
    assert!(voenkom_position(&mut app).y < -5.0);
}

#[test]
fn test_empty_magazine_clicks() {
    let mut app = started_app(42);
    assert!(session_mut(&mut app).pickup_item("glock-1").is_some());
    session_mut(&mut app).ammo = 0;

    push_action(&mut app, PlayerAction::Attack);
    tick(&mut app);

    let state = session(&app);
    assert!(state.bullets.is_empty());
    assert_eq!(state.voenkom_state, VoenkomState::Waiting);
    assert_eq!(count_cues(&app, AudioCue::EmptyClick), 1);
    assert_eq!(count_cues(&app, AudioCue::Gunshot), 0);
}

#[test]
fn test_glock_cooldown_blocks_rapid_fire() {
    let mut app = started_app(42);
    assert!(session_mut(&mut app).pickup_item("glock-1").is_some());

    // Два выстрела в одном тике: второй в cooldown
    push_action(&mut app, PlayerAction::Attack);
    push_action(&mut app, PlayerAction::Attack);
    tick(&mut app);
    assert_eq!(session(&app).ammo, 5);

    // Через 0.3 сек: всё ещё cooldown
    run_seconds(&mut app, 0.3);
    push_action(&mut app, PlayerAction::Attack);
    tick(&mut app);
    assert_eq!(session(&app).ammo, 5);

    // Через 0.45 сек от первого выстрела: можно
    run_seconds(&mut app, 0.15);
    push_action(&mut app, PlayerAction::Attack);
    tick(&mut app);
    assert_eq!(session(&app).ammo, 4);
    assert_eq!(count_cues(&app, AudioCue::Gunshot), 2);
}

#[test]
fn test_machete_hits_and_respects_cooldown() {
    let mut app = app_with_voenkom_in_doorway(42);
    assert!(session_mut(&mut app).pickup_item("machete-1").is_some());
    assert_eq!(session(&app).current_weapon(), WeaponKind::Machete);
    place_player(&mut app, Vec3::new(0.0, 0.0, -2.5), 0.0);

    push_action(&mut app, PlayerAction::Attack);
    tick(&mut app);
    tick(&mut app);
    let state = session(&app);
    assert_eq!(state.voenkom_hp, 100);
    assert_eq!(state.voenkom_state, VoenkomState::Attacking);
    assert!(!state.summons_shown, "удар отзывает повестку");
    assert_eq!(count_ui_events(&app, &UiEvent::HideSummons), 2);

    // 0.5 сек спустя: cooldown, взмаха нет
    run_seconds(&mut app, 0.5);
    push_action(&mut app, PlayerAction::Attack);
    tick(&mut app);
    tick(&mut app);
    assert_eq!(session(&app).voenkom_hp, 100);
    assert_eq!(count_cues(&app, AudioCue::Swing), 1);

    // Военком подошёл вплотную, cooldown прошёл
    run_seconds(&mut app, 1.0);
    push_action(&mut app, PlayerAction::Attack);
    tick(&mut app);
    tick(&mut app);
    assert_eq!(count_cues(&app, AudioCue::Swing), 2);
    assert_eq!(session(&app).voenkom_hp, 50);
}

#[test]
fn test_voenkom_beats_passive_player_to_death() {
    let mut app = app_with_voenkom_in_doorway(42);
    place_player(&mut app, Vec3::new(0.0, 0.0, -2.5), 0.0);

    send_command(&mut app, SessionCommand::RejectSummons);
    // 100 HP / 20 за удар, удар раз в секунду
    run_seconds(&mut app, 6.0);

    let state = session(&app);
    assert!(state.is_game_over);
    assert_eq!(state.outcome, Some(GameOutcome::Killed));
    assert_eq!(state.player_hp, 0);
    assert!(!state.is_victory);
}
