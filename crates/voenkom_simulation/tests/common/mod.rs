//! Общие helpers для сценарных тестов (headless App + ручные тики)

#![allow(dead_code)]

use bevy::prelude::*;
use voenkom_simulation::*;

/// Headless App после Startup (актёры заспавнены, партия не начата)
pub fn create_test_app(seed: u64) -> App {
    let mut app = create_headless_app(seed);
    app.update();
    app
}

/// App с уже начатой партией
pub fn started_app(seed: u64) -> App {
    let mut app = create_test_app(seed);
    send_command(&mut app, SessionCommand::Start);
    tick(&mut app);
    app
}

pub fn send_command(app: &mut App, command: SessionCommand) {
    app.world_mut().send_event(command);
}

pub fn tick(app: &mut App) {
    step_fixed(app.world_mut());
}

pub fn run_ticks(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        tick(app);
    }
}

pub fn run_seconds(app: &mut App, seconds: f32) {
    run_ticks(app, (seconds * 60.0).round() as usize);
}

pub fn session(app: &App) -> &SessionState {
    app.world().resource::<SessionState>()
}

pub fn session_mut(app: &mut App) -> Mut<'_, SessionState> {
    app.world_mut().resource_mut::<SessionState>()
}

pub fn push_action(app: &mut App, action: PlayerAction) {
    app.world_mut().resource_mut::<PlayerInput>().push(action);
}

/// Ставит игрока в точку `feet` со взглядом (yaw, pitch)
pub fn place_player(app: &mut App, feet: Vec3, pitch: f32) {
    let world = app.world_mut();
    let mut query = world.query_filtered::<(&mut Player, &mut Transform), Without<Voenkom>>();
    for (mut player, mut transform) in query.iter_mut(world) {
        transform.translation = feet;
        player.yaw = 0.0;
        player.pitch = pitch;
    }
}

pub fn voenkom_position(app: &mut App) -> Vec3 {
    let world = app.world_mut();
    let mut query = world.query_filtered::<&Transform, With<Voenkom>>();
    let position = query.iter(world).next().map(|transform| transform.translation);
    position.unwrap_or(Vec3::NAN)
}

/// Игрок встаёт у ручки, смотрит на неё и жмёт F
pub fn open_door(app: &mut App) {
    // Глаза (0.57, 1.65, -2.5) → ручка (0.57, 1.12, -3.9)
    let pitch = (-0.53f32).atan2(1.4);
    place_player(app, Vec3::new(0.57, 0.0, -2.5), pitch);
    push_action(app, PlayerAction::Use);
    tick(app);
    assert!(session(app).door_open, "дверь должна открыться");
}

pub fn count_cues(app: &App, cue: AudioCue) -> usize {
    app.world()
        .resource::<Events<CueRequest>>()
        .iter_current_update_events()
        .filter(|request| request.0 == cue)
        .count()
}

pub fn count_ui_events(app: &App, event: &UiEvent) -> usize {
    app.world()
        .resource::<Events<UiEvent>>()
        .iter_current_update_events()
        .filter(|published| *published == event)
        .count()
}
