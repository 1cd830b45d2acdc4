//! Headless симуляция Voenkom
//!
//! Скриптовая партия без рендера: ожидание за дверью, ранняя дверь,
//! отказ от повестки, перестрелка. Раз в секунду печатает состояние.

use bevy::prelude::*;
use voenkom_simulation::{
    create_headless_app, log_info, session_snapshot, step_fixed, Player, PlayerAction, PlayerInput,
    SessionCommand, SessionState, Voenkom,
};

const TICKS_PER_SECOND: usize = 60;
const TOTAL_SECONDS: usize = 25;

fn main() {
    let seed = 42;
    println!("Starting Voenkom headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);
    // Startup: спавн актёров
    app.update();
    app.world_mut().send_event(SessionCommand::Start);

    for tick in 0..TOTAL_SECONDS * TICKS_PER_SECOND {
        script(&mut app, tick);
        step_fixed(app.world_mut());

        if tick % TICKS_PER_SECOND == 0 {
            let snapshot = session_snapshot(app.world_mut());
            println!(
                "t={:>5.1}s state={:<9} hp={:>3} voenkom_hp={:>3} ammo={} door={} | {}",
                snapshot.clock,
                snapshot.voenkom_state.as_str(),
                snapshot.player_hp,
                snapshot.voenkom_hp,
                snapshot.ammo,
                if snapshot.door_open { "open" } else { "closed" },
                snapshot.message,
            );
        }

        if app.world().resource::<SessionState>().is_finished() {
            break;
        }
    }

    let session = app.world().resource::<SessionState>();
    log_info(&format!("Simulation complete: outcome {:?}", session.outcome));
}

/// Ввод игрока по таймлайну (секунды от старта)
fn script(app: &mut App, tick: usize) {
    let second = |s: usize| s * TICKS_PER_SECOND;

    match tick {
        // Подходим к двери, смотрим на ручку, открываем
        t if t == second(10) => {
            place_player(app, Vec3::new(0.57, 0.0, -2.5), (-0.53f32).atan2(1.4));
            push(app, PlayerAction::Use);
        }
        // Повестка поднята, отказываемся
        t if t == second(14) => {
            if app.world().resource::<SessionState>().summons_shown {
                app.world_mut().send_event(SessionCommand::RejectSummons);
            }
        }
        // Пистолет с полки, отход вглубь квартиры
        t if t == second(15) => {
            app.world_mut().resource_mut::<SessionState>().pickup_item("glock-1");
            place_player(app, Vec3::new(0.0, 0.0, 2.0), 0.0);
        }
        // Стрельба каждые полсекунды
        t if t > second(15) && t % (TICKS_PER_SECOND / 2) == 0 => {
            push(app, PlayerAction::Attack);
        }
        _ => {}
    }
}

fn push(app: &mut App, action: PlayerAction) {
    app.world_mut().resource_mut::<PlayerInput>().push(action);
}

fn place_player(app: &mut App, feet: Vec3, pitch: f32) {
    let world = app.world_mut();
    let mut query = world.query_filtered::<(&mut Player, &mut Transform), Without<Voenkom>>();
    for (mut player, mut transform) in query.iter_mut(world) {
        transform.translation = feet;
        player.pitch = pitch;
    }
}
