//! Mouse look + WASD для игрока.
//!
//! Движение подавлено у глазка и после game over (velocity = 0).

use bevy::prelude::*;

use super::{Player, PlayerConfig, PlayerInput};
use crate::physics::KinematicBody;
use crate::session::SessionState;

/// Поворот камеры от смещения мыши (pitch ограничен ±limit)
pub fn apply_look(player: &mut Player, look_delta: Vec2, config: &PlayerConfig) {
    player.yaw -= look_delta.x * config.look_sensitivity;
    player.pitch = (player.pitch - look_delta.y * config.look_sensitivity)
        .clamp(-config.pitch_limit, config.pitch_limit);
}

/// Горизонтальная velocity по осям ввода в системе координат камеры
pub fn movement_velocity(yaw: f32, input: &PlayerInput, config: &PlayerConfig) -> Vec3 {
    let forward = Vec3::new(-yaw.sin(), 0.0, -yaw.cos());
    let right = Vec3::new(yaw.cos(), 0.0, -yaw.sin());

    let direction = (forward * input.move_axis.y + right * input.move_axis.x).normalize_or_zero();

    let mut speed = if input.sprint { config.sprint_speed } else { config.walk_speed };
    if input.crouch {
        speed *= config.crouch_speed_multiplier;
    }

    direction * speed
}

/// Система: мышь + WASD → Player / KinematicBody
pub fn apply_player_movement(
    mut input: ResMut<PlayerInput>,
    session: Res<SessionState>,
    config: Res<PlayerConfig>,
    mut query: Query<(&mut Player, &mut KinematicBody)>,
) {
    let look_delta = std::mem::take(&mut input.look_delta);

    let Ok((mut player, mut body)) = query.single_mut() else {
        return;
    };

    if !session.accepts_player_actions() || session.peephole_active {
        body.velocity = Vec3::ZERO;
        return;
    }

    apply_look(&mut player, look_delta, &config);
    player.crouching = input.crouch;
    body.velocity = movement_velocity(player.yaw, &input, &config);
}
