//! Kinematic контроллер для военкома и игрока
//!
//! Архитектура:
//! - AI / player input выставляют target velocity
//! - Интеграция: `translation += velocity * dt`, затем `RoomGeometry::constrain`
//! - Без гравитации и сил: все акторы ходят по полу (y = 0)
//!
//! Детерминизм: fixed timestep (60Hz), чистая арифметика без физ. движка

use bevy::prelude::*;

use crate::session::SessionState;
use crate::world::RoomGeometry;

/// Тела ниже этой высоты выведены из игры (провалились под пол после смерти)
const RETIRED_BELOW_Y: f32 = -1.0;

/// Kinematic body компонент
///
/// Velocity выставляют владельцы (FSM, player input) каждый тик,
/// позицию двигает только `integrate_kinematic_bodies`.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct KinematicBody {
    /// Target velocity (m/s)
    pub velocity: Vec3,
    /// Радиус капсулы (для стен)
    pub radius: f32,
}

impl Default for KinematicBody {
    fn default() -> Self {
        Self {
            velocity: Vec3::ZERO,
            radius: 0.3,
        }
    }
}

impl KinematicBody {
    pub fn with_radius(radius: f32) -> Self {
        Self {
            radius,
            ..Default::default()
        }
    }
}

/// Один шаг интеграции с ограничением проходимой зоной
pub fn integrate_position(
    geometry: &RoomGeometry,
    position: Vec3,
    body: &KinematicBody,
    delta: f32,
    door_open: bool,
) -> Vec3 {
    let next = position + body.velocity * delta;
    geometry.constrain(position, next, body.radius, door_open)
}

/// Система: velocity → позиция
///
/// Работает в FixedUpdate (`SimulationSet::Physics`), после всех систем,
/// выставляющих velocity.
pub fn integrate_kinematic_bodies(
    mut query: Query<(&KinematicBody, &mut Transform)>,
    geometry: Res<RoomGeometry>,
    session: Res<SessionState>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (body, mut transform) in query.iter_mut() {
        if transform.translation.y < RETIRED_BELOW_Y || body.velocity == Vec3::ZERO {
            continue;
        }

        transform.translation = integrate_position(&geometry, transform.translation, body, delta, session.door_open);
    }
}
