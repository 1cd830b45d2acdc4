//! Shooting domain: пули Глока
//!
//! Пули живут в `SessionState::bullets` (presentation рисует их оттуда).
//! Каждый тик: линейный шаг → hit test по цилиндру военкома → envelope комнаты.
//! Попадания за тик суммируются в один `VoenkomDamaged` (без lost updates).

use bevy::prelude::*;

use crate::ai::{Voenkom, VoenkomState};
use crate::combat::{DamageSource, VoenkomDamaged};
use crate::session::SessionState;
use crate::SimulationSet;

pub const BULLET_SPEED: f32 = 25.0;
/// Время жизни пули (секунды)
pub const BULLET_LIFETIME: f32 = 2.0;
pub const BULLET_DAMAGE: u32 = 25;

/// Цилиндр попадания вокруг военкома
pub const HIT_RADIUS: f32 = 0.6;
pub const HIT_BAND_BOTTOM: f32 = 0.0;
pub const HIT_BAND_TOP: f32 = 2.8;

#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub id: u64,
    pub position: Vec3,
    pub velocity: Vec3,
    /// Время создания по session clock (секунды)
    pub created_at: f32,
}

impl Bullet {
    pub fn new(id: u64, origin: Vec3, direction: Vec3, created_at: f32) -> Self {
        Self {
            id,
            position: origin,
            velocity: direction.normalize_or_zero() * BULLET_SPEED,
            created_at,
        }
    }
}

/// Попадает ли точка в цилиндр вокруг военкома (по x/z его позиции)
pub fn in_hit_region(point: Vec3, voenkom: Vec3) -> bool {
    let horizontal = Vec2::new(point.x - voenkom.x, point.z - voenkom.z).length();
    horizontal < HIT_RADIUS && point.y > HIT_BAND_BOTTOM && point.y < HIT_BAND_TOP
}

/// Envelope комнаты: за его пределами пуля исчезает.
///
/// За дверной плоскостью (z < -4.2) коридор узкий: |x| > 1: уже стена.
pub fn out_of_bounds(point: Vec3) -> bool {
    point.x < -5.0
        || point.x > 5.0
        || point.y < 0.0
        || point.y > 10.0
        || (point.z < -4.2 && point.x.abs() > 1.0)
}

/// Шаг всех пуль. Возвращает количество попаданий в военкома за тик.
///
/// `target`: позиция военкома (None, если мёртв: пули пролетают насквозь).
pub fn advance_bullets(bullets: &mut Vec<Bullet>, delta: f32, now: f32, target: Option<Vec3>) -> u32 {
    let mut hits = 0;

    bullets.retain_mut(|bullet| {
        if now - bullet.created_at > BULLET_LIFETIME {
            return false;
        }

        let next = bullet.position + bullet.velocity * delta;

        if target.is_some_and(|voenkom| in_hit_region(next, voenkom)) {
            hits += 1;
            return false;
        }
        if out_of_bounds(next) {
            return false;
        }

        bullet.position = next;
        true
    });

    hits
}

/// Система: шаг пуль + агрегированный урон
pub fn advance_projectiles(
    time: Res<Time<Fixed>>,
    mut session: ResMut<SessionState>,
    voenkom_query: Query<&Transform, With<Voenkom>>,
    mut damage_events: EventWriter<VoenkomDamaged>,
) {
    if session.bullets.is_empty() {
        return;
    }

    let target = if session.voenkom_state == VoenkomState::Dead {
        None
    } else {
        voenkom_query.single().ok().map(|transform| transform.translation)
    };

    let now = session.clock;
    let hits = advance_bullets(&mut session.bullets, time.delta_secs(), now, target);

    if hits > 0 {
        crate::log(&format!("🎯 {} bullet hit(s) on voenkom", hits));
        damage_events.write(VoenkomDamaged {
            amount: BULLET_DAMAGE * hits,
            source: DamageSource::Projectile { hits },
        });
    }
}

/// Shooting Plugin: пули двигаются в `SimulationSet::Projectiles`,
/// после выстрелов этого тика и до применения урона.
pub struct ShootingPlugin;

impl Plugin for ShootingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, advance_projectiles.in_set(SimulationSet::Projectiles));
    }
}
