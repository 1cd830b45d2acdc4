//! Геометрия уровня: квартира + лестничная клетка.
//!
//! Координаты: пол на y=0, дверь квартиры в плоскости z=-4,
//! квартира: z > -4, лестничная клетка (где стоит военком): z < -4.
//!
//! Ray queries через `bevy::math::bounding` (AABB + sphere), без физ. движка:
//! ядру нужны только "что ближе по лучу" и "попал ли луч в hot-spot".

use bevy::math::bounding::{Aabb3d, BoundingSphere, RayCast3d};
use bevy::math::{Dir3A, Vec3A};
use bevy::prelude::*;

/// Плоскость двери квартиры
pub const DOOR_PLANE_Z: f32 = -4.0;
/// Половина толщины стены с дверным проёмом
pub const DOOR_WALL_HALF_THICKNESS: f32 = 0.2;
/// Половина ширины дверного проёма
pub const DOORWAY_HALF_WIDTH: f32 = 0.72;
pub const DOOR_HEIGHT: f32 = 2.64;

/// Внутренние грани боковых стен
pub const ROOM_HALF_WIDTH: f32 = 2.0;
/// Задняя стена квартиры (внутренняя грань)
pub const APARTMENT_BACK_Z: f32 = 9.5;
/// Дальняя стена лестничной клетки (внутренняя грань)
pub const STAIRWELL_BACK_Z: f32 = -11.5;

/// Спавн игрока (ноги)
pub const PLAYER_SPAWN: Vec3 = Vec3::new(0.0, 0.0, 5.0);
/// Пост военкома за дверью (ноги)
pub const VOENKOM_POST: Vec3 = Vec3::new(0.0, 0.0, -9.0);
/// Линия вручения повестки (военком останавливается тут)
pub const HANDOFF_Z: f32 = -4.5;
/// Соседский ребёнок (ноги)
pub const KID_POSITION: Vec3 = Vec3::new(0.0, 0.0, 8.5);

/// Камера при взгляде в глазок (смотрит в -z)
pub const PEEPHOLE_VIEW: Vec3 = Vec3::new(0.0, 1.55, -3.95);

const PEEPHOLE_CENTER: Vec3 = Vec3::new(0.0, 1.55, -3.94);
const PEEPHOLE_RADIUS: f32 = 0.2;
const HANDLE_CLOSED_CENTER: Vec3 = Vec3::new(0.57, 1.12, -3.9);
/// Ручка открытой двери (дверь повёрнута на 120° вокруг петель)
const HANDLE_OPEN_CENTER: Vec3 = Vec3::new(0.76, 1.12, -4.06);
const HANDLE_RADIUS: f32 = 0.3;

/// Военком: центр тела над ногами (для дистанций до игрока)
pub const VOENKOM_CENTER_HEIGHT: f32 = 0.6;
const VOENKOM_HIT_HALF_EXTENTS: Vec3 = Vec3::new(0.45, 1.3, 0.45);

/// Именованные цели взаимодействия на двери
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum HotSpot {
    Peephole,
    DoorHandle,
}

/// Что первым пересекает луч
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RayObstruction {
    Voenkom { distance: f32 },
    Scenery { distance: f32 },
}

impl RayObstruction {
    pub fn distance(&self) -> f32 {
        match self {
            RayObstruction::Voenkom { distance } | RayObstruction::Scenery { distance } => *distance,
        }
    }
}

/// Resource: статическая геометрия уровня
#[derive(Resource, Debug, Clone)]
pub struct RoomGeometry {
    /// Стены, пол, потолок, мебель
    pub scenery: Vec<Aabb3d>,
    /// Полотно двери (блокирует только когда закрыта)
    pub door_leaf: Aabb3d,
}

impl Default for RoomGeometry {
    fn default() -> Self {
        let block = |center: Vec3, size: Vec3| Aabb3d::new(center, size * 0.5);

        Self {
            scenery: vec![
                // Пол и потолок
                block(Vec3::new(0.0, -0.5, 0.0), Vec3::new(10.0, 1.0, 30.0)),
                block(Vec3::new(0.0, 4.5, 0.0), Vec3::new(10.0, 1.0, 30.0)),
                // Квартира: боковые и задняя стены
                block(Vec3::new(-2.5, 2.0, 0.0), Vec3::new(1.0, 4.0, 20.0)),
                block(Vec3::new(2.5, 2.0, 0.0), Vec3::new(1.0, 4.0, 20.0)),
                block(Vec3::new(0.0, 2.0, 10.0), Vec3::new(6.0, 4.0, 1.0)),
                // Стена с дверным проёмом + перемычка
                block(Vec3::new(-2.0, 2.0, -4.0), Vec3::new(2.5, 4.0, 0.4)),
                block(Vec3::new(2.0, 2.0, -4.0), Vec3::new(2.5, 4.0, 0.4)),
                block(Vec3::new(0.0, 3.66, -4.0), Vec3::new(1.5, 1.36, 0.4)),
                // Лестничная клетка
                block(Vec3::new(0.0, 2.0, -12.0), Vec3::new(6.0, 4.0, 1.0)),
                block(Vec3::new(-3.0, 2.0, -8.0), Vec3::new(1.0, 4.0, 8.0)),
                block(Vec3::new(3.0, 2.0, -8.0), Vec3::new(1.0, 4.0, 8.0)),
                // Мусоропровод, полка, ребёнок
                block(Vec3::new(-1.8, 1.5, 2.0), Vec3::new(0.8, 3.0, 0.8)),
                block(Vec3::new(-2.0, 1.2, 3.5), Vec3::new(1.0, 0.1, 1.0)),
                block(KID_POSITION + Vec3::Y * 0.7, Vec3::new(0.6, 1.4, 0.6)),
            ],
            door_leaf: block(
                Vec3::new(0.0, DOOR_HEIGHT * 0.5, DOOR_PLANE_Z),
                Vec3::new(DOORWAY_HALF_WIDTH * 2.0, DOOR_HEIGHT, 0.1),
            ),
        }
    }
}

impl RoomGeometry {
    /// Ближайшая сцена по лучу (дверь учитывается только закрытая)
    pub fn cast_scenery(&self, origin: Vec3, direction: Vec3, max_distance: f32, door_open: bool) -> Option<f32> {
        let ray = make_ray(origin, direction, max_distance)?;

        let door = (!door_open).then_some(&self.door_leaf);
        self.scenery
            .iter()
            .chain(door)
            .filter_map(|aabb| ray.aabb_intersection_at(aabb))
            .min_by(f32::total_cmp)
    }

    /// Ближайшее препятствие по лучу: военком (если задан) или сцена
    pub fn cast_view_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        door_open: bool,
        voenkom_feet: Option<Vec3>,
    ) -> Option<RayObstruction> {
        let scenery = self
            .cast_scenery(origin, direction, max_distance, door_open)
            .map(|distance| RayObstruction::Scenery { distance });

        let voenkom = voenkom_feet.and_then(|feet| {
            let ray = make_ray(origin, direction, max_distance)?;
            ray.aabb_intersection_at(&voenkom_hit_volume(feet))
                .map(|distance| RayObstruction::Voenkom { distance })
        });

        match (voenkom, scenery) {
            (Some(v), Some(s)) => Some(if v.distance() <= s.distance() { v } else { s }),
            (v, s) => v.or(s),
        }
    }

    /// Hot-spot в центре взгляда в пределах `max_distance`.
    ///
    /// Глазок доступен только при закрытой двери.
    pub fn hot_spot_in_view(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        door_open: bool,
    ) -> Option<HotSpot> {
        let ray = make_ray(origin, direction, max_distance)?;

        let handle_center = if door_open { HANDLE_OPEN_CENTER } else { HANDLE_CLOSED_CENTER };
        let mut candidates = vec![(HotSpot::DoorHandle, BoundingSphere::new(handle_center, HANDLE_RADIUS))];
        if !door_open {
            candidates.push((HotSpot::Peephole, BoundingSphere::new(PEEPHOLE_CENTER, PEEPHOLE_RADIUS)));
        }

        candidates
            .into_iter()
            .filter_map(|(spot, sphere)| ray.sphere_intersection_at(&sphere).map(|distance| (spot, distance)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(spot, _)| spot)
    }

    /// Ограничивает перемещение `previous → next` проходимой зоной.
    ///
    /// Стена с дверью проходима только через проём и только при открытой двери;
    /// у открытой двери тело смещается в проём.
    pub fn constrain(&self, previous: Vec3, next: Vec3, radius: f32, door_open: bool) -> Vec3 {
        let mut position = next;
        position.x = position.x.clamp(-ROOM_HALF_WIDTH + radius, ROOM_HALF_WIDTH - radius);
        position.z = position.z.clamp(STAIRWELL_BACK_Z + radius, APARTMENT_BACK_Z - radius);

        let wall_reach = DOOR_WALL_HALF_THICKNESS + radius;
        if (position.z - DOOR_PLANE_Z).abs() >= wall_reach {
            return position;
        }

        if door_open {
            // Открытый проём направляет внутрь себя
            position.x = position.x.clamp(-DOORWAY_HALF_WIDTH, DOORWAY_HALF_WIDTH);
        } else {
            position.z = if previous.z >= DOOR_PLANE_Z {
                DOOR_PLANE_Z + wall_reach
            } else {
                DOOR_PLANE_Z - wall_reach
            };
        }

        position
    }
}

/// Hit-volume военкома (AABB вокруг тела)
pub fn voenkom_hit_volume(feet: Vec3) -> Aabb3d {
    Aabb3d::new(feet + Vec3::Y * VOENKOM_HIT_HALF_EXTENTS.y, VOENKOM_HIT_HALF_EXTENTS)
}

fn make_ray(origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayCast3d> {
    let direction = Dir3A::new(Vec3A::from(direction)).ok()?;
    Some(RayCast3d::new(origin, direction, max_distance))
}
