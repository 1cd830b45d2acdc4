//! Melee: луч из глаз игрока на дальность оружия.
//!
//! Ближайшее препятствие решает исход: военком получает урон оружия,
//! стена/дверь/мебель: только звук удара.

use bevy::prelude::*;

use super::weapon_stats::WeaponStats;
use crate::item_system::WeaponKind;
use crate::world::{RayObstruction, RoomGeometry};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeleeOutcome {
    HitVoenkom { damage: u32, distance: f32 },
    HitScenery { distance: f32 },
    Miss,
}

/// Разрешает melee удар.
///
/// `voenkom_feet`: None, если военком мёртв (луч проходит сквозь).
pub fn resolve_melee(
    geometry: &RoomGeometry,
    eye: Vec3,
    look: Vec3,
    weapon: WeaponKind,
    door_open: bool,
    voenkom_feet: Option<Vec3>,
) -> MeleeOutcome {
    let stats = WeaponStats::for_kind(weapon);

    match geometry.cast_view_ray(eye, look, stats.range, door_open, voenkom_feet) {
        Some(RayObstruction::Voenkom { distance }) => MeleeOutcome::HitVoenkom {
            damage: stats.damage,
            distance,
        },
        Some(RayObstruction::Scenery { distance }) => MeleeOutcome::HitScenery { distance },
        None => MeleeOutcome::Miss,
    }
}
