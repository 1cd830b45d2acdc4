//! Item System: оружие в мире и его идентичность
//!
//! # Архитектура
//!
//! **WeaponKind**: тип оружия (Fist = пустые руки, в инвентаре не хранится).
//!
//! **WorldItem**: предмет, лежащий в мире (полка или выброшенный игроком).
//! Оружие всегда либо `WorldItem`, либо в слоте инвентаря: никогда и то и другое.
//!
//! Боевые характеристики: в `combat::weapon_stats`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Тип оружия
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect, Serialize, Deserialize)]
pub enum WeaponKind {
    /// Пустые руки (default, если активный слот пуст)
    #[default]
    Fist,
    Glock,
    Axe,
    Bat,
    Machete,
}

impl WeaponKind {
    /// Отображаемое имя
    pub fn display_name(&self) -> &'static str {
        match self {
            WeaponKind::Fist => "Кулак",
            WeaponKind::Glock => "Глок",
            WeaponKind::Axe => "Топор",
            WeaponKind::Bat => "Бита",
            WeaponKind::Machete => "Мачете",
        }
    }

    /// Префикс для id предметов в мире ("glock-1", "axe-7", ...)
    pub fn id_prefix(&self) -> &'static str {
        match self {
            WeaponKind::Fist => "fist",
            WeaponKind::Glock => "glock",
            WeaponKind::Axe => "axe",
            WeaponKind::Bat => "bat",
            WeaponKind::Machete => "machete",
        }
    }

    pub fn is_ranged(&self) -> bool {
        matches!(self, WeaponKind::Glock)
    }
}

/// Предмет, лежащий в мире
#[derive(Debug, Clone, PartialEq)]
pub struct WorldItem {
    pub id: String,
    pub kind: WeaponKind,
    pub position: Vec3,
    /// Euler углы (радианы), только для визуала
    pub rotation: Vec3,
    pub display_name: String,
}

impl WorldItem {
    pub fn new(id: impl Into<String>, kind: WeaponKind, position: Vec3, rotation: Vec3) -> Self {
        Self {
            id: id.into(),
            kind,
            position,
            rotation,
            display_name: kind.display_name().to_string(),
        }
    }
}

/// Стартовая раскладка на полке (одинакова для каждой сессии)
pub fn shelf_items() -> Vec<WorldItem> {
    vec![
        WorldItem::new("glock-1", WeaponKind::Glock, Vec3::new(-2.0, 1.3, 3.2), Vec3::new(0.0, -1.5, 0.0)),
        WorldItem::new("axe-1", WeaponKind::Axe, Vec3::new(-2.0, 1.3, 3.5), Vec3::new(0.0, 0.0, 1.5)),
        WorldItem::new("machete-1", WeaponKind::Machete, Vec3::new(-2.0, 1.3, 3.8), Vec3::new(0.0, 0.0, 1.5)),
        WorldItem::new("bat-1", WeaponKind::Bat, Vec3::new(-1.8, 0.5, 3.5), Vec3::new(0.0, 0.0, 0.2)),
    ]
}

/// Предмет в центре взгляда: ближе `reach` и почти точно по направлению
/// (`dot > min_alignment`). Из нескольких: ближайший.
pub fn item_in_view<'a>(
    items: &'a [WorldItem],
    eye: Vec3,
    look_direction: Vec3,
    reach: f32,
    min_alignment: f32,
) -> Option<&'a WorldItem> {
    let look = look_direction.normalize_or_zero();

    items
        .iter()
        .filter_map(|item| {
            let offset = item.position - eye;
            let distance = offset.length();
            if distance >= reach || distance <= f32::EPSILON {
                return None;
            }
            let alignment = (offset / distance).dot(look);
            (alignment > min_alignment).then_some((item, distance))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(item, _)| item)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shelf_loadout() {
        let items = shelf_items();
        assert_eq!(items.len(), 4);
        assert_eq!(items[0].id, "glock-1");
        assert_eq!(items[0].display_name, "Глок");
        assert!(items.iter().all(|item| item.kind != WeaponKind::Fist));
    }

    #[test]
    fn test_item_in_view_requires_center_alignment() {
        let items = shelf_items();
        let eye = Vec3::new(0.0, 1.3, 3.2);

        // Смотрим прямо на Глок (x = -2, дистанция 2)
        let found = item_in_view(&items, eye, Vec3::NEG_X, 3.0, 0.99);
        assert_eq!(found.map(|item| item.kind), Some(WeaponKind::Glock));

        // Чуть в сторону: уже не считается
        let off_center = Vec3::new(-1.0, 0.0, 0.6);
        assert!(item_in_view(&items, eye, off_center, 3.0, 0.99).is_none());
    }

    #[test]
    fn test_item_in_view_respects_reach() {
        let items = shelf_items();
        let eye = Vec3::new(1.5, 1.3, 3.2);
        assert!(item_in_view(&items, eye, Vec3::NEG_X, 3.0, 0.99).is_none());
    }

    #[test]
    fn test_item_in_view_prefers_closest() {
        let items = vec![
            WorldItem::new("far", WeaponKind::Axe, Vec3::new(0.0, 1.0, -2.5), Vec3::ZERO),
            WorldItem::new("near", WeaponKind::Bat, Vec3::new(0.0, 1.0, -1.0), Vec3::ZERO),
        ];
        let found = item_in_view(&items, Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Z, 3.0, 0.99);
        assert_eq!(found.map(|item| item.id.as_str()), Some("near"));
    }
}
