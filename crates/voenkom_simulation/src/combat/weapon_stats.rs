//! Боевые характеристики оружия игрока (melee + ranged)
//!
//! Единая таблица на `WeaponKind`:
//! - cooldown считается от последней успешной атаки
//! - melee: дальность луча + урон по военкому
//! - ranged: урон несёт пуля (см. `shooting::BULLET_DAMAGE`), range не используется

use crate::item_system::WeaponKind;
use crate::shooting::BULLET_DAMAGE;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponStats {
    /// Cooldown между атаками (секунды)
    pub cooldown: f32,
    /// Дальность melee луча (метры)
    pub range: f32,
    /// Урон за попадание
    pub damage: u32,
    pub ranged: bool,
}

impl WeaponStats {
    pub fn for_kind(kind: WeaponKind) -> Self {
        match kind {
            WeaponKind::Fist => Self::melee(1.85, 2.0, 10),
            WeaponKind::Axe => Self::melee(1.25, 2.5, 25),
            WeaponKind::Bat => Self::melee(1.25, 3.0, 25),
            WeaponKind::Machete => Self::melee(1.25, 2.5, 50),
            WeaponKind::Glock => Self {
                cooldown: 0.4,
                range: 0.0,
                damage: BULLET_DAMAGE,
                ranged: true,
            },
        }
    }

    fn melee(cooldown: f32, range: f32, damage: u32) -> Self {
        Self {
            cooldown,
            range,
            damage,
            ranged: false,
        }
    }

    /// Готово ли оружие к атаке в момент `now` (секунды session clock)
    pub fn is_ready(&self, now: f32, last_attack_at: Option<f32>) -> bool {
        last_attack_at.map_or(true, |last| now - last >= self.cooldown)
    }
}
