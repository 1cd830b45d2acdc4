//! Equipment module: инвентарь игрока (9 слотов)
//!
//! # Architecture
//!
//! Инвентарь: часть `SessionState`, мутируется только через session операции
//! (pickup / drop / select slot), чтобы сохранить инвариант
//! "оружие либо в мире, либо в слоте".
//!
//! **Pickup placement:**
//! - активный слот пуст → кладём туда
//! - иначе первый пустой слот (он становится активным)
//! - иначе swap: старое оружие выпадает, новое занимает активный слот

use crate::item_system::WeaponKind;

pub const INVENTORY_SLOTS: usize = 9;

/// Результат помещения оружия в инвентарь
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOutcome {
    /// Слот, куда легло оружие (он же теперь активный)
    pub slot: usize,
    /// Оружие, вытесненное при swap (нужно вернуть в мир)
    pub displaced: Option<WeaponKind>,
}

/// Инвентарь: слоты + активный слот
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    slots: [Option<WeaponKind>; INVENTORY_SLOTS],
    active_slot: usize,
}

impl Default for Inventory {
    fn default() -> Self {
        Self {
            slots: [None; INVENTORY_SLOTS],
            active_slot: 0,
        }
    }
}

impl Inventory {
    pub fn active_slot(&self) -> usize {
        self.active_slot
    }

    /// Выбор слота. Невалидный индекс: no-op (возвращает false).
    pub fn select(&mut self, slot: usize) -> bool {
        if slot >= INVENTORY_SLOTS {
            return false;
        }
        self.active_slot = slot;
        true
    }

    pub fn slot(&self, slot: usize) -> Option<WeaponKind> {
        self.slots.get(slot).copied().flatten()
    }

    pub fn slots(&self) -> &[Option<WeaponKind>; INVENTORY_SLOTS] {
        &self.slots
    }

    /// Оружие в руках (Fist, если активный слот пуст)
    pub fn active_weapon(&self) -> WeaponKind {
        self.slots[self.active_slot].unwrap_or_default()
    }

    pub fn first_empty(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    /// Кладёт оружие по правилам pickup placement.
    ///
    /// Fist не хранится: возвращает `None`, инвентарь не меняется.
    pub fn store(&mut self, kind: WeaponKind) -> Option<StoreOutcome> {
        if kind == WeaponKind::Fist {
            return None;
        }

        let outcome = if self.slots[self.active_slot].is_none() {
            StoreOutcome { slot: self.active_slot, displaced: None }
        } else if let Some(empty) = self.first_empty() {
            StoreOutcome { slot: empty, displaced: None }
        } else {
            StoreOutcome {
                slot: self.active_slot,
                displaced: self.slots[self.active_slot],
            }
        };

        self.slots[outcome.slot] = Some(kind);
        self.active_slot = outcome.slot;
        Some(outcome)
    }

    /// Забирает оружие из активного слота (для drop)
    pub fn take_active(&mut self) -> Option<WeaponKind> {
        self.slots[self.active_slot].take()
    }

    pub fn contains(&self, kind: WeaponKind) -> bool {
        self.slots.contains(&Some(kind))
    }
}

#[cfg(test)]
mod inventory_tests;
