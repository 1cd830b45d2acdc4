//! Tests for inventory slot placement.

use super::*;

#[test]
fn test_empty_inventory_holds_fist() {
    let inventory = Inventory::default();
    assert_eq!(inventory.active_slot(), 0);
    assert_eq!(inventory.active_weapon(), WeaponKind::Fist);
    assert_eq!(inventory.first_empty(), Some(0));
}

#[test]
fn test_store_into_empty_active_slot() {
    let mut inventory = Inventory::default();
    inventory.select(4);

    let outcome = inventory.store(WeaponKind::Axe).unwrap();
    assert_eq!(outcome, StoreOutcome { slot: 4, displaced: None });
    assert_eq!(inventory.active_weapon(), WeaponKind::Axe);
}

#[test]
fn test_store_moves_to_first_empty_and_activates_it() {
    let mut inventory = Inventory::default();
    inventory.store(WeaponKind::Axe);
    inventory.select(2);
    inventory.store(WeaponKind::Bat);
    inventory.select(2);

    // Активный слот (2) занят битой → первый пустой (1)
    let outcome = inventory.store(WeaponKind::Glock).unwrap();
    assert_eq!(outcome.slot, 1);
    assert_eq!(outcome.displaced, None);
    assert_eq!(inventory.active_slot(), 1);
    assert_eq!(inventory.active_weapon(), WeaponKind::Glock);
}

#[test]
fn test_store_swaps_when_full() {
    let mut inventory = Inventory::default();
    for slot in 0..INVENTORY_SLOTS {
        inventory.select(slot);
        inventory.store(WeaponKind::Bat);
    }
    inventory.select(3);

    let outcome = inventory.store(WeaponKind::Machete).unwrap();
    assert_eq!(outcome.slot, 3);
    assert_eq!(outcome.displaced, Some(WeaponKind::Bat));
    assert_eq!(inventory.slot(3), Some(WeaponKind::Machete));
}

#[test]
fn test_fist_is_never_stored() {
    let mut inventory = Inventory::default();
    assert!(inventory.store(WeaponKind::Fist).is_none());
    assert_eq!(inventory.first_empty(), Some(0));
}

#[test]
fn test_select_out_of_range_is_noop() {
    let mut inventory = Inventory::default();
    inventory.select(5);
    assert!(!inventory.select(INVENTORY_SLOTS));
    assert_eq!(inventory.active_slot(), 5);
}

#[test]
fn test_take_active_empties_slot() {
    let mut inventory = Inventory::default();
    inventory.store(WeaponKind::Glock);

    assert_eq!(inventory.take_active(), Some(WeaponKind::Glock));
    assert_eq!(inventory.active_weapon(), WeaponKind::Fist);
    assert_eq!(inventory.take_active(), None);
}
