//! Flat slot addressing for entities.
//!
//! Every item position an entity can hold is mapped onto one integer:
//!
//! | ids       | meaning                                   | carried by            |
//! |-----------|-------------------------------------------|-----------------------|
//! | 0-8       | hotbar                                    | players               |
//! | 9-35      | main inventory                            | players               |
//! | 98        | main hand                                 | living entities       |
//! | 99        | off hand                                  | living entities       |
//! | 100-103   | armor, feet to head                       | living entities       |
//! | 200-226   | ender chest                               | players               |
//! | 300-306   | trade inventory                           | villagers, traders    |
//! | 400       | saddle                                    | horse family          |
//! | 401       | horse armor                               | horses                |
//! | 499       | chest attached (a chest item, or empty)   | donkeys, mules        |
//! | 500-514   | chest contents                            | donkeys, mules        |
//!
//! Ids outside an entity's ranges read as empty and reject writes. For
//! players the main hand (98) aliases the selected hotbar slot, so it is
//! addressable but not listed by [`get_all`].

use std::collections::BTreeMap;

use cmdplus_core::{ItemStack, ItemType};
use cmdplus_world::{blocks, Entity, EntityData, EntityType};

pub const MAIN_HAND: u32 = 98;
pub const OFF_HAND: u32 = 99;
pub const ARMOR_START: u32 = 100;
pub const ENDER_CHEST_START: u32 = 200;
pub const TRADER_START: u32 = 300;
pub const SADDLE: u32 = 400;
pub const HORSE_ARMOR: u32 = 401;
pub const HORSE_CHEST_FLAG: u32 = 499;
pub const HORSE_CHEST_START: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Address {
    Storage(usize),
    MainHand,
    OffHand,
    Armor(usize),
    EnderChest(usize),
    Trader(usize),
    Saddle,
    HorseArmor,
    ChestFlag,
    HorseChest(usize),
}

fn locate(entity_type: EntityType, slot: u32) -> Option<Address> {
    let player = entity_type == EntityType::Player;
    let living = entity_type.is_living();
    let offset = |start: u32| (slot - start) as usize;
    let address = match slot {
        0..=35 if player => Address::Storage(slot as usize),
        MAIN_HAND if living => Address::MainHand,
        OFF_HAND if living => Address::OffHand,
        100..=103 if living => Address::Armor(offset(ARMOR_START)),
        200..=226 if player => Address::EnderChest(offset(ENDER_CHEST_START)),
        300..=306 if entity_type.is_trader() => Address::Trader(offset(TRADER_START)),
        SADDLE if entity_type.is_horse_family() => Address::Saddle,
        HORSE_ARMOR if entity_type == EntityType::Horse => Address::HorseArmor,
        HORSE_CHEST_FLAG if entity_type.can_carry_chest() => Address::ChestFlag,
        500..=514 if entity_type.can_carry_chest() => {
            Address::HorseChest(offset(HORSE_CHEST_START))
        }
        _ => return None,
    };
    Some(address)
}

/// Slot ids an entity of this kind supports, ascending.
pub fn supported_slots(entity_type: EntityType) -> Vec<u32> {
    let mut slots = Vec::new();
    if entity_type == EntityType::Player {
        slots.extend(0..=35);
        slots.push(OFF_HAND);
        slots.extend(100..=103);
        slots.extend(200..=226);
        return slots;
    }
    if entity_type.is_living() {
        slots.extend([MAIN_HAND, OFF_HAND]);
        slots.extend(100..=103);
    }
    if entity_type.is_trader() {
        slots.extend(300..=306);
    }
    if entity_type.is_horse_family() {
        slots.push(SADDLE);
    }
    if entity_type == EntityType::Horse {
        slots.push(HORSE_ARMOR);
    }
    if entity_type.can_carry_chest() {
        slots.push(HORSE_CHEST_FLAG);
        slots.extend(500..=514);
    }
    slots
}

fn chest_item() -> ItemStack {
    ItemStack::new(ItemType::Block(blocks::CHEST), 1)
}

fn slot_ref(entity: &Entity, address: Address) -> Option<&Option<ItemStack>> {
    match (address, &entity.data) {
        (Address::Storage(i), EntityData::Player(player)) => {
            Some(&player.inventory.slots()[i])
        }
        (Address::MainHand, EntityData::Player(player)) => {
            Some(&player.inventory.slots()[player.inventory.selected])
        }
        (Address::OffHand, EntityData::Player(player)) => Some(&player.inventory.off_hand),
        (Address::Armor(i), EntityData::Player(player)) => Some(&player.inventory.armor[i]),
        (Address::EnderChest(i), EntityData::Player(player)) => Some(&player.ender_chest[i]),
        (Address::Trader(i), EntityData::Trader { inventory, .. }) => Some(&inventory[i]),
        (Address::Saddle, EntityData::Horse { tack, .. }) => Some(&tack.saddle),
        (Address::HorseArmor, EntityData::Horse { tack, .. }) => Some(&tack.armor),
        (Address::HorseChest(i), EntityData::Horse { tack, .. }) if tack.has_chest => {
            Some(&tack.chest[i])
        }
        (Address::MainHand, _) => entity.equipment().map(|e| &e.main_hand),
        (Address::OffHand, _) => entity.equipment().map(|e| &e.off_hand),
        (Address::Armor(i), _) => entity.equipment().map(|e| &e.armor[i]),
        _ => None,
    }
}

fn slot_mut(entity: &mut Entity, address: Address) -> Option<&mut Option<ItemStack>> {
    if matches!(entity.data, EntityData::Player(_)) {
        let player = entity.player_mut()?;
        return match address {
            Address::Storage(i) => Some(&mut player.inventory.slots_mut()[i]),
            Address::MainHand => {
                let selected = player.inventory.selected;
                Some(&mut player.inventory.slots_mut()[selected])
            }
            Address::OffHand => Some(&mut player.inventory.off_hand),
            Address::Armor(i) => Some(&mut player.inventory.armor[i]),
            Address::EnderChest(i) => Some(&mut player.ender_chest[i]),
            _ => None,
        };
    }
    match address {
        Address::MainHand => return entity.equipment_mut().map(|e| &mut e.main_hand),
        Address::OffHand => return entity.equipment_mut().map(|e| &mut e.off_hand),
        Address::Armor(i) => return entity.equipment_mut().map(|e| &mut e.armor[i]),
        _ => {}
    }
    match (address, &mut entity.data) {
        (Address::Trader(i), EntityData::Trader { inventory, .. }) => Some(&mut inventory[i]),
        (Address::Saddle, EntityData::Horse { tack, .. }) => Some(&mut tack.saddle),
        (Address::HorseArmor, EntityData::Horse { tack, .. }) => Some(&mut tack.armor),
        (Address::HorseChest(i), EntityData::Horse { tack, .. }) if tack.has_chest => {
            Some(&mut tack.chest[i])
        }
        _ => None,
    }
}

/// Item at `slot`, or `None` when the slot is empty or not applicable.
pub fn get(entity: &Entity, slot: u32) -> Option<ItemStack> {
    let address = locate(entity.entity_type, slot)?;
    let item = match (address, &entity.data) {
        (Address::ChestFlag, EntityData::Horse { tack, .. }) => tack.has_chest.then(chest_item),
        _ => slot_ref(entity, address)?.clone(),
    };
    item.filter(|stack| !stack.is_empty())
}

/// Whether `slot` can currently hold `item` (`None` clears it).
///
/// The chest flag only takes a plain chest, since it stores nothing but
/// presence. Chest contents need a chest attached.
pub fn accepts(entity: &Entity, slot: u32, item: Option<&ItemStack>) -> bool {
    let Some(address) = locate(entity.entity_type, slot) else {
        return false;
    };
    if address != Address::ChestFlag {
        return slot_ref(entity, address).is_some();
    }
    if !matches!(entity.data, EntityData::Horse { .. }) {
        return false;
    }
    match item.filter(|stack| !stack.is_empty()) {
        None => true,
        Some(stack) => is_plain_chest(stack),
    }
}

fn is_plain_chest(stack: &ItemStack) -> bool {
    stack.item_type == ItemType::Block(blocks::CHEST)
        && stack.damage == 0
        && stack.tag.is_none()
        && stack.enchantments.as_ref().map_or(true, Vec::is_empty)
}

/// Write `item` to `slot`. Returns false, leaving the entity untouched, when
/// [`accepts`] refuses the write.
pub fn set(entity: &mut Entity, slot: u32, item: Option<ItemStack>) -> bool {
    let item = item.filter(|stack| !stack.is_empty());
    if !accepts(entity, slot, item.as_ref()) {
        return false;
    }
    let Some(address) = locate(entity.entity_type, slot) else {
        return false;
    };

    if address == Address::ChestFlag {
        let EntityData::Horse { tack, .. } = &mut entity.data else {
            return false;
        };
        tack.has_chest = item.is_some();
        if item.is_none() {
            tack.chest = Default::default();
        }
        return true;
    }

    match slot_mut(entity, address) {
        Some(target) => {
            *target = item;
            true
        }
        None => false,
    }
}

/// Every slot the entity's kind supports, keyed by id in ascending order.
pub fn get_all(entity: &Entity) -> BTreeMap<u32, Option<ItemStack>> {
    supported_slots(entity.entity_type)
        .into_iter()
        .map(|slot| (slot, get(entity, slot)))
        .collect()
}

/// Parse a slot name (`hotbar.3`, `armor.head`, `horse.chest`) or raw id.
pub fn parse_slot(token: &str) -> Option<u32> {
    if let Ok(raw) = token.parse::<u32>() {
        return Some(raw);
    }
    let fixed = match token {
        "weapon" | "weapon.mainhand" => Some(MAIN_HAND),
        "weapon.offhand" => Some(OFF_HAND),
        "armor.feet" => Some(ARMOR_START),
        "armor.legs" => Some(ARMOR_START + 1),
        "armor.chest" => Some(ARMOR_START + 2),
        "armor.head" => Some(ARMOR_START + 3),
        "horse.saddle" => Some(SADDLE),
        "horse.armor" => Some(HORSE_ARMOR),
        "horse.chest" => Some(HORSE_CHEST_FLAG),
        _ => None,
    };
    if fixed.is_some() {
        return fixed;
    }

    let (group, index) = token.rsplit_once('.')?;
    let index: u32 = index.parse().ok()?;
    let (start, len) = match group {
        "hotbar" => (0, 9),
        "inventory" => (9, 27),
        "container" => (0, 54),
        "enderchest" => (ENDER_CHEST_START, 27),
        "villager" => (TRADER_START, 7),
        "horse" => (HORSE_CHEST_START, 15),
        _ => return None,
    };
    (index < len).then_some(start + index)
}
