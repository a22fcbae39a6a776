//! Slot storage carried by entities.
//!
//! Player inventories keep the 36-slot layout (hotbar first) plus armor, off
//! hand and the ender chest. Mobs carry [`Equipment`]; traders and the horse
//! family add their own fixed-size storage on top.

use cmdplus_core::{ArmorSlot, ItemStack};
use serde::{Deserialize, Serialize};

/// Number of hotbar slots.
pub const HOTBAR_SIZE: usize = 9;

/// Number of slots in player inventory (hotbar included).
pub const INVENTORY_SIZE: usize = 36;

/// Number of armor slots (feet, legs, chest, head).
pub const ARMOR_SIZE: usize = 4;

/// Number of ender chest slots.
pub const ENDER_CHEST_SIZE: usize = 27;

/// Number of slots in a trader's inventory.
pub const TRADER_INVENTORY_SIZE: usize = 7;

/// Number of slots in a chested horse's chest.
pub const HORSE_CHEST_SIZE: usize = 15;

/// Index into an armor array for a given piece. Index 0 is the feet.
pub fn armor_index(slot: ArmorSlot) -> usize {
    match slot {
        ArmorSlot::Boots => 0,
        ArmorSlot::Leggings => 1,
        ArmorSlot::Chestplate => 2,
        ArmorSlot::Helmet => 3,
    }
}

/// Player main inventory: 36 storage slots, armor, off hand and the selected
/// hotbar index.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerInventory {
    slots: [Option<ItemStack>; INVENTORY_SIZE],
    /// Worn armor, index 0 = feet.
    pub armor: [Option<ItemStack>; ARMOR_SIZE],
    /// Off-hand item.
    pub off_hand: Option<ItemStack>,
    /// Selected hotbar slot (0-8); its item is the main hand.
    pub selected: usize,
}

#[derive(Serialize, Deserialize)]
struct PlayerInventoryRepr {
    slots: Vec<Option<ItemStack>>,
    #[serde(default)]
    armor: [Option<ItemStack>; ARMOR_SIZE],
    #[serde(default)]
    off_hand: Option<ItemStack>,
    #[serde(default)]
    selected: usize,
}

impl Serialize for PlayerInventory {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        PlayerInventoryRepr {
            slots: self.slots.to_vec(),
            armor: self.armor.clone(),
            off_hand: self.off_hand.clone(),
            selected: self.selected,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PlayerInventory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let repr = PlayerInventoryRepr::deserialize(deserializer)?;
        if repr.slots.len() != INVENTORY_SIZE {
            return Err(serde::de::Error::custom(format!(
                "Expected {} slots, got {}",
                INVENTORY_SIZE,
                repr.slots.len()
            )));
        }
        if repr.selected >= HOTBAR_SIZE {
            return Err(serde::de::Error::custom(format!(
                "Selected hotbar slot {} out of range",
                repr.selected
            )));
        }

        let slots: [Option<ItemStack>; INVENTORY_SIZE] = repr
            .slots
            .try_into()
            .map_err(|_| serde::de::Error::custom("Failed to convert to array"))?;

        Ok(PlayerInventory {
            slots,
            armor: repr.armor,
            off_hand: repr.off_hand,
            selected: repr.selected,
        })
    }
}

impl Default for PlayerInventory {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerInventory {
    /// Create a new empty inventory.
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
            armor: std::array::from_fn(|_| None),
            off_hand: None,
            selected: 0,
        }
    }

    /// All 36 storage slots, hotbar first.
    pub fn slots(&self) -> &[Option<ItemStack>; INVENTORY_SIZE] {
        &self.slots
    }

    /// Mutable storage slots, hotbar first.
    pub fn slots_mut(&mut self) -> &mut [Option<ItemStack>; INVENTORY_SIZE] {
        &mut self.slots
    }

    /// Get an item stack from a storage slot (0-35).
    pub fn get(&self, slot: usize) -> Option<&ItemStack> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Set an item stack in a storage slot.
    pub fn set(&mut self, slot: usize, stack: Option<ItemStack>) -> bool {
        match self.slots.get_mut(slot) {
            Some(target) => {
                *target = stack;
                true
            }
            None => false,
        }
    }

    /// Put a piece of armor in its slot, returning what was worn before.
    pub fn equip(&mut self, piece: ArmorSlot, stack: ItemStack) -> Option<ItemStack> {
        self.armor[armor_index(piece)].replace(stack)
    }
}

/// Player-only state beyond the main inventory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerData {
    /// Main inventory, armor and hands.
    pub inventory: PlayerInventory,
    /// Personal ender chest storage.
    pub ender_chest: [Option<ItemStack>; ENDER_CHEST_SIZE],
}

/// Hands and armor of a non-player living entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    /// Main-hand item.
    pub main_hand: Option<ItemStack>,
    /// Off-hand item.
    pub off_hand: Option<ItemStack>,
    /// Worn armor, index 0 = feet.
    pub armor: [Option<ItemStack>; ARMOR_SIZE],
}

impl Equipment {
    /// Put a piece of armor in its slot, returning what was worn before.
    pub fn equip(&mut self, piece: ArmorSlot, stack: ItemStack) -> Option<ItemStack> {
        self.armor[armor_index(piece)].replace(stack)
    }
}

/// Saddle, armor and chest carried by the horse family.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HorseTack {
    /// Saddle item.
    pub saddle: Option<ItemStack>,
    /// Horse armor (ridable horses only).
    pub armor: Option<ItemStack>,
    /// Whether a chest is attached (donkeys and mules only).
    #[serde(default)]
    pub has_chest: bool,
    /// Chest contents, only reachable while a chest is attached.
    pub chest: [Option<ItemStack>; HORSE_CHEST_SIZE],
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmdplus_core::{ArmorMaterial, ItemType};

    #[test]
    fn armor_is_stored_feet_first() {
        let mut equipment = Equipment::default();
        let boots = ItemStack::new(ItemType::Armor(ArmorSlot::Boots, ArmorMaterial::Iron), 1);
        assert!(equipment.equip(ArmorSlot::Boots, boots.clone()).is_none());
        assert_eq!(equipment.armor[0], Some(boots));
    }

    #[test]
    fn storage_slots_are_bounds_checked() {
        let mut inv = PlayerInventory::new();
        assert!(inv.set(35, Some(ItemStack::new(ItemType::Item(2), 1))));
        assert!(!inv.set(INVENTORY_SIZE, None));
        assert_eq!(inv.get(35).map(|s| s.count), Some(1));
        assert_eq!(inv.get(INVENTORY_SIZE), None);
    }

    #[test]
    fn inventory_serde_rejects_wrong_length() {
        let mut inv = PlayerInventory::new();
        inv.set(35, Some(ItemStack::new(ItemType::Item(2), 1)));
        let json = serde_json::to_string(&inv).unwrap();
        let back: PlayerInventory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, inv);

        let bad = r#"{"slots":[null,null],"armor":[null,null,null,null],"off_hand":null,"selected":0}"#;
        assert!(serde_json::from_str::<PlayerInventory>(bad).is_err());
    }
}
