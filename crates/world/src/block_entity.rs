//! Block entities: per-position state attached to chests, dispensers,
//! hoppers and signs.

use cmdplus_core::ItemStack;
use serde::{Deserialize, Serialize};

/// Number of slots in a single chest inventory (3 rows × 9 columns).
pub const CHEST_SLOT_COUNT: usize = 27;

/// Number of slots in a dispenser/dropper inventory.
pub const DISPENSER_SLOT_COUNT: usize = 9;

/// Number of slots in a hopper inventory.
pub const HOPPER_SLOT_COUNT: usize = 5;

/// Persisted inventory state for a chest block entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChestState {
    pub slots: [Option<ItemStack>; CHEST_SLOT_COUNT],
}

/// Persisted inventory state for dispenser-like block entities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DispenserState {
    pub slots: [Option<ItemStack>; DISPENSER_SLOT_COUNT],
    /// Last observed redstone powered state (edge-detection).
    #[serde(default)]
    pub was_powered: bool,
}

/// Persisted inventory state for a hopper block entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HopperState {
    pub slots: [Option<ItemStack>; HOPPER_SLOT_COUNT],
    /// Transfer cooldown in ticks (vanilla-ish: 8 ticks per move).
    #[serde(default)]
    pub cooldown_ticks: u8,
}

/// Sign text. Signs have a block entity but no storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignState {
    pub lines: [String; 4],
}

/// State attached to a block position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockEntity {
    Chest(ChestState),
    Dispenser(DispenserState),
    Hopper(HopperState),
    Sign(SignState),
}

impl BlockEntity {
    /// Registry path of the block carrying this entity.
    pub fn kind_name(&self) -> &'static str {
        match self {
            BlockEntity::Chest(_) => "chest",
            BlockEntity::Dispenser(_) => "dispenser",
            BlockEntity::Hopper(_) => "hopper",
            BlockEntity::Sign(_) => "oak_sign",
        }
    }

    /// Item storage, if this block entity has any.
    pub fn slots(&self) -> Option<&[Option<ItemStack>]> {
        match self {
            BlockEntity::Chest(chest) => Some(&chest.slots),
            BlockEntity::Dispenser(dispenser) => Some(&dispenser.slots),
            BlockEntity::Hopper(hopper) => Some(&hopper.slots),
            BlockEntity::Sign(_) => None,
        }
    }

    /// Mutable item storage, if this block entity has any.
    pub fn slots_mut(&mut self) -> Option<&mut [Option<ItemStack>]> {
        match self {
            BlockEntity::Chest(chest) => Some(&mut chest.slots),
            BlockEntity::Dispenser(dispenser) => Some(&mut dispenser.slots),
            BlockEntity::Hopper(hopper) => Some(&mut hopper.slots),
            BlockEntity::Sign(_) => None,
        }
    }
}
