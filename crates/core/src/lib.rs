#![warn(missing_docs)]
//! Item primitives shared across the workspace: stacks, enchantments,
//! registry keys and structured tags.

pub mod enchantment;
pub mod item;
pub mod registry;
pub mod tag;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use enchantment::{Enchantment, EnchantmentType};
pub use item::{
    ArmorMaterial, ArmorSlot, FoodType, ItemStack, ItemType, ToolMaterial, ToolType, UnknownItem,
};
pub use registry::{RegistryKey, RegistryKeyError};
pub use tag::{Tag, TagCompound, TagError};

/// Position of a command in a session timeline: the script tick, or the
/// input line for interactive sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimTick(pub u64);
