//! Item system - Tools, armor, blocks, and other inventory items

use crate::enchantment::{Enchantment, EnchantmentType};
use crate::tag::TagCompound;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Item type identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemType {
    /// A tool (pickaxe, axe, etc.)
    Tool(ToolType, ToolMaterial),
    /// A wearable armor piece
    Armor(ArmorSlot, ArmorMaterial),
    /// A placeable block
    Block(u16), // BlockId
    /// Food item
    Food(FoodType),
    /// Generic item
    Item(u16),
}

/// Tool types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolType {
    /// Pickaxe - mines stone, ores
    Pickaxe,
    /// Axe - chops wood
    Axe,
    /// Shovel - digs dirt, sand, gravel
    Shovel,
    /// Sword - combat weapon
    Sword,
    /// Hoe - tills farmland
    Hoe,
}

/// Tool material tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ToolMaterial {
    /// Wooden tools (tier 0)
    Wood = 0,
    /// Stone tools (tier 1)
    Stone = 1,
    /// Iron tools (tier 2)
    Iron = 2,
    /// Diamond tools (tier 3)
    Diamond = 3,
    /// Gold tools (very fast but weak mining tier - same tier as wood)
    Gold = 4,
}

/// Armor slot types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArmorSlot {
    /// Head slot
    Helmet,
    /// Chest slot
    Chestplate,
    /// Legs slot
    Leggings,
    /// Feet slot
    Boots,
}

/// Armor material types (determines durability)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArmorMaterial {
    /// Leather armor
    Leather,
    /// Iron armor
    Iron,
    /// Gold armor
    Gold,
    /// Diamond armor
    Diamond,
}

/// Food types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoodType {
    /// Apple
    Apple,
    /// Bread
    Bread,
    /// Raw meat
    RawMeat,
    /// Cooked meat
    CookedMeat,
}

impl ToolMaterial {
    /// Get the maximum durability for tools of this material
    pub fn durability(self, tool_type: ToolType) -> u32 {
        let base = match self {
            ToolMaterial::Wood => 59,
            ToolMaterial::Stone => 131,
            ToolMaterial::Iron => 250,
            ToolMaterial::Diamond => 1561,
            ToolMaterial::Gold => 32,
        };

        // Swords have different durability
        if tool_type == ToolType::Sword {
            base + 1
        } else {
            base
        }
    }

    const fn key(self) -> &'static str {
        match self {
            ToolMaterial::Wood => "wooden",
            ToolMaterial::Stone => "stone",
            ToolMaterial::Iron => "iron",
            ToolMaterial::Diamond => "diamond",
            ToolMaterial::Gold => "golden",
        }
    }
}

impl ToolType {
    const ALL: [ToolType; 5] = [
        ToolType::Pickaxe,
        ToolType::Axe,
        ToolType::Shovel,
        ToolType::Sword,
        ToolType::Hoe,
    ];

    /// Lowercase key ("pickaxe").
    pub const fn key(self) -> &'static str {
        match self {
            ToolType::Pickaxe => "pickaxe",
            ToolType::Axe => "axe",
            ToolType::Shovel => "shovel",
            ToolType::Sword => "sword",
            ToolType::Hoe => "hoe",
        }
    }

    /// Look up a tool type by key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.key() == key)
    }
}

impl ArmorSlot {
    const ALL: [ArmorSlot; 4] = [
        ArmorSlot::Helmet,
        ArmorSlot::Chestplate,
        ArmorSlot::Leggings,
        ArmorSlot::Boots,
    ];

    const fn key(self) -> &'static str {
        match self {
            ArmorSlot::Helmet => "helmet",
            ArmorSlot::Chestplate => "chestplate",
            ArmorSlot::Leggings => "leggings",
            ArmorSlot::Boots => "boots",
        }
    }
}

impl ArmorMaterial {
    const fn key(self) -> &'static str {
        match self {
            ArmorMaterial::Leather => "leather",
            ArmorMaterial::Iron => "iron",
            ArmorMaterial::Gold => "golden",
            ArmorMaterial::Diamond => "diamond",
        }
    }

    /// Maximum durability for a piece of this material in `slot`.
    pub fn durability(self, slot: ArmorSlot) -> u32 {
        // Base durability per slot, multiplied by material factor
        let base = match slot {
            ArmorSlot::Helmet => 11,
            ArmorSlot::Chestplate => 16,
            ArmorSlot::Leggings => 15,
            ArmorSlot::Boots => 13,
        };

        let multiplier = match self {
            ArmorMaterial::Leather => 5,
            ArmorMaterial::Iron => 15,
            ArmorMaterial::Gold => 7,
            ArmorMaterial::Diamond => 33,
        };

        base * multiplier
    }
}

impl FoodType {
    const ALL: [FoodType; 4] = [
        FoodType::Apple,
        FoodType::Bread,
        FoodType::RawMeat,
        FoodType::CookedMeat,
    ];

    const fn key(self) -> &'static str {
        match self {
            FoodType::Apple => "apple",
            FoodType::Bread => "bread",
            FoodType::RawMeat => "raw_meat",
            FoodType::CookedMeat => "cooked_meat",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemType::Tool(tool, material) => write!(f, "{}_{}", material.key(), tool.key()),
            ItemType::Armor(slot, material) => write!(f, "{}_{}", material.key(), slot.key()),
            ItemType::Block(id) => write!(f, "block:{id}"),
            ItemType::Food(food) => f.write_str(food.key()),
            ItemType::Item(id) => write!(f, "item:{id}"),
        }
    }
}

/// Error returned when an item key does not name a known item.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown item '{0}'")]
pub struct UnknownItem(pub String);

impl FromStr for ItemType {
    type Err = UnknownItem;

    /// Parse the key produced by `Display` (`diamond_pickaxe`, `iron_boots`,
    /// `block:54`, `item:7`, `apple`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        let unknown = || UnknownItem(s.trim().to_string());

        if let Some(id) = key.strip_prefix("block:") {
            return id.parse().map(ItemType::Block).map_err(|_| unknown());
        }
        if let Some(id) = key.strip_prefix("item:") {
            return id.parse().map(ItemType::Item).map_err(|_| unknown());
        }
        if let Some(food) = FoodType::ALL.into_iter().find(|f| f.key() == key) {
            return Ok(ItemType::Food(food));
        }

        let (material, piece) = key.split_once('_').ok_or_else(unknown)?;
        if let Some(tool) = ToolType::from_key(piece) {
            let material = [
                ToolMaterial::Wood,
                ToolMaterial::Stone,
                ToolMaterial::Iron,
                ToolMaterial::Diamond,
                ToolMaterial::Gold,
            ]
            .into_iter()
            .find(|m| m.key() == material)
            .ok_or_else(unknown)?;
            return Ok(ItemType::Tool(tool, material));
        }
        if let Some(slot) = ArmorSlot::ALL.into_iter().find(|s| s.key() == piece) {
            let material = [
                ArmorMaterial::Leather,
                ArmorMaterial::Iron,
                ArmorMaterial::Gold,
                ArmorMaterial::Diamond,
            ]
            .into_iter()
            .find(|m| m.key() == material)
            .ok_or_else(unknown)?;
            return Ok(ItemType::Armor(slot, material));
        }
        Err(unknown())
    }
}

/// An item stack in inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Type of item
    pub item_type: ItemType,
    /// Quantity in stack
    pub count: u32,
    /// Accumulated damage; the item breaks once this exceeds `max_damage`.
    #[serde(default)]
    pub damage: u32,
    /// Per-stack durability limit replacing the item type's own.
    #[serde(default)]
    pub max_damage_override: Option<u32>,
    /// Enchantments applied to this item (None for unenchanted items)
    #[serde(default)]
    pub enchantments: Option<Vec<Enchantment>>,
    /// Structured tag payload (custom data, lore, usage lists)
    #[serde(default)]
    pub tag: Option<TagCompound>,
}

impl ItemStack {
    /// Create a new item stack
    pub fn new(item_type: ItemType, count: u32) -> Self {
        Self {
            item_type,
            count,
            damage: 0,
            max_damage_override: None,
            enchantments: None,
            tag: None,
        }
    }

    /// Builder-style damage override.
    pub fn with_damage(mut self, damage: u32) -> Self {
        self.damage = damage;
        self
    }

    /// Builder-style durability limit, also making otherwise plain items damageable.
    pub fn with_max_damage(mut self, max_damage: u32) -> Self {
        self.max_damage_override = Some(max_damage);
        self
    }

    /// Builder-style tag override.
    pub fn with_tag(mut self, tag: TagCompound) -> Self {
        self.tag = Some(tag);
        self
    }

    /// An empty stack is the absence sentinel; slots holding one read as empty.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Get maximum durability for this item
    pub fn max_damage(&self) -> Option<u32> {
        if self.max_damage_override.is_some() {
            return self.max_damage_override;
        }
        match self.item_type {
            ItemType::Tool(tool_type, material) => Some(material.durability(tool_type)),
            ItemType::Armor(slot, material) => Some(material.durability(slot)),
            _ => None,
        }
    }

    /// Check whether this item tracks durability at all
    pub fn is_damageable(&self) -> bool {
        self.max_damage().is_some()
    }

    /// Check if this item can be placed as a block
    pub fn is_block_item(&self) -> bool {
        matches!(self.item_type, ItemType::Block(_))
    }

    /// Check if this item can be enchanted
    pub fn is_enchantable(&self) -> bool {
        matches!(self.item_type, ItemType::Tool(_, _) | ItemType::Armor(_, _))
    }

    /// Get all enchantments on this item
    pub fn get_enchantments(&self) -> &[Enchantment] {
        self.enchantments.as_deref().unwrap_or(&[])
    }

    /// Check if this item carries any enchantment
    pub fn has_enchantments(&self) -> bool {
        !self.get_enchantments().is_empty()
    }

    /// Get the level of a specific enchantment, or 0 if not present
    pub fn enchantment_level(&self, enchant_type: EnchantmentType) -> u8 {
        self.get_enchantments()
            .iter()
            .find(|e| e.enchantment_type == enchant_type)
            .map(|e| e.level)
            .unwrap_or(0)
    }

    /// Set an enchantment to exactly `level`, keeping the position of an
    /// existing entry. Level 0 removes the enchantment.
    pub fn set_enchantment_level(&mut self, enchant_type: EnchantmentType, level: u8) {
        let enchants = self.enchantments.get_or_insert_with(Vec::new);
        match enchants
            .iter()
            .position(|e| e.enchantment_type == enchant_type)
        {
            Some(index) if level == 0 => {
                enchants.remove(index);
            }
            Some(index) => enchants[index].level = level,
            None if level == 0 => {}
            None => enchants.push(Enchantment::with_level(enchant_type, level)),
        }
        if enchants.is_empty() {
            self.enchantments = None;
        }
    }

    /// Remove every enchantment
    pub fn clear_enchantments(&mut self) {
        self.enchantments = None;
    }

    /// Nested compound stored under `key` in the tag payload.
    pub fn sub_tag(&self, key: &str) -> Option<&TagCompound> {
        self.tag.as_ref().and_then(|tag| tag.compound(key))
    }

    /// Tag payload, created empty if absent.
    pub fn tag_mut(&mut self) -> &mut TagCompound {
        self.tag.get_or_insert_with(TagCompound::new)
    }

    /// Drop the tag payload entirely once it holds nothing.
    pub fn prune_tag(&mut self) {
        if self.tag.as_ref().is_some_and(TagCompound::is_empty) {
            self.tag = None;
        }
    }

    /// Name shown in operator feedback ("diamond_pickaxe").
    pub fn display_name(&self) -> String {
        self.item_type.to_string()
    }
}
