//! Entities that can carry items.

use crate::inventory::{
    Equipment, HorseTack, PlayerData, PlayerInventory, TRADER_INVENTORY_SIZE,
};
use cmdplus_core::ItemStack;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable entity identifier assigned by the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Entity kinds known to the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    /// Player
    Player,
    // Plain living mobs
    /// Zombie
    Zombie,
    /// Skeleton
    Skeleton,
    /// Pig
    Pig,
    /// Cow
    Cow,
    // Traders
    /// Villager
    Villager,
    /// Wandering trader
    WanderingTrader,
    // Horse family
    /// Ridable horse (saddle + armor)
    Horse,
    /// Donkey (saddle + optional chest)
    Donkey,
    /// Mule (saddle + optional chest)
    Mule,
    // Non-living objects
    /// Dropped item
    Item,
    /// Minecart
    Minecart,
}

impl EntityType {
    /// Every entity type, in declaration order.
    pub const ALL: [EntityType; 12] = [
        EntityType::Player,
        EntityType::Zombie,
        EntityType::Skeleton,
        EntityType::Pig,
        EntityType::Cow,
        EntityType::Villager,
        EntityType::WanderingTrader,
        EntityType::Horse,
        EntityType::Donkey,
        EntityType::Mule,
        EntityType::Item,
        EntityType::Minecart,
    ];

    /// Registry path ("wandering_trader").
    pub const fn key(self) -> &'static str {
        match self {
            EntityType::Player => "player",
            EntityType::Zombie => "zombie",
            EntityType::Skeleton => "skeleton",
            EntityType::Pig => "pig",
            EntityType::Cow => "cow",
            EntityType::Villager => "villager",
            EntityType::WanderingTrader => "wandering_trader",
            EntityType::Horse => "horse",
            EntityType::Donkey => "donkey",
            EntityType::Mule => "mule",
            EntityType::Item => "item",
            EntityType::Minecart => "minecart",
        }
    }

    /// Look up an entity type by registry path.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.key() == key)
    }

    /// Living entities have hands and armor.
    pub fn is_living(self) -> bool {
        !matches!(self, EntityType::Item | EntityType::Minecart)
    }

    /// Horses, donkeys and mules.
    pub fn is_horse_family(self) -> bool {
        matches!(
            self,
            EntityType::Horse | EntityType::Donkey | EntityType::Mule
        )
    }

    /// Donkeys and mules can carry a chest.
    pub fn can_carry_chest(self) -> bool {
        matches!(self, EntityType::Donkey | EntityType::Mule)
    }

    /// Villagers and wandering traders.
    pub fn is_trader(self) -> bool {
        matches!(self, EntityType::Villager | EntityType::WanderingTrader)
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Item-carrying state, shaped by the entity's kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityData {
    /// Player inventory and ender chest.
    Player(Box<PlayerData>),
    /// Hands and armor of a plain living mob.
    Mob { equipment: Equipment },
    /// Trader equipment plus its small inventory.
    Trader {
        equipment: Equipment,
        inventory: [Option<ItemStack>; TRADER_INVENTORY_SIZE],
    },
    /// Horse-family equipment and tack.
    Horse { equipment: Equipment, tack: HorseTack },
    /// Entities without any slots.
    Object,
}

impl EntityData {
    /// Empty storage appropriate for `entity_type`.
    pub fn for_type(entity_type: EntityType) -> Self {
        match entity_type {
            EntityType::Player => EntityData::Player(Box::default()),
            t if t.is_trader() => EntityData::Trader {
                equipment: Equipment::default(),
                inventory: Default::default(),
            },
            t if t.is_horse_family() => EntityData::Horse {
                equipment: Equipment::default(),
                tack: HorseTack::default(),
            },
            t if t.is_living() => EntityData::Mob {
                equipment: Equipment::default(),
            },
            _ => EntityData::Object,
        }
    }
}

/// An entity placed in the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Stable identifier.
    pub id: EntityId,
    /// Kind of entity.
    pub entity_type: EntityType,
    /// Player name or custom name.
    #[serde(default)]
    pub name: Option<String>,
    /// World-space position.
    pub position: [f64; 3],
    /// Slots carried by the entity.
    pub data: EntityData,
}

impl Entity {
    /// Create an entity with empty storage for its kind.
    pub fn new(id: EntityId, entity_type: EntityType, position: [f64; 3]) -> Self {
        Self {
            id,
            entity_type,
            name: None,
            position,
            data: EntityData::for_type(entity_type),
        }
    }

    /// Name shown in feedback: custom name, otherwise the type key.
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| self.entity_type.key().to_string())
    }

    /// Player state, if this entity is a player.
    pub fn player(&self) -> Option<&PlayerData> {
        match &self.data {
            EntityData::Player(data) => Some(data),
            _ => None,
        }
    }

    /// Mutable player state, if this entity is a player.
    pub fn player_mut(&mut self) -> Option<&mut PlayerData> {
        match &mut self.data {
            EntityData::Player(data) => Some(data),
            _ => None,
        }
    }

    /// Player inventory shortcut.
    pub fn inventory_mut(&mut self) -> Option<&mut PlayerInventory> {
        self.player_mut().map(|data| &mut data.inventory)
    }

    /// Equipment of a non-player living entity.
    pub fn equipment(&self) -> Option<&Equipment> {
        match &self.data {
            EntityData::Mob { equipment }
            | EntityData::Trader { equipment, .. }
            | EntityData::Horse { equipment, .. } => Some(equipment),
            EntityData::Player(_) | EntityData::Object => None,
        }
    }

    /// Mutable equipment of a non-player living entity.
    pub fn equipment_mut(&mut self) -> Option<&mut Equipment> {
        match &mut self.data {
            EntityData::Mob { equipment }
            | EntityData::Trader { equipment, .. }
            | EntityData::Horse { equipment, .. } => Some(equipment),
            EntityData::Player(_) | EntityData::Object => None,
        }
    }

    /// Squared distance to a world-space point.
    pub fn distance_sq(&self, point: [f64; 3]) -> f64 {
        self.position
            .iter()
            .zip(point)
            .map(|(a, b)| (a - b) * (a - b))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_follows_entity_kind() {
        let data = |t| EntityData::for_type(t);
        assert!(matches!(data(EntityType::Player), EntityData::Player(_)));
        assert!(matches!(data(EntityType::Zombie), EntityData::Mob { .. }));
        assert!(matches!(
            data(EntityType::WanderingTrader),
            EntityData::Trader { .. }
        ));
        assert!(matches!(data(EntityType::Mule), EntityData::Horse { .. }));
        assert_eq!(data(EntityType::Minecart), EntityData::Object);
    }

    #[test]
    fn type_keys_roundtrip() {
        for t in EntityType::ALL {
            assert_eq!(EntityType::from_key(t.key()), Some(t));
        }
    }

    #[test]
    fn display_name_prefers_custom_name() {
        let mut pig = Entity::new(EntityId(3), EntityType::Pig, [0.0; 3]);
        assert_eq!(pig.display_name(), "pig");
        pig.name = Some("Wilbur".into());
        assert_eq!(pig.display_name(), "Wilbur");
    }
}
