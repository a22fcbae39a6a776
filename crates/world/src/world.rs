//! In-memory world state: block entities by position, entities by id.

use crate::block::BlockPos;
use crate::block_entity::BlockEntity;
use crate::entity::{Entity, EntityId, EntityType};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Block entities and entities of one world.
///
/// Both maps iterate in key order, so selection by entity id and snapshot
/// output are deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WorldSnapshot", into = "WorldSnapshot")]
pub struct World {
    block_entities: BTreeMap<BlockPos, BlockEntity>,
    entities: BTreeMap<EntityId, Entity>,
    next_entity_id: u64,
}

/// On-disk shape: JSON maps cannot use struct keys, so positions are inlined.
#[derive(Serialize, Deserialize)]
struct WorldSnapshot {
    #[serde(default)]
    block_entities: Vec<PlacedBlockEntity>,
    #[serde(default)]
    entities: Vec<Entity>,
}

#[derive(Serialize, Deserialize)]
struct PlacedBlockEntity {
    pos: BlockPos,
    #[serde(flatten)]
    state: BlockEntity,
}

impl From<WorldSnapshot> for World {
    fn from(snapshot: WorldSnapshot) -> Self {
        let mut world = World::new();
        for placed in snapshot.block_entities {
            world.block_entities.insert(placed.pos, placed.state);
        }
        for entity in snapshot.entities {
            world.insert_entity(entity);
        }
        world
    }
}

impl From<World> for WorldSnapshot {
    fn from(world: World) -> Self {
        Self {
            block_entities: world
                .block_entities
                .into_iter()
                .map(|(pos, state)| PlacedBlockEntity { pos, state })
                .collect(),
            entities: world.entities.into_values().collect(),
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    pub fn new() -> Self {
        Self {
            block_entities: BTreeMap::new(),
            entities: BTreeMap::new(),
            next_entity_id: 1,
        }
    }

    /// Load a JSON world snapshot.
    pub fn load_json(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read world snapshot {}", path.display()))?;
        let world: World = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse world snapshot {}", path.display()))?;
        debug!(
            path = %path.display(),
            block_entities = world.block_entities.len(),
            entities = world.entities.len(),
            "Loaded world snapshot"
        );
        Ok(world)
    }

    /// Write a pretty-printed JSON world snapshot.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self).context("Failed to serialize world")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write world snapshot {}", path.display()))?;
        Ok(())
    }

    /// Place (or replace) the block entity at `pos`.
    pub fn set_block_entity(&mut self, pos: BlockPos, state: BlockEntity) -> Option<BlockEntity> {
        self.block_entities.insert(pos, state)
    }

    pub fn block_entity(&self, pos: BlockPos) -> Option<&BlockEntity> {
        self.block_entities.get(&pos)
    }

    pub fn block_entity_mut(&mut self, pos: BlockPos) -> Option<&mut BlockEntity> {
        self.block_entities.get_mut(&pos)
    }

    /// Spawn an entity with empty storage and return its id.
    pub fn spawn(&mut self, entity_type: EntityType, position: [f64; 3]) -> EntityId {
        let id = EntityId(self.next_entity_id);
        self.insert_entity(Entity::new(id, entity_type, position));
        debug!(%id, %entity_type, "Spawned entity");
        id
    }

    /// Spawn a named player and return its id.
    pub fn spawn_player(&mut self, name: &str, position: [f64; 3]) -> EntityId {
        let id = self.spawn(EntityType::Player, position);
        if let Some(player) = self.entities.get_mut(&id) {
            player.name = Some(name.to_string());
        }
        id
    }

    /// Insert a fully built entity, keeping id allocation ahead of it.
    pub fn insert_entity(&mut self, entity: Entity) {
        self.next_entity_id = self.next_entity_id.max(entity.id.0 + 1);
        self.entities.insert(entity.id, entity);
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// Entities in ascending id order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Player with the given name.
    pub fn player_by_name(&self, name: &str) -> Option<&Entity> {
        self.entities().find(|e| {
            e.entity_type == EntityType::Player && e.name.as_deref() == Some(name)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block_entity::ChestState;
    use cmdplus_core::{ItemStack, ItemType};

    #[test]
    fn ids_are_allocated_in_order() {
        let mut world = World::new();
        let a = world.spawn(EntityType::Pig, [0.0; 3]);
        let b = world.spawn_player("Alex", [1.0, 2.0, 3.0]);
        assert!(a < b);
        assert_eq!(world.player_by_name("Alex").map(|e| e.id), Some(b));
        let ids: Vec<_> = world.entities().map(|e| e.id).collect();
        assert_eq!(ids, vec![a, b]);
    }

    #[test]
    fn snapshot_roundtrip() {
        let mut world = World::new();
        let mut chest = ChestState::default();
        chest.slots[4] = Some(ItemStack::new(ItemType::Block(1), 12));
        world.set_block_entity(BlockPos::new(1, 64, -3), BlockEntity::Chest(chest));
        world.spawn(EntityType::Donkey, [5.0, 64.0, 5.0]);

        let json = serde_json::to_string(&world).unwrap();
        let back: World = serde_json::from_str(&json).unwrap();
        assert_eq!(back, world);

        // Fresh ids continue after the loaded ones
        let mut back = back;
        assert_eq!(back.spawn(EntityType::Cow, [0.0; 3]), EntityId(2));
    }

    #[test]
    fn save_and_load_file() {
        let dir = std::env::temp_dir().join(format!("cmdplus-world-{}", std::process::id()));
        let path = dir.join("world.json");
        let mut world = World::new();
        world.spawn_player("Steve", [0.0, 64.0, 0.0]);
        world.save_json(&path).unwrap();
        assert_eq!(World::load_json(&path).unwrap(), world);
        std::fs::remove_dir_all(&dir).ok();
    }
}
