//! Seam between the command engine and the game-object layer.

use cmdplus_world::{BlockEntity, BlockPos, Entity, EntityId, World};

/// Game state a command can observe and mutate.
pub trait CommandHost {
    fn block_entity(&self, pos: BlockPos) -> Option<&BlockEntity>;
    fn block_entity_mut(&mut self, pos: BlockPos) -> Option<&mut BlockEntity>;
    fn entity(&self, id: EntityId) -> Option<&Entity>;
    fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity>;

    /// All entities in ascending id order.
    fn entities(&self) -> Box<dyn Iterator<Item = &Entity> + '_>;
}

impl CommandHost for World {
    fn block_entity(&self, pos: BlockPos) -> Option<&BlockEntity> {
        World::block_entity(self, pos)
    }

    fn block_entity_mut(&mut self, pos: BlockPos) -> Option<&mut BlockEntity> {
        World::block_entity_mut(self, pos)
    }

    fn entity(&self, id: EntityId) -> Option<&Entity> {
        World::entity(self, id)
    }

    fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        World::entity_mut(self, id)
    }

    fn entities(&self) -> Box<dyn Iterator<Item = &Entity> + '_> {
        Box::new(World::entities(self))
    }
}

/// Who is running a command, and from where.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandSource {
    /// Name used in logs and transcripts.
    pub name: String,
    /// Executing entity, if any (`@s`).
    pub entity: Option<EntityId>,
    /// Origin for relative coordinates and `@p`.
    pub position: [f64; 3],
}

impl CommandSource {
    /// A source with no entity, such as the server console.
    pub fn console(position: [f64; 3]) -> Self {
        Self {
            name: "Server".to_string(),
            entity: None,
            position,
        }
    }

    /// A source executing as `entity`.
    pub fn as_entity(entity: &Entity) -> Self {
        Self {
            name: entity.display_name(),
            entity: Some(entity.id),
            position: entity.position,
        }
    }

    /// Block containing the source position.
    pub fn block_origin(&self) -> BlockPos {
        BlockPos::containing(self.position)
    }
}
