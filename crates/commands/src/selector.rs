//! Container selectors: which containers a command edits.

use cmdplus_world::{BlockPos, EntityId};
use tracing::debug;

use crate::arguments::{ArgumentKind, BlockPosArg, ParsedArguments};
use crate::context::ExecuteContext;
use crate::error::CommandError;
use crate::handle::ContainerHandle;
use crate::host::CommandHost;
use crate::key::{ArgumentKey, GrammarKey};
use crate::target::EntitySelector;

pub static POS: ArgumentKey<BlockPosArg> =
    ArgumentKey::make("pos", ArgumentKind::BlockPos, ParsedArguments::block_pos);
pub static TARGETS: ArgumentKey<EntitySelector> =
    ArgumentKey::make("targets", ArgumentKind::Entities, ParsedArguments::entities);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorKind {
    Block,
    Entity,
}

/// A resolved container, reopened per handle by [`open`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerRef {
    Block(BlockPos),
    Entity(EntityId),
}

impl SelectorKind {
    pub const ALL: [SelectorKind; 2] = [SelectorKind::Block, SelectorKind::Entity];

    pub fn literal(self) -> &'static str {
        match self {
            SelectorKind::Block => "block",
            SelectorKind::Entity => "entity",
        }
    }

    pub fn key(self) -> &'static dyn GrammarKey {
        match self {
            SelectorKind::Block => &POS,
            SelectorKind::Entity => &TARGETS,
        }
    }

    /// Containers to edit, in the order they should be processed.
    ///
    /// A block selector yields exactly one container or fails; an entity
    /// selector may yield none.
    pub fn resolve(
        self,
        ctx: &mut ExecuteContext<'_>,
        host: &dyn CommandHost,
    ) -> Result<Vec<ContainerRef>, CommandError> {
        match self {
            SelectorKind::Block => {
                let pos = ctx.get(&POS)?.resolve(ctx.source().block_origin());
                match host.block_entity(pos) {
                    Some(block_entity) if block_entity.slots().is_some() => {
                        Ok(vec![ContainerRef::Block(pos)])
                    }
                    Some(block_entity) => Err(CommandError::resolution(format!(
                        "The {} at {pos} is not a container",
                        block_entity.kind_name()
                    ))),
                    None => Err(CommandError::resolution(format!(
                        "Target block at {pos} is not a container"
                    ))),
                }
            }
            SelectorKind::Entity => {
                let selector = ctx.get(&TARGETS)?;
                let ids = selector.resolve(host, ctx.source());
                debug!(%selector, matched = ids.len(), "resolved entity selector");
                Ok(ids.into_iter().map(ContainerRef::Entity).collect())
            }
        }
    }
}

/// Borrow the container behind `target` for editing.
pub fn open(
    host: &mut dyn CommandHost,
    target: ContainerRef,
) -> Result<ContainerHandle<'_>, CommandError> {
    match target {
        ContainerRef::Block(pos) => {
            let block_entity = host.block_entity_mut(pos).ok_or_else(|| {
                CommandError::unexpected(format!("block entity at {pos} disappeared"))
            })?;
            let label = format!("{} at {pos}", block_entity.kind_name());
            let slots = block_entity.slots_mut().ok_or_else(|| {
                CommandError::unexpected(format!("{label} no longer has storage"))
            })?;
            Ok(ContainerHandle::Direct { label, slots })
        }
        ContainerRef::Entity(id) => host
            .entity_mut(id)
            .map(ContainerHandle::Addressed)
            .ok_or_else(|| CommandError::unexpected(format!("entity {id} disappeared"))),
    }
}
