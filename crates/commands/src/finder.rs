//! Slot finders: which slots of a container a command edits.

use cmdplus_core::ItemStack;

use crate::arguments::{ArgumentKind, ParsedArguments};
use crate::context::ExecuteContext;
use crate::error::CommandError;
use crate::grammar::CommandNode;
use crate::handle::ContainerHandle;
use crate::key::ArgumentKey;
use crate::predicate::ItemPredicate;

/// `count` value meaning "no cap".
pub const UNBOUNDED: i32 = -1;

pub static SLOT: ArgumentKey<u32> =
    ArgumentKey::make("slot", ArgumentKind::ItemSlot, ParsedArguments::slot);
pub static PREDICATE: ArgumentKey<ItemPredicate> =
    ArgumentKey::make("item", ArgumentKind::ItemPredicate, ParsedArguments::predicate);
pub static COUNT: ArgumentKey<i32> = ArgumentKey::make(
    "count",
    ArgumentKind::Integer {
        min: UNBOUNDED,
        max: i32::MAX,
    },
    ParsedArguments::integer,
);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinderKind {
    /// One explicit slot id.
    Slot,
    /// Every slot whose item matches a predicate, optionally capped.
    Matching,
}

impl FinderKind {
    pub const ALL: [FinderKind; 2] = [FinderKind::Slot, FinderKind::Matching];

    pub fn literal(self) -> &'static str {
        match self {
            FinderKind::Slot => "slot",
            FinderKind::Matching => "item",
        }
    }

    /// Grammar for this finder with `actions` hung below every point where
    /// the finder's own arguments may end.
    pub fn node(self, actions: impl Fn() -> Vec<CommandNode>) -> CommandNode {
        let arguments = match self {
            FinderKind::Slot => SLOT.node().then_all(actions()),
            FinderKind::Matching => PREDICATE
                .node()
                .then_all(actions())
                .then(COUNT.node().then_all(actions())),
        };
        CommandNode::literal(self.literal()).then(arguments)
    }

    /// Slots to edit in `handle`, ascending by id, with their current items.
    ///
    /// The slot finder reports its slot even when empty; the engine skips
    /// empty slots.
    pub fn find(
        self,
        ctx: &mut ExecuteContext<'_>,
        handle: &ContainerHandle<'_>,
    ) -> Result<Vec<(u32, Option<ItemStack>)>, CommandError> {
        match self {
            FinderKind::Slot => {
                let slot = ctx.get(&SLOT)?;
                Ok(vec![(slot, handle.get(slot))])
            }
            FinderKind::Matching => {
                let predicate = ctx.get(&PREDICATE)?;
                let count = ctx.get_or(&COUNT, UNBOUNDED)?;
                let cap = usize::try_from(count).unwrap_or(usize::MAX);
                Ok(handle
                    .get_all()
                    .into_iter()
                    .filter(|(_, item)| item.as_ref().is_some_and(|stack| predicate.test(stack)))
                    .take(cap)
                    .collect())
            }
        }
    }
}
