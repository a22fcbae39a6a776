//! `destroy` and `placeOn`: the adventure-mode usage lists.
//!
//! Both actions share one mode table; which list is edited comes from the
//! [`UsageList`] seeded into the context before the modes run.

use cmdplus_core::{ItemStack, RegistryKey};

use crate::action::{item_count, ActionKind, ActionType, Fragment, ItemOutcome, Mode, ModeSpec};
use crate::arguments::{ArgumentKind, ParsedArguments};
use crate::context::ExecuteContext;
use crate::error::CommandError;
use crate::key::ArgumentKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageList {
    CanDestroy,
    CanPlaceOn,
}

impl UsageList {
    /// Tag key holding the list.
    pub fn tag_key(self) -> &'static str {
        match self {
            UsageList::CanDestroy => "CanDestroy",
            UsageList::CanPlaceOn => "CanPlaceOn",
        }
    }

    /// Why `item` cannot carry this list, if it cannot.
    fn reject(self, item: &ItemStack) -> Option<String> {
        match self {
            UsageList::CanPlaceOn if !item.is_block_item() => Some(format!(
                "{} is not a block and cannot be placed",
                item.display_name()
            )),
            _ => None,
        }
    }
}

pub static BLOCK: ArgumentKey<RegistryKey> =
    ArgumentKey::make("block", ArgumentKind::Block, ParsedArguments::block);

static MODES: [ModeSpec; 3] = [
    ModeSpec {
        mode: Mode::Add,
        arguments: &[Fragment::required(&BLOCK)],
        validate: None,
        modify: add,
        success: |ctx, count| {
            Ok(format!(
                "Added {} to the {} list of {}",
                ctx.get(&BLOCK)?,
                ctx.usage_list()?.tag_key(),
                item_count(count)
            ))
        },
    },
    ModeSpec {
        mode: Mode::Remove,
        arguments: &[Fragment::required(&BLOCK)],
        validate: None,
        modify: remove,
        success: |ctx, count| {
            Ok(format!(
                "Removed {} from the {} list of {}",
                ctx.get(&BLOCK)?,
                ctx.usage_list()?.tag_key(),
                item_count(count)
            ))
        },
    },
    ModeSpec {
        mode: Mode::Clear,
        arguments: &[],
        validate: None,
        modify: clear,
        success: |ctx, count| {
            Ok(format!(
                "Cleared the {} list of {}",
                ctx.usage_list()?.tag_key(),
                item_count(count)
            ))
        },
    },
];

pub static DESTROY: ActionType = ActionType {
    kind: ActionKind::Usage(UsageList::CanDestroy),
    name: "destroy",
    modes: &MODES,
};

pub static PLACE_ON: ActionType = ActionType {
    kind: ActionKind::Usage(UsageList::CanPlaceOn),
    name: "placeOn",
    modes: &MODES,
};

/// Entries of `list` on `item`.
pub fn entries(item: &ItemStack, list: UsageList) -> Vec<String> {
    item.tag
        .as_ref()
        .map(|tag| tag.string_list(list.tag_key()))
        .unwrap_or_default()
}

fn store(item: &mut ItemStack, list: UsageList, entries: Vec<String>) {
    if entries.is_empty() {
        item.tag_mut().remove(list.tag_key());
    } else {
        item.tag_mut().put_string_list(list.tag_key(), entries);
    }
    item.prune_tag();
}

fn add(ctx: &mut ExecuteContext<'_>, item: &mut ItemStack) -> Result<ItemOutcome, CommandError> {
    let list = ctx.usage_list()?;
    let block = ctx.get(&BLOCK)?;
    if let Some(reason) = list.reject(item) {
        return Ok(ItemOutcome::Skipped(reason));
    }
    let mut current = entries(item, list);
    current.push(block.to_string());
    store(item, list, current);
    Ok(ItemOutcome::Applied)
}

fn remove(
    ctx: &mut ExecuteContext<'_>,
    item: &mut ItemStack,
) -> Result<ItemOutcome, CommandError> {
    let list = ctx.usage_list()?;
    let block = ctx.get(&BLOCK)?.to_string();
    if let Some(reason) = list.reject(item) {
        return Ok(ItemOutcome::Skipped(reason));
    }
    let mut current = entries(item, list);
    let Some(position) = current.iter().position(|entry| *entry == block) else {
        return Ok(ItemOutcome::Skipped(format!(
            "{} has no {block} entry in {}",
            item.display_name(),
            list.tag_key()
        )));
    };
    current.remove(position);
    store(item, list, current);
    Ok(ItemOutcome::Applied)
}

fn clear(ctx: &mut ExecuteContext<'_>, item: &mut ItemStack) -> Result<ItemOutcome, CommandError> {
    let list = ctx.usage_list()?;
    if let Some(reason) = list.reject(item) {
        return Ok(ItemOutcome::Skipped(reason));
    }
    store(item, list, Vec::new());
    Ok(ItemOutcome::Applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmdplus_core::{ItemType, ToolMaterial, ToolType};

    #[test]
    fn place_on_requires_block_items() {
        let pick = ItemStack::new(ItemType::Tool(ToolType::Pickaxe, ToolMaterial::Stone), 1);
        let dirt = ItemStack::new(ItemType::Block(2), 1);
        assert!(UsageList::CanPlaceOn.reject(&pick).is_some());
        assert!(UsageList::CanPlaceOn.reject(&dirt).is_none());
        assert!(UsageList::CanDestroy.reject(&pick).is_none());
    }

    #[test]
    fn emptied_list_is_removed() {
        let mut pick = ItemStack::new(ItemType::Tool(ToolType::Pickaxe, ToolMaterial::Stone), 1);
        store(&mut pick, UsageList::CanDestroy, vec!["minecraft:stone".into()]);
        assert_eq!(entries(&pick, UsageList::CanDestroy), vec!["minecraft:stone"]);
        store(&mut pick, UsageList::CanDestroy, Vec::new());
        assert_eq!(pick.tag, None);
    }
}
