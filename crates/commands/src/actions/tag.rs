//! `tag merge|set <data>` and `tag clear`: the raw tag payload.

use cmdplus_core::{ItemStack, TagCompound};

use crate::action::{item_count, ActionKind, ActionType, Fragment, ItemOutcome, Mode, ModeSpec};
use crate::arguments::{ArgumentKind, ParsedArguments};
use crate::context::ExecuteContext;
use crate::error::CommandError;
use crate::key::ArgumentKey;

pub static DATA: ArgumentKey<TagCompound> =
    ArgumentKey::make("data", ArgumentKind::TagCompound, ParsedArguments::tag);

static MODES: [ModeSpec; 3] = [
    ModeSpec {
        mode: Mode::Merge,
        arguments: &[Fragment::required(&DATA)],
        validate: None,
        modify: merge,
        success: |ctx, count| {
            Ok(format!(
                "Merged {} into the tag of {}",
                ctx.get(&DATA)?,
                item_count(count)
            ))
        },
    },
    ModeSpec {
        mode: Mode::Set,
        arguments: &[Fragment::required(&DATA)],
        validate: None,
        modify: set,
        success: |ctx, count| {
            Ok(format!(
                "Replaced the tag of {} with {}",
                item_count(count),
                ctx.get(&DATA)?
            ))
        },
    },
    ModeSpec {
        mode: Mode::Clear,
        arguments: &[],
        validate: None,
        modify: clear,
        success: |_, count| Ok(format!("Cleared the tag of {}", item_count(count))),
    },
];

pub static TAG: ActionType = ActionType {
    kind: ActionKind::Tag,
    name: "tag",
    modes: &MODES,
};

fn merge(ctx: &mut ExecuteContext<'_>, item: &mut ItemStack) -> Result<ItemOutcome, CommandError> {
    let patch = ctx.get(&DATA)?;
    item.tag_mut().merge(&patch);
    item.prune_tag();
    Ok(ItemOutcome::Applied)
}

fn set(ctx: &mut ExecuteContext<'_>, item: &mut ItemStack) -> Result<ItemOutcome, CommandError> {
    item.tag = Some(ctx.get(&DATA)?);
    item.prune_tag();
    Ok(ItemOutcome::Applied)
}

fn clear(_: &mut ExecuteContext<'_>, item: &mut ItemStack) -> Result<ItemOutcome, CommandError> {
    item.tag = None;
    Ok(ItemOutcome::Applied)
}
