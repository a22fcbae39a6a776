//! `lore add|set|remove|clear`.
//!
//! Lore lines are stored under `display.Lore` as JSON text components
//! (`{"text":"..."}`), one string per line.

use cmdplus_core::{ItemStack, Tag};

use crate::action::{item_count, ActionKind, ActionType, Fragment, ItemOutcome, Mode, ModeSpec};
use crate::arguments::{ArgumentKind, ParsedArguments};
use crate::context::ExecuteContext;
use crate::error::CommandError;
use crate::key::ArgumentKey;

const DISPLAY: &str = "display";
const LORE_KEY: &str = "Lore";

/// Index meaning "after the last line".
pub const APPEND: i32 = -1;

pub static TEXT: ArgumentKey<String> =
    ArgumentKey::make("text", ArgumentKind::Text, ParsedArguments::text);
pub static INDEX: ArgumentKey<i32> = ArgumentKey::make(
    "index",
    ArgumentKind::Integer {
        min: APPEND,
        max: i32::MAX,
    },
    ParsedArguments::integer,
);

static MODES: [ModeSpec; 4] = [
    ModeSpec {
        mode: Mode::Add,
        arguments: &[Fragment::required(&TEXT), Fragment::optional(&INDEX)],
        validate: None,
        modify: add,
        success: |ctx, count| {
            let text = ctx.get(&TEXT)?;
            Ok(match ctx.get_or(&INDEX, APPEND)? {
                APPEND => format!("Added lore line \"{text}\" to {}", item_count(count)),
                index => format!(
                    "Inserted lore line \"{text}\" at {index} on {}",
                    item_count(count)
                ),
            })
        },
    },
    ModeSpec {
        mode: Mode::Set,
        arguments: &[Fragment::required(&INDEX), Fragment::required(&TEXT)],
        validate: Some(non_negative_index),
        modify: set,
        success: |ctx, count| {
            Ok(format!(
                "Set lore line {} to \"{}\" on {}",
                ctx.get(&INDEX)?,
                ctx.get(&TEXT)?,
                item_count(count)
            ))
        },
    },
    ModeSpec {
        mode: Mode::Remove,
        arguments: &[Fragment::required(&INDEX)],
        validate: Some(non_negative_index),
        modify: remove,
        success: |ctx, count| {
            Ok(format!(
                "Removed lore line {} from {}",
                ctx.get(&INDEX)?,
                item_count(count)
            ))
        },
    },
    ModeSpec {
        mode: Mode::Clear,
        arguments: &[],
        validate: None,
        modify: clear,
        success: |_, count| Ok(format!("Cleared the lore of {}", item_count(count))),
    },
];

pub static LORE: ActionType = ActionType {
    kind: ActionKind::Lore,
    name: "lore",
    modes: &MODES,
};

fn non_negative_index(ctx: &mut ExecuteContext<'_>) -> Result<(), CommandError> {
    let index = ctx.get(&INDEX)?;
    if index < 0 {
        return Err(CommandError::validation(format!(
            "Lore index must not be negative, found {index}"
        )));
    }
    Ok(())
}

/// Plain text of every lore line on `item`.
pub fn lines(item: &ItemStack) -> Vec<String> {
    raw_lines(item).iter().map(|line| plain_text(line)).collect()
}

fn raw_lines(item: &ItemStack) -> Vec<String> {
    item.sub_tag(DISPLAY)
        .map(|display| display.string_list(LORE_KEY))
        .unwrap_or_default()
}

fn store(item: &mut ItemStack, lines: Vec<String>) {
    let tag = item.tag_mut();
    let mut display = tag.compound(DISPLAY).cloned().unwrap_or_default();
    if lines.is_empty() {
        display.remove(LORE_KEY);
    } else {
        display.put_string_list(LORE_KEY, lines);
    }
    if display.is_empty() {
        tag.remove(DISPLAY);
    } else {
        tag.insert(DISPLAY, Tag::Compound(display));
    }
    item.prune_tag();
}

fn text_component(text: &str) -> String {
    serde_json::json!({ "text": text }).to_string()
}

fn plain_text(line: &str) -> String {
    serde_json::from_str::<serde_json::Value>(line)
        .ok()
        .and_then(|value| value.get("text").and_then(|t| t.as_str()).map(str::to_string))
        .unwrap_or_else(|| line.to_string())
}

fn out_of_bounds(item: &ItemStack, index: i32, len: usize) -> ItemOutcome {
    ItemOutcome::Skipped(format!(
        "Lore index {index} is out of bounds for {} ({len} lines)",
        item.display_name()
    ))
}

/// Position of `index` in a list of `len` lines, if it names an existing line.
fn existing(index: i32, len: usize) -> Option<usize> {
    usize::try_from(index).ok().filter(|&i| i < len)
}

fn add(ctx: &mut ExecuteContext<'_>, item: &mut ItemStack) -> Result<ItemOutcome, CommandError> {
    let text = ctx.get(&TEXT)?;
    let index = ctx.get_or(&INDEX, APPEND)?;
    let mut lines = raw_lines(item);
    if index == APPEND {
        lines.push(text_component(&text));
    } else {
        let Some(position) = existing(index, lines.len()) else {
            return Ok(out_of_bounds(item, index, lines.len()));
        };
        lines.insert(position, text_component(&text));
    }
    store(item, lines);
    Ok(ItemOutcome::Applied)
}

fn set(ctx: &mut ExecuteContext<'_>, item: &mut ItemStack) -> Result<ItemOutcome, CommandError> {
    let index = ctx.get(&INDEX)?;
    let text = ctx.get(&TEXT)?;
    let mut lines = raw_lines(item);
    let Some(position) = existing(index, lines.len()) else {
        return Ok(out_of_bounds(item, index, lines.len()));
    };
    lines[position] = text_component(&text);
    store(item, lines);
    Ok(ItemOutcome::Applied)
}

fn remove(
    ctx: &mut ExecuteContext<'_>,
    item: &mut ItemStack,
) -> Result<ItemOutcome, CommandError> {
    let index = ctx.get(&INDEX)?;
    let mut lines = raw_lines(item);
    let Some(position) = existing(index, lines.len()) else {
        return Ok(out_of_bounds(item, index, lines.len()));
    };
    lines.remove(position);
    store(item, lines);
    Ok(ItemOutcome::Applied)
}

fn clear(_: &mut ExecuteContext<'_>, item: &mut ItemStack) -> Result<ItemOutcome, CommandError> {
    store(item, Vec::new());
    Ok(ItemOutcome::Applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmdplus_core::{ItemType, TagCompound};

    #[test]
    fn lines_roundtrip_through_text_components() {
        let mut item = ItemStack::new(ItemType::Item(1), 1);
        store(&mut item, vec![text_component("Sharp \"edge\""), text_component("old")]);
        assert_eq!(lines(&item), vec!["Sharp \"edge\"", "old"]);
        assert_eq!(raw_lines(&item)[1], r#"{"text":"old"}"#);
    }

    #[test]
    fn emptied_lore_prunes_display_and_tag() {
        let mut item = ItemStack::new(ItemType::Item(1), 1);
        store(&mut item, vec![text_component("x")]);
        store(&mut item, Vec::new());
        assert_eq!(item.tag, None);

        let mut named = ItemStack::new(ItemType::Item(1), 1)
            .with_tag(TagCompound::from_json_str(r#"{"display":{"Name":"n"}}"#).unwrap());
        store(&mut named, vec![text_component("x")]);
        store(&mut named, Vec::new());
        assert_eq!(
            named.tag,
            Some(TagCompound::from_json_str(r#"{"display":{"Name":"n"}}"#).unwrap())
        );
    }

    #[test]
    fn plain_strings_read_as_themselves() {
        assert_eq!(plain_text("not json"), "not json");
        assert_eq!(plain_text(r#"{"text":"a"}"#), "a");
    }

    #[test]
    fn index_bounds() {
        assert_eq!(existing(0, 0), None);
        assert_eq!(existing(1, 2), Some(1));
        assert_eq!(existing(2, 2), None);
        assert_eq!(existing(-1, 2), None);
    }
}
