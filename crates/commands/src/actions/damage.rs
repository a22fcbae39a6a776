//! `damage add|restore|set <amount>`: the item's damage counter.

use cmdplus_core::ItemStack;

use crate::action::{item_count, ActionKind, ActionType, Fragment, ItemOutcome, Mode, ModeSpec};
use crate::arguments::{ArgumentKind, ParsedArguments};
use crate::context::ExecuteContext;
use crate::error::CommandError;
use crate::key::ArgumentKey;

pub static AMOUNT: ArgumentKey<i32> = ArgumentKey::make(
    "amount",
    ArgumentKind::Integer {
        min: 0,
        max: i32::MAX,
    },
    ParsedArguments::integer,
);

static MODES: [ModeSpec; 3] = [
    ModeSpec {
        mode: Mode::Add,
        arguments: &[Fragment::required(&AMOUNT)],
        validate: None,
        modify: add,
        success: |ctx, count| {
            Ok(format!(
                "Damaged {} by {}",
                item_count(count),
                ctx.get(&AMOUNT)?
            ))
        },
    },
    ModeSpec {
        mode: Mode::Restore,
        arguments: &[Fragment::required(&AMOUNT)],
        validate: None,
        modify: restore,
        success: |ctx, count| {
            Ok(format!(
                "Restored {} durability on {}",
                ctx.get(&AMOUNT)?,
                item_count(count)
            ))
        },
    },
    ModeSpec {
        mode: Mode::Set,
        arguments: &[Fragment::required(&AMOUNT)],
        validate: None,
        modify: set,
        success: |ctx, count| {
            Ok(format!(
                "Set the damage of {} to {}",
                item_count(count),
                ctx.get(&AMOUNT)?
            ))
        },
    },
];

pub static DAMAGE: ActionType = ActionType {
    kind: ActionKind::Damage,
    name: "damage",
    modes: &MODES,
};

fn add(ctx: &mut ExecuteContext<'_>, item: &mut ItemStack) -> Result<ItemOutcome, CommandError> {
    let amount = ctx.get(&AMOUNT)?;
    Ok(apply(item, i64::from(item.damage) + i64::from(amount)))
}

fn restore(
    ctx: &mut ExecuteContext<'_>,
    item: &mut ItemStack,
) -> Result<ItemOutcome, CommandError> {
    let amount = ctx.get(&AMOUNT)?;
    Ok(apply(item, i64::from(item.damage) - i64::from(amount)))
}

fn set(ctx: &mut ExecuteContext<'_>, item: &mut ItemStack) -> Result<ItemOutcome, CommandError> {
    let amount = ctx.get(&AMOUNT)?;
    Ok(apply(item, i64::from(amount)))
}

/// Clamp at zero; past the maximum the item breaks.
fn apply(item: &mut ItemStack, damage: i64) -> ItemOutcome {
    let Some(max) = item.max_damage() else {
        return ItemOutcome::Skipped(format!("{} cannot be damaged", item.display_name()));
    };
    match u32::try_from(damage.max(0)) {
        Ok(damage) if damage <= max => {
            item.damage = damage;
            ItemOutcome::Applied
        }
        _ => ItemOutcome::Removed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmdplus_core::{ItemType, ToolMaterial, ToolType};

    fn sword(damage: u32) -> ItemStack {
        ItemStack::new(ItemType::Tool(ToolType::Sword, ToolMaterial::Iron), 1).with_damage(damage)
    }

    #[test]
    fn clamps_at_zero() {
        let mut item = sword(3);
        assert_eq!(apply(&mut item, -7), ItemOutcome::Applied);
        assert_eq!(item.damage, 0);
    }

    #[test]
    fn breaks_past_maximum() {
        let mut item = sword(0).with_max_damage(50);
        assert_eq!(apply(&mut item, 50), ItemOutcome::Applied);
        assert_eq!(apply(&mut item, 51), ItemOutcome::Removed);
        assert_eq!(item.damage, 50);
    }

    #[test]
    fn undamageable_items_are_skipped() {
        let mut dirt = ItemStack::new(ItemType::Block(2), 64);
        assert!(matches!(apply(&mut dirt, 1), ItemOutcome::Skipped(reason) if reason.contains("cannot be damaged")));
        assert_eq!(dirt.damage, 0);
    }
}
