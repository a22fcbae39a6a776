//! `enchantment add|set|remove|clear`.
//!
//! Levels are stored as `u8`, so 255 is the highest level any mode can
//! produce. Ranks must be positive wherever one is given.

use cmdplus_core::{EnchantmentType, ItemStack};

use crate::action::{item_count, ActionKind, ActionType, Fragment, ItemOutcome, Mode, ModeSpec};
use crate::arguments::{ArgumentKind, ParsedArguments};
use crate::context::ExecuteContext;
use crate::error::CommandError;
use crate::key::ArgumentKey;

pub const MAX_LEVEL: i32 = u8::MAX as i32;

pub static ENCHANTMENT: ArgumentKey<EnchantmentType> = ArgumentKey::make(
    "enchantment",
    ArgumentKind::Enchantment,
    ParsedArguments::enchantment,
);
pub static RANK: ArgumentKey<i32> = ArgumentKey::make(
    "rank",
    ArgumentKind::Integer {
        min: i32::MIN,
        max: MAX_LEVEL,
    },
    ParsedArguments::integer,
);

static MODES: [ModeSpec; 4] = [
    ModeSpec {
        mode: Mode::Add,
        arguments: &[Fragment::required(&ENCHANTMENT), Fragment::optional(&RANK)],
        validate: Some(positive_rank),
        modify: add,
        success: |ctx, count| {
            Ok(format!(
                "Added {} level(s) of {} to {}",
                ctx.get_or(&RANK, 1)?,
                ctx.get(&ENCHANTMENT)?,
                item_count(count)
            ))
        },
    },
    ModeSpec {
        mode: Mode::Set,
        arguments: &[Fragment::required(&ENCHANTMENT), Fragment::optional(&RANK)],
        validate: Some(positive_rank),
        modify: set,
        success: |ctx, count| {
            Ok(format!(
                "Set {} to level {} on {}",
                ctx.get(&ENCHANTMENT)?,
                ctx.get_or(&RANK, 1)?,
                item_count(count)
            ))
        },
    },
    ModeSpec {
        mode: Mode::Remove,
        arguments: &[Fragment::required(&ENCHANTMENT), Fragment::optional(&RANK)],
        validate: Some(positive_rank),
        modify: remove,
        success: |ctx, count| {
            let enchantment = ctx.get(&ENCHANTMENT)?;
            Ok(match ctx.find(&RANK)? {
                Some(rank) => format!(
                    "Removed {rank} level(s) of {enchantment} from {}",
                    item_count(count)
                ),
                None => format!("Removed {enchantment} from {}", item_count(count)),
            })
        },
    },
    ModeSpec {
        mode: Mode::Clear,
        arguments: &[],
        validate: None,
        modify: clear,
        success: |_, count| Ok(format!("Removed all enchantments from {}", item_count(count))),
    },
];

pub static ENCHANT: ActionType = ActionType {
    kind: ActionKind::Enchantment,
    name: "enchantment",
    modes: &MODES,
};

fn positive_rank(ctx: &mut ExecuteContext<'_>) -> Result<(), CommandError> {
    match ctx.find(&RANK)? {
        Some(rank) if rank <= 0 => Err(CommandError::validation(format!(
            "Enchantment rank must be positive, found {rank}"
        ))),
        _ => Ok(()),
    }
}

fn not_enchantable(item: &ItemStack) -> ItemOutcome {
    ItemOutcome::Skipped(format!("{} cannot be enchanted", item.display_name()))
}

fn store(item: &mut ItemStack, enchantment: EnchantmentType, level: i64) -> ItemOutcome {
    match u8::try_from(level) {
        Ok(level) => {
            item.set_enchantment_level(enchantment, level);
            ItemOutcome::Applied
        }
        Err(_) => ItemOutcome::Skipped(format!(
            "{enchantment} {level} on {} exceeds the maximum level of {MAX_LEVEL}",
            item.display_name()
        )),
    }
}

fn add(ctx: &mut ExecuteContext<'_>, item: &mut ItemStack) -> Result<ItemOutcome, CommandError> {
    let enchantment = ctx.get(&ENCHANTMENT)?;
    let rank = ctx.get_or(&RANK, 1)?;
    if !item.is_enchantable() {
        return Ok(not_enchantable(item));
    }
    let level = i64::from(item.enchantment_level(enchantment)) + i64::from(rank);
    Ok(store(item, enchantment, level))
}

fn set(ctx: &mut ExecuteContext<'_>, item: &mut ItemStack) -> Result<ItemOutcome, CommandError> {
    let enchantment = ctx.get(&ENCHANTMENT)?;
    let rank = ctx.get_or(&RANK, 1)?;
    if !item.is_enchantable() {
        return Ok(not_enchantable(item));
    }
    if i32::from(item.enchantment_level(enchantment)) == rank {
        return Ok(ItemOutcome::Skipped(format!(
            "{} already has {enchantment} at level {rank}",
            item.display_name()
        )));
    }
    Ok(store(item, enchantment, i64::from(rank)))
}

fn remove(
    ctx: &mut ExecuteContext<'_>,
    item: &mut ItemStack,
) -> Result<ItemOutcome, CommandError> {
    let enchantment = ctx.get(&ENCHANTMENT)?;
    let current = item.enchantment_level(enchantment);
    if current == 0 {
        return Ok(ItemOutcome::Skipped(format!(
            "{} does not have {enchantment}",
            item.display_name()
        )));
    }
    let level = match ctx.find(&RANK)? {
        Some(rank) => (i64::from(current) - i64::from(rank)).max(0),
        None => 0,
    };
    Ok(store(item, enchantment, level))
}

fn clear(_: &mut ExecuteContext<'_>, item: &mut ItemStack) -> Result<ItemOutcome, CommandError> {
    if !item.has_enchantments() {
        return Ok(ItemOutcome::Skipped(format!(
            "{} has no enchantments",
            item.display_name()
        )));
    }
    item.clear_enchantments();
    Ok(ItemOutcome::Applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmdplus_core::{ItemType, ToolMaterial, ToolType};

    fn pickaxe() -> ItemStack {
        ItemStack::new(ItemType::Tool(ToolType::Pickaxe, ToolMaterial::Diamond), 1)
    }

    #[test]
    fn store_rejects_levels_past_u8() {
        let mut item = pickaxe();
        assert_eq!(store(&mut item, EnchantmentType::Efficiency, 255), ItemOutcome::Applied);
        assert_eq!(item.enchantment_level(EnchantmentType::Efficiency), 255);
        assert!(matches!(
            store(&mut item, EnchantmentType::Efficiency, 256),
            ItemOutcome::Skipped(_)
        ));
        assert_eq!(item.enchantment_level(EnchantmentType::Efficiency), 255);
    }

    #[test]
    fn storing_zero_drops_the_entry() {
        let mut item = pickaxe();
        store(&mut item, EnchantmentType::Unbreaking, 2);
        store(&mut item, EnchantmentType::Unbreaking, 0);
        assert!(!item.has_enchantments());
    }
}
