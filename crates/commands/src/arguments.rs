//! Typed argument parsers and the values they produce.

use std::collections::BTreeMap;

use cmdplus_core::{EnchantmentType, RegistryKey, TagCompound};
use cmdplus_world::{block_id, BlockPos};

use crate::error::CommandError;
use crate::predicate::ItemPredicate;
use crate::reader::StringReader;
use crate::slots;
use crate::target::EntitySelector;

/// Parser attached to an argument node of the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentKind {
    /// Bounded 32-bit integer.
    Integer { min: i32, max: i32 },
    /// Quoted string or single word.
    Text,
    /// Three block coordinates, each absolute or `~`-relative.
    BlockPos,
    /// Entity selector or player name.
    Entities,
    /// Slot name or raw slot id.
    ItemSlot,
    /// Item predicate with an optional tag filter.
    ItemPredicate,
    /// Enchantment key.
    Enchantment,
    /// JSON object literal.
    TagCompound,
    /// Registry key of a known block.
    Block,
}

/// A block coordinate as written by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockCoordArg {
    Absolute(i32),
    Relative(i32),
}

impl BlockCoordArg {
    pub fn resolve(self, base: i32) -> i32 {
        match self {
            Self::Absolute(v) => v,
            Self::Relative(delta) => base.saturating_add(delta),
        }
    }
}

/// Block position argument, resolved against the command source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockPosArg {
    pub x: BlockCoordArg,
    pub y: BlockCoordArg,
    pub z: BlockCoordArg,
}

impl BlockPosArg {
    pub fn resolve(self, origin: BlockPos) -> BlockPos {
        BlockPos::new(
            self.x.resolve(origin.x),
            self.y.resolve(origin.y),
            self.z.resolve(origin.z),
        )
    }
}

/// Parsed value of one argument node.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentValue {
    Integer(i32),
    Text(String),
    BlockPos(BlockPosArg),
    Entities(EntitySelector),
    Slot(u32),
    Predicate(ItemPredicate),
    Enchantment(EnchantmentType),
    Tag(TagCompound),
    Block(RegistryKey),
}

impl ArgumentKind {
    /// Placeholder shown in usage listings.
    pub fn placeholder(self, name: &str) -> String {
        match self {
            ArgumentKind::BlockPos => format!("<{name}: x y z>"),
            _ => format!("<{name}>"),
        }
    }

    /// Consume this argument from `reader`.
    pub fn parse(self, reader: &mut StringReader<'_>) -> Result<ArgumentValue, CommandError> {
        match self {
            ArgumentKind::Integer { min, max } => {
                let start = reader.cursor();
                let value = reader.read_int()?;
                if value < min {
                    return Err(CommandError::parse(
                        format!("Integer must not be less than {min}, found {value}"),
                        start,
                    ));
                }
                if value > max {
                    return Err(CommandError::parse(
                        format!("Integer must not be more than {max}, found {value}"),
                        start,
                    ));
                }
                Ok(ArgumentValue::Integer(value))
            }
            ArgumentKind::Text => reader.read_string().map(ArgumentValue::Text),
            ArgumentKind::BlockPos => {
                let x = parse_block_coord(reader)?;
                expect_separator(reader)?;
                let y = parse_block_coord(reader)?;
                expect_separator(reader)?;
                let z = parse_block_coord(reader)?;
                Ok(ArgumentValue::BlockPos(BlockPosArg { x, y, z }))
            }
            ArgumentKind::Entities => EntitySelector::parse(reader).map(ArgumentValue::Entities),
            ArgumentKind::ItemSlot => {
                let start = reader.cursor();
                let token = reader.read_unquoted();
                slots::parse_slot(token).map(ArgumentValue::Slot).ok_or_else(|| {
                    CommandError::parse(format!("Unknown slot '{token}'"), start)
                })
            }
            ArgumentKind::ItemPredicate => {
                ItemPredicate::parse(reader).map(ArgumentValue::Predicate)
            }
            ArgumentKind::Enchantment => {
                let start = reader.cursor();
                let token = reader.read_unquoted();
                RegistryKey::parse(token)
                    .ok()
                    .and_then(|key| key.vanilla_path().and_then(EnchantmentType::from_key))
                    .map(ArgumentValue::Enchantment)
                    .ok_or_else(|| {
                        CommandError::parse(format!("Unknown enchantment '{token}'"), start)
                    })
            }
            ArgumentKind::TagCompound => {
                let start = reader.cursor();
                let raw = reader.read_braced()?;
                TagCompound::from_json_str(raw)
                    .map(ArgumentValue::Tag)
                    .map_err(|err| CommandError::parse(err.to_string(), start))
            }
            ArgumentKind::Block => {
                let start = reader.cursor();
                let token = reader.read_unquoted();
                let key = RegistryKey::parse(token)
                    .map_err(|err| CommandError::parse(err.to_string(), start))?;
                match key.vanilla_path().and_then(block_id) {
                    Some(_) => Ok(ArgumentValue::Block(key)),
                    None => Err(CommandError::parse(format!("Unknown block '{key}'"), start)),
                }
            }
        }
    }
}

fn expect_separator(reader: &mut StringReader<'_>) -> Result<(), CommandError> {
    if reader.peek() != Some(' ') {
        return Err(reader.error("Incomplete position (expected 3 coordinates)"));
    }
    reader.skip();
    Ok(())
}

fn parse_block_coord(reader: &mut StringReader<'_>) -> Result<BlockCoordArg, CommandError> {
    let start = reader.cursor();
    let token = reader.read_unquoted();
    if token.is_empty() {
        return Err(reader.error("Expected block coordinate"));
    }
    let invalid = |what: &str| CommandError::parse(format!("Invalid {what}: {token}"), start);
    if let Some(rest) = token.strip_prefix('~') {
        if rest.is_empty() {
            return Ok(BlockCoordArg::Relative(0));
        }
        let delta = rest
            .parse::<i32>()
            .map_err(|_| invalid("relative block coordinate"))?;
        return Ok(BlockCoordArg::Relative(delta));
    }
    let value = token
        .parse::<i32>()
        .map_err(|_| invalid("block coordinate"))?;
    Ok(BlockCoordArg::Absolute(value))
}

/// Argument values collected while walking the grammar, by node name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedArguments {
    values: BTreeMap<String, ArgumentValue>,
}

macro_rules! typed_getter {
    ($(#[$doc:meta])* $fn_name:ident, $variant:ident, $ty:ty) => {
        $(#[$doc])*
        pub fn $fn_name(&self, name: &str) -> Result<$ty, CommandError> {
            match self.lookup(name)? {
                ArgumentValue::$variant(value) => Ok(value.clone()),
                other => Err(CommandError::unexpected(format!(
                    "argument '{name}' holds {other:?}, not {}",
                    stringify!($variant)
                ))),
            }
        }
    };
}

impl ParsedArguments {
    pub fn insert(&mut self, name: impl Into<String>, value: ArgumentValue) {
        self.values.insert(name.into(), value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn lookup(&self, name: &str) -> Result<&ArgumentValue, CommandError> {
        self.values
            .get(name)
            .ok_or_else(|| CommandError::MissingArgument(name.to_string()))
    }

    typed_getter!(integer, Integer, i32);
    typed_getter!(text, Text, String);
    typed_getter!(block_pos, BlockPos, BlockPosArg);
    typed_getter!(entities, Entities, EntitySelector);
    typed_getter!(slot, Slot, u32);
    typed_getter!(predicate, Predicate, ItemPredicate);
    typed_getter!(enchantment, Enchantment, EnchantmentType);
    typed_getter!(tag, Tag, TagCompound);
    typed_getter!(block, Block, RegistryKey);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(kind: ArgumentKind, input: &str) -> Result<ArgumentValue, CommandError> {
        kind.parse(&mut StringReader::new(input))
    }

    #[test]
    fn integer_bounds_are_enforced() {
        let kind = ArgumentKind::Integer { min: -1, max: 10 };
        assert_eq!(parse(kind, "-1"), Ok(ArgumentValue::Integer(-1)));
        assert!(parse(kind, "-2").is_err());
        assert!(parse(kind, "11").is_err());
        assert!(parse(kind, "ten").is_err());
    }

    #[test]
    fn block_pos_supports_relative_coords() {
        let value = parse(ArgumentKind::BlockPos, "~1 64 ~-2").unwrap();
        let ArgumentValue::BlockPos(pos) = value else {
            panic!("expected block pos, got {value:?}");
        };
        assert_eq!(
            pos.resolve(BlockPos::new(10, 60, 10)),
            BlockPos::new(11, 64, 8)
        );
        assert!(parse(ArgumentKind::BlockPos, "1 2").is_err());
    }

    #[test]
    fn enchantments_accept_namespaced_keys() {
        assert_eq!(
            parse(ArgumentKind::Enchantment, "minecraft:fire_aspect"),
            Ok(ArgumentValue::Enchantment(EnchantmentType::FireAspect))
        );
        assert_eq!(
            parse(ArgumentKind::Enchantment, "sharpness"),
            Ok(ArgumentValue::Enchantment(EnchantmentType::Sharpness))
        );
        assert!(parse(ArgumentKind::Enchantment, "other:sharpness").is_err());
    }

    #[test]
    fn blocks_must_be_known() {
        assert_eq!(
            parse(ArgumentKind::Block, "stone"),
            Ok(ArgumentValue::Block(RegistryKey::vanilla("stone")))
        );
        assert!(parse(ArgumentKind::Block, "minecraft:unobtainium").is_err());
    }

    #[test]
    fn tag_argument_reports_float_rejection() {
        let err = parse(ArgumentKind::TagCompound, r#"{"x":1.5}"#).unwrap_err();
        assert!(err.to_string().contains("float"));
    }

    #[test]
    fn typed_getters_report_missing_and_mismatched() {
        let mut args = ParsedArguments::default();
        args.insert("amount", ArgumentValue::Integer(4));
        assert_eq!(args.integer("amount"), Ok(4));
        assert_eq!(
            args.integer("rank"),
            Err(CommandError::MissingArgument("rank".into()))
        );
        assert_eq!(args.text("amount").unwrap_err().kind(), "unexpected");
    }
}
