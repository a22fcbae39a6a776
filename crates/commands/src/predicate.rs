//! Item predicates used by the matching slot finder.

use std::fmt;

use cmdplus_core::{ItemStack, ItemType, TagCompound};

use crate::error::CommandError;
use crate::reader::StringReader;

/// Broad item families accepted as predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemCategory {
    Tool,
    Armor,
    Block,
    Food,
}

impl ItemCategory {
    const ALL: [ItemCategory; 4] = [
        ItemCategory::Tool,
        ItemCategory::Armor,
        ItemCategory::Block,
        ItemCategory::Food,
    ];

    fn key(self) -> &'static str {
        match self {
            ItemCategory::Tool => "tool",
            ItemCategory::Armor => "armor",
            ItemCategory::Block => "block",
            ItemCategory::Food => "food",
        }
    }

    fn contains(self, item_type: ItemType) -> bool {
        matches!(
            (self, item_type),
            (ItemCategory::Tool, ItemType::Tool(..))
                | (ItemCategory::Armor, ItemType::Armor(..))
                | (ItemCategory::Block, ItemType::Block(_))
                | (ItemCategory::Food, ItemType::Food(_))
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemMatcher {
    Any,
    Category(ItemCategory),
    Exact(ItemType),
}

/// `*`, a category, or an item key, optionally followed by a JSON tag that
/// must be a subset of the item's tag.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemPredicate {
    matcher: ItemMatcher,
    tag: Option<TagCompound>,
}

impl ItemPredicate {
    /// Predicate matching every non-empty item.
    pub fn any() -> Self {
        Self {
            matcher: ItemMatcher::Any,
            tag: None,
        }
    }

    /// Predicate matching one item type.
    pub fn item(item_type: ItemType) -> Self {
        Self {
            matcher: ItemMatcher::Exact(item_type),
            tag: None,
        }
    }

    pub fn parse(reader: &mut StringReader<'_>) -> Result<Self, CommandError> {
        let start = reader.cursor();
        let token = reader.read_token_until(Some('{'));
        let path = token.strip_prefix("minecraft:").unwrap_or(token);
        let matcher = if path == "*" {
            ItemMatcher::Any
        } else if let Some(category) = ItemCategory::ALL.into_iter().find(|c| c.key() == path) {
            ItemMatcher::Category(category)
        } else {
            let item = path
                .parse::<ItemType>()
                .map_err(|err| CommandError::parse(err.to_string(), start))?;
            ItemMatcher::Exact(item)
        };

        let tag = if reader.peek() == Some('{') {
            let tag_start = reader.cursor();
            let raw = reader.read_braced()?;
            Some(
                TagCompound::from_json_str(raw)
                    .map_err(|err| CommandError::parse(err.to_string(), tag_start))?,
            )
        } else {
            None
        };
        Ok(Self { matcher, tag })
    }

    /// Empty stacks never match.
    pub fn test(&self, item: &ItemStack) -> bool {
        if item.is_empty() {
            return false;
        }
        let type_ok = match self.matcher {
            ItemMatcher::Any => true,
            ItemMatcher::Category(category) => category.contains(item.item_type),
            ItemMatcher::Exact(item_type) => item.item_type == item_type,
        };
        type_ok
            && self.tag.as_ref().map_or(true, |pattern| {
                pattern.is_empty() || item.tag.as_ref().is_some_and(|tag| tag.matches(pattern))
            })
    }
}

impl fmt::Display for ItemPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.matcher {
            ItemMatcher::Any => f.write_str("*")?,
            ItemMatcher::Category(category) => f.write_str(category.key())?,
            ItemMatcher::Exact(item_type) => write!(f, "{item_type}")?,
        }
        if let Some(tag) = &self.tag {
            write!(f, "{tag}")?;
        }
        Ok(())
    }
}
