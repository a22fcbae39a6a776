//! Action families: what a `modifyitem` invocation does to each item.

pub mod damage;
pub mod enchantment;
pub mod lore;
pub mod tag;
pub mod usage;
