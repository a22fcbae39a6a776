//! Game-object layer: block containers, entities and their item storage.

mod block;
mod block_entity;
mod entity;
mod inventory;
mod world;

pub use block::*;
pub use block_entity::*;
pub use entity::*;
pub use inventory::*;
pub use world::*;
