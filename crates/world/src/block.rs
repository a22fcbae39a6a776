//! Block identifiers, names and positions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric block identifier.
pub type BlockId = u16;

/// Well-known block IDs.
pub mod blocks {
    use super::BlockId;

    pub const AIR: BlockId = 0;
    pub const STONE: BlockId = 1;
    pub const DIRT: BlockId = 2;
    pub const GRASS: BlockId = 3;
    pub const SAND: BlockId = 4;
    pub const GRAVEL: BlockId = 5;
    pub const ICE: BlockId = 7;
    pub const SNOW: BlockId = 8;
    pub const CLAY: BlockId = 9;
    pub const BEDROCK: BlockId = 10;

    // Ore block IDs
    pub const COAL_ORE: BlockId = 14;
    pub const IRON_ORE: BlockId = 15;
    pub const GOLD_ORE: BlockId = 16;
    pub const DIAMOND_ORE: BlockId = 17;

    pub const GLASS: BlockId = 25;
    pub const LADDER: BlockId = 30;
    pub const OAK_FENCE: BlockId = 31;
    pub const CHEST: BlockId = 68;
    pub const TORCH: BlockId = 70;
    pub const HOPPER: BlockId = 71;
    pub const DISPENSER: BlockId = 72;
    pub const OAK_SIGN: BlockId = 73;
}

const BLOCK_NAMES: &[(BlockId, &str)] = &[
    (blocks::AIR, "air"),
    (blocks::STONE, "stone"),
    (blocks::DIRT, "dirt"),
    (blocks::GRASS, "grass_block"),
    (blocks::SAND, "sand"),
    (blocks::GRAVEL, "gravel"),
    (blocks::ICE, "ice"),
    (blocks::SNOW, "snow_block"),
    (blocks::CLAY, "clay"),
    (blocks::BEDROCK, "bedrock"),
    (blocks::COAL_ORE, "coal_ore"),
    (blocks::IRON_ORE, "iron_ore"),
    (blocks::GOLD_ORE, "gold_ore"),
    (blocks::DIAMOND_ORE, "diamond_ore"),
    (blocks::GLASS, "glass"),
    (blocks::LADDER, "ladder"),
    (blocks::OAK_FENCE, "oak_fence"),
    (blocks::CHEST, "chest"),
    (blocks::TORCH, "torch"),
    (blocks::HOPPER, "hopper"),
    (blocks::DISPENSER, "dispenser"),
    (blocks::OAK_SIGN, "oak_sign"),
];

/// Block ID for a registry path.
pub fn block_id(name: &str) -> Option<BlockId> {
    BLOCK_NAMES
        .iter()
        .find(|(_, block)| *block == name)
        .map(|(id, _)| *id)
}

/// Integer block coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Block containing a world-space point.
    pub fn containing(position: [f64; 3]) -> Self {
        Self::new(
            position[0].floor() as i32,
            position[1].floor() as i32,
            position[2].floor() as i32,
        )
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.x, self.y, self.z)
    }
}
