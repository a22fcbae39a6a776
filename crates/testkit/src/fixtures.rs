//! Small, fully populated worlds for tests and the console demo.

use cmdplus_core::{
    ArmorMaterial, ArmorSlot, EnchantmentType, FoodType, ItemStack, ItemType, TagCompound,
    ToolMaterial, ToolType,
};
use cmdplus_world::{
    blocks, BlockEntity, BlockPos, ChestState, EntityData, EntityId, EntityType, HopperState,
    SignState, World,
};

/// Chest holding a mix of tools, blocks and food.
pub const CHEST_POS: BlockPos = BlockPos { x: 0, y: 64, z: 0 };
/// Hopper with a single damaged sword.
pub const HOPPER_POS: BlockPos = BlockPos { x: 2, y: 64, z: 0 };
/// Sign: a block entity without storage.
pub const SIGN_POS: BlockPos = BlockPos { x: 4, y: 64, z: 0 };
/// Position with no block entity at all.
pub const EMPTY_POS: BlockPos = BlockPos { x: 6, y: 64, z: 0 };

/// Ids of the entities in [`demo_world`], in spawn order.
#[derive(Debug, Clone, Copy)]
pub struct DemoEntities {
    /// Player "Alex", closest to the origin.
    pub alex: EntityId,
    /// Player "Steve".
    pub steve: EntityId,
    /// Zombie holding a sword and wearing a helmet.
    pub zombie: EntityId,
    /// Villager with a partly filled trade inventory.
    pub villager: EntityId,
    /// Donkey with a chest attached.
    pub donkey: EntityId,
    /// Horse with saddle and armor.
    pub horse: EntityId,
    /// Minecart: an entity without slots.
    pub minecart: EntityId,
}

/// A tool of the given kind.
pub fn tool(tool_type: ToolType, material: ToolMaterial) -> ItemStack {
    ItemStack::new(ItemType::Tool(tool_type, material), 1)
}

/// A piece of armor.
pub fn armor(slot: ArmorSlot, material: ArmorMaterial) -> ItemStack {
    ItemStack::new(ItemType::Armor(slot, material), 1)
}

/// A stack of a placeable block.
pub fn block(id: u16, count: u32) -> ItemStack {
    ItemStack::new(ItemType::Block(id), count)
}

/// Tool with damage `damage` out of a durability of `max`.
pub fn worn_tool(tool_type: ToolType, damage: u32, max: u32) -> ItemStack {
    tool(tool_type, ToolMaterial::Iron)
        .with_max_damage(max)
        .with_damage(damage)
}

/// World with one chest, a hopper, a sign and a handful of entities.
///
/// Chest slots: 0 worn pickaxe (10/50), 1 diamond sword with Sharpness 2,
/// 2 stack of 32 stone, 4 bread, 5 iron shovel with a custom tag, 26 iron
/// helmet. Everything else is empty.
pub fn demo_world() -> (World, DemoEntities) {
    let mut world = World::new();

    let mut chest = ChestState::default();
    chest.slots[0] = Some(worn_tool(ToolType::Pickaxe, 10, 50));
    let mut sword = tool(ToolType::Sword, ToolMaterial::Diamond);
    sword.set_enchantment_level(EnchantmentType::Sharpness, 2);
    chest.slots[1] = Some(sword);
    chest.slots[2] = Some(block(blocks::STONE, 32));
    chest.slots[4] = Some(ItemStack::new(ItemType::Food(FoodType::Bread), 3));
    let tag = TagCompound::from_json_str(r#"{"owner":"alex"}"#).unwrap_or_default();
    chest.slots[5] = Some(tool(ToolType::Shovel, ToolMaterial::Iron).with_tag(tag));
    chest.slots[26] = Some(armor(ArmorSlot::Helmet, ArmorMaterial::Iron));
    world.set_block_entity(CHEST_POS, BlockEntity::Chest(chest));

    let mut hopper = HopperState::default();
    hopper.slots[0] = Some(tool(ToolType::Sword, ToolMaterial::Stone).with_damage(20));
    world.set_block_entity(HOPPER_POS, BlockEntity::Hopper(hopper));

    let mut sign = SignState::default();
    sign.lines[0] = "Storage".to_string();
    world.set_block_entity(SIGN_POS, BlockEntity::Sign(sign));

    let alex = world.spawn_player("Alex", [1.0, 64.0, 1.0]);
    if let Some(inventory) = world.entity_mut(alex).and_then(|e| e.inventory_mut()) {
        inventory.set(0, Some(tool(ToolType::Pickaxe, ToolMaterial::Diamond)));
        inventory.set(9, Some(block(blocks::DIRT, 64)));
        inventory.equip(ArmorSlot::Boots, armor(ArmorSlot::Boots, ArmorMaterial::Leather));
    }

    let steve = world.spawn_player("Steve", [20.0, 64.0, 0.0]);
    if let Some(inventory) = world.entity_mut(steve).and_then(|e| e.inventory_mut()) {
        inventory.set(0, Some(tool(ToolType::Axe, ToolMaterial::Stone)));
    }

    let zombie = world.spawn(EntityType::Zombie, [5.0, 64.0, 5.0]);
    if let Some(equipment) = world.entity_mut(zombie).and_then(|e| e.equipment_mut()) {
        equipment.main_hand = Some(tool(ToolType::Sword, ToolMaterial::Iron));
        equipment.equip(ArmorSlot::Helmet, armor(ArmorSlot::Helmet, ArmorMaterial::Gold));
    }

    let villager = world.spawn(EntityType::Villager, [8.0, 64.0, 0.0]);
    if let Some(entity) = world.entity_mut(villager) {
        if let EntityData::Trader { inventory, .. } = &mut entity.data {
            inventory[0] = Some(ItemStack::new(ItemType::Food(FoodType::Apple), 5));
            inventory[3] = Some(tool(ToolType::Hoe, ToolMaterial::Wood));
        }
    }

    let donkey = world.spawn(EntityType::Donkey, [12.0, 64.0, 0.0]);
    if let Some(entity) = world.entity_mut(donkey) {
        if let EntityData::Horse { tack, .. } = &mut entity.data {
            tack.has_chest = true;
            tack.chest[0] = Some(block(blocks::SAND, 16));
        }
    }

    let horse = world.spawn(EntityType::Horse, [14.0, 64.0, 0.0]);
    if let Some(entity) = world.entity_mut(horse) {
        if let EntityData::Horse { tack, .. } = &mut entity.data {
            tack.saddle = Some(ItemStack::new(ItemType::Item(SADDLE_ITEM), 1));
        }
    }

    let minecart = world.spawn(EntityType::Minecart, [16.0, 64.0, 0.0]);

    let ids = DemoEntities {
        alex,
        steve,
        zombie,
        villager,
        donkey,
        horse,
        minecart,
    };
    (world, ids)
}

/// Generic item id used for saddles in fixtures.
pub const SADDLE_ITEM: u16 = 329;
