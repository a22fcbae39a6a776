//! Property tests for `modifyitem` batch semantics.

use cmdplus_commands::{CommandDispatcher, CommandOutput, CommandSource};
use cmdplus_core::{EnchantmentType, ItemStack, ToolType};
use cmdplus_testkit::{block, worn_tool};
use cmdplus_world::{BlockEntity, BlockPos, ChestState, World, CHEST_SLOT_COUNT};
use proptest::prelude::*;

const POS: BlockPos = BlockPos { x: 0, y: 0, z: 0 };

fn chest_world(slots: Vec<Option<ItemStack>>) -> World {
    let mut chest = ChestState::default();
    for (target, item) in chest.slots.iter_mut().zip(slots) {
        *target = item;
    }
    let mut world = World::new();
    world.set_block_entity(POS, BlockEntity::Chest(chest));
    world
}

fn run(world: &mut World, command: &str) -> CommandOutput {
    CommandDispatcher::with_builtin_commands().execute(
        command,
        world,
        &CommandSource::console([0.0; 3]),
    )
}

fn slot(world: &World, index: usize) -> Option<ItemStack> {
    world
        .block_entity(POS)
        .and_then(|b| b.slots())
        .and_then(|slots| slots[index].clone())
}

/// A chest slot: empty, a tool, or a stack of dirt.
fn slot_strategy() -> impl Strategy<Value = Option<ItemStack>> {
    prop_oneof![
        Just(None),
        (0u32..100).prop_map(|damage| Some(worn_tool(ToolType::Shovel, damage, 1000))),
        (1u32..64).prop_map(|count| Some(block(2, count))),
    ]
}

proptest! {
    /// Property: damage add then restore by the same amount is a no-op
    #[test]
    fn damage_add_restore_roundtrip(start in 0u32..500, amount in 0i32..500) {
        let mut world = chest_world(vec![Some(worn_tool(ToolType::Pickaxe, start, 1000))]);
        let before = slot(&world, 0);

        let added = run(&mut world, &format!("modifyitem block 0 0 0 slot 0 damage add {amount}"));
        prop_assert_eq!(added.result, 1);
        let restored = run(&mut world, &format!("modifyitem block 0 0 0 slot 0 damage restore {amount}"));
        prop_assert_eq!(restored.result, 1);

        prop_assert_eq!(slot(&world, 0), before);
    }

    /// Property: restoring more than the current damage lands on zero
    #[test]
    fn damage_restore_clamps(start in 0u32..100, extra in 1i32..100) {
        let mut world = chest_world(vec![Some(worn_tool(ToolType::Pickaxe, start, 1000))]);
        let amount = i64::from(start) + i64::from(extra);
        run(&mut world, &format!("modifyitem block 0 0 0 slot 0 damage restore {amount}"));
        prop_assert_eq!(slot(&world, 0).map(|item| item.damage), Some(0));
    }

    /// Property: enchantment add then remove with the same rank restores the level
    #[test]
    fn enchantment_add_remove_roundtrip(start in 1u8..100, rank in 1i32..100) {
        let mut pick = worn_tool(ToolType::Pickaxe, 0, 1000);
        pick.set_enchantment_level(EnchantmentType::Efficiency, start);
        let mut world = chest_world(vec![Some(pick)]);

        run(&mut world, &format!("modifyitem block 0 0 0 slot 0 enchantment add efficiency {rank}"));
        run(&mut world, &format!("modifyitem block 0 0 0 slot 0 enchantment remove efficiency {rank}"));

        let level = slot(&world, 0).map(|item| item.enchantment_level(EnchantmentType::Efficiency));
        prop_assert_eq!(level, Some(start));
    }

    /// Property: applying the same damage set twice changes nothing the second time
    #[test]
    fn damage_set_is_idempotent(contents in prop::collection::vec(slot_strategy(), 0..CHEST_SLOT_COUNT), amount in 0i32..1000) {
        let mut world = chest_world(contents);
        let command = format!("modifyitem block 0 0 0 item tool damage set {amount}");
        run(&mut world, &command);
        let once = world.clone();
        run(&mut world, &command);
        prop_assert_eq!(world, once);
    }

    /// Property: a count cap selects the first matches in ascending slot order
    #[test]
    fn count_selects_first_matches(contents in prop::collection::vec(slot_strategy(), 0..CHEST_SLOT_COUNT), cap in 0usize..10) {
        let mut world = chest_world(contents.clone());
        let output = run(&mut world, &format!("modifyitem block 0 0 0 item tool {cap} tag merge {{\"seen\":true}}"));

        let tools: Vec<usize> = contents
            .iter()
            .enumerate()
            .filter(|(_, item)| item.as_ref().is_some_and(|stack| stack.is_damageable()))
            .map(|(index, _)| index)
            .collect();
        let expected = tools.len().min(cap);
        prop_assert_eq!(output.result as usize, expected);

        for (rank, index) in tools.iter().enumerate() {
            let tagged = slot(&world, *index).and_then(|item| item.tag).is_some();
            prop_assert_eq!(tagged, rank < cap);
        }
    }

    /// Property: only non-empty slots are counted
    #[test]
    fn empty_slots_are_never_counted(contents in prop::collection::vec(slot_strategy(), 0..CHEST_SLOT_COUNT)) {
        let occupied = contents.iter().filter(|item| item.is_some()).count();
        let mut world = chest_world(contents);
        let output = run(&mut world, "modifyitem block 0 0 0 item * tag merge {\"seen\":true}");
        prop_assert_eq!(output.result as usize, occupied);
        prop_assert_eq!(output.has_errors(), occupied == 0);
    }
}
