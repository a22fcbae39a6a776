//! End-to-end `modifyitem` invocations against the demo world.

use cmdplus_commands::actions::{lore, usage};
use cmdplus_commands::{
    slots, CommandDispatcher, CommandHost, CommandOutput, CommandSource, INTERNAL_ERROR,
};
use cmdplus_core::{EnchantmentType, ItemStack, TagCompound, ToolType};
use cmdplus_testkit::{demo_world, DemoEntities, CHEST_POS};
use cmdplus_world::{BlockEntity, BlockPos, Entity, EntityData, EntityId, EntityType, World};

fn setup() -> (World, DemoEntities) {
    demo_world()
}

fn run(world: &mut World, command: &str) -> CommandOutput {
    CommandDispatcher::with_builtin_commands().execute(
        command,
        world,
        &CommandSource::console([0.0, 64.0, 0.0]),
    )
}

fn chest(world: &World, slot: usize) -> Option<ItemStack> {
    world
        .block_entity(CHEST_POS)
        .and_then(|block| block.slots())
        .and_then(|slots| slots[slot].clone())
}

fn entity_slot(world: &World, id: EntityId, slot: u32) -> Option<ItemStack> {
    world.entity(id).and_then(|entity| slots::get(entity, slot))
}

#[test]
fn damage_add_updates_one_slot() {
    let (mut world, _) = setup();
    let output = run(&mut world, "modifyitem block 0 64 0 slot 0 damage add 5");
    assert_eq!(output.lines, vec!["Damaged 1 item by 5"]);
    assert_eq!(output.result, 1);
    assert_eq!(chest(&world, 0).unwrap().damage, 15);
}

#[test]
fn damage_past_maximum_removes_the_item() {
    let (mut world, _) = setup();
    // 10 + 45 = 55 > 50
    let output = run(&mut world, "modifyitem block 0 64 0 slot 0 damage add 45");
    assert_eq!(output.result, 1);
    assert_eq!(output.lines, vec!["Damaged 1 item by 45"]);
    assert_eq!(chest(&world, 0), None);
}

#[test]
fn restore_clamps_at_zero() {
    let (mut world, _) = setup();
    let output = run(&mut world, "modifyitem block 0 64 0 slot 0 damage restore 100");
    assert_eq!(output.lines, vec!["Restored 100 durability on 1 item"]);
    assert_eq!(chest(&world, 0).unwrap().damage, 0);
}

#[test]
fn relative_coordinates_resolve_from_the_source() {
    let (mut world, _) = setup();
    let output = run(&mut world, "/modifyitem block ~ ~ ~ slot 0 damage set 7");
    assert_eq!(output.result, 1);
    assert_eq!(chest(&world, 0).unwrap().damage, 7);
}

#[test]
fn undamageable_item_is_reported_and_left_alone() {
    let (mut world, _) = setup();
    let before = chest(&world, 2);
    let output = run(&mut world, "modifyitem block 0 64 0 slot 2 damage add 1");
    assert_eq!(
        output.lines,
        vec![
            "Error: block:1 cannot be damaged",
            "Error: No items were modified"
        ]
    );
    assert_eq!(output.result, 0);
    assert_eq!(chest(&world, 2), before);
}

#[test]
fn empty_slot_is_not_counted() {
    let (mut world, _) = setup();
    let output = run(&mut world, "modifyitem block 0 64 0 slot 3 tag clear");
    assert_eq!(output.lines, vec!["Error: No items were modified"]);
    assert_eq!(chest(&world, 3), None);
}

#[test]
fn count_caps_matches_in_slot_order() {
    let (mut world, _) = setup();
    let output = run(&mut world, "modifyitem block 0 64 0 item tool 2 damage add 1");
    assert_eq!(output.result, 2);
    assert_eq!(chest(&world, 0).unwrap().damage, 11);
    assert_eq!(chest(&world, 1).unwrap().damage, 1);
    assert_eq!(chest(&world, 5).unwrap().damage, 0);
}

#[test]
fn removal_and_changes_mix_in_one_batch() {
    let (mut world, _) = setup();
    let output = run(&mut world, "modifyitem block 0 64 0 item tool damage add 45");
    assert_eq!(output.result, 3);
    assert_eq!(output.lines, vec!["Damaged 3 items by 45"]);
    assert_eq!(chest(&world, 0), None);
    assert_eq!(chest(&world, 1).unwrap().damage, 45);
    assert_eq!(chest(&world, 5).unwrap().damage, 45);
}

#[test]
fn no_matches_leaves_the_world_untouched() {
    let (mut world, _) = setup();
    let before = world.clone();
    let output = run(&mut world, "modifyitem block 0 64 0 item apple damage add 1");
    assert_eq!(output.lines, vec!["Error: No items were modified"]);
    assert_eq!(output.result, 0);
    assert_eq!(world, before);
}

#[test]
fn enchantment_add_is_additive_but_set_rejects_equal_level() {
    let (mut world, _) = setup();
    let output = run(&mut world, "modifyitem block 0 64 0 slot 1 enchantment add sharpness 2");
    assert_eq!(output.lines, vec!["Added 2 level(s) of Sharpness to 1 item"]);
    let sword = chest(&world, 1).unwrap();
    assert_eq!(sword.enchantment_level(EnchantmentType::Sharpness), 4);

    let output = run(&mut world, "modifyitem block 0 64 0 slot 1 enchantment set sharpness 4");
    assert_eq!(output.result, 0);
    assert!(output.lines[0].contains("already has Sharpness at level 4"));
    assert_eq!(output.lines[1], "Error: No items were modified");

    let output = run(&mut world, "modifyitem block 0 64 0 slot 1 enchantment set minecraft:sharpness 1");
    assert_eq!(output.result, 1);
    assert_eq!(
        chest(&world, 1).unwrap().enchantment_level(EnchantmentType::Sharpness),
        1
    );
}

#[test]
fn non_positive_ranks_fail_validation_in_every_mode() {
    let (mut world, _) = setup();
    let before = world.clone();
    for command in [
        "modifyitem block 0 64 0 slot 1 enchantment add sharpness 0",
        "modifyitem block 0 64 0 slot 1 enchantment set sharpness -2",
        "modifyitem block 0 64 0 slot 1 enchantment remove sharpness 0",
    ] {
        let output = run(&mut world, command);
        assert_eq!(output.result, 0, "{command}");
        assert_eq!(output.lines.len(), 1, "{command}");
        assert!(output.lines[0].starts_with("Error: Enchantment rank must be positive"));
    }
    assert_eq!(world, before);
}

#[test]
fn enchantment_levels_past_255_are_skipped() {
    let (mut world, _) = setup();
    let output = run(&mut world, "modifyitem block 0 64 0 slot 1 enchantment add sharpness 255");
    assert_eq!(output.result, 0);
    assert!(output.lines[0].contains("exceeds the maximum level of 255"));

    let output = run(&mut world, "modifyitem block 0 64 0 slot 1 enchantment add sharpness 256");
    assert_eq!(output.result, 0);
    assert!(output.lines[0].starts_with("Error: Integer must not be more than 255"));
}

#[test]
fn enchantment_remove_and_clear() {
    let (mut world, _) = setup();
    let output = run(&mut world, "modifyitem block 0 64 0 slot 1 enchantment remove sharpness");
    assert_eq!(output.lines, vec!["Removed Sharpness from 1 item"]);
    assert!(!chest(&world, 1).unwrap().has_enchantments());

    let output = run(&mut world, "modifyitem block 0 64 0 slot 1 enchantment clear");
    assert_eq!(output.result, 0);
    assert_eq!(output.lines[0], "Error: diamond_sword has no enchantments");

    let output = run(&mut world, "modifyitem block 0 64 0 slot 2 enchantment add efficiency");
    assert_eq!(output.lines[0], "Error: block:1 cannot be enchanted");
}

#[test]
fn non_containers_fail_resolution() {
    let (mut world, _) = setup();
    let output = run(&mut world, "modifyitem block 4 64 0 slot 0 damage add 1");
    assert_eq!(output.lines, vec!["Error: The oak_sign at 4 64 0 is not a container"]);

    let output = run(&mut world, "modifyitem block 6 64 0 slot 0 damage add 1");
    assert_eq!(output.lines, vec!["Error: Target block at 6 64 0 is not a container"]);
    assert_eq!(output.result, 0);
}

#[test]
fn trader_inventory_is_addressable() {
    let (mut world, ids) = setup();
    let output = run(
        &mut world,
        "modifyitem entity @e[type=villager] slot villager.3 damage add 5",
    );
    assert_eq!(output.result, 1);
    assert_eq!(entity_slot(&world, ids.villager, 303).unwrap().damage, 5);

    let output = run(&mut world, "modifyitem entity @e[type=villager] item * tag merge {\"sold\":true}");
    assert_eq!(output.result, 2);
    assert!(entity_slot(&world, ids.villager, 300).unwrap().tag.is_some());
}

#[test]
fn entity_selection_spans_several_players() {
    let (mut world, ids) = setup();
    let output = run(&mut world, "modifyitem entity @a item tool enchantment add unbreaking");
    assert_eq!(output.lines, vec!["Added 1 level(s) of Unbreaking to 2 items"]);
    for id in [ids.alex, ids.steve] {
        let item = entity_slot(&world, id, 0).unwrap();
        assert_eq!(item.enchantment_level(EnchantmentType::Unbreaking), 1);
    }
}

#[test]
fn named_player_armor_slot() {
    let (mut world, ids) = setup();
    let output = run(&mut world, "modifyitem entity Alex slot armor.feet damage add 3");
    assert_eq!(output.result, 1);
    assert_eq!(entity_slot(&world, ids.alex, 100).unwrap().damage, 3);
}

#[test]
fn empty_selections_modify_nothing() {
    let (mut world, _) = setup();
    let output = run(&mut world, "modifyitem entity @s item * tag clear");
    assert_eq!(output.lines, vec!["Error: No items were modified"]);

    let output = run(&mut world, "modifyitem entity @e[type=minecart] item * tag clear");
    assert_eq!(output.lines, vec!["Error: No items were modified"]);
}

#[test]
fn lore_lines_can_be_inserted_replaced_and_removed() {
    let (mut world, _) = setup();
    let base = "modifyitem block 0 64 0 slot 0 lore";

    let output = run(&mut world, &format!("{base} add \"First line\""));
    assert_eq!(output.lines, vec!["Added lore line \"First line\" to 1 item"]);
    let output = run(&mut world, &format!("{base} add Zeroth 0"));
    assert_eq!(output.result, 1);
    assert_eq!(lore::lines(&chest(&world, 0).unwrap()), vec!["Zeroth", "First line"]);

    let output = run(&mut world, &format!("{base} add Late 2"));
    assert_eq!(output.result, 0);
    assert!(output.lines[0].contains("out of bounds"));

    run(&mut world, &format!("{base} set 1 Second"));
    assert_eq!(lore::lines(&chest(&world, 0).unwrap()), vec!["Zeroth", "Second"]);

    let output = run(&mut world, &format!("{base} set -1 Nope"));
    assert_eq!(output.lines, vec!["Error: Lore index must not be negative, found -1"]);

    run(&mut world, &format!("{base} remove 0"));
    assert_eq!(lore::lines(&chest(&world, 0).unwrap()), vec!["Second"]);

    let output = run(&mut world, &format!("{base} clear"));
    assert_eq!(output.lines, vec!["Cleared the lore of 1 item"]);
    assert_eq!(chest(&world, 0).unwrap().tag, None);
}

#[test]
fn place_on_only_applies_to_blocks() {
    let (mut world, _) = setup();
    let output = run(&mut world, "modifyitem block 0 64 0 item * placeOn add stone");
    assert_eq!(output.result, 1);
    assert_eq!(output.errors().count(), 5);
    assert_eq!(
        output.lines.last().map(String::as_str),
        Some("Added minecraft:stone to the CanPlaceOn list of 1 item")
    );
    assert_eq!(
        usage::entries(&chest(&world, 2).unwrap(), usage::UsageList::CanPlaceOn),
        vec!["minecraft:stone"]
    );
}

#[test]
fn destroy_list_add_and_remove() {
    let (mut world, _) = setup();
    let base = "modifyitem block 0 64 0 slot 0 destroy";
    run(&mut world, &format!("{base} add stone"));
    run(&mut world, &format!("{base} add minecraft:diamond_ore"));
    let pick = chest(&world, 0).unwrap();
    assert_eq!(
        usage::entries(&pick, usage::UsageList::CanDestroy),
        vec!["minecraft:stone", "minecraft:diamond_ore"]
    );

    let output = run(&mut world, &format!("{base} remove dirt"));
    assert_eq!(output.result, 0);
    assert!(output.lines[0].contains("has no minecraft:dirt entry in CanDestroy"));

    run(&mut world, &format!("{base} clear"));
    assert_eq!(chest(&world, 0).unwrap().tag, None);

    let output = run(&mut world, &format!("{base} add unobtainium"));
    assert!(output.lines[0].starts_with("Error: Unknown block 'minecraft:unobtainium'"));
}

#[test]
fn tag_merge_and_predicate_tag_filter() {
    let (mut world, _) = setup();
    let output = run(&mut world, "modifyitem block 0 64 0 slot 5 tag merge {\"level\":3}");
    assert_eq!(output.result, 1);
    assert_eq!(
        chest(&world, 5).unwrap().tag,
        Some(TagCompound::from_json_str(r#"{"owner":"alex","level":3}"#).unwrap())
    );

    let output = run(&mut world, "modifyitem block 0 64 0 item *{\"owner\":\"alex\"} tag clear");
    assert_eq!(output.lines, vec!["Cleared the tag of 1 item"]);
    assert_eq!(chest(&world, 5).unwrap().tag, None);
}

#[test]
fn malformed_commands_are_parse_errors() {
    let (mut world, _) = setup();
    let before = world.clone();
    let output = run(&mut world, "modifyitem block 0 64 0 slot 0 polish add 1");
    assert_eq!(output.result, 0);
    assert!(output.errors().next().unwrap().starts_with("Unknown argument, expected damage"));

    let output = run(&mut world, "modifyitem block 0 64 0 slot 0 damage add");
    assert!(output.errors().next().unwrap().starts_with("Incomplete command"));

    let output = run(&mut world, "modifyitem block 0 64 0 slot 0 damage add -4");
    assert!(output.errors().next().unwrap().starts_with("Integer must not be less than 0"));
    assert_eq!(world, before);
}

#[test]
fn detached_mule_chest_contents_are_left_alone() {
    let mut world = World::new();
    let pick = || cmdplus_testkit::worn_tool(ToolType::Pickaxe, 0, 50);
    let with_chest = world.spawn(EntityType::Mule, [0.0, 64.0, 0.0]);
    let detached = world.spawn(EntityType::Mule, [1.0, 64.0, 0.0]);
    for (id, has_chest) in [(with_chest, true), (detached, false)] {
        if let Some(EntityData::Horse { tack, .. }) = world.entity_mut(id).map(|e| &mut e.data) {
            tack.has_chest = has_chest;
            tack.chest[0] = Some(pick());
        }
    }

    let output = run(&mut world, "modifyitem entity @e[type=mule] item tool damage add 1");
    assert_eq!(output.lines, vec!["Damaged 1 item by 1"]);
    assert_eq!(output.result, 1);
    assert_eq!(entity_slot(&world, with_chest, 500).unwrap().damage, 1);
    assert_eq!(entity_slot(&world, detached, 500), None);
    let EntityData::Horse { tack, .. } = &world.entity(detached).unwrap().data else {
        panic!("mule keeps horse data");
    };
    assert_eq!(tack.chest[0], Some(pick()));
}

#[test]
fn chest_flag_refuses_data_it_cannot_store() {
    let (mut world, ids) = setup();
    let output = run(
        &mut world,
        "modifyitem entity @e[type=donkey] slot horse.chest tag merge {\"x\":1}",
    );
    assert_eq!(output.result, 0);
    assert_eq!(output.lines.len(), 2, "{:?}", output.lines);
    assert!(output.lines[0].starts_with("Error: Slot 499 of "), "{:?}", output.lines);
    assert!(output.lines[0].contains("cannot hold the modified"));
    assert_eq!(output.lines[1], "Error: No items were modified");

    let chest = entity_slot(&world, ids.donkey, slots::HORSE_CHEST_FLAG).expect("chest kept");
    assert_eq!(chest.tag, None);
    assert!(entity_slot(&world, ids.donkey, 500).is_some(), "contents kept");
}

/// Host where one entity can be selected but not opened for writing, as if
/// it vanished between selection and commit.
struct VanishingHost {
    world: World,
    vanished: EntityId,
}

impl CommandHost for VanishingHost {
    fn block_entity(&self, pos: BlockPos) -> Option<&BlockEntity> {
        self.world.block_entity(pos)
    }

    fn block_entity_mut(&mut self, pos: BlockPos) -> Option<&mut BlockEntity> {
        self.world.block_entity_mut(pos)
    }

    fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.world.entity(id)
    }

    fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        if id == self.vanished {
            return None;
        }
        self.world.entity_mut(id)
    }

    fn entities(&self) -> Box<dyn Iterator<Item = &Entity> + '_> {
        Box::new(self.world.entities())
    }
}

#[test]
fn unexpected_failure_keeps_earlier_containers_committed() {
    let (world, ids) = setup();
    let axe_before = entity_slot(&world, ids.steve, 0);
    let mut host = VanishingHost {
        world,
        vanished: ids.steve,
    };

    let output = CommandDispatcher::with_builtin_commands().execute(
        "modifyitem entity @a item tool damage add 3",
        &mut host,
        &CommandSource::console([0.0, 64.0, 0.0]),
    );

    assert_eq!(output.result, 0);
    assert_eq!(
        output.lines.last().map(String::as_str),
        Some(format!("Error: {INTERNAL_ERROR}").as_str())
    );
    assert!(!output.lines.iter().any(|line| line.contains("Damaged")));
    // Alex's container was committed before Steve's failed to open.
    assert_eq!(entity_slot(&host.world, ids.alex, 0).unwrap().damage, 3);
    assert_eq!(entity_slot(&host.world, ids.steve, 0), axe_before);
}
