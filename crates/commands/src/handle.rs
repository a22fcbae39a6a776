//! Uniform slot access over block containers and entities.

use std::collections::BTreeMap;

use cmdplus_core::ItemStack;
use cmdplus_world::Entity;

use crate::slots;

/// A container the engine is currently editing.
///
/// Block containers expose their slot array directly (ids `0..len`);
/// entities go through the flat slot layout in [`slots`].
pub enum ContainerHandle<'w> {
    Direct {
        label: String,
        slots: &'w mut [Option<ItemStack>],
    },
    Addressed(&'w mut Entity),
}

impl ContainerHandle<'_> {
    /// Name used in logs and feedback.
    pub fn label(&self) -> String {
        match self {
            ContainerHandle::Direct { label, .. } => label.clone(),
            ContainerHandle::Addressed(entity) => entity.display_name(),
        }
    }

    /// Copy of the item at `slot`; empty stacks read as `None`.
    pub fn get(&self, slot: u32) -> Option<ItemStack> {
        match self {
            ContainerHandle::Direct { slots, .. } => usize::try_from(slot)
                .ok()
                .and_then(|index| slots.get(index))
                .and_then(Clone::clone)
                .filter(|stack| !stack.is_empty()),
            ContainerHandle::Addressed(entity) => slots::get(entity, slot),
        }
    }

    /// Whether a later [`set`](Self::set) of `item` at `slot` would succeed.
    pub fn accepts(&self, slot: u32, item: Option<&ItemStack>) -> bool {
        match self {
            ContainerHandle::Direct { slots, .. } => {
                usize::try_from(slot).is_ok_and(|index| index < slots.len())
            }
            ContainerHandle::Addressed(entity) => slots::accepts(entity, slot, item),
        }
    }

    /// Returns false when the slot does not exist or refuses the item.
    pub fn set(&mut self, slot: u32, item: Option<ItemStack>) -> bool {
        match self {
            ContainerHandle::Direct { slots, .. } => {
                let target = usize::try_from(slot)
                    .ok()
                    .and_then(|index| slots.get_mut(index));
                match target {
                    Some(target) => {
                        *target = item.filter(|stack| !stack.is_empty());
                        true
                    }
                    None => false,
                }
            }
            ContainerHandle::Addressed(entity) => slots::set(entity, slot, item),
        }
    }

    /// Every slot in ascending id order, including empty ones.
    pub fn get_all(&self) -> BTreeMap<u32, Option<ItemStack>> {
        match self {
            ContainerHandle::Direct { slots, .. } => (0u32..)
                .zip(slots.iter())
                .map(|(slot, item)| (slot, item.clone().filter(|stack| !stack.is_empty())))
                .collect(),
            ContainerHandle::Addressed(entity) => slots::get_all(entity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmdplus_core::{ItemType, ToolMaterial, ToolType};
    use cmdplus_world::{EntityId, EntityType};

    fn pick() -> ItemStack {
        ItemStack::new(ItemType::Tool(ToolType::Pickaxe, ToolMaterial::Iron), 1)
    }

    #[test]
    fn direct_slots_are_bounds_checked() {
        let mut storage: Vec<Option<ItemStack>> = vec![None; 3];
        storage[1] = Some(ItemStack::new(ItemType::Block(1), 0));
        let mut handle = ContainerHandle::Direct {
            label: "chest".into(),
            slots: &mut storage,
        };

        assert_eq!(handle.get(1), None, "zero-count stacks read as empty");
        assert!(handle.set(2, Some(pick())));
        assert!(!handle.set(3, Some(pick())));
        assert_eq!(handle.get(2), Some(pick()));
        assert_eq!(handle.get_all().len(), 3);
        assert_eq!(handle.label(), "chest");
        assert!(handle.accepts(2, None));
        assert!(!handle.accepts(3, Some(&pick())));
    }

    #[test]
    fn addressed_slots_follow_entity_layout() {
        let mut zombie = Entity::new(EntityId(7), EntityType::Zombie, [0.0; 3]);
        let mut handle = ContainerHandle::Addressed(&mut zombie);
        assert!(handle.set(slots::MAIN_HAND, Some(pick())));
        assert!(!handle.set(0, Some(pick())));
        assert_eq!(handle.get(slots::MAIN_HAND), Some(pick()));
        let all = handle.get_all();
        assert_eq!(all.keys().copied().collect::<Vec<_>>(), vec![98, 99, 100, 101, 102, 103]);
    }
}
