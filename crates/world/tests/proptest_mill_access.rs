//! Property-based tests for the mill's directional access rules
//!
//! Validates:
//! - A slot hidden from a side can be neither inserted into nor extracted from it
//! - The fuel slot only accepts registered fuel; output slots never accept inserts
//! - Only output slots can be extracted, and only from below or behind
//! - Slot writes never exceed the item's stack limit
//! - Interacting always leaves exactly one attached item
//! - Persisted state survives an encode/decode cycle

use milldustry_core::{BlockPos, Direction, Facing, ItemStack, ItemType};
use milldustry_testkit::{FixedFuelRegistry, RecordingSink};
use milldustry_world::{
    Container, MillBlockEntity, MillSnapshot, SidedContainer, SlotRole, FUEL_SLOT,
    MILL_SLOT_COUNT,
};
use proptest::prelude::*;
use serde_json::{json, Value};
use std::sync::Arc;

fn any_facing() -> impl Strategy<Value = Facing> {
    prop::sample::select(Facing::ALL.to_vec())
}

fn any_side() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

fn any_item() -> impl Strategy<Value = ItemType> {
    prop::sample::select(ItemType::ALL.to_vec())
}

fn any_stack() -> impl Strategy<Value = ItemStack> {
    (any_item(), 1u32..200).prop_map(|(item, count)| ItemStack::new(item, count))
}

fn any_tag() -> impl Strategy<Value = Option<Value>> {
    prop::option::of(prop_oneof![
        Just(Value::Null),
        (0u32..500).prop_map(|damage| json!({ "Damage": damage })),
        "[a-z]{1,8}".prop_map(|name| json!({ "Name": name, "Lore": [name] })),
    ])
}

fn any_tagged_stack() -> impl Strategy<Value = ItemStack> {
    (any_stack(), any_tag()).prop_map(|(stack, tag)| ItemStack { tag, ..stack })
}

fn mill_with(facing: Facing, fuels: Vec<ItemType>) -> MillBlockEntity {
    MillBlockEntity::new(
        BlockPos::new(0, 64, 0),
        facing,
        Arc::new(FixedFuelRegistry::new(fuels)),
        Box::new(RecordingSink::new()),
    )
}

proptest! {
    /// Property: invisible slots reject both insert and extract from that side.
    #[test]
    fn hidden_slots_are_unreachable(
        facing in any_facing(),
        side in any_side(),
        slot in 0usize..MILL_SLOT_COUNT,
        item in any_item(),
    ) {
        // Every item is fuel here, so only the side rules can say no.
        let mill = mill_with(facing, ItemType::ALL.to_vec());
        let stack = ItemStack::new(item, 1);

        if !mill.available_slots(side).contains(&slot) {
            prop_assert!(!mill.can_insert(slot, &stack, side));
            prop_assert!(!mill.can_extract(slot, &stack, side));
        }
    }

    /// Property: only registered fuel enters the fuel slot; outputs never accept inserts.
    #[test]
    fn insert_roles_are_exclusive(
        facing in any_facing(),
        side in any_side(),
        item in any_item(),
        registered in any::<bool>(),
    ) {
        let fuels = if registered { vec![item] } else { Vec::new() };
        let mill = mill_with(facing, fuels);
        let stack = ItemStack::new(item, 1);

        if mill.can_insert(FUEL_SLOT, &stack, side) {
            prop_assert!(registered);
        }
        for &slot in SlotRole::Output.slots() {
            prop_assert!(!mill.can_insert(slot, &stack, side));
        }
    }

    /// Property: extraction happens only from outputs, only through the bottom or back.
    #[test]
    fn extraction_is_local(
        facing in any_facing(),
        side in any_side(),
        slot in 0usize..MILL_SLOT_COUNT,
        item in any_item(),
    ) {
        let mill = mill_with(facing, Vec::new());
        let allowed = mill.can_extract(slot, &ItemStack::new(item, 1), side);
        let expected = SlotRole::of(slot) == Some(SlotRole::Output)
            && (side == Direction::Down || side == facing.back());
        prop_assert_eq!(allowed, expected);
    }

    /// Property: a written stack never reads back above its limit.
    #[test]
    fn set_never_exceeds_stack_limit(
        slot in 0usize..MILL_SLOT_COUNT,
        stack in any_stack(),
    ) {
        let mut mill = mill_with(Facing::North, Vec::new());
        mill.set(slot, Some(stack.clone())).unwrap();
        let stored = mill.get(slot).unwrap().expect("non-empty write is stored");
        prop_assert!(stored.count <= stored.max_stack_size());
        prop_assert_eq!(stored.count, stack.count.min(stack.max_stack_size()));
    }

    /// Property: interact attaches exactly one item whatever the offered count.
    #[test]
    fn interact_attaches_exactly_one(stack in any_stack()) {
        let mut mill = mill_with(Facing::South, Vec::new());
        let mut hand = stack.clone();
        mill.interact(&mut hand);

        prop_assert_eq!(mill.millstone().map(|s| s.count), Some(1));
        prop_assert_eq!(mill.millstone().map(|s| s.item_type), Some(stack.item_type));
        prop_assert_eq!(hand.count, stack.count - 1);
    }

    /// Property: decode(encode(state)) == state.
    #[test]
    fn snapshot_roundtrip(
        stacks in prop::collection::vec(prop::option::of(any_tagged_stack()), MILL_SLOT_COUNT),
        millstone in prop::option::of(any_tagged_stack()),
    ) {
        let mut mill = mill_with(Facing::North, Vec::new());
        for (slot, stack) in stacks.into_iter().enumerate() {
            mill.set(slot, stack).unwrap();
        }
        mill.set_millstone(millstone);
        let snapshot = mill.snapshot();

        let decoded = MillSnapshot::from_document(&snapshot.to_document());
        prop_assert_eq!(decoded, snapshot);
    }
}
