//! Property-based tests for item stack mechanics
//!
//! Validates item stack invariants:
//! - Stack limits are positive and never above 64
//! - Splitting conserves the total count
//! - Decrementing never underflows and reports what it removed
//! - Clamping leaves a stack within its limit and is idempotent
//! - Different item types don't merge

use milldustry_core::{ItemStack, ItemType};
use proptest::prelude::*;

fn any_item() -> impl Strategy<Value = ItemType> {
    prop::sample::select(ItemType::ALL.to_vec())
}

proptest! {
    /// Property: Max stack size is always positive and reasonable
    #[test]
    fn stack_size_limits_are_valid(item_type in any_item()) {
        let max_stack = item_type.max_stack_size();
        prop_assert!(
            max_stack > 0 && max_stack <= 64,
            "Max stack size {} out of reasonable range [1, 64]",
            max_stack
        );
    }

    /// Property: Splitting conserves the total count
    #[test]
    fn split_conserves_count(
        item_type in any_item(),
        count in 0u32..128,
        amount in 0u32..160,
    ) {
        let mut stack = ItemStack::new(item_type, count);
        let taken = stack.split(amount);

        let taken_count = taken.as_ref().map_or(0, |s| s.count);
        prop_assert_eq!(taken_count + stack.count, count);
        prop_assert_eq!(taken_count, amount.min(count));
        if let Some(taken) = taken {
            prop_assert!(taken.count > 0, "split never hands out an empty stack");
            prop_assert!(taken.can_merge(&stack));
        }
    }

    /// Property: Decrement removes at most what is there
    #[test]
    fn decrement_never_underflows(
        item_type in any_item(),
        count in 0u32..128,
        amount in 0u32..160,
    ) {
        let mut stack = ItemStack::new(item_type, count);
        let removed = stack.decrement(amount);

        prop_assert_eq!(removed, amount.min(count));
        prop_assert_eq!(stack.count, count - removed);
        prop_assert_eq!(stack.is_empty(), amount >= count);
    }

    /// Property: Clamping fits the stack to its limit, and a second clamp is a no-op
    #[test]
    fn clamp_fits_limit(item_type in any_item(), count in 0u32..256) {
        let mut stack = ItemStack::new(item_type, count);
        let changed = stack.clamp_to_max();

        prop_assert!(stack.count <= item_type.max_stack_size());
        prop_assert_eq!(changed, count > item_type.max_stack_size());
        prop_assert_eq!(stack.count, count.min(item_type.max_stack_size()));
        prop_assert!(!stack.clamp_to_max());
        prop_assert_eq!(stack.remaining_space(), item_type.max_stack_size() - stack.count);
    }

    /// Property: Different item types cannot merge
    #[test]
    fn different_types_dont_merge(
        type1 in any_item(),
        type2 in any_item(),
        count in 1u32..32,
    ) {
        let a = ItemStack::new(type1, count);
        let b = ItemStack::new(type2, count);
        prop_assert_eq!(a.can_merge(&b), type1 == type2);
    }
}
