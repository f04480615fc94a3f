//! Unit tests for the stack module.
//!
//! Covers LIFO ordering, top-relative addressing, and the reordering
//! operations (swap and rolls), including their algebraic properties.

use super::*;
use proptest::prelude::*;

fn stack_of(items: &[u32]) -> Stack<u32> {
    items.iter().copied().collect()
}

fn drain(mut stack: Stack<u32>) -> Vec<u32> {
    let mut out = Vec::new();
    while let Some(item) = stack.pop() {
        out.push(item);
    }
    out
}

#[test]
fn test_pop_reverses_push_order() {
    let mut stack = Stack::new();
    stack.push('a');
    stack.push('b');
    stack.push('c');

    assert_eq!(stack.pop(), Some('c'));
    assert_eq!(stack.pop(), Some('b'));
    assert_eq!(stack.pop(), Some('a'));
    assert_eq!(stack.pop(), None);
}

#[test]
fn test_at_addresses_from_tos() {
    let stack = stack_of(&[1, 2, 3]);

    assert_eq!(stack.at(0), Some(&3)); // TOS is the last push
    assert_eq!(stack.at(1), Some(&2));
    assert_eq!(stack.at(2), Some(&1));
    assert_eq!(stack.at(3), None);
}

#[test]
fn test_swap_exchanges_tos_with_nth() {
    let mut stack = stack_of(&[1, 2, 3, 4]);

    stack.swap(2);
    assert_eq!(stack.at(0), Some(&2));
    assert_eq!(stack.at(2), Some(&4));
    // the others stay put
    assert_eq!(stack.at(1), Some(&3));
    assert_eq!(stack.at(3), Some(&1));
}

#[test]
fn test_swap_out_of_range_is_noop() {
    let mut stack = stack_of(&[1, 2]);
    let before = stack.clone();

    stack.swap(0);
    assert_eq!(stack, before);
    stack.swap(2);
    assert_eq!(stack, before);
    stack.swap(100);
    assert_eq!(stack, before);
}

#[test]
fn test_roll_top_moves_tos_to_bottom() {
    let mut stack = stack_of(&[1, 2, 3]);

    stack.roll_top();
    assert_eq!(stack.at(0), Some(&2));
    assert_eq!(stack.at(1), Some(&1));
    assert_eq!(stack.at(2), Some(&3));
}

#[test]
fn test_roll_bottom_moves_bottom_to_tos() {
    let mut stack = stack_of(&[1, 2, 3]);

    stack.roll_bottom();
    assert_eq!(stack.at(0), Some(&1));
    assert_eq!(stack.at(1), Some(&3));
    assert_eq!(stack.at(2), Some(&2));
}

#[test]
fn test_rolls_on_single_item_are_noops() {
    let mut stack = stack_of(&[7]);
    stack.roll_top();
    assert_eq!(stack.at(0), Some(&7));
    stack.roll_bottom();
    assert_eq!(stack.at(0), Some(&7));
}

#[test]
fn test_remove_by_top_relative_index() {
    let mut stack = stack_of(&[1, 2, 3]);

    assert_eq!(stack.remove(1), Some(2));
    assert_eq!(drain(stack), vec![3, 1]);
}

#[test]
fn test_position_is_top_relative() {
    let stack = stack_of(&[10, 20, 30]);

    assert_eq!(stack.position(|&x| x == 30), Some(0));
    assert_eq!(stack.position(|&x| x == 10), Some(2));
    assert_eq!(stack.position(|&x| x == 99), None);
}

#[test]
fn test_iter_runs_top_down() {
    let stack = stack_of(&[1, 2, 3]);
    let seen: Vec<u32> = stack.iter().copied().collect();
    assert_eq!(seen, vec![3, 2, 1]);
}

proptest! {
    #[test]
    fn prop_swap_is_its_own_inverse(items in prop::collection::vec(any::<u32>(), 2..16), n in 1usize..16) {
        prop_assume!(n < items.len());
        let original = stack_of(&items);
        let mut stack = original.clone();

        stack.swap(n);
        stack.swap(n);
        prop_assert_eq!(stack, original);
    }

    #[test]
    fn prop_roll_top_then_bottom_is_identity(items in prop::collection::vec(any::<u32>(), 1..16)) {
        let original = stack_of(&items);
        let mut stack = original.clone();

        stack.roll_top();
        stack.roll_bottom();
        prop_assert_eq!(stack, original);
    }

    #[test]
    fn prop_pops_reverse_pushes(items in prop::collection::vec(any::<u32>(), 0..16)) {
        let stack = stack_of(&items);
        let mut reversed = items.clone();
        reversed.reverse();
        prop_assert_eq!(drain(stack), reversed);
    }
}
