/*!
 * List Core Tests
 * Ordering, tie-break, identity lookup and length behavior of the sorted list
 */

use listbench::{Arena, Handle, ListError, SortedList, YieldPoints};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn list(arena: &Arena) -> SortedList<'_> {
    SortedList::new(arena, arena.sentinel(0), YieldPoints::NONE)
}

fn key_values(list: &SortedList<'_>) -> Vec<u8> {
    list.keys().unwrap().iter().map(|k| k.value()).collect()
}

#[test]
fn test_insert_traverses_in_order() {
    let arena = Arena::new(1, *b"dac");
    let list = list(&arena);
    for element in arena.elements(0, 3) {
        list.insert(element).unwrap();
    }
    assert_eq!(key_values(&list), b"acd".to_vec());
}

#[test]
fn test_duplicate_key_newest_first() {
    let arena = Arena::new(1, *b"bb");
    let list = list(&arena);
    let first = arena.element(0);
    let second = arena.element(1);

    list.insert(first).unwrap();
    list.insert(second).unwrap();

    assert_eq!(list.handles().unwrap(), vec![second, first]);
}

#[test]
fn test_lookup_after_delete_is_not_found() {
    let arena = Arena::new(1, *b"xyz");
    let list = list(&arena);
    for element in arena.elements(0, 3) {
        list.insert(element).unwrap();
    }

    let target = arena.element(1);
    let key = arena.key(target).unwrap();
    list.delete(target).unwrap();

    assert_eq!(list.lookup(&key), Ok(None));
    assert_eq!(list.length(), Ok(2));
}

#[test]
fn test_length_counts_identities_not_values() {
    let arena = Arena::new(1, *b"aaabbbccca");
    let list = list(&arena);
    let n = arena.element_count();

    for element in arena.elements(0, n) {
        list.insert(element).unwrap();
    }
    assert_eq!(list.length(), Ok(n));

    for element in arena.elements(0, n) {
        list.delete(element).unwrap();
    }
    assert_eq!(list.length(), Ok(0));
}

#[test]
fn test_lookup_distinguishes_equal_values() {
    let arena = Arena::new(1, *b"bb");
    let list = list(&arena);
    let first = arena.element(0);
    let second = arena.element(1);
    list.insert(first).unwrap();
    list.insert(second).unwrap();

    // `second` sorts ahead of `first`, yet asking for first's key must
    // skip it
    let first_key = arena.key(first).unwrap();
    assert_eq!(first_key.value(), arena.key(second).unwrap().value());
    assert_eq!(list.lookup(&first_key), Ok(Some(first)));
}

#[test]
fn test_delete_reports_corruption_without_mutating() {
    let arena = Arena::new(1, *b"abc");
    let list = list(&arena);
    for element in arena.elements(0, 3) {
        list.insert(element).unwrap();
    }

    let middle = arena.element(1);
    list.delete(middle).unwrap();
    let before = list.handles().unwrap();

    assert_eq!(
        list.delete(middle),
        Err(ListError::Corrupted { element: middle })
    );
    assert_eq!(list.handles().unwrap(), before);
    assert_eq!(list.validate(), Ok(2));
}

#[test]
fn test_independent_lists_share_an_arena() {
    let arena = Arena::new(2, *b"mn");
    let left = SortedList::new(&arena, arena.sentinel(0), YieldPoints::NONE);
    let right = SortedList::new(&arena, arena.sentinel(1), YieldPoints::NONE);

    left.insert(arena.element(0)).unwrap();
    right.insert(arena.element(1)).unwrap();

    assert_eq!(left.handles().unwrap(), vec![arena.element(0)]);
    assert_eq!(right.handles().unwrap(), vec![arena.element(1)]);
}

/// Expected traversal: ascending value, newest first among equals
fn model_order(values: &[u8]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].cmp(&values[b]).then(b.cmp(&a)));
    order
}

proptest! {
    #[test]
    fn prop_traversal_matches_model(values in prop::collection::vec(any::<u8>(), 0..64)) {
        let arena = Arena::new(1, values.iter().copied());
        let list = list(&arena);
        for element in arena.elements(0, values.len()) {
            list.insert(element).unwrap();
        }

        let expected: Vec<Handle> = model_order(&values)
            .into_iter()
            .map(|ordinal| arena.element(ordinal))
            .collect();
        prop_assert_eq!(list.handles().unwrap(), expected);
        prop_assert_eq!(list.validate(), Ok(values.len()));
    }

    #[test]
    fn prop_delete_in_any_order_drains(
        order in prop::collection::vec(any::<u8>(), 1..48)
            .prop_flat_map(|values| {
                let n = values.len();
                (Just(values), Just((0..n).collect::<Vec<_>>()).prop_shuffle())
            })
    ) {
        let (values, deletions) = order;
        let arena = Arena::new(1, values.iter().copied());
        let list = list(&arena);
        for element in arena.elements(0, values.len()) {
            list.insert(element).unwrap();
        }

        let mut remaining = values.len();
        for ordinal in deletions {
            let element = arena.element(ordinal);
            let key = arena.key(element).unwrap();
            prop_assert_eq!(list.lookup(&key), Ok(Some(element)));
            list.delete(element).unwrap();
            remaining -= 1;
            prop_assert_eq!(list.lookup(&key), Ok(None));
            prop_assert_eq!(list.validate(), Ok(remaining));
        }
        prop_assert_eq!(list.length(), Ok(0));
    }
}
