//! Unit tests for the persistent 2-3-4 tree.

use rstest::rstest;
use std::cmp::Ordering;
use tree234::tree::{Comparator, NaturalOrder, Tree};

fn keys<V>(tree: &Tree<i32, V>) -> Vec<i32> {
    tree.iter().map(|(key, _)| *key).collect()
}

fn build(keys: &[i32]) -> Tree<i32, i32> {
    keys.iter()
        .fold(Tree::new(), |tree, key| tree.insert(*key, key * 10, &NaturalOrder))
}

// =============================================================================
// Basic Construction Tests
// =============================================================================

#[rstest]
fn test_new_creates_empty_tree() {
    let tree: Tree<i32, String> = Tree::new();
    assert!(tree.is_empty());
    assert_eq!(tree.size(), 0);
    assert_eq!(tree.depth(), 0);
    assert_eq!(tree.arity(), 0);
}

#[rstest]
fn test_singleton() {
    let tree = Tree::singleton("k", 1);
    assert!(tree.is_singleton());
    assert_eq!(tree.size(), 1);
    assert_eq!(tree.depth(), 1);
    assert_eq!(tree.search_any(), Some((&"k", &1)));
}

// =============================================================================
// Concrete Scenario
// =============================================================================

#[rstest]
fn test_insert_sequence_then_delete_internal_key() {
    let tree = build(&[10, 20, 5, 15, 25, 1, 30]);
    assert_eq!(keys(&tree), vec![1, 5, 10, 15, 20, 25, 30]);
    assert_eq!(tree.depth(), 2);
    assert_eq!(tree.arity(), 3);
    assert_eq!(tree.search_any().map(|(key, _)| *key), Some(20));
    assert_eq!(tree.validate(&NaturalOrder), Ok(2));

    let (without, removed) = tree.delete(&20, &NaturalOrder);
    assert_eq!(removed, Some(200));
    assert_eq!(keys(&without), vec![1, 5, 10, 15, 25, 30]);
    assert_eq!(without.validate(&NaturalOrder), Ok(2));
    // The successor 25 took the deleted key's place in the root.
    assert_eq!(without.search_any().map(|(key, _)| *key), Some(25));

    assert_eq!(tree.search(&20, &NaturalOrder), Some(&200));
    assert_eq!(tree.size(), 7);
}

#[rstest]
#[case(&[1, 3, 5, 7])]
#[case(&[7, 5, 3, 1])]
#[case(&[5, 1, 7, 3])]
fn test_neighbour_queries_on_small_set(#[case] insertion_order: &[i32]) {
    let tree = build(insertion_order);
    let key_of = |entry: Option<(&i32, &i32)>| entry.map(|(key, _)| *key);

    assert_eq!(key_of(tree.search_min()), Some(1));
    assert_eq!(key_of(tree.search_max()), Some(7));
    assert_eq!(key_of(tree.search_lt(&5, &NaturalOrder)), Some(3));
    assert_eq!(key_of(tree.search_gt(&5, &NaturalOrder)), Some(7));
    assert_eq!(key_of(tree.search_lt(&1, &NaturalOrder)), None);
    assert_eq!(key_of(tree.search_gt(&7, &NaturalOrder)), None);
    assert_eq!(key_of(tree.search_lt(&4, &NaturalOrder)), Some(3));
    assert_eq!(key_of(tree.search_gt(&4, &NaturalOrder)), Some(5));
    assert_eq!(key_of(tree.search_geq(&4, &NaturalOrder)), Some(5));
    assert_eq!(key_of(tree.search_geq(&5, &NaturalOrder)), Some(5));
}

// =============================================================================
// Insert Tests
// =============================================================================

#[rstest]
fn test_insert_overwrites_without_duplicating() {
    let tree = build(&[1, 2, 3]);
    let updated = tree.insert(2, -2, &NaturalOrder);
    assert_eq!(updated.size(), 3);
    assert_eq!(updated.search(&2, &NaturalOrder), Some(&-2));
    assert_eq!(tree.search(&2, &NaturalOrder), Some(&20));
}

#[rstest]
#[case(1)]
#[case(3)]
#[case(4)]
#[case(100)]
#[case(4096)]
fn test_depth_stays_logarithmic(#[case] count: i32) {
    let tree = build(&(0..count).collect::<Vec<_>>());
    let bound = usize::try_from(count + 1).unwrap().ilog2() as usize + 1;
    assert!(tree.depth() <= bound, "depth {} above {bound}", tree.depth());
    assert_eq!(tree.validate(&NaturalOrder), Ok(tree.depth()));
    assert_eq!(tree.size(), usize::try_from(count).unwrap());
}

// =============================================================================
// Delete Tests
// =============================================================================

#[rstest]
fn test_delete_missing_key_returns_same_tree() {
    let tree = build(&[1, 2, 3, 4, 5, 6, 7, 8]);
    let (same, removed) = tree.delete(&42, &NaturalOrder);
    assert_eq!(removed, None);
    assert!(same.ptr_eq(&tree));
}

#[rstest]
fn test_delete_on_empty_tree() {
    let tree: Tree<i32, i32> = Tree::new();
    let (same, removed) = tree.delete(&1, &NaturalOrder);
    assert!(same.is_empty());
    assert_eq!(removed, None);
    assert_eq!(tree.delete_min().1, None);
    assert_eq!(tree.delete_max().1, None);
}

#[rstest]
fn test_delete_last_entry_yields_empty_tree() {
    let tree = Tree::singleton(1, 10);
    let (empty, removed) = tree.delete(&1, &NaturalOrder);
    assert_eq!(removed, Some(10));
    assert!(empty.is_empty());
    assert_eq!(empty.depth(), 0);
}

#[rstest]
fn test_delete_every_key_in_scrambled_order() {
    let order: Vec<i32> = (0..300).map(|index| (index * 7919) % 300).collect();
    let mut tree = build(&order);
    let mut expected: Vec<i32> = (0..300).collect();
    for key in order.iter().rev() {
        let (next, removed) = tree.delete(key, &NaturalOrder);
        assert_eq!(removed, Some(key * 10));
        expected.retain(|present| present != key);
        assert_eq!(keys(&next), expected);
        assert!(next.validate(&NaturalOrder).is_ok());
        tree = next;
    }
    assert!(tree.is_empty());
}

#[rstest]
fn test_delete_min_and_max_pair_up() {
    let tree = build(&(0..50).collect::<Vec<_>>());
    let (without_min, min) = tree.delete_min();
    let (without_both, max) = without_min.delete_max();
    assert_eq!(min, Some((0, 0)));
    assert_eq!(max, Some((49, 490)));
    assert_eq!(keys(&without_both), (1..49).collect::<Vec<_>>());
    assert_eq!(tree.size(), 50);
}

// =============================================================================
// Comparator Tests
// =============================================================================

struct CaseInsensitive;

impl Comparator<String> for CaseInsensitive {
    fn compare(&self, left: &String, right: &String) -> Ordering {
        left.to_lowercase().cmp(&right.to_lowercase())
    }
}

#[rstest]
fn test_custom_comparator_decides_identity() {
    let tree = Tree::new()
        .insert("Alpha".to_string(), 1, &CaseInsensitive)
        .insert("beta".to_string(), 2, &CaseInsensitive)
        .insert("ALPHA".to_string(), 3, &CaseInsensitive);

    assert_eq!(tree.size(), 2);
    let (stored, value) = tree
        .search_entry(&"alpha".to_string(), &CaseInsensitive)
        .unwrap();
    // The first inserted spelling of the key is kept; only the value changes.
    assert_eq!(stored, "Alpha");
    assert_eq!(*value, 3);
    assert!(tree.contains_key(&"BETA".to_string(), &CaseInsensitive));
}

#[rstest]
fn test_comparator_as_trait_object() {
    let comparator: &dyn Comparator<i32> = &|left: &i32, right: &i32| right.cmp(left);
    let tree = (0..10).fold(Tree::new(), |tree, key| tree.insert(key, (), comparator));
    assert_eq!(tree.search_min().map(|(key, _)| *key), Some(9));
    assert!(tree.validate(comparator).is_ok());
}

// =============================================================================
// Map Tests
// =============================================================================

#[rstest]
fn test_map_with_captured_argument() {
    let tree = build(&[3, 1, 2]);
    let factor = 3;
    let mapped = tree.map(|key, value| key + value * factor);
    let values: Vec<i32> = mapped.iter().map(|(_, value)| *value).collect();
    assert_eq!(values, vec![31, 62, 93]);
    assert_eq!(mapped.depth(), tree.depth());
}
