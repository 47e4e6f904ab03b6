use super::*;

use proptest::prelude::*;
use std::collections::BTreeMap;

fn build<M: OrderedMap<String, u32> + Default>(entries: &[(String, u32)]) -> M {
    let mut map = M::default();
    for (key, value) in entries {
        map.insert(key.clone(), *value);
    }
    map
}

fn entries() -> impl Strategy<Value = Vec<(String, u32)>> {
    prop::collection::vec(("[A-Z]{1,3}-[0-9]{1,3}", any::<u32>()), 0..200)
}

// Height of a perfectly packed tree holding `len` entries.
fn minimal_height(len: usize) -> isize {
    (usize::BITS - len.leading_zeros()) as isize - 1
}

proptest! {
    #[test]
    fn prop_matches_btreemap(entries in entries()) {
        let bst: BstMap<String, u32> = build(&entries);
        let avl: AvlTreeMap<String, u32> = build(&entries);
        bst.check_consistency();
        avl.check_consistency();

        let expected: BTreeMap<String, u32> = entries.iter().cloned().collect();
        prop_assert_eq!(bst.len(), expected.len());
        prop_assert_eq!(avl.len(), expected.len());
        prop_assert!(bst.iter().eq(expected.iter()));
        prop_assert!(avl.iter().eq(expected.iter()));

        for (key, value) in &expected {
            prop_assert_eq!(bst.get(key), Some(value));
            prop_assert_eq!(avl.get(key), Some(value));
        }
    }

    #[test]
    fn prop_in_order_strictly_ascending(entries in entries()) {
        let avl: AvlTreeMap<String, u32> = build(&entries);
        let bst: BstMap<String, u32> = build(&entries);
        for map in [&avl as &dyn OrderedMap<String, u32>, &bst] {
            let keys: Vec<&String> = map.in_order().map(|(k, _)| k).collect();
            prop_assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }

    #[test]
    fn prop_avl_height_is_logarithmic(entries in entries()) {
        let bst: BstMap<String, u32> = build(&entries);
        let avl: AvlTreeMap<String, u32> = build(&entries);
        let len = avl.len();
        prop_assert!(avl.height() >= minimal_height(len));
        prop_assert!(avl.height() <= bst.height());
        // AVL trees are at most 1.44 times taller than a perfectly balanced tree
        prop_assert!((avl.height() as f64) <= 1.45 * ((len + 2) as f64).log2());
    }

    #[test]
    fn prop_reinsert_is_idempotent(entries in entries()) {
        let mut bst: BstMap<String, u32> = build(&entries);
        let mut avl: AvlTreeMap<String, u32> = build(&entries);
        let bst_before: Vec<(String, u32)> = bst.iter().map(|(k, v)| (k.clone(), *v)).collect();
        let avl_before: Vec<(String, u32)> = avl.iter().map(|(k, v)| (k.clone(), *v)).collect();
        let (bst_height, avl_height) = (bst.height(), avl.height());

        for (key, value) in &bst_before {
            prop_assert_eq!(bst.insert(key.clone(), *value), Some(*value));
            prop_assert_eq!(avl.insert(key.clone(), *value), Some(*value));
        }
        avl.check_consistency();

        prop_assert!(bst.iter().map(|(k, v)| (k.clone(), *v)).eq(bst_before));
        prop_assert!(avl.iter().map(|(k, v)| (k.clone(), *v)).eq(avl_before));
        prop_assert_eq!(bst.height(), bst_height);
        prop_assert_eq!(avl.height(), avl_height);
    }

    #[test]
    fn prop_sorted_input_degenerates_only_the_bst(len in 1usize..300) {
        let mut bst = BstMap::new();
        let mut avl = AvlTreeMap::new();
        for key in 0..len {
            bst.insert(key, ());
            avl.insert(key, ());
        }
        avl.check_consistency();
        prop_assert_eq!(bst.height(), len as isize - 1);
        prop_assert!(avl.height() <= 2 * minimal_height(len) + 1);
    }
}
