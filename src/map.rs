//! The contract shared by both tree backends.

/// An ordered map that can be backed by either tree variant.
///
/// The trait is object safe, so callers can hold a `Box<dyn OrderedMap<K, V>>`
/// and choose the backend at run time.
///
/// ```
/// use schedule_tree::{AvlTreeMap, BstMap, OrderedMap};
///
/// let mut maps: Vec<Box<dyn OrderedMap<&str, u32>>> = vec![
///     Box::new(BstMap::new()) as Box<dyn OrderedMap<&str, u32>>,
///     Box::new(AvlTreeMap::new()),
/// ];
/// for map in maps.iter_mut() {
///     map.insert("B", 2);
///     map.insert("A", 1);
///     map.insert("C", 3);
///     assert_eq!(map.search(&"A"), Some(&1));
///     assert_eq!(map.height(), 1);
///     let keys: Vec<_> = map.in_order().map(|(k, _)| *k).collect();
///     assert_eq!(keys, ["A", "B", "C"]);
/// }
/// ```
pub trait OrderedMap<K: Ord, V> {
    /// Inserts a key-value pair into the map.
    /// If the key was already present its value is overwritten and the old value is returned.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Returns a reference to the value corresponding to the key.
    fn search(&self, key: &K) -> Option<&V>;

    /// Returns a fresh iterator over all entries in ascending key order.
    fn in_order(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_>;

    /// Returns the number of edges on the longest root-to-leaf path.
    /// An empty map has height -1, a single entry has height 0.
    fn height(&self) -> isize;

    /// Returns the number of entries in the map.
    fn len(&self) -> usize;

    /// Returns true if the map contains no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Measures the height of the tree below `root` by walking its structure.
///
/// The walk keeps its own stack of pending nodes, so a degenerate chain
/// does not grow the call stack.
pub(crate) fn structural_height<'a, N, F>(root: Option<&'a N>, children: F) -> isize
where
    F: Fn(&'a N) -> (Option<&'a N>, Option<&'a N>),
{
    let mut height = -1;
    let mut pending = Vec::new();
    if let Some(root) = root {
        pending.push((root, 0));
    }
    while let Some((node, depth)) = pending.pop() {
        height = height.max(depth);
        let (left, right) = children(node);
        if let Some(left) = left {
            pending.push((left, depth + 1));
        }
        if let Some(right) = right {
            pending.push((right, depth + 1));
        }
    }
    height
}
