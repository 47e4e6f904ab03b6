//! An ordered map implemented with an unbalanced binary search tree.

use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;
use std::mem;

use crate::map::{self, OrderedMap};

/// An ordered map implemented with a plain binary search tree.
///
/// No rebalancing takes place, so the shape of the tree follows the insertion order.
/// Keys inserted in sorted order degenerate into a chain.
///
/// ```
/// use schedule_tree::BstMap;
/// let mut map = BstMap::new();
/// map.insert("B", 2);
/// map.insert("A", 1);
/// map.insert("C", 3);
/// assert_eq!(map.get(&"A"), Some(&1));
/// assert_eq!(map.height(), 1);
/// ```
pub struct BstMap<K, V> {
    root: Link<K, V>,
    num_nodes: usize,
}

/// An iterator over the entries of a map, sorted by key.
pub struct Iter<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
    remaining: usize,
}

struct Node<K, V> {
    key: K,
    value: V,
    left: Link<K, V>,
    right: Link<K, V>,
}

type Link<K, V> = Option<Box<Node<K, V>>>;

impl<K: Ord, V> BstMap<K, V> {
    /// Creates an empty map.
    /// No memory is allocated until the first item is inserted.
    pub fn new() -> Self {
        Self {
            root: None,
            num_nodes: 0,
        }
    }

    /// Returns true if the map contains no elements.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of elements in the map.
    pub fn len(&self) -> usize {
        self.num_nodes
    }

    /// Returns the number of edges on the longest path from the root to a leaf.
    /// An empty map has height -1.
    pub fn height(&self) -> isize {
        map::structural_height(self.root.as_deref(), |node| {
            (node.left.as_deref(), node.right.as_deref())
        })
    }

    /// Clears the map, deallocating all memory.
    pub fn clear(&mut self) {
        self.release_nodes();
    }

    /// Returns a reference to the value corresponding to the key.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key).map(|node| &node.value)
    }

    /// Returns references to the key-value pair corresponding to the key.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.find(key).map(|node| (&node.key, &node.value))
    }

    /// Inserts a key-value pair into the map.
    /// Returns the previous value if the key was already present.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut link = &mut self.root;
        while let Some(node) = link {
            link = match key.cmp(&node.key) {
                Ordering::Equal => return Some(mem::replace(&mut node.value, value)),
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
            };
        }
        *link = Some(Node::create(key, value));
        self.num_nodes += 1;
        None
    }

    /// Gets an iterator over the entries of the map, sorted by key.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.root.as_deref(), self.num_nodes)
    }

    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        // Check order: in order traversal yields strictly ascending keys
        let mut num_nodes = 0;
        let mut previous: Option<&K> = None;
        for (key, _) in self.iter() {
            if let Some(previous) = previous {
                assert!(previous < key);
            }
            previous = Some(key);
            num_nodes += 1;
        }

        // Check children against their parent
        let mut pending: Vec<&Node<K, V>> = self.root.as_deref().into_iter().collect();
        while let Some(node) = pending.pop() {
            if let Some(left) = node.left.as_deref() {
                assert!(left.key < node.key);
                pending.push(left);
            }
            if let Some(right) = node.right.as_deref() {
                assert!(right.key > node.key);
                pending.push(right);
            }
        }

        // Check number of nodes
        assert_eq!(num_nodes, self.num_nodes);
    }

    #[cfg(test)]
    pub(crate) fn preorder_keys(&self) -> Vec<&K> {
        let mut keys = Vec::new();
        let mut pending: Vec<&Node<K, V>> = self.root.as_deref().into_iter().collect();
        while let Some(node) = pending.pop() {
            keys.push(&node.key);
            pending.extend(node.right.as_deref());
            pending.extend(node.left.as_deref());
        }
        keys
    }

    fn find(&self, key: &K) -> Option<&Node<K, V>> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Equal => break,
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            }
        }
        current
    }
}

impl<K: Ord, V> OrderedMap<K, V> for BstMap<K, V> {
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        BstMap::insert(self, key, value)
    }

    fn search(&self, key: &K) -> Option<&V> {
        self.get(key)
    }

    fn in_order(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_> {
        Box::new(self.iter())
    }

    fn height(&self) -> isize {
        BstMap::height(self)
    }

    fn len(&self) -> usize {
        self.num_nodes
    }
}

impl<K, V> BstMap<K, V> {
    // Unlinks nodes one by one, so that dropping a long chain does not recurse.
    fn release_nodes(&mut self) {
        let mut pending: Vec<Box<Node<K, V>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
        self.num_nodes = 0;
    }
}

impl<K, V> Drop for BstMap<K, V> {
    fn drop(&mut self) {
        self.release_nodes();
    }
}

impl<K: Ord, V> Default for BstMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug + Ord, V: fmt::Debug> fmt::Debug for BstMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Ord, V> Extend<(K, V)> for BstMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for BstMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<'a, K: Ord, V> IntoIterator for &'a BstMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> Node<K, V> {
    fn create(key: K, value: V) -> Box<Self> {
        Box::new(Node {
            key,
            value,
            left: None,
            right: None,
        })
    }
}

impl<'a, K, V> Iter<'a, K, V> {
    fn new(root: Option<&'a Node<K, V>>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.descend_left(root);
        iter
    }

    fn descend_left(&mut self, mut current: Option<&'a Node<K, V>>) {
        while let Some(node) = current {
            self.stack.push(node);
            current = node.left.as_deref();
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.descend_left(node.right.as_deref());
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}
