//! An ordered map implemented with an AVL tree.

use std::cmp::{self, Ordering};
use std::fmt;
use std::iter::FusedIterator;
use std::mem;

use crate::map::{self, OrderedMap};

/// An ordered map implemented with an AVL tree.
///
/// ```
/// use schedule_tree::AvlTreeMap;
/// let mut map = AvlTreeMap::new();
/// map.insert("A", 1);
/// map.insert("B", 2);
/// map.insert("C", 3);
/// assert_eq!(map.get(&"B"), Some(&2));
/// assert_eq!(map.height(), 1);
/// ```
pub struct AvlTreeMap<K, V> {
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
    height: isize,
}

type Link<K, V> = Option<Box<Node<K, V>>>;

// Where an insertion went, as seen from one node on the search path.
enum Descent<V> {
    Replaced(V),
    Placed(Side),
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Side {
    Here,
    Left,
    Right,
}

impl<K: Ord, V> AvlTreeMap<K, V> {
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
    ///
    /// The height is measured on the tree structure.
    /// Heights cached in the nodes for rebalancing are not consulted.
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
        match Self::insert_at(&mut self.root, key, value) {
            Descent::Replaced(old_value) => Some(old_value),
            Descent::Placed(_) => {
                self.num_nodes += 1;
                None
            }
        }
    }

    /// Gets an iterator over the entries of the map, sorted by key.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.root.as_deref(), self.num_nodes)
    }

    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        // Check order: in order traversal yields strictly ascending keys
        let mut previous: Option<&K> = None;
        for (key, _) in self.iter() {
            if let Some(previous) = previous {
                assert!(previous < key);
            }
            previous = Some(key);
        }

        // Check tree nodes
        let mut num_nodes = 0;
        let mut pending: Vec<&Node<K, V>> = self.root.as_deref().into_iter().collect();
        while let Some(node) = pending.pop() {
            let left_height = Node::height_of(&node.left);
            let right_height = Node::height_of(&node.right);

            // Check links to child nodes
            if let Some(left) = node.left.as_deref() {
                assert!(left.key < node.key);
                pending.push(left);
            }
            if let Some(right) = node.right.as_deref() {
                assert!(right.key > node.key);
                pending.push(right);
            }

            // Check cached height
            assert_eq!(node.height, 1 + cmp::max(left_height, right_height));

            // Check AVL condition (nearly balance)
            assert!(left_height <= right_height + 1);
            assert!(right_height <= left_height + 1);

            num_nodes += 1;
        }

        // Check cached height of the root against the structure
        assert_eq!(Node::height_of(&self.root), self.height());

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

    /// Inserts below `link` and restores the AVL condition on the way back up.
    /// Recursion depth is bounded by the height of the tree.
    fn insert_at(link: &mut Link<K, V>, key: K, value: V) -> Descent<V> {
        let node = match link {
            None => {
                *link = Some(Node::create(key, value));
                return Descent::Placed(Side::Here);
            }
            Some(node) => node,
        };

        let (side, below) = match key.cmp(&node.key) {
            Ordering::Equal => return Descent::Replaced(mem::replace(&mut node.value, value)),
            Ordering::Less => (Side::Left, Self::insert_at(&mut node.left, key, value)),
            Ordering::Greater => (Side::Right, Self::insert_at(&mut node.right, key, value)),
        };
        // The side taken below the child tells how the new key compares to the child's key.
        let below = match below {
            Descent::Replaced(old_value) => return Descent::Replaced(old_value),
            Descent::Placed(below) => below,
        };

        node.adjust_height();
        let balance = node.balance_factor();
        if balance > 1 {
            if below == Side::Right {
                Self::rotate_left(&mut node.left);
            }
            Self::rotate_right(link);
        } else if balance < -1 {
            if below == Side::Left {
                Self::rotate_right(&mut node.right);
            }
            Self::rotate_left(link);
        }
        Descent::Placed(side)
    }

    fn rotate_left(link: &mut Link<K, V>) {
        let Some(mut node) = link.take() else {
            return;
        };
        let Some(mut right) = node.right.take() else {
            *link = Some(node);
            return;
        };
        node.right = right.left.take();
        node.adjust_height();
        right.left = Some(node);
        right.adjust_height();
        *link = Some(right);
    }

    fn rotate_right(link: &mut Link<K, V>) {
        let Some(mut node) = link.take() else {
            return;
        };
        let Some(mut left) = node.left.take() else {
            *link = Some(node);
            return;
        };
        node.left = left.right.take();
        node.adjust_height();
        left.right = Some(node);
        left.adjust_height();
        *link = Some(left);
    }
}

impl<K: Ord, V> OrderedMap<K, V> for AvlTreeMap<K, V> {
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        AvlTreeMap::insert(self, key, value)
    }

    fn search(&self, key: &K) -> Option<&V> {
        self.get(key)
    }

    fn in_order(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_> {
        Box::new(self.iter())
    }

    fn height(&self) -> isize {
        AvlTreeMap::height(self)
    }

    fn len(&self) -> usize {
        self.num_nodes
    }
}

impl<K, V> AvlTreeMap<K, V> {
    fn release_nodes(&mut self) {
        let mut pending: Vec<Box<Node<K, V>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
        self.num_nodes = 0;
    }
}

impl<K, V> Drop for AvlTreeMap<K, V> {
    fn drop(&mut self) {
        self.release_nodes();
    }
}

impl<K: Ord, V> Default for AvlTreeMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug + Ord, V: fmt::Debug> fmt::Debug for AvlTreeMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Ord, V> Extend<(K, V)> for AvlTreeMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for AvlTreeMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<'a, K: Ord, V> IntoIterator for &'a AvlTreeMap<K, V> {
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
            height: 0,
        })
    }

    fn height_of(link: &Link<K, V>) -> isize {
        link.as_ref().map_or(-1, |node| node.height)
    }

    fn adjust_height(&mut self) {
        self.height = 1 + cmp::max(Self::height_of(&self.left), Self::height_of(&self.right));
    }

    fn balance_factor(&self) -> isize {
        Self::height_of(&self.left) - Self::height_of(&self.right)
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
