//! Bulk value transforms that keep keys and shape.

use super::node::{Link, Parts, Tree};
use arrayvec::ArrayVec;

fn map_link<K, V, W, F>(link: &Link<K, V>, function: &mut F) -> Link<K, W>
where
    K: Clone,
    F: FnMut(&K, &V) -> W,
{
    let Some(node) = link.view() else {
        return Link::Empty;
    };
    let mut parts = Parts {
        keys: node.keys.iter().cloned().collect(),
        values: ArrayVec::new(),
        children: ArrayVec::new(),
    };
    for (slot, (key, value)) in node.keys.iter().zip(node.values).enumerate() {
        parts.children.push(map_link(&node.children[slot], function));
        parts.values.push(function(key, value));
    }
    parts
        .children
        .push(map_link(&node.children[node.keys.len()], function));
    parts.into_link()
}

impl<K: Clone, V: Clone> Link<K, V> {
    pub(crate) fn map_values_in_place<F>(&mut self, function: &mut F)
    where
        F: FnMut(&K, &V) -> V,
    {
        let Some(node) = self.view_mut() else {
            return;
        };
        let last = node.keys.len();
        for slot in 0..last {
            node.children[slot].map_values_in_place(function);
            let value = function(&node.keys[slot], &node.values[slot]);
            node.values[slot] = value;
        }
        node.children[last].map_values_in_place(function);
    }
}

impl<K: Clone, V> Tree<K, V> {
    /// Builds a tree with the same keys and shape whose values are
    /// `function(key, value)`.
    ///
    /// `function` is called once per entry in ascending key order. The result
    /// shares no nodes with `self`. Extra arguments are captured by the
    /// closure.
    ///
    /// # Complexity
    ///
    /// O(N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tree234::tree::{NaturalOrder, Tree};
    ///
    /// let tree: Tree<&str, i32> = [("a", 1), ("b", 2)].into_iter().collect();
    /// let offset = 100;
    /// let shifted = tree.map(|_, value| value + offset);
    ///
    /// assert_eq!(shifted.search(&"b", &NaturalOrder), Some(&102));
    /// assert_eq!(tree.search(&"b", &NaturalOrder), Some(&2)); // Source unchanged
    /// ```
    #[must_use]
    pub fn map<W, F>(&self, mut function: F) -> Tree<K, W>
    where
        F: FnMut(&K, &V) -> W,
    {
        Tree {
            root: map_link(&self.root, &mut function),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::NaturalOrder;
    use super::super::node::node_addresses;
    use super::*;
    use rstest::rstest;

    fn shape<K, V>(link: &Link<K, V>) -> Vec<usize> {
        let mut arities = vec![link.arity()];
        if let Some(node) = link.view() {
            for child in node.children {
                arities.extend(shape(child));
            }
        }
        arities
    }

    #[rstest]
    fn test_map_keeps_keys_and_shape() {
        let tree: Tree<i32, i32> = (0..200).map(|key| (key, key)).collect();
        let mapped = tree.map(|key, value| format!("{key}:{}", value * 2));
        assert_eq!(shape(&tree.root), shape(&mapped.root));
        assert_eq!(mapped.search(&7, &NaturalOrder), Some(&"7:14".to_string()));
        assert_eq!(mapped.size(), 200);
    }

    #[rstest]
    fn test_map_visits_in_ascending_order() {
        let tree: Tree<i32, ()> = [5, 1, 9, 3, 7, 2].into_iter().map(|key| (key, ())).collect();
        let mut visited = Vec::new();
        let _ = tree.map(|key, _| visited.push(*key));
        assert_eq!(visited, vec![1, 2, 3, 5, 7, 9]);
    }

    #[rstest]
    fn test_map_shares_nothing() {
        let tree: Tree<i32, i32> = (0..50).map(|key| (key, key)).collect();
        let mapped = tree.map(|_, value| *value);
        let original = node_addresses(&tree.root);
        assert!(
            node_addresses(&mapped.root)
                .iter()
                .all(|address| !original.contains(address))
        );
    }

    #[rstest]
    fn test_map_empty() {
        let tree: Tree<i32, i32> = Tree::new();
        assert!(tree.map(|_, value| value + 1).is_empty());
    }

    #[rstest]
    fn test_map_values_in_place_keeps_unique_nodes() {
        let tree: Tree<i32, i32> = (0..50).map(|key| (key, key)).collect();
        let mut root = tree.root;
        let before = node_addresses(&root);
        root.map_values_in_place(&mut |_, value| value * 10);
        assert_eq!(node_addresses(&root), before);
        assert_eq!(
            Tree { root }.search(&21, &NaturalOrder),
            Some(&210)
        );
    }
}
