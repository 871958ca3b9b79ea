//! Structural invariant checking.

use super::compare::Comparator;
use super::error::InvariantViolation;
use super::node::{Link, Tree};
use std::cmp::Ordering;

struct Bounds<'a, K> {
    lower: Option<&'a K>,
    upper: Option<&'a K>,
}

impl<K, V> Tree<K, V> {
    /// Checks every structural invariant and returns the tree's depth.
    ///
    /// The checks are: keys strictly increasing within each node and
    /// bracketed by the parent's keys, children of a node either all empty
    /// or all non-empty, and all leaves at the same depth. The first
    /// violation found is reported.
    ///
    /// # Errors
    ///
    /// Returns an [`InvariantViolation`] describing the first defect.
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
    /// let tree: Tree<i32, ()> = (0..1000).map(|key| (key, ())).collect();
    /// assert_eq!(tree.validate(&NaturalOrder), Ok(tree.depth()));
    /// ```
    pub fn validate<C>(&self, comparator: &C) -> Result<usize, InvariantViolation>
    where
        C: Comparator<K> + ?Sized,
    {
        let bounds = Bounds {
            lower: None,
            upper: None,
        };
        check(&self.root, &bounds, 0, comparator)
    }
}

fn check<K, V, C>(
    link: &Link<K, V>,
    bounds: &Bounds<'_, K>,
    level: usize,
    comparator: &C,
) -> Result<usize, InvariantViolation>
where
    C: Comparator<K> + ?Sized,
{
    let Some(node) = link.view() else {
        return Ok(0);
    };
    let less = |left: &K, right: &K| comparator.compare(left, right) == Ordering::Less;

    let increasing = node.keys.windows(2).all(|pair| less(&pair[0], &pair[1]));
    let first = &node.keys[0];
    let last = &node.keys[node.keys.len() - 1];
    let bracketed = bounds.lower.is_none_or(|lower| less(lower, first))
        && bounds.upper.is_none_or(|upper| less(last, upper));
    if !(increasing && bracketed) {
        return Err(InvariantViolation::UnorderedKeys { level });
    }

    let leaf = node.is_leaf();
    if node.children.iter().any(|child| child.is_empty() != leaf) {
        return Err(InvariantViolation::MixedLeafChildren { level });
    }

    let mut expected = None;
    for (index, child) in node.children.iter().enumerate() {
        let child_bounds = Bounds {
            lower: index.checked_sub(1).map_or(bounds.lower, |slot| Some(&node.keys[slot])),
            upper: node.keys.get(index).or(bounds.upper),
        };
        let found = check(child, &child_bounds, level + 1, comparator)?;
        match expected {
            None => expected = Some(found),
            Some(expected) if expected != found => {
                return Err(InvariantViolation::UnevenLeafDepth {
                    level,
                    expected,
                    found,
                });
            }
            Some(_) => {}
        }
    }
    Ok(expected.unwrap_or(0) + 1)
}
