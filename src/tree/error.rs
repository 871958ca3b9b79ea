//! Error types for the tree engine.
//!
//! Absence is never an error: lookups and deletions of missing keys return
//! `None`. The only reportable error is an [`InvariantViolation`] found by
//! [`Tree::validate`](super::Tree::validate). Broken internal contracts
//! (a node with an impossible arity, advancing an exhausted cursor) are
//! fatal and panic immediately.

use std::fmt;

/// A structural defect found while validating a tree.
///
/// `level` counts node levels from the root, which is level 0.
///
/// # Examples
///
/// ```rust
/// use tree234::tree::InvariantViolation;
///
/// let error = InvariantViolation::UnevenLeafDepth {
///     level: 1,
///     expected: 2,
///     found: 1,
/// };
/// assert_eq!(
///     format!("{error}"),
///     "subtree heights differ below level 1: expected 2, found 1"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Keys of a node are not strictly increasing, or fall outside the range
    /// bracketed by the parent's keys.
    UnorderedKeys {
        /// Level of the offending node.
        level: usize,
    },
    /// A node has both empty and non-empty children.
    MixedLeafChildren {
        /// Level of the offending node.
        level: usize,
    },
    /// Sibling subtrees have different heights.
    UnevenLeafDepth {
        /// Level of the parent whose children disagree.
        level: usize,
        /// Height of the first child.
        expected: usize,
        /// Height of the disagreeing child.
        found: usize,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnorderedKeys { level } => {
                write!(formatter, "keys out of order at level {level}")
            }
            Self::MixedLeafChildren { level } => {
                write!(formatter, "node at level {level} mixes empty and non-empty children")
            }
            Self::UnevenLeafDepth {
                level,
                expected,
                found,
            } => write!(
                formatter,
                "subtree heights differ below level {level}: expected {expected}, found {found}"
            ),
        }
    }
}

impl std::error::Error for InvariantViolation {}

/// Aborts on a broken internal contract.
///
/// Continuing would leave an unbalanced or inconsistent tree behind, so the
/// engine never recovers from these.
#[cold]
#[inline(never)]
#[track_caller]
pub(crate) fn contract_violation(detail: fmt::Arguments<'_>) -> ! {
    #[cfg(feature = "tracing")]
    tracing::error!(detail = %detail, "tree contract violated");
    panic!("tree contract violated: {detail}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(InvariantViolation::UnorderedKeys { level: 3 }, "keys out of order at level 3")]
    #[case(
        InvariantViolation::MixedLeafChildren { level: 0 },
        "node at level 0 mixes empty and non-empty children"
    )]
    fn test_display(#[case] error: InvariantViolation, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    fn test_is_std_error() {
        let error: Box<dyn std::error::Error> =
            Box::new(InvariantViolation::UnorderedKeys { level: 0 });
        assert_eq!(error.to_string(), "keys out of order at level 0");
    }

    #[rstest]
    #[should_panic(expected = "tree contract violated: node with 4 keys")]
    fn test_contract_violation_panics() {
        contract_violation(format_args!("node with {} keys", 4));
    }
}
