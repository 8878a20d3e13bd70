//! Move ordering for the adversarial search.
//!
//! Ordering only changes how much of the tree gets pruned, never the value
//! or the move the search settles on. Comparators are handed to the search
//! explicitly; there is no process-wide ordering.

use harvest_core::{GameNode, GameState};
use std::cmp::Ordering;

/// Built-in orderings, selectable from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MoveOrdering {
    /// Highest static utility first.
    #[default]
    ByUtility,
    /// Keep the order in which the game generated the successors.
    Unordered,
}

impl MoveOrdering {
    pub fn compare<S: GameState>(self, a: &GameNode<S>, b: &GameNode<S>) -> Ordering {
        match self {
            MoveOrdering::ByUtility => by_utility_desc(a, b),
            MoveOrdering::Unordered => Ordering::Equal,
        }
    }
}

/// Sorts by static utility, descending.
pub fn by_utility_desc<S: GameState>(a: &GameNode<S>, b: &GameNode<S>) -> Ordering {
    b.utility().total_cmp(&a.utility())
}

/// Leaves successors in generation order.
pub fn unordered<S: GameState>(_: &GameNode<S>, _: &GameNode<S>) -> Ordering {
    Ordering::Equal
}

/// Stable sort of `children` with `compare`.
pub fn order_children<S, F>(children: &mut [GameNode<S>], compare: F)
where
    S: GameState,
    F: Fn(&GameNode<S>, &GameNode<S>) -> Ordering,
{
    children.sort_by(|a, b| compare(a, b));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct Leaf(f64);

    impl GameState for Leaf {
        type Action = usize;

        fn is_terminal(&self) -> bool {
            true
        }

        fn utility(&self) -> f64 {
            self.0
        }

        fn children(&self) -> Vec<(usize, Leaf)> {
            Vec::new()
        }
    }

    fn nodes(values: &[f64]) -> Vec<GameNode<Leaf>> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| GameNode::child(i, Leaf(v)))
            .collect()
    }

    fn actions(nodes: &[GameNode<Leaf>]) -> Vec<usize> {
        nodes.iter().map(|n| *n.action().unwrap()).collect()
    }

    #[test]
    fn test_by_utility_descending_and_stable() {
        let mut children = nodes(&[1.0, 5.0, 3.0, 5.0]);
        order_children(&mut children, by_utility_desc);
        assert_eq!(actions(&children), vec![1, 3, 2, 0]);
    }

    #[test]
    fn test_unordered_keeps_generation_order() {
        let mut children = nodes(&[1.0, 5.0, 3.0]);
        order_children(&mut children, unordered);
        assert_eq!(actions(&children), vec![0, 1, 2]);
    }

    #[test]
    fn test_enum_dispatch() {
        let mut children = nodes(&[2.0, -1.0, 4.0]);
        order_children(&mut children, |a, b| MoveOrdering::ByUtility.compare(a, b));
        assert_eq!(actions(&children), vec![2, 0, 1]);
    }
}
