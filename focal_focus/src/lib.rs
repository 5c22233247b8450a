// Copyright 2025 the Focal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focal Focus: keyboard tab order over an interactive tree.
//!
//! This crate answers two questions for Tab / Shift+Tab navigation:
//! - **Which nodes are navigable, and in which order?** [`tab_order`] walks a tree
//!   breadth-first and returns the navigable nodes: positive tab indices first (ascending),
//!   then tab index zero in discovery order.
//! - **Where does one step go?** [`step_from`] moves one position in that list, and returns
//!   `None` once navigation runs off either end.
//!
//! The tree is read through the small [`TabTree`] trait, so any node handle works.
//!
//! ## Minimal example
//!
//! ```rust
//! use focal_focus::{Navigation, TabTree, step_from, tab_order};
//!
//! struct Flat {
//!     tab: Vec<Option<i32>>,
//!     children: Vec<Vec<usize>>,
//! }
//!
//! impl TabTree<usize> for Flat {
//!     fn tab_index(&self, node: usize) -> Option<i32> { self.tab[node] }
//!     fn is_interactive(&self, _: usize) -> bool { true }
//!     fn interactive_children(&self, _: usize) -> bool { true }
//!     fn children(&self, node: usize) -> &[usize] { &self.children[node] }
//! }
//!
//! let tree = Flat {
//!     tab: vec![None, Some(0), Some(2), Some(1)],
//!     children: vec![vec![1, 2, 3], vec![], vec![], vec![]],
//! };
//! let order = tab_order(&tree, 0, |_| false);
//! assert_eq!(order, vec![3, 2, 1]);
//!
//! assert_eq!(step_from(&order, None, Navigation::Next), Some(3));
//! assert_eq!(step_from(&order, Some(3), Navigation::Next), Some(2));
//! assert_eq!(step_from(&order, Some(1), Navigation::Next), None);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for dependencies.
//! - `libm`: `no_std` floating-point support for dependencies.
//! - `tree_adapter`: [`TabTree`] for `focal_tree::Tree` (see [`adapters`]).
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::collections::VecDeque;
use alloc::vec::Vec;

pub mod adapters;

/// Direction of linear focus navigation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Navigation {
    /// Move to the next candidate (Tab).
    Next,
    /// Move to the previous candidate (Shift+Tab).
    Prev,
}

impl Navigation {
    /// `Prev` when `backward` is set, `Next` otherwise.
    pub const fn from_shift(backward: bool) -> Self {
        if backward { Self::Prev } else { Self::Next }
    }
}

/// Read access to the parts of a tree that tab navigation depends on.
pub trait TabTree<K> {
    /// Tab index of `node`; `None` means the node never takes focus.
    fn tab_index(&self, node: K) -> Option<i32>;

    /// Whether `node` is interactive.
    fn is_interactive(&self, node: K) -> bool;

    /// Whether the children of `node` take part in navigation.
    fn interactive_children(&self, node: K) -> bool;

    /// Children of `node` in order.
    fn children(&self, node: K) -> &[K];
}

/// Whether `node` is a keyboard navigation target: interactive with a tab index of zero
/// or more.
pub fn is_tabbable<K: Copy>(tree: &impl TabTree<K>, node: K) -> bool {
    tree.tab_index(node).is_some_and(|t| t >= 0) && tree.is_interactive(node)
}

/// Navigable nodes of the subtree at `root`, in tab order.
///
/// The tree is walked breadth-first from `root`, descending only through nodes whose
/// children are interactive. Tabbable nodes with a positive tab index come first, sorted
/// ascending (ties keep discovery order), followed by the tab index zero nodes in
/// discovery order.
///
/// `include` marks extra nodes to list in the zero group even though they are not
/// tabbable themselves, for example hosts of embedded navigation contexts. Nodes that are
/// neither are skipped, but their children are still visited.
pub fn tab_order<K: Copy>(
    tree: &impl TabTree<K>,
    root: K,
    include: impl Fn(K) -> bool,
) -> Vec<K> {
    let mut queue = VecDeque::new();
    let mut zero = Vec::new();
    let mut positive = Vec::new();
    queue.push_back(root);

    while let Some(node) = queue.pop_front() {
        if is_tabbable(tree, node) {
            if tree.tab_index(node) == Some(0) {
                zero.push(node);
            } else {
                positive.push(node);
            }
        } else if include(node) {
            zero.push(node);
        }

        if tree.interactive_children(node) {
            queue.extend(tree.children(node).iter().copied());
        }
    }

    positive.sort_by_key(|&n| tree.tab_index(n));
    positive.extend(zero);
    positive
}

/// One navigation step through `order` starting at `current`.
///
/// With no `current`, or one that is not in `order`, navigation enters at the first
/// entry (`Next`) or the last entry (`Prev`). Stepping past either end yields `None`.
pub fn step_from<K: Copy + PartialEq>(
    order: &[K],
    current: Option<K>,
    direction: Navigation,
) -> Option<K> {
    let entry = match direction {
        Navigation::Next => order.first(),
        Navigation::Prev => order.last(),
    };
    let Some(index) = current.and_then(|c| order.iter().position(|&n| n == c)) else {
        return entry.copied();
    };
    let next = match direction {
        Navigation::Next => index.checked_add(1),
        Navigation::Prev => index.checked_sub(1),
    };
    next.and_then(|i| order.get(i)).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    /// root(0) -> { left_branch(1) -> left_leaf(3), right_branch(2) -> right_leaf(4) }
    struct Stand {
        tab: Vec<Option<i32>>,
        interactive: Vec<bool>,
        interactive_children: Vec<bool>,
        children: Vec<Vec<usize>>,
    }

    impl Stand {
        fn new() -> Self {
            Self {
                tab: vec![None; 5],
                interactive: vec![true; 5],
                interactive_children: vec![true; 5],
                children: vec![vec![1, 2], vec![3], vec![4], vec![], vec![]],
            }
        }
    }

    impl TabTree<usize> for Stand {
        fn tab_index(&self, node: usize) -> Option<i32> {
            self.tab[node]
        }
        fn is_interactive(&self, node: usize) -> bool {
            self.interactive[node]
        }
        fn interactive_children(&self, node: usize) -> bool {
            self.interactive_children[node]
        }
        fn children(&self, node: usize) -> &[usize] {
            &self.children[node]
        }
    }

    #[test]
    fn positive_indices_precede_zero_group() {
        let mut stand = Stand::new();
        stand.tab = vec![Some(3), Some(0), Some(-1), Some(1), Some(0)];
        let order = tab_order(&stand, 0, |_| false);
        assert_eq!(order, vec![3, 0, 1, 4], "right branch (-1) is excluded");

        let mut walk = Vec::new();
        let mut cur = Some(3);
        while let Some(c) = step_from(&order, cur, Navigation::Next) {
            walk.push(c);
            cur = Some(c);
        }
        assert_eq!(walk, vec![0, 1, 4]);
        assert_eq!(step_from(&order, Some(4), Navigation::Next), None);
    }

    #[test]
    fn equal_positive_indices_keep_discovery_order() {
        let mut stand = Stand::new();
        stand.tab = vec![None, Some(2), Some(2), Some(1), Some(2)];
        assert_eq!(tab_order(&stand, 0, |_| false), vec![3, 1, 2, 4]);
    }

    #[test]
    fn interactivity_gates_membership_and_descent() {
        let mut stand = Stand::new();
        stand.tab = vec![Some(0); 5];
        stand.interactive[1] = false;
        stand.interactive_children[2] = false;
        assert_eq!(tab_order(&stand, 0, |_| false), vec![0, 2, 3]);
    }

    #[test]
    fn included_nodes_join_zero_group() {
        let mut stand = Stand::new();
        stand.tab = vec![Some(0), None, Some(0), None, Some(1)];
        assert_eq!(tab_order(&stand, 0, |n| n == 1), vec![4, 0, 1, 2]);
    }

    #[test]
    fn step_from_enters_at_ends() {
        let order = [10, 20, 30];
        assert_eq!(step_from(&order, None, Navigation::Next), Some(10));
        assert_eq!(step_from(&order, None, Navigation::Prev), Some(30));
        assert_eq!(step_from(&order, Some(99), Navigation::Prev), Some(30));
        assert_eq!(step_from(&order, Some(20), Navigation::Prev), Some(10));
        assert_eq!(step_from(&order, Some(10), Navigation::Prev), None);
        assert_eq!(step_from::<u32>(&[], None, Navigation::Next), None);
    }
}
