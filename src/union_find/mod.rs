//! Union–find over the points of a domain, used to collect the orbits of a
//! set of permutations.

use std::{cell::Cell, ops::Index};

/// A point of the domain, seen as a node of the parent–pointer forest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParentPointer(pub usize);

/// Slot of a set's associated data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SetIndex(pub usize);

/// A node in the union–find forest.
///
/// - `Root { set_data_idx, rank }` means this node is a root and stores its
///   union–by–rank value and the slot of the set's data.
/// - `Child(parent)` means this node is not a root; it points to its parent.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UFNode {
    Root { set_data_idx: SetIndex, rank: usize },
    Child(ParentPointer),
}

/// Union–find over `0..n` where every set carries data `U`.
///
/// Internally:
/// - The parent–pointer forest is a `Vec<Cell<UFNode>>` so that `find` can
///   compress paths through a shared reference.
/// - Set data is kept compact: merging two sets frees the loser's slot by
///   swap removal, so `set_data.len()` is always the number of sets.
pub struct UnionFind<U> {
    nodes: Vec<Cell<UFNode>>,
    set_data: Vec<Option<U>>,
    /// For each slot in `set_data`, the root that owns it.
    data_to_node: Vec<ParentPointer>,
}

impl<U> UnionFind<U> {
    /// Creates a union–find with one singleton set per entry of `associated`.
    pub fn new(associated: Vec<U>) -> Self {
        let n = associated.len();
        let nodes = (0..n)
            .map(|i| {
                Cell::new(UFNode::Root {
                    set_data_idx: SetIndex(i),
                    rank: 0,
                })
            })
            .collect();
        Self {
            nodes,
            set_data: associated.into_iter().map(Some).collect(),
            data_to_node: (0..n).map(ParentPointer).collect(),
        }
    }

    /// Number of disjoint sets.
    pub fn n_sets(&self) -> usize {
        self.set_data.len()
    }

    /// Finds the root of the set containing `x`, compressing the path on the way.
    pub fn find(&self, x: ParentPointer) -> ParentPointer {
        match self[x].get() {
            UFNode::Root { .. } => x,
            UFNode::Child(parent) => {
                let root = self.find(parent);
                self[x].set(UFNode::Child(root));
                root
            }
        }
    }

    /// Returns the data of the set containing `x`.
    #[cfg(test)]
    pub(crate) fn find_data(&self, x: ParentPointer) -> &U {
        let (_, set_data_idx) = self.root_parts(self.find(x));
        self.set_data[set_data_idx.0]
            .as_ref()
            .expect("root owns its data")
    }

    fn root_parts(&self, root: ParentPointer) -> (usize, SetIndex) {
        match self[root].get() {
            UFNode::Root { rank, set_data_idx } => (rank, set_data_idx),
            UFNode::Child(_) => unreachable!("expected a root"),
        }
    }

    /// Merges the sets containing `x` and `y`, combining their data with `merge(winner, loser)`.
    ///
    /// The winner is chosen by rank. Returns the root of the merged set.
    pub fn union<F>(&mut self, x: ParentPointer, y: ParentPointer, merge: F) -> ParentPointer
    where
        F: FnOnce(U, U) -> U,
    {
        let root_x = self.find(x);
        let root_y = self.find(y);
        if root_x == root_y {
            return root_x;
        }

        let (rank_x, data_idx_x) = self.root_parts(root_x);
        let (rank_y, data_idx_y) = self.root_parts(root_y);

        let (winner, loser, winner_data_idx, loser_data_idx) = if rank_x < rank_y {
            (root_y, root_x, data_idx_y, data_idx_x)
        } else {
            (root_x, root_y, data_idx_x, data_idx_y)
        };

        if rank_x == rank_y {
            self[winner].set(UFNode::Root {
                set_data_idx: winner_data_idx,
                rank: rank_x + 1,
            });
        }
        self[loser].set(UFNode::Child(winner));

        let merged = merge(
            self.set_data[winner_data_idx.0]
                .take()
                .expect("root owns its data"),
            self.set_data[loser_data_idx.0]
                .take()
                .expect("root owns its data"),
        );
        self.set_data[winner_data_idx.0] = Some(merged);

        // Free the loser's slot, moving the last slot into it.
        let last_idx = self.set_data.len() - 1;
        if loser_data_idx.0 != last_idx {
            self.set_data.swap(loser_data_idx.0, last_idx);
            self.data_to_node.swap(loser_data_idx.0, last_idx);
            let moved = self.data_to_node[loser_data_idx.0];
            let (rank, _) = self.root_parts(moved);
            self[moved].set(UFNode::Root {
                set_data_idx: loser_data_idx,
                rank,
            });
        }
        self.set_data.pop();
        self.data_to_node.pop();

        winner
    }

    /// Consumes the union–find, returning the data of every set.
    pub fn into_set_data(self) -> Vec<U> {
        self.set_data.into_iter().flatten().collect()
    }
}

impl<U> Index<ParentPointer> for UnionFind<U> {
    type Output = Cell<UFNode>;
    fn index(&self, index: ParentPointer) -> &Self::Output {
        &self.nodes[index.0]
    }
}
