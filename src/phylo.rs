//! Unrooted phylogenetic trees built from leaf splits
//!
//! A tree over `L` leaves starts as a star: leaves `0..L` joined to a centre
//! vertex `L`. Each split (a set of leaves) then refines the tree: the first
//! internal vertex that has more than one, but not all but one, of its edges
//! leading only to leaves of the split gets a new child vertex, and those
//! edges move over to the child. New vertices are numbered from `L + 1` in
//! the order they are created.

use std::collections::BTreeSet;

use thiserror::Error;
use tracing::debug;

use crate::error::ShapeError;
use crate::matrix::AdjacencyMatrix;

/// Errors that can occur when building a tree
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TreeError {
    #[error("a tree needs at least {required} leaves, got {found}")]
    TooFewLeaves { required: usize, found: usize },

    #[error("split mentions leaf {leaf} but the tree has {num_leaves} leaves")]
    LeafOutOfRange { leaf: usize, num_leaves: usize },

    #[error("line {line}: '{text}' is not a leaf index")]
    InvalidLeaf { line: usize, text: String },

    #[error(transparent)]
    Shape(#[from] ShapeError),
}

/// Smallest tree worth drawing: two leaves on a centre vertex
pub const MIN_LEAVES: usize = 2;

/// An unrooted tree given by its leaf splits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhylogeneticTree {
    num_leaves: usize,
    splits: Vec<BTreeSet<usize>>,
    neighbors: Vec<BTreeSet<usize>>,
}

impl PhylogeneticTree {
    /// Build the tree for `splits` over leaves `0..num_leaves`.
    ///
    /// Splits that do not refine the current tree are skipped.
    pub fn new(splits: &[Vec<usize>], num_leaves: usize) -> Result<Self, TreeError> {
        if num_leaves < MIN_LEAVES {
            return Err(TreeError::TooFewLeaves {
                required: MIN_LEAVES,
                found: num_leaves,
            });
        }
        let splits: Vec<BTreeSet<usize>> = splits
            .iter()
            .map(|split| split.iter().copied().collect())
            .collect();
        if let Some(&leaf) = splits.iter().flatten().find(|&&leaf| leaf >= num_leaves) {
            return Err(TreeError::LeafOutOfRange { leaf, num_leaves });
        }

        let mut tree = Self {
            num_leaves,
            splits: Vec::new(),
            neighbors: vec![BTreeSet::new(); num_leaves + 1],
        };
        for leaf in 0..num_leaves {
            tree.connect(leaf, num_leaves);
        }
        for split in &splits {
            if !tree.add_split(split) {
                debug!(?split, "split does not refine the tree, skipping");
            }
        }
        tree.splits = splits;
        Ok(tree)
    }

    pub fn num_leaves(&self) -> usize {
        self.num_leaves
    }

    pub fn splits(&self) -> &[BTreeSet<usize>] {
        &self.splits
    }

    /// Total number of vertices, leaves included
    pub fn node_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Vertices with exactly one neighbour
    pub fn leaf_nodes(&self) -> Vec<usize> {
        (0..self.node_count())
            .filter(|&v| self.neighbors[v].len() == 1)
            .collect()
    }

    /// Symmetric adjacency matrix of the tree, vertices in numbering order
    pub fn adjacency_matrix(&self) -> Result<AdjacencyMatrix, TreeError> {
        let edges = self
            .neighbors
            .iter()
            .enumerate()
            .flat_map(|(v, ns)| ns.iter().map(move |&u| (v, u)));
        Ok(AdjacencyMatrix::from_edges(self.node_count(), edges)?)
    }

    fn connect(&mut self, a: usize, b: usize) {
        self.neighbors[a].insert(b);
        self.neighbors[b].insert(a);
    }

    fn disconnect(&mut self, a: usize, b: usize) {
        self.neighbors[a].remove(&b);
        self.neighbors[b].remove(&a);
    }

    /// Refine the first internal vertex compatible with `split`; returns
    /// whether the tree changed
    fn add_split(&mut self, split: &BTreeSet<usize>) -> bool {
        for vertex in self.num_leaves..self.node_count() {
            let Some(moved) = self.compatible_edges(vertex, split) else {
                continue;
            };
            let child = self.node_count();
            self.neighbors.push(BTreeSet::new());
            for other in moved {
                self.disconnect(vertex, other);
                self.connect(other, child);
            }
            self.connect(vertex, child);
            debug!(vertex, child, "split refined tree");
            return true;
        }
        false
    }

    /// Neighbours of `vertex` whose side of the tree holds only leaves of
    /// `split`, if moving them off `vertex` is a real refinement
    fn compatible_edges(&self, vertex: usize, split: &BTreeSet<usize>) -> Option<Vec<usize>> {
        let degree = self.neighbors[vertex].len();
        let compatible: Vec<usize> = self.neighbors[vertex]
            .iter()
            .copied()
            .filter(|&other| {
                self.leaves_beyond(vertex, other)
                    .iter()
                    .all(|leaf| split.contains(leaf))
            })
            .collect();
        (compatible.len() > 1 && compatible.len() + 1 < degree).then_some(compatible)
    }

    /// Leaves reachable from `start` without crossing the edge to `from`
    fn leaves_beyond(&self, from: usize, start: usize) -> Vec<usize> {
        let mut leaves = Vec::new();
        let mut stack = vec![(from, start)];
        while let Some((parent, v)) = stack.pop() {
            if v < self.num_leaves {
                leaves.push(v);
            }
            stack.extend(
                self.neighbors[v]
                    .iter()
                    .filter(|&&u| u != parent)
                    .map(|&u| (v, u)),
            );
        }
        leaves
    }
}

/// Read one split per line, leaves separated by commas or whitespace.
///
/// Blank lines and lines starting with `#` are ignored.
pub fn parse_splits(text: &str) -> Result<Vec<Vec<usize>>, TreeError> {
    let mut splits = Vec::new();
    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let split = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse().map_err(|_| TreeError::InvalidLeaf {
                    line: number + 1,
                    text: s.to_string(),
                })
            })
            .collect::<Result<Vec<usize>, _>>()?;
        splits.push(split);
    }
    Ok(splits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn edges(tree: &PhylogeneticTree) -> Vec<(usize, usize)> {
        tree.adjacency_matrix().unwrap().undirected_edges()
    }

    #[test]
    fn test_star_without_splits() {
        let tree = PhylogeneticTree::new(&[], 4).unwrap();
        assert_eq!(tree.node_count(), 5);
        assert_eq!(edges(&tree), vec![(0, 4), (1, 4), (2, 4), (3, 4)]);
        assert_eq!(tree.leaf_nodes(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_quartet_split() {
        let tree = PhylogeneticTree::new(&[vec![0, 1]], 4).unwrap();
        assert_eq!(tree.node_count(), 6);
        assert_eq!(edges(&tree), vec![(0, 5), (1, 5), (2, 4), (3, 4), (4, 5)]);
        assert_eq!(tree.leaf_nodes(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_nested_splits() {
        let tree = PhylogeneticTree::new(&[vec![0, 1, 2], vec![0, 1]], 5).unwrap();
        assert_eq!(tree.node_count(), 8);
        assert_eq!(
            edges(&tree),
            vec![(0, 7), (1, 7), (2, 6), (3, 5), (4, 5), (5, 6), (6, 7)]
        );
        let matrix = tree.adjacency_matrix().unwrap();
        assert!(matrix.is_symmetric());
        assert_eq!(matrix.self_loops().count(), 0);
    }

    #[test]
    fn test_trivial_split_is_skipped() {
        // A single leaf or all but one leaf never refine the tree
        let tree = PhylogeneticTree::new(&[vec![2], vec![0, 1, 2]], 4).unwrap();
        assert_eq!(tree.node_count(), 5);
        assert_eq!(tree.splits().len(), 2);
    }

    #[test]
    fn test_leaf_out_of_range() {
        let err = PhylogeneticTree::new(&[vec![0, 7]], 4).unwrap_err();
        assert_eq!(
            err,
            TreeError::LeafOutOfRange {
                leaf: 7,
                num_leaves: 4
            }
        );
    }

    #[test]
    fn test_too_few_leaves() {
        assert!(matches!(
            PhylogeneticTree::new(&[], 1),
            Err(TreeError::TooFewLeaves { .. })
        ));
    }

    #[test]
    fn test_parse_splits() {
        let splits = parse_splits("0,1\n\n# comment\n2, 3 4\n").unwrap();
        assert_eq!(splits, vec![vec![0, 1], vec![2, 3, 4]]);
    }

    #[test]
    fn test_parse_splits_rejects_garbage() {
        let err = parse_splits("0,1\n2,x\n").unwrap_err();
        assert_eq!(
            err,
            TreeError::InvalidLeaf {
                line: 2,
                text: "x".to_string()
            }
        );
    }
}
