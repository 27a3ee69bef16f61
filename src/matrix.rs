//! Binary square adjacency matrices
//!
//! Entry `(i, j)` set means an edge from node `i` to node `j`; diagonal
//! entries are self-loops. Construction validates the shape, so every
//! `AdjacencyMatrix` in circulation is square, binary and has at least two
//! nodes.

use crate::error::ShapeError;

/// Minimum number of nodes accepted
pub const MIN_NODES: usize = 2;

/// A validated, binarized square adjacency matrix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyMatrix {
    size: usize,
    cells: Vec<bool>,
}

impl AdjacencyMatrix {
    /// Build from numeric rows, binarizing every entry (nonzero becomes 1)
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, ShapeError> {
        let size = rows.len();
        let cols = rows.first().map(|r| r.len()).unwrap_or(0);

        for (row, values) in rows.iter().enumerate() {
            if values.len() != cols {
                return Err(ShapeError::RaggedRow {
                    row,
                    expected: cols,
                    found: values.len(),
                });
            }
        }
        if cols != size {
            return Err(ShapeError::NotSquare { rows: size, cols });
        }
        if size < MIN_NODES {
            return Err(ShapeError::TooSmall { size });
        }

        let cells = rows
            .iter()
            .flat_map(|r| r.iter().map(|v| *v != 0.0))
            .collect();
        Ok(Self { size, cells })
    }

    /// Build from a flat row-major list of `n * n` values
    pub fn from_flat(values: &[f64]) -> Result<Self, ShapeError> {
        let size = integer_sqrt(values.len());
        if size * size != values.len() {
            return Err(ShapeError::NotPerfectSquare {
                count: values.len(),
            });
        }
        let rows: Vec<Vec<f64>> = values.chunks(size.max(1)).map(|c| c.to_vec()).collect();
        Self::from_rows(&rows)
    }

    /// Build an `n`-node matrix from a list of directed edges
    pub fn from_edges(
        size: usize,
        edges: impl IntoIterator<Item = (usize, usize)>,
    ) -> Result<Self, ShapeError> {
        if size < MIN_NODES {
            return Err(ShapeError::TooSmall { size });
        }
        let mut cells = vec![false; size * size];
        for (from, to) in edges {
            if from >= size || to >= size {
                return Err(ShapeError::NotSquare {
                    rows: size,
                    cols: from.max(to) + 1,
                });
            }
            cells[from * size + to] = true;
        }
        Ok(Self { size, cells })
    }

    /// Number of nodes
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the edge `from -> to` exists
    pub fn get(&self, from: usize, to: usize) -> bool {
        self.cells[from * self.size + to]
    }

    pub fn has_self_loop(&self, node: usize) -> bool {
        self.get(node, node)
    }

    /// Nodes carrying a self-loop, in index order
    pub fn self_loops(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.size).filter(move |&i| self.has_self_loop(i))
    }

    /// Neighbours of `node` in the undirected simple graph (self excluded)
    pub fn undirected_neighbors(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.size).filter(move |&j| j != node && (self.get(node, j) || self.get(j, node)))
    }

    /// Undirected simple edges `(i, j)` with `i < j`
    pub fn undirected_edges(&self) -> Vec<(usize, usize)> {
        let mut edges = Vec::new();
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if self.get(i, j) || self.get(j, i) {
                    edges.push((i, j));
                }
            }
        }
        edges
    }

    /// Edges `i -> j` whose reverse `j -> i` is absent, in row-major order
    pub fn unidirectional_edges(&self) -> Vec<(usize, usize)> {
        let mut edges = Vec::new();
        for i in 0..self.size {
            for j in 0..self.size {
                if self.get(i, j) && !self.get(j, i) {
                    edges.push((i, j));
                }
            }
        }
        edges
    }

    /// Mutual pairs `(i, j)` with `i <= j` where both directions exist.
    ///
    /// Self-loops appear as `(i, i)`. Pairs come out in row-major order of
    /// the upper triangle.
    pub fn mutual_pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for i in 0..self.size {
            for j in i..self.size {
                if self.get(i, j) && self.get(j, i) {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }

    /// Number of nodes joined to `node` in exactly one direction
    pub fn asymmetric_degree(&self, node: usize) -> usize {
        (0..self.size)
            .filter(|&j| self.get(node, j) != self.get(j, node))
            .count()
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.size).all(|i| (0..i).all(|j| self.get(i, j) == self.get(j, i)))
    }

    /// Rows as 0/1 values
    pub fn rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.size)
            .map(|row| row.iter().map(|&c| u8::from(c)).collect())
            .collect()
    }
}

fn integer_sqrt(n: usize) -> usize {
    let mut root = (n as f64).sqrt() as usize;
    while root * root > n {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root
}
