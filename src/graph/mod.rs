pub mod matrix;
pub mod random;

pub type Node = u32;
pub type NumNodes = Node;

/// Weight of a single directed edge
pub type Weight = u64;

/// Accumulated weight of a (partial) tour or of a bound
pub type Cost = u64;

use std::ops::Range;

pub use matrix::*;
pub use random::*;

/// Provides getters pertaining to the size of a graph
pub trait GraphNodeOrder {
    /// Returns the number of nodes of the graph
    fn number_of_nodes(&self) -> NumNodes;

    /// Return the number of nodes as usize
    fn len(&self) -> usize {
        self.number_of_nodes() as usize
    }

    /// Returns an iterator over V.
    fn vertices(&self) -> impl Iterator<Item = Node> + '_ {
        self.vertices_range()
    }

    /// Returns a range of vertices. In contrast to self.vertices(), the range does not
    /// borrow self and hence may be used where a mutable reference of self is needed
    fn vertices_range(&self) -> Range<Node> {
        0..self.number_of_nodes()
    }

    /// Returns true if the graph has no nodes (and thus no edges)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Read access to the weights of a complete directed graph.
///
/// A weight of zero on an off-diagonal pair is interpreted as a missing edge when
/// building tours, see [`EdgeWeights::has_edge`]. The diagonal is never traversed.
pub trait EdgeWeights: GraphNodeOrder {
    /// Returns the weight of the directed edge `(u, v)`.
    ///
    /// # Panics
    /// If `u` or `v` is not a node of the graph.
    fn weight(&self, u: Node, v: Node) -> Weight;

    /// Returns an iterator over all pairs `(v, w(u, v))` with `v != u` in increasing order of `v`.
    /// Zero weights are included.
    fn out_weights(&self, u: Node) -> impl Iterator<Item = (Node, Weight)> + '_ {
        self.vertices()
            .filter(move |&v| v != u)
            .map(move |v| (v, self.weight(u, v)))
    }

    /// Returns true iff the edge `(u, v)` may be traversed by a tour
    fn has_edge(&self, u: Node, v: Node) -> bool {
        u != v && self.weight(u, v) != 0
    }
}
