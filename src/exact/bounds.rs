//! Lower bounds on the cost of completing a partial tour.
//!
//! The primitives [`first_min`] and [`second_min`] look at the edges leaving a node (excluding
//! its self loop). Zero weights take part in both, even though the search never traverses a
//! zero-weight edge; this only ever makes the estimates smaller.

use std::{fmt, str::FromStr};

use crate::graph::*;

/// Returns the smallest weight of an edge leaving `u`, or `None` if the graph has a single node.
pub fn first_min<G: EdgeWeights>(graph: &G, u: Node) -> Option<Weight> {
    graph.out_weights(u).map(|(_, w)| w).min()
}

/// Returns the second smallest weight of an edge leaving `u`, or `None` if `u` has fewer than
/// two outgoing edges. If the minimum weight occurs at least twice, the result equals
/// [`first_min`].
pub fn second_min<G: EdgeWeights>(graph: &G, u: Node) -> Option<Weight> {
    min_pair(graph, u).1
}

/// Computes [`first_min`] and [`second_min`] in a single pass
pub fn min_pair<G: EdgeWeights>(graph: &G, u: Node) -> (Option<Weight>, Option<Weight>) {
    let mut first: Option<Weight> = None;
    let mut second: Option<Weight> = None;

    for (_, w) in graph.out_weights(u) {
        // non-strict comparisons rank a repeated minimum as both first and second
        if first.is_none_or(|f| w <= f) {
            second = first;
            first = Some(w);
        } else if second.is_none_or(|s| w <= s) {
            second = Some(w);
        }
    }

    (first, second)
}

/// Strategy used to compute the root bound and its reduction whenever the path grows by
/// one edge. Both are expressed in the same incremental form: the bound of a search node is
/// the root bound minus the reductions of all edges on its path; a branch is explored iff
/// `bound + weight < best`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LowerBound {
    /// Charges every node still to be left with its cheapest outgoing edge. This is a valid
    /// lower bound for directed tours, so the search returns an optimal tour.
    #[default]
    OutgoingEdge,

    /// Charges each node half of its two cheapest edges. The start node and the last node
    /// keep their second share for the rest of the search, which may exceed the cost of the
    /// remaining edges; the search can therefore prune the optimal tour.
    HalfEdge,
}

impl LowerBound {
    /// Bound of the root node where only the start node is placed.
    ///
    /// # Warning
    /// Requires at least two nodes.
    pub fn root_bound<G: EdgeWeights>(self, graph: &G) -> Cost {
        debug_assert!(graph.number_of_nodes() > 1);

        match self {
            LowerBound::OutgoingEdge => graph
                .vertices()
                .map(|u| first_min(graph, u).unwrap_or(0))
                .sum(),

            LowerBound::HalfEdge => {
                let total: Cost = graph
                    .vertices()
                    .map(|u| {
                        let (first, second) = min_pair(graph, u);
                        // second share is absent for two nodes only
                        first.unwrap_or(0) + second.unwrap_or(0)
                    })
                    .sum();

                total.div_ceil(2)
            }
        }
    }

    /// Amount by which the bound drops when the edge `(last, next)` is appended to a path
    /// currently holding `depth` nodes.
    pub fn reduction<G: EdgeWeights>(self, graph: &G, depth: NumNodes, last: Node, next: Node) -> Cost {
        debug_assert!(depth >= 1);

        match self {
            LowerBound::OutgoingEdge => first_min(graph, last).unwrap_or(0),

            LowerBound::HalfEdge => {
                let leaving = if depth == 1 {
                    first_min(graph, last)
                } else {
                    second_min(graph, last)
                };

                (leaving.unwrap_or(0) + first_min(graph, next).unwrap_or(0)) / 2
            }
        }
    }
}

impl fmt::Display for LowerBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LowerBound::OutgoingEdge => write!(f, "outgoing"),
            LowerBound::HalfEdge => write!(f, "half-edge"),
        }
    }
}

impl FromStr for LowerBound {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "outgoing" => Ok(LowerBound::OutgoingEdge),
            "half-edge" => Ok(LowerBound::HalfEdge),
            _ => Err(format!(
                "unknown lower bound \"{s}\"; expected \"outgoing\" or \"half-edge\""
            )),
        }
    }
}
