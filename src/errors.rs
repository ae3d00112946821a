use std::error::Error;

use thiserror::Error;

use crate::graph::{Cost, Node, NumNodes, Weight};

/// Trait for checking invariants in datastructures
pub trait InvariantCheck<E: Error> {
    fn is_correct(&self) -> Result<(), E>;
}

/// Reasons for rejecting a weight matrix before any search takes place
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("graph has no nodes")]
    Empty,

    #[error("matrix is not square: row {row} has {found} entries, expected {expected}")]
    NonSquare {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("negative weight {weight} on edge ({from}, {to})")]
    NegativeWeight { from: Node, to: Node, weight: i64 },

    #[error("tour costs of {number_of_nodes} nodes with weights up to {max_weight} exceed the cost range")]
    CapacityExceeded {
        number_of_nodes: NumNodes,
        max_weight: Weight,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SolveError {
    #[error("invalid graph: {0}")]
    InvalidGraph(#[from] GraphError),

    #[error("graph has no Hamiltonian cycle using non-zero edges")]
    NoTourFound,

    #[error("search was interrupted before completion; no definitive result")]
    Interrupted,
}

/// Violations of the [`crate::exact::SearchState`] invariants
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("start node {0} is not marked as visited")]
    StartNotVisited(Node),

    #[error("node {0} appears more than once on the path")]
    DuplicateOnPath(Node),

    #[error("visited set holds {visited} nodes but the path has {depth}")]
    VisitedMismatch { visited: usize, depth: usize },

    #[error("current weight is {found} but the path edges sum up to {expected}")]
    WeightMismatch { expected: Cost, found: Cost },
}
