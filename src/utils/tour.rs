use std::io::Write;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::graph::*;

/// A closed tour: `path` starts and ends at the start node and visits every other node once.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tour {
    cost: Cost,
    path: Vec<Node>,
}

impl Tour {
    /// Creates a tour from its closed path.
    ///
    /// # Example
    /// ```
    /// use tsp_bnb::utils::Tour;
    /// let tour = Tour::new(7, vec![0, 1, 0]);
    /// assert_eq!(tour.number_of_nodes(), 2);
    /// ```
    pub fn new(cost: Cost, path: Vec<Node>) -> Self {
        assert!(path.len() >= 2);
        assert_eq!(path.first(), path.last());
        Self { cost, path }
    }

    /// Creates a tour from a closed path and computes its cost. Returns `None` if the path
    /// uses a missing edge.
    pub fn from_path<G: EdgeWeights>(graph: &G, path: Vec<Node>) -> Option<Self> {
        let mut tour = Self::new(0, path);
        tour.cost = tour.compute_cost(graph)?;
        Some(tour)
    }

    /// The tour of the single-node graph
    pub fn trivial() -> Self {
        Self::new(0, vec![0, 0])
    }

    pub fn cost(&self) -> Cost {
        self.cost
    }

    /// Returns the closed path, i.e. `number_of_nodes() + 1` entries
    pub fn path(&self) -> &[Node] {
        &self.path
    }

    pub fn number_of_nodes(&self) -> NumNodes {
        (self.path.len() - 1) as NumNodes
    }

    /// Sums the weights along the path; returns `None` if the path uses a missing edge.
    pub fn compute_cost<G: EdgeWeights>(&self, graph: &G) -> Option<Cost> {
        if self.number_of_nodes() == 1 {
            return Some(0);
        }

        self.path
            .iter()
            .tuple_windows()
            .map(|(&u, &v)| graph.has_edge(u, v).then(|| graph.weight(u, v)))
            .sum()
    }

    /// Returns true iff the tour starts and ends at node 0, visits every node of `graph`
    /// exactly once and its stored cost matches the weights of `graph`.
    pub fn is_valid_for<G: EdgeWeights>(&self, graph: &G) -> bool {
        let n = graph.len();
        if self.path.len() != n + 1 || self.path[0] != 0 || self.path[n] != 0 {
            return false;
        }

        let mut seen = vec![false; n];
        for &u in &self.path[..n] {
            if u as usize >= n || seen[u as usize] {
                return false;
            }
            seen[u as usize] = true;
        }

        self.compute_cost(graph) == Some(self.cost)
    }

    /// Writes the tour in a human readable form:
    ///
    /// ```
    /// use tsp_bnb::utils::Tour;
    /// let tour = Tour::new(80, vec![0, 1, 3, 2, 0]);
    ///
    /// let mut buffer: Vec<u8> = Vec::new(); // implements Write
    /// tour.write(&mut buffer).unwrap();
    /// assert_eq!(buffer, b"Minimum cost: 80\nPath taken: 0 -> 1 -> 3 -> 2 -> 0\n");
    /// ```
    pub fn write<W: Write>(&self, mut writer: W) -> anyhow::Result<()> {
        writeln!(&mut writer, "Minimum cost: {}", self.cost)?;
        writeln!(&mut writer, "Path taken: {}", self.path.iter().join(" -> "))?;
        writer.flush()?;
        Ok(())
    }

    /// Writes the tour as a JSON object with the fields `cost` and `path`
    pub fn write_json<W: Write>(&self, mut writer: W) -> anyhow::Result<()> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
