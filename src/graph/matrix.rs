use super::*;
use crate::errors::GraphError;

/// Dense weight matrix of a complete directed graph on `n` nodes.
///
/// The matrix is validated on construction and immutable afterwards; the search
/// only ever borrows it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeightMatrix {
    number_of_nodes: NumNodes,
    weights: Vec<Weight>,
}

impl WeightMatrix {
    /// Builds a matrix from signed rows as produced by a parser.
    ///
    /// # Example
    /// ```
    /// use tsp_bnb::graph::*;
    /// let matrix = WeightMatrix::try_from_rows(vec![vec![0, 3], vec![4, 0]]).unwrap();
    /// assert_eq!(matrix.number_of_nodes(), 2);
    /// assert_eq!(matrix.weight(1, 0), 4);
    /// ```
    pub fn try_from_rows(rows: Vec<Vec<i64>>) -> Result<Self, GraphError> {
        let n = rows.len();
        if n == 0 {
            return Err(GraphError::Empty);
        }

        let mut weights = Vec::with_capacity(n * n);
        for (u, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(GraphError::NonSquare {
                    row: u,
                    expected: n,
                    found: row.len(),
                });
            }

            for (v, weight) in row.into_iter().enumerate() {
                if weight < 0 {
                    return Err(GraphError::NegativeWeight {
                        from: u as Node,
                        to: v as Node,
                        weight,
                    });
                }
                weights.push(weight as Weight);
            }
        }

        Self::try_new(n as NumNodes, weights)
    }

    /// Builds a matrix by evaluating `weight(u, v)` for every ordered pair.
    pub fn try_from_fn(
        n: NumNodes,
        mut weight: impl FnMut(Node, Node) -> Weight,
    ) -> Result<Self, GraphError> {
        let weights = (0..n)
            .flat_map(|u| (0..n).map(move |v| (u, v)))
            .map(|(u, v)| weight(u, v))
            .collect();

        Self::try_new(n, weights)
    }

    fn try_new(number_of_nodes: NumNodes, weights: Vec<Weight>) -> Result<Self, GraphError> {
        if number_of_nodes == 0 {
            return Err(GraphError::Empty);
        }
        debug_assert_eq!(weights.len(), (number_of_nodes as usize).pow(2));

        let result = Self {
            number_of_nodes,
            weights,
        };

        // the root bound sums two outgoing weights per node and dominates every tour
        let max_weight = result.max_weight();
        if max_weight
            .checked_mul(2 * number_of_nodes as Cost)
            .is_none()
        {
            return Err(GraphError::CapacityExceeded {
                number_of_nodes,
                max_weight,
            });
        }

        Ok(result)
    }

    /// Returns all weights of edges leaving `u`, including the diagonal entry
    pub fn row(&self, u: Node) -> &[Weight] {
        assert!(u < self.number_of_nodes);
        let n = self.len();
        let begin = u as usize * n;
        &self.weights[begin..begin + n]
    }

    /// Largest off-diagonal weight, or 0 for a single node
    pub fn max_weight(&self) -> Weight {
        self.vertices()
            .flat_map(|u| self.out_weights(u).map(|(_, w)| w))
            .max()
            .unwrap_or(0)
    }

    /// Returns true iff `w(u, v) == w(v, u)` for all pairs
    pub fn is_symmetric(&self) -> bool {
        self.vertices()
            .all(|u| (u + 1..self.number_of_nodes).all(|v| self.weight(u, v) == self.weight(v, u)))
    }
}

impl GraphNodeOrder for WeightMatrix {
    fn number_of_nodes(&self) -> NumNodes {
        self.number_of_nodes
    }
}

impl EdgeWeights for WeightMatrix {
    fn weight(&self, u: Node, v: Node) -> Weight {
        assert!(
            u < self.number_of_nodes && v < self.number_of_nodes,
            "edge ({u}, {v}) out of range for {} nodes",
            self.number_of_nodes
        );
        self.weights[u as usize * self.len() + v as usize]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn from_rows() {
        let matrix =
            WeightMatrix::try_from_rows(vec![vec![0, 1, 2], vec![3, 0, 4], vec![5, 6, 0]]).unwrap();

        assert_eq!(matrix.number_of_nodes(), 3);
        assert_eq!(matrix.row(1), &[3, 0, 4]);
        assert_eq!(matrix.weight(2, 1), 6);
        assert_eq!(matrix.max_weight(), 6);
        assert!(!matrix.is_symmetric());
        assert_eq!(matrix.out_weights(1).collect_vec(), vec![(0, 3), (2, 4)]);
    }

    #[test]
    fn rejects_invalid_rows() {
        assert_eq!(WeightMatrix::try_from_rows(vec![]), Err(GraphError::Empty));

        assert_eq!(
            WeightMatrix::try_from_rows(vec![vec![0, 1], vec![1]]),
            Err(GraphError::NonSquare {
                row: 1,
                expected: 2,
                found: 1
            })
        );

        assert_eq!(
            WeightMatrix::try_from_rows(vec![vec![0, 1], vec![-3, 0]]),
            Err(GraphError::NegativeWeight {
                from: 1,
                to: 0,
                weight: -3
            })
        );

        assert_eq!(WeightMatrix::try_from_fn(0, |_, _| 1), Err(GraphError::Empty));
    }

    #[test]
    fn capacity_check() {
        let huge = Weight::MAX / 4;
        assert!(WeightMatrix::try_from_fn(2, |_, _| huge).is_ok());
        assert_eq!(
            WeightMatrix::try_from_fn(3, |_, _| huge),
            Err(GraphError::CapacityExceeded {
                number_of_nodes: 3,
                max_weight: huge
            })
        );
    }

    #[test]
    fn zero_weights_are_missing_edges() {
        let matrix = WeightMatrix::try_from_rows(vec![vec![0, 0], vec![7, 0]]).unwrap();
        assert!(!matrix.has_edge(0, 1));
        assert!(matrix.has_edge(1, 0));
        assert!(!matrix.has_edge(1, 1));
    }

    #[test]
    #[should_panic]
    fn weight_out_of_range() {
        let matrix = WeightMatrix::try_from_fn(2, |u, v| (u + v) as Weight).unwrap();
        matrix.weight(0, 2);
    }

    #[test]
    fn symmetric() {
        let matrix = WeightMatrix::try_from_fn(5, |u, v| (u + v) as Weight).unwrap();
        assert!(matrix.is_symmetric());
        assert_eq!(matrix.max_weight(), 7);
    }
}
