use rand::Rng;

use crate::graph::*;

/// Standard four node instance with optimal tour 0 -> 1 -> 3 -> 2 -> 0 of cost 80
pub fn textbook_instance() -> WeightMatrix {
    WeightMatrix::try_from_rows(vec![
        vec![0, 10, 15, 20],
        vec![10, 0, 35, 25],
        vec![15, 35, 0, 30],
        vec![20, 25, 30, 0],
    ])
    .unwrap()
}

/// Symmetric instance where the zero weight between nodes 0 and 1 is a missing edge.
/// Ignoring that, 0 -> 1 -> 3 -> 2 -> 0 would cost 3; the cheapest feasible tour
/// 0 -> 2 -> 1 -> 3 -> 0 costs 22.
pub fn zero_edge_detour_instance() -> WeightMatrix {
    WeightMatrix::try_from_rows(vec![
        vec![0, 0, 1, 10],
        vec![0, 0, 10, 1],
        vec![1, 10, 0, 1],
        vec![10, 1, 1, 0],
    ])
    .unwrap()
}

/// Infinite stream of random matrices on `n` nodes alternating between symmetric and
/// asymmetric instances, small (tie-heavy) and large weight ranges, and varying densities
/// of missing edges.
pub fn random_matrices<R: Rng>(rng: &mut R, n: NumNodes) -> impl Iterator<Item = WeightMatrix> + '_ {
    (0..).map(move |i: usize| {
        let zero_prob = [0.0, 0.1, 0.3][i % 3];
        let weights = if i % 4 < 2 { 1..=5 } else { 1..=50 };

        if i % 2 == 0 {
            WeightMatrix::random_symmetric(&mut *rng, n, weights, zero_prob).unwrap()
        } else {
            WeightMatrix::random_asymmetric(&mut *rng, n, weights, zero_prob).unwrap()
        }
    })
}
