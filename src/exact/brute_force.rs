use std::iter::once;

use itertools::Itertools;

use crate::{errors::*, graph::*, utils::Tour};

/// Enumerates all `(n-1)!` tours starting at node 0 in lexicographic order and returns the first
/// one of minimum cost. Only feasible for tiny graphs; used to cross-check the branch-and-bound
/// search.
pub fn brute_force_solver<G: EdgeWeights>(graph: &G) -> Result<Tour, SolveError> {
    let n = graph.number_of_nodes();
    match n {
        0 => return Err(GraphError::Empty.into()),
        1 => return Ok(Tour::trivial()),
        _ => {}
    }

    let mut best: Option<Tour> = None;
    for inner in (1..n).permutations(n as usize - 1) {
        let path = once(0).chain(inner).chain(once(0)).collect_vec();
        let Some(tour) = Tour::from_path(graph, path) else {
            continue;
        };

        if best.as_ref().is_none_or(|b| tour.cost() < b.cost()) {
            best = Some(tour);
        }
    }

    best.ok_or(SolveError::NoTourFound)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::*;

    #[test]
    fn textbook() {
        let tour = brute_force_solver(&textbook_instance()).unwrap();
        assert_eq!(tour.cost(), 80);
        assert_eq!(tour.path(), &[0, 1, 3, 2, 0]);
    }

    #[test]
    fn zero_edge() {
        let tour = brute_force_solver(&zero_edge_detour_instance()).unwrap();
        assert_eq!(tour.cost(), 22);
    }

    #[test]
    fn tiny() {
        let graph = WeightMatrix::try_from_rows(vec![vec![0]]).unwrap();
        assert_eq!(brute_force_solver(&graph), Ok(Tour::trivial()));

        let graph = WeightMatrix::try_from_rows(vec![vec![0, 1], vec![0, 0]]).unwrap();
        assert_eq!(brute_force_solver(&graph), Err(SolveError::NoTourFound));
    }
}
