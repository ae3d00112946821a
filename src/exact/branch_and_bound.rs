use std::time::{Duration, Instant};

#[allow(unused_imports)]
use log::{debug, info, trace};

use super::{bounds::LowerBound, search_state::SearchState};
use crate::{
    errors::*,
    graph::*,
    utils::{Tour, signal_handling},
};

/// Every tour starts and ends here
pub const START_NODE: Node = 0;

/// Number of search nodes between two polls of the deadline and the termination flag
const INTERRUPT_CHECK_INTERVAL: u64 = 1 << 12;

type ResultType<T> = std::result::Result<T, SolveError>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Number of calls into the recursion, including the root
    pub nodes_explored: u64,
    /// Candidate extensions discarded because their bound could not beat the best tour
    pub branches_pruned: u64,
    /// Complete paths that could be closed back to the start node
    pub tours_completed: u64,
    /// Number of times the best tour was replaced
    pub improvements: u64,
}

/// Exact depth-first branch-and-bound search for a minimum cost tour.
///
/// The graph is borrowed read-only; each call to [`BranchAndBound::solve`] owns a fresh
/// [`SearchState`], so independent solvers may share a graph across threads.
pub struct BranchAndBound<'a, G: EdgeWeights> {
    graph: &'a G,
    lower_bound: LowerBound,

    timeout: Option<Duration>,
    stop_at_instant: Option<Instant>,
    interruptible: bool,
    paranoid: bool,

    stats: SearchStats,
}

impl<'a, G: EdgeWeights> BranchAndBound<'a, G> {
    pub fn new(graph: &'a G) -> Self {
        Self {
            graph,
            lower_bound: LowerBound::default(),
            timeout: None,
            stop_at_instant: None,
            interruptible: false,
            paranoid: false,
            stats: SearchStats::default(),
        }
    }

    /// Selects the bound used for pruning. Only [`LowerBound::OutgoingEdge`] guarantees an
    /// optimal result.
    pub fn set_lower_bound(&mut self, lower_bound: LowerBound) {
        self.lower_bound = lower_bound;
    }

    /// Aborts [`BranchAndBound::solve`] with [`SolveError::Interrupted`] if it takes longer
    /// than `timeout`. The deadline is polled periodically, so it may be overrun slightly.
    pub fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    /// If enabled, [`BranchAndBound::solve`] gives up with [`SolveError::Interrupted`] once
    /// [`signal_handling::received_ctrl_c`] is raised.
    pub fn set_interruptible(&mut self, enabled: bool) {
        self.interruptible = enabled;
    }

    /// Checks the invariants of the search state at every search node and panics on a
    /// violation.
    ///
    /// # Warning
    /// This slows the search down by a factor linear in the number of nodes.
    pub fn set_paranoia(&mut self, enabled: bool) {
        self.paranoid = enabled;
    }

    /// Counters of the last (possibly interrupted) call to [`BranchAndBound::solve`]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Runs the search to completion and returns the best tour found.
    ///
    /// Returns [`SolveError::NoTourFound`] if no Hamiltonian cycle over non-zero edges exists
    /// and [`SolveError::Interrupted`] if a timeout or termination signal stopped the search;
    /// in the latter case no partial result is kept.
    pub fn solve(&mut self) -> ResultType<Tour> {
        self.stats = SearchStats::default();

        let n = self.graph.number_of_nodes();
        match n {
            0 => return Err(GraphError::Empty.into()),
            1 => return Ok(Tour::trivial()),
            _ => {}
        }

        self.stop_at_instant = self.timeout.map(|t| Instant::now() + t);

        let root_bound = self.lower_bound.root_bound(self.graph);
        debug!(
            "Start branch and bound with n={n}, lower bound: {}, root bound: {root_bound}",
            self.lower_bound
        );

        let mut state = SearchState::new(n, START_NODE);
        self.branch(&mut state, root_bound)?;

        info!(
            "Branch and bound completed: explored: {} pruned: {} tours: {} improvements: {} cost: {:?}",
            self.stats.nodes_explored,
            self.stats.branches_pruned,
            self.stats.tours_completed,
            self.stats.improvements,
            state.best_cost()
        );

        state.into_tour().ok_or(SolveError::NoTourFound)
    }

    fn branch(&mut self, state: &mut SearchState, current_bound: Cost) -> ResultType<()> {
        self.stats.nodes_explored += 1;
        self.poll_interruption()?;

        if self.paranoid {
            if let Err(e) = state.is_correct() {
                panic!("Corrupted search state at path {:?}: {e}", state.path());
            }
        }

        let depth = state.depth();
        if depth == self.graph.number_of_nodes() {
            self.close_tour(state);
            return Ok(());
        }

        let last = state.last_node();
        for next in self.graph.vertices_range() {
            if state.is_visited(next) || !self.graph.has_edge(last, next) {
                continue;
            }

            let weight = self.graph.weight(last, next);
            let bound = current_bound.saturating_sub(
                self.lower_bound
                    .reduction(self.graph, depth, last, next),
            );

            if !state.improves_on_best(bound + state.current_weight() + weight) {
                self.stats.branches_pruned += 1;
                continue;
            }

            state.extend(next, weight);
            let result = self.branch(state, bound);
            state.retract();
            result?;
        }

        Ok(())
    }

    fn close_tour(&mut self, state: &mut SearchState) {
        let (last, start) = (state.last_node(), state.start_node());
        if !self.graph.has_edge(last, start) {
            return;
        }

        self.stats.tours_completed += 1;
        if state.offer_closed_tour(self.graph.weight(last, start)) {
            self.stats.improvements += 1;
            trace!(
                "New best tour with cost {:?}: {:?}",
                state.best_cost(),
                state.best_path()
            );
        }
    }

    fn poll_interruption(&self) -> ResultType<()> {
        if (self.stats.nodes_explored - 1) % INTERRUPT_CHECK_INTERVAL != 0 {
            return Ok(());
        }

        let timed_out = self.stop_at_instant.is_some_and(|s| Instant::now() >= s);
        if timed_out || (self.interruptible && signal_handling::received_ctrl_c()) {
            debug!(
                "Interrupt branch and bound after {} search nodes",
                self.stats.nodes_explored
            );
            return Err(SolveError::Interrupted);
        }

        Ok(())
    }
}

/// Computes an optimal tour of `graph` starting at node 0.
///
/// # Example
/// ```
/// use tsp_bnb::prelude::*;
///
/// let graph = WeightMatrix::try_from_rows(vec![
///     vec![0, 10, 15, 20],
///     vec![10, 0, 35, 25],
///     vec![15, 35, 0, 30],
///     vec![20, 25, 30, 0],
/// ])
/// .unwrap();
///
/// let tour = solve(&graph).unwrap();
/// assert_eq!(tour.cost(), 80);
/// assert_eq!(tour.path(), &[0, 1, 3, 2, 0]);
/// ```
pub fn solve<G: EdgeWeights>(graph: &G) -> ResultType<Tour> {
    solve_with(graph, LowerBound::default())
}

/// Same as [`solve`] but prunes with the given `lower_bound`
pub fn solve_with<G: EdgeWeights>(graph: &G, lower_bound: LowerBound) -> ResultType<Tour> {
    let mut algo = BranchAndBound::new(graph);
    algo.set_lower_bound(lower_bound);
    algo.solve()
}

/// Validates the raw rows of a weight matrix and solves the resulting graph
pub fn solve_rows(rows: Vec<Vec<i64>>) -> ResultType<Tour> {
    let graph = WeightMatrix::try_from_rows(rows)?;
    solve(&graph)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{exact::brute_force::brute_force_solver, log::build_logger_for_level, testing::*};
    use itertools::Itertools;
    use rand::SeedableRng;
    use rayon::prelude::*;

    const BOUNDS: [LowerBound; 2] = [LowerBound::OutgoingEdge, LowerBound::HalfEdge];

    #[test]
    fn single_node() {
        let graph = WeightMatrix::try_from_rows(vec![vec![0]]).unwrap();
        for bound in BOUNDS {
            let tour = solve_with(&graph, bound).unwrap();
            assert_eq!(tour.cost(), 0);
            assert_eq!(tour.path(), &[0, 0]);
        }
    }

    #[test]
    fn two_nodes() {
        let graph = WeightMatrix::try_from_rows(vec![vec![0, 3], vec![4, 0]]).unwrap();
        for bound in BOUNDS {
            let tour = solve_with(&graph, bound).unwrap();
            assert_eq!(tour.cost(), 7);
            assert_eq!(tour.path(), &[0, 1, 0]);
        }

        let graph = WeightMatrix::try_from_rows(vec![vec![0, 3], vec![0, 0]]).unwrap();
        assert_eq!(solve(&graph), Err(SolveError::NoTourFound));
    }

    #[test]
    fn textbook() {
        build_logger_for_level(log::LevelFilter::Info);

        let graph = textbook_instance();
        for bound in BOUNDS {
            let tour = solve_with(&graph, bound).unwrap();
            assert_eq!(tour.cost(), 80);
            assert_eq!(tour.path(), &[0, 1, 3, 2, 0]);
            assert!(tour.is_valid_for(&graph));
        }
    }

    #[test]
    fn uniform_weights() {
        for n in 2..=8 {
            for k in [1, 7, 1000] {
                let graph =
                    WeightMatrix::try_from_fn(n, |u, v| if u == v { 0 } else { k }).unwrap();

                for bound in BOUNDS {
                    let tour = solve_with(&graph, bound).unwrap();
                    assert_eq!(tour.cost(), n as Cost * k);
                    assert!(tour.is_valid_for(&graph));
                    // first tour in node-id order is kept
                    assert_eq!(tour.path(), (0..n).chain([0]).collect_vec());
                }
            }
        }
    }

    #[test]
    fn zero_weight_edge_forces_detour() {
        let graph = zero_edge_detour_instance();

        // the cheapest cycle 0 -> 1 -> 3 -> 2 -> 0 costs 3 but uses the zero edge
        for bound in BOUNDS {
            let tour = solve_with(&graph, bound).unwrap();
            assert_eq!(tour.cost(), 22);
            assert_eq!(tour.path(), &[0, 2, 1, 3, 0]);
            assert!(tour.path().iter().tuple_windows().all(|(&u, &v)| graph.weight(u, v) > 0));
        }
    }

    #[test]
    fn no_tour() {
        // node 1 can only be entered, never left
        let graph = WeightMatrix::try_from_rows(vec![
            vec![0, 4, 5, 1],
            vec![0, 0, 0, 0],
            vec![5, 2, 0, 3],
            vec![1, 6, 3, 0],
        ])
        .unwrap();

        for bound in BOUNDS {
            assert_eq!(solve_with(&graph, bound), Err(SolveError::NoTourFound));
        }
    }

    #[test]
    fn invalid_rows() {
        assert_eq!(
            solve_rows(vec![]),
            Err(SolveError::InvalidGraph(GraphError::Empty))
        );
        assert!(matches!(
            solve_rows(vec![vec![0, 1, 2], vec![1, 0, 1]]),
            Err(SolveError::InvalidGraph(GraphError::NonSquare { .. }))
        ));
        assert!(matches!(
            solve_rows(vec![vec![0, -1], vec![1, 0]]),
            Err(SolveError::InvalidGraph(GraphError::NegativeWeight { .. }))
        ));
        assert_eq!(solve_rows(vec![vec![0, 2], vec![3, 0]]).map(|t| t.cost()), Ok(5));
    }

    #[test]
    fn empty_graph() {
        struct NoNodes;

        impl GraphNodeOrder for NoNodes {
            fn number_of_nodes(&self) -> NumNodes {
                0
            }
        }

        impl EdgeWeights for NoNodes {
            fn weight(&self, _: Node, _: Node) -> Weight {
                unreachable!()
            }
        }

        assert_eq!(solve(&NoNodes), Err(SolveError::InvalidGraph(GraphError::Empty)));
    }

    #[test]
    fn matches_brute_force() {
        let mut rng = rand_pcg::Pcg64::seed_from_u64(0xb4b);

        for n in 2..=8 {
            for (i, graph) in random_matrices(&mut rng, n).take(40).enumerate() {
                let expected = brute_force_solver(&graph);
                let actual = solve(&graph);

                assert_eq!(actual, expected, "n={n} i={i} graph={graph:?}");
                if let Ok(tour) = actual {
                    assert!(tour.is_valid_for(&graph));
                }
            }
        }
    }

    #[test]
    fn half_edge_never_beats_optimum() {
        let mut rng = rand_pcg::Pcg64::seed_from_u64(0xfa57);

        for n in 2..=7 {
            for graph in random_matrices(&mut rng, n).take(40) {
                let optimum = brute_force_solver(&graph);

                match solve_with(&graph, LowerBound::HalfEdge) {
                    Ok(tour) => {
                        assert!(tour.is_valid_for(&graph));
                        assert!(tour.cost() >= optimum.unwrap().cost());
                    }
                    Err(e) => {
                        assert_eq!(e, SolveError::NoTourFound);
                        assert_eq!(optimum, Err(SolveError::NoTourFound));
                    }
                }
            }
        }
    }

    #[test]
    fn half_edge_can_prune_the_optimum() {
        let graph = WeightMatrix::try_from_rows(vec![
            vec![0, 23, 4, 7, 9],
            vec![23, 0, 3, 21, 19],
            vec![4, 3, 0, 17, 21],
            vec![7, 21, 17, 0, 3],
            vec![9, 19, 21, 3, 0],
        ])
        .unwrap();

        assert_eq!(solve_with(&graph, LowerBound::HalfEdge).unwrap().cost(), 40);
        assert_eq!(solve(&graph).unwrap().cost(), 36);
        assert_eq!(brute_force_solver(&graph).unwrap().cost(), 36);
    }

    #[test]
    fn idempotent() {
        let mut rng = rand_pcg::Pcg64::seed_from_u64(42);
        for graph in random_matrices(&mut rng, 7).take(10) {
            for bound in BOUNDS {
                assert_eq!(solve_with(&graph, bound), solve_with(&graph, bound));
            }
        }
    }

    #[test]
    fn paranoid() {
        let mut rng = rand_pcg::Pcg64::seed_from_u64(0xdead);
        for n in 2..=7 {
            for graph in random_matrices(&mut rng, n).take(10) {
                for bound in BOUNDS {
                    let mut algo = BranchAndBound::new(&graph);
                    algo.set_lower_bound(bound);
                    algo.set_paranoia(true);
                    assert_eq!(algo.solve(), solve_with(&graph, bound));
                }
            }
        }
    }

    #[test]
    fn stats() {
        let graph = textbook_instance();
        let mut algo = BranchAndBound::new(&graph);
        algo.solve().unwrap();

        let stats = algo.stats();
        assert!(stats.nodes_explored > 1);
        assert!(stats.improvements >= 1);
        assert!(stats.tours_completed >= stats.improvements);
    }

    #[test]
    fn timeout() {
        let graph = textbook_instance();

        let mut algo = BranchAndBound::new(&graph);
        algo.set_timeout(Some(Duration::ZERO));
        assert_eq!(algo.solve(), Err(SolveError::Interrupted));

        algo.set_timeout(Some(Duration::from_secs(3600)));
        assert_eq!(algo.solve().map(|t| t.cost()), Ok(80));
    }

    #[test]
    fn shared_graph() {
        let mut rng = rand_pcg::Pcg64::seed_from_u64(0x5a5a);
        let graph = WeightMatrix::random_symmetric(&mut rng, 9, 1..=100, 0.0).unwrap();
        let expected = solve(&graph).unwrap();

        let results: Vec<_> = (0..8).into_par_iter().map(|_| solve(&graph)).collect();
        assert!(results.into_iter().all(|r| r.as_ref() == Ok(&expected)));
    }
}
