use crate::{errors::*, graph::*, utils::Tour};

/// Mutable state of a single branch-and-bound run: the partial tour under construction and
/// the best closed tour found so far.
///
/// The partial tour is only changed through [`SearchState::extend`] and
/// [`SearchState::retract`], which undo each other exactly. The start node is placed on
/// construction and can never be retracted.
#[derive(Clone, Debug)]
pub struct SearchState {
    visited: Vec<bool>,
    path: Vec<Node>,
    /// `edge_weights[k]` is the weight of the edge `(path[k], path[k + 1])`
    edge_weights: Vec<Weight>,
    current_weight: Cost,

    best_cost: Option<Cost>,
    best_path: Vec<Node>,
}

impl SearchState {
    pub fn new(number_of_nodes: NumNodes, start: Node) -> Self {
        assert!(start < number_of_nodes);
        let n = number_of_nodes as usize;

        let mut visited = vec![false; n];
        visited[start as usize] = true;

        let mut path = Vec::with_capacity(n + 1);
        path.push(start);

        Self {
            visited,
            path,
            edge_weights: Vec::with_capacity(n),
            current_weight: 0,
            best_cost: None,
            best_path: Vec::with_capacity(n + 1),
        }
    }

    /// Number of nodes on the partial path (including the start node)
    pub fn depth(&self) -> NumNodes {
        self.path.len() as NumNodes
    }

    pub fn start_node(&self) -> Node {
        self.path[0]
    }

    pub fn last_node(&self) -> Node {
        *self.path.last().unwrap()
    }

    pub fn is_visited(&self, u: Node) -> bool {
        self.visited[u as usize]
    }

    pub fn path(&self) -> &[Node] {
        &self.path
    }

    /// Sum of the edge weights along the partial path
    pub fn current_weight(&self) -> Cost {
        self.current_weight
    }

    /// Cost of the best closed tour found so far; `None` plays the role of infinity
    pub fn best_cost(&self) -> Option<Cost> {
        self.best_cost
    }

    /// Closed path of the best tour found so far; empty if none was found yet
    pub fn best_path(&self) -> &[Node] {
        &self.best_path
    }

    /// Returns true iff `cost` is strictly smaller than the best known tour
    pub fn improves_on_best(&self, cost: Cost) -> bool {
        self.best_cost.is_none_or(|best| cost < best)
    }

    /// Appends `node` via an edge of the given weight
    pub fn extend(&mut self, node: Node, weight: Weight) {
        debug_assert!(!self.visited[node as usize]);
        self.visited[node as usize] = true;
        self.path.push(node);
        self.edge_weights.push(weight);
        self.current_weight += weight;
    }

    /// Removes the last node of the path and returns it; exact inverse of [`SearchState::extend`]
    pub fn retract(&mut self) -> Node {
        assert!(self.path.len() > 1, "cannot retract the start node");
        let node = self.path.pop().unwrap();
        let weight = self.edge_weights.pop().unwrap();

        self.visited[node as usize] = false;
        self.current_weight -= weight;
        node
    }

    /// Offers the tour obtained by closing the current (complete) path with an edge of weight
    /// `closing_weight`. It is recorded iff it is strictly cheaper than the best known tour, so
    /// the first of several equally cheap tours is kept. Returns true if it was recorded.
    pub fn offer_closed_tour(&mut self, closing_weight: Weight) -> bool {
        debug_assert_eq!(self.path.len(), self.visited.len());

        let cost = self.current_weight + closing_weight;
        if !self.improves_on_best(cost) {
            return false;
        }

        self.best_cost = Some(cost);
        self.best_path.clear();
        self.best_path.extend_from_slice(&self.path);
        self.best_path.push(self.start_node());
        true
    }

    /// Consumes the state and returns the best tour, if any was found
    pub fn into_tour(self) -> Option<Tour> {
        self.best_cost.map(|cost| Tour::new(cost, self.best_path))
    }
}

impl InvariantCheck<StateError> for SearchState {
    fn is_correct(&self) -> Result<(), StateError> {
        let start = self.start_node();
        if !self.visited[start as usize] {
            return Err(StateError::StartNotVisited(start));
        }

        let mut seen = vec![false; self.visited.len()];
        for &u in &self.path {
            if std::mem::replace(&mut seen[u as usize], true) {
                return Err(StateError::DuplicateOnPath(u));
            }
        }

        if seen != self.visited {
            return Err(StateError::VisitedMismatch {
                visited: self.visited.iter().filter(|&&x| x).count(),
                depth: self.path.len(),
            });
        }

        let expected: Cost = self.edge_weights.iter().sum();
        if expected != self.current_weight || self.edge_weights.len() + 1 != self.path.len() {
            return Err(StateError::WeightMismatch {
                expected,
                found: self.current_weight,
            });
        }

        Ok(())
    }
}
