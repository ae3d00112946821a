pub mod bounds;
pub mod branch_and_bound;
pub mod brute_force;
pub mod search_state;

pub use bounds::{LowerBound, first_min, second_min};
pub use branch_and_bound::{BranchAndBound, SearchStats, solve, solve_rows, solve_with};
pub use brute_force::brute_force_solver;
pub use search_state::SearchState;
