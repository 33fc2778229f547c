//! This crate solves the 15-puzzle with A* search.
//!
//! The search core ([`search`]) works over any [`SearchState`]; the board
//! entry points ([`solve`], [`Solver`]) add the parity pre-check and the
//! expansion budget.
pub mod explored;
pub mod frontier;
pub mod heuristic;
pub mod node;
mod solver;
mod state;

pub use crate::heuristic::{HeuristicKind, linear_conflict, manhattan_distance, misplaced_tiles};
pub use crate::solver::{SolveResult, Solver, search, solve};
pub use crate::state::SearchState;
