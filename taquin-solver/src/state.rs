use smallvec::SmallVec;
use std::hash::Hash;
use taquin_common::board::Board;

/// A state the search can walk: it knows whether it is the goal and which
/// states are one unit-cost move away.
pub trait SearchState: Clone + Eq + Hash {
    fn is_goal(&self) -> bool;

    fn successors(&self) -> SmallVec<[Self; 4]>;
}

impl SearchState for Board {
    fn is_goal(&self) -> bool {
        self.is_solved()
    }

    fn successors(&self) -> SmallVec<[Self; 4]> {
        self.legal_moves()
            .into_iter()
            .filter_map(|direction| self.forecast(direction).ok())
            .collect()
    }
}
