use ahash::AHashSet;
use std::hash::Hash;

/// States that have already been expanded (the closed list). Lookups go by
/// value; the set only grows during a run.
#[derive(Debug, Clone)]
pub struct ExploredSet<S> {
    states: AHashSet<S>,
}

impl<S: Eq + Hash> Default for ExploredSet<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Eq + Hash> ExploredSet<S> {
    pub fn new() -> Self {
        Self {
            states: AHashSet::new(),
        }
    }

    /// Returns `false` if the state was already present.
    pub fn insert(&mut self, state: S) -> bool {
        self.states.insert(state)
    }

    pub fn contains(&self, state: &S) -> bool {
        self.states.contains(state)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
