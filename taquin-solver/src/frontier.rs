//! Open list for A*: a binary min-heap addressed by state.
//!
//! Every state has at most one live entry. A map from state to heap slot
//! gives O(1) membership and priority lookups and O(log n) decrease-key.

use crate::node::NodeId;

use ahash::AHashMap;
use std::fmt;
use std::hash::Hash;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontierError {
    /// `add` was called for a state that already has a live entry.
    DuplicateKey,
    /// The state has no live entry.
    NotFound,
    /// `pop_min` was called on an empty frontier.
    Empty,
}

impl fmt::Display for FrontierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateKey => f.write_str("state is already in the frontier"),
            Self::NotFound => f.write_str("state is not in the frontier"),
            Self::Empty => f.write_str("frontier is empty"),
        }
    }
}

impl std::error::Error for FrontierError {}

/// Ordering key: lowest priority first, then oldest insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct FrontierKey {
    priority: u32,
    order: u64,
}

#[derive(Debug, Clone)]
struct FrontierEntry<S> {
    key: FrontierKey,
    state: S,
    node: NodeId,
}

#[derive(Debug, Clone)]
pub struct Frontier<S> {
    heap: Vec<FrontierEntry<S>>,
    slots: AHashMap<S, usize>,
    next_order: u64,
    high_water: usize,
}

impl<S: Clone + Eq + Hash> Default for Frontier<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone + Eq + Hash> Frontier<S> {
    pub fn new() -> Self {
        Self {
            heap: Vec::new(),
            slots: AHashMap::new(),
            next_order: 0,
            high_water: 0,
        }
    }

    pub fn add(&mut self, state: S, node: NodeId, priority: u32) -> Result<(), FrontierError> {
        if self.slots.contains_key(&state) {
            return Err(FrontierError::DuplicateKey);
        }
        let slot = self.heap.len();
        let key = self.next_key(priority);
        self.slots.insert(state.clone(), slot);
        self.heap.push(FrontierEntry { key, state, node });
        self.sift_up(slot);
        self.high_water = self.high_water.max(self.heap.len());
        Ok(())
    }

    pub fn has(&self, state: &S) -> bool {
        self.slots.contains_key(state)
    }

    pub fn priority(&self, state: &S) -> Result<u32, FrontierError> {
        let slot = self.slot(state)?;
        Ok(self.heap[slot].key.priority)
    }

    /// Deletes the entry for `state` and returns its node.
    pub fn remove(&mut self, state: &S) -> Result<NodeId, FrontierError> {
        let slot = self.slots.remove(state).ok_or(FrontierError::NotFound)?;
        let entry = self.heap.swap_remove(slot);
        if slot < self.heap.len() {
            self.slots.insert(self.heap[slot].state.clone(), slot);
            self.sift_down(slot);
            self.sift_up(slot);
        }
        Ok(entry.node)
    }

    /// Points the entry for `state` at `node` with a new priority, as if it
    /// had been removed and added again. Returns the node it replaced.
    pub fn replace(
        &mut self,
        state: &S,
        node: NodeId,
        priority: u32,
    ) -> Result<NodeId, FrontierError> {
        let slot = self.slot(state)?;
        let key = self.next_key(priority);
        let entry = &mut self.heap[slot];
        let old_key = entry.key;
        let old_node = entry.node;
        entry.key = key;
        entry.node = node;
        if key < old_key {
            self.sift_up(slot);
        } else {
            self.sift_down(slot);
        }
        Ok(old_node)
    }

    /// Removes and returns the entry with the smallest priority.
    pub fn pop_min(&mut self) -> Result<(S, NodeId), FrontierError> {
        if self.heap.is_empty() {
            return Err(FrontierError::Empty);
        }
        let entry = self.heap.swap_remove(0);
        self.slots.remove(&entry.state);
        if !self.heap.is_empty() {
            self.slots.insert(self.heap[0].state.clone(), 0);
            self.sift_down(0);
        }
        Ok((entry.state, entry.node))
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Largest size the frontier has reached.
    pub fn high_water(&self) -> usize {
        self.high_water
    }

    fn slot(&self, state: &S) -> Result<usize, FrontierError> {
        self.slots.get(state).copied().ok_or(FrontierError::NotFound)
    }

    fn next_key(&mut self, priority: u32) -> FrontierKey {
        let order = self.next_order;
        self.next_order += 1;
        FrontierKey { priority, order }
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.heap[slot].key >= self.heap[parent].key {
                break;
            }
            self.swap(slot, parent);
            slot = parent;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * slot + 1;
            let right = left + 1;
            let mut smallest = slot;
            if left < len && self.heap[left].key < self.heap[smallest].key {
                smallest = left;
            }
            if right < len && self.heap[right].key < self.heap[smallest].key {
                smallest = right;
            }
            if smallest == slot {
                break;
            }
            self.swap(slot, smallest);
            slot = smallest;
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        if let Some(slot) = self.slots.get_mut(&self.heap[a].state) {
            *slot = a;
        }
        if let Some(slot) = self.slots.get_mut(&self.heap[b].state) {
            *slot = b;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeArena;

    fn nodes(count: usize) -> Vec<NodeId> {
        let mut arena = NodeArena::new();
        (0..count).map(|i| arena.root(i).unwrap()).collect()
    }

    #[test]
    fn test_add_then_lookup() {
        let ids = nodes(1);
        let mut frontier = Frontier::new();
        frontier.add("a", ids[0], 7).unwrap();
        assert!(frontier.has(&"a"));
        assert_eq!(frontier.priority(&"a"), Ok(7));
        assert!(!frontier.has(&"b"));
        assert_eq!(frontier.priority(&"b"), Err(FrontierError::NotFound));
        assert_eq!(frontier.pop_min(), Ok(("a", ids[0])));
    }

    #[test]
    fn test_duplicate_add_rejected() {
        let ids = nodes(2);
        let mut frontier = Frontier::new();
        frontier.add("a", ids[0], 3).unwrap();
        assert_eq!(frontier.add("a", ids[1], 1), Err(FrontierError::DuplicateKey));
        assert_eq!(frontier.len(), 1);
        assert_eq!(frontier.priority(&"a"), Ok(3));
    }

    #[test]
    fn test_remove() {
        let ids = nodes(3);
        let mut frontier = Frontier::new();
        frontier.add("a", ids[0], 5).unwrap();
        frontier.add("b", ids[1], 1).unwrap();
        frontier.add("c", ids[2], 3).unwrap();

        assert_eq!(frontier.remove(&"b"), Ok(ids[1]));
        assert!(!frontier.has(&"b"));
        assert_eq!(frontier.remove(&"b"), Err(FrontierError::NotFound));
        assert_eq!(frontier.pop_min().map(|(s, _)| s), Ok("c"));
        assert_eq!(frontier.pop_min().map(|(s, _)| s), Ok("a"));
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_pop_min_order_and_ties() {
        let ids = nodes(5);
        let mut frontier = Frontier::new();
        frontier.add("e", ids[0], 9).unwrap();
        frontier.add("b", ids[1], 2).unwrap();
        frontier.add("c", ids[2], 2).unwrap();
        frontier.add("a", ids[3], 1).unwrap();
        frontier.add("d", ids[4], 4).unwrap();

        let order: Vec<_> = std::iter::from_fn(|| frontier.pop_min().ok().map(|(s, _)| s)).collect();
        assert_eq!(order, ["a", "b", "c", "d", "e"]);
        assert_eq!(frontier.pop_min(), Err(FrontierError::Empty));
        assert_eq!(frontier.high_water(), 5);
    }

    #[test]
    fn test_replace_lowers_priority() {
        let ids = nodes(4);
        let mut frontier = Frontier::new();
        frontier.add("a", ids[0], 4).unwrap();
        frontier.add("b", ids[1], 6).unwrap();
        frontier.add("c", ids[2], 8).unwrap();

        assert_eq!(frontier.replace(&"c", ids[3], 2), Ok(ids[2]));
        assert_eq!(frontier.priority(&"c"), Ok(2));
        assert_eq!(frontier.len(), 3);
        assert_eq!(frontier.pop_min(), Ok(("c", ids[3])));
        assert_eq!(frontier.replace(&"z", ids[3], 1), Err(FrontierError::NotFound));
    }

    #[test]
    fn test_replace_behaves_like_reinsert_on_ties() {
        let ids = nodes(3);
        let mut frontier = Frontier::new();
        frontier.add("a", ids[0], 3).unwrap();
        frontier.add("b", ids[1], 3).unwrap();
        frontier.replace(&"a", ids[2], 3).unwrap();
        assert_eq!(frontier.pop_min().map(|(s, _)| s), Ok("b"));
        assert_eq!(frontier.pop_min().map(|(s, _)| s), Ok("a"));
    }

    #[test]
    fn test_heap_stays_consistent() {
        let count = 200;
        let ids = nodes(count);
        let mut frontier = Frontier::new();
        for (i, &id) in ids.iter().enumerate() {
            frontier.add(i, id, ((i * 37) % 101) as u32).unwrap();
        }
        for i in (0..count).step_by(3) {
            frontier.remove(&i).unwrap();
        }
        for i in (1..count).step_by(5) {
            if frontier.has(&i) {
                let priority = frontier.priority(&i).unwrap();
                frontier.replace(&i, ids[i], priority / 2).unwrap();
            }
        }

        let mut last = 0;
        while let Ok((state, _)) = frontier.pop_min() {
            assert!(!frontier.has(&state));
            let priority = ((state * 37) % 101) as u32;
            let priority = if state % 5 == 1 { priority / 2 } else { priority };
            assert!(priority >= last, "popped {priority} after {last}");
            last = priority;
        }
    }
}
