use anyhow::{Result, anyhow};

/// Index of a node inside a [`NodeArena`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    fn from_index(index: usize) -> Result<Self> {
        u32::try_from(index)
            .map(NodeId)
            .map_err(|_| anyhow!("Search tree is full; more than {} nodes.", u32::MAX as u64 + 1))
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
pub struct SearchNode<S> {
    pub state: S,
    pub parent: Option<NodeId>,
    /// Edges from the root; every move costs one, so this is also `g`.
    pub depth: u32,
}

/// Append-only storage for the search tree. Children point at their parent
/// by index, so a path is recovered by walking indices back to the root.
#[derive(Debug, Clone)]
pub struct NodeArena<S> {
    nodes: Vec<SearchNode<S>>,
}

impl<S> Default for NodeArena<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> NodeArena<S> {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn root(&mut self, state: S) -> Result<NodeId> {
        self.push(SearchNode {
            state,
            parent: None,
            depth: 0,
        })
    }

    pub fn child(&mut self, state: S, parent: NodeId) -> Result<NodeId> {
        let depth = self.depth(parent) + 1;
        self.push(SearchNode {
            state,
            parent: Some(parent),
            depth,
        })
    }

    fn push(&mut self, node: SearchNode<S>) -> Result<NodeId> {
        let id = NodeId::from_index(self.nodes.len())?;
        self.nodes.push(node);
        Ok(id)
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &SearchNode<S> {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn depth(&self, id: NodeId) -> u32 {
        self.get(id).depth
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<S: Clone> NodeArena<S> {
    /// States from the root down to `id`, inclusive.
    pub fn path(&self, id: NodeId) -> Vec<S> {
        let mut path = Vec::with_capacity(self.depth(id) as usize + 1);
        let mut current = Some(id);
        while let Some(id) = current {
            let node = self.get(id);
            path.push(node.state.clone());
            current = node.parent;
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_has_no_parent() {
        let mut arena = NodeArena::new();
        let root = arena.root("a").unwrap();
        assert_eq!(arena.get(root).parent, None);
        assert_eq!(arena.depth(root), 0);
        assert_eq!(arena.path(root), vec!["a"]);
    }

    #[test]
    fn test_path_walks_back_to_root() {
        let mut arena = NodeArena::new();
        let root = arena.root("a").unwrap();
        let b = arena.child("b", root).unwrap();
        let c = arena.child("c", b).unwrap();
        let d = arena.child("d", root).unwrap();

        assert_eq!(arena.len(), 4);
        assert_eq!(arena.depth(c), 2);
        assert_eq!(arena.path(c), vec!["a", "b", "c"]);
        assert_eq!(arena.path(d), vec!["a", "d"]);
        assert_eq!(arena.get(d).parent, Some(root));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_node_id_stops_at_u32_range() {
        let last = u32::MAX as usize;
        assert_eq!(NodeId::from_index(last).unwrap().index(), last);
        let err = NodeId::from_index(last + 1).unwrap_err();
        assert!(err.to_string().contains("Search tree is full"));
    }
}
