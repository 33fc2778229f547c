use crate::explored::ExploredSet;
use crate::frontier::Frontier;
use crate::node::NodeArena;
use crate::state::SearchState;

use anyhow::{Result, bail};
use log::{debug, trace};
use taquin_common::{board::Board, direction::Direction};

use std::time::{Duration, Instant};

const PROGRESS_INTERVAL: usize = 100_000;

/// Solves `board` with the default settings: no expansion budget and the
/// parity pre-check enabled.
pub fn solve<H>(board: Board, heuristic: H) -> Result<SolveResult<Board>>
where
    H: Fn(&Board) -> u32,
{
    Solver::new(heuristic).solve(board)
}

/// A* from `initial`, ordered by `f = depth + heuristic`.
///
/// States already expanded are never opened again, even if a cheaper route
/// to them shows up later. A state still in the frontier is re-parented when
/// a route with a strictly lower `f` is found.
///
/// Running out of frontier is a normal outcome (`path` is `None`). Hitting
/// `max_states` expansions is an error.
pub fn search<S, H>(initial: S, heuristic: H, max_states: Option<usize>) -> Result<SolveResult<S>>
where
    S: SearchState,
    H: Fn(&S) -> u32,
{
    let timer = Instant::now();
    let mut nodes = NodeArena::new();
    let mut frontier = Frontier::new();
    let mut explored = ExploredSet::new();

    let estimate = heuristic(&initial);
    let root = nodes.root(initial.clone())?;
    frontier.add(initial, root, estimate)?;
    debug!("search started, root estimate {estimate}");

    while !frontier.is_empty() {
        let (state, id) = frontier.pop_min()?;

        if state.is_goal() {
            let path = nodes.path(id);
            let expanded = explored.len() + 1;
            debug!(
                "goal reached at depth {} after {expanded} expansions ({} nodes generated)",
                path.len() - 1,
                nodes.len()
            );
            return Ok(SolveResult {
                path: Some(path),
                expanded,
                generated: nodes.len(),
                frontier_high_water: frontier.high_water(),
                elapsed: timer.elapsed(),
            });
        }

        if let Some(max_states) = max_states
            && explored.len() >= max_states
        {
            bail!("Unable to solve the puzzle; reached max states {max_states}.");
        }

        let depth = nodes.depth(id) + 1;
        for child in state.successors() {
            let priority = heuristic(&child).saturating_add(depth);
            if frontier.has(&child) {
                if frontier.priority(&child)? > priority {
                    let child_id = nodes.child(child.clone(), id)?;
                    frontier.replace(&child, child_id, priority)?;
                }
            } else if !explored.contains(&child) {
                let child_id = nodes.child(child.clone(), id)?;
                frontier.add(child, child_id, priority)?;
            }
        }

        explored.insert(state);
        if explored.len() % PROGRESS_INTERVAL == 0 {
            trace!(
                "expanded {} states, frontier {} (peak {}), depth {depth}",
                explored.len(),
                frontier.len(),
                frontier.high_water()
            );
        }
    }

    debug!("frontier exhausted after {} expansions", explored.len());
    Ok(SolveResult {
        path: None,
        expanded: explored.len(),
        generated: nodes.len(),
        frontier_high_water: frontier.high_water(),
        elapsed: timer.elapsed(),
    })
}

/// Board solver configuration.
#[derive(Debug, Clone)]
pub struct Solver<H> {
    heuristic: H,
    max_states: Option<usize>,
    check_solvable: bool,
}

impl<H> Solver<H>
where
    H: Fn(&Board) -> u32,
{
    pub fn new(heuristic: H) -> Self {
        Self {
            heuristic,
            max_states: None,
            check_solvable: true,
        }
    }

    /// Upper bound on expansions; `None` searches until the frontier empties.
    pub fn max_states(mut self, max_states: Option<usize>) -> Self {
        self.max_states = max_states;
        self
    }

    /// When enabled, a board with the wrong parity is reported unsolvable
    /// without searching. When disabled, such a board exhausts its whole
    /// reachable half of the state space first.
    pub fn check_solvable(mut self, check_solvable: bool) -> Self {
        self.check_solvable = check_solvable;
        self
    }

    pub fn solve(&self, board: Board) -> Result<SolveResult<Board>> {
        if self.check_solvable && !board.is_solvable() {
            debug!("board fails the parity test, skipping search");
            return Ok(SolveResult {
                path: None,
                expanded: 0,
                generated: 0,
                frontier_high_water: 0,
                elapsed: Duration::ZERO,
            });
        }
        search(board, &self.heuristic, self.max_states)
    }
}

#[derive(Debug, Clone)]
pub struct SolveResult<S> {
    /// Root to goal, inclusive; `None` when no path exists.
    pub path: Option<Vec<S>>,
    /// States taken off the frontier, the goal included.
    pub expanded: usize,
    /// Nodes created, the root included.
    pub generated: usize,
    pub frontier_high_water: usize,
    pub elapsed: Duration,
}

impl<S> SolveResult<S> {
    pub fn is_solved(&self) -> bool {
        self.path.is_some()
    }

    /// Number of moves in the path.
    pub fn move_count(&self) -> Option<usize> {
        self.path.as_ref().map(|path| path.len() - 1)
    }
}

impl SolveResult<Board> {
    pub fn directions(&self) -> Option<Vec<Direction>> {
        self.path.as_ref().and_then(|path| {
            path.windows(2)
                .map(|pair| pair[0].direction_to(&pair[1]))
                .collect()
        })
    }
}
