//! Estimates of the number of moves left to reach the goal.
//!
//! All of them ignore the blank. Any `Fn(&Board) -> u32` can be handed to the
//! solver; these are the stock ones.

use taquin_common::board::{BLANK, Board, SIZE};

use std::fmt;

#[inline]
fn goal_cell(tile: u8) -> usize {
    tile as usize - 1
}

/// Number of tiles `1..=15` not on their goal cell.
pub fn misplaced_tiles(board: &Board) -> u32 {
    board
        .tiles()
        .iter()
        .enumerate()
        .filter(|&(idx, &tile)| tile != BLANK && goal_cell(tile) != idx)
        .count() as u32
}

/// Sum over tiles `1..=15` of the row and column distance to the goal cell.
pub fn manhattan_distance(board: &Board) -> u32 {
    board
        .tiles()
        .iter()
        .enumerate()
        .filter(|&(_, &tile)| tile != BLANK)
        .map(|(idx, &tile)| {
            let goal = goal_cell(tile);
            ((idx / SIZE).abs_diff(goal / SIZE) + (idx % SIZE).abs_diff(goal % SIZE)) as u32
        })
        .sum()
}

/// Manhattan distance plus two moves for every tile that has to leave its
/// goal row (or column) so the others in that line can pass each other.
pub fn linear_conflict(board: &Board) -> u32 {
    let tiles = board.tiles();
    let mut extra = 0;
    for line in 0..SIZE {
        // Goal column of each tile already sitting in its goal row, left to right.
        let row: Vec<usize> = (0..SIZE)
            .map(|col| tiles[line * SIZE + col])
            .filter(|&t| t != BLANK && goal_cell(t) / SIZE == line)
            .map(|t| goal_cell(t) % SIZE)
            .collect();
        extra += line_conflicts(&row);

        let column: Vec<usize> = (0..SIZE)
            .map(|row| tiles[row * SIZE + line])
            .filter(|&t| t != BLANK && goal_cell(t) % SIZE == line)
            .map(|t| goal_cell(t) / SIZE)
            .collect();
        extra += line_conflicts(&column);
    }
    manhattan_distance(board) + 2 * extra
}

/// Minimum number of tiles to pull out of a line so the rest are in goal order.
fn line_conflicts(targets: &[usize]) -> u32 {
    let mut present: Vec<usize> = targets.to_vec();
    let mut removed = 0;
    loop {
        let conflicts: Vec<usize> = (0..present.len())
            .map(|i| {
                (0..present.len())
                    .filter(|&j| {
                        (i < j && present[i] > present[j]) || (j < i && present[j] > present[i])
                    })
                    .count()
            })
            .collect();
        let Some((worst, &count)) = conflicts.iter().enumerate().max_by_key(|&(_, c)| *c) else {
            break;
        };
        if count == 0 {
            break;
        }
        present.remove(worst);
        removed += 1;
    }
    removed
}

/// The heuristics selectable by name.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum HeuristicKind {
    Misplaced,
    #[default]
    Manhattan,
    LinearConflict,
}

impl HeuristicKind {
    pub const ALL: [HeuristicKind; 3] = [
        HeuristicKind::Misplaced,
        HeuristicKind::Manhattan,
        HeuristicKind::LinearConflict,
    ];

    pub fn function(&self) -> fn(&Board) -> u32 {
        match self {
            HeuristicKind::Misplaced => misplaced_tiles,
            HeuristicKind::Manhattan => manhattan_distance,
            HeuristicKind::LinearConflict => linear_conflict,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            HeuristicKind::Misplaced => "misplaced",
            HeuristicKind::Manhattan => "manhattan",
            HeuristicKind::LinearConflict => "linear-conflict",
        }
    }
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
