use crate::direction::Direction;

use anyhow::{Context, Result, bail};
use rand::{Rng, SeedableRng, rngs::StdRng};
use smallvec::SmallVec;
use std::fmt;

pub const SIZE: usize = 4;
pub const CELLS: usize = SIZE * SIZE;
pub const BLANK: u8 = 0;

const GOAL: [u8; CELLS] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, BLANK];

pub type Moves = SmallVec<[Direction; 4]>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// The blank cannot travel in this direction from its current cell.
    InvalidMove(Direction),
    /// The tiles are not a permutation of `0..16`.
    InvalidTiles { detail: String },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMove(direction) => write!(f, "illegal move: blank cannot go {direction}"),
            Self::InvalidTiles { detail } => write!(f, "invalid tiles: {detail}"),
        }
    }
}

impl std::error::Error for BoardError {}

/// One 4x4 configuration, stored row-major. `0` is the blank.
///
/// Boards are immutable values: every move produces a new board through
/// [`Board::forecast`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    tiles: [u8; CELLS],
    blank: u8,
}

impl Board {
    pub fn new(grid: [[u8; SIZE]; SIZE]) -> Result<Self, BoardError> {
        let mut tiles = [BLANK; CELLS];
        for (row, values) in grid.iter().enumerate() {
            tiles[row * SIZE..(row + 1) * SIZE].copy_from_slice(values);
        }
        Self::from_tiles(tiles)
    }

    pub fn from_tiles(tiles: [u8; CELLS]) -> Result<Self, BoardError> {
        let mut seen = [false; CELLS];
        for (idx, &tile) in tiles.iter().enumerate() {
            let Some(slot) = seen.get_mut(tile as usize) else {
                return Err(BoardError::InvalidTiles {
                    detail: format!("tile {tile} at cell {idx} is out of range"),
                });
            };
            if *slot {
                return Err(BoardError::InvalidTiles {
                    detail: format!("tile {tile} appears more than once"),
                });
            }
            *slot = true;
        }
        let blank = tiles.iter().position(|&t| t == BLANK).unwrap_or_default() as u8;
        Ok(Self { tiles, blank })
    }

    /// The goal configuration: `1..=15` row-major, blank in the last cell.
    pub fn solved() -> Self {
        Self {
            tiles: GOAL,
            blank: (CELLS - 1) as u8,
        }
    }

    /// Scrambles the goal with a seeded random walk of `steps` moves that
    /// never immediately undoes the previous one.
    pub fn new_from_seed(seed: u64, steps: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut board = Self::solved();
        let mut last: Option<Direction> = None;
        for _ in 0..steps {
            let choices: SmallVec<[(Direction, usize); 4]> = Direction::ALL
                .into_iter()
                .filter(|&d| Some(d.opposite()) != last)
                .filter_map(|d| board.neighbor(d).map(|idx| (d, idx)))
                .collect();
            let (direction, idx) = choices[rng.random_range(0..choices.len())];
            board = board.slide(idx);
            last = Some(direction);
        }
        board
    }

    pub fn tiles(&self) -> &[u8; CELLS] {
        &self.tiles
    }

    pub fn tile(&self, row: usize, col: usize) -> u8 {
        self.tiles[row * SIZE + col]
    }

    /// `(row, col)` of the blank.
    pub fn blank(&self) -> (usize, usize) {
        let idx = self.blank as usize;
        (idx / SIZE, idx % SIZE)
    }

    pub fn is_solved(&self) -> bool {
        self.tiles == GOAL
    }

    /// Directions the blank can travel without leaving the grid: two in a
    /// corner, three on an edge, four in the interior.
    pub fn legal_moves(&self) -> Moves {
        Direction::ALL
            .into_iter()
            .filter(|&d| self.neighbor(d).is_some())
            .collect()
    }

    /// The board reached by sliding the blank one cell in `direction`.
    pub fn forecast(&self, direction: Direction) -> Result<Self, BoardError> {
        match self.neighbor(direction) {
            Some(idx) => Ok(self.slide(idx)),
            None => Err(BoardError::InvalidMove(direction)),
        }
    }

    /// The single move leading from `self` to `next`, if there is one.
    pub fn direction_to(&self, next: &Board) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&d| self.neighbor(d).is_some_and(|idx| self.slide(idx) == *next))
    }

    /// Inversion parity test. On an even-width grid a board is reachable
    /// from the goal iff `inversions + blank_row` is odd (rows counted from
    /// the top, starting at 0).
    pub fn is_solvable(&self) -> bool {
        let (blank_row, _) = self.blank();
        (self.inversions() + blank_row) % 2 == 1
    }

    fn inversions(&self) -> usize {
        self.tiles
            .iter()
            .enumerate()
            .filter(|&(_, &tile)| tile != BLANK)
            .map(|(i, &tile)| {
                self.tiles[i + 1..]
                    .iter()
                    .filter(|&&next| next != BLANK && next < tile)
                    .count()
            })
            .sum()
    }

    fn neighbor(&self, direction: Direction) -> Option<usize> {
        let (row, col) = self.blank();
        let (dr, dc) = direction.offset();
        let row = row.checked_add_signed(dr).filter(|&r| r < SIZE)?;
        let col = col.checked_add_signed(dc).filter(|&c| c < SIZE)?;
        Some(row * SIZE + col)
    }

    fn slide(&self, idx: usize) -> Self {
        let mut tiles = self.tiles;
        tiles.swap(self.blank as usize, idx);
        Self {
            tiles,
            blank: idx as u8,
        }
    }

    /// Reads 16 tiles separated by whitespace and/or commas, one per line or
    /// four per row. `.` or `_` stand for the blank.
    pub fn parse(content: &str) -> Result<Self> {
        let mut tiles = Vec::with_capacity(CELLS);
        for token in content
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
        {
            let tile = match token {
                "." | "_" => BLANK,
                _ => token
                    .parse::<u8>()
                    .with_context(|| format!("Invalid tile '{token}'"))?,
            };
            tiles.push(tile);
        }
        if tiles.len() != CELLS {
            bail!("Expected {CELLS} tiles, found {}", tiles.len());
        }
        let mut grid = [BLANK; CELLS];
        grid.copy_from_slice(&tiles);
        Self::from_tiles(grid).context("Invalid board")
    }

    pub fn pretty_print(&self) -> String {
        self.tiles
            .chunks(SIZE)
            .map(|row| {
                row.iter()
                    .map(|&tile| match tile {
                        BLANK => " .".to_string(),
                        _ => format!("{tile:>2}"),
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::solved()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pretty_print())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_blank_at(idx: usize) -> Board {
        let mut tiles = GOAL;
        tiles.swap(idx, CELLS - 1);
        Board::from_tiles(tiles).unwrap()
    }

    #[test]
    fn test_parse_board() {
        const BOARD_STR: &str = " 1  2  3  4
 5  6  .  8
 9 10  7 11
13 14 15 12";

        let board = Board::parse(BOARD_STR).unwrap();
        assert_eq!(board.blank(), (1, 2));
        assert_eq!(board.tile(2, 2), 7);
        assert_eq!(BOARD_STR, board.pretty_print());
    }

    #[test]
    fn test_parse_one_tile_per_line() {
        let content = GOAL.map(|t| t.to_string()).join("\n");
        assert_eq!(Board::parse(&content).unwrap(), Board::solved());
        let content = GOAL.map(|t| t.to_string()).join(", ");
        assert_eq!(Board::parse(&content).unwrap(), Board::solved());
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(Board::parse("1 2 3").is_err());
        assert!(Board::parse("1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 15").is_err());
        assert!(Board::parse("1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16").is_err());
        assert!(Board::parse("1 2 3 4 5 6 7 8 9 10 11 12 13 14 x 0").is_err());
    }

    #[test]
    fn test_new_validates_permutation() {
        let board = Board::new([[1, 2, 3, 4], [5, 6, 7, 8], [9, 10, 11, 12], [13, 14, 15, 0]]);
        assert_eq!(board, Ok(Board::solved()));
        let board = Board::new([[1, 1, 3, 4], [5, 6, 7, 8], [9, 10, 11, 12], [13, 14, 15, 0]]);
        assert!(matches!(board, Err(BoardError::InvalidTiles { .. })));
    }

    #[test]
    fn test_is_solved_only_for_goal() {
        assert!(Board::solved().is_solved());
        for idx in 0..CELLS - 1 {
            assert!(!with_blank_at(idx).is_solved());
        }
        let mut tiles = GOAL;
        tiles.swap(13, 14);
        assert!(!Board::from_tiles(tiles).unwrap().is_solved());
    }

    #[test]
    fn test_legal_moves_count() {
        for idx in 0..CELLS {
            let (row, col) = (idx / SIZE, idx % SIZE);
            let on_row_edge = row == 0 || row == SIZE - 1;
            let on_col_edge = col == 0 || col == SIZE - 1;
            let expected = match (on_row_edge, on_col_edge) {
                (true, true) => 2,
                (true, false) | (false, true) => 3,
                (false, false) => 4,
            };
            assert_eq!(with_blank_at(idx).legal_moves().len(), expected, "blank at {idx}");
        }
    }

    #[test]
    fn test_forecast_matches_legal_moves() {
        for idx in 0..CELLS {
            let board = with_blank_at(idx);
            let legal = board.legal_moves();
            for direction in Direction::ALL {
                let result = board.forecast(direction);
                if legal.contains(&direction) {
                    let next = result.unwrap();
                    let (row, col) = board.blank();
                    let (dr, dc) = direction.offset();
                    let expected = ((row as isize + dr) as usize, (col as isize + dc) as usize);
                    assert_eq!(next.blank(), expected);
                    assert_eq!(next.tile(row, col), board.tile(expected.0, expected.1));
                    assert_eq!(board.direction_to(&next), Some(direction));
                } else {
                    assert_eq!(result, Err(BoardError::InvalidMove(direction)));
                }
            }
        }
    }

    #[test]
    fn test_forecast_leaves_original_untouched() {
        let board = Board::solved();
        let next = board.forecast(Direction::Up).unwrap();
        assert_ne!(board, next);
        assert!(board.is_solved());
        assert_eq!(board.direction_to(&board), None);
    }

    #[test]
    fn test_is_solvable() {
        assert!(Board::solved().is_solvable());
        let mut tiles = GOAL;
        tiles.swap(13, 14);
        assert!(!Board::from_tiles(tiles).unwrap().is_solvable());
        for seed in 0..20 {
            assert!(Board::new_from_seed(seed, 60).is_solvable());
        }
    }

    #[test]
    fn test_new_from_seed() {
        assert_eq!(Board::new_from_seed(7, 40), Board::new_from_seed(7, 40));
        assert_eq!(Board::new_from_seed(7, 0), Board::solved());
        assert!(!Board::new_from_seed(7, 1).is_solved());
    }
}
