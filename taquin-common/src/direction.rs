use crate::board::{Board, BoardError};

use std::fmt;

/// The direction the blank travels when a move is played.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// `(row, col)` delta applied to the blank.
    pub fn offset(&self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn letter(&self) -> char {
        match self {
            Direction::Up => 'U',
            Direction::Down => 'D',
            Direction::Left => 'L',
            Direction::Right => 'R',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Left => "Left",
            Direction::Right => "Right",
        };
        f.write_str(s)
    }
}

/// Formats directions as a block of letters, runs of the same direction
/// collapsed into `3U` style tokens, ten tokens per line.
pub fn format_directions(directions: &[Direction]) -> String {
    let mut list = vec![];
    let mut i = 0;
    while i < directions.len() {
        let direction = directions[i];
        let mut count = 1;
        while i + count < directions.len() && directions[i + count] == direction {
            count += 1;
        }
        let token = if count == 1 {
            direction.letter().to_string()
        } else {
            format!("{count}{}", direction.letter())
        };
        list.push(token);
        i += count;
    }

    let mut output = String::new();
    let max_width = list.iter().map(|s| s.len()).max().unwrap_or_default() + 1;
    for chunk in list.chunks(10) {
        for token in chunk {
            output.push_str(&format!("{token:<width$}", width = max_width));
        }
        output.push('\n');
    }

    output
}

/// Plays `directions` from `board`, failing on the first illegal move.
pub fn apply_directions(board: &Board, directions: &[Direction]) -> Result<Board, BoardError> {
    directions
        .iter()
        .try_fold(*board, |current, &direction| current.forecast(direction))
}
