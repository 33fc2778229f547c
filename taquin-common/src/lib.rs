//! Common types for the 15-puzzle: the board, the moves of the blank and the
//! text formats used to load and print them.

pub mod board;
pub mod direction;
