use thiserror::Error;

use crate::types::{CellCount, Coord, Coord2};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board dimensions must be positive, got {0}x{1}")]
    EmptyBoard(Coord, Coord),
    #[error("Too many mines, requested {mines} but the board only has {cells} cells")]
    TooManyMines { mines: CellCount, cells: CellCount },
    #[error("Coordinates {0:?} are outside the board")]
    OutOfBounds(Coord2),
    #[error("Game already ended, no new moves are accepted")]
    AlreadyTerminal,
}

impl GameError {
    /// Errors that prevent a board from being created at all.
    pub const fn is_config(self) -> bool {
        matches!(self, Self::EmptyBoard(..) | Self::TooManyMines { .. })
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
