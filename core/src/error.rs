use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Invalid board size")]
    InvalidSize,
    #[error("Too many mines")]
    TooManyMines,
    #[error("Mines have already been placed on this board")]
    MinesAlreadyPlaced,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
#[error("Unknown difficulty, expected one of: easy, medium, hard")]
pub struct UnknownDifficulty;

pub type Result<T> = core::result::Result<T, GameError>;
