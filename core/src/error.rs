use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board size must be at least 1")]
    InvalidSize,
    #[error("Mine sparsity must be at least 1")]
    InvalidSparsity,
    #[error("Malformed game configuration")]
    InvalidConfig,
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Mine layout is not a square matching the board size")]
    InvalidBoardShape,
    #[error("Mine layout places a mine on the border")]
    MinedBorder,
    #[error("Saved board does not agree with its mine layout")]
    InconsistentBoard,
    #[error("Unknown display code {0}")]
    InvalidDisplayCode(i8),
}

pub type Result<T> = core::result::Result<T, GameError>;
