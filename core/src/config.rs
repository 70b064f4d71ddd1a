use serde::{Deserialize, Serialize};

use crate::*;

/// How many cells there are for one mine. The higher the number, the emptier the board.
pub const MINE_SPARSITY: CellCount = 4;

/// Board size used when nothing else is configured.
pub const DEFAULT_SIZE: Coord = 20;

const fn default_mine_sparsity() -> CellCount {
    MINE_SPARSITY
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord,
    #[serde(default = "default_mine_sparsity")]
    pub mine_sparsity: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord, mine_sparsity: CellCount) -> Self {
        Self {
            size,
            mine_sparsity,
        }
    }

    pub fn new(size: Coord) -> Result<Self> {
        Self::new_unchecked(size, MINE_SPARSITY).validated()
    }

    pub fn with_mine_sparsity(self, mine_sparsity: CellCount) -> Result<Self> {
        Self::new_unchecked(self.size, mine_sparsity).validated()
    }

    /// Parses a JSON document such as `{"size": 12}` or `{"size": 12, "mine_sparsity": 6}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|err| {
            log::debug!("Rejected game configuration: {}", err);
            GameError::InvalidConfig
        })?;
        config.validated()
    }

    pub fn validate(&self) -> Result<()> {
        if self.size < 1 {
            return Err(GameError::InvalidSize);
        }
        if self.mine_sparsity == 0 {
            return Err(GameError::InvalidSparsity);
        }
        Ok(())
    }

    fn validated(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }

    pub const fn total_cells(&self) -> CellCount {
        square(self.size)
    }

    /// Cells off the border, the only ones that may hold a mine.
    pub const fn interior_cells(&self) -> CellCount {
        square(self.size.saturating_sub(2))
    }

    pub const fn target_mines(&self) -> CellCount {
        if self.mine_sparsity == 0 {
            return 0;
        }
        self.interior_cells() / self.mine_sparsity
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(DEFAULT_SIZE, MINE_SPARSITY)
    }
}
