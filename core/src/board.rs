use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::InProgress
    }
}

/// A single game: the mine layout, what the player sees of it, and whether the game is still on.
///
/// Moves that do not apply (off-board coordinates, cells already uncovered, a finished game) are silently ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SavedBoard")]
pub struct Board {
    config: GameConfig,
    mine_layout: MineLayout,
    grid: Array2<DisplayCode>,
    hidden_count: CellCount,
    marked_count: CellCount,
    status: GameStatus,
    triggered_mine: Option<Coord2>,
}

/// Serialised form of a [`Board`]. Counters are rebuilt from the grid on load and every cell is checked against the
/// mine layout.
#[derive(Deserialize)]
struct SavedBoard {
    config: GameConfig,
    mine_layout: MineLayout,
    grid: Array2<DisplayCode>,
    status: GameStatus,
    triggered_mine: Option<Coord2>,
}

impl TryFrom<SavedBoard> for Board {
    type Error = GameError;

    fn try_from(saved: SavedBoard) -> Result<Self> {
        let SavedBoard {
            config,
            mine_layout,
            grid,
            status,
            triggered_mine,
        } = saved;

        config.validate()?;
        let size = mine_layout.size();
        if config.size != size || grid.dim() != (size as usize, size as usize) {
            return Err(GameError::InvalidBoardShape);
        }
        if !mine_layout.has_clear_border() {
            return Err(GameError::MinedBorder);
        }

        let mut hidden_count = 0;
        let mut marked_count = 0;
        let mut triggered = None;
        for ((x, y), &code) in grid.indexed_iter() {
            let coords = (x as Coord, y as Coord);
            match code {
                DisplayCode::Hidden => hidden_count += 1,
                DisplayCode::Marked => marked_count += 1,
                DisplayCode::TriggeredMine if mine_layout[coords] && triggered.is_none() => {
                    triggered = Some(coords);
                }
                DisplayCode::Revealed(count)
                    if !mine_layout[coords] && count == mine_layout.adjacent_mine_count(coords) => {}
                _ => return Err(GameError::InconsistentBoard),
            }
        }

        let consistent = triggered == triggered_mine
            && match status {
                GameStatus::InProgress => triggered.is_none() && hidden_count > 0,
                GameStatus::Won => triggered.is_none() && hidden_count == 0,
                GameStatus::Lost => triggered.is_some(),
            };
        if !consistent {
            return Err(GameError::InconsistentBoard);
        }

        Ok(Self {
            config,
            mine_layout,
            grid,
            hidden_count,
            marked_count,
            status,
            triggered_mine,
        })
    }
}

impl Board {
    /// Starts a game on a `size` x `size` board with randomly placed mines.
    pub fn new(size: Coord) -> Result<Self> {
        Self::from_config(GameConfig::new(size)?)
    }

    pub fn from_config(config: GameConfig) -> Result<Self> {
        Self::with_seed(config, rand::random())
    }

    /// Same seed and config always produce the same mine layout.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let mine_layout = SparseInteriorGenerator::new(seed).generate(&config);
        Ok(Self::start(config, mine_layout))
    }

    /// Starts a game on a fixed layout. Later resets go back to random layouts of the same size.
    pub fn with_layout(mine_layout: MineLayout) -> Result<Self> {
        if !mine_layout.has_clear_border() {
            return Err(GameError::MinedBorder);
        }
        let config = GameConfig::new(mine_layout.size())?;
        Ok(Self::start(config, mine_layout))
    }

    fn start(config: GameConfig, mine_layout: MineLayout) -> Self {
        let size = mine_layout.size();
        log::debug!(
            "New game on {}x{} board with {} mines",
            size,
            size,
            mine_layout.mine_count()
        );
        Self {
            config,
            mine_layout,
            grid: Array2::default((size, size).to_nd_index()),
            hidden_count: square(size),
            marked_count: 0,
            status: GameStatus::InProgress,
            triggered_mine: None,
        }
    }

    /// Replaces the mines and the visible grid, and puts the game back in progress.
    pub fn new_game(&mut self) {
        self.new_game_with_seed(rand::random());
    }

    pub fn new_game_with_seed(&mut self, seed: u64) {
        let mine_layout = SparseInteriorGenerator::new(seed).generate(&self.config);
        *self = Self::start(self.config, mine_layout);
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn size(&self) -> Coord {
        self.mine_layout.size()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    /// The player-visible grid, indexed `[x, y]`.
    pub fn visible_grid(&self) -> &Array2<DisplayCode> {
        &self.grid
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<DisplayCode> {
        self.are_valid_coordinates(coords)
            .then(|| self.grid[coords.to_nd_index()])
    }

    pub fn mine_layout(&self) -> &MineLayout {
        &self.mine_layout
    }

    pub fn is_mine(&self, coords: Coord2) -> bool {
        self.mine_layout.contains_mine(coords)
    }

    pub fn are_valid_coordinates(&self, coords: Coord2) -> bool {
        in_bounds(coords, self.size())
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_layout.mine_count()
    }

    pub fn hidden_count(&self) -> CellCount {
        self.hidden_count
    }

    pub fn marked_count(&self) -> CellCount {
        self.marked_count
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Uncovers a hidden cell and reports whether it held a mine.
    pub fn uncover(&mut self, coords: Coord2) -> bool {
        self.reveal(coords) == RevealOutcome::HitMine
    }

    /// Uncovers a hidden cell. A cell with no adjacent mines also uncovers its whole zero region and the numbered cells
    /// bordering it.
    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        if !self.accepts_move_at(coords) {
            return RevealOutcome::NoChange;
        }
        if !self.grid[coords.to_nd_index()].is_hidden() {
            return RevealOutcome::NoChange;
        }

        if self.mine_layout[coords] {
            self.grid[coords.to_nd_index()] = DisplayCode::TriggeredMine;
            self.hidden_count -= 1;
            self.triggered_mine = Some(coords);
            self.status = GameStatus::Lost;
            log::debug!("Mine triggered at {:?}", coords);
            return RevealOutcome::HitMine;
        }

        let revealed = self.flood_reveal(coords);
        log::trace!("Uncovering {:?} revealed {} cells", coords, revealed);

        if self.check_for_win() {
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    /// Toggles a mark on a hidden cell. Revealed cells and triggered mines are left alone.
    pub fn mark(&mut self, coords: Coord2) -> MarkOutcome {
        if !self.accepts_move_at(coords) {
            return MarkOutcome::NoChange;
        }

        let index = coords.to_nd_index();
        match self.grid[index] {
            DisplayCode::Hidden => {
                self.grid[index] = DisplayCode::Marked;
                self.hidden_count -= 1;
                self.marked_count += 1;
                self.check_for_win();
                MarkOutcome::Changed
            }
            DisplayCode::Marked => {
                self.grid[index] = DisplayCode::Hidden;
                self.hidden_count += 1;
                self.marked_count -= 1;
                MarkOutcome::Changed
            }
            DisplayCode::TriggeredMine | DisplayCode::Revealed(_) => MarkOutcome::NoChange,
        }
    }

    fn accepts_move_at(&self, coords: Coord2) -> bool {
        !self.status.is_finished() && self.are_valid_coordinates(coords)
    }

    /// Reveals `start`, which must be hidden and safe, cascading through zero cells. Returns the number of cells
    /// revealed.
    fn flood_reveal(&mut self, start: Coord2) -> CellCount {
        let mut revealed = 0;
        let mut to_visit = Vec::from([start]);

        while let Some(coords) = to_visit.pop() {
            if !self.grid[coords.to_nd_index()].is_hidden() {
                continue;
            }

            let adjacent_mines = self.mine_layout.adjacent_mine_count(coords);
            self.grid[coords.to_nd_index()] = DisplayCode::Revealed(adjacent_mines);
            self.hidden_count -= 1;
            revealed += 1;

            if adjacent_mines == 0 {
                let grid = &self.grid;
                to_visit.extend(
                    self.mine_layout
                        .iter_neighbors(coords)
                        .filter(|&pos| grid[pos.to_nd_index()].is_hidden()),
                );
            }
        }

        revealed
    }

    /// Marked cells count as cleared, so marking every remaining hidden cell wins even when the marks are wrong.
    fn check_for_win(&mut self) -> bool {
        if self.hidden_count == 0 {
            self.status = GameStatus::Won;
            log::debug!("Game won with {} cells marked", self.marked_count);
            true
        } else {
            false
        }
    }
}
