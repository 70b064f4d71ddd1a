use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Mine positions of one game, fixed until the next reset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SavedMineLayout")]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

/// Serialised form of a [`MineLayout`]; the mask is re-validated and the mines recounted on load.
#[derive(Deserialize)]
struct SavedMineLayout {
    mine_mask: Array2<bool>,
}

impl TryFrom<SavedMineLayout> for MineLayout {
    type Error = GameError;

    fn try_from(saved: SavedMineLayout) -> Result<Self> {
        Self::from_mine_mask(saved.mine_mask)
    }
}

impl MineLayout {
    /// Layout of a `size` x `size` board without any mine.
    pub fn empty(size: Coord) -> Result<Self> {
        Self::from_mine_coords(size, &[])
    }

    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let (rows, cols) = mine_mask.dim();
        if rows != cols || rows == 0 || Coord::try_from(rows).is_err() {
            return Err(GameError::InvalidBoardShape);
        }

        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Ok(Self::from_square_mask(mine_mask, mine_count))
    }

    /// `mine_mask` must be a non-empty square whose side fits in [`Coord`].
    pub(crate) fn from_square_mask(mine_mask: Array2<bool>, mine_count: CellCount) -> Self {
        Self {
            mine_mask,
            mine_count,
        }
    }

    pub fn from_mine_coords(size: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        GameConfig::new(size)?;
        let mut mine_mask: Array2<bool> = Array2::default((size, size).to_nd_index());

        for &coords in mine_coords {
            if !in_bounds(coords, size) {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Self::from_mine_mask(mine_mask)
    }

    pub fn size(&self) -> Coord {
        // side length is checked to fit on construction
        self.mine_mask.nrows() as Coord
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        in_bounds(coords, self.size()) && self[coords]
    }

    /// Whether every mine sits off the border.
    pub fn has_clear_border(&self) -> bool {
        let last = self.mine_mask.nrows() - 1;
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .all(|((x, y), _)| x != 0 && y != 0 && x != last && y != last)
    }

    /// Mines among the up to eight cells surrounding `coords`.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords).filter(|&pos| self[pos]).count() as u8
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.mine_mask.iter_neighbors(coords)
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_adjacent_mines() {
        let layout = MineLayout::from_mine_coords(4, &[(1, 1), (1, 2), (2, 2)]).unwrap();

        assert_eq!(layout.mine_count(), 3);
        assert_eq!(layout.adjacent_mine_count((0, 0)), 1);
        assert_eq!(layout.adjacent_mine_count((2, 1)), 3);
        assert_eq!(layout.adjacent_mine_count((3, 3)), 1);
        assert_eq!(layout.adjacent_mine_count((1, 1)), 2);
    }

    #[test]
    fn rejects_out_of_range_mines() {
        assert_eq!(
            MineLayout::from_mine_coords(3, &[(3, 0)]),
            Err(GameError::InvalidCoords)
        );
        assert_eq!(
            MineLayout::from_mine_coords(3, &[(0, -1)]),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn rejects_non_square_masks() {
        let mask = Array2::from_elem([2, 3], false);
        assert_eq!(MineLayout::from_mine_mask(mask), Err(GameError::InvalidBoardShape));
    }

    #[test]
    fn restore_validates_mask_and_recounts() {
        let layout = MineLayout::from_mine_coords(4, &[(1, 1), (2, 2)]).unwrap();
        let mut value = serde_json::to_value(&layout).unwrap();
        value["mine_count"] = serde_json::Value::from(9);

        let restored: MineLayout = serde_json::from_value(value).unwrap();
        assert_eq!(restored, layout);
        assert_eq!(restored.mine_count(), 2);

        let non_square = serde_json::json!({
            "mine_mask": {"v": 1, "dim": [2, 3], "data": [false, false, false, false, true, false]},
            "mine_count": 1,
        });
        assert!(serde_json::from_value::<MineLayout>(non_square).is_err());
    }

    #[test]
    fn detects_mined_border() {
        let layout = MineLayout::from_mine_coords(4, &[(1, 2)]).unwrap();
        assert!(layout.has_clear_border());

        let layout = MineLayout::from_mine_coords(4, &[(1, 3)]).unwrap();
        assert!(!layout.has_clear_border());
    }

    #[test]
    fn contains_mine_is_false_off_board() {
        let layout = MineLayout::from_mine_coords(3, &[(1, 1)]).unwrap();
        assert!(layout.contains_mine((1, 1)));
        assert!(!layout.contains_mine((0, 1)));
        assert!(!layout.contains_mine((-1, 1)));
        assert!(!layout.contains_mine((1, 3)));
    }
}
