use ndarray::Array2;

use super::*;

/// Scans the interior once in row-major order, placing each mine with probability `mines_left / fields_left`.
///
/// That probability reaches 1 once only as many cells remain as mines are still owed, so the scan always lands exactly
/// on [`GameConfig::target_mines`]. Border cells are never mined.
#[derive(Clone, Debug, PartialEq)]
pub struct SparseInteriorGenerator {
    seed: u64,
}

impl SparseInteriorGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinefieldGenerator for SparseInteriorGenerator {
    fn generate(self, config: &GameConfig) -> MineLayout {
        use rand::prelude::*;

        let size = config.size.max(1);
        let mut mines: Array2<bool> = Array2::default((size, size).to_nd_index());

        let target = config.target_mines();
        let mut fields_left = config.interior_cells();
        let mut mines_left = target;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        for x in 1..size - 1 {
            for y in 1..size - 1 {
                let probability = f64::from(mines_left) / f64::from(fields_left);
                if rng.random::<f64>() < probability {
                    mines[(x, y).to_nd_index()] = true;
                    mines_left -= 1;
                }
                fields_left -= 1;
            }
        }

        // double check mine count
        let count = mines.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        if count != target {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, requested: {}",
                count,
                target
            );
        }

        MineLayout::from_square_mask(mines, count)
    }
}
