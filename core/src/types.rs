use ndarray::Array2;

/// Single coordinate axis used for board size and positions.
///
/// Signed so that positions a view layer computes off the board (e.g. `-1`) stay representable and can be rejected.
pub type Coord = i16;

/// Count type used for mine counts and cell counts.
pub type CellCount = u32;

/// Two-dimensional coordinates `(x, y)`, `x` selects the row and `y` the column.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    /// Callers must have bounds-checked the coordinates; negative values are not valid indices.
    fn to_nd_index(self) -> Self::Output {
        [self.0 as usize, self.1 as usize]
    }
}

/// Number of cells in a `side` x `side` square.
pub const fn square(side: Coord) -> CellCount {
    if side <= 0 {
        return 0;
    }
    let side = side as CellCount;
    side.saturating_mul(side)
}

/// Whether `coords` lies within a square grid of side `size`.
pub const fn in_bounds(coords: Coord2, size: Coord) -> bool {
    0 <= coords.0 && coords.0 < size && 0 <= coords.1 && coords.1 < size
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        let (rows, _) = self.dim();
        NeighborIter::new(index, Coord::try_from(rows).unwrap_or(Coord::MAX))
    }
}

const DISPLACEMENTS: [(Coord, Coord); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: Coord2, size: Coord) -> Option<Coord2> {
    let next = (
        coords.0.checked_add(delta.0)?,
        coords.1.checked_add(delta.1)?,
    );
    in_bounds(next, size).then_some(next)
}

/// Moore neighbourhood of a cell, clipped to a square grid.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    size: Coord,
    index: u8,
}

impl NeighborIter {
    pub(crate) fn new(center: Coord2, size: Coord) -> Self {
        Self {
            center,
            size,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item = apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.size);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn corner_has_three_neighbors() {
        let neighbors: Vec<_> = NeighborIter::new((0, 0), 3).collect();
        assert_eq!(neighbors, [(1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn center_has_eight_neighbors() {
        assert_eq!(NeighborIter::new((1, 1), 3).count(), 8);
    }

    #[test]
    fn single_cell_grid_has_no_neighbors() {
        assert_eq!(NeighborIter::new((0, 0), 1).count(), 0);
    }

    #[test]
    fn bounds_reject_negative_and_overflowing_coords() {
        assert!(in_bounds((0, 4), 5));
        assert!(!in_bounds((5, 0), 5));
        assert!(!in_bounds((2, -1), 5));
        assert_eq!(square(0), 0);
        assert_eq!(square(-3), 0);
        assert_eq!(square(20), 400);
    }
}
