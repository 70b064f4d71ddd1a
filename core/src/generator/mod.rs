use crate::*;
pub use sparse::*;

mod sparse;

pub trait MinefieldGenerator {
    fn generate(self, config: &GameConfig) -> MineLayout;
}
