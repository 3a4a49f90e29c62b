use ndarray::Array2;
use rand::Rng;

use crate::*;

pub trait LayoutGenerator {
    fn generate(self, config: BoardConfig) -> Result<MineLayout>;
}

/// Purely random placement: draws uniform coordinates and retries whenever a cell already holds a mine.
#[derive(Debug)]
pub struct RandomLayoutGenerator<R> {
    rng: R,
}

impl<R: Rng> RandomLayoutGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> LayoutGenerator for RandomLayoutGenerator<R> {
    fn generate(mut self, config: BoardConfig) -> Result<MineLayout> {
        config.validate()?;

        let size = config.size();
        let mut mines: Array2<bool> = Array2::default(size.to_nd_index());
        let mut mines_placed: CellCount = 0;
        let mut draws: u64 = 0;

        while mines_placed < config.mines {
            let coords = (
                self.rng.random_range(0..size.0),
                self.rng.random_range(0..size.1),
            );
            draws += 1;

            let cell = &mut mines[coords.to_nd_index()];
            if !*cell {
                *cell = true;
                mines_placed += 1;
            }
        }

        log::debug!(
            "Placed {} mines on {}x{} board after {} draws",
            mines_placed,
            size.0,
            size.1,
            draws
        );
        Ok(MineLayout::from_mine_mask(mines))
    }
}
