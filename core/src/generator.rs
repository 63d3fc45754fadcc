use alloc::vec::Vec;
use ndarray::Array2;
use rand::{Rng, SeedableRng, rngs::SmallRng, seq::SliceRandom};

use crate::*;

pub trait MineGenerator {
    /// Produces a mine mask of `size`, indexed `[y, x]`, holding exactly `mines` mines.
    fn generate(self, size: Coord2, mines: CellCount) -> Result<Array2<bool>>;
}

/// Uniform placement that keeps the first-clicked cell and its neighbors free of mines.
///
/// The candidate list (every cell outside the safe zone) is shuffled just far enough
/// to take `mines` entries, so the cost is bounded and infeasible counts are rejected
/// up front instead of being retried forever.
#[derive(Clone, Debug, PartialEq)]
pub struct SafeZoneGenerator<R> {
    rng: R,
    exclude: Coord2,
}

impl<R: Rng> SafeZoneGenerator<R> {
    pub fn new(rng: R, exclude: Coord2) -> Self {
        Self { rng, exclude }
    }
}

impl SafeZoneGenerator<SmallRng> {
    pub fn seeded(seed: u64, exclude: Coord2) -> Self {
        Self::new(SmallRng::seed_from_u64(seed), exclude)
    }
}

impl<R: Rng> MineGenerator for SafeZoneGenerator<R> {
    fn generate(mut self, size: Coord2, mines: CellCount) -> Result<Array2<bool>> {
        let (width, height) = size;
        if self.exclude.0 >= width || self.exclude.1 >= height {
            return Err(GameError::InvalidCoords);
        }

        let mut safe_zone: Array2<bool> = Array2::default((height as usize, width as usize));
        safe_zone[self.exclude.to_nd_index()] = true;
        for coords in NeighborIter::new(self.exclude, size) {
            safe_zone[coords.to_nd_index()] = true;
        }

        let mut candidates: Vec<Coord2> = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .filter(|&coords| !safe_zone[coords.to_nd_index()])
            .collect();

        if usize::from(mines) > candidates.len() {
            log::warn!(
                "Cannot place {} mines, only {} cells are outside the safe zone",
                mines,
                candidates.len()
            );
            return Err(GameError::TooManyMines);
        }

        let (chosen, _) = candidates.partial_shuffle(&mut self.rng, mines.into());
        let mut mine_mask: Array2<bool> = Array2::default((height as usize, width as usize));
        for &coords in chosen.iter() {
            mine_mask[coords.to_nd_index()] = true;
        }

        log::debug!(
            "Placed {} mines on {}x{}, safe zone around {:?}",
            mines,
            width,
            height,
            self.exclude
        );
        Ok(mine_mask)
    }
}
