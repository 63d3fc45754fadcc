use alloc::{vec, vec::Vec};
use core::ops::Index;
use ndarray::{Array2, ArrayView1};
use rand::Rng;
use serde::{Serialize, Serializer};

use crate::*;

/// Rectangular grid of cells, `height` rows of `width` columns.
///
/// Every operation borrows the current board and returns a new one, so a snapshot
/// held by the caller never changes underneath it.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    cells: Array2<Cell>,
}

impl Board {
    /// Builds a board of hidden, empty cells.
    pub fn new(width: Coord, height: Coord) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GameError::InvalidSize);
        }

        let cells = Array2::from_shape_fn((height as usize, width as usize), |(y, x)| {
            Cell::new((x as Coord, y as Coord))
        });
        Ok(Self { cells })
    }

    /// A fresh board of the same size, as after a reset.
    pub fn cleared(&self) -> Self {
        let cells = Array2::from_shape_fn(self.cells.dim(), |(y, x)| {
            Cell::new((x as Coord, y as Coord))
        });
        Self { cells }
    }

    /// Builds a board with mines at exactly `mine_coords`, counts already computed.
    pub fn from_mine_coords(width: Coord, height: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        let board = Self::new(width, height)?;
        let mut mine_mask: Array2<bool> = Array2::default(board.cells.dim());

        for &coords in mine_coords {
            let coords = board.validate_coords(coords)?;
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(board.with_mine_mask(&mine_mask))
    }

    pub fn width(&self) -> Coord {
        self.cells.ncols() as Coord
    }

    pub fn height(&self) -> Coord {
        self.cells.nrows() as Coord
    }

    /// `(width, height)`
    pub fn size(&self) -> Coord2 {
        (self.width(), self.height())
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.width(), self.height())
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (width, height) = self.size();
        if coords.0 < width && coords.1 < height {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell(&self, coords: Coord2) -> Result<&Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(&self.cells[coords.to_nd_index()])
    }

    /// Cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// One view per row, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = ArrayView1<'_, Cell>> {
        self.cells.rows().into_iter()
    }

    pub fn mine_count(&self) -> CellCount {
        self.iter().filter(|cell| cell.is_mine).count() as CellCount
    }

    pub fn has_mines(&self) -> bool {
        self.iter().any(|cell| cell.is_mine)
    }

    /// Scatters `mines` mines uniformly, keeping `exclude` and its neighbors safe.
    pub fn place_mines<R: Rng + ?Sized>(
        &self,
        mines: CellCount,
        exclude: Coord2,
        rng: &mut R,
    ) -> Result<Self> {
        self.place_mines_with(SafeZoneGenerator::new(rng, exclude), mines)
    }

    pub fn place_mines_with<G: MineGenerator>(&self, generator: G, mines: CellCount) -> Result<Self> {
        if self.has_mines() {
            return Err(GameError::MinesAlreadyPlaced);
        }

        let mine_mask = generator.generate(self.size(), mines)?;
        Ok(self.with_mine_mask(&mine_mask))
    }

    /// Opens `coords`, flood-filling outwards when it has no adjacent mines.
    ///
    /// Revealed and flagged cells are left alone; a revealed mine is what
    /// [`Board::status`] reports as a loss.
    pub fn reveal(&self, coords: Coord2) -> Result<Self> {
        let coords = self.validate_coords(coords)?;

        let mut board = self.clone();
        let revealed = board.flood_reveal(vec![coords]);
        log::trace!("reveal {:?}: {} cells opened", coords, revealed);
        Ok(board)
    }

    /// Toggles between hidden and flagged; revealed cells are unchanged.
    pub fn toggle_flag(&self, coords: Coord2) -> Result<Self> {
        use CellState::*;

        let coords = self.validate_coords(coords)?;

        let mut board = self.clone();
        let cell = &mut board.cells[coords.to_nd_index()];
        cell.state = match cell.state {
            Hidden => Flagged,
            Flagged => Hidden,
            Revealed => Revealed,
        };
        Ok(board)
    }

    /// Chord: on a revealed number whose flagged neighbors match its count, opens
    /// every other hidden neighbor. Flags are taken at face value, so a misplaced
    /// flag can open a mine.
    pub fn chord_reveal(&self, coords: Coord2) -> Result<Self> {
        let coords = self.validate_coords(coords)?;
        let cell = self[coords];

        if !cell.is_revealed_number() {
            return Ok(self.clone());
        }

        let mut flag_count = 0;
        let mut candidates = Vec::new();
        for pos in self.iter_neighbors(coords) {
            match self[pos].state {
                CellState::Flagged => flag_count += 1,
                CellState::Hidden => candidates.push(pos),
                CellState::Revealed => {}
            }
        }

        if flag_count != cell.mine_count {
            log::trace!(
                "chord {:?}: {} flags around a {}, nothing to do",
                coords,
                flag_count,
                cell.mine_count
            );
            return Ok(self.clone());
        }

        let mut board = self.clone();
        let revealed = board.flood_reveal(candidates);
        log::trace!("chord {:?}: {} cells opened", coords, revealed);
        Ok(board)
    }

    /// Forces every mine open, whatever its previous state.
    pub fn reveal_all_mines(&self) -> Self {
        let mut board = self.clone();
        board
            .cells
            .iter_mut()
            .filter(|cell| cell.is_mine)
            .for_each(|cell| cell.state = CellState::Revealed);
        board
    }

    /// Lost when any mine is open, won when every safe cell is open.
    pub fn status(&self, mine_count: CellCount) -> GameStatus {
        let mut revealed: CellCount = 0;
        for cell in self.iter().filter(|cell| cell.is_revealed()) {
            if cell.is_mine {
                return GameStatus::Lost;
            }
            revealed += 1;
        }

        if revealed == self.total_cells().saturating_sub(mine_count) {
            GameStatus::Won
        } else {
            GameStatus::Playing
        }
    }

    pub fn stats(&self) -> GameStats {
        let mut stats = GameStats::default();
        for cell in self.iter() {
            match cell.state {
                CellState::Revealed => stats.revealed_count += 1,
                CellState::Flagged => stats.flagged_count += 1,
                CellState::Hidden => {}
            }
        }
        stats
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    fn with_mine_mask(&self, mine_mask: &Array2<bool>) -> Self {
        let mut board = self.clone();
        for cell in board.cells.iter_mut() {
            let coords = cell.coords();
            let adjacent_mines = mine_mask
                .iter_neighbors(coords)
                .filter(|&pos| mine_mask[pos.to_nd_index()])
                .count();
            cell.arm(mine_mask[coords.to_nd_index()], adjacent_mines as u8);
        }
        board
    }

    /// Iterative flood fill seeded with `stack`. Returns how many cells were opened.
    fn flood_reveal(&mut self, mut stack: Vec<Coord2>) -> CellCount {
        let mut revealed = 0;

        while let Some(coords) = stack.pop() {
            let cell = &mut self.cells[coords.to_nd_index()];
            if !cell.is_hidden() {
                continue;
            }

            cell.state = CellState::Revealed;
            revealed += 1;

            if cell.is_mine || cell.kind != CellKind::Empty {
                continue;
            }

            for pos in self.cells.iter_neighbors(coords) {
                if self.cells[pos.to_nd_index()].is_hidden() {
                    stack.push(pos);
                }
            }
        }

        revealed
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

/// Serialized as nested rows, `cells[y][x]`.
impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.rows().map(|row| row.to_vec()))
    }
}
