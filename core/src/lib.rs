#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use error::*;
pub use generator::*;
pub use tile::*;
pub use types::*;
pub use view::*;

mod board;
mod error;
mod generator;
mod tile;
mod types;
mod view;

/// Board dimensions and mine count, plus an optional seed for reproducible layouts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
    /// Seed for the mine layout. `None` is not drawn from entropy: [`Board::from_config`] treats it
    /// as seed 0, so every unseeded config with the same size and mine count yields the same board.
    /// Callers wanting a fresh game each time must fill in their own seed.
    pub seed: Option<u64>,
}

impl BoardConfig {
    pub const fn new(width: Coord, height: Coord, mines: CellCount) -> Self {
        Self {
            width,
            height,
            mines,
            seed: None,
        }
    }

    pub const fn with_seed(self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }

    pub const fn size(&self) -> Coord2 {
        (self.width, self.height)
    }

    pub const fn total_cells(&self) -> CellCount {
        cell_count(self.width, self.height)
    }

    /// Checks that the board has at least one cell and at least one cell free of mines.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(GameError::EmptyBoard(self.width, self.height));
        }
        if self.mines >= self.total_cells() {
            return Err(GameError::TooManyMines {
                mines: self.mines,
                cells: self.total_cells(),
            });
        }
        Ok(())
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new(10, 10, 10)
    }
}

/// Where the mines are, independent of any player-visible state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    /// Build a layout from a mask, the mask must satisfy [`BoardConfig::validate`].
    pub(crate) fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Self {
            mine_mask,
            mine_count,
        }
    }

    /// Layout with mines exactly at `mine_coords`, duplicates are counted once.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if !in_bounds(coords, size) {
                return Err(GameError::OutOfBounds(coords));
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        let layout = Self::from_mine_mask(mine_mask);
        layout.game_config().validate()?;
        Ok(layout)
    }

    pub fn game_config(&self) -> BoardConfig {
        let (width, height) = self.size();
        BoardConfig::new(width, height, self.mine_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.size()) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds(coords))
        }
    }

    pub fn size(&self) -> Coord2 {
        let (dim_x, dim_y) = self.mine_mask.dim();
        (dim_x as Coord, dim_y as Coord)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        // at most 8 neighbors
        self.iter_neighbors(coords).filter(|&pos| self[pos]).count() as u8
    }

    /// Classify the tile at `coords` from this layout.
    pub fn tile_kind(&self, coords: Coord2) -> TileKind {
        if self[coords] {
            TileKind::Mine
        } else {
            TileKind::from_adjacent_mines(self.adjacent_mine_count(coords))
        }
    }

    /// The up to eight tiles touching `coords`, clipped at the board edges, row by row.
    pub fn iter_neighbors(&self, (x, y): Coord2) -> impl Iterator<Item = Coord2> + use<> {
        let (width, height) = self.size();
        let columns = x.saturating_sub(1)..x.saturating_add(2).min(width);
        let rows = y.saturating_sub(1)..y.saturating_add(2).min(height);

        rows.flat_map(move |ny| columns.clone().map(move |nx| (nx, ny)))
            .filter(move |&pos| pos != (x, y))
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((x, y), _)| (x as Coord, y as Coord))
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, (x, y): Coord2) -> &Self::Output {
        &self.mine_mask[(x as usize, y as usize)]
    }
}
