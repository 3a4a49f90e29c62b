use serde::{Deserialize, Serialize};

/// Classification of a cell, fixed once the board is built.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    /// No adjacent mines, propagates flood-fill.
    Empty,
    /// Between 1 and 8 adjacent mines.
    Numbered(u8),
    Mine,
}

impl TileKind {
    /// Classify a safe cell from its neighboring mine count.
    pub const fn from_adjacent_mines(count: u8) -> Self {
        if count == 0 {
            Self::Empty
        } else {
            Self::Numbered(count)
        }
    }

    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    /// Adjacent mine count, zero for empty tiles and mines.
    pub const fn adjacent_mines(self) -> u8 {
        match self {
            Self::Numbered(count) => count,
            Self::Empty | Self::Mine => 0,
        }
    }
}

impl Default for TileKind {
    fn default() -> Self {
        Self::Empty
    }
}

/// A single cell and its player-visible state.
///
/// `flagged` and `revealed` are never both set: flags can only be placed on hidden tiles and revealing a tile
/// removes its flag.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    kind: TileKind,
    revealed: bool,
    flagged: bool,
}

impl Tile {
    pub const fn new(kind: TileKind) -> Self {
        Self {
            kind,
            revealed: false,
            flagged: false,
        }
    }

    pub const fn kind(&self) -> TileKind {
        self.kind
    }

    pub const fn adjacent_mines(&self) -> u8 {
        self.kind.adjacent_mines()
    }

    pub const fn is_mine(&self) -> bool {
        self.kind.is_mine()
    }

    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub const fn is_flagged(&self) -> bool {
        self.flagged
    }

    /// Whether a player reveal would act on this tile.
    pub const fn can_reveal(&self) -> bool {
        !self.revealed && !self.flagged
    }

    /// Make the tile visible, clearing any flag. Returns whether the tile was hidden before.
    pub(crate) fn reveal(&mut self) -> bool {
        if self.revealed {
            return false;
        }
        self.revealed = true;
        self.flagged = false;
        true
    }

    /// Flip the flag on a hidden tile, returning the new flag state, or `None` when the tile is already revealed.
    pub(crate) fn toggle_flag(&mut self) -> Option<bool> {
        if self.revealed {
            return None;
        }
        self.flagged = !self.flagged;
        Some(self.flagged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_by_adjacent_count() {
        assert_eq!(TileKind::from_adjacent_mines(0), TileKind::Empty);
        assert_eq!(TileKind::from_adjacent_mines(3), TileKind::Numbered(3));
        assert_eq!(TileKind::Numbered(3).adjacent_mines(), 3);
        assert_eq!(TileKind::Mine.adjacent_mines(), 0);
    }

    #[test]
    fn reveal_clears_flag_and_is_monotonic() {
        let mut tile = Tile::new(TileKind::Empty);
        assert_eq!(tile.toggle_flag(), Some(true));
        assert!(!tile.can_reveal());

        assert!(tile.reveal());
        assert!(tile.is_revealed());
        assert!(!tile.is_flagged());
        assert!(!tile.reveal());
    }

    #[test]
    fn revealed_tile_cannot_be_flagged() {
        let mut tile = Tile::new(TileKind::Numbered(2));
        tile.reveal();

        assert_eq!(tile.toggle_flag(), None);
        assert!(!tile.is_flagged());
    }

    #[test]
    fn flag_toggles_back_and_forth() {
        let mut tile = Tile::new(TileKind::Mine);
        assert_eq!(tile.toggle_flag(), Some(true));
        assert_eq!(tile.toggle_flag(), Some(false));
        assert!(tile.can_reveal());
    }
}
