use alloc::collections::{BTreeSet, VecDeque};
use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardState {
    InProgress,
    /// Every safe tile is revealed
    Won,
    /// A mine was revealed
    Lost,
}

impl BoardState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::InProgress
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

/// Result of a reveal, listing every tile that became visible so renderers can redraw only those.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reveal {
    pub outcome: RevealOutcome,
    /// Newly revealed coordinates, each listed once, in reveal order.
    pub revealed: Vec<Coord2>,
}

impl Reveal {
    const fn no_change() -> Self {
        Self {
            outcome: RevealOutcome::NoChange,
            revealed: Vec::new(),
        }
    }

    pub const fn has_update(&self) -> bool {
        self.outcome.has_update()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    /// Tile is already revealed
    NoChange,
    /// Flag flipped, holds the new flag state
    Toggled(bool),
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Toggled(_))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HoverOutcome {
    NoChange,
    /// Hover moved, the previously hovered tile (if any) needs a redraw
    Moved { previous: Option<Coord2> },
}

impl HoverOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

/// A game from start to finish.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    layout: MineLayout,
    tiles: Array2<Tile>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    state: BoardState,
    hovered: Option<Coord2>,
    pressed: bool,
    triggered_mine: Option<Coord2>,
}

impl Board {
    /// Randomly place `mine_count` mines on a `width` by `height` board.
    pub fn new<R: Rng + ?Sized>(
        width: Coord,
        height: Coord,
        mine_count: CellCount,
        rng: &mut R,
    ) -> Result<Self> {
        let config = BoardConfig::new(width, height, mine_count);
        let layout = RandomLayoutGenerator::new(rng).generate(config)?;
        Ok(Self::with_layout(layout))
    }

    /// Build a board from `config`, seeding the layout from `config.seed`.
    ///
    /// An unset seed is the fixed seed 0, not a random one; see [`BoardConfig::seed`].
    pub fn from_config(config: &BoardConfig) -> Result<Self> {
        let seed = config.seed.unwrap_or_default();
        log::debug!(
            "New {}x{} board, {} mines, seed {}",
            config.width,
            config.height,
            config.mines,
            seed
        );
        let mut rng = SmallRng::seed_from_u64(seed);
        Self::new(config.width, config.height, config.mines, &mut rng)
    }

    /// Board with mines exactly at `mine_coords`.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        MineLayout::from_mine_coords(size, mine_coords).map(Self::with_layout)
    }

    pub fn with_layout(layout: MineLayout) -> Self {
        let tiles = Array2::from_shape_fn(layout.size().to_nd_index(), |(x, y)| {
            Tile::new(layout.tile_kind((x as Coord, y as Coord)))
        });
        Self {
            layout,
            tiles,
            revealed_count: 0,
            flagged_count: 0,
            state: Default::default(),
            hovered: None,
            pressed: false,
            triggered_mine: None,
        }
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.layout.size()
    }

    pub fn width(&self) -> Coord {
        self.size().0
    }

    pub fn height(&self) -> Coord {
        self.size().1
    }

    pub fn layout(&self) -> &MineLayout {
        &self.layout
    }

    pub fn mine_count(&self) -> CellCount {
        self.layout.mine_count()
    }

    pub fn flag_count(&self) -> CellCount {
        self.flagged_count
    }

    /// How many mines have not been flagged yet, negative when over-flagged.
    pub fn mines_left(&self) -> i64 {
        i64::from(self.layout.mine_count()) - i64::from(self.flagged_count)
    }

    /// Safe tiles revealed so far.
    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn hovered(&self) -> Option<Coord2> {
        self.hovered
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn tile_at(&self, coords: Coord2) -> Result<Tile> {
        let coords = self.layout.validate_coords(coords)?;
        Ok(self.tiles[coords.to_nd_index()])
    }

    pub fn view_at(&self, coords: Coord2) -> Result<TileView> {
        let coords = self.layout.validate_coords(coords)?;
        Ok(self.view_unchecked(coords))
    }

    /// Views of every tile, column by column.
    pub fn views(&self) -> impl Iterator<Item = (Coord2, TileView)> + '_ {
        self.tiles.indexed_iter().map(move |((x, y), _)| {
            let coords = (x as Coord, y as Coord);
            (coords, self.view_unchecked(coords))
        })
    }

    fn view_unchecked(&self, coords: Coord2) -> TileView {
        let hovered = self.hovered == Some(coords);
        TileView::new(
            &self.tiles[coords.to_nd_index()],
            hovered,
            hovered && self.pressed,
            self.triggered_mine == Some(coords),
        )
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<Reveal> {
        self.check_in_progress()?;
        let coords = self.layout.validate_coords(coords)?;

        let tile = self.tiles[coords.to_nd_index()];
        if !tile.can_reveal() {
            log::trace!("Reveal at {:?} ignored, tile is revealed or flagged", coords);
            return Ok(Reveal::no_change());
        }

        let mut revealed = Vec::new();
        match tile.kind() {
            TileKind::Mine => {
                self.reveal_tile(coords, &mut revealed);
                self.triggered_mine = Some(coords);
                self.end_game(BoardState::Lost, &mut revealed);
                return Ok(Reveal {
                    outcome: RevealOutcome::HitMine,
                    revealed,
                });
            }
            TileKind::Numbered(count) => {
                log::debug!("Reveal tile at {:?}, mine count: {}", coords, count);
                self.reveal_tile(coords, &mut revealed);
            }
            TileKind::Empty => {
                log::debug!("Reveal empty tile at {:?}, flood-filling", coords);
                self.flood_fill(coords, &mut revealed);
            }
        }

        let outcome = if self.revealed_count == self.layout.safe_cell_count() {
            self.end_game(BoardState::Won, &mut revealed);
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        };
        Ok(Reveal { outcome, revealed })
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        self.check_in_progress()?;
        let coords = self.layout.validate_coords(coords)?;

        Ok(match self.tiles[coords.to_nd_index()].toggle_flag() {
            Some(true) => {
                self.flagged_count += 1;
                log::debug!("Flag tile at {:?}", coords);
                FlagOutcome::Toggled(true)
            }
            Some(false) => {
                self.flagged_count -= 1;
                log::debug!("Unflag tile at {:?}", coords);
                FlagOutcome::Toggled(false)
            }
            None => FlagOutcome::NoChange,
        })
    }

    /// Move the hover marker to `coords`. Moving to another tile also releases a pending press.
    pub fn set_hovered(&mut self, coords: Coord2) -> Result<HoverOutcome> {
        self.check_in_progress()?;
        let coords = self.layout.validate_coords(coords)?;

        if self.hovered == Some(coords) {
            return Ok(HoverOutcome::NoChange);
        }

        log::trace!("Hover moved from {:?} to {:?}", self.hovered, coords);
        let previous = self.hovered.replace(coords);
        self.pressed = false;
        Ok(HoverOutcome::Moved { previous })
    }

    /// Remove the hover marker, returning the tile that was hovered.
    pub fn clear_hovered(&mut self) -> Option<Coord2> {
        self.pressed = false;
        self.hovered.take()
    }

    /// Press or release the hovered tile. Returns the tile whose visual changed, if any.
    pub fn set_pressed(&mut self, pressed: bool) -> Result<Option<Coord2>> {
        self.check_in_progress()?;

        match self.hovered {
            Some(coords) if self.pressed != pressed => {
                self.pressed = pressed;
                Ok(Some(coords))
            }
            _ => Ok(None),
        }
    }

    /// Reveal the connected region of empty tiles around `start` and its numbered border.
    fn flood_fill(&mut self, start: Coord2, revealed: &mut Vec<Coord2>) {
        let mut visited = BTreeSet::from([start]);
        let mut to_visit = VecDeque::from([start]);

        while let Some(visit_coords) = to_visit.pop_front() {
            let tile = self.tiles[visit_coords.to_nd_index()];

            if tile.is_mine() || tile.is_revealed() {
                log::trace!("Skipping tile at {:?}", visit_coords);
                continue;
            }

            // flagged tiles stay hidden, but an empty one still opens its neighbors
            if tile.is_flagged() {
                log::trace!("Flood passed flagged tile at {:?}", visit_coords);
            } else {
                self.reveal_tile(visit_coords, revealed);
                log::trace!("Flood revealed tile at {:?}: {:?}", visit_coords, tile.kind());
            }

            if tile.kind() == TileKind::Empty {
                for pos in self.layout.iter_neighbors(visit_coords) {
                    if visited.insert(pos) {
                        to_visit.push_back(pos);
                    }
                }
            }
        }
    }

    fn reveal_tile(&mut self, coords: Coord2, revealed: &mut Vec<Coord2>) {
        let tile = &mut self.tiles[coords.to_nd_index()];
        let was_flagged = tile.is_flagged();
        if tile.reveal() {
            if !tile.is_mine() {
                self.revealed_count += 1;
            }
            if was_flagged {
                self.flagged_count -= 1;
            }
            revealed.push(coords);
        }
    }

    fn end_game(&mut self, state: BoardState, revealed: &mut Vec<Coord2>) {
        self.state = state;
        self.hovered = None;
        self.pressed = false;
        log::debug!("Game ended: {:?}", state);

        if state == BoardState::Lost {
            let (x_end, y_end) = self.size();
            for x in 0..x_end {
                for y in 0..y_end {
                    self.reveal_tile((x, y), revealed);
                }
            }
        }
    }

    fn check_in_progress(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyTerminal)
        } else {
            Ok(())
        }
    }
}

impl Index<Coord2> for Board {
    type Output = Tile;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.tiles[coords.to_nd_index()]
    }
}
