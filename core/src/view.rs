use serde::{Deserialize, Serialize};

use crate::*;

/// Read-only snapshot of a tile, everything a renderer needs to pick a visual.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileView {
    pub kind: TileKind,
    pub adjacent_mines: u8,
    pub revealed: bool,
    pub flagged: bool,
    pub hovered: bool,
    pub pressed: bool,
    /// The mine that ended the game
    pub detonated: bool,
}

impl TileView {
    pub const fn new(tile: &Tile, hovered: bool, pressed: bool, detonated: bool) -> Self {
        Self {
            kind: tile.kind(),
            adjacent_mines: tile.adjacent_mines(),
            revealed: tile.is_revealed(),
            flagged: tile.is_flagged(),
            hovered,
            pressed,
            detonated,
        }
    }

    pub const fn sprite(&self) -> Sprite {
        Sprite::for_view(self)
    }
}

/// Visual classification of a tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sprite {
    Hidden,
    Hovered,
    Pressed,
    Flag,
    Empty,
    /// Numbers 1 to 8
    Number(u8),
    Mine,
    Detonated,
}

const NUMBER_ASSETS: [&str; 8] = [
    "num1", "num2", "num3", "num4", "num5", "num6", "num7", "num8",
];

impl Sprite {
    pub const COUNT: usize = 15;

    pub const ALL: [Sprite; Self::COUNT] = [
        Sprite::Hidden,
        Sprite::Hovered,
        Sprite::Pressed,
        Sprite::Flag,
        Sprite::Empty,
        Sprite::Number(1),
        Sprite::Number(2),
        Sprite::Number(3),
        Sprite::Number(4),
        Sprite::Number(5),
        Sprite::Number(6),
        Sprite::Number(7),
        Sprite::Number(8),
        Sprite::Mine,
        Sprite::Detonated,
    ];

    /// Flags win over everything, hidden tiles show pointer feedback, revealed tiles show their contents.
    pub const fn for_view(view: &TileView) -> Self {
        if view.flagged {
            return Self::Flag;
        }
        if !view.revealed {
            return if view.pressed {
                Self::Pressed
            } else if view.hovered {
                Self::Hovered
            } else {
                Self::Hidden
            };
        }
        match view.kind {
            TileKind::Empty => Self::Empty,
            TileKind::Numbered(count) => Self::Number(count),
            TileKind::Mine if view.detonated => Self::Detonated,
            TileKind::Mine => Self::Mine,
        }
    }

    /// Position in [`Sprite::ALL`].
    pub const fn index(self) -> usize {
        match self {
            Self::Hidden => 0,
            Self::Hovered => 1,
            Self::Pressed => 2,
            Self::Flag => 3,
            Self::Empty => 4,
            Self::Number(count) => 4 + clamp_number(count) as usize,
            Self::Mine => 13,
            Self::Detonated => 14,
        }
    }

    /// Stable name of the image asset for this sprite.
    pub const fn asset_name(self) -> &'static str {
        match self {
            Self::Hidden => "blankTile",
            Self::Hovered => "tileHover",
            Self::Pressed => "tileMouseDown",
            Self::Flag => "flag",
            Self::Empty => "emptyTile",
            Self::Number(count) => NUMBER_ASSETS[clamp_number(count) as usize - 1],
            Self::Mine => "mine",
            Self::Detonated => "mineDetonated",
        }
    }
}

const fn clamp_number(count: u8) -> u8 {
    if count < 1 {
        1
    } else if count > 8 {
        8
    } else {
        count
    }
}

/// End-of-game banner.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Banner {
    Won,
    Lost,
}

impl Banner {
    pub const ALL: [Banner; 2] = [Banner::Won, Banner::Lost];

    pub const fn for_state(state: BoardState) -> Option<Self> {
        match state {
            BoardState::InProgress => None,
            BoardState::Won => Some(Self::Won),
            BoardState::Lost => Some(Self::Lost),
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Won => 0,
            Self::Lost => 1,
        }
    }

    pub const fn asset_name(self) -> &'static str {
        match self {
            Self::Won => "youwin",
            Self::Lost => "youlost",
        }
    }
}

/// Renderer-owned table of resource handles (textures, glyphs, ...) for every sprite and banner.
#[derive(Clone, Debug, PartialEq)]
pub struct SpriteTable<H> {
    sprites: [Option<H>; Sprite::COUNT],
    banners: [Option<H>; 2],
}

impl<H> SpriteTable<H> {
    pub fn new() -> Self {
        Self {
            sprites: core::array::from_fn(|_| None),
            banners: core::array::from_fn(|_| None),
        }
    }

    /// Fill every slot by asset name, stopping at the first loader error.
    pub fn load_with<E>(
        mut load: impl FnMut(&'static str) -> core::result::Result<H, E>,
    ) -> core::result::Result<Self, E> {
        let mut table = Self::new();
        for sprite in Sprite::ALL {
            table.insert_sprite(sprite, load(sprite.asset_name())?);
        }
        for banner in Banner::ALL {
            table.insert_banner(banner, load(banner.asset_name())?);
        }
        Ok(table)
    }

    /// Returns the handle previously stored for `sprite`.
    pub fn insert_sprite(&mut self, sprite: Sprite, handle: H) -> Option<H> {
        self.sprites[sprite.index()].replace(handle)
    }

    pub fn insert_banner(&mut self, banner: Banner, handle: H) -> Option<H> {
        self.banners[banner.index()].replace(handle)
    }

    pub fn sprite(&self, sprite: Sprite) -> Option<&H> {
        self.sprites[sprite.index()].as_ref()
    }

    pub fn banner(&self, banner: Banner) -> Option<&H> {
        self.banners[banner.index()].as_ref()
    }

    /// Handle for the sprite that represents `view`.
    pub fn for_view(&self, view: &TileView) -> Option<&H> {
        self.sprite(view.sprite())
    }

    /// Asset names that have no handle yet.
    pub fn missing(&self) -> impl Iterator<Item = &'static str> + '_ {
        let sprites = Sprite::ALL
            .into_iter()
            .filter(move |&sprite| self.sprite(sprite).is_none())
            .map(Sprite::asset_name);
        let banners = Banner::ALL
            .into_iter()
            .filter(move |&banner| self.banner(banner).is_none())
            .map(Banner::asset_name);
        sprites.chain(banners)
    }
}

impl<H> Default for SpriteTable<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn view(kind: TileKind) -> TileView {
        TileView::new(&Tile::new(kind), false, false, false)
    }

    #[test]
    fn sprite_precedence_matches_tile_state() {
        let mut hidden = view(TileKind::Mine);
        assert_eq!(hidden.sprite(), Sprite::Hidden);

        hidden.hovered = true;
        assert_eq!(hidden.sprite(), Sprite::Hovered);

        hidden.pressed = true;
        assert_eq!(hidden.sprite(), Sprite::Pressed);

        hidden.flagged = true;
        assert_eq!(hidden.sprite(), Sprite::Flag);
    }

    #[test]
    fn revealed_sprites_show_contents() {
        let mut revealed = view(TileKind::Numbered(3));
        revealed.revealed = true;
        revealed.hovered = true;
        assert_eq!(revealed.sprite(), Sprite::Number(3));

        revealed.kind = TileKind::Empty;
        assert_eq!(revealed.sprite(), Sprite::Empty);

        revealed.kind = TileKind::Mine;
        assert_eq!(revealed.sprite(), Sprite::Mine);

        revealed.detonated = true;
        assert_eq!(revealed.sprite(), Sprite::Detonated);
    }

    #[test]
    fn sprite_indices_match_all_order() {
        for (i, sprite) in Sprite::ALL.into_iter().enumerate() {
            assert_eq!(sprite.index(), i);
        }
        assert_eq!(Sprite::Number(5).asset_name(), "num5");
    }

    #[test]
    fn banner_follows_board_state() {
        assert_eq!(Banner::for_state(BoardState::InProgress), None);
        assert_eq!(Banner::for_state(BoardState::Won), Some(Banner::Won));
        assert_eq!(
            Banner::for_state(BoardState::Lost).map(Banner::asset_name),
            Some("youlost")
        );
    }

    #[test]
    fn table_loads_every_asset_by_name() {
        let table: SpriteTable<&str> =
            SpriteTable::load_with(|name| Ok::<_, ()>(name)).unwrap();

        assert_eq!(table.missing().count(), 0);
        assert_eq!(table.sprite(Sprite::Flag), Some(&"flag"));
        assert_eq!(table.banner(Banner::Won), Some(&"youwin"));
    }

    #[test]
    fn table_reports_missing_handles() {
        let mut table = SpriteTable::new();
        assert_eq!(table.insert_sprite(Sprite::Hidden, 1u32), None);
        assert_eq!(table.insert_sprite(Sprite::Hidden, 2u32), Some(1));

        let missing: Vec<_> = table.missing().collect();
        assert_eq!(missing.len(), Sprite::COUNT + 2 - 1);
        assert!(!missing.contains(&"blankTile"));
        assert_eq!(table.for_view(&view(TileKind::Empty)), Some(&2));
    }

    #[test]
    fn loader_error_aborts_table() {
        let result =
            SpriteTable::<u8>::load_with(|name| if name == "mine" { Err(name) } else { Ok(0) });
        assert_eq!(result, Err("mine"));
    }
}
