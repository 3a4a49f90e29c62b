use std::fmt::Write;

use anyhow::anyhow;
use tilesweep_core::{Banner, Board, BoardState, SpriteTable};

/// Text for every sprite and banner, looked up by asset name.
pub fn load_glyphs() -> anyhow::Result<SpriteTable<&'static str>> {
    SpriteTable::load_with(|name| {
        Ok(match name {
            "blankTile" => "#",
            "tileHover" => "+",
            "tileMouseDown" => "@",
            "flag" => "F",
            "emptyTile" => ".",
            "num1" => "1",
            "num2" => "2",
            "num3" => "3",
            "num4" => "4",
            "num5" => "5",
            "num6" => "6",
            "num7" => "7",
            "num8" => "8",
            "mine" => "*",
            "mineDetonated" => "X",
            "youwin" => "You cleared the field!",
            "youlost" => "Boom! You hit a mine.",
            other => return Err(anyhow!("no glyph for asset `{other}`")),
        })
    })
}

fn state_label(state: BoardState) -> &'static str {
    match state {
        BoardState::InProgress => "in progress",
        BoardState::Won => "won",
        BoardState::Lost => "lost",
    }
}

/// Draw the board with row 0 on top, followed by the end-of-game banner if any.
pub fn render(board: &Board, glyphs: &SpriteTable<&'static str>) -> String {
    let (width, height) = board.size();
    let mut out = String::new();

    // writing into a String cannot fail
    let _ = writeln!(
        out,
        "mines left: {}  state: {}",
        board.mines_left(),
        state_label(board.state())
    );

    out.push_str("    ");
    for x in 0..width {
        let _ = write!(out, "{} ", x % 10);
    }
    out.push('\n');

    for y in 0..height {
        let _ = write!(out, "{y:>3} ");
        for x in 0..width {
            let glyph = board
                .view_at((x, y))
                .ok()
                .and_then(|view| glyphs.for_view(&view))
                .copied()
                .unwrap_or("?");
            out.push_str(glyph);
            out.push(' ');
        }
        out.push('\n');
    }

    let banner = Banner::for_state(board.state()).and_then(|banner| glyphs.banner(banner));
    if let Some(banner) = banner {
        out.push_str(banner);
        out.push('\n');
    }
    out
}
