use std::str::FromStr;

use thiserror::Error;
use tilesweep_core::{Coord, Coord2};

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    Hover(Coord2),
    Press,
    Release,
    Leave,
    Show,
    New,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`, type `help` for a list")]
    Unknown(String),
    #[error("`{0}` needs a column and a row")]
    MissingCoords(&'static str),
    #[error("`{0}` is not a valid column or row")]
    InvalidCoord(String),
    #[error("unexpected argument `{0}`")]
    TrailingInput(String),
}

pub const HELP: &str = "\
commands:
  r X Y   reveal the tile at column X, row Y
  f X Y   flag or unflag a hidden tile
  h X Y   move the pointer over a tile
  press   press the tile under the pointer
  release release the pointer button
  leave   move the pointer off the board
  show    print the board
  new     start a new game
  help    show this message
  quit    leave the game";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(CommandError::Empty)?;

        let command = match name.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Command::Reveal(parse_coords("reveal", &mut words)?),
            "f" | "flag" => Command::Flag(parse_coords("flag", &mut words)?),
            "h" | "hover" => Command::Hover(parse_coords("hover", &mut words)?),
            "press" => Command::Press,
            "release" => Command::Release,
            "leave" => Command::Leave,
            "s" | "show" => Command::Show,
            "n" | "new" => Command::New,
            "?" | "help" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            _ => return Err(CommandError::Unknown(name.to_owned())),
        };

        match words.next() {
            Some(extra) => Err(CommandError::TrailingInput(extra.to_owned())),
            None => Ok(command),
        }
    }
}

fn parse_coords<'a>(
    name: &'static str,
    words: &mut impl Iterator<Item = &'a str>,
) -> Result<Coord2, CommandError> {
    let (Some(x), Some(y)) = (words.next(), words.next()) else {
        return Err(CommandError::MissingCoords(name));
    };
    Ok((parse_coord(x)?, parse_coord(y)?))
}

fn parse_coord(word: &str) -> Result<Coord, CommandError> {
    word.parse()
        .map_err(|_| CommandError::InvalidCoord(word.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_with_coordinates() {
        assert_eq!("r 3 4".parse::<Command>(), Ok(Command::Reveal((3, 4))));
        assert_eq!("FLAG 0 9".parse::<Command>(), Ok(Command::Flag((0, 9))));
        assert_eq!("  h 1   2 ".parse::<Command>(), Ok(Command::Hover((1, 2))));
        assert_eq!("quit".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn reports_malformed_input() {
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!(
            "dig 1 1".parse::<Command>(),
            Err(CommandError::Unknown("dig".into()))
        );
        assert_eq!(
            "r 1".parse::<Command>(),
            Err(CommandError::MissingCoords("reveal"))
        );
        assert_eq!(
            "f -1 2".parse::<Command>(),
            Err(CommandError::InvalidCoord("-1".into()))
        );
        assert_eq!(
            "show now".parse::<Command>(),
            Err(CommandError::TrailingInput("now".into()))
        );
    }
}
