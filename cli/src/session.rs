use rand::Rng;
use tilesweep_core::{Board, BoardConfig, FlagOutcome, GameError, RevealOutcome, SpriteTable};

use crate::command::{Command, HELP};
use crate::term;

#[derive(Debug, PartialEq)]
pub enum Step {
    Continue(String),
    Quit,
}

/// A running game together with what is needed to draw it and start the next one.
pub struct Session {
    config: BoardConfig,
    board: Board,
    glyphs: SpriteTable<&'static str>,
}

impl Session {
    /// Start a game, drawing a fresh seed when `config` has none.
    pub fn new(mut config: BoardConfig) -> anyhow::Result<Self> {
        let seed = *config.seed.get_or_insert_with(|| rand::rng().random());
        log::info!("Starting game with seed {}", seed);
        let board = Board::from_config(&config)?;
        Self::with_board(config, board)
    }

    pub fn with_board(config: BoardConfig, board: Board) -> anyhow::Result<Self> {
        Ok(Self {
            config,
            board,
            glyphs: term::load_glyphs()?,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn render(&self) -> String {
        term::render(&self.board, &self.glyphs)
    }

    pub fn execute(&mut self, command: Command) -> anyhow::Result<Step> {
        log::debug!("command: {:?}", command);

        let message = match command {
            Command::Quit => return Ok(Step::Quit),
            Command::Help => HELP.to_owned(),
            Command::Show => self.render(),
            Command::New => {
                self.config.seed = None;
                *self = Self::new(self.config)?;
                self.render()
            }
            Command::Reveal(coords) => match self.board.reveal(coords) {
                Ok(reveal) => match reveal.outcome {
                    RevealOutcome::NoChange => {
                        String::from("Nothing to reveal there, unflag it first if it is flagged.")
                    }
                    _ => self.render(),
                },
                Err(err) => describe(err)?,
            },
            Command::Flag(coords) => match self.board.toggle_flag(coords) {
                Ok(FlagOutcome::NoChange) => String::from("Revealed tiles cannot be flagged."),
                Ok(FlagOutcome::Toggled(_)) => self.render(),
                Err(err) => describe(err)?,
            },
            Command::Hover(coords) => match self.board.set_hovered(coords) {
                Ok(_) => self.render(),
                Err(err) => describe(err)?,
            },
            Command::Press | Command::Release => {
                match self.board.set_pressed(command == Command::Press) {
                    Ok(_) => self.render(),
                    Err(err) => describe(err)?,
                }
            }
            Command::Leave => {
                self.board.clear_hovered();
                self.render()
            }
        };
        Ok(Step::Continue(message))
    }
}

/// Player-facing text for recoverable errors; anything else is passed up.
fn describe(err: GameError) -> anyhow::Result<String> {
    match err {
        GameError::OutOfBounds(_) => Ok(format!("{err}.")),
        GameError::AlreadyTerminal => Ok(String::from("The game is over, type `new` to play again.")),
        GameError::EmptyBoard(..) | GameError::TooManyMines { .. } => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(size: (u16, u16), mines: &[(u16, u16)]) -> Session {
        let board = Board::from_mine_coords(size, mines).unwrap();
        Session::with_board(board.layout().game_config(), board).unwrap()
    }

    fn text(step: Step) -> String {
        match step {
            Step::Continue(text) => text,
            Step::Quit => panic!("session quit unexpectedly"),
        }
    }

    #[test]
    fn reveal_redraws_board() {
        let mut session = session((2, 2), &[]);

        let out = text(session.execute(Command::Reveal((0, 0))).unwrap());

        assert!(out.contains("state: won"));
        assert!(out.contains("You cleared the field!"));
    }

    #[test]
    fn recoverable_errors_become_messages() {
        let mut session = session((2, 1), &[(0, 0)]);

        let out = text(session.execute(Command::Flag((5, 0))).unwrap());
        assert!(out.contains("outside the board"));

        session.execute(Command::Reveal((0, 0))).unwrap();
        let out = text(session.execute(Command::Reveal((1, 0))).unwrap());
        assert!(out.contains("game is over"));
    }

    #[test]
    fn flagged_tile_needs_unflag_before_reveal() {
        let mut session = session((3, 3), &[(1, 1)]);

        session.execute(Command::Flag((0, 0))).unwrap();
        let out = text(session.execute(Command::Reveal((0, 0))).unwrap());

        assert!(out.contains("unflag it first"));
        assert!(!session.board()[(0, 0)].is_revealed());
    }

    #[test]
    fn new_game_draws_fresh_board() {
        let mut session = session((3, 3), &[(1, 1)]);
        session.execute(Command::Reveal((1, 1))).unwrap();

        session.execute(Command::New).unwrap();

        assert!(!session.board().is_finished());
        assert_eq!(session.board().size(), (3, 3));
        assert_eq!(session.board().mine_count(), 1);
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut session = session((1, 2), &[]);
        assert_eq!(session.execute(Command::Quit).unwrap(), Step::Quit);
    }
}
