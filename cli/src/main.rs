use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;

use args::Args;
use command::Command;
use session::{Session, Step};

mod args;
mod command;
mod session;
mod term;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let config = args.board_config()?;
    let mut session = Session::new(config)?;
    log::info!("Application started");

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", session.render())?;
    writeln!(stdout, "type `help` for commands")?;

    for line in stdin.lock().lines() {
        let line = line.context("could not read input")?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(stdout, "{err}")?;
                continue;
            }
        };

        match session.execute(command)? {
            Step::Continue(text) => writeln!(stdout, "{text}")?,
            Step::Quit => break,
        }
        stdout.flush()?;
    }

    log::info!("Leaving game in state {:?}", session.board().state());
    Ok(())
}
