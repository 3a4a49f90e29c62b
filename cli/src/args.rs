use std::fs;
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use tilesweep_core::{BoardConfig, CellCount, Coord, Coord2};

#[derive(Parser, Debug)]
#[command(version, about = "Clear the minefield without detonating a mine")]
pub struct Args {
    /// TOML file with `width`, `height`, `mines` and `seed`, flags below take precedence
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of columns
    #[arg(long)]
    pub width: Option<Coord>,

    /// Number of rows
    #[arg(long)]
    pub height: Option<Coord>,

    /// Board size as COLUMNSxROWS, e.g. 16x16
    #[arg(short, long, value_parser = parse_size, conflicts_with_all = ["width", "height"])]
    pub tiles: Option<Coord2>,

    /// Total number of mines
    #[arg(short, long)]
    pub mines: Option<CellCount>,

    /// Seed for the mine layout, random when omitted
    #[arg(short, long)]
    pub seed: Option<u64>,

    #[command(flatten)]
    pub verbose: Verbosity<WarnLevel>,
}

impl Args {
    /// Settings from the config file (or defaults) with command-line overrides applied.
    pub fn board_config(&self) -> anyhow::Result<BoardConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("could not read config file {}", path.display()))?;
                parse_config(&text)
                    .with_context(|| format!("invalid config file {}", path.display()))?
            }
            None => BoardConfig::default(),
        };

        if let Some((width, height)) = self.tiles {
            config.width = width;
            config.height = height;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(mines) = self.mines {
            config.mines = mines;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }

        config.validate()?;
        Ok(config)
    }
}

pub fn parse_config(text: &str) -> anyhow::Result<BoardConfig> {
    Ok(toml::from_str(text)?)
}

fn parse_size(value: &str) -> anyhow::Result<Coord2> {
    let Some((width, height)) = value.split_once(['x', 'X']) else {
        bail!("expected COLUMNSxROWS, got `{value}`");
    };
    let width = width
        .trim()
        .parse()
        .with_context(|| format!("invalid column count `{width}`"))?;
    let height = height
        .trim()
        .parse()
        .with_context(|| format!("invalid row count `{height}`"))?;
    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("tilesweep").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_to_classic_board() {
        let config = args(&[]).board_config().unwrap();
        assert_eq!(config, BoardConfig::default());
    }

    #[test]
    fn tiles_flag_sets_both_dimensions() {
        let config = args(&["-t16x12", "-m", "40", "-s", "7"]).board_config().unwrap();
        assert_eq!(config, BoardConfig::new(16, 12, 40).with_seed(7));
    }

    #[test]
    fn tiles_conflicts_with_explicit_dimensions() {
        let result = Args::try_parse_from(["tilesweep", "--tiles", "4x4", "--width", "5"]);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_malformed_size() {
        assert!(parse_size("16").is_err());
        assert!(parse_size("ax3").is_err());
        assert_eq!(parse_size("30X16").unwrap(), (30, 16));
    }

    #[test]
    fn too_many_mines_is_reported_before_play() {
        let err = args(&["--width", "2", "--height", "2", "--mines", "4"])
            .board_config()
            .unwrap_err();
        assert!(err.to_string().contains("Too many mines"));
    }

    #[test]
    fn config_file_is_overridden_by_flags() {
        let mut file = std::env::temp_dir();
        file.push(format!("tilesweep-args-{}.toml", std::process::id()));
        let mut handle = fs::File::create(&file).unwrap();
        writeln!(handle, "width = 20\nheight = 8\nmines = 30\nseed = 11").unwrap();
        drop(handle);

        let path = file.to_str().unwrap();
        let config = args(&["--config", path, "--mines", "12"]).board_config().unwrap();
        fs::remove_file(&file).unwrap();

        assert_eq!(config, BoardConfig::new(20, 8, 12).with_seed(11));
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let config = parse_config("mines = 3").unwrap();
        assert_eq!(config, BoardConfig::new(10, 10, 3));
    }
}
