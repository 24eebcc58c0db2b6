//! Command line configuration.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::Parser;

use crate::grid::Grid;
use crate::snake::INITIAL_BODY;
use crate::TermInt;

#[derive(Parser, Debug)]
#[command(
    name = "wrapsnake",
    version,
    about = "Terminal snake that wraps around the edges of the board"
)]
pub struct Cli {
    /// Board width in cells.
    #[arg(long, default_value_t = 32)]
    pub width: TermInt,

    /// Board height in cells.
    #[arg(long, default_value_t = 24)]
    pub height: TermInt,

    /// Terminal columns used to draw one cell.
    #[arg(long, default_value_t = 2)]
    pub cell_size: TermInt,

    /// Snake steps per second.
    #[arg(long, default_value_t = 20)]
    pub fps: u32,

    /// Seed for food placement, random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write tracing output to this file (filtered by `RUST_LOG`).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Validated settings the game runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub grid: Grid,
    pub cell_size: TermInt,
    pub tick: Duration,
    pub seed: Option<u64>,
}

impl GameConfig {
    /// Terminal size needed for the board, its border and the status row.
    pub fn required_terminal_size(&self) -> (u32, u32) {
        let cols = self.grid.width() as u32 * self.cell_size as u32 + 2;
        let rows = self.grid.height() as u32 + 3;
        (cols, rows)
    }
}

impl Cli {
    pub fn game_config(&self) -> Result<GameConfig> {
        let (min_width, min_height) = initial_body_extent();

        if self.width < min_width {
            return Err(anyhow!("width must be >= {} to fit the starting snake", min_width));
        }
        if self.height < min_height {
            return Err(anyhow!("height must be >= {} to fit the starting snake", min_height));
        }
        if !(1..=4).contains(&self.cell_size) {
            return Err(anyhow!("cell-size must be between 1 and 4"));
        }
        if !(1..=120).contains(&self.fps) {
            return Err(anyhow!("fps must be between 1 and 120"));
        }

        Ok(GameConfig {
            grid: Grid::new(self.width, self.height),
            cell_size: self.cell_size,
            tick: Duration::from_millis(1000 / self.fps as u64),
            seed: self.seed,
        })
    }
}

fn initial_body_extent() -> (TermInt, TermInt) {
    let max_x = INITIAL_BODY.iter().map(|pos| pos.0).max().unwrap_or(0);
    let max_y = INITIAL_BODY.iter().map(|pos| pos.1).max().unwrap_or(0);
    (max_x + 1, max_y + 1)
}
