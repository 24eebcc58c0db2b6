mod config;
mod game;
mod grid;
mod input;
mod logging;
mod round;
mod session;
mod snake;
mod term;

use anyhow::Result;
use clap::Parser;

pub type TermInt = u16;
pub type Coords = (TermInt, TermInt);

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = config::Cli::parse();
    let config = cli.game_config()?;

    if let Some(path) = &cli.log_file {
        logging::init(path)?;
    }

    let mut game = game::SnakeGame::new(config)?;
    game.initialize()?;

    if game.show_intro()? {
        // The game loop returns once the player quits
        game.play()?;
    }

    game.shutdown()
}
