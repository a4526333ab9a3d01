use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::tty::IsTty;
use rand::{rngs::StdRng, SeedableRng};
use std::{
    error::Error,
    io::{self, stdin},
};

use focus::{
    app_dirs::{init_logging, AppDirs},
    config::{RoundConfig, CLOSING_PAUSE},
    engine::RoundEngine,
    runtime::CrosstermKeySource,
    session::Session,
    stats::SessionStats,
    surface::TerminalSurface,
    terminal::TerminalGuard,
};

/// terminal attention trainer: press space when a star hides among the Xs
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A grid of glyphs flashes every second. Now and then a single * hides in it: press space when you see one, and nothing otherwise. Every catch makes stars rarer. Press any other key to stop and see your stats."
)]
pub struct Cli {}

fn main() -> Result<(), Box<dyn Error>> {
    let _cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = AppDirs::log_path() {
        // the game still runs if the log file is unavailable
        if let Err(e) = init_logging(&path) {
            eprintln!("focus: logging disabled, cannot open {}: {e}", path.display());
        }
    }

    let config = RoundConfig::default();
    config.validate()?;

    let (mut guard, terminal) = TerminalGuard::enter()?;
    let surface = TerminalSurface::new(terminal, CrosstermKeySource::new())?;
    let engine = RoundEngine::new(surface, StdRng::from_entropy(), config)?;
    let result = Session::new(engine, CLOSING_PAUSE).run();

    settle(result, guard.restore())
}

/// Report a failed session, then prefer the restore failure as the exit error
fn settle(
    result: focus::Result<SessionStats>,
    restored: io::Result<()>,
) -> Result<(), Box<dyn Error>> {
    if let Err(e) = &result {
        log::error!("session aborted: {e}");
    }
    if let Err(restore_err) = restored {
        if let Err(e) = &result {
            eprintln!("focus: session aborted: {e}");
        }
        return Err(restore_err.into());
    }
    result?;

    Ok(())
}
