use std::thread;
use std::time::Duration;

use crossterm::event::KeyCode;
use log::{info, warn};
use rand::Rng;

use crate::engine::{RoundContinuation, RoundEngine};
use crate::error::{FocusError, Result};
use crate::runtime::Wait;
use crate::stats::SessionStats;
use crate::surface::{plain, Surface};

pub const INSTRUCTIONS: &str = "\
This is a game to help train your ability to focus
You will see a grid of Xs. Occasionally a * will be among the Xs.
When you see a *, press the space bar. Press any other key to quit.
Each star you catch makes the next one rarer, straining your attention.
When you are ready to start, press enter.";

pub const FOLLOW_DIRECTIONS: &str = "follow directions!";

/// Runs a whole game: instructions, rounds until quit, summary
pub struct Session<S: Surface, R: Rng> {
    engine: RoundEngine<S, R>,
    closing_pause: Duration,
}

impl<S: Surface, R: Rng> Session<S, R> {
    pub fn new(engine: RoundEngine<S, R>, closing_pause: Duration) -> Self {
        Self {
            engine,
            closing_pause,
        }
    }

    pub fn engine(&self) -> &RoundEngine<S, R> {
        &self.engine
    }

    pub fn run(&mut self) -> Result<SessionStats> {
        self.show_instructions()?;
        info!(
            "session started: {}",
            serde_json::to_string(self.engine.config()).unwrap_or_default()
        );

        while self.engine.run_round()? == RoundContinuation::Continue {}

        let stats = self.engine.render_summary()?;
        thread::sleep(self.closing_pause);
        Ok(stats)
    }

    /// Show the instruction block and block until the player presses enter
    pub fn show_instructions(&mut self) -> Result<()> {
        let surface = self.engine.surface_mut();
        surface.clear()?;
        let mut row = 0;
        for line in INSTRUCTIONS.lines() {
            surface.put(row, 0, line, plain());
            row += 1;
        }
        surface.present()?;

        loop {
            match await_enter(surface) {
                Ok(()) => break,
                Err(e) if e.is_recoverable() => {
                    warn!("{e} on instruction screen");
                    surface.put(row, 0, FOLLOW_DIRECTIONS, plain());
                    row = row.saturating_add(1);
                    surface.present()?;
                }
                Err(e) => return Err(e),
            }
        }

        surface.clear()?;
        surface.present()
    }
}

fn await_enter<S: Surface>(surface: &mut S) -> Result<()> {
    match surface.read_key(Wait::Forever)? {
        Some(key) if key.code == KeyCode::Enter => Ok(()),
        Some(key) => Err(FocusError::InvalidInput(key.code)),
        None => Err(FocusError::InputClosed),
    }
}
