use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info};
use rand::Rng;

use crate::config::RoundConfig;
use crate::error::Result;
use crate::layout::Layout;
use crate::pattern::{Cell, Pattern};
use crate::runtime::{Response, Wait};
use crate::stats::SessionStats;
use crate::surface::{plain, reversed, Surface};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundContinuation {
    Continue,
    Stop,
}

/// How a round's response is judged against its pattern
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum Verdict {
    #[strum(to_string = "")]
    Caught,
    #[strum(to_string = "MISSED ONE! FOCUS!")]
    Missed,
    #[strum(to_string = "NO STAR! FOCUS!")]
    FalseAlarm,
    #[strum(to_string = "")]
    Nothing,
}

impl Verdict {
    pub fn classify(star_present: bool, response: &Response) -> Self {
        match (star_present, response) {
            (true, Response::TimedOut) => Verdict::Missed,
            (false, Response::SpacePressed) => Verdict::FalseAlarm,
            (true, Response::SpacePressed) => Verdict::Caught,
            _ => Verdict::Nothing,
        }
    }

    /// Feedback shown to the player, if any
    pub fn message(&self) -> Option<String> {
        match self {
            Verdict::Missed | Verdict::FalseAlarm => Some(self.to_string()),
            Verdict::Caught | Verdict::Nothing => None,
        }
    }
}

/// Everything observed during one round
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundOutcome {
    pub star_position: Option<Cell>,
    pub response: Response,
    pub verdict: Verdict,
    pub elapsed: Duration,
}

/// Drives rounds on a surface and owns the difficulty and session counters
pub struct RoundEngine<S: Surface, R: Rng> {
    surface: S,
    rng: R,
    config: RoundConfig,
    star_probability: f64,
    stats: SessionStats,
    reverse: bool,
    last_outcome: Option<RoundOutcome>,
}

impl<S: Surface, R: Rng> RoundEngine<S, R> {
    pub fn new(surface: S, rng: R, config: RoundConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            surface,
            rng,
            star_probability: config.initial_star_probability,
            config,
            stats: SessionStats::new(),
            reverse: false,
            last_outcome: None,
        })
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    pub fn star_probability(&self) -> f64 {
        self.star_probability
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn is_reversed(&self) -> bool {
        self.reverse
    }

    pub fn last_outcome(&self) -> Option<&RoundOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    fn layout(&self) -> Layout {
        Layout::centered(
            self.surface.size(),
            self.config.grid_width,
            self.config.grid_height,
        )
    }

    pub fn run_round(&mut self) -> Result<RoundContinuation> {
        let pattern = Pattern::generate(
            self.config.grid_width,
            self.config.grid_height,
            self.star_probability,
            &mut self.rng,
        );
        self.show(&pattern)?;

        let started = Instant::now();
        let key = self
            .surface
            .read_key(Wait::Timeout(self.config.min_round_duration))?;
        let response = Response::from_key(key);

        let waited = started.elapsed();
        if waited < self.config.min_round_duration {
            thread::sleep(self.config.min_round_duration - waited);
        }
        let elapsed = started.elapsed();

        self.surface.clear()?;
        let verdict = Verdict::classify(pattern.has_star(), &response);
        self.apply(verdict)?;

        let continuation = if response.is_quit() {
            RoundContinuation::Stop
        } else {
            // a quitting round is left out of the tally
            self.stats.finish_round();
            RoundContinuation::Continue
        };
        self.reverse = !self.reverse;

        debug!(
            "round {}: star={:?} response={:?} verdict={:?} p={:.4} elapsed={:?}",
            self.stats.total_rounds,
            pattern.star(),
            response,
            verdict,
            self.star_probability,
            elapsed
        );
        self.last_outcome = Some(RoundOutcome {
            star_position: pattern.star(),
            response,
            verdict,
            elapsed,
        });

        Ok(continuation)
    }

    fn show(&mut self, pattern: &Pattern) -> Result<()> {
        let layout = self.layout();
        let style = if self.reverse { reversed() } else { plain() };

        // drawn over the previous round's feedback, which stays visible
        for (i, line) in pattern.lines().enumerate() {
            let row = layout.top.saturating_add(i as u16);
            self.surface.put(row, layout.left, &line, style);
        }
        self.surface.present()
    }

    fn apply(&mut self, verdict: Verdict) -> Result<()> {
        match verdict {
            Verdict::Caught => {
                self.stats.record_catch();
                self.star_probability /= self.config.growth_factor;
            }
            Verdict::Missed => self.stats.record_miss(),
            Verdict::FalseAlarm => self.stats.record_false_alarm(),
            Verdict::Nothing => {}
        }

        if let Some(msg) = verdict.message() {
            let layout = self.layout();
            self.surface
                .put(layout.message_row(), layout.centered_col(&msg), &msg, plain());
        }
        self.surface.present()
    }

    /// Show the session counters and wait for one last key
    pub fn render_summary(&mut self) -> Result<SessionStats> {
        let layout = self.layout();
        self.surface.clear()?;
        for (i, line) in self.stats.summary_lines().iter().enumerate() {
            self.surface
                .put(layout.top.saturating_add(i as u16), layout.left, line, plain());
        }
        self.surface.present()?;

        info!(
            "session finished: {} catch rate: {}",
            serde_json::to_string(&self.stats).unwrap_or_default(),
            self.stats
                .catch_rate()
                .map_or_else(|| "n/a".to_string(), |r| format!("{r}%"))
        );
        self.surface.read_key(Wait::Forever)?;
        Ok(self.stats)
    }
}
