use std::io;
use std::sync::mpsc::{self, Sender};
use std::time::{Duration, Instant};

use assert_matches::assert_matches;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use focus::config::RoundConfig;
use focus::engine::{RoundContinuation, RoundEngine, Verdict};
use focus::runtime::{ChannelKeySource, Wait};
use focus::session::Session;
use focus::surface::{row_text, Surface, TerminalSurface};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{backend::TestBackend, layout::Size, style::Style, Terminal};

type Engine = RoundEngine<TerminalSurface<TestBackend, ChannelKeySource>, StdRng>;

// Headless engine over ratatui's TestBackend, fed from a channel
fn engine(p: f64, round_ms: u64, seed: u64) -> (Engine, Sender<io::Result<KeyEvent>>) {
    let (tx, rx) = mpsc::channel();
    let terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let surface = TerminalSurface::new(terminal, ChannelKeySource::new(rx)).unwrap();
    let config = RoundConfig {
        initial_star_probability: p,
        min_round_duration: Duration::from_millis(round_ms),
        ..RoundConfig::default()
    };
    (
        RoundEngine::new(surface, StdRng::seed_from_u64(seed), config).unwrap(),
        tx,
    )
}

/// Snapshots the screen each time a key is requested
struct ScreenAtRead {
    inner: TerminalSurface<TestBackend, ChannelKeySource>,
    snapshots: Vec<Vec<String>>,
}

impl Surface for ScreenAtRead {
    fn size(&self) -> Size {
        self.inner.size()
    }

    fn put(&mut self, row: u16, col: u16, text: &str, style: Style) {
        self.inner.put(row, col, text, style)
    }

    fn clear(&mut self) -> focus::Result<()> {
        self.inner.clear()
    }

    fn present(&mut self) -> focus::Result<()> {
        self.inner.present()
    }

    fn read_key(&mut self, wait: Wait) -> focus::Result<Option<KeyEvent>> {
        let screen = self.inner.backend().buffer();
        let rows = (0..screen.area.height).map(|r| row_text(screen, r)).collect();
        self.snapshots.push(rows);
        self.inner.read_key(wait)
    }
}

fn press(tx: &Sender<io::Result<KeyEvent>>, code: KeyCode) {
    tx.send(Ok(KeyEvent::new(code, KeyModifiers::NONE))).unwrap();
}

#[test]
fn probability_depends_only_on_catches() {
    let (mut engine, tx) = engine(0.9, 1, 42);
    let mut catches = 0;

    for round in 0..30 {
        // alternate silence and space so both catch and non-catch rounds occur
        if round % 2 == 0 {
            press(&tx, KeyCode::Char(' '));
        }
        assert_eq!(engine.run_round().unwrap(), RoundContinuation::Continue);
        if engine.last_outcome().unwrap().verdict == Verdict::Caught {
            catches += 1;
        }

        let expected = 0.9 / 1.5_f64.powi(catches);
        assert!((engine.star_probability() - expected).abs() < 1e-12);
        assert!(engine.star_probability() <= 0.9);
    }
    assert_eq!(engine.stats().caught, catches as u32);
}

#[test]
fn counters_stay_consistent_every_round() {
    let (mut engine, tx) = engine(0.5, 1, 7);
    for round in 0..40 {
        if round % 3 == 0 {
            press(&tx, KeyCode::Char(' '));
        }
        engine.run_round().unwrap();
        let stats = engine.stats();
        assert!(stats.caught + stats.missed <= stats.total_rounds);
        assert_eq!(stats.total_rounds, round + 1);
    }
}

#[test]
fn every_round_lasts_the_minimum_duration() {
    let (mut engine, tx) = engine(0.3, 30, 1);
    for _ in 0..3 {
        press(&tx, KeyCode::Char(' '));
        let started = Instant::now();
        engine.run_round().unwrap();
        assert!(started.elapsed() >= Duration::from_millis(30));
    }
}

#[test]
fn silent_rounds_without_stars() {
    let (mut engine, _tx) = engine(0.0, 1, 3);
    let k = 12;
    for _ in 0..k {
        assert_eq!(engine.run_round().unwrap(), RoundContinuation::Continue);
        assert_matches!(engine.last_outcome().unwrap().verdict, Verdict::Nothing);
    }
    let stats = engine.stats();
    assert_eq!((stats.total_rounds, stats.caught, stats.missed), (k, 0, 0));
}

#[test]
fn immediate_quit_counts_nothing() {
    let (mut engine, tx) = engine(0.2, 1, 5);
    press(&tx, KeyCode::Char('q'));
    assert_eq!(engine.run_round().unwrap(), RoundContinuation::Stop);
    assert_eq!(engine.stats().total_rounds, 0);
}

#[test]
fn quit_after_play_keeps_earlier_rounds() {
    let (mut engine, tx) = engine(0.0, 1, 5);
    engine.run_round().unwrap();
    engine.run_round().unwrap();
    press(&tx, KeyCode::Enter);
    assert_eq!(engine.run_round().unwrap(), RoundContinuation::Stop);
    assert_eq!(engine.stats().total_rounds, 2);
}

#[test]
fn whole_session_headless() {
    let (engine, tx) = engine(1.0, 1, 9);
    let mut session = Session::new(engine, Duration::ZERO);

    press(&tx, KeyCode::Char('z')); // rejected on the instruction screen
    press(&tx, KeyCode::Enter);
    press(&tx, KeyCode::Char(' ')); // caught, star certain on the first round
    press(&tx, KeyCode::Esc); // quit
    press(&tx, KeyCode::Char('k')); // dismiss the summary

    let stats = session.run().unwrap();
    assert_eq!((stats.total_rounds, stats.caught, stats.missed), (1, 1, 0));
    assert_eq!(session.engine().star_probability(), 1.0 / 1.5);
}

#[test]
fn hang_up_mid_session_is_fatal() {
    let (engine, tx) = engine(0.5, 1, 9);
    let mut session = Session::new(engine, Duration::ZERO);
    press(&tx, KeyCode::Enter);
    drop(tx);
    assert_matches!(session.run(), Err(focus::FocusError::InputClosed));
}

#[test]
fn feedback_is_on_screen_during_the_next_input_window() {
    let (tx, rx) = mpsc::channel();
    let terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let inner = TerminalSurface::new(terminal, ChannelKeySource::new(rx)).unwrap();
    let surface = ScreenAtRead {
        inner,
        snapshots: Vec::new(),
    };
    let config = RoundConfig {
        initial_star_probability: 1.0,
        min_round_duration: Duration::from_millis(1),
        ..RoundConfig::default()
    };
    let mut engine = RoundEngine::new(surface, StdRng::seed_from_u64(21), config).unwrap();

    // round 1 misses the certain star, round 2 quits
    engine.run_round().unwrap();
    press(&tx, KeyCode::Char('q'));
    assert_eq!(engine.run_round().unwrap(), RoundContinuation::Stop);

    let snapshots = &engine.surface().snapshots;
    assert_eq!(snapshots.len(), 2);
    assert_eq!(snapshots[0][17], "");
    assert_eq!(snapshots[1][17].trim(), "MISSED ONE! FOCUS!");
    // the new grid is up alongside the message
    assert!(snapshots[1][10..15].iter().all(|row| row.trim().chars().count() == 15));
}
