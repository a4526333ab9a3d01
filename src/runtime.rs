use std::io;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyCode, KeyEvent, KeyEventKind};

use crate::error::{FocusError, Result};

/// How long a key read may block
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wait {
    Timeout(Duration),
    Forever,
    Immediate,
}

/// What the player did during a round's input window
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Response {
    SpacePressed,
    TimedOut,
    OtherKey(KeyEvent),
}

impl Response {
    pub fn from_key(key: Option<KeyEvent>) -> Self {
        match key {
            None => Response::TimedOut,
            Some(k) if k.code == KeyCode::Char(' ') => Response::SpacePressed,
            Some(k) => Response::OtherKey(k),
        }
    }

    /// Space and silence keep the game going, any other key quits
    pub fn is_quit(&self) -> bool {
        matches!(self, Response::OtherKey(_))
    }
}

/// Source of key presses
pub trait KeySource {
    /// Ok(None) when the wait elapsed without a key.
    fn next_key(&mut self, wait: Wait) -> Result<Option<KeyEvent>>;
}

type KeyMessage = io::Result<KeyEvent>;

fn receive(rx: &Receiver<KeyMessage>, wait: Wait) -> Result<Option<KeyEvent>> {
    let msg = match wait {
        Wait::Forever => rx.recv().map_err(|_| FocusError::InputClosed)?,
        Wait::Timeout(d) => match rx.recv_timeout(d) {
            Ok(msg) => msg,
            Err(RecvTimeoutError::Timeout) => return Ok(None),
            Err(RecvTimeoutError::Disconnected) => return Err(FocusError::InputClosed),
        },
        Wait::Immediate => match rx.try_recv() {
            Ok(msg) => msg,
            Err(TryRecvError::Empty) => return Ok(None),
            Err(TryRecvError::Disconnected) => return Err(FocusError::InputClosed),
        },
    };
    Ok(Some(msg?))
}

/// Production key source reading crossterm events on a background thread
pub struct CrosstermKeySource {
    rx: Receiver<KeyMessage>,
}

impl CrosstermKeySource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            match event::read() {
                Ok(CtEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                    if tx.send(Ok(key)).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    let _ = tx.send(Err(e));
                    break;
                }
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermKeySource {
    fn default() -> Self {
        Self::new()
    }
}

impl KeySource for CrosstermKeySource {
    fn next_key(&mut self, wait: Wait) -> Result<Option<KeyEvent>> {
        receive(&self.rx, wait)
    }
}

/// Key source fed from a channel, for tests and headless runs
pub struct ChannelKeySource {
    rx: Receiver<KeyMessage>,
}

impl ChannelKeySource {
    pub fn new(rx: Receiver<KeyMessage>) -> Self {
        Self { rx }
    }
}

impl KeySource for ChannelKeySource {
    fn next_key(&mut self, wait: Wait) -> Result<Option<KeyEvent>> {
        receive(&self.rx, wait)
    }
}
