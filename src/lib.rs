// Library surface for headless/integration tests and reuse.
// The binary only wires the terminal, logging and RNG around a Session.
pub mod app_dirs;
pub mod config;
pub mod engine;
pub mod error;
pub mod layout;
pub mod pattern;
pub mod runtime;
pub mod session;
pub mod stats;
pub mod surface;
pub mod terminal;

pub use error::{FocusError, Result};
