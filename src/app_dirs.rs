use directories::ProjectDirs;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use env_logger::{Builder, Target};
use log::LevelFilter;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn log_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("focus");
            Some(state_dir.join("focus.log"))
        } else {
            ProjectDirs::from("", "", "focus")
                .map(|proj_dirs| proj_dirs.data_local_dir().join("focus.log"))
        }
    }
}

fn open_log(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Send log output to `path`; the terminal belongs to the game while it runs.
/// `RUST_LOG` can still narrow or widen the default `info` filter.
pub fn init_logging(path: &Path) -> io::Result<()> {
    let file = open_log(path)?;
    Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .map_err(io::Error::other)
}
