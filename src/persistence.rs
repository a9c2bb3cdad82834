//! JSON persistence under `~/.angry-flappy/` and the highscore store.
//!
//! Nothing here is allowed to fail a run: reads degrade to defaults and
//! highscore writes are logged and dropped.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File name of the persisted best score.
pub const HIGHSCORE_FILE: &str = "angry-flappy-highscore.json";
/// Optional tuning overrides.
pub const CONFIG_FILE: &str = "config.json";
pub const LOG_FILE: &str = "angry-flappy.log";

/// Get the ~/.angry-flappy/ directory path, creating it if needed.
pub fn game_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(".angry-flappy");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the full path for a file in ~/.angry-flappy/.
pub fn save_path(filename: &str) -> io::Result<PathBuf> {
    Ok(game_dir()?.join(filename))
}

/// Load a JSON file, returning `T::default()` if missing or invalid.
pub fn load_json_or_default<T: Default + serde::de::DeserializeOwned>(path: &Path) -> T {
    match fs::read_to_string(path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "ignoring malformed file");
            T::default()
        }),
        Err(_) => T::default(),
    }
}

/// Save a value as pretty-printed JSON.
pub fn save_json<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json)?;
    Ok(())
}

/// Where the best score lives between runs.
pub trait HighscoreStore {
    /// Stored best, or 0 when absent or unreadable.
    fn read(&self) -> u32;
    /// Best-effort write; failures never reach the caller.
    fn write(&mut self, highscore: u32);
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct HighscoreRecord {
    highscore: u32,
}

/// Highscore kept in a small JSON file.
#[derive(Debug, Clone)]
pub struct JsonHighscoreStore {
    path: PathBuf,
}

impl JsonHighscoreStore {
    /// Store at `~/.angry-flappy/angry-flappy-highscore.json`.
    pub fn new() -> io::Result<Self> {
        Ok(Self::at(save_path(HIGHSCORE_FILE)?))
    }

    /// Store at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighscoreStore for JsonHighscoreStore {
    fn read(&self) -> u32 {
        load_json_or_default::<HighscoreRecord>(&self.path).highscore
    }

    fn write(&mut self, highscore: u32) {
        if let Err(e) = save_json(&self.path, &HighscoreRecord { highscore }) {
            tracing::warn!(path = %self.path.display(), error = %e, "could not save highscore");
        }
    }
}

impl<T: HighscoreStore + ?Sized> HighscoreStore for Box<T> {
    fn read(&self) -> u32 {
        (**self).read()
    }

    fn write(&mut self, highscore: u32) {
        (**self).write(highscore)
    }
}

/// Highscore held in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryHighscoreStore {
    pub highscore: u32,
    /// Number of writes seen.
    pub writes: usize,
}

impl MemoryHighscoreStore {
    pub fn with_highscore(highscore: u32) -> Self {
        Self {
            highscore,
            writes: 0,
        }
    }
}

impl HighscoreStore for MemoryHighscoreStore {
    fn read(&self) -> u32 {
        self.highscore
    }

    fn write(&mut self, highscore: u32) {
        self.highscore = highscore;
        self.writes += 1;
    }
}
