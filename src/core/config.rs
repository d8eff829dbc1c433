//! Runtime configuration (`dot_doom.json`).
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::core::map::{self, MapError, TileMap};

pub const CONFIG_ENV_VAR: &str = "DOT_DOOM_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "dot_doom.json";

pub const MAX_GRID_CELLS: u32 = 1024;
pub const MAX_CELL_PX: u32 = 64;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

/// Which game the binary runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    #[default]
    Raycaster,
    Tower,
    Bricks,
    Dots,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub game: GameKind,
    /// Milliseconds between simulation ticks.
    pub tick_ms: u64,
    /// Display grid size in cells.
    pub grid_width: u32,
    pub grid_height: u32,
    /// On-screen size of one cell, in pixels.
    pub cell_px: u32,
    /// Map file ('1' wall, '.' open); the built-in arena when unset.
    pub map_path: Option<PathBuf>,
    /// Fixed RNG seed for reproducible spawns.
    pub seed: Option<u64>,
    pub audio: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            game: GameKind::Raycaster,
            tick_ms: 50,
            grid_width: 80,
            grid_height: 60,
            cell_px: 10,
            map_path: None,
            seed: None,
            audio: true,
        }
    }
}

impl GameConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// `$DOT_DOOM_CONFIG` if set (the file must exist), else `dot_doom.json`
    /// when present, else defaults.
    pub fn resolve() -> Result<Self, ConfigError> {
        if let Ok(raw) = std::env::var(CONFIG_ENV_VAR) {
            let path = PathBuf::from(raw.trim());
            info!(path = %path.display(), "loading config from {}", CONFIG_ENV_VAR);
            return Self::load_file(&path);
        }
        let fallback = Path::new(DEFAULT_CONFIG_FILE);
        if fallback.is_file() {
            info!(path = %fallback.display(), "loading config");
            return Self::load_file(fallback);
        }
        Ok(Self::default())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 {
            return Err(ConfigError::Invalid("tick_ms must be positive"));
        }
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(ConfigError::Invalid("grid must have at least one cell"));
        }
        if self.grid_width > MAX_GRID_CELLS || self.grid_height > MAX_GRID_CELLS {
            return Err(ConfigError::Invalid("grid is limited to 1024 cells per side"));
        }
        if self.cell_px > MAX_CELL_PX {
            return Err(ConfigError::Invalid("cell_px is limited to 64"));
        }
        if self.cell_px == 0 {
            warn!("cell_px of 0 makes the grid invisible");
        }
        Ok(())
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn load_map(&self) -> Result<TileMap, MapError> {
        match &self.map_path {
            Some(path) => map::load_map(path),
            None => Ok(TileMap::default_level()),
        }
    }
}
