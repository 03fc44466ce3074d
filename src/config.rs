use crate::grid::Grid;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub type Rgb = (u8, u8, u8);

/// Colours handed to the renderer once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: Rgb,
    pub snake: Rgb,
    pub food: Rgb,
    pub text: Rgb,
    /// Dim layer under banners; the last byte is alpha.
    pub overlay: (u8, u8, u8, u8),
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: (0, 0, 0),
            snake: (0, 255, 0),
            food: (255, 0, 0),
            text: (255, 255, 255),
            overlay: (0, 0, 0, 150),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side of the square window in pixels.
    pub window_size: u32,
    /// Side of one board cell in pixels.
    pub cell_size: u32,
    /// Simulation ticks per second.
    pub tick_rate: u32,
    pub score_file: PathBuf,
    /// Rows kept in the high-score table.
    pub score_limit: usize,
    pub palette: Palette,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_size: 600,
            cell_size: 20,
            tick_rate: 10,
            score_file: PathBuf::from("scores.json"),
            score_limit: 5,
            palette: Palette::default(),
        }
    }
}

impl GameConfig {
    pub const ENV_VAR: &'static str = "SNAKE_CONFIG";
    pub const DEFAULT_PATH: &'static str = "snake.json";

    /// Reads the config named by `SNAKE_CONFIG`, falling back to `snake.json`.
    pub fn from_env() -> Result<Self> {
        let path = std::env::var_os(Self::ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_PATH));
        Self::load(&path)
    }

    /// A missing file means defaults; anything unreadable is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let config = if path.exists() {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {:?}", path))?;
            serde_json::from_str(&json).with_context(|| format!("Invalid config in {:?}", path))?
        } else {
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.cell_size == 0 {
            bail!("cell_size must be positive");
        }
        if self.window_size / self.cell_size < 2 {
            bail!("window of {} px fits fewer than two {} px cells", self.window_size, self.cell_size);
        }
        if self.tick_rate == 0 {
            bail!("tick_rate must be positive");
        }
        Ok(())
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.window_size / self.cell_size, self.cell_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_board_is_thirty_cells() {
        let config = GameConfig::default();
        assert_eq!(config.grid().count(), 30);
        assert_eq!(config.tick_rate, 10);
        assert_eq!(config.score_limit, 5);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = GameConfig::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snake.json");
        std::fs::write(&path, r#"{ "cell_size": 30, "palette": { "food": [1, 2, 3] } }"#).unwrap();
        let config = GameConfig::load(&path).unwrap();
        assert_eq!(config.cell_size, 30);
        assert_eq!(config.grid().count(), 20);
        assert_eq!(config.palette.food, (1, 2, 3));
        assert_eq!(config.palette.snake, Palette::default().snake);
    }

    #[test]
    fn rejects_bad_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snake.json");
        std::fs::write(&path, r#"{ "cell_size": 0 }"#).unwrap();
        assert!(GameConfig::load(&path).is_err());

        std::fs::write(&path, r#"{ "cell_size": 400 }"#).unwrap();
        assert!(GameConfig::load(&path).is_err());

        std::fs::write(&path, "{ nope").unwrap();
        assert!(GameConfig::load(&path).is_err());
    }
}
