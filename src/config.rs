use std::path::PathBuf;
use std::time::Duration;

/// Window and grid settings for the game binary.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Window width in pixels.
    pub width: u32,
    /// Window height in pixels.
    pub height: u32,
    /// Edge length of one grid cell in pixels.
    pub block_size: u32,
    /// Fixed simulation rate.
    pub ticks_per_second: u32,
    /// Where finished matches are appended.
    pub stats_file: PathBuf,
    /// Seed for food placement; `None` draws from entropy.
    pub rng_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            block_size: 20,
            ticks_per_second: 15,
            stats_file: PathBuf::from("stats_player.json"),
            rng_seed: None,
        }
    }
}

impl GameConfig {
    pub fn grid_width(&self) -> i32 {
        (self.width / self.block_size) as i32
    }

    pub fn grid_height(&self) -> i32 {
        (self.height / self.block_size) as i32
    }

    pub fn tick_duration(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.ticks_per_second.max(1)))
    }
}

pub const MIN_WINDOW: usize = 1;
pub const MAX_WINDOW: usize = 1000;

/// Settings for the dashboard binary.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub pattern: String,
    pub width: u32,
    pub height: u32,
    pub default_window: usize,
    /// Number of histogram bins on the distribution tab.
    pub histogram_bins: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            pattern: "stats_*.json".to_string(),
            width: 1280,
            height: 800,
            default_window: 100,
            histogram_bins: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_is_forty_by_thirty() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.grid_width(), 40);
        assert_eq!(cfg.grid_height(), 30);
    }

    #[test]
    fn tick_duration_follows_rate() {
        let cfg = GameConfig {
            ticks_per_second: 10,
            ..GameConfig::default()
        };
        assert_eq!(cfg.tick_duration(), Duration::from_millis(100));
    }
}
