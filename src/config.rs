use std::time::Duration;

use crate::error::{GameError, GameResult};

pub const DEFAULT_GRID_SIZE: usize = 15;
pub const DEFAULT_WALL_PROBABILITY: f64 = 0.25;
pub const DEFAULT_TICK_MS: u64 = 150;
pub const DEFAULT_RENDER_FPS: u64 = 60;
pub const MIN_GRID_SIZE: usize = 3;
/// Keeps board coordinates and the drawn width inside a terminal's `u16`.
pub const MAX_GRID_SIZE: usize = 200;

/// Parameters for building one maze.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    pub size: usize,
    pub wall_probability: f64,
    /// Seed for the game's private RNG; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_GRID_SIZE,
            wall_probability: DEFAULT_WALL_PROBABILITY,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> GameResult<()> {
        if self.size < MIN_GRID_SIZE {
            return Err(GameError::GridTooSmall { size: self.size });
        }
        if self.size > MAX_GRID_SIZE {
            return Err(GameError::GridTooLarge {
                size: self.size,
                max: MAX_GRID_SIZE,
            });
        }
        if !self.wall_probability.is_finite() || !(0.0..=1.0).contains(&self.wall_probability) {
            return Err(GameError::InvalidWallProbability(self.wall_probability));
        }
        Ok(())
    }

    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }
}

/// Timing of the front-end loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    pub tick: Duration,
    pub render_fps: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(DEFAULT_TICK_MS),
            render_fps: DEFAULT_RENDER_FPS,
        }
    }
}

impl RunConfig {
    pub fn new(tick_ms: u64, render_fps: u64) -> GameResult<Self> {
        if tick_ms == 0 {
            return Err(GameError::InvalidTickPeriod);
        }
        Ok(Self {
            tick: Duration::from_millis(tick_ms),
            render_fps: render_fps.max(1),
        })
    }

    pub fn frame_time(&self) -> Duration {
        Duration::from_micros(1_000_000 / self.render_fps.max(1))
    }
}
