//! Simulation configuration
//!
//! Fixed at start-up and passed into the pipeline constructors. Playfield
//! dimensions are required; everything else falls back to `crate::consts`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Everything the pipeline needs to know before the first tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Playfield width
    pub width: f32,
    /// Playfield height
    pub height: f32,

    // === Balls ===
    #[serde(default = "default_ball_count")]
    pub ball_count: usize,
    /// Range of the random part of each per-axis speed
    #[serde(default = "default_ball_speed")]
    pub ball_speed: f32,
    #[serde(default = "default_ball_radius")]
    pub ball_radius: f32,

    // === Paddle ===
    #[serde(default = "default_paddle_width")]
    pub paddle_width: f32,
    #[serde(default = "default_paddle_height")]
    pub paddle_height: f32,
    #[serde(default = "default_paddle_speed")]
    pub paddle_speed: f32,
    #[serde(default = "default_left_key")]
    pub left_key: u32,
    #[serde(default = "default_right_key")]
    pub right_key: u32,

    // === Timing ===
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    #[serde(default = "default_beep_sample_ms")]
    pub beep_sample_ms: u64,
    #[serde(default = "default_bounce_cue_key")]
    pub bounce_cue_key: u8,

    /// Seed for the ball factory (random when absent)
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_ball_count() -> usize {
    NUMBER_OF_BALLS
}
fn default_ball_speed() -> f32 {
    BALL_SPEED
}
fn default_ball_radius() -> f32 {
    BALL_RADIUS
}
fn default_paddle_width() -> f32 {
    PADDLE_WIDTH
}
fn default_paddle_height() -> f32 {
    PADDLE_HEIGHT
}
fn default_paddle_speed() -> f32 {
    PADDLE_SPEED
}
fn default_left_key() -> u32 {
    PADDLE_KEY_LEFT
}
fn default_right_key() -> u32 {
    PADDLE_KEY_RIGHT
}
fn default_tick_interval_ms() -> u64 {
    TICKER_INTERVAL_MS
}
fn default_beep_sample_ms() -> u64 {
    BEEP_SAMPLE_MS
}
fn default_bounce_cue_key() -> u8 {
    BOUNCE_CUE_KEY
}

impl SimConfig {
    /// Config for a playfield of the given size with default tuning
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ball_count: NUMBER_OF_BALLS,
            ball_speed: BALL_SPEED,
            ball_radius: BALL_RADIUS,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_speed: PADDLE_SPEED,
            left_key: PADDLE_KEY_LEFT,
            right_key: PADDLE_KEY_RIGHT,
            tick_interval_ms: TICKER_INTERVAL_MS,
            beep_sample_ms: BEEP_SAMPLE_MS,
            bounce_cue_key: BOUNCE_CUE_KEY,
            seed: None,
        }
    }

    /// Builder-style seed override
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject anything the pipeline cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("width", self.width)?;
        positive("height", self.height)?;
        if self.ball_count == 0 {
            return Err(ConfigError::NoBalls);
        }
        positive("ball_speed", self.ball_speed)?;
        positive("ball_radius", self.ball_radius)?;
        positive("paddle_width", self.paddle_width)?;
        positive("paddle_height", self.paddle_height)?;
        positive("paddle_speed", self.paddle_speed)?;
        if self.paddle_width > self.width {
            return Err(ConfigError::PaddleTooWide {
                paddle: self.paddle_width,
                width: self.width,
            });
        }
        if self.left_key == self.right_key {
            return Err(ConfigError::SharedKey(self.left_key));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("tick_interval_ms"));
        }
        if self.beep_sample_ms == 0 {
            return Err(ConfigError::ZeroInterval("beep_sample_ms"));
        }
        Ok(())
    }

    /// Lowest legal paddle centre
    pub fn paddle_min(&self) -> f32 {
        self.paddle_width / 2.0
    }

    /// Highest legal paddle centre
    pub fn paddle_max(&self) -> f32 {
        self.width - self.paddle_width / 2.0
    }

    /// Clamp a paddle centre to the playfield
    ///
    /// Never panics; an unvalidated config with an oversized paddle pins the
    /// centre to `paddle_min`.
    pub fn clamp_paddle(&self, position: f32) -> f32 {
        position.min(self.paddle_max()).max(self.paddle_min())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be a positive finite number, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("ball_count must be at least 1")]
    NoBalls,

    #[error("paddle width {paddle} exceeds playfield width {width}")]
    PaddleTooWide { paddle: f32, width: f32 },

    #[error("left and right movement share key code {0}")]
    SharedKey(u32),

    #[error("{0} must be non-zero")]
    ZeroInterval(&'static str),

    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
