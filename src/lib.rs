//! Signal Breakout - a multi-ball breakout simulation
//!
//! Core modules:
//! - `platform`: Clock ticks and keyboard input signals
//! - `sim`: Paddle integration, ball physics and the contact scan
//! - `frame`: Combines the latest signals into sampled frames
//! - `game`: The single owning loop that drives everything
//! - `renderer` / `audio`: Sink collaborators fed by delivered frames

pub mod audio;
pub mod config;
pub mod error;
pub mod frame;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::{ConfigError, SimConfig};
pub use error::SinkError;
pub use frame::{Frame, FrameCompositor};
pub use game::Game;

/// Game configuration constants
pub mod consts {
    /// Nominal clock interval (~60 Hz)
    pub const TICKER_INTERVAL_MS: u64 = 17;

    /// Ball defaults
    pub const NUMBER_OF_BALLS: usize = 5;
    /// Upper bound of the random per-axis speed (added to `BALL_MIN_SPEED`)
    pub const BALL_SPEED: f32 = 60.0;
    /// Lower bound of every per-axis speed
    pub const BALL_MIN_SPEED: f32 = 3.0;
    pub const BALL_RADIUS: f32 = 10.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    /// Pixels per second at full deflection
    pub const PADDLE_SPEED: f32 = 240.0;

    /// Arrow key codes
    pub const PADDLE_KEY_LEFT: u32 = 37;
    pub const PADDLE_KEY_RIGHT: u32 = 39;

    /// Beeper sampling period
    pub const BEEP_SAMPLE_MS: u64 = 100;
    /// Length of a single tone
    pub const BEEP_DURATION_MS: u64 = 100;
    /// Piano key played on a wall bounce
    pub const BOUNCE_CUE_KEY: u8 = 40;
}
