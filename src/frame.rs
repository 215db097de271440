//! Frame composition
//!
//! Combines the latest tick, paddle position and ball field into one frame.
//! Upstream signals may update several times between deliveries; frames go
//! out on a fixed sample cadence only.

use crate::platform::{SampleGrid, Tick};
use crate::sim::GameState;

/// One combined snapshot for the sinks
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub tick: Tick,
    /// Paddle centre
    pub paddle: f32,
    pub state: GameState,
}

/// Combine-latest join with sampled delivery
#[derive(Debug, Clone)]
pub struct FrameCompositor {
    grid: SampleGrid,
    tick: Option<Tick>,
    paddle: Option<f32>,
    state: Option<GameState>,
    /// Something changed since the last delivery
    dirty: bool,
    delivered: u64,
}

impl FrameCompositor {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            grid: SampleGrid::new(interval_ms),
            tick: None,
            paddle: None,
            state: None,
            dirty: false,
            delivered: 0,
        }
    }

    pub fn push_tick(&mut self, tick: Tick) {
        self.tick = Some(tick);
        self.dirty = true;
    }

    pub fn push_paddle(&mut self, position: f32) {
        self.paddle = Some(position);
        self.dirty = true;
    }

    pub fn push_state(&mut self, state: &GameState) {
        match &mut self.state {
            Some(latest) => latest.clone_from(state),
            None => self.state = Some(state.clone()),
        }
        self.dirty = true;
    }

    /// Latest combination, once every input has produced a value
    pub fn latest(&self) -> Option<Frame> {
        Some(Frame {
            tick: self.tick?,
            paddle: self.paddle?,
            state: self.state.clone()?,
        })
    }

    /// Take a sample at `now_ms`
    ///
    /// Yields a frame only on a sample point, when all inputs are present
    /// and something changed since the previous delivery.
    pub fn sample(&mut self, now_ms: u64) -> Option<Frame> {
        if !self.grid.due(now_ms) || !self.dirty {
            return None;
        }
        let frame = self.latest()?;
        self.dirty = false;
        self.delivered += 1;
        Some(frame)
    }

    /// Frames handed out so far
    pub fn delivered(&self) -> u64 {
        self.delivered
    }
}
