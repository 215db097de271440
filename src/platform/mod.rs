//! Platform abstraction layer
//!
//! Handles the two signals that come from outside the simulation:
//! - Time/ticks (`time`)
//! - Keyboard input events (`input`)

pub mod input;
pub mod time;

pub use input::{Direction, InputEvent, InputReceiver, InputSender, InputSignal, channel};
pub use time::{Clock, ManualTime, RealTime, SampleGrid, Tick, TimeSource};
