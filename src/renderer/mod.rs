//! Rendering collaborator
//!
//! The simulation only talks to a `Renderer`; what it draws on is up to the
//! implementation. `AsciiRenderer` rasterizes into a text grid.

pub mod ascii;

pub use ascii::AsciiRenderer;

use crate::error::SinkError;
use crate::frame::Frame;
use crate::sim::Ball;

/// Static start screen text
pub const TITLE: &str = "signal breakout";
pub const CONTROLS: &str = "press [<] and [>] to play";
pub const AUTHOR: &str = "a reactive arcade demo";
/// Overlay text for the end of a round
pub const GAME_OVER: &str = "game over";

/// Drawing surface fed once per delivered frame
pub trait Renderer {
    fn clear(&mut self) -> Result<(), SinkError>;
    fn draw_ball(&mut self, ball: &Ball) -> Result<(), SinkError>;
    fn draw_paddle(&mut self, position: f32) -> Result<(), SinkError>;
    fn draw_score(&mut self, score: u64) -> Result<(), SinkError>;
    fn draw_title(&mut self, text: &str) -> Result<(), SinkError>;
    fn draw_controls(&mut self, text: &str) -> Result<(), SinkError>;
    fn draw_author(&mut self, text: &str) -> Result<(), SinkError>;
    /// Overlay drawn on top of whatever is on screen
    fn draw_game_over(&mut self, text: &str) -> Result<(), SinkError>;
}

/// Draw the start screen shown until the first key press
pub fn render_intro<R: Renderer + ?Sized>(renderer: &mut R) -> Result<(), SinkError> {
    renderer.draw_title(TITLE)?;
    renderer.draw_controls(CONTROLS)?;
    renderer.draw_author(AUTHOR)
}

/// Clear and redraw one frame
pub fn render_frame<R: Renderer + ?Sized>(renderer: &mut R, frame: &Frame) -> Result<(), SinkError> {
    renderer.clear()?;
    for ball in &frame.state.balls {
        renderer.draw_ball(ball)?;
    }
    renderer.draw_paddle(frame.paddle)?;
    renderer.draw_score(frame.state.score)
}
