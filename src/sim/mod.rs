//! Simulation module
//!
//! All gameplay logic lives here:
//! - Explicit per-tick folds, no hidden globals
//! - Stable iteration order (ball creation order)
//! - No rendering or platform dependencies beyond the tick/input values

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Contact, resolve_collisions, scan_contacts, wall_bounce};
pub use state::{AxisRange, Ball, BallRange, GameState, Paddle, WallCollision, spawn_balls};
pub use tick::{BallField, PaddleIntegrator, integrate_paddle, tick};
