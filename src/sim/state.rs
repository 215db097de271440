//! Game state and core simulation types

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::consts::BALL_MIN_SPEED;

/// Closed interval on one axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub start: f32,
    pub end: f32,
}

/// Axis-aligned bounding box of a ball
///
/// Captured once at spawn and never refreshed, so the contact scan keeps
/// testing spawn positions. Kept as-is until the intended behavior is
/// settled; refreshing it per tick would change how the field plays.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallRange {
    pub x: AxisRange,
    pub y: AxisRange,
}

impl BallRange {
    pub fn around(center: Vec2, radius: f32) -> Self {
        Self {
            x: AxisRange {
                start: center.x - radius,
                end: center.x + radius,
            },
            y: AxisRange {
                start: center.y - radius,
                end: center.y + radius,
            },
        }
    }
}

/// Per-axis wall hit flags for the current tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallCollision {
    pub x: bool,
    pub y: bool,
}

impl WallCollision {
    #[inline]
    pub fn any(&self) -> bool {
        self.x || self.y
    }
}

/// A ball entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    /// Centre in playfield space
    pub position: Vec2,
    /// Sign vector, each component -1 or +1
    pub direction: Vec2,
    pub speed_x: f32,
    pub speed_y: f32,
    pub radius: f32,
    pub range: BallRange,
    pub wall_collision: WallCollision,
    /// Ids of balls contacted during the latest scan
    pub collisions: Vec<u32>,
}

impl Ball {
    pub fn new(id: u32, position: Vec2, direction: Vec2, speed: Vec2, radius: f32) -> Self {
        Self {
            id,
            position,
            direction,
            speed_x: speed.x,
            speed_y: speed.y,
            radius,
            range: BallRange::around(position, radius),
            wall_collision: WallCollision::default(),
            collisions: Vec::new(),
        }
    }

    /// Advance along the current direction
    pub fn integrate(&mut self, dt: f32) {
        self.position.x += self.direction.x * dt * self.speed_x;
        self.position.y += self.direction.y * dt * self.speed_y;
    }

    /// Record a contact (one side of the pair)
    pub fn touch(&mut self, other: u32) {
        self.collisions.push(other);
    }
}

/// The player's paddle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Horizontal centre
    pub position: f32,
}

impl Paddle {
    /// Paddle centred on the playfield
    pub fn centered(config: &SimConfig) -> Self {
        Self {
            position: config.width / 2.0,
        }
    }
}

/// Everything the ball field owns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Balls in creation order
    pub balls: Vec<Ball>,
    pub score: u64,
}

impl GameState {
    /// Fresh state with a newly spawned set of balls
    pub fn new<R: Rng + ?Sized>(config: &SimConfig, rng: &mut R) -> Self {
        Self {
            balls: spawn_balls(config, rng),
            score: 0,
        }
    }

    /// Balls that hit a wall this tick
    pub fn bounced(&self) -> impl Iterator<Item = &Ball> {
        self.balls.iter().filter(|b| b.wall_collision.any())
    }
}

/// Random sign, -1 or +1
fn random_sign<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    if rng.random_bool(0.5) { 1.0 } else { -1.0 }
}

/// Integer-valued speed in `[BALL_MIN_SPEED, BALL_MIN_SPEED + spread)`
fn random_speed<R: Rng + ?Sized>(rng: &mut R, spread: f32) -> f32 {
    let speed = (spread * rng.random::<f32>()).floor() + BALL_MIN_SPEED;
    // f32 rounding can land exactly on the upper bound for huge spreads
    if speed >= BALL_MIN_SPEED + spread {
        BALL_MIN_SPEED + spread.ceil() - 1.0
    } else {
        speed
    }
}

/// Ball factory: `config.ball_count` balls anywhere on the playfield
pub fn spawn_balls<R: Rng + ?Sized>(config: &SimConfig, rng: &mut R) -> Vec<Ball> {
    (0..config.ball_count)
        .map(|i| {
            let position = Vec2::new(
                rng.random::<f32>() * config.width,
                rng.random::<f32>() * config.height,
            );
            let direction = Vec2::new(random_sign(rng), random_sign(rng));
            let speed = Vec2::new(
                random_speed(rng, config.ball_speed),
                random_speed(rng, config.ball_speed),
            );
            Ball::new(i as u32 + 1, position, direction, speed, config.ball_radius)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{BALL_RADIUS, BALL_SPEED};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_factory_spawns_configured_balls() {
        let config = SimConfig::new(480.0, 320.0);
        let mut rng = Pcg32::seed_from_u64(7);
        let state = GameState::new(&config, &mut rng);

        assert_eq!(state.balls.len(), 5);
        assert_eq!(state.score, 0);
        for ball in &state.balls {
            assert_eq!(ball.radius, BALL_RADIUS);
            assert!(ball.speed_x >= 3.0 && ball.speed_x < 3.0 + BALL_SPEED);
            assert!(ball.speed_y >= 3.0 && ball.speed_y < 3.0 + BALL_SPEED);
            assert_eq!(ball.speed_x.fract(), 0.0);
            assert!(ball.direction.x.abs() == 1.0 && ball.direction.y.abs() == 1.0);
            assert!(ball.position.x >= 0.0 && ball.position.x < 480.0);
            assert!(ball.position.y >= 0.0 && ball.position.y < 320.0);
            assert_eq!(ball.range, BallRange::around(ball.position, BALL_RADIUS));
            assert!(!ball.wall_collision.any());
            assert!(ball.collisions.is_empty());
        }
    }

    #[test]
    fn test_ids_follow_creation_order() {
        let config = SimConfig::new(480.0, 320.0);
        let balls = spawn_balls(&config, &mut Pcg32::seed_from_u64(1));
        let ids: Vec<u32> = balls.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_same_seed_same_field() {
        let config = SimConfig::new(480.0, 320.0);
        let a = GameState::new(&config, &mut Pcg32::seed_from_u64(42));
        let b = GameState::new(&config, &mut Pcg32::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_integrate_uses_per_axis_speed() {
        let mut ball = Ball::new(
            1,
            Vec2::new(100.0, 100.0),
            Vec2::new(-1.0, 1.0),
            Vec2::new(10.0, 20.0),
            BALL_RADIUS,
        );
        ball.integrate(0.5);
        assert_eq!(ball.position, Vec2::new(95.0, 110.0));
        // Range stays at the spawn position
        assert_eq!(ball.range.x.start, 90.0);
    }
}
