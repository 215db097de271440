//! Per-tick update functions
//!
//! Each integrator is a fold over clock ticks: `state = f(state, tick, input)`.

use super::collision::{Contact, resolve_collisions};
use super::state::{GameState, Paddle};
use crate::config::SimConfig;
use crate::platform::{Direction, Tick};

/// Advance a paddle centre by one step and clamp it to the playfield
#[inline]
pub fn integrate_paddle(position: f32, direction: Direction, dt: f32, config: &SimConfig) -> f32 {
    let next = position + direction.as_f32() * dt * config.paddle_speed;
    config.clamp_paddle(next)
}

/// Paddle position signal, emitting only when the position changes
#[derive(Debug, Clone)]
pub struct PaddleIntegrator {
    config: SimConfig,
    paddle: Paddle,
    emitted: Option<f32>,
}

impl PaddleIntegrator {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            config: config.clone(),
            paddle: Paddle::centered(config),
            emitted: None,
        }
    }

    /// Integrate one tick against the latest input
    ///
    /// Does nothing until the input signal has produced a value. The first
    /// integration always emits; later ones only when the clamped position
    /// moved.
    pub fn step(&mut self, tick: &Tick, input: Option<Direction>) -> Option<f32> {
        let direction = input?;
        self.paddle.position =
            integrate_paddle(self.paddle.position, direction, tick.dt(), &self.config);

        if self.emitted == Some(self.paddle.position) {
            return None;
        }
        log::trace!("paddle -> {:.2}", self.paddle.position);
        self.emitted = Some(self.paddle.position);
        self.emitted
    }

    pub fn paddle(&self) -> Paddle {
        self.paddle
    }

    /// Last emitted position (`None` before the first input)
    pub fn emitted(&self) -> Option<f32> {
        self.emitted
    }
}

/// Advance every ball, then run the contact scan and wall bounce
pub fn tick(state: &mut GameState, dt: f32, width: f32, height: f32) -> Vec<Contact> {
    for ball in &mut state.balls {
        ball.integrate(dt);
    }
    resolve_collisions(&mut state.balls, width, height)
}

/// Authoritative owner of the balls and score
#[derive(Debug, Clone)]
pub struct BallField {
    state: GameState,
    width: f32,
    height: f32,
    ticks: u64,
}

impl BallField {
    pub fn new(state: GameState, config: &SimConfig) -> Self {
        Self {
            state,
            width: config.width,
            height: config.height,
            ticks: 0,
        }
    }

    /// Advance one tick; always emits the full state
    pub fn step(&mut self, tick: &Tick) -> &GameState {
        let contacts = self::tick(&mut self.state, tick.dt(), self.width, self.height);
        self.ticks += 1;

        if !contacts.is_empty() {
            log::trace!("tick {}: {} contacts", self.ticks, contacts.len());
        }
        for ball in self.state.bounced() {
            log::debug!(
                "ball {} bounced at ({:.1}, {:.1}) x={} y={}",
                ball.id,
                ball.position.x,
                ball.position.y,
                ball.wall_collision.x,
                ball.wall_collision.y
            );
        }
        &self.state
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Ticks processed so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Ball, spawn_balls};
    use glam::Vec2;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn config() -> SimConfig {
        SimConfig::new(480.0, 320.0)
    }

    fn at(time: u64, delta_time: Option<f32>) -> Tick {
        Tick { time, delta_time }
    }

    #[test]
    fn test_paddle_waits_for_input() {
        let mut paddle = PaddleIntegrator::new(&config());
        assert_eq!(paddle.step(&at(17, Some(0.1)), None), None);
        assert_eq!(paddle.paddle().position, 240.0);
        assert_eq!(paddle.emitted(), None);
    }

    #[test]
    fn test_paddle_moves_left() {
        let mut paddle = PaddleIntegrator::new(&config());
        let pos = paddle.step(&at(100, Some(0.1)), Some(Direction::Left));
        assert_eq!(pos, Some(216.0));
    }

    #[test]
    fn test_paddle_clamps() {
        let mut paddle = PaddleIntegrator::new(&config());
        let pos = paddle.step(&at(100, Some(2.0)), Some(Direction::Right));
        assert_eq!(pos, Some(430.0));
        // Pinned against the wall: no change, no emission
        assert_eq!(paddle.step(&at(200, Some(0.1)), Some(Direction::Right)), None);
        assert_eq!(paddle.paddle().position, 430.0);
    }

    #[test]
    fn test_oversized_paddle_does_not_panic() {
        // Unvalidated: paddle_min 50 > paddle_max 30
        let narrow = SimConfig::new(80.0, 320.0);
        let mut paddle = PaddleIntegrator::new(&narrow);
        assert_eq!(paddle.step(&at(17, None), Some(Direction::Left)), Some(50.0));
        assert_eq!(paddle.step(&at(34, Some(0.5)), Some(Direction::Right)), None);
    }

    #[test]
    fn test_paddle_first_step_emits_even_when_still() {
        let mut paddle = PaddleIntegrator::new(&config());
        assert_eq!(paddle.step(&at(17, None), Some(Direction::Still)), Some(240.0));
        assert_eq!(paddle.step(&at(34, Some(0.017)), Some(Direction::Still)), None);
    }

    #[test]
    fn test_first_tick_does_not_move() {
        let config = config();
        let mut state = GameState::new(&config, &mut Pcg32::seed_from_u64(3));
        let before: Vec<Vec2> = state.balls.iter().map(|b| b.position).collect();
        tick(&mut state, at(17, None).dt(), config.width, config.height);
        let after: Vec<Vec2> = state.balls.iter().map(|b| b.position).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_zero_ticks_is_identity() {
        let config = config();
        let initial = GameState::new(&config, &mut Pcg32::seed_from_u64(11));
        let field = BallField::new(initial.clone(), &config);
        assert_eq!(field.state(), &initial);
        assert_eq!(field.ticks(), 0);
    }

    #[test]
    fn test_wall_bounce_lasts_one_tick() {
        let config = config();
        let ball = Ball::new(
            1,
            Vec2::new(12.0, 100.0),
            Vec2::new(-1.0, 1.0),
            Vec2::new(30.0, 10.0),
            10.0,
        );
        let mut field = BallField::new(
            GameState {
                balls: vec![ball],
                score: 0,
            },
            &config,
        );

        // 12 - 30 * 0.1 = 9 < radius: bounce
        let state = field.step(&at(100, Some(0.1)));
        assert!(state.balls[0].wall_collision.x);
        assert_eq!(state.balls[0].direction.x, 1.0);

        // 9 + 3 = 12: back inside
        let state = field.step(&at(200, Some(0.1)));
        assert!(!state.balls[0].wall_collision.x);
        assert_eq!(state.balls[0].direction.x, 1.0);
        assert_eq!(state.balls[0].position.x, 12.0);
    }

    #[test]
    fn test_score_never_changes() {
        let config = config();
        let mut field = BallField::new(GameState::new(&config, &mut Pcg32::seed_from_u64(5)), &config);
        for i in 1..500 {
            field.step(&at(i * 17, Some(0.017)));
        }
        assert_eq!(field.state().score, 0);
        assert_eq!(field.state().balls.len(), config.ball_count);
    }

    proptest! {
        #[test]
        fn prop_paddle_stays_in_bounds(
            steps in prop::collection::vec((0u8..3, 0.0f32..1.0), 1..200)
        ) {
            let config = config();
            let mut paddle = PaddleIntegrator::new(&config);
            for (i, (dir, dt)) in steps.into_iter().enumerate() {
                let direction = match dir {
                    0 => Direction::Left,
                    1 => Direction::Still,
                    _ => Direction::Right,
                };
                paddle.step(&at(i as u64, Some(dt)), Some(direction));
                let pos = paddle.paddle().position;
                prop_assert!(pos >= config.paddle_min() && pos <= config.paddle_max());
            }
        }

        #[test]
        fn prop_directions_stay_unit(seed in any::<u64>(), dts in prop::collection::vec(0.0f32..0.5, 1..100)) {
            let config = config();
            let mut state = GameState {
                balls: spawn_balls(&config, &mut Pcg32::seed_from_u64(seed)),
                score: 0,
            };
            for dt in dts {
                let previous: Vec<Vec2> = state.balls.iter().map(|b| b.direction).collect();
                tick(&mut state, dt, config.width, config.height);
                for (ball, before) in state.balls.iter().zip(previous) {
                    prop_assert!(ball.direction.x.abs() == 1.0 && ball.direction.y.abs() == 1.0);
                    // Reflection law: a flagged axis flipped, an unflagged one did not
                    prop_assert_eq!(ball.wall_collision.x, ball.direction.x != before.x);
                    prop_assert_eq!(ball.wall_collision.y, ball.direction.y != before.y);
                }
                for ball in &state.balls {
                    for other in &ball.collisions {
                        let peer = state.balls.iter().find(|b| b.id == *other).unwrap();
                        prop_assert!(peer.collisions.contains(&ball.id));
                    }
                }
            }
        }
    }
}
