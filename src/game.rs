//! The owning game loop
//!
//! `Simulation` is the pure per-tick fold over paddle and ball field.
//! `Game` pulls ticks from a clock, feeds input, composes frames and hands
//! them to the renderer and audio sinks. All mutation happens here, on one
//! thread; keyboard sources on other threads go through `InputSender`.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::audio::{AudioSink, Beeper};
use crate::config::{ConfigError, SimConfig};
use crate::frame::{Frame, FrameCompositor};
use crate::platform::{
    Clock, Direction, InputEvent, InputReceiver, InputSender, InputSignal, Tick, TimeSource,
    channel,
};
use crate::renderer::{Renderer, render_frame, render_intro};
use crate::sim::{BallField, GameState, PaddleIntegrator};

/// What one simulation step produced
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepOutput {
    /// New paddle position, if it changed
    pub paddle: Option<f32>,
    /// Whether the ball field advanced
    pub field_advanced: bool,
}

/// Paddle and ball field folded over ticks and the latest input
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimConfig,
    input: InputSignal,
    paddle: PaddleIntegrator,
    field: BallField,
}

impl Simulation {
    /// Validate `config` and spawn the balls
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        log::info!("Spawning {} balls (seed {})", config.ball_count, seed);
        let mut rng = Pcg32::seed_from_u64(seed);
        let state = GameState::new(&config, &mut rng);
        Self::with_state(config, state)
    }

    /// Start from a prepared ball field
    pub fn with_state(config: SimConfig, state: GameState) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            input: InputSignal::new(config.left_key, config.right_key),
            paddle: PaddleIntegrator::new(&config),
            field: BallField::new(state, &config),
            config,
        })
    }

    /// Feed a key event; returns the new direction if it changed
    pub fn handle_input(&mut self, event: InputEvent) -> Option<Direction> {
        let first = self.input.latest().is_none();
        let changed = self.input.handle(event);
        if first && changed.is_some() {
            log::info!("First input received, starting play");
        }
        changed
    }

    /// Advance one tick
    ///
    /// The paddle reads whatever input value is latest right now. The ball
    /// field only runs once the paddle has produced a position, so nothing
    /// moves until the first key press.
    pub fn step(&mut self, tick: &Tick) -> StepOutput {
        let paddle = self.paddle.step(tick, self.input.latest());
        if self.paddle.emitted().is_none() {
            return StepOutput::default();
        }
        self.field.step(tick);
        StepOutput {
            paddle,
            field_advanced: true,
        }
    }

    /// Has the first input arrived
    pub fn started(&self) -> bool {
        self.paddle.emitted().is_some()
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn input(&self) -> &InputSignal {
        &self.input
    }

    pub fn paddle(&self) -> &PaddleIntegrator {
        &self.paddle
    }

    pub fn state(&self) -> &GameState {
        self.field.state()
    }

    pub fn field(&self) -> &BallField {
        &self.field
    }
}

/// Delivery counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryStats {
    pub ticks: u64,
    pub delivered: u64,
    pub dropped: u64,
}

/// Single owning loop around a simulation and its sinks
pub struct Game<S: TimeSource, R: Renderer, A: AudioSink> {
    sim: Simulation,
    clock: Clock<S>,
    receiver: Option<InputReceiver>,
    compositor: FrameCompositor,
    beeper: Beeper,
    renderer: R,
    audio: A,
    renderer_down: bool,
    stats: DeliveryStats,
}

impl<S: TimeSource, R: Renderer, A: AudioSink> Game<S, R, A> {
    /// Build the pipeline; malformed config is rejected before anything runs
    pub fn new(
        config: SimConfig,
        clock: Clock<S>,
        renderer: R,
        audio: A,
    ) -> Result<Self, ConfigError> {
        let sim = Simulation::new(config)?;
        Ok(Self::from_simulation(sim, clock, renderer, audio))
    }

    pub fn from_simulation(sim: Simulation, clock: Clock<S>, renderer: R, audio: A) -> Self {
        let compositor = FrameCompositor::new(sim.config().tick_interval_ms);
        let beeper = Beeper::new(sim.config().beep_sample_ms);
        let mut game = Self {
            compositor,
            beeper,
            sim,
            clock,
            receiver: None,
            renderer,
            audio,
            renderer_down: false,
            stats: DeliveryStats::default(),
        };
        if let Err(e) = render_intro(&mut game.renderer) {
            log::warn!("Could not draw start screen: {}", e);
            game.renderer_down = true;
        }
        game
    }

    /// Hand out a sender for an asynchronous keyboard source
    ///
    /// Replaces any earlier channel.
    pub fn input_sender(&mut self) -> InputSender {
        let (tx, rx) = channel();
        self.receiver = Some(rx);
        tx
    }

    /// Feed a key event directly from the loop's own thread
    pub fn handle_input(&mut self, event: InputEvent) -> Option<Direction> {
        self.sim.handle_input(event)
    }

    /// Run one clock tick: input, simulation, sampled delivery, audio
    ///
    /// Returns the frame delivered to the renderer, if any.
    pub fn advance(&mut self) -> Option<Frame> {
        let tick = self.clock.next()?;
        self.stats.ticks += 1;

        // Events that arrived since the last tick; only the final value matters
        if let Some(rx) = &self.receiver {
            for event in rx.pending() {
                self.sim.handle_input(event);
            }
        }

        let output = self.sim.step(&tick);
        self.compositor.push_tick(tick);
        if let Some(position) = output.paddle {
            self.compositor.push_paddle(position);
        }
        if output.field_advanced {
            self.compositor.push_state(self.sim.state());
        }

        let frame = self.compositor.sample(tick.time);
        if let Some(frame) = &frame {
            self.deliver(frame);
        }
        self.beeper.flush(tick.time, &mut self.audio);
        frame
    }

    /// Run `ticks` clock ticks
    pub fn run_for(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.advance();
        }
    }

    /// Keep ticking while `keep_going` says so
    pub fn run_while<F: FnMut(&Self) -> bool>(&mut self, mut keep_going: F) {
        while keep_going(self) {
            self.advance();
        }
    }

    /// Draw a frame and queue its bounce cues
    ///
    /// A failing renderer drops the frame; the simulation is untouched and
    /// delivery resumes as soon as the renderer accepts a frame again.
    fn deliver(&mut self, frame: &Frame) {
        match render_frame(&mut self.renderer, frame) {
            Ok(()) => {
                if self.renderer_down {
                    log::info!(
                        "Renderer back after {} dropped frames",
                        self.stats.dropped
                    );
                    self.renderer_down = false;
                }
                self.stats.delivered += 1;
            }
            Err(e) => {
                if !self.renderer_down {
                    log::warn!("Renderer unavailable, dropping frames: {}", e);
                    self.renderer_down = true;
                }
                self.stats.dropped += 1;
            }
        }

        let cue = self.sim.config().bounce_cue_key;
        for _ in frame.state.bounced() {
            self.beeper.request(cue);
        }
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn stats(&self) -> DeliveryStats {
        self.stats
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn beeper_mut(&mut self) -> &mut Beeper {
        &mut self.beeper
    }
}
