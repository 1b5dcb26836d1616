//! The running game: aggregator, simulation state and frame clock
//!
//! Message delivery and frame ticks are separate entry points on one owned
//! value. The platform layer calls them from a single event queue, so a tick
//! always sees the paddle positions of whichever messages were fully
//! handled before it started.

use glam::Vec3;

use crate::audio::CuePlayer;
use crate::config::Config;
use crate::renderer::{Surface, draw_frame};
use crate::sim::{
    GameEvent, GameState, MessageError, PaddleReadout, PaddleSide, PositionAggregator,
    TickReport, TopicRouter, tick,
};

pub struct Game {
    config: Config,
    router: TopicRouter,
    aggregator: PositionAggregator,
    state: GameState,
    /// Timestamp of the previous tick (ms)
    last_tick_ms: Option<f64>,
}

impl Game {
    /// Create a game on a `width` x `height` court with the ball already launched
    pub fn new(config: Config, seed: u64, width: f32, height: f32) -> Self {
        let router = TopicRouter::new(&config);
        let aggregator = PositionAggregator::new(config.position_average_count);
        let state = GameState::new(seed, width, height, config.court);
        Self {
            config,
            router,
            aggregator,
            state,
            last_tick_ms: None,
        }
    }

    pub fn router(&self) -> &TopicRouter {
        &self.router
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Current smoothed tag position of a paddle (meters)
    pub fn paddle_position(&self, side: PaddleSide) -> Vec3 {
        self.aggregator.position(side)
    }

    /// Record the clock the first tick measures from
    pub fn start(&mut self, now_ms: f64) {
        self.last_tick_ms = Some(now_ms);
    }

    /// Feed one inbound message. Returns the paddle it moved.
    pub fn handle_message(
        &mut self,
        topic: &str,
        payload: &[u8],
    ) -> Result<PaddleSide, MessageError> {
        let (side, sample) = self.router.decode(topic, payload)?;
        let position = self.aggregator.ingest(side, sample);
        log::debug!("{:?} paddle at {:?}", side, position);
        Ok(side)
    }

    /// Paddle positions as seen by the next tick
    pub fn paddle_readout(&self) -> PaddleReadout {
        PaddleReadout::from_positions(
            self.aggregator.position(PaddleSide::Left),
            self.aggregator.position(PaddleSide::Right),
        )
    }

    /// Advance the simulation to `now_ms` without drawing
    pub fn step(&mut self, now_ms: f64) -> TickReport {
        let dt = match self.last_tick_ms {
            Some(last) => ((now_ms - last) / 1000.0).max(0.0) as f32,
            None => 0.0,
        };
        self.last_tick_ms = Some(now_ms);

        let paddles = self.paddle_readout();
        let report = tick(&mut self.state, paddles, dt);
        for event in &report.events {
            if let GameEvent::Scored(side) = event {
                log::info!(
                    "Point {:?}: {} - {}",
                    side,
                    self.state.score.left,
                    self.state.score.right
                );
            }
        }
        report
    }

    /// One frame: tick, draw, then fire a cue for each paddle hit
    pub fn frame<S, C>(&mut self, now_ms: f64, surface: &mut S, cue: &C) -> TickReport
    where
        S: Surface + ?Sized,
        C: CuePlayer + ?Sized,
    {
        let report = self.step(now_ms);
        draw_frame(surface, &self.state);
        for _ in report.paddle_hits() {
            cue.play_cue();
        }
        report
    }

    /// Canvas size changed; picked up by the next tick
    pub fn resize(&mut self, width: f32, height: f32) {
        log::debug!("Court resized to {}x{}", width, height);
        self.state.court.resize(width, height);
    }

    /// Start over: zero score, forget paddle samples, relaunch
    pub fn restart(&mut self, seed: u64) {
        let court = self.state.court;
        self.state = GameState::new(seed, court.width, court.height, self.config.court);
        self.aggregator.reset();
        self.last_tick_ms = None;
    }
}
