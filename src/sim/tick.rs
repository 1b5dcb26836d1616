//! Variable timestep simulation tick
//!
//! Advances the ball by the real elapsed time since the previous tick,
//! settles scoring, maps the paddles onto the court and bounces the ball.

use glam::{Vec2, Vec3};

use super::collision::PaddleBox;
use super::state::{GameEvent, GameState, PaddleSide};

/// Paddle positions along the court axis (meters), sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PaddleReadout {
    pub left_x: f32,
    pub right_x: f32,
}

impl PaddleReadout {
    pub fn new(left_x: f32, right_x: f32) -> Self {
        Self { left_x, right_x }
    }

    /// Only the x axis of a tag runs along the court
    pub fn from_positions(left: Vec3, right: Vec3) -> Self {
        Self::new(left.x, right.x)
    }

    pub fn get(&self, side: PaddleSide) -> f32 {
        match side {
            PaddleSide::Left => self.left_x,
            PaddleSide::Right => self.right_x,
        }
    }
}

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub events: Vec<GameEvent>,
}

impl TickReport {
    pub fn paddle_hits(&self) -> impl Iterator<Item = PaddleSide> + '_ {
        self.events.iter().filter_map(|e| match e {
            GameEvent::PaddleHit(side) => Some(*side),
            _ => None,
        })
    }

    pub fn points(&self) -> impl Iterator<Item = PaddleSide> + '_ {
        self.events.iter().filter_map(|e| match e {
            GameEvent::Scored(side) => Some(*side),
            _ => None,
        })
    }
}

/// Advance the game by `dt` seconds. Negative or NaN `dt` counts as zero.
pub fn tick(state: &mut GameState, paddles: PaddleReadout, dt: f32) -> TickReport {
    let mut report = TickReport::default();
    let dt = dt.max(0.0);

    state.ball.advance(dt);

    // Out of bounds: point and immediate relaunch, so no frame shows a dead ball
    if let Some(scorer) = state.court.scoring_side(state.ball.pos) {
        state.score.award(scorer);
        state.relaunch();
        report.events.push(GameEvent::Scored(scorer));
    }

    for side in PaddleSide::ALL {
        state.paddles[side.index()] = Vec2::new(
            state.court.paddle_x(side),
            state.court.map_position(paddles.get(side), &state.range),
        );
    }

    // Right paddle first; at most one bounce per tick
    for side in [PaddleSide::Right, PaddleSide::Left] {
        let paddle = PaddleBox::new(side, state.paddle(side), &state.court);
        if paddle.contains(state.ball.pos) {
            let bounce = paddle.bounce(state.ball.pos, state.ball_speed);
            state.ball.vel = bounce.vel;
            state.ball.pos.x = bounce.x;
            report.events.push(GameEvent::PaddleHit(side));
            break;
        }
    }

    report
}
