//! Game state and core simulation types
//!
//! Screen-space state only. Paddle positions in meters live in the
//! aggregator and are mapped onto the court once per tick.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::CourtRange;
use crate::consts::*;
use crate::normalize_clamped;

/// Which paddle a sample, hit or point belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaddleSide {
    Left,
    Right,
}

impl PaddleSide {
    pub const ALL: [PaddleSide; 2] = [PaddleSide::Left, PaddleSide::Right];

    /// Slot in per-side arrays
    #[inline]
    pub fn index(self) -> usize {
        match self {
            PaddleSide::Left => 0,
            PaddleSide::Right => 1,
        }
    }

    /// Horizontal direction a ball leaves this paddle in
    #[inline]
    pub fn outgoing_direction(self) -> f32 {
        match self {
            PaddleSide::Left => 1.0,
            PaddleSide::Right => -1.0,
        }
    }
}

/// Things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Ball bounced off this paddle
    PaddleHit(PaddleSide),
    /// This side won a point
    Scored(PaddleSide),
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    /// Center position (pixels)
    pub pos: Vec2,
    /// Velocity (pixels/s)
    pub vel: Vec2,
    pub radius: f32,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
        }
    }
}

impl Ball {
    /// Move along the current velocity for `dt` seconds
    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    /// Reset to `center` and launch left or right at a random shallow angle
    pub fn launch<R: Rng + ?Sized>(&mut self, center: Vec2, speed: f32, rng: &mut R) {
        let direction = if rng.random_bool(0.5) { -1.0 } else { 1.0 };
        let angle = rng.random_range(-LAUNCH_MAX_ANGLE..=LAUNCH_MAX_ANGLE);

        self.pos = center;
        self.vel = Vec2::new(direction * speed * angle.cos(), speed * angle.sin());
    }
}

/// Points per side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

impl Score {
    pub fn award(&mut self, side: PaddleSide) {
        match side {
            PaddleSide::Left => self.left += 1,
            PaddleSide::Right => self.right += 1,
        }
    }

    pub fn get(&self, side: PaddleSide) -> u32 {
        match side {
            PaddleSide::Left => self.left,
            PaddleSide::Right => self.right,
        }
    }
}

/// Court geometry in screen pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Court {
    pub width: f32,
    pub height: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub net_width: f32,
    pub net_height: f32,
}

impl Court {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            net_width: NET_WIDTH,
            net_height: NET_HEIGHT,
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Fixed horizontal position of a paddle's center
    pub fn paddle_x(&self, side: PaddleSide) -> f32 {
        match side {
            PaddleSide::Left => LEFT_PADDLE_X_FRACTION * self.width,
            PaddleSide::Right => RIGHT_PADDLE_X_FRACTION * self.width,
        }
    }

    /// Map a paddle's physical position (meters) onto the vertical screen axis
    pub fn map_position(&self, x_meters: f32, range: &CourtRange) -> f32 {
        map_position(x_meters, range, self.height)
    }

    /// Side that wins the point if the ball is out of bounds at `pos`.
    ///
    /// The court is split at its horizontal midpoint: leaving through the top
    /// or bottom counts against whoever defends that half.
    pub fn scoring_side(&self, pos: Vec2) -> Option<PaddleSide> {
        let on_left_side = pos.x < self.width / 2.0;
        let out_vertically = pos.y < 0.0 || pos.y > self.height;

        if pos.x < 0.0 || (out_vertically && on_left_side) {
            Some(PaddleSide::Right)
        } else if pos.x > self.width || (out_vertically && !on_left_side) {
            Some(PaddleSide::Left)
        } else {
            None
        }
    }
}

/// Clamp a physical paddle position to the court range and scale it onto `[0, height]`
pub fn map_position(x_meters: f32, range: &CourtRange, height: f32) -> f32 {
    normalize_clamped(x_meters, range.x_min_meters, range.x_max_meters) * height
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// RNG seed for reproducible launches
    pub seed: u64,
    rng: Pcg32,
    pub court: Court,
    /// Physical range the paddles are mapped from
    pub range: CourtRange,
    pub ball: Ball,
    /// Ball speed, constant between launches and bounces (pixels/s)
    pub ball_speed: f32,
    pub score: Score,
    /// Paddle centers in screen space as of the last tick
    pub paddles: [Vec2; 2],
}

impl GameState {
    /// Create a new state with the ball launched from the court center
    pub fn new(seed: u64, width: f32, height: f32, range: CourtRange) -> Self {
        let court = Court::new(width, height);
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            court,
            range,
            ball: Ball::default(),
            ball_speed: BALL_SPEED,
            score: Score::default(),
            paddles: [
                Vec2::new(court.paddle_x(PaddleSide::Left), 0.0),
                Vec2::new(court.paddle_x(PaddleSide::Right), 0.0),
            ],
        };
        state.relaunch();
        state
    }

    /// Re-center the ball and launch it with a fresh random direction
    pub fn relaunch(&mut self) {
        let center = self.court.center();
        let speed = self.ball_speed;
        self.ball.launch(center, speed, &mut self.rng);
    }

    /// Screen position of a paddle's center as of the last tick
    pub fn paddle(&self, side: PaddleSide) -> Vec2 {
        self.paddles[side.index()]
    }
}
