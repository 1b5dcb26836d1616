//! Ball vs paddle collision detection and response
//!
//! A paddle's hit box covers its full height and reaches from its face
//! (one paddle width in front of the paddle center) back to the court edge
//! behind it. The ball center is tested against that box; a ball that
//! slips past the face but is still inside the paddle's height band gets
//! bounced back out.

use glam::Vec2;

use super::state::{Court, PaddleSide};
use crate::consts::BOUNCE_ANGLE_SCALE;

/// Axis-aligned hit box of one paddle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddleBox {
    pub side: PaddleSide,
    /// Paddle center (pixels)
    pub center: Vec2,
    pub width: f32,
    pub height: f32,
    /// Court edge behind the paddle
    pub back_x: f32,
}

/// Outgoing ball state after a paddle hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounce {
    pub vel: Vec2,
    /// Ball x pushed back onto the paddle face
    pub x: f32,
}

impl PaddleBox {
    pub fn new(side: PaddleSide, center: Vec2, court: &Court) -> Self {
        let back_x = match side {
            PaddleSide::Left => 0.0,
            PaddleSide::Right => court.width,
        };
        Self {
            side,
            center,
            width: court.paddle_width,
            height: court.paddle_height,
            back_x,
        }
    }

    /// X coordinate of the face the ball bounces off
    #[inline]
    pub fn face_x(&self) -> f32 {
        self.center.x + self.side.outgoing_direction() * self.width
    }

    /// Point-in-box test. Face and top/bottom edges are exclusive so a ball
    /// resting on the face after a bounce does not trigger again.
    pub fn contains(&self, point: Vec2) -> bool {
        let half_height = self.height / 2.0;
        let in_band = point.y > self.center.y - half_height && point.y < self.center.y + half_height;
        let past_face = match self.side {
            PaddleSide::Left => point.x < self.face_x() && point.x >= self.back_x,
            PaddleSide::Right => point.x > self.face_x() && point.x <= self.back_x,
        };
        in_band && past_face
    }

    /// Relative hit position, 0 at the paddle center and about ±0.5 at its
    /// ends. Not clamped.
    #[inline]
    pub fn intersection(&self, point: Vec2) -> f32 {
        (point.y - self.center.y) / self.height
    }

    /// Reflect a ball hitting this paddle at `point`
    pub fn bounce(&self, point: Vec2, speed: f32) -> Bounce {
        let angle = self.intersection(point) * BOUNCE_ANGLE_SCALE;
        Bounce {
            vel: Vec2::new(
                self.side.outgoing_direction() * angle.cos() * speed,
                -angle.sin() * speed,
            ),
            x: self.face_x(),
        }
    }
}
