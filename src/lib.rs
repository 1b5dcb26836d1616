//! UWB Pong - two-player Pong with paddles driven by UWB location tags
//!
//! Core modules:
//! - `sim`: Simulation (position smoothing, ball physics, collisions, scoring)
//! - `renderer`: 2D drawing surface abstraction and frame drawing
//! - `audio`: Fire-and-forget paddle hit cue
//! - `platform`: Browser session wiring and the native replay driver
//! - `config`: Node ids, broker endpoint and court range

pub mod audio;
pub mod config;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use audio::{CuePlayer, SilentCue};
pub use config::{Config, ConfigError, CourtRange};
pub use game::Game;

/// Game configuration constants
pub mod consts {
    /// Simulation/render tick period (40 Hz)
    pub const TICK_INTERVAL_MS: u32 = 25;

    /// Ball speed, constant for the whole rally (pixels/s)
    pub const BALL_SPEED: f32 = 300.0;
    /// Ball radius (pixels)
    pub const BALL_RADIUS: f32 = 20.0;

    /// Paddle size (pixels)
    pub const PADDLE_WIDTH: f32 = 30.0;
    pub const PADDLE_HEIGHT: f32 = 120.0;

    /// Paddle horizontal placement as a fraction of canvas width
    pub const LEFT_PADDLE_X_FRACTION: f32 = 0.05;
    pub const RIGHT_PADDLE_X_FRACTION: f32 = 0.95;

    /// Launch angle limit relative to the horizontal axis (radians)
    pub const LAUNCH_MAX_ANGLE: f32 = std::f32::consts::FRAC_PI_8;
    /// Bounce angle per unit of paddle intersection (radians)
    pub const BOUNCE_ANGLE_SCALE: f32 = std::f32::consts::FRAC_PI_8;

    /// Dashed net cell size (pixels)
    pub const NET_WIDTH: f32 = 10.0;
    pub const NET_HEIGHT: f32 = 30.0;

    /// Score text layout
    pub const SCORE_FONT_PX: f32 = 120.0;
    pub const SCORE_BASELINE_Y: f32 = 100.0;
    pub const LEFT_SCORE_X_FRACTION: f32 = 0.15;
    pub const RIGHT_SCORE_X_FRACTION: f32 = 0.85;
}

/// Linearly rescale `v` from `[min, max]` to `[0, 1]` after clamping.
/// An empty, inverted or non-finite range maps everything to 0.
#[inline]
pub fn normalize_clamped(v: f32, min: f32, max: f32) -> f32 {
    let span = max - min;
    if !(span > 0.0 && span.is_finite()) {
        return 0.0;
    }
    (v.max(min).min(max) - min) / span
}
