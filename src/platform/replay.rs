//! Headless replay of recorded location messages
//!
//! A capture is plain text, one message per line:
//!
//! ```text
//! # t_ms topic payload
//! 0     dwm/node/4a96/uplink/location {"position":{"x":6.9,"y":1.0,"z":0.9,"quality":80},"superFrameNumber":1}
//! 112.5 dwm/node/9a93/uplink/location {"position":{"x":7.1,"y":1.1,"z":0.9,"quality":75},"superFrameNumber":2}
//! ```
//!
//! The replay runs the game on a simulated clock at the normal tick rate and
//! delivers every message whose timestamp has passed before each tick.
//! Lines are delivered in file order, so an out-of-order line arrives late.

use std::fmt;

use super::deliver;
use crate::audio::CuePlayer;
use crate::consts::TICK_INTERVAL_MS;
use crate::game::Game;
use crate::renderer::Surface;
use crate::sim::{PaddleSide, Score};

/// One recorded message
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureLine {
    /// Arrival time relative to capture start (ms)
    pub t_ms: f64,
    pub topic: String,
    pub payload: String,
}

/// A capture line that could not be read
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureError {
    /// Fewer than three fields
    MissingField { line: usize },
    /// Timestamp is not a finite number
    BadTimestamp { line: usize, value: String },
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::MissingField { line } => {
                write!(f, "line {}: expected <t_ms> <topic> <payload>", line)
            }
            CaptureError::BadTimestamp { line, value } => {
                write!(f, "line {}: bad timestamp {:?}", line, value)
            }
        }
    }
}

impl std::error::Error for CaptureError {}

/// Parse one line (`number` is 1-based, for messages). Blank lines and
/// `#` comments yield `None`.
pub fn parse_capture_line(number: usize, line: &str) -> Result<Option<CaptureLine>, CaptureError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let missing = || CaptureError::MissingField { line: number };
    let (t, rest) = line.split_once(char::is_whitespace).ok_or_else(missing)?;
    let (topic, payload) = rest
        .trim_start()
        .split_once(char::is_whitespace)
        .ok_or_else(missing)?;

    let t_ms: f64 = t
        .parse()
        .ok()
        .filter(|t: &f64| t.is_finite())
        .ok_or_else(|| CaptureError::BadTimestamp {
            line: number,
            value: t.to_string(),
        })?;

    Ok(Some(CaptureLine {
        t_ms,
        topic: topic.to_string(),
        payload: payload.trim_start().to_string(),
    }))
}

/// Parse a whole capture, logging and skipping unreadable lines
pub fn parse_capture(text: &str) -> Vec<CaptureLine> {
    text.lines()
        .enumerate()
        .filter_map(|(i, line)| match parse_capture_line(i + 1, line) {
            Ok(parsed) => parsed,
            Err(e) => {
                log::warn!("skipping capture {}", e);
                None
            }
        })
        .collect()
}

/// Replay tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplayOptions {
    /// Simulated tick period (ms)
    pub tick_ms: f64,
    /// Keep ticking this long after the last message (ms)
    pub linger_ms: f64,
}

impl Default for ReplayOptions {
    fn default() -> Self {
        Self {
            tick_ms: TICK_INTERVAL_MS as f64,
            linger_ms: 0.0,
        }
    }
}

/// Outcome of a replay
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplaySummary {
    pub frames: u64,
    pub delivered: usize,
    pub dropped: usize,
    pub paddle_hits: u32,
    pub score: Score,
    /// Simulated time covered (ms)
    pub duration_ms: f64,
    /// When each point was won
    pub points: Vec<(f64, PaddleSide)>,
}

/// Play `capture` through `game` on a simulated clock starting at 0
pub fn run<S, C>(
    game: &mut Game,
    capture: &[CaptureLine],
    options: ReplayOptions,
    surface: &mut S,
    cue: &C,
) -> ReplaySummary
where
    S: Surface + ?Sized,
    C: CuePlayer + ?Sized,
{
    let tick_ms = if options.tick_ms > 0.0 {
        options.tick_ms
    } else {
        TICK_INTERVAL_MS as f64
    };
    let last_message_ms = capture
        .iter()
        .map(|line| line.t_ms)
        .fold(0.0_f64, f64::max);
    let end_ms = last_message_ms + options.linger_ms.max(0.0);

    let mut summary = ReplaySummary::default();
    let mut now = 0.0;
    let mut next = 0;
    game.start(now);

    while now < end_ms || next < capture.len() {
        now += tick_ms;

        while let Some(line) = capture.get(next).filter(|line| line.t_ms <= now) {
            if deliver(game, &line.topic, line.payload.as_bytes()) {
                summary.delivered += 1;
            } else {
                summary.dropped += 1;
            }
            next += 1;
        }

        let report = game.frame(now, surface, cue);
        summary.frames += 1;
        summary.paddle_hits += report.paddle_hits().count() as u32;
        summary
            .points
            .extend(report.points().map(|side| (now, side)));
    }

    summary.score = game.state().score;
    summary.duration_ms = now;
    log::info!(
        "Replay finished: {} frames, {} messages ({} dropped), score {} - {}",
        summary.frames,
        summary.delivered,
        summary.dropped,
        summary.score.left,
        summary.score.right
    );
    summary
}
