//! Moving-average smoothing of paddle tag positions
//!
//! UWB fixes are noisy. Each paddle keeps a short window of its most recent
//! samples (newest first) and the paddle position is the per-axis mean of
//! that window.

use std::collections::VecDeque;

use glam::Vec3;

use super::state::PaddleSide;

/// Most recent samples of one tag, newest first
#[derive(Debug, Clone, Default)]
pub struct SmoothingWindow {
    samples: VecDeque<Vec3>,
}

impl SmoothingWindow {
    /// Insert a sample at the front, dropping the oldest beyond `capacity`
    pub fn push(&mut self, sample: Vec3, capacity: usize) {
        self.samples.push_front(sample);
        self.samples.truncate(capacity);
    }

    /// Mean over the samples currently held. While the window is still
    /// filling this averages fewer samples rather than padding with zeros.
    pub fn mean(&self, capacity: usize) -> Vec3 {
        let n = self.samples.len().min(capacity);
        if n == 0 {
            return Vec3::ZERO;
        }
        let sum: Vec3 = self.samples.iter().take(n).copied().sum();
        sum / n as f32
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

/// Smoothed position per paddle
#[derive(Debug, Clone)]
pub struct PositionAggregator {
    average_count: usize,
    windows: [SmoothingWindow; 2],
    positions: [Vec3; 2],
}

impl PositionAggregator {
    /// `average_count` of 0 or 1 disables smoothing
    pub fn new(average_count: usize) -> Self {
        Self {
            average_count: average_count.max(1),
            windows: Default::default(),
            positions: [Vec3::ZERO; 2],
        }
    }

    pub fn average_count(&self) -> usize {
        self.average_count
    }

    /// Feed a new sample for `side` and return that paddle's new position
    pub fn ingest(&mut self, side: PaddleSide, sample: Vec3) -> Vec3 {
        let position = if self.average_count <= 1 {
            sample
        } else {
            let window = &mut self.windows[side.index()];
            window.push(sample, self.average_count);
            window.mean(self.average_count)
        };
        self.positions[side.index()] = position;
        position
    }

    /// Current smoothed position (meters)
    pub fn position(&self, side: PaddleSide) -> Vec3 {
        self.positions[side.index()]
    }

    /// Samples currently buffered for `side`
    pub fn window_len(&self, side: PaddleSide) -> usize {
        self.windows[side.index()].len()
    }

    /// Forget all samples and return both paddles to the origin
    pub fn reset(&mut self) {
        for window in &mut self.windows {
            window.clear();
        }
        self.positions = [Vec3::ZERO; 2];
    }
}
