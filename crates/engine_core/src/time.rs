//! Time management for the game loop.

use std::time::Duration;

/// Frame rate reported for a zero-length frame.
pub const IDLE_FPS: f32 = 100.0;

/// Manages frame timing and delta time calculation.
///
/// The host feeds each measured frame delta through [`Time::advance`] or
/// [`Time::advance_seconds`].
#[derive(Debug)]
pub struct Time {
    /// Duration of the last frame.
    delta: Duration,
    /// Total simulated time since start.
    elapsed: Duration,
    /// Frame count since start.
    frame_count: u64,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    /// Create a new time manager.
    pub fn new() -> Self {
        Self {
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Advance by an externally measured frame duration.
    pub fn advance(&mut self, delta: Duration) {
        self.delta = delta;
        self.elapsed = self.elapsed.saturating_add(delta);
        self.frame_count += 1;
    }

    /// Advance by a delta in seconds. Negative or non-finite values count as
    /// zero; deltas too large for a `Duration` saturate.
    pub fn advance_seconds(&mut self, seconds: f32) {
        let seconds = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
        self.advance(Duration::try_from_secs_f32(seconds).unwrap_or(Duration::MAX));
    }

    /// Get the delta time in seconds.
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Get total elapsed time in seconds.
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// Get the current frame count.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Instantaneous FPS from the last frame; [`IDLE_FPS`] for a zero delta.
    pub fn fps(&self) -> f32 {
        let dt = self.delta.as_secs_f32();
        if dt > 0.0 {
            1.0 / dt
        } else {
            IDLE_FPS
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_delta_reports_idle_fps() {
        let mut time = Time::new();
        time.advance_seconds(0.0);
        assert_eq!(time.fps(), IDLE_FPS);
    }

    #[test]
    fn fps_is_reciprocal_of_delta() {
        let mut time = Time::new();
        time.advance_seconds(0.025);
        assert!((time.fps() - 40.0).abs() < 0.01);
    }

    #[test]
    fn elapsed_accumulates_frames() {
        let mut time = Time::new();
        for _ in 0..4 {
            time.advance_seconds(0.5);
        }
        assert_eq!(time.frame_count(), 4);
        assert!((time.elapsed_seconds() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn negative_delta_counts_as_zero() {
        let mut time = Time::new();
        time.advance_seconds(-1.0);
        assert_eq!(time.delta_seconds(), 0.0);
    }

    #[test]
    fn oversized_delta_saturates() {
        let mut time = Time::new();
        time.advance_seconds(1e20);
        assert_eq!(time.delta_seconds(), Duration::MAX.as_secs_f32());
        time.advance_seconds(1e20);
        assert_eq!(time.elapsed_seconds(), Duration::MAX.as_secs_f32());
        assert!(time.fps() >= 0.0);
    }
}
