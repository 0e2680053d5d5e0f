//! Frame timing: delta time, a rolling FPS estimate, and named stage
//! durations for the HUD.

use std::time::{Duration, Instant};

use arrayvec::ArrayVec;

/// How strongly a new frame's rate pulls the rolling FPS estimate.
const FPS_BLEND: f32 = 0.1;

/// Maximum number of named stages recorded per frame.
pub const MAX_STAGES: usize = 8;

/// One timed pipeline stage.
#[derive(Debug, Clone, Copy)]
pub struct StageTiming {
    pub label: &'static str,
    pub duration: Duration,
}

/// Tracks wall-clock frame pacing. The pipeline itself is frame-time
/// agnostic; this exists for movement scaling and the HUD.
#[derive(Debug)]
pub struct FrameClock {
    last: Instant,
    fps: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            fps: 0.0,
        }
    }

    /// Advance to the next frame, returning the elapsed time since the
    /// previous tick and updating the FPS estimate.
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let dt = now - self.last;
        self.last = now;

        let secs = dt.as_secs_f32();
        if secs > 0.0 {
            let instant_fps = 1.0 / secs;
            self.fps = if self.fps == 0.0 {
                instant_fps
            } else {
                self.fps + FPS_BLEND * (instant_fps - self.fps)
            };
        }
        dt
    }

    /// Smoothed frames-per-second estimate.
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

/// Bounded per-frame list of stage timings.
pub type StageTimings = ArrayVec<StageTiming, MAX_STAGES>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_returns_elapsed_time() {
        let mut clock = FrameClock::new();
        std::thread::sleep(Duration::from_millis(5));
        let dt = clock.tick();
        assert!(dt >= Duration::from_millis(5));
        assert!(clock.fps() > 0.0);
    }

    #[test]
    fn test_fps_estimate_smooths() {
        let mut clock = FrameClock::new();
        std::thread::sleep(Duration::from_millis(2));
        clock.tick();
        let first = clock.fps();
        std::thread::sleep(Duration::from_millis(2));
        clock.tick();
        // Second estimate moves only fractionally from the first.
        assert!((clock.fps() - first).abs() <= first);
    }
}
