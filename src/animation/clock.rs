use std::time::{Duration, Instant};

use crate::foundation::core::Fps;

/// Source of frame timestamps for the render loop.
///
/// Each call blocks until the next frame is due and returns the time elapsed since the first
/// frame. The first call returns [`Duration::ZERO`].
pub trait FrameClock {
    /// Wait for the next frame and return the elapsed time since the clock started.
    fn next_frame(&mut self) -> Duration;
}

/// Non-realtime clock that advances exactly one frame period per call.
///
/// Output is deterministic and renders as fast as the CPU allows.
#[derive(Clone, Debug)]
pub struct FixedStepClock {
    fps: Fps,
    frame: u64,
}

impl FixedStepClock {
    /// Create a clock ticking at `fps`.
    pub fn new(fps: Fps) -> Self {
        Self { fps, frame: 0 }
    }
}

impl FrameClock for FixedStepClock {
    fn next_frame(&mut self) -> Duration {
        let nanos = u128::from(self.frame) * 1_000_000_000u128 * u128::from(self.fps.den)
            / u128::from(self.fps.num);
        self.frame += 1;
        Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
    }
}

/// Realtime clock paced against wall time.
///
/// Sleeps until the next frame deadline. When rendering falls behind, elapsed time jumps ahead so
/// the animation keeps its wall-clock duration and intermediate poses are skipped.
#[derive(Clone, Debug)]
pub struct WallClock {
    period: Duration,
    start: Option<Instant>,
    next_deadline: Option<Instant>,
}

impl WallClock {
    /// Create a clock targeting `fps`.
    pub fn new(fps: Fps) -> Self {
        Self {
            period: Duration::from_secs_f64(fps.frame_duration_secs()),
            start: None,
            next_deadline: None,
        }
    }
}

impl FrameClock for WallClock {
    fn next_frame(&mut self) -> Duration {
        let now = Instant::now();
        let Some(start) = self.start else {
            self.start = Some(now);
            self.next_deadline = Some(now + self.period);
            return Duration::ZERO;
        };

        if let Some(deadline) = self.next_deadline
            && deadline > now
        {
            std::thread::sleep(deadline - now);
        }
        let now = Instant::now();
        self.next_deadline = Some(now + self.period);
        now.duration_since(start)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/clock.rs"]
mod tests;
