/// Frame pacing
use std::time::{Duration, Instant};

/// Something that holds the loop back to a target rate
pub trait FramePacer {
    /// Block until the next frame may start
    fn wait(&mut self);
}

/// Sleeps out whatever is left of a fixed per-frame budget.
///
/// The budget is measured from the previous `wait` returning, so time spent
/// drawing counts against it. A frame that overruns is not made up later.
#[derive(Debug)]
pub struct FrameClock {
    frame_time: Duration,
    last_tick: Instant,
}

impl FrameClock {
    pub fn new(target_fps: u32) -> Self {
        Self {
            frame_time: Duration::from_secs(1) / target_fps.max(1),
            last_tick: Instant::now(),
        }
    }

    pub fn frame_time(&self) -> Duration {
        self.frame_time
    }

    /// Time left in the current frame budget
    pub fn remaining(&self) -> Duration {
        self.frame_time.saturating_sub(self.last_tick.elapsed())
    }
}

impl FramePacer for FrameClock {
    fn wait(&mut self) {
        let remaining = self.remaining();
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
        self.last_tick = Instant::now();
    }
}
