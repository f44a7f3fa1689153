use std::time::{Duration, Instant};

use crate::sim::StepOutcome;

/// Per-interval summary of frame pacing and what the actor did in those frames.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoopMetricsSnapshot {
    pub fps: f32,
    pub frame_time_ms: f32,
    pub slowest_frame_ms: f32,
    pub moving_frames: u32,
    pub blocked_frames: u32,
}

#[derive(Debug, Default)]
struct FrameTally {
    frames: u32,
    moving: u32,
    blocked: u32,
    total_time: Duration,
    slowest: Duration,
}

impl FrameTally {
    fn add(&mut self, frame_dt: Duration, outcome: StepOutcome) {
        self.frames = self.frames.saturating_add(1);
        self.total_time = self.total_time.saturating_add(frame_dt);
        self.slowest = self.slowest.max(frame_dt);
        if outcome.moving {
            self.moving = self.moving.saturating_add(1);
        }
        if outcome.collided_with.is_some() {
            self.blocked = self.blocked.saturating_add(1);
        }
    }

    fn summarize(&self, elapsed: Duration) -> LoopMetricsSnapshot {
        let elapsed_seconds = elapsed.as_secs_f32().max(f32::EPSILON);
        let frame_time_ms = match self.frames {
            0 => 0.0,
            frames => self.total_time.as_secs_f32() * 1000.0 / frames as f32,
        };
        LoopMetricsSnapshot {
            fps: self.frames as f32 / elapsed_seconds,
            frame_time_ms,
            slowest_frame_ms: self.slowest.as_secs_f32() * 1000.0,
            moving_frames: self.moving,
            blocked_frames: self.blocked,
        }
    }
}

#[derive(Debug)]
pub(crate) struct MetricsAccumulator {
    interval: Duration,
    interval_start: Instant,
    tally: FrameTally,
}

impl MetricsAccumulator {
    pub(crate) fn new(interval: Duration) -> Self {
        Self::starting_at(Instant::now(), interval)
    }

    fn starting_at(interval_start: Instant, interval: Duration) -> Self {
        Self {
            interval,
            interval_start,
            tally: FrameTally::default(),
        }
    }

    pub(crate) fn record_frame(&mut self, frame_dt: Duration, outcome: StepOutcome) {
        self.tally.add(frame_dt, outcome);
    }

    /// Emits and resets once `interval` has elapsed since the last emission.
    pub(crate) fn maybe_snapshot(&mut self, now: Instant) -> Option<LoopMetricsSnapshot> {
        let elapsed = now.saturating_duration_since(self.interval_start);
        if elapsed < self.interval {
            return None;
        }
        let snapshot = std::mem::take(&mut self.tally).summarize(elapsed);
        self.interval_start = now;
        Some(snapshot)
    }
}
