use web_time::{Duration, Instant};

/// Weight of the newest frame in the FPS moving average.
const FPS_SMOOTHING: f32 = 0.05;
/// How often [`FrameTiming::end_frame`] hands back an FPS reading to log.
const REPORT_INTERVAL: Duration = Duration::from_secs(5);

/// Frame pacing for the render loop: an optional FPS cap, a smoothed FPS
/// estimate, and a periodic report of it.
pub struct FrameTiming {
    /// `None` renders as fast as the surface allows.
    min_frame: Option<Duration>,
    last_frame: Instant,
    last_report: Instant,
    smoothed_fps: f32,
}

impl FrameTiming {
    /// Timer capped at `target_fps` (0 = uncapped).
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        let now = Instant::now();
        Self {
            min_frame: min_frame(target_fps),
            last_frame: now,
            last_report: now,
            smoothed_fps: 60.0,
        }
    }

    /// Change the cap without resetting the FPS estimate.
    pub fn set_target_fps(&mut self, target_fps: u32) {
        self.min_frame = min_frame(target_fps);
    }

    /// Whether the cap allows another frame yet.
    #[must_use]
    pub fn should_render(&self) -> bool {
        self.min_frame
            .is_none_or(|min| self.last_frame.elapsed() >= min)
    }

    /// Record a finished frame. Returns the smoothed FPS once per report
    /// interval.
    pub fn end_frame(&mut self) -> Option<f32> {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame);
        self.record(frame_time, now)
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }

    fn record(&mut self, frame_time: Duration, now: Instant) -> Option<f32> {
        self.last_frame = now;
        let secs = frame_time.as_secs_f32();
        if secs > 0.0 {
            let instant_fps = 1.0 / secs;
            self.smoothed_fps +=
                (instant_fps - self.smoothed_fps) * FPS_SMOOTHING;
        }
        if now.duration_since(self.last_report) < REPORT_INTERVAL {
            return None;
        }
        self.last_report = now;
        Some(self.smoothed_fps)
    }
}

fn min_frame(target_fps: u32) -> Option<Duration> {
    (target_fps > 0)
        .then(|| Duration::from_secs_f64(1.0 / f64::from(target_fps)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncapped_always_renders() {
        let mut timing = FrameTiming::new(1);
        assert!(!timing.should_render());
        timing.set_target_fps(0);
        assert!(timing.should_render());
    }

    #[test]
    fn estimate_converges_on_steady_rate() {
        let mut timing = FrameTiming::new(0);
        let start = timing.last_frame;
        let frame = Duration::from_secs_f64(1.0 / 30.0);
        for i in 1..=200 {
            let _ = timing.record(frame, start + frame * i);
        }
        assert!((timing.fps() - 30.0).abs() < 0.1);
    }

    #[test]
    fn zero_length_frames_leave_estimate_alone() {
        let mut timing = FrameTiming::new(0);
        let now = timing.last_frame;
        let _ = timing.record(Duration::ZERO, now);
        assert_eq!(timing.fps(), 60.0);
    }

    #[test]
    fn reports_once_per_interval() {
        let mut timing = FrameTiming::new(0);
        let start = timing.last_report;
        let frame = Duration::from_millis(16);
        assert!(timing.record(frame, start + Duration::from_secs(1)).is_none());
        assert!(timing.record(frame, start + REPORT_INTERVAL).is_some());
        assert!(timing
            .record(frame, start + REPORT_INTERVAL + Duration::from_secs(1))
            .is_none());
    }
}
