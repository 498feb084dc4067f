use web_time::{Duration, Instant};

/// Frame timing: per-frame delta time, smoothed FPS, and optional frame
/// limiting.
pub struct FrameTiming {
    /// Target FPS (0 = unlimited)
    target_fps: u32,
    /// Minimum frame duration based on target FPS
    min_frame_duration: Duration,
    /// Last frame timestamp
    last_frame: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl FrameTiming {
    /// Create a new frame timer with the given FPS target (0 = unlimited).
    pub fn new(target_fps: u32) -> Self {
        let min_frame_duration = if target_fps > 0 {
            Duration::from_secs_f64(1.0 / f64::from(target_fps))
        } else {
            Duration::ZERO
        };

        Self {
            target_fps,
            min_frame_duration,
            last_frame: Instant::now(),
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    /// Whether enough time has passed since the last frame to render
    /// another. Always true when unlimited.
    pub fn should_render(&self) -> bool {
        if self.target_fps == 0 {
            return true;
        }
        self.last_frame.elapsed() >= self.min_frame_duration
    }

    /// Time left until the next frame is due (zero when unlimited).
    pub fn until_next_frame(&self) -> Duration {
        self.min_frame_duration
            .saturating_sub(self.last_frame.elapsed())
    }

    /// Call once per rendered frame. Returns the seconds elapsed since the
    /// previous call.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.record(elapsed)
    }

    /// Fold one frame duration into the FPS average and return it in
    /// seconds.
    fn record(&mut self, elapsed: Duration) -> f32 {
        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
        frame_time
    }

    /// Get the current FPS (smoothed)
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlimited_always_renders() {
        let timing = FrameTiming::new(0);
        assert!(timing.should_render());
        assert_eq!(timing.until_next_frame(), Duration::ZERO);
    }

    #[test]
    fn record_returns_seconds() {
        let mut timing = FrameTiming::new(0);
        let dt = timing.record(Duration::from_millis(250));
        assert!((dt - 0.25).abs() < 1e-6);
    }

    #[test]
    fn fps_converges() {
        let mut timing = FrameTiming::new(0);
        for _ in 0..500 {
            let _ = timing.record(Duration::from_secs_f64(1.0 / 30.0));
        }
        assert!((timing.fps() - 30.0).abs() < 0.1);
    }

    #[test]
    fn zero_duration_keeps_average() {
        let mut timing = FrameTiming::new(0);
        assert_eq!(timing.record(Duration::ZERO), 0.0);
        assert_eq!(timing.fps(), 60.0);
    }

    #[test]
    fn capped_timer_waits() {
        let timing = FrameTiming::new(1);
        assert!(!timing.should_render());
        assert!(timing.until_next_frame() > Duration::from_millis(500));
    }
}
