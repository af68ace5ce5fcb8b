use std::{
    thread::sleep,
    time::{Duration, Instant},
};

/// Caps the frame rate and tracks a smoothed frame time for the FPS counter.
pub struct FpsLimiter {
    frame_timer: Instant,
    frametime_smoothed: f64,
}

impl Default for FpsLimiter {
    fn default() -> Self {
        Self {
            frame_timer: Instant::now(),
            frametime_smoothed: 0.,
        }
    }
}

impl FpsLimiter {
    /// Smoothed frames per second; `None` before the first frame finished.
    pub fn fps(&self) -> Option<f64> {
        (self.frametime_smoothed > 0.).then(|| 1. / self.frametime_smoothed)
    }

    pub fn sleep(&mut self, max_fps: f64) {
        let before_wait = self.frame_timer.elapsed();

        let target_frametime = Duration::from_secs_f64(1. / max_fps.max(1.));
        if target_frametime > before_wait {
            sleep(target_frametime - before_wait);
        }

        let frametime = self.frame_timer.elapsed().as_secs_f64();
        self.frametime_smoothed += (frametime - self.frametime_smoothed) * 0.1;

        self.frame_timer = Instant::now();
    }
}
