use std::time::Instant;

/// How often the FPS readout refreshes, in seconds
pub const FPS_UPDATE_INTERVAL: f32 = 1.0;

/// Wall-clock time in seconds since the Unix epoch, with millisecond resolution
pub fn wall_clock_seconds() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64 * 0.001
}

/// Frame counter and delta timer; averages the frame rate over
/// `FPS_UPDATE_INTERVAL` windows.
#[derive(Debug)]
pub struct FrameClock {
    frame_number: u64,
    last_frame_time: Instant,
    frames_in_window: u32,
    window_elapsed: f32,
    fps: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            frame_number: 0,
            last_frame_time: Instant::now(),
            frames_in_window: 0,
            window_elapsed: 0.0,
            fps: 0.0,
        }
    }

    /// Start a frame; returns the seconds since the previous one
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame_time).as_secs_f32();
        self.last_frame_time = now;
        self.frame_number += 1;
        self.record(delta);
        delta
    }

    /// Count one frame of `delta` seconds. Returns the new average when a
    /// window completes.
    pub fn record(&mut self, delta: f32) -> Option<f32> {
        self.frames_in_window += 1;
        self.window_elapsed += delta;

        if self.window_elapsed >= FPS_UPDATE_INTERVAL {
            self.fps = self.frames_in_window as f32 / self.window_elapsed;
            log::debug!("FPS: {:.1}", self.fps);
            self.frames_in_window = 0;
            self.window_elapsed = 0.0;
            Some(self.fps)
        } else {
            None
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
