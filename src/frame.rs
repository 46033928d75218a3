use std::time::Instant;

/// Frame metadata - frame number plus wall-clock timing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub number: u64,
    /// Seconds since the source started
    pub time: f32,
    /// Seconds since the previous frame
    pub delta: f32,
}

impl FrameInfo {
    pub fn new(number: u64, time: f32, delta: f32) -> Self {
        Self { number, time, delta }
    }
}

/// Infinite frame source timed by the wall clock.
/// Use this in a loop: `for frame in FrameIterator::new() { ... }`
pub struct FrameIterator {
    frame_number: u64,
    start_time: Instant,
    last_frame_time: Instant,
}

impl FrameIterator {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            frame_number: 0,
            start_time: now,
            last_frame_time: now,
        }
    }
}

impl Default for FrameIterator {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for FrameIterator {
    type Item = FrameInfo;

    fn next(&mut self) -> Option<FrameInfo> {
        let now = Instant::now();
        let info = FrameInfo::new(
            self.frame_number,
            now.duration_since(self.start_time).as_secs_f32(),
            now.duration_since(self.last_frame_time).as_secs_f32(),
        );

        self.frame_number += 1;
        self.last_frame_time = now;

        Some(info)
    }
}

/// Deterministic frames at a fixed refresh rate, for headless runs
pub fn fixed_rate_frames(hz: f32) -> impl Iterator<Item = FrameInfo> {
    let delta = 1.0 / hz;
    (0u64..).map(move |n| FrameInfo::new(n, n as f32 * delta, delta))
}

/// Tracks frames per second over a reporting window
#[derive(Debug, Clone)]
pub struct FpsCounter {
    window: f32,
    frames: u32,
    elapsed: f32,
    fps: f32,
}

impl FpsCounter {
    pub fn new(window: f32) -> Self {
        Self {
            window,
            frames: 0,
            elapsed: 0.0,
            fps: 0.0,
        }
    }

    /// Count one frame. Returns the new rate when a window completes.
    pub fn record(&mut self, delta: f32) -> Option<f32> {
        self.frames += 1;
        self.elapsed += delta;

        if self.elapsed >= self.window {
            self.fps = self.frames as f32 / self.elapsed;
            self.frames = 0;
            self.elapsed = 0.0;
            Some(self.fps)
        } else {
            None
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}
