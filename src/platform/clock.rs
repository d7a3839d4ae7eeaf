//! Frame delta clock

use std::time::{Duration, Instant};

use crate::consts::{MAX_FRAME_DT, MIN_FRAME_TIME};

/// Measures wall time between loop iterations
#[derive(Debug)]
pub struct FrameClock {
    last_frame: Option<Instant>,
    frame_budget: Option<Duration>,
    fps_samples: Vec<f32>,
    pub fps: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(None)
    }
}

impl FrameClock {
    /// `frame_cap` limits iterations per second; `None` runs best-effort
    pub fn new(frame_cap: Option<u32>) -> Self {
        Self {
            last_frame: None,
            frame_budget: frame_cap
                .filter(|&fps| fps > 0)
                .map(|fps| Duration::from_secs_f64(1.0 / fps as f64)),
            fps_samples: Vec::with_capacity(60),
            fps: 0.0,
        }
    }

    /// Seconds since the previous call, capped at `MAX_FRAME_DT`
    ///
    /// Zero on the first call after construction or `reset`.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> f32 {
        let dt = match self.last_frame {
            Some(last) => {
                let raw = now.saturating_duration_since(last).as_secs_f32();
                if raw > 0.0 {
                    self.fps_samples.push(raw);
                    if self.fps_samples.len() > 60 {
                        self.fps_samples.remove(0);
                    }
                    let avg = self.fps_samples.iter().sum::<f32>() / self.fps_samples.len() as f32;
                    self.fps = 1.0 / avg;
                }
                raw.min(MAX_FRAME_DT)
            }
            None => 0.0,
        };
        self.last_frame = Some(now);
        dt
    }

    /// Forget the previous frame so time spent paused is not simulated
    pub fn reset(&mut self) {
        self.last_frame = None;
    }

    /// Sleep out what is left of this frame's budget
    ///
    /// Uncapped loops still wait `MIN_FRAME_TIME` so per-frame deltas stay
    /// well above f32 resolution of the session clock.
    pub fn throttle(&self) {
        let Some(last) = self.last_frame else { return };
        let budget = self
            .frame_budget
            .unwrap_or(Duration::from_secs_f32(MIN_FRAME_TIME));
        let spent = last.elapsed();
        if spent < budget {
            std::thread::sleep(budget - spent);
        }
    }
}
