use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::SpinSession;

/// How spin progress turns into a rotation angle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum RotationMode {
    /// `frames * speed`. Visual speed follows the frame rate.
    #[default]
    Frames,
    /// `elapsed_secs * speed * frame_rate`. Matches `Frames` at the nominal
    /// rate but stays steady when frames are dropped.
    Elapsed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockReading {
    pub rotation_degrees: f64,
    pub expired: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct AnimationClock {
    speed: f64,
    frame_rate: f64,
    mode: RotationMode,
}

impl AnimationClock {
    pub fn new(speed: f64, frame_rate: f64, mode: RotationMode) -> Self {
        Self {
            speed,
            frame_rate,
            mode,
        }
    }

    pub fn tick(&self, now: Instant, session: &SpinSession) -> ClockReading {
        let elapsed = session.elapsed(now);
        let raw = match self.mode {
            RotationMode::Frames => session.frames as f64 * self.speed,
            RotationMode::Elapsed => elapsed.as_secs_f64() * self.speed * self.frame_rate,
        };

        ClockReading {
            rotation_degrees: normalize_degrees(raw),
            expired: elapsed > session.duration,
        }
    }
}

/// Wraps an angle into `[0, 360)`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}
