use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::messages::Message;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum WheelStatus {
    Idle,
    Spinning,
    Result,
}

/// A single spin in progress. Lives only while the wheel is `Spinning`.
#[derive(Debug, Clone)]
pub struct SpinSession {
    pub id: String,
    pub start_time: Instant,
    pub duration: Duration,
    /// Wall-clock start, for logs only. Expiry always uses `start_time`.
    pub started_at: DateTime<Utc>,
    /// Frames rendered since the spin began.
    pub frames: u64,
}

impl SpinSession {
    pub fn begin(id: String, now: Instant, duration: Duration) -> Self {
        Self {
            id,
            start_time: now,
            duration,
            started_at: Utc::now(),
            frames: 0,
        }
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.start_time)
    }
}

#[derive(Debug, Clone, Default)]
pub enum WheelState {
    #[default]
    Idle,
    Spinning(SpinSession),
    Result(Message),
}

impl WheelState {
    pub fn status(&self) -> WheelStatus {
        match self {
            WheelState::Idle => WheelStatus::Idle,
            WheelState::Spinning(_) => WheelStatus::Spinning,
            WheelState::Result(_) => WheelStatus::Result,
        }
    }

    pub fn session(&self) -> Option<&SpinSession> {
        match self {
            WheelState::Spinning(session) => Some(session),
            _ => None,
        }
    }

    pub fn message(&self) -> Option<&Message> {
        match self {
            WheelState::Result(message) => Some(message),
            _ => None,
        }
    }
}

/// What the presenter should show for the current frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum RenderCommand {
    ShowWheelStatic,
    ShowWheelRotated(f64),
    ShowMessage(String),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WheelSnapshot {
    pub status: WheelStatus,
    pub session_id: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub rotation_degrees: f64,
    pub message: Option<String>,
    pub spins_completed: u64,
}
