pub mod clock;
pub mod controller;
pub mod state;

pub use clock::{AnimationClock, ClockReading, RotationMode};
pub use controller::{WheelConfig, WheelController};
pub use state::{RenderCommand, SpinSession, WheelSnapshot, WheelState, WheelStatus};
