use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::{
    audio::Sound,
    error::{Result, WheelError},
    log_debug, log_error, log_info,
    messages::{sample, MessageTable, RandomSource},
};

use super::{
    AnimationClock, RenderCommand, RotationMode, SpinSession, WheelSnapshot, WheelState,
    WheelStatus,
};

const ENABLE_LOGS: bool = true;

const MAX_FRAME_RATE: f64 = 1000.0;

/// Validated, immutable wheel parameters.
#[derive(Debug, Clone)]
pub struct WheelConfig {
    /// Degrees per frame.
    pub speed: f64,
    pub spin_duration: Duration,
    pub frame_rate: f64,
    pub rotation: RotationMode,
    pub messages: MessageTable,
}

impl WheelConfig {
    pub fn new(speed: f64, spin_duration: Duration, messages: MessageTable) -> Result<Self> {
        let config = Self {
            speed,
            spin_duration,
            frame_rate: 60.0,
            rotation: RotationMode::Frames,
            messages,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_rotation(mut self, rotation: RotationMode, frame_rate: f64) -> Result<Self> {
        self.rotation = rotation;
        self.frame_rate = frame_rate;
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(WheelError::config(format!(
                "speed must be positive, got {}",
                self.speed
            )));
        }
        if self.spin_duration.is_zero() {
            return Err(WheelError::config("spin duration must be positive"));
        }
        let frame_rate = self.frame_rate;
        if !frame_rate.is_finite() || frame_rate <= 0.0 || frame_rate > MAX_FRAME_RATE {
            return Err(WheelError::config(format!(
                "frame rate must be in (0, {}], got {}",
                MAX_FRAME_RATE, frame_rate
            )));
        }
        if self.messages.is_empty() {
            return Err(WheelError::config("message table is empty"));
        }
        Ok(())
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.frame_rate)
    }
}

/// Owns the spin lifecycle. `on_tick` is the only way the state changes.
pub struct WheelController {
    state: WheelState,
    config: WheelConfig,
    clock: AnimationClock,
    rng: Box<dyn RandomSource>,
    sound: Option<Box<dyn Sound>>,
    last_rotation: f64,
    spins_completed: u64,
}

impl WheelController {
    pub fn new(
        config: WheelConfig,
        rng: Box<dyn RandomSource>,
        sound: Option<Box<dyn Sound>>,
    ) -> Result<Self> {
        config.validate()?;
        let clock = AnimationClock::new(config.speed, config.frame_rate, config.rotation);

        Ok(Self {
            state: WheelState::Idle,
            config,
            clock,
            rng,
            sound,
            last_rotation: 0.0,
            spins_completed: 0,
        })
    }

    pub fn state(&self) -> &WheelState {
        &self.state
    }

    pub fn status(&self) -> WheelStatus {
        self.state.status()
    }

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    pub fn snapshot(&self) -> WheelSnapshot {
        let session = self.state.session();
        WheelSnapshot {
            status: self.state.status(),
            session_id: session.map(|s| s.id.clone()),
            started_at: session.map(|s| s.started_at),
            rotation_degrees: self.last_rotation,
            message: self.state.message().map(|m| m.text.clone()),
            spins_completed: self.spins_completed,
        }
    }

    /// Advances the machine by one frame.
    ///
    /// On a sampling failure the wheel stays `Spinning` and the error is
    /// returned; callers should treat it as fatal.
    pub fn on_tick(&mut self, now: Instant, activated: bool) -> Result<RenderCommand> {
        match std::mem::take(&mut self.state) {
            WheelState::Idle => {
                if activated {
                    let session = SpinSession::begin(
                        Uuid::new_v4().to_string(),
                        now,
                        self.config.spin_duration,
                    );
                    log_info!("Spin {} started at {}", session.id, session.started_at);
                    self.last_rotation = 0.0;
                    self.state = WheelState::Spinning(session);
                    Ok(RenderCommand::ShowWheelRotated(0.0))
                } else {
                    Ok(RenderCommand::ShowWheelStatic)
                }
            }
            WheelState::Spinning(mut session) => {
                session.frames = session.frames.wrapping_add(1);
                let reading = self.clock.tick(now, &session);

                if activated || reading.expired {
                    let picked = match sample(&self.config.messages, self.rng.as_mut()) {
                        Ok(message) => message.clone(),
                        Err(e) => {
                            log_error!("Spin {} could not draw a message: {}", session.id, e);
                            self.state = WheelState::Spinning(session);
                            return Err(e);
                        }
                    };

                    log_info!(
                        "Spin {} {} on {:?}",
                        session.id,
                        if activated { "stopped early" } else { "expired" },
                        picked.text
                    );

                    if let Some(sound) = &self.sound {
                        sound.play();
                    }
                    self.spins_completed += 1;
                    let text = picked.text.clone();
                    self.state = WheelState::Result(picked);
                    return Ok(RenderCommand::ShowMessage(text));
                }

                self.last_rotation = reading.rotation_degrees;
                log_debug!(
                    "Spin {} frame {} at {:.1} degrees",
                    session.id,
                    session.frames,
                    reading.rotation_degrees
                );
                self.state = WheelState::Spinning(session);
                Ok(RenderCommand::ShowWheelRotated(reading.rotation_degrees))
            }
            WheelState::Result(message) => {
                if activated {
                    log_info!("Wheel reset after {:?}", message.text);
                    self.last_rotation = 0.0;
                    Ok(RenderCommand::ShowWheelStatic)
                } else {
                    let text = message.text.clone();
                    self.state = WheelState::Result(message);
                    Ok(RenderCommand::ShowMessage(text))
                }
            }
        }
    }
}
