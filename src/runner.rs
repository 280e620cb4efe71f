use std::time::Instant;

use anyhow::{Context, Result};
use tokio::time::{self, MissedTickBehavior};

use crate::{
    input::{drain_activation, EventSource},
    log_debug, log_info, log_warn,
    presenter::{Presenter, Stage},
    wheel::{WheelController, WheelStatus},
};

const ENABLE_LOGS: bool = true;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Quit,
}

/// One wheel, one input source, one presenter, driven a frame at a time.
pub struct WheelRunner<P: Presenter> {
    controller: WheelController,
    events: Box<dyn EventSource>,
    presenter: P,
    stage: Stage,
    frames: u64,
    last_status: WheelStatus,
}

impl<P: Presenter> WheelRunner<P> {
    pub fn new(
        controller: WheelController,
        events: Box<dyn EventSource>,
        presenter: P,
        stage: Stage,
    ) -> Self {
        let last_status = controller.status();
        Self {
            controller,
            events,
            presenter,
            stage,
            frames: 0,
            last_status,
        }
    }

    pub fn controller(&self) -> &WheelController {
        &self.controller
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Poll, tick once, render once.
    pub fn run_frame(&mut self, now: Instant) -> Result<FrameOutcome> {
        let events = self.events.poll();
        let input = drain_activation(&events);
        if input.quit {
            log_info!("Quit requested after {} frames", self.frames);
            return Ok(FrameOutcome::Quit);
        }

        let command = self
            .controller
            .on_tick(now, input.activated)
            .context("wheel cannot continue")?;
        self.stage.present(&mut self.presenter, &command);
        self.frames += 1;

        let status = self.controller.status();
        if status != self.last_status {
            match serde_json::to_string(&self.controller.snapshot()) {
                Ok(snapshot) => log_debug!("Wheel state changed: {}", snapshot),
                Err(e) => log_warn!("Failed to serialize wheel snapshot: {}", e),
            }
            self.last_status = status;
        }

        Ok(FrameOutcome::Continue)
    }

    /// Runs frames at the configured rate until quit or Ctrl-C.
    pub async fn run(&mut self) -> Result<()> {
        let mut interval = time::interval(self.controller.config().frame_interval());
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                tick = interval.tick() => {
                    if self.run_frame(tick.into_std())? == FrameOutcome::Quit {
                        break;
                    }
                }
                _ = &mut shutdown => {
                    log_info!("Interrupted after {} frames", self.frames);
                    break;
                }
            }
        }

        Ok(())
    }
}
