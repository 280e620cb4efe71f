use std::collections::VecDeque;
use std::io::BufRead;
use std::thread;

use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};

use crate::log_warn;

const ENABLE_LOGS: bool = true;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Activate,
    Quit,
}

/// Non-blocking input. `poll` returns everything pending since the last call.
pub trait EventSource {
    fn poll(&mut self) -> Vec<InputEvent>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub activated: bool,
    pub quit: bool,
}

/// Folds one frame's events. Several activations in a frame count as one.
pub fn drain_activation(events: &[InputEvent]) -> FrameInput {
    events.iter().fold(FrameInput::default(), |acc, event| match event {
        InputEvent::Activate => FrameInput {
            activated: true,
            ..acc
        },
        InputEvent::Quit => FrameInput { quit: true, ..acc },
    })
}

pub struct ChannelEventSource {
    rx: UnboundedReceiver<InputEvent>,
    disconnected: bool,
}

impl ChannelEventSource {
    pub fn new(rx: UnboundedReceiver<InputEvent>) -> Self {
        Self {
            rx,
            disconnected: false,
        }
    }

    pub fn channel() -> (UnboundedSender<InputEvent>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Self::new(rx))
    }
}

impl EventSource for ChannelEventSource {
    fn poll(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.disconnected {
                        log_warn!("Input closed; wheel will keep running until interrupted");
                        self.disconnected = true;
                    }
                    break;
                }
            }
        }
        events
    }
}

/// Maps one line of terminal input to an event.
pub fn parse_line(line: &str) -> InputEvent {
    match line.trim().to_ascii_lowercase().as_str() {
        "q" | "quit" | "exit" => InputEvent::Quit,
        _ => InputEvent::Activate,
    }
}

/// Reads stdin on its own thread so the frame loop never blocks on it.
pub fn spawn_stdin_reader(tx: UnboundedSender<InputEvent>) -> std::io::Result<()> {
    thread::Builder::new()
        .name("wheel-input".to_string())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(parse_line(&line)).is_err() {
                    break;
                }
            }
        })?;
    Ok(())
}

/// Replays a fixed list of per-frame event batches.
#[derive(Debug, Default)]
pub struct ScriptedEvents {
    frames: VecDeque<Vec<InputEvent>>,
}

impl ScriptedEvents {
    pub fn new(frames: Vec<Vec<InputEvent>>) -> Self {
        Self {
            frames: frames.into(),
        }
    }
}

impl EventSource for ScriptedEvents {
    fn poll(&mut self) -> Vec<InputEvent> {
        self.frames.pop_front().unwrap_or_default()
    }
}
