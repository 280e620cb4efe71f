use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::{log_warn, wheel::RenderCommand};

const ENABLE_LOGS: bool = true;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Purple,
    Cyan,
    White,
}

impl Color {
    fn ansi_background(self) -> u8 {
        self.ansi_code() + 10
    }

    fn ansi_code(self) -> u8 {
        match self {
            Color::Black => 30,
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
            Color::Purple => 35,
            Color::Cyan => 36,
            Color::White => 37,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Palette {
    pub background: Color,
    pub left: Color,
    pub right: Color,
    pub wheel_text: Color,
    pub message: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::Blue,
            left: Color::Red,
            right: Color::Green,
            wheel_text: Color::Purple,
            message: Color::Yellow,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Wheel,
    Message,
}

/// Drawing capability. Implementations own the output; callers only issue
/// commands.
pub trait Presenter {
    fn draw_wheel(&mut self, rotation_degrees: f64);
    fn draw_text(&mut self, text: &str, color: Color);
    fn clear(&mut self, region: Region);

    /// Called once after every frame's draw calls.
    fn finish_frame(&mut self) {}
}

/// Turns render commands into presenter calls and remembers what is on
/// screen, so a shown message is wiped once the wheel comes back. A
/// rotated wheel is drawn over a cleared wheel region.
#[derive(Debug, Clone)]
pub struct Stage {
    palette: Palette,
    message_visible: bool,
}

impl Stage {
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            message_visible: false,
        }
    }

    pub fn present(&mut self, presenter: &mut dyn Presenter, command: &RenderCommand) {
        match command {
            RenderCommand::ShowWheelStatic => {
                self.clear_message(presenter);
                presenter.draw_wheel(0.0);
            }
            RenderCommand::ShowWheelRotated(angle) => {
                self.clear_message(presenter);
                presenter.clear(Region::Wheel);
                presenter.draw_wheel(*angle);
            }
            RenderCommand::ShowMessage(text) => {
                presenter.draw_text(text, self.palette.message);
                self.message_visible = true;
            }
        }
        presenter.finish_frame();
    }

    fn clear_message(&mut self, presenter: &mut dyn Presenter) {
        if self.message_visible {
            presenter.clear(Region::Message);
            self.message_visible = false;
        }
    }
}

/// Single-line ANSI rendering, rewritten in place with `\r`. Every segment
/// sits on the palette background; a cleared region becomes background-filled
/// blanks of the same width.
pub struct TerminalPresenter<W: Write> {
    out: W,
    wheel_text: String,
    palette: Palette,
    wheel: String,
    wheel_width: usize,
    message: String,
    message_width: usize,
    last_line: String,
    write_failed: bool,
}

const POINTERS: [char; 8] = ['↑', '↗', '→', '↘', '↓', '↙', '←', '↖'];

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W, wheel_text: impl Into<String>, palette: Palette) -> Self {
        Self {
            out,
            wheel_text: wheel_text.into(),
            palette,
            wheel: String::new(),
            wheel_width: 0,
            message: String::new(),
            message_width: 0,
            last_line: String::new(),
            write_failed: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, color: Color, text: &str) -> String {
        format!(
            "\x1b[{};{}m{}\x1b[0m",
            color.ansi_code(),
            self.palette.background.ansi_background(),
            text
        )
    }

    fn fill(&self, width: usize) -> String {
        format!(
            "\x1b[{}m{}\x1b[0m",
            self.palette.background.ansi_background(),
            " ".repeat(width)
        )
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn draw_wheel(&mut self, rotation_degrees: f64) {
        let index = ((rotation_degrees / 45.0).round() as usize) % POINTERS.len();
        let half = if rotation_degrees < 180.0 {
            self.palette.left
        } else {
            self.palette.right
        };
        let angle = format!(" {:>5.1}°", rotation_degrees);
        self.wheel = format!(
            "{}{}{}{}",
            self.paint(self.palette.wheel_text, &self.wheel_text),
            self.fill(1),
            self.paint(half, &POINTERS[index].to_string()),
            self.paint(self.palette.wheel_text, &angle)
        );
        self.wheel_width = self.wheel_text.chars().count() + 2 + angle.chars().count();
    }

    fn draw_text(&mut self, text: &str, color: Color) {
        self.message = self.paint(color, text);
        self.message_width = text.chars().count();
    }

    fn clear(&mut self, region: Region) {
        match region {
            Region::Wheel => self.wheel = self.fill(self.wheel_width),
            Region::Message => self.message = self.fill(self.message_width),
        }
    }

    fn finish_frame(&mut self) {
        let line = if self.message.is_empty() {
            self.wheel.clone()
        } else {
            format!("{}  {}", self.wheel, self.message)
        };
        if line == self.last_line {
            return;
        }

        // Clear to end of line so a shorter frame does not leave residue
        let result = write!(self.out, "\r{}\x1b[K", line).and_then(|_| self.out.flush());
        if let Err(e) = result {
            if !self.write_failed {
                log_warn!("Failed to write frame: {}", e);
                self.write_failed = true;
            }
            return;
        }
        self.last_line = line;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Wheel(f64),
    Text(String, Color),
    Clear(Region),
}

/// Keeps every call, for tests and headless runs.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub calls: Vec<DrawCall>,
    pub frames: usize,
}

impl Presenter for RecordingPresenter {
    fn draw_wheel(&mut self, rotation_degrees: f64) {
        self.calls.push(DrawCall::Wheel(rotation_degrees));
    }

    fn draw_text(&mut self, text: &str, color: Color) {
        self.calls.push(DrawCall::Text(text.to_string(), color));
    }

    fn clear(&mut self, region: Region) {
        self.calls.push(DrawCall::Clear(region));
    }

    fn finish_frame(&mut self) {
        self.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_is_cleared_when_wheel_returns() {
        let mut stage = Stage::new(Palette::default());
        let mut presenter = RecordingPresenter::default();

        stage.present(&mut presenter, &RenderCommand::ShowMessage("Win".into()));
        stage.present(&mut presenter, &RenderCommand::ShowMessage("Win".into()));
        stage.present(&mut presenter, &RenderCommand::ShowWheelStatic);
        stage.present(&mut presenter, &RenderCommand::ShowWheelStatic);

        assert_eq!(
            presenter.calls,
            vec![
                DrawCall::Text("Win".into(), Color::Yellow),
                DrawCall::Text("Win".into(), Color::Yellow),
                DrawCall::Clear(Region::Message),
                DrawCall::Wheel(0.0),
                DrawCall::Wheel(0.0),
            ]
        );
        assert_eq!(presenter.frames, 4);
    }

    #[test]
    fn rotated_wheel_passes_angle_through() {
        let mut stage = Stage::new(Palette::default());
        let mut presenter = RecordingPresenter::default();
        stage.present(&mut presenter, &RenderCommand::ShowWheelRotated(135.0));
        assert_eq!(
            presenter.calls,
            vec![DrawCall::Clear(Region::Wheel), DrawCall::Wheel(135.0)]
        );
    }

    #[test]
    fn terminal_skips_unchanged_frames() {
        let mut presenter = TerminalPresenter::new(Vec::new(), "FORTUNE", Palette::default());
        presenter.draw_wheel(0.0);
        presenter.finish_frame();
        presenter.draw_wheel(0.0);
        presenter.finish_frame();

        let out = String::from_utf8(presenter.into_inner()).unwrap();
        assert_eq!(out.matches('\r').count(), 1);
        assert!(out.contains("FORTUNE"));
        assert!(out.contains('↑'));
    }

    #[test]
    fn terminal_shows_colored_message() {
        let mut presenter = TerminalPresenter::new(Vec::new(), "FORTUNE", Palette::default());
        presenter.draw_wheel(90.0);
        presenter.draw_text("Free coffee", Color::Yellow);
        presenter.finish_frame();

        let out = String::from_utf8(presenter.into_inner()).unwrap();
        // Yellow on the default blue background
        assert!(out.contains("\x1b[33;44mFree coffee\x1b[0m"));
        assert!(out.contains('→'));
    }

    #[test]
    fn cleared_message_is_filled_with_background() {
        let palette = Palette {
            background: Color::Black,
            ..Palette::default()
        };
        let mut presenter = TerminalPresenter::new(Vec::new(), "FORTUNE", palette);
        presenter.draw_wheel(0.0);
        presenter.draw_text("Win", Color::Yellow);
        presenter.finish_frame();
        presenter.clear(Region::Message);
        presenter.finish_frame();

        let out = String::from_utf8(presenter.into_inner()).unwrap();
        let last_frame = out.rsplit('\r').next().unwrap();
        assert!(!last_frame.contains("Win"));
        assert!(last_frame.ends_with("\x1b[40m   \x1b[0m\x1b[K"));
    }

    #[test]
    fn palette_defaults_to_blue_background() {
        assert_eq!(Palette::default().background, Color::Blue);
    }

    #[test]
    fn palette_reads_lowercase_names() {
        let palette: Palette =
            serde_json::from_str(r#"{"message":"cyan","background":"black"}"#).unwrap();
        assert_eq!(palette.message, Color::Cyan);
        assert_eq!(palette.background, Color::Black);
        assert_eq!(palette.left, Color::Red);
    }
}
