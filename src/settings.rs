use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{
    error::WheelError,
    messages::{Message, MessageTable},
    presenter::Palette,
    wheel::{RotationMode, WheelConfig},
};

pub const SETTINGS_ENV: &str = "PRIZEWHEEL_SETTINGS";
pub const DEFAULT_SETTINGS_FILE: &str = "prizewheel.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SoundSettings {
    pub enabled: bool,
    /// Audio file to play instead of the built-in chime.
    pub file: Option<PathBuf>,
}

impl Default for SoundSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            file: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WheelSettings {
    pub speed: f64,
    pub spin_duration_ms: u64,
    pub frame_rate: f64,
    pub rotation: RotationMode,
    pub wheel_text: String,
    pub colors: Palette,
    pub sound: SoundSettings,
    pub messages: Vec<Message>,
}

impl Default for WheelSettings {
    fn default() -> Self {
        Self {
            speed: 5.0,
            spin_duration_ms: 3000,
            frame_rate: 60.0,
            rotation: RotationMode::Frames,
            wheel_text: "FORTUNE".into(),
            colors: Palette::default(),
            sound: SoundSettings::default(),
            messages: default_messages(),
        }
    }
}

fn default_messages() -> Vec<Message> {
    vec![
        Message::new("Free coffee!", 4.0),
        Message::new("Sticker pack", 3.0),
        Message::new("Try again", 2.0),
        Message::new("T-shirt", 0.9),
        Message::new("Grand prize!", 0.1),
    ]
}

impl WheelSettings {
    /// Validates the document into the immutable runtime config.
    pub fn to_config(&self) -> Result<WheelConfig, WheelError> {
        let messages = MessageTable::new(self.messages.clone())?;
        WheelConfig::new(
            self.speed,
            Duration::from_millis(self.spin_duration_ms),
            messages,
        )?
        .with_rotation(self.rotation, self.frame_rate)
    }
}

pub struct SettingsStore {
    path: PathBuf,
    data: WheelSettings,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            read_settings(&path)?
        } else {
            WheelSettings::default()
        };

        Ok(Self { path, data })
    }

    /// Uses `PRIZEWHEEL_SETTINGS` if set, else `prizewheel.json` in the
    /// working directory.
    pub fn from_env() -> Result<Self> {
        let path = std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE));
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn settings(&self) -> &WheelSettings {
        &self.data
    }

    pub fn update(&mut self, settings: WheelSettings) -> Result<()> {
        self.persist(&settings)?;
        self.data = settings;
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        self.persist(&self.data)
    }

    pub fn reload(&mut self) -> Result<()> {
        self.data = read_settings(&self.path)?;
        Ok(())
    }

    fn persist(&self, data: &WheelSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}

fn read_settings(path: &Path) -> Result<WheelSettings> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse settings in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::Color;

    #[test]
    fn defaults_are_valid() {
        let config = WheelSettings::default().to_config().unwrap();
        assert_eq!(config.speed, 5.0);
        assert_eq!(config.spin_duration, Duration::from_secs(3));
        assert_eq!(config.rotation, RotationMode::Frames);
        assert_eq!(config.messages.len(), 5);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("absent.json")).unwrap();
        assert_eq!(store.settings(), &WheelSettings::default());
    }

    #[test]
    fn reads_snake_case_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wheel.json");
        fs::write(
            &path,
            r#"{
                "speed": 8.0,
                "spin_duration_ms": 100,
                "frame_rate": 30.0,
                "rotation": "frames",
                "wheel_text": "PRIZES",
                "colors": {
                    "background": "black",
                    "left": "cyan",
                    "right": "white",
                    "wheel_text": "green",
                    "message": "red"
                },
                "sound": { "enabled": false, "file": "ding.wav" },
                "messages": [
                    { "text": "Mug", "weight": 2.0 },
                    { "text": "Pen", "weight": 1.0 }
                ]
            }"#,
        )
        .unwrap();

        let store = SettingsStore::new(path).unwrap();
        let settings = store.settings();
        assert_eq!(settings.spin_duration_ms, 100);
        assert_eq!(settings.frame_rate, 30.0);
        assert_eq!(settings.wheel_text, "PRIZES");
        assert_eq!(settings.colors.background, Color::Black);
        assert_eq!(settings.colors.wheel_text, Color::Green);
        assert!(!settings.sound.enabled);
        assert_eq!(settings.sound.file, Some(PathBuf::from("ding.wav")));

        let config = settings.to_config().unwrap();
        assert_eq!(config.spin_duration, Duration::from_millis(100));
        assert_eq!(config.frame_rate, 30.0);
        assert_eq!(config.messages.len(), 2);
    }

    #[test]
    fn partial_document_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wheel.json");
        fs::write(
            &path,
            r#"{
                "speed": 12.5,
                "rotation": "elapsed",
                "colors": { "message": "white" },
                "messages": [{ "text": "Only prize", "weight": 1 }]
            }"#,
        )
        .unwrap();

        let store = SettingsStore::new(path).unwrap();
        let settings = store.settings();
        assert_eq!(settings.speed, 12.5);
        assert_eq!(settings.spin_duration_ms, 3000);
        assert_eq!(settings.rotation, RotationMode::Elapsed);
        assert_eq!(settings.colors.message, Color::White);
        assert!(settings.sound.enabled);

        let config = settings.to_config().unwrap();
        assert_eq!(config.messages.messages()[0].text, "Only prize");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let err = SettingsStore::new(path).err().unwrap();
        assert!(err.to_string().contains("Failed to parse settings"));
    }

    #[test]
    fn invalid_values_fail_validation() {
        let mut settings = WheelSettings::default();
        settings.messages.clear();
        assert!(matches!(
            settings.to_config(),
            Err(WheelError::InvalidConfig(_))
        ));

        let mut settings = WheelSettings::default();
        settings.spin_duration_ms = 0;
        assert!(settings.to_config().is_err());

        let mut settings = WheelSettings::default();
        settings.speed = -3.0;
        assert!(settings.to_config().is_err());
    }

    #[test]
    fn update_persists_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wheel.json");
        let mut store = SettingsStore::new(path.clone()).unwrap();

        let mut changed = WheelSettings::default();
        changed.wheel_text = "PRIZES".into();
        store.update(changed.clone()).unwrap();

        let mut reopened = SettingsStore::new(path).unwrap();
        assert_eq!(reopened.settings(), &changed);
        reopened.reload().unwrap();
        assert_eq!(reopened.settings().wheel_text, "PRIZES");
    }
}
