use std::{env, fs, path::Path};

use serde::Deserialize;

use super::{
    DEFAULT_CONTROL_SUFFIX, DEFAULT_EVENT_LOG_TITLE, DEFAULT_MAX_MESSAGES, DEFAULT_REFRESH_MS,
    DEFAULT_STICKY_WARN_THRESHOLD, DEFAULT_STREAM_LABEL, DEFAULT_TOPIC_PREFIX, MAX_MESSAGES_LIMIT,
};
use crate::panel::error::{PanelError, Result};

/// How the physical panel is mounted relative to the logical layout, in
/// degrees counter-clockwise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "u16")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub const fn degrees(self) -> u16 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    pub const fn swaps_axes(self) -> bool {
        matches!(self, Self::Deg90 | Self::Deg270)
    }
}

impl TryFrom<u16> for Rotation {
    type Error = String;

    fn try_from(value: u16) -> core::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Deg0),
            90 => Ok(Self::Deg90),
            180 => Ok(Self::Deg180),
            270 => Ok(Self::Deg270),
            other => Err(format!("rotation must be 0, 90, 180 or 270 (got {other})")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub device: String,
    pub rotate: Rotation,
    pub refresh_ms: u64,
    pub title: String,
    pub stream_label: String,
    /// Logical size used when no framebuffer is attached (`--headless`).
    pub headless_width: u32,
    pub headless_height: u32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            device: "/dev/fb0".into(),
            rotate: Rotation::Deg0,
            refresh_ms: DEFAULT_REFRESH_MS,
            title: DEFAULT_EVENT_LOG_TITLE.into(),
            stream_label: DEFAULT_STREAM_LABEL.into(),
            headless_width: 480,
            headless_height: 320,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TouchSettings {
    /// evdev node; touch input is disabled when unset.
    pub device: Option<String>,
    /// Fallback resolution when the device does not report its axis range.
    pub max_x: Option<u32>,
    pub max_y: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MqttSettings {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub topic_prefix: String,
    pub control_suffix: String,
    pub client_id: String,
    pub keep_alive_secs: u64,
}

impl Default for MqttSettings {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: 1883,
            username: None,
            password: None,
            topic_prefix: DEFAULT_TOPIC_PREFIX.into(),
            control_suffix: DEFAULT_CONTROL_SUFFIX.into(),
            client_id: "lcars-panel".into(),
            keep_alive_secs: 30,
        }
    }
}

impl MqttSettings {
    /// Prefix without trailing separators, e.g. `home/lcars_panel`.
    pub fn base_topic(&self) -> &str {
        self.topic_prefix.trim_end_matches('/')
    }

    pub fn subscription(&self) -> String {
        format!("{}/#", self.base_topic())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PanelSection {
    pub max_messages: usize,
    pub log_control_messages: bool,
    pub sticky_warn_threshold: usize,
    pub debug_layout: bool,
}

impl Default for PanelSection {
    fn default() -> Self {
        Self {
            max_messages: DEFAULT_MAX_MESSAGES,
            log_control_messages: false,
            sticky_warn_threshold: DEFAULT_STICKY_WARN_THRESHOLD,
            debug_layout: false,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PanelSettings {
    pub display: DisplaySettings,
    pub touch: TouchSettings,
    pub mqtt: MqttSettings,
    pub panel: PanelSection,
}

impl PanelSettings {
    /// File (optional) first, then environment, then validation.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        settings.apply_env_overrides(|key| env::var(key).ok())?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| PanelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|err| PanelError::ConfigParse {
            details: err.to_string(),
        })
    }

    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("FBDEV") {
            self.display.device = value;
        }
        if let Some(value) = lookup("DISPLAY_ROTATE") {
            let degrees = parse_env::<u16>("DISPLAY_ROTATE", &value)?;
            self.display.rotate = Rotation::try_from(degrees)
                .map_err(|details| PanelError::InvalidConfig { details })?;
        }
        if let Some(value) = lookup("LCARS_TITLE_TEXT") {
            self.display.title = value;
        }
        if let Some(value) = lookup("TOUCH_DEVICE") {
            self.touch.device = Some(value).filter(|device| !device.trim().is_empty());
        }
        if let Some(value) = lookup("MQTT_HOST") {
            self.mqtt.host = value;
        }
        if let Some(value) = lookup("MQTT_PORT") {
            self.mqtt.port = parse_env("MQTT_PORT", &value)?;
        }
        if let Some(value) = lookup("MQTT_USER") {
            self.mqtt.username = Some(value);
        }
        if let Some(value) = lookup("MQTT_PASS") {
            self.mqtt.password = Some(value);
        }
        if let Some(value) = lookup("MQTT_TOPIC_PREFIX") {
            self.mqtt.topic_prefix = value;
        }
        if let Some(value) = lookup("MAX_MESSAGES") {
            self.panel.max_messages = parse_env("MAX_MESSAGES", &value)?;
        }
        if let Some(value) = lookup("LOG_CONTROL_MESSAGES") {
            self.panel.log_control_messages = parse_env_bool("LOG_CONTROL_MESSAGES", &value)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.mqtt.base_topic().is_empty() {
            return Err(PanelError::InvalidConfig {
                details: "mqtt.topic_prefix must not be empty".into(),
            });
        }
        if self.mqtt.control_suffix.trim_matches('/').is_empty() {
            return Err(PanelError::InvalidConfig {
                details: "mqtt.control_suffix must not be empty".into(),
            });
        }
        if self.display.refresh_ms == 0 {
            return Err(PanelError::InvalidConfig {
                details: "display.refresh_ms must be positive".into(),
            });
        }
        if self.display.headless_width == 0 || self.display.headless_height == 0 {
            return Err(PanelError::InvalidConfig {
                details: "display.headless_width/height must be positive".into(),
            });
        }
        if self.panel.max_messages > MAX_MESSAGES_LIMIT {
            return Err(PanelError::InvalidConfig {
                details: format!(
                    "panel.max_messages={} exceeds the limit of {MAX_MESSAGES_LIMIT}",
                    self.panel.max_messages
                ),
            });
        }
        if matches!(self.touch.max_x, Some(0)) || matches!(self.touch.max_y, Some(0)) {
            return Err(PanelError::InvalidConfig {
                details: "touch.max_x/max_y must be positive".into(),
            });
        }
        Ok(())
    }
}

fn parse_env<T: core::str::FromStr>(key: &'static str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| PanelError::InvalidConfig {
            details: format!("{key}={value:?} is not a valid value"),
        })
}

fn parse_env_bool(key: &'static str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" | "enable" => Ok(true),
        "0" | "false" | "no" | "off" | "disable" | "" => Ok(false),
        _ => Err(PanelError::InvalidConfig {
            details: format!("{key}={value:?} is not a boolean"),
        }),
    }
}
