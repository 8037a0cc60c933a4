use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use caps::{CapDescriptor, EARTH_RADIUS_KM, EditError, PatchResolution};
use scene::components::{Color, ParseColorError};
use serde::{Deserialize, Serialize};

/// Viewer appearance as written in the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsConfig {
    pub background_color: String,
    pub wireframe_color: String,
    pub rotate_sphere: bool,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            background_color: Color::BLACK.to_hex(),
            wireframe_color: Color::GREEN.to_hex(),
            rotate_sphere: false,
        }
    }
}

/// Resolved viewer appearance.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Settings {
    pub background: Color,
    pub wireframe: Color,
    pub rotate_sphere: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            background: Color::BLACK,
            wireframe: Color::GREEN,
            rotate_sphere: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sphere_radius_km: f64,
    pub resolution: PatchResolution,
    pub settings: SettingsConfig,
    pub caps: Vec<CapDescriptor>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sphere_radius_km: EARTH_RADIUS_KM,
            resolution: PatchResolution::default(),
            settings: SettingsConfig::default(),
            caps: CapDescriptor::initial_set(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(serde_json::Error),
    Color(ParseColorError),
    InvalidRadius(f64),
    InvalidCap { index: usize, source: EditError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => write!(f, "read {}: {source}", path.display()),
            ConfigError::Parse(err) => write!(f, "config parse error: {err}"),
            ConfigError::Color(err) => write!(f, "{err}"),
            ConfigError::InvalidRadius(r) => {
                write!(f, "sphere radius must be a positive number of km, got {r}")
            }
            ConfigError::InvalidCap { index, source } => write!(f, "cap {index}: {source}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse(err) => Some(err),
            ConfigError::Color(err) => Some(err),
            ConfigError::InvalidRadius(_) => None,
            ConfigError::InvalidCap { source, .. } => Some(source),
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let payload = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&payload)
    }

    pub fn from_json(payload: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(payload).map_err(ConfigError::Parse)?;
        config.check_radius()?;
        Ok(config)
    }

    /// Loads `path` if given, otherwise the built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn with_radius(mut self, radius_km: Option<f64>) -> Result<Self, ConfigError> {
        if let Some(r) = radius_km {
            self.sphere_radius_km = r;
        }
        self.check_radius()?;
        Ok(self)
    }

    pub fn resolve_settings(&self) -> Result<Settings, ConfigError> {
        Ok(Settings {
            background: Color::from_hex(&self.settings.background_color)
                .map_err(ConfigError::Color)?,
            wireframe: Color::from_hex(&self.settings.wireframe_color)
                .map_err(ConfigError::Color)?,
            rotate_sphere: self.settings.rotate_sphere,
        })
    }

    fn check_radius(&self) -> Result<(), ConfigError> {
        let r = self.sphere_radius_km;
        if r.is_finite() && r > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::InvalidRadius(r))
        }
    }
}
