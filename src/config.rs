//! Tool settings loading and saving
//!
//! Uses RON (Rusty Object Notation) for human-readable settings files.
//! Every field has a default so partial files are fine.

use std::fs;
use std::path::Path;
use serde::{Serialize, Deserialize};

fn default_interact_radius() -> f32 {
    0.1
}

fn default_grid_snap() -> f32 {
    0.25
}

fn default_haptic_pulse_micros() -> u16 {
    500
}

fn default_merge_epsilon() -> f32 {
    0.001
}

/// Settings for the vertex edit tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Hover pick-up radius around the hand pointer, in world units
    #[serde(default = "default_interact_radius")]
    pub interact_radius: f32,

    /// Grid spacing used for vertex placement and drag quantization
    #[serde(default = "default_grid_snap")]
    pub grid_snap: f32,

    /// Haptic pulse length fired on hover changes
    #[serde(default = "default_haptic_pulse_micros")]
    pub haptic_pulse_micros: u16,

    /// Distance under which vertices merge after a completed drag
    #[serde(default = "default_merge_epsilon")]
    pub merge_epsilon: f32,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            interact_radius: default_interact_radius(),
            grid_snap: default_grid_snap(),
            haptic_pulse_micros: default_haptic_pulse_micros(),
            merge_epsilon: default_merge_epsilon(),
        }
    }
}

/// Error type for config loading
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl From<ron::Error> for ConfigError {
    fn from(e: ron::Error) -> Self {
        ConfigError::SerializeError(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

/// Load tool settings from a RON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ToolConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: ToolConfig = ron::from_str(&contents)?;
    Ok(config)
}

/// Load tool settings from a RON string (for embedded defaults or testing)
pub fn load_config_from_str(s: &str) -> Result<ToolConfig, ConfigError> {
    let config: ToolConfig = ron::from_str(s)?;
    Ok(config)
}

/// Save tool settings to a RON file
pub fn save_config<P: AsRef<Path>>(config: &ToolConfig, path: P) -> Result<(), ConfigError> {
    let pretty = ron::ser::PrettyConfig::new()
        .depth_limit(2)
        .indentor("  ".to_string());

    let contents = ron::ser::to_string_pretty(config, pretty)?;
    fs::write(path, contents)?;
    Ok(())
}
