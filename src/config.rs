//! Configuration.
//!
//! An optional TOML file deserialized with `serde`, covering the fields this
//! engine actually consumes. A missing file is not fatal — the companion
//! command utility expects a usable manager with no configuration present
//! at all, so absence just means "use the compile-time defaults."

use serde::Deserialize;
use std::path::Path;

use crate::backend::Color;
use crate::error::ConfigError;

/// Decoration colors for the focused and unfocused states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Colors {
    pub unfocused_border: Color,
    pub unfocused_header: Color,
    pub focused_border: Color,
    pub focused_header: Color,
}

impl Default for Colors {
    fn default() -> Self {
        Colors {
            unfocused_border: 0xFF0000,
            unfocused_header: 0x00FF00,
            focused_border: 0x0000FF,
            focused_header: 0x00FFFF,
        }
    }
}

/// Engine configuration. All fields have compile-time defaults so the
/// manager is fully usable without a config file on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub header_size: u32,
    pub border_size: u32,
    pub max_workspaces: usize,
    pub colors: Colors,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            header_size: 20,
            border_size: 1,
            max_workspaces: 9,
            colors: Colors::default(),
        }
    }
}

/// Mirrors `Config` but with every field optional, so a partial file only
/// overrides what it names and everything else falls back to
/// [`Config::default`].
#[derive(Debug, Deserialize, Default)]
struct RawConfig {
    header_size: Option<u32>,
    border_size: Option<u32>,
    max_workspaces: Option<usize>,
    unfocused_border_color: Option<u32>,
    unfocused_header_color: Option<u32>,
    focused_border_color: Option<u32>,
    focused_header_color: Option<u32>,
}

impl Config {
    /// Loads configuration from `path`. A non-existent path yields the
    /// defaults; a path that exists but fails to read or parse is a fatal
    /// startup error.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let contents = std::fs::read_to_string(path)?;
        let raw: RawConfig = toml::from_str(&contents)?;
        let defaults = Config::default();
        Ok(Config {
            header_size: raw.header_size.unwrap_or(defaults.header_size),
            border_size: raw.border_size.unwrap_or(defaults.border_size),
            max_workspaces: raw.max_workspaces.unwrap_or(defaults.max_workspaces),
            colors: Colors {
                unfocused_border: raw
                    .unfocused_border_color
                    .unwrap_or(defaults.colors.unfocused_border),
                unfocused_header: raw
                    .unfocused_header_color
                    .unwrap_or(defaults.colors.unfocused_header),
                focused_border: raw
                    .focused_border_color
                    .unwrap_or(defaults.colors.focused_border),
                focused_header: raw
                    .focused_header_color
                    .unwrap_or(defaults.colors.focused_header),
            },
        })
    }
}
