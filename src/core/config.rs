use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::core::chatbox::budget::MAX_MESSAGE_LENGTH;
use crate::error::VrcError;

/// Length caps applied to the media title and artist before composing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaCapPolicy {
    /// Title 25 chars, artist 15 chars
    #[default]
    Compact,
    /// Title 50 chars, artist unbounded
    Wide,
    Uncapped,
}

impl MediaCapPolicy {
    pub const NAMES: [&'static str; 3] = ["compact", "wide", "uncapped"];

    pub fn title_cap(self) -> Option<usize> {
        match self {
            MediaCapPolicy::Compact => Some(25),
            MediaCapPolicy::Wide => Some(50),
            MediaCapPolicy::Uncapped => None,
        }
    }

    pub fn artist_cap(self) -> Option<usize> {
        match self {
            MediaCapPolicy::Compact => Some(15),
            MediaCapPolicy::Wide | MediaCapPolicy::Uncapped => None,
        }
    }
}

impl FromStr for MediaCapPolicy {
    type Err = VrcError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(MediaCapPolicy::Compact),
            "wide" => Ok(MediaCapPolicy::Wide),
            "uncapped" => Ok(MediaCapPolicy::Uncapped),
            other => Err(VrcError::config(format!("unknown media cap policy: {}", other))),
        }
    }
}

impl fmt::Display for MediaCapPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MediaCapPolicy::Compact => "compact",
            MediaCapPolicy::Wide => "wide",
            MediaCapPolicy::Uncapped => "uncapped",
        };
        f.write_str(name)
    }
}

/// Which VRAM figure the GPU line shows next to the total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GpuMemoryReport {
    /// total - free
    #[default]
    Used,
    Free,
}

impl GpuMemoryReport {
    pub const NAMES: [&'static str; 2] = ["used", "free"];
}

impl FromStr for GpuMemoryReport {
    type Err = VrcError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "used" => Ok(GpuMemoryReport::Used),
            "free" => Ok(GpuMemoryReport::Free),
            other => Err(VrcError::config(format!("unknown GPU memory report: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Destination host of the OSC datagrams
    pub host: String,
    pub port: u16,
    /// OSC address pattern of the chatbox input
    pub osc_address: String,
    /// Sleep between ticks, after delivery
    pub interval_ms: u64,
    /// Character ceiling of the published message
    pub max_length: usize,
    pub media_caps: MediaCapPolicy,
    pub gpu_memory: GpuMemoryReport,
    /// Prepend the distribution line
    pub show_os: bool,
    /// Deadline for each external tool invocation
    pub tool_timeout_ms: u64,
    pub os_release_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 9000,
            osc_address: "/chatbox/input".to_string(),
            interval_ms: 1500,
            max_length: MAX_MESSAGE_LENGTH,
            media_caps: MediaCapPolicy::default(),
            gpu_memory: GpuMemoryReport::default(),
            show_os: true,
            tool_timeout_ms: 2000,
            os_release_path: PathBuf::from("/etc/os-release"),
        }
    }
}

impl Config {
    /// Load from the default location, falling back to defaults when absent
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let data = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        if data.trim().is_empty() {
            return Ok(Config::default());
        }

        serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().with_context(|| "Could not determine config directory")?;

        Ok(config_dir.join("vrcstat").join("config.json"))
    }

    pub fn validate(&self) -> crate::error::Result<()> {
        if self.port == 0 {
            return Err(VrcError::config("port must not be zero"));
        }
        if self.max_length == 0 {
            return Err(VrcError::config("max_length must be at least 1"));
        }
        if self.tool_timeout_ms == 0 {
            return Err(VrcError::config("tool_timeout_ms must be at least 1"));
        }
        if !self.osc_address.starts_with('/') {
            return Err(VrcError::config(format!(
                "OSC address must start with '/': {:?}",
                self.osc_address
            )));
        }
        if self.host.trim().is_empty() {
            return Err(VrcError::config("host must not be empty"));
        }
        Ok(())
    }

    /// `host:port` of the chatbox listener
    pub fn destination(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn tool_timeout(&self) -> Duration {
        Duration::from_millis(self.tool_timeout_ms)
    }
}
