//! Per-tick telemetry snapshot and the values each provider adapter reports.
//!
//! Every provider value renders itself as one chatbox line (emoji prefix
//! included), so an unavailable provider still occupies its slot in the
//! message with a sentinel string.

use std::fmt;

use chrono::NaiveTime;

use crate::core::config::GpuMemoryReport;

/// Round to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Immutable snapshot gathered for a single publish tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub os: Option<OsIdentity>,
    pub clock: NaiveTime,
    pub media: MediaStatus,
    pub resources: ResourceStatus,
    pub gpu: GpuStatus,
}

/// Currently playing track, already capped to the configured lengths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaDescriptor {
    pub title: String,
    pub artist: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaStatus {
    Playing(MediaDescriptor),
    /// Bus reachable, but no session reported a usable title and artist
    NothingPlaying,
    /// Session bus could not be reached at all
    NoPlayer,
}

impl fmt::Display for MediaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaStatus::Playing(media) => write!(f, "🎵 {} - {}", media.title, media.artist),
            MediaStatus::NothingPlaying => f.write_str("🎵 No media playing"),
            MediaStatus::NoPlayer => f.write_str("🎵 No media player detected"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceReading {
    pub cpu_percent: f64,
    pub cpu_ghz: Option<f64>,
    pub ram_used_gb: f64,
    pub ram_total_gb: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResourceStatus {
    Reading(ResourceReading),
    /// Collapses all four fields when any of them could not be read
    Error,
}

impl ResourceStatus {
    pub fn cpu_line(&self) -> String {
        match self {
            ResourceStatus::Reading(r) => {
                // 55.0 prints as "55", 73.2 stays "73.2"
                let percent = round1(r.cpu_percent);
                match r.cpu_ghz {
                    Some(ghz) => format!("💻 {}% @ {:.2}GHz", percent, ghz),
                    None => format!("💻 {}%", percent),
                }
            }
            ResourceStatus::Error => "💻 Error% @ ErrorGHz".to_string(),
        }
    }

    pub fn ram_line(&self) -> String {
        match self {
            ResourceStatus::Reading(r) => match r.ram_total_gb {
                Some(total) => format!("💾 {:.1}GB / {:.1}GB", r.ram_used_gb, total),
                None => format!("💾 {:.1}GB", r.ram_used_gb),
            },
            ResourceStatus::Error => "💾 ErrorGB / ErrorGB".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpuVendor {
    Nvidia,
    Amd,
    /// Neither vendor tool is installed on this host
    None,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GpuReading {
    /// Utilization exactly as the tool printed it
    pub utilization_percent: String,
    pub vram_free_gb: f64,
    pub vram_total_gb: f64,
}

impl GpuReading {
    pub fn vram_used_gb(&self) -> f64 {
        round1(self.vram_total_gb - self.vram_free_gb)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GpuStatus {
    Stats {
        reading: GpuReading,
        report: GpuMemoryReport,
    },
    /// Raw sensor line passed through from the AMD fallback
    SensorInfo(String),
    /// Tool answered, but not with the expected three fields
    StatsMalformed,
    /// VRAM fields unparsable or zero
    VramMalformed,
    Unavailable,
}

impl fmt::Display for GpuStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuStatus::Stats { reading, report } => {
                let shown = match report {
                    GpuMemoryReport::Used => reading.vram_used_gb(),
                    GpuMemoryReport::Free => reading.vram_free_gb,
                };
                write!(
                    f,
                    "🎮 {}% | {:.1}GB / {:.1}GB",
                    reading.utilization_percent, shown, reading.vram_total_gb
                )
            }
            GpuStatus::SensorInfo(line) => write!(f, "🎮 AMD GPU Info: {}", line),
            GpuStatus::StatsMalformed => f.write_str("🎮 Error retrieving GPU stats"),
            GpuStatus::VramMalformed => f.write_str("🎮 Error retrieving GPU VRAM values"),
            GpuStatus::Unavailable => f.write_str("🎮 No GPU or error retrieving GPU stats"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OsIdentity {
    Distro { name: String, version: String },
    Unknown,
}

impl fmt::Display for OsIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OsIdentity::Distro { name, version } => write!(f, "🐧 {} {}", name, version),
            OsIdentity::Unknown => f.write_str("🐧 Unknown Linux Distro"),
        }
    }
}
