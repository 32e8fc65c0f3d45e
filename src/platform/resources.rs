//! CPU and memory sampling via sysinfo.

use std::time::Duration;

use sysinfo::{CpuRefreshKind, MemoryRefreshKind, RefreshKind, System};

use crate::core::chatbox::sample::{round1, round2, ResourceReading, ResourceStatus};
use crate::error::{Result, VrcError};

/// Blocking window the CPU utilization is measured over
pub const CPU_SAMPLE_WINDOW: Duration = Duration::from_secs(1);

const BYTES_PER_GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Holds one sysinfo::System across ticks so refreshes stay cheap
pub struct ResourceAdapter {
    system: System,
    window: Duration,
}

impl ResourceAdapter {
    pub fn new() -> Self {
        Self::with_window(CPU_SAMPLE_WINDOW)
    }

    pub fn with_window(window: Duration) -> Self {
        let refresh_kind = RefreshKind::nothing()
            .with_cpu(CpuRefreshKind::everything())
            .with_memory(MemoryRefreshKind::everything());

        Self {
            system: System::new_with_specifics(refresh_kind),
            window: window.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL),
        }
    }

    /// Blocks for the sampling window, then reports utilization and memory.
    pub fn sample(&mut self) -> ResourceStatus {
        match self.collect() {
            Ok(reading) => ResourceStatus::Reading(reading),
            Err(e) => {
                log::warn!("Error getting system usage: {}", e);
                ResourceStatus::Error
            }
        }
    }

    fn collect(&mut self) -> Result<ResourceReading> {
        // Usage is the delta between two refreshes, so bracket the window
        self.system.refresh_cpu_all();
        std::thread::sleep(self.window);
        self.system.refresh_cpu_all();
        self.system.refresh_memory();

        let cpus = self.system.cpus();
        if cpus.is_empty() {
            return Err(VrcError::metric_collection("no CPUs reported"));
        }

        let cpu_percent = f64::from(self.system.global_cpu_usage());
        if !cpu_percent.is_finite() {
            return Err(VrcError::metric_collection("CPU usage is not a number"));
        }

        let total_memory = self.system.total_memory();
        if total_memory == 0 {
            return Err(VrcError::metric_collection("total memory reported as zero"));
        }

        Ok(ResourceReading {
            cpu_percent: round1(cpu_percent),
            cpu_ghz: Some(round2(cpus[0].frequency() as f64 / 1000.0)),
            ram_used_gb: round1(self.system.used_memory() as f64 / BYTES_PER_GIB),
            ram_total_gb: Some(round1(total_memory as f64 / BYTES_PER_GIB)),
        })
    }
}

impl Default for ResourceAdapter {
    fn default() -> Self {
        Self::new()
    }
}
