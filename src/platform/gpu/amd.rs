use crate::core::chatbox::sample::{GpuStatus, GpuVendor};
use crate::core::config::GpuMemoryReport;
use crate::error::{Result, VrcError};
use crate::platform::process::CommandRunner;

use super::GpuProvider;

pub const SENSORS: &str = "sensors";

/// AMD GPU provider using lm-sensors output
///
/// amdgpu exposes no utilization or VRAM figures through `sensors`, so the
/// first GPU-looking line is passed through verbatim.
#[derive(Debug, Default)]
pub struct AmdGpuProvider;

impl GpuProvider for AmdGpuProvider {
    fn vendor(&self) -> GpuVendor {
        GpuVendor::Amd
    }

    fn tool(&self) -> &'static str {
        SENSORS
    }

    fn collect(&self, runner: &dyn CommandRunner, _report: GpuMemoryReport) -> Result<GpuStatus> {
        let output = runner.run(SENSORS, &[])?;
        if !output.success {
            return Err(VrcError::gpu_not_available("sensors exited with an error"));
        }

        find_gpu_line(&output.stdout)
            .map(GpuStatus::SensorInfo)
            .ok_or_else(|| VrcError::gpu_not_available("no GPU sensor in sensors output"))
    }
}

/// First line mentioning an edge temperature or a GPU, trimmed
pub fn find_gpu_line(stdout: &str) -> Option<String> {
    stdout
        .lines()
        .find(|line| line.contains("edge") || line.contains("gpu"))
        .map(|line| line.trim().to_string())
}
