use crate::core::chatbox::sample::{round1, GpuReading, GpuStatus, GpuVendor};
use crate::core::config::GpuMemoryReport;
use crate::error::{Result, VrcError};
use crate::platform::process::CommandRunner;

use super::GpuProvider;

pub const NVIDIA_SMI: &str = "nvidia-smi";

const QUERY_ARGS: [&str; 2] = [
    "--query-gpu=utilization.gpu,memory.free,memory.total",
    "--format=csv,noheader,nounits",
];

const MIB_PER_GIB: f64 = 1024.0;

/// NVIDIA GPU provider using `nvidia-smi` CSV queries
#[derive(Debug, Default)]
pub struct NvidiaGpuProvider;

impl GpuProvider for NvidiaGpuProvider {
    fn vendor(&self) -> GpuVendor {
        GpuVendor::Nvidia
    }

    fn tool(&self) -> &'static str {
        NVIDIA_SMI
    }

    fn collect(&self, runner: &dyn CommandRunner, report: GpuMemoryReport) -> Result<GpuStatus> {
        let output = runner.run(NVIDIA_SMI, &QUERY_ARGS)?;
        if !output.success {
            return Err(VrcError::gpu_not_available("nvidia-smi exited with an error"));
        }

        let status = match parse_query_output(&output.stdout) {
            Ok(reading) => GpuStatus::Stats { reading, report },
            Err(NvidiaParseError::FieldCount(n)) => {
                log::warn!("nvidia-smi returned {} fields, expected 3", n);
                GpuStatus::StatsMalformed
            }
            Err(NvidiaParseError::Vram(raw)) => {
                log::warn!("nvidia-smi returned unusable VRAM values: {:?}", raw);
                GpuStatus::VramMalformed
            }
        };
        Ok(status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NvidiaParseError {
    /// Number of comma-separated fields found instead of 3
    FieldCount(usize),
    /// Free/total VRAM unparsable, or zero after rounding
    Vram(String),
}

/// Parse `<util>, <free MiB>, <total MiB>` from the first output line.
pub fn parse_query_output(stdout: &str) -> std::result::Result<GpuReading, NvidiaParseError> {
    let line = stdout.trim().lines().next().unwrap_or("");
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();

    if fields.len() != 3 {
        return Err(NvidiaParseError::FieldCount(fields.len()));
    }

    let vram = |raw: &str| -> std::result::Result<f64, NvidiaParseError> {
        raw.parse::<u64>()
            .map(|mib| round1(mib as f64 / MIB_PER_GIB))
            .map_err(|_| NvidiaParseError::Vram(line.to_string()))
    };

    let free = vram(fields[1])?;
    let total = vram(fields[2])?;

    // A zero here means the tool printed garbage, not that the card has no memory
    if free == 0.0 || total == 0.0 {
        return Err(NvidiaParseError::Vram(line.to_string()));
    }

    Ok(GpuReading {
        utilization_percent: fields[0].to_string(),
        vram_free_gb: free,
        vram_total_gb: total,
    })
}
