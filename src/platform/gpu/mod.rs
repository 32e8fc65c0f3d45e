//! GPU-specific platform code.
//!
//! Provides the GPU line for different vendors.
//! Supports NVIDIA (via nvidia-smi) and AMD (via lm-sensors).

mod amd;
mod nvidia;

pub use amd::{find_gpu_line, AmdGpuProvider, SENSORS};
pub use nvidia::{parse_query_output, NvidiaGpuProvider, NvidiaParseError, NVIDIA_SMI};

use crate::core::chatbox::sample::{GpuStatus, GpuVendor};
use crate::core::config::GpuMemoryReport;
use crate::error::Result;
use crate::platform::process::CommandRunner;

/// Trait for GPU query strategies
///
/// `collect` returns an unavailable error when the vendor's tool is missing or
/// failed, which makes the adapter move on to the next vendor. Any `Ok` value,
/// including a malformed-data sentinel, counts as a successful detection.
pub trait GpuProvider {
    fn vendor(&self) -> GpuVendor;

    /// Executable the provider shells out to
    fn tool(&self) -> &'static str;

    fn collect(&self, runner: &dyn CommandRunner, report: GpuMemoryReport) -> Result<GpuStatus>;
}

/// GPU adapter with vendor memoization
///
/// Tries each supported vendor in order of preference:
/// 1. NVIDIA (via nvidia-smi)
/// 2. AMD (via sensors)
///
/// A vendor is remembered once it answers and no preferred vendor's tool is
/// installed; later ticks then only query it. A preferred tool that is
/// installed but failed is retried on the next tick.
pub struct GpuAdapter<R: CommandRunner> {
    runner: R,
    providers: Vec<Box<dyn GpuProvider>>,
    vendor: Option<GpuVendor>,
    report: GpuMemoryReport,
}

impl<R: CommandRunner> GpuAdapter<R> {
    pub fn new(runner: R, report: GpuMemoryReport) -> Self {
        Self::with_providers(
            runner,
            report,
            vec![Box::new(NvidiaGpuProvider), Box::new(AmdGpuProvider)],
        )
    }

    pub fn with_providers(
        runner: R,
        report: GpuMemoryReport,
        providers: Vec<Box<dyn GpuProvider>>,
    ) -> Self {
        Self {
            runner,
            providers,
            vendor: None,
            report,
        }
    }

    /// Vendor detected so far, if any
    pub fn vendor(&self) -> Option<GpuVendor> {
        self.vendor
    }

    pub fn sample(&mut self) -> GpuStatus {
        if self.vendor == Some(GpuVendor::None) {
            return GpuStatus::Unavailable;
        }

        if self.vendor.is_none()
            && self
                .providers
                .iter()
                .all(|p| !self.runner.is_installed(p.tool()))
        {
            log::info!("No GPU query tool installed, GPU stats disabled");
            self.vendor = Some(GpuVendor::None);
            return GpuStatus::Unavailable;
        }

        for (index, provider) in self.providers.iter().enumerate() {
            if let Some(vendor) = self.vendor {
                if vendor != provider.vendor() {
                    continue;
                }
            }

            match provider.collect(&self.runner, self.report) {
                Ok(status) => {
                    let preferred_missing = self.providers[..index]
                        .iter()
                        .all(|p| !self.runner.is_installed(p.tool()));
                    if self.vendor.is_none() && preferred_missing {
                        log::info!(
                            "Detected {:?} GPU via {}",
                            provider.vendor(),
                            provider.tool()
                        );
                        self.vendor = Some(provider.vendor());
                    }
                    return status;
                }
                Err(e) if e.is_unavailable() => {
                    log::debug!("{} query failed: {}", provider.tool(), e)
                }
                Err(e) => log::warn!("{} query failed: {}", provider.tool(), e),
            }
        }

        GpuStatus::Unavailable
    }
}
