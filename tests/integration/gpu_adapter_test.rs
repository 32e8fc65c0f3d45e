use vrcstat::core::chatbox::{GpuStatus, GpuVendor};
use vrcstat::core::config::GpuMemoryReport;
use vrcstat::platform::gpu::{NVIDIA_SMI, SENSORS};
use vrcstat::platform::process::{CommandRunner, ToolOutput};
use vrcstat::platform::GpuAdapter;
use vrcstat::{Result, VrcError};

/// Answers nvidia-smi with a fixed CSV line and reports sensors as missing
struct NvidiaOnly(&'static str);

impl CommandRunner for NvidiaOnly {
    fn run(&self, program: &str, _args: &[&str]) -> Result<ToolOutput> {
        if program == NVIDIA_SMI {
            Ok(ToolOutput::ok(self.0))
        } else {
            Err(VrcError::tool_unavailable(program))
        }
    }

    fn is_installed(&self, program: &str) -> bool {
        program == NVIDIA_SMI
    }
}

struct SensorsOnly(&'static str);

impl CommandRunner for SensorsOnly {
    fn run(&self, program: &str, _args: &[&str]) -> Result<ToolOutput> {
        if program == SENSORS {
            Ok(ToolOutput::ok(self.0))
        } else {
            Err(VrcError::tool_unavailable(program))
        }
    }

    fn is_installed(&self, program: &str) -> bool {
        program == SENSORS
    }
}

#[test]
fn test_reference_csv_reports_free_memory() {
    let mut adapter = GpuAdapter::new(NvidiaOnly("42, 2048, 8192\n"), GpuMemoryReport::Free);
    assert_eq!(adapter.sample().to_string(), "🎮 42% | 2.0GB / 8.0GB");
}

#[test]
fn test_reference_csv_reports_used_memory() {
    let mut adapter = GpuAdapter::new(NvidiaOnly("42, 2048, 8192\n"), GpuMemoryReport::Used);
    assert_eq!(adapter.sample().to_string(), "🎮 42% | 6.0GB / 8.0GB");
}

#[test]
fn test_zero_vram_is_not_reported_as_zero() {
    let mut adapter = GpuAdapter::new(NvidiaOnly("0, 0, 0\n"), GpuMemoryReport::Used);
    let line = adapter.sample().to_string();
    assert_eq!(line, "🎮 Error retrieving GPU VRAM values");
    assert!(!line.contains("0.0GB"));
}

#[test]
fn test_garbage_vram_is_reported_as_vram_error() {
    let mut adapter = GpuAdapter::new(NvidiaOnly("7, lots, 8192\n"), GpuMemoryReport::Used);
    assert_eq!(adapter.sample(), GpuStatus::VramMalformed);
}

#[test]
fn test_unexpected_field_count() {
    let mut adapter = GpuAdapter::new(NvidiaOnly("42, 2048\n"), GpuMemoryReport::Used);
    assert_eq!(adapter.sample().to_string(), "🎮 Error retrieving GPU stats");
    // Still counts as an NVIDIA host
    assert_eq!(adapter.vendor(), Some(GpuVendor::Nvidia));
}

#[test]
fn test_amd_passthrough() {
    let mut adapter = GpuAdapter::new(
        SensorsOnly("amdgpu-pci-0c00\nAdapter: PCI adapter\nedge: +52.0°C\n"),
        GpuMemoryReport::Used,
    );
    assert_eq!(adapter.sample().to_string(), "🎮 AMD GPU Info: amdgpu-pci-0c00");
    assert_eq!(adapter.vendor(), Some(GpuVendor::Amd));
}

#[test]
fn test_amd_without_gpu_line() {
    let mut adapter = GpuAdapter::new(SensorsOnly("coretemp-isa-0000\n"), GpuMemoryReport::Used);
    assert_eq!(
        adapter.sample().to_string(),
        "🎮 No GPU or error retrieving GPU stats"
    );
    assert_eq!(adapter.vendor(), None);
}
