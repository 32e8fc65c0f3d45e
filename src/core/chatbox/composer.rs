use super::sample::Sample;

/// Join a sample into the multi-line chatbox template.
///
/// Order: OS identity (when sampled), clock, media, CPU, RAM, GPU.
pub fn compose(sample: &Sample) -> String {
    let mut lines = Vec::with_capacity(6);

    if let Some(os) = &sample.os {
        lines.push(os.to_string());
    }
    lines.push(format!("⏰ {}", sample.clock.format("%H:%M:%S")));
    lines.push(sample.media.to_string());
    lines.push(sample.resources.cpu_line());
    lines.push(sample.resources.ram_line());
    lines.push(sample.gpu.to_string());

    lines.join("\n")
}
