use std::time::{Duration, Instant};

use chrono::NaiveTime;
use vrcstat::core::chatbox::{
    compose, enforce, render_message, ChatboxTransport, GpuReading, GpuStatus,
    MediaDescriptor, MediaStatus, OsIdentity, Publisher, ResourceReading, ResourceStatus, Sample,
    Sampler, MAX_MESSAGE_LENGTH,
};
use vrcstat::core::config::GpuMemoryReport;
use vrcstat::{Result, VrcError};

fn reference_sample() -> Sample {
    Sample {
        os: None,
        clock: NaiveTime::from_hms_opt(14, 5, 9).unwrap(),
        media: MediaStatus::NothingPlaying,
        resources: ResourceStatus::Reading(ResourceReading {
            cpu_percent: 55.0,
            cpu_ghz: Some(4.2),
            ram_used_gb: 8.0,
            ram_total_gb: Some(16.0),
        }),
        gpu: GpuStatus::Stats {
            reading: GpuReading {
                utilization_percent: "10".to_string(),
                vram_free_gb: 1.0,
                vram_total_gb: 4.0,
            },
            report: GpuMemoryReport::Free,
        },
    }
}

struct FixedSampler(Sample);

impl Sampler for FixedSampler {
    fn sample(&mut self) -> Sample {
        self.0.clone()
    }
}

#[derive(Default)]
struct RecordingTransport {
    sent: Vec<(String, bool, bool)>,
    fail_on_attempt: Option<usize>,
    attempts: usize,
}

impl ChatboxTransport for RecordingTransport {
    fn send(&mut self, text: &str) -> Result<()> {
        self.attempts += 1;
        if self.fail_on_attempt == Some(self.attempts) {
            return Err(VrcError::transport("Network is unreachable (os error 101)"));
        }
        // Flags are fixed by the OSC message builder
        self.sent.push((text.to_string(), true, false));
        Ok(())
    }
}

#[test]
fn test_end_to_end_reference_message() {
    let mut publisher = Publisher::new(
        FixedSampler(reference_sample()),
        RecordingTransport::default(),
        MAX_MESSAGE_LENGTH,
        Duration::ZERO,
    );
    let report = publisher.tick();

    let expected =
        "⏰ 14:05:09\n🎵 No media playing\n💻 55% @ 4.20GHz\n💾 8.0GB / 16.0GB\n🎮 10% | 1.0GB / 4.0GB";
    assert_eq!(report.message, expected);
    assert!(report.message.chars().count() <= MAX_MESSAGE_LENGTH);
    assert!(report.delivered);
    assert_eq!(
        publisher.transport().sent,
        vec![(expected.to_string(), true, false)]
    );
}

#[test]
fn test_long_media_is_cut_to_budget() {
    let mut sample = reference_sample();
    sample.os = Some(OsIdentity::Distro {
        name: "openSUSE Tumbleweed".to_string(),
        version: "20241017".to_string(),
    });
    sample.media = MediaStatus::Playing(MediaDescriptor {
        title: "T".repeat(90),
        artist: "A".repeat(40),
    });

    let composed = compose(&sample);
    assert!(composed.chars().count() > MAX_MESSAGE_LENGTH);

    let message = render_message(&sample, MAX_MESSAGE_LENGTH);
    assert_eq!(message.chars().count(), MAX_MESSAGE_LENGTH);
    assert!(composed.starts_with(&message));
    assert_eq!(enforce(&message, MAX_MESSAGE_LENGTH), message);
}

#[test]
fn test_transport_failure_does_not_stop_next_tick() {
    let transport = RecordingTransport {
        fail_on_attempt: Some(2),
        ..Default::default()
    };
    let mut publisher = Publisher::new(
        FixedSampler(reference_sample()),
        transport,
        MAX_MESSAGE_LENGTH,
        Duration::from_millis(20),
    );

    let started = Instant::now();
    let summary = publisher.run(Some(3));

    assert_eq!(summary.ticks, 3);
    assert_eq!(summary.failed_sends, 1);
    assert_eq!(publisher.transport().attempts, 3);
    assert_eq!(publisher.transport().sent.len(), 2);
    // Two sleeps between three ticks, none after the last
    assert!(started.elapsed() >= Duration::from_millis(40));
}

#[test]
fn test_sentinels_compose_within_budget() {
    let sample = Sample {
        os: Some(OsIdentity::Unknown),
        clock: NaiveTime::from_hms_opt(23, 59, 59).unwrap(),
        media: MediaStatus::NoPlayer,
        resources: ResourceStatus::Error,
        gpu: GpuStatus::Unavailable,
    };

    let message = render_message(&sample, MAX_MESSAGE_LENGTH);
    assert_eq!(
        message,
        "🐧 Unknown Linux Distro\n⏰ 23:59:59\n🎵 No media player detected\n💻 Error% @ ErrorGHz\n💾 ErrorGB / ErrorGB\n🎮 No GPU or error retrieving GPU stats"
    );
    assert!(message.chars().count() <= MAX_MESSAGE_LENGTH);
}
