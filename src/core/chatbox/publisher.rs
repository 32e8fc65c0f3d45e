//! The long-running sample → compose → enforce → send cycle.

use std::thread;
use std::time::Duration;

use chrono::Local;

use crate::core::config::Config;
use crate::platform::gpu::GpuAdapter;
use crate::platform::media::{DBusSessions, MediaAdapter, MediaSessions};
use crate::platform::os_release::OsReleaseAdapter;
use crate::platform::process::{CommandRunner, SystemRunner};
use crate::platform::resources::ResourceAdapter;

use super::render_message;
use super::sample::Sample;
use super::transport::ChatboxTransport;

/// Produces one snapshot per tick. Implementations must not fail.
pub trait Sampler {
    fn sample(&mut self) -> Sample;
}

/// Samples the real host through the provider adapters
pub struct HostSampler<R: CommandRunner, S: MediaSessions> {
    os: Option<OsReleaseAdapter>,
    media: MediaAdapter<S>,
    resources: ResourceAdapter,
    gpu: GpuAdapter<R>,
}

impl HostSampler<SystemRunner, DBusSessions> {
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config
                .show_os
                .then(|| OsReleaseAdapter::new(&config.os_release_path)),
            MediaAdapter::session_bus(config.media_caps),
            ResourceAdapter::new(),
            GpuAdapter::new(SystemRunner::new(config.tool_timeout()), config.gpu_memory),
        )
    }
}

impl<R: CommandRunner, S: MediaSessions> HostSampler<R, S> {
    pub fn new(
        os: Option<OsReleaseAdapter>,
        media: MediaAdapter<S>,
        resources: ResourceAdapter,
        gpu: GpuAdapter<R>,
    ) -> Self {
        Self {
            os,
            media,
            resources,
            gpu,
        }
    }
}

impl<R: CommandRunner, S: MediaSessions> Sampler for HostSampler<R, S> {
    fn sample(&mut self) -> Sample {
        let os = self.os.as_ref().map(OsReleaseAdapter::sample);
        let clock = Local::now().time();
        let media = self.media.sample();
        let resources = self.resources.sample();
        let gpu = self.gpu.sample();

        Sample {
            os,
            clock,
            media,
            resources,
            gpu,
        }
    }
}

/// Outcome of a single tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    pub message: String,
    pub delivered: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub failed_sends: u64,
}

pub struct Publisher<S: Sampler, T: ChatboxTransport> {
    sampler: S,
    transport: T,
    max_length: usize,
    interval: Duration,
}

impl<S: Sampler, T: ChatboxTransport> Publisher<S, T> {
    pub fn new(sampler: S, transport: T, max_length: usize, interval: Duration) -> Self {
        Self {
            sampler,
            transport,
            max_length,
            interval,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sample, compose, enforce the budget and attempt delivery once.
    ///
    /// A failed send is logged and reported, never propagated.
    pub fn tick(&mut self) -> TickReport {
        let sample = self.sampler.sample();
        let message = render_message(&sample, self.max_length);

        log::info!("Sending message: \n{}", message);

        let delivered = match self.transport.send(&message) {
            Ok(()) => true,
            Err(e) => {
                log::error!("Error sending OSC message: {}", e);
                false
            }
        };

        TickReport { message, delivered }
    }

    /// Tick forever, or `limit` times when given, sleeping the interval after each delivery.
    pub fn run(&mut self, limit: Option<u64>) -> RunSummary {
        let mut summary = RunSummary::default();

        while limit.map_or(true, |n| summary.ticks < n) {
            let report = self.tick();
            summary.ticks += 1;
            if !report.delivered {
                summary.failed_sends += 1;
            }

            if limit.map_or(true, |n| summary.ticks < n) {
                thread::sleep(self.interval);
            }
        }

        summary
    }
}
