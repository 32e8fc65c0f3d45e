//! Chatbox status publishing.
//!
//! A tick samples every provider into a [`Sample`], composes the multi-line
//! status text, cuts it to the character budget and hands it to the OSC
//! transport.

pub mod budget;
pub mod composer;
pub mod publisher;
pub mod sample;
pub mod transport;

pub use budget::{enforce, MAX_MESSAGE_LENGTH};
pub use composer::compose;
pub use publisher::{HostSampler, Publisher, RunSummary, Sampler, TickReport};
pub use sample::{
    GpuReading, GpuStatus, GpuVendor, MediaDescriptor, MediaStatus, OsIdentity, ResourceReading,
    ResourceStatus, Sample,
};
pub use transport::{chatbox_message, ChatboxTransport, OscTransport};

/// Compose a sample and enforce the character budget on the result
pub fn render_message(sample: &Sample, max_length: usize) -> String {
    enforce(&compose(sample), max_length)
}
