// Platform-specific code module

pub mod gpu;
pub mod media;
pub mod os_release;
pub mod process;
pub mod resources;

// Re-exports para imports limpios
pub use gpu::GpuAdapter;
pub use media::MediaAdapter;
pub use os_release::OsReleaseAdapter;
pub use process::{CommandRunner, SystemRunner};
pub use resources::ResourceAdapter;
