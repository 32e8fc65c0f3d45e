use std::io;
use thiserror::Error;

/// Custom error type for vrcstat
#[derive(Error, Debug)]
pub enum VrcError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Tool not available: {0}")]
    ToolUnavailable(String),

    #[error("Tool timed out: {0}")]
    ToolTimeout(String),

    #[error("GPU not available: {0}")]
    GpuNotAvailable(String),

    #[error("Metric collection failed: {0}")]
    MetricCollection(String),

    #[error("Media bus error: {0}")]
    MediaBus(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for vrcstat
pub type Result<T> = std::result::Result<T, VrcError>;

impl VrcError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        VrcError::Config(msg.into())
    }

    pub fn tool_unavailable<S: Into<String>>(msg: S) -> Self {
        VrcError::ToolUnavailable(msg.into())
    }

    pub fn tool_timeout<S: Into<String>>(msg: S) -> Self {
        VrcError::ToolTimeout(msg.into())
    }

    pub fn gpu_not_available<S: Into<String>>(msg: S) -> Self {
        VrcError::GpuNotAvailable(msg.into())
    }

    pub fn metric_collection<S: Into<String>>(msg: S) -> Self {
        VrcError::MetricCollection(msg.into())
    }

    pub fn media_bus<S: Into<String>>(msg: S) -> Self {
        VrcError::MediaBus(msg.into())
    }

    pub fn transport<S: Into<String>>(msg: S) -> Self {
        VrcError::Transport(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        VrcError::Other(msg.into())
    }

    /// Whether this error means the data source simply isn't there,
    /// as opposed to a local failure worth surfacing.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            VrcError::ToolUnavailable(_)
                | VrcError::ToolTimeout(_)
                | VrcError::GpuNotAvailable(_)
                | VrcError::MediaBus(_)
        )
    }
}
