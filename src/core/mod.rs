// Core business logic module

pub mod chatbox;
pub mod config;

// Re-export commonly used items
pub use chatbox::{Publisher, Sample};
pub use config::Config;
