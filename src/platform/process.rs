//! Bounded execution of external command-line tools.
//!
//! GPU and sensor queries shell out to vendor tools. A hung tool must not stall
//! the publish loop, so every invocation runs against a deadline and a child
//! that overruns it is killed and reported as unavailable.

use std::io::Read;
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{Result, VrcError};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Captured result of a finished tool invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub success: bool,
    pub stdout: String,
}

impl ToolOutput {
    pub fn ok<S: Into<String>>(stdout: S) -> Self {
        Self {
            success: true,
            stdout: stdout.into(),
        }
    }

    pub fn failed() -> Self {
        Self {
            success: false,
            stdout: String::new(),
        }
    }
}

/// Runs external programs on behalf of the provider adapters.
pub trait CommandRunner {
    /// Run `program` with `args` and capture its standard output.
    ///
    /// Returns `ToolUnavailable` when the program is not on `PATH` or cannot be
    /// spawned, and `ToolTimeout` when it does not finish in time.
    fn run(&self, program: &str, args: &[&str]) -> Result<ToolOutput>;

    /// Check if `program` can be found without running it
    fn is_installed(&self, program: &str) -> bool;
}

/// `CommandRunner` backed by real child processes.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    timeout: Duration,
}

impl SystemRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn timed_out(&self, program: &str) -> VrcError {
        VrcError::tool_timeout(format!(
            "{} did not finish within {}ms",
            program,
            self.timeout.as_millis()
        ))
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<ToolOutput> {
        let path = which::which(program)
            .map_err(|e| VrcError::tool_unavailable(format!("{}: {}", program, e)))?;

        let mut child = Command::new(path)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                VrcError::tool_unavailable(format!("failed to spawn {}: {}", program, e))
            })?;

        // Drain stdout on a separate thread so a chatty child can't block on a full pipe
        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| VrcError::other(format!("stdout of {} was not captured", program)))?;
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = stdout.read_to_end(&mut buf);
            let _ = tx.send(buf);
        });

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            match child.try_wait()? {
                Some(status) => break status,
                None if Instant::now() >= deadline => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(self.timed_out(program));
                }
                None => thread::sleep(POLL_INTERVAL),
            }
        };

        // Background descendants can keep the pipe open after the child exits
        let remaining = deadline.saturating_duration_since(Instant::now());
        let bytes = match rx.recv_timeout(remaining) {
            Ok(bytes) => bytes,
            Err(RecvTimeoutError::Timeout) => return Err(self.timed_out(program)),
            Err(RecvTimeoutError::Disconnected) => {
                return Err(VrcError::other(format!(
                    "stdout reader for {} panicked",
                    program
                )))
            }
        };

        Ok(ToolOutput {
            success: status.success(),
            stdout: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }

    fn is_installed(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}
