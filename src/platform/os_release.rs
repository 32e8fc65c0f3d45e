use std::fs;
use std::path::PathBuf;

use crate::core::chatbox::sample::OsIdentity;

pub const OS_RELEASE_PATH: &str = "/etc/os-release";

/// Reads the distribution name and version from an os-release file.
#[derive(Debug, Clone)]
pub struct OsReleaseAdapter {
    path: PathBuf,
}

impl OsReleaseAdapter {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn sample(&self) -> OsIdentity {
        match fs::read_to_string(&self.path) {
            Ok(contents) => parse_os_release(&contents),
            Err(e) => {
                log::debug!("Could not read {:?}: {}", self.path, e);
                OsIdentity::Unknown
            }
        }
    }
}

impl Default for OsReleaseAdapter {
    fn default() -> Self {
        Self::new(OS_RELEASE_PATH)
    }
}

/// Extract `NAME=` and `VERSION=`; a missing key leaves its value blank.
pub fn parse_os_release(contents: &str) -> OsIdentity {
    let mut name = String::new();
    let mut version = String::new();

    for line in contents.lines() {
        let line = line.trim();
        if let Some(value) = line.strip_prefix("NAME=") {
            name = value.replace('"', "");
        } else if let Some(value) = line.strip_prefix("VERSION=") {
            version = value.replace('"', "");
        }
    }

    OsIdentity::Distro { name, version }
}
