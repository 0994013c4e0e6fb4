//! Host platform detection.
//!
//! The platform is derived from a probe rather than read from global state, so
//! callers (and tests) can substitute any OS signal they like.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    Windows,
    NonWindows,
}

impl Platform {
    /// Classify an OS identifier such as `"windows"`, `"win32"`, `"linux"` or `"darwin"`.
    pub fn from_signal(signal: &str) -> Self {
        if signal.trim().to_ascii_lowercase().starts_with("win") {
            Platform::Windows
        } else {
            Platform::NonWindows
        }
    }

    pub fn is_windows(self) -> bool {
        self == Platform::Windows
    }
}

/// Source of the OS identifier used by [`detect_platform`].
pub trait PlatformProbe {
    fn os_signal(&self) -> String;
}

/// Reads the compile-time target OS of the running binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostProbe;

impl PlatformProbe for HostProbe {
    fn os_signal(&self) -> String {
        std::env::consts::OS.to_string()
    }
}

impl<F> PlatformProbe for F
where
    F: Fn() -> String,
{
    fn os_signal(&self) -> String {
        self()
    }
}

pub fn detect_platform<P: PlatformProbe + ?Sized>(probe: &P) -> Platform {
    Platform::from_signal(&probe.os_signal())
}
