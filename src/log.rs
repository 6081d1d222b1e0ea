//! Host logging sink
//!
//! The driver never formats log lines itself; it hands structured events to a
//! [`HostLog`] supplied at attach time.

use core::fmt;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::level::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warn,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        })
    }
}

/// Events the driver reports to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverEvent {
    /// Configured default level was above the maximum and got clamped.
    DefaultLevelClamped { requested: u32, applied: Level },
    /// The output line could not be claimed.
    LineUnavailable,
    /// The configuration has no default level.
    MissingDefaultLevel,
    /// A queued brightness request was out of range and dropped.
    RequestRejected { target: i32 },
    /// Attach completed.
    Initialized,
    /// Detach completed.
    Unloaded,
}

impl fmt::Display for DriverEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DefaultLevelClamped { requested, applied } => write!(
                f,
                "level of {} is out of range. Setting to {}.",
                requested, applied
            ),
            Self::LineUnavailable => f.write_str("failed to request level line"),
            Self::MissingDefaultLevel => f.write_str("can't read the default level"),
            Self::RequestRejected { target } => {
                write!(f, "dropping out of range brightness request {}", target)
            }
            Self::Initialized => f.write_str("driver initialized"),
            Self::Unloaded => f.write_str("driver unloaded"),
        }
    }
}

/// Logging channel of the host framework
pub trait HostLog {
    fn record(&mut self, severity: Severity, event: &DriverEvent);
}

impl<L: HostLog + ?Sized> HostLog for &mut L {
    fn record(&mut self, severity: Severity, event: &DriverEvent) {
        (**self).record(severity, event);
    }
}

/// Sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLog;

impl HostLog for NoopLog {
    fn record(&mut self, _severity: Severity, _event: &DriverEvent) {}
}

/// Sink printing events over the ESP serial console.
#[cfg(feature = "esp32-log")]
#[derive(Debug, Clone, Copy, Default)]
pub struct PrintlnLog;

#[cfg(feature = "esp32-log")]
impl HostLog for PrintlnLog {
    fn record(&mut self, severity: Severity, event: &DriverEvent) {
        println!("[fan5345] {}: {}", severity, event);
    }
}
