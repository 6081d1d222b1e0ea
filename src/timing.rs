//! Pulse timing on the control line.

use embassy_time::Duration;

/// Minimum spacing between two edges for the IC to register a pulse, in ns.
pub const MIN_EDGE_SPACING_NS: u32 = 500;

/// Minimum low hold for the IC to register a full shutdown.
///
/// Shorter holds are indistinguishable from a step-down pulse.
pub const MIN_SHUTDOWN_HOLD: Duration = Duration::from_millis(1);

/// Delays used when driving the control line
///
/// Values can only be lengthened past the IC minimums: longer holds are
/// tolerated by the IC, shorter ones are not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseTimings {
    edge_spacing_ns: u32,
    shutdown_hold: Duration,
}

impl PulseTimings {
    /// The IC minimums.
    pub const MINIMUM: Self = Self {
        edge_spacing_ns: MIN_EDGE_SPACING_NS,
        shutdown_hold: MIN_SHUTDOWN_HOLD,
    };

    /// Create timings, raising any value below the IC minimum to it.
    pub fn new(edge_spacing_ns: u32, shutdown_hold: Duration) -> Self {
        Self {
            edge_spacing_ns: edge_spacing_ns.max(MIN_EDGE_SPACING_NS),
            shutdown_hold: shutdown_hold.max(MIN_SHUTDOWN_HOLD),
        }
    }

    /// Wait after each edge of a step-down pulse, in nanoseconds.
    pub const fn edge_spacing_ns(&self) -> u32 {
        self.edge_spacing_ns
    }

    /// Low hold of the shutdown sequence.
    pub const fn shutdown_hold(&self) -> Duration {
        self.shutdown_hold
    }

    /// Shutdown hold in microseconds, saturated to what a delay can take.
    pub(crate) fn shutdown_hold_us(&self) -> u32 {
        u32::try_from(self.shutdown_hold.as_micros()).unwrap_or(u32::MAX)
    }
}

impl Default for PulseTimings {
    fn default() -> Self {
        Self::MINIMUM
    }
}
