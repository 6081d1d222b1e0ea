use crate::level::Level;
use crate::timing::PulseTimings;

/// Source of the persisted device configuration
pub trait ConfigSource {
    /// Absolute level to bring the backlight to at attach.
    ///
    /// `None` means the value is missing or unreadable.
    fn default_level(&self) -> Option<u32>;

    /// Line timings. Defaults to the IC minimums.
    fn timings(&self) -> PulseTimings {
        PulseTimings::default()
    }
}

/// Plain configuration values
#[derive(Debug, Clone, Copy, Default)]
pub struct DriverConfig {
    pub default_level: Option<u32>,
    pub timings: PulseTimings,
}

impl DriverConfig {
    pub const fn with_default_level(level: u32) -> Self {
        Self {
            default_level: Some(level),
            timings: PulseTimings::MINIMUM,
        }
    }
}

impl ConfigSource for DriverConfig {
    fn default_level(&self) -> Option<u32> {
        self.default_level
    }

    fn timings(&self) -> PulseTimings {
        self.timings
    }
}

/// Default level after range checking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedLevel {
    pub level: Level,
    /// Raw configured value when it had to be clamped.
    pub clamped_from: Option<u32>,
}

impl ResolvedLevel {
    /// Saturate a configured value to the valid range.
    pub fn resolve(raw: u32) -> Self {
        let (level, clamped) = Level::saturating(raw);
        Self {
            level,
            clamped_from: clamped.then_some(raw),
        }
    }
}
