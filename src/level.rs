//! Brightness steps understood by the dimmer IC.

use core::fmt;

/// Number of lit steps the IC counts through (and the brightest step).
pub const MAX_STEP: u8 = 32;

/// Dimmest lit step. Anything below it means "off".
pub const MIN_STEP: u8 = 1;

/// Absolute brightness step in `0..=MAX_STEP`, `0` being off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Level(u8);

impl Level {
    /// The off sentinel.
    pub const OFF: Self = Self(0);
    /// The brightest step.
    pub const MAX: Self = Self(MAX_STEP);

    /// Create a level, returning `None` above [`MAX_STEP`].
    pub const fn new(value: u8) -> Option<Self> {
        if value > MAX_STEP {
            return None;
        }
        Some(Self(value))
    }

    /// Create a level from a configuration value, saturating at [`MAX_STEP`].
    ///
    /// The second element tells whether the value had to be clamped.
    pub fn saturating(value: u32) -> (Self, bool) {
        match u8::try_from(value).ok().and_then(Self::new) {
            Some(level) => (level, false),
            None => (Self::MAX, true),
        }
    }

    /// Raw step value.
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Whether this is the off sentinel.
    pub const fn is_off(self) -> bool {
        self.0 < MIN_STEP
    }

    /// The step the IC lands on after one step-down pulse.
    ///
    /// Stepping down from the dimmest step (or from off) rolls over to the
    /// brightest one.
    pub const fn stepped_down(self) -> Self {
        if self.0 <= MIN_STEP {
            Self::MAX
        } else {
            Self(self.0 - 1)
        }
    }

    /// Number of step-down pulses needed to move from `self` to `target`.
    pub const fn pulses_to(self, target: Self) -> u8 {
        if target.0 == self.0 || target.0 < MIN_STEP {
            return 0;
        }
        if self.0 > target.0 {
            self.0 - target.0
        } else {
            // Roll over to the brightest step first. From off that is a
            // single pulse.
            let to_wrap = if self.0 < MIN_STEP { MIN_STEP } else { self.0 };
            to_wrap + MAX_STEP - target.0
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.0
    }
}

/// A validated brightness request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Run the shutdown sequence.
    Off,
    /// Step the IC to a lit level. An off level here is treated as [`Target::Off`].
    Step(Level),
}

impl Target {
    /// Interpret a raw brightness request.
    ///
    /// Anything below [`MIN_STEP`] is a shutdown request. Values above
    /// [`MAX_STEP`] are returned back as the error.
    pub fn from_raw(value: i32) -> Result<Self, i32> {
        if value < i32::from(MIN_STEP) {
            return Ok(Self::Off);
        }
        u8::try_from(value)
            .ok()
            .and_then(Level::new)
            .map(Self::Step)
            .ok_or(value)
    }

    /// The level the tracker holds once this target is reached.
    pub const fn level(self) -> Level {
        match self {
            Self::Off => Level::OFF,
            Self::Step(level) => level,
        }
    }
}
