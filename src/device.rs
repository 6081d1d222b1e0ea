//! Host-facing backlight device
//!
//! Wraps a [`PulseSequencer`] with the lifecycle the host framework drives:
//! attach, brightness changes, power/blank/suspend state, read-back and
//! detach. Host capabilities (the output line, configuration and logging)
//! are passed in rather than looked up.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::{ConfigSource, ResolvedLevel};
use crate::error::{AttachError, DriverError};
use crate::level::{MAX_STEP, Target};
use crate::log::{DriverEvent, HostLog, Severity};
use crate::sequencer::PulseSequencer;

/// Hands out the exclusively-owned control line
///
/// The claimed line must be driven low.
pub trait LineProvider {
    type Line: OutputPin;
    type Error;

    fn claim(&mut self) -> Result<Self::Line, Self::Error>;
}

impl<F, P, E> LineProvider for F
where
    F: FnMut() -> Result<P, E>,
    P: OutputPin,
{
    type Line = P;
    type Error = E;

    fn claim(&mut self) -> Result<P, E> {
        self()
    }
}

/// Requested state of the backlight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BacklightState {
    /// Last requested brightness.
    pub brightness: i32,
    pub powered: bool,
    pub blanked: bool,
    pub suspended: bool,
}

impl BacklightState {
    /// Level the IC should be at for this state.
    ///
    /// Powered down, blanked or suspended backlights are off regardless of
    /// the requested brightness.
    pub const fn effective_brightness(&self) -> i32 {
        if !self.powered || self.blanked || self.suspended {
            0
        } else {
            self.brightness
        }
    }
}

impl Default for BacklightState {
    fn default() -> Self {
        Self {
            brightness: 0,
            powered: true,
            blanked: false,
            suspended: false,
        }
    }
}

/// An attached backlight
pub struct Backlight<P, D, L> {
    sequencer: PulseSequencer<P, D>,
    state: BacklightState,
    log: L,
}

impl<P, D, L> Backlight<P, D, L>
where
    P: OutputPin,
    D: DelayNs,
    L: HostLog,
{
    /// Claim the line, read the configuration and bring the backlight to its
    /// default level.
    ///
    /// A default level above [`MAX_STEP`] is clamped with a warning.
    pub fn attach<LP, C>(
        provider: &mut LP,
        config: &C,
        delay: D,
        mut log: L,
    ) -> Result<Self, AttachError<LP::Error, P::Error>>
    where
        LP: LineProvider<Line = P>,
        C: ConfigSource + ?Sized,
    {
        let mut line = match provider.claim() {
            Ok(line) => line,
            Err(err) => {
                log.record(Severity::Error, &DriverEvent::LineUnavailable);
                return Err(AttachError::LineUnavailable(err));
            }
        };
        line.set_low()
            .map_err(|err| AttachError::Driver(DriverError::Line(err)))?;

        let Some(raw_level) = config.default_level() else {
            log.record(Severity::Error, &DriverEvent::MissingDefaultLevel);
            return Err(AttachError::MissingDefaultLevel);
        };
        let resolved = ResolvedLevel::resolve(raw_level);
        if let Some(requested) = resolved.clamped_from {
            log.record(
                Severity::Warn,
                &DriverEvent::DefaultLevelClamped {
                    requested,
                    applied: resolved.level,
                },
            );
        }

        let mut backlight = Self {
            sequencer: PulseSequencer::new(line, delay, config.timings()),
            state: BacklightState::default(),
            log,
        };

        if !resolved.level.is_off() {
            backlight.state.brightness = i32::from(resolved.level.get());
            backlight.update()?;
        }

        backlight.log.record(Severity::Info, &DriverEvent::Initialized);
        Ok(backlight)
    }

    /// Request a new absolute brightness.
    ///
    /// Values above [`MAX_STEP`] are rejected and leave both the requested
    /// state and the IC untouched.
    pub fn set_brightness(&mut self, brightness: i32) -> Result<(), DriverError<P::Error>> {
        Target::from_raw(brightness).map_err(DriverError::InvalidTarget)?;
        self.state.brightness = brightness;
        self.update()
    }

    /// Power the backlight on or off, keeping the requested brightness.
    pub fn set_power(&mut self, on: bool) -> Result<(), DriverError<P::Error>> {
        self.state.powered = on;
        self.update()
    }

    /// Blank or unblank the display, keeping the requested brightness.
    pub fn set_blank(&mut self, blanked: bool) -> Result<(), DriverError<P::Error>> {
        self.state.blanked = blanked;
        self.update()
    }

    /// Turn the IC off while keeping the requested brightness.
    pub fn suspend(&mut self) -> Result<(), DriverError<P::Error>> {
        self.state.suspended = true;
        self.update()
    }

    /// Restore the requested brightness after [`suspend`](Self::suspend).
    pub fn resume(&mut self) -> Result<(), DriverError<P::Error>> {
        self.state.suspended = false;
        self.update()
    }

    /// Last requested brightness.
    pub const fn brightness(&self) -> i32 {
        self.state.brightness
    }

    /// Brightest level the IC supports.
    pub const fn max_brightness(&self) -> u8 {
        MAX_STEP
    }

    /// Requested power, blank and suspend state.
    pub const fn state(&self) -> &BacklightState {
        &self.state
    }

    /// Shut the IC off and give the line back.
    pub fn detach(mut self) -> Result<P, DriverError<P::Error>> {
        self.state.powered = false;
        self.state.brightness = 0;
        self.sequencer.apply_target(Target::Off)?;
        self.log.record(Severity::Info, &DriverEvent::Unloaded);

        let (line, _delay) = self.sequencer.release();
        Ok(line)
    }

    pub(crate) fn report(&mut self, severity: Severity, event: &DriverEvent) {
        self.log.record(severity, event);
    }

    /// Push the effective brightness of the current state to the IC.
    fn update(&mut self) -> Result<(), DriverError<P::Error>> {
        self.sequencer.apply(self.state.effective_brightness())
    }
}
