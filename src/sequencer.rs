//! Pulse sequencing for the single-wire dimmer
//!
//! The IC only understands two things on its control line: a low-then-high
//! pulse, which steps its internal counter down by one (rolling over from the
//! dimmest step to the brightest), and a sustained low hold, which shuts it
//! off. Absolute levels are reached by pulsing until the tracked step matches.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::error::DriverError;
use crate::level::{Level, Target};
use crate::timing::PulseTimings;
use crate::tracker::LevelTracker;

/// Drives the control line of one IC.
///
/// Owns the line exclusively for its whole lifetime. Transitions take
/// `&mut self`, so one is ever in flight per IC and each runs to completion.
pub struct PulseSequencer<P, D> {
    line: P,
    delay: D,
    timings: PulseTimings,
    tracker: LevelTracker,
}

impl<P, D> PulseSequencer<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    /// Take over a line that is currently driven low.
    ///
    /// A low line is an off IC, so tracking starts at [`Level::OFF`].
    pub const fn new(line: P, delay: D, timings: PulseTimings) -> Self {
        Self {
            line,
            delay,
            timings,
            tracker: LevelTracker::new(),
        }
    }

    /// Bring the IC to an absolute brightness.
    ///
    /// Any value below 1 shuts the IC off. Values above
    /// [`MAX_STEP`](crate::MAX_STEP) are rejected before the line is touched.
    pub fn apply(&mut self, target: i32) -> Result<(), DriverError<P::Error>> {
        let target = Target::from_raw(target).map_err(DriverError::InvalidTarget)?;
        self.apply_target(target)
    }

    /// Bring the IC to an already validated target.
    ///
    /// A `Step` holding an off level is a shutdown: no pulse sequence ever
    /// lands on step 0.
    pub fn apply_target(&mut self, target: Target) -> Result<(), DriverError<P::Error>> {
        match target {
            Target::Step(level) if !level.is_off() => self.step_to(level),
            Target::Off | Target::Step(_) => self.shutdown(),
        }
    }

    /// Hold the line low long enough for the IC to shut off.
    fn shutdown(&mut self) -> Result<(), DriverError<P::Error>> {
        self.line.set_low().map_err(DriverError::Line)?;
        self.delay.delay_us(self.timings.shutdown_hold_us());
        self.tracker.reset_to_off();

        #[cfg(feature = "esp32-log")]
        println!("[fan5345] shutdown");

        Ok(())
    }

    fn step_to(&mut self, level: Level) -> Result<(), DriverError<P::Error>> {
        #[cfg(feature = "esp32-log")]
        println!(
            "[fan5345] {} -> {} ({} pulses)",
            self.tracker.current(),
            level,
            self.tracker.current().pulses_to(level)
        );

        while self.tracker.current() != level {
            self.pulse()?;
        }
        Ok(())
    }

    /// Emit one step-down pulse and account for it.
    fn pulse(&mut self) -> Result<(), DriverError<P::Error>> {
        let spacing = self.timings.edge_spacing_ns();

        self.line.set_low().map_err(DriverError::Line)?;
        self.delay.delay_ns(spacing);
        self.line.set_high().map_err(DriverError::Line)?;
        self.delay.delay_ns(spacing);

        self.tracker.decrement_with_wrap();
        Ok(())
    }

    /// Step the IC is believed to sit at.
    ///
    /// This is bookkeeping for pulse generation, not the user-facing
    /// brightness.
    pub const fn believed_level(&self) -> Level {
        self.tracker.current()
    }

    pub const fn timings(&self) -> PulseTimings {
        self.timings
    }

    /// Give back the line and the delay provider.
    pub fn release(self) -> (P, D) {
        (self.line, self.delay)
    }
}
