//! Brightness request processing
//!
//! Serializes queued host requests into the single [`Backlight`] that owns
//! the control line.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::channel::{Drain, RequestQueue, Submitter};
use crate::device::Backlight;
use crate::error::DriverError;
use crate::log::{DriverEvent, HostLog, Severity};

/// A change the host wants applied to the backlight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BacklightRequest {
    /// New absolute brightness
    Brightness(i32),
    /// Power the backlight on or off, keeping the brightness
    Power(bool),
    /// Blank or unblank the attached display
    Blank(bool),
    Suspend,
    Resume,
}

/// Outcome of draining the queue
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessReport {
    /// Requests that reached the backlight.
    pub applied: usize,
    /// Out of range requests that were dropped.
    pub rejected: usize,
}

/// Type alias for the request queue
pub type BacklightQueue<const SIZE: usize> = RequestQueue<SIZE>;

/// Type alias for a request producer
pub type RequestSubmitter<'a, const SIZE: usize> = Submitter<'a, SIZE>;

/// Type alias for the request consumer
pub type RequestDrain<'a, const SIZE: usize> = Drain<'a, SIZE>;

/// Applies queued requests one at a time
pub struct RequestProcessor<'a, const SIZE: usize> {
    requests: RequestDrain<'a, SIZE>,
}

impl<'a, const SIZE: usize> RequestProcessor<'a, SIZE> {
    pub const fn new(requests: RequestDrain<'a, SIZE>) -> Self {
        Self { requests }
    }

    /// Apply every pending request in submission order.
    ///
    /// Each request runs its full pulse sequence before the next is taken.
    /// Out of range brightness requests are logged and skipped. A line
    /// failure stops processing; requests behind it stay queued.
    pub fn process_pending<P, D, L>(
        &mut self,
        backlight: &mut Backlight<P, D, L>,
    ) -> Result<ProcessReport, DriverError<P::Error>>
    where
        P: OutputPin,
        D: DelayNs,
        L: HostLog,
    {
        let mut report = ProcessReport::default();

        while let Some(request) = self.requests.take() {
            match Self::process_request(backlight, request) {
                Ok(()) => report.applied += 1,
                Err(DriverError::InvalidTarget(target)) => {
                    backlight.report(Severity::Warn, &DriverEvent::RequestRejected { target });
                    report.rejected += 1;
                }
                Err(err) => return Err(err),
            }
        }

        Ok(report)
    }

    fn process_request<P, D, L>(
        backlight: &mut Backlight<P, D, L>,
        request: BacklightRequest,
    ) -> Result<(), DriverError<P::Error>>
    where
        P: OutputPin,
        D: DelayNs,
        L: HostLog,
    {
        match request {
            BacklightRequest::Brightness(brightness) => backlight.set_brightness(brightness),
            BacklightRequest::Power(on) => backlight.set_power(on),
            BacklightRequest::Blank(blanked) => backlight.set_blank(blanked),
            BacklightRequest::Suspend => backlight.suspend(),
            BacklightRequest::Resume => backlight.resume(),
        }
    }
}
