//! Recording fakes for the control line and the delay provider.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Low,
    High,
    WaitNs(u32),
}

/// Edge on the line together with the time waited before the next edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub high: bool,
    pub wait_ns: u64,
}

/// Shared recording of everything that happened on the wire.
#[derive(Clone, Default)]
pub struct Wire {
    signals: Rc<RefCell<Vec<Signal>>>,
}

impl Wire {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&self) -> FakeLine {
        FakeLine {
            wire: self.clone(),
            fail_after: None,
        }
    }

    /// Line whose writes start failing after `writes` successful ones.
    pub fn failing_line(&self, writes: usize) -> FakeLine {
        FakeLine {
            wire: self.clone(),
            fail_after: Some(writes),
        }
    }

    pub fn delay(&self) -> FakeDelay {
        FakeDelay { wire: self.clone() }
    }

    pub fn signals(&self) -> Vec<Signal> {
        self.signals.borrow().clone()
    }

    pub fn clear(&self) {
        self.signals.borrow_mut().clear();
    }

    fn push(&self, signal: Signal) {
        self.signals.borrow_mut().push(signal);
    }

    fn edges(&self) -> usize {
        self.signals
            .borrow()
            .iter()
            .filter(|s| !matches!(s, Signal::WaitNs(_)))
            .count()
    }

    pub fn segments(&self) -> Vec<Segment> {
        let mut segments: Vec<Segment> = Vec::new();
        for signal in self.signals.borrow().iter() {
            match signal {
                Signal::Low => segments.push(Segment {
                    high: false,
                    wait_ns: 0,
                }),
                Signal::High => segments.push(Segment {
                    high: true,
                    wait_ns: 0,
                }),
                Signal::WaitNs(ns) => {
                    if let Some(last) = segments.last_mut() {
                        last.wait_ns += u64::from(*ns);
                    }
                }
            }
        }
        segments
    }

    /// Number of completed step-down pulses.
    pub fn pulses(&self) -> usize {
        self.segments().iter().filter(|s| s.high).count()
    }

    /// Waits following each edge that belongs to a step-down pulse.
    pub fn pulse_gaps(&self) -> Vec<u64> {
        let segments = self.segments();
        segments
            .iter()
            .enumerate()
            .filter(|(i, s)| s.high || segments.get(i + 1).is_some_and(|next| next.high))
            .map(|(_, s)| s.wait_ns)
            .collect()
    }

    /// Low holds that were not followed by a rising edge.
    pub fn shutdown_holds(&self) -> Vec<u64> {
        let segments = self.segments();
        segments
            .iter()
            .enumerate()
            .filter(|(i, s)| {
                !s.high && s.wait_ns > 0 && !segments.get(i + 1).is_some_and(|next| next.high)
            })
            .map(|(_, s)| s.wait_ns)
            .collect()
    }

    /// Level the line is currently driven to, if it was ever driven.
    pub fn is_high(&self) -> Option<bool> {
        self.segments().last().map(|s| s.high)
    }
}

pub struct FakeLine {
    wire: Wire,
    fail_after: Option<usize>,
}

impl FakeLine {
    fn write(&mut self, signal: Signal) -> Result<(), ErrorKind> {
        if self.fail_after.is_some_and(|limit| self.wire.edges() >= limit) {
            return Err(ErrorKind::Other);
        }
        self.wire.push(signal);
        Ok(())
    }
}

impl ErrorType for FakeLine {
    type Error = ErrorKind;
}

impl OutputPin for FakeLine {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(Signal::Low)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(Signal::High)
    }
}

pub struct FakeDelay {
    wire: Wire,
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.wire.push(Signal::WaitNs(ns));
    }
}

/// Host log that keeps every event.
#[derive(Clone, Default)]
pub struct RecordingLog {
    events: Rc<RefCell<Vec<(fan5345_backlight::Severity, fan5345_backlight::DriverEvent)>>>,
}

impl RecordingLog {
    pub fn events(&self) -> Vec<(fan5345_backlight::Severity, fan5345_backlight::DriverEvent)> {
        self.events.borrow().clone()
    }

    pub fn warnings(&self) -> Vec<fan5345_backlight::DriverEvent> {
        self.events
            .borrow()
            .iter()
            .filter(|(severity, _)| *severity == fan5345_backlight::Severity::Warn)
            .map(|(_, event)| *event)
            .collect()
    }
}

impl fan5345_backlight::HostLog for RecordingLog {
    fn record(
        &mut self,
        severity: fan5345_backlight::Severity,
        event: &fan5345_backlight::DriverEvent,
    ) {
        self.events.borrow_mut().push((severity, *event));
    }
}
