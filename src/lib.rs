#![no_std]

pub mod channel;
pub mod config;
pub mod device;
pub mod error;
pub mod level;
pub mod log;
pub mod request;
pub mod sequencer;
pub mod timing;
pub mod tracker;

pub use config::{ConfigSource, DriverConfig, ResolvedLevel};
pub use device::{Backlight, BacklightState, LineProvider};
pub use error::{AttachError, DriverError};
pub use level::{Level, MAX_STEP, MIN_STEP, Target};
pub use log::{DriverEvent, HostLog, NoopLog, Severity};
pub use request::{
    BacklightQueue, BacklightRequest, ProcessReport, RequestDrain, RequestProcessor,
    RequestSubmitter,
};
pub use sequencer::PulseSequencer;
pub use timing::{MIN_EDGE_SPACING_NS, MIN_SHUTDOWN_HOLD, PulseTimings};
pub use tracker::LevelTracker;

#[cfg(feature = "esp32-log")]
pub use log::PrintlnLog;

pub use embassy_time::{Delay, Duration};
