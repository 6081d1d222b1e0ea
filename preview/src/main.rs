//! Desktop preview for the fan5345 backlight driver
//!
//! Attaches the driver to a simulated control line and prints every edge
//! with its timestamp, so the emitted waveform can be inspected without
//! hardware. Brightness requests are taken from the command line and pushed
//! through the request queue, e.g. `fan5345-preview 30 1 0 32`.

use std::convert::Infallible;
use std::process::ExitCode;

use embassy_time::Instant;
use embedded_hal::digital::{ErrorType, OutputPin};
use fan5345_backlight::{
    Backlight, BacklightQueue, BacklightRequest, Delay, DriverConfig, DriverEvent, HostLog,
    RequestProcessor, Severity,
};

/// Request queue size
const QUEUE_SIZE: usize = 16;

/// Level the simulated device is configured with
const DEFAULT_LEVEL: u32 = 24;

/// Static queue between the "host" (argument parser) and the driver
static REQUESTS: BacklightQueue<QUEUE_SIZE> = BacklightQueue::<QUEUE_SIZE>::new();

/// Control line that prints its edges
struct ConsoleLine {
    started: Instant,
}

impl ConsoleLine {
    fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    fn edge(&mut self, high: bool) {
        let elapsed = Instant::now() - self.started;
        println!(
            "{:>10} us  {}",
            elapsed.as_micros(),
            if high { "‾‾ high" } else { "__ low" }
        );
    }
}

impl ErrorType for ConsoleLine {
    type Error = Infallible;
}

impl OutputPin for ConsoleLine {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.edge(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.edge(true);
        Ok(())
    }
}

struct ConsoleLog;

impl HostLog for ConsoleLog {
    fn record(&mut self, severity: Severity, event: &DriverEvent) {
        eprintln!("[{}] {}", severity, event);
    }
}

fn main() -> ExitCode {
    let mut requests = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.parse::<i32>() {
            Ok(level) => requests.push(BacklightRequest::Brightness(level)),
            Err(_) => match arg.as_str() {
                "off" => requests.push(BacklightRequest::Power(false)),
                "on" => requests.push(BacklightRequest::Power(true)),
                "suspend" => requests.push(BacklightRequest::Suspend),
                "resume" => requests.push(BacklightRequest::Resume),
                _ => {
                    eprintln!("unknown request: {}", arg);
                    return ExitCode::FAILURE;
                }
            },
        }
    }

    let mut provider = || Ok::<_, Infallible>(ConsoleLine::new());
    let config = DriverConfig::with_default_level(DEFAULT_LEVEL);
    let mut backlight = match Backlight::attach(&mut provider, &config, Delay, ConsoleLog) {
        Ok(backlight) => backlight,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let submitter = REQUESTS.submitter();
    for request in requests {
        if submitter.submit(request).is_err() {
            eprintln!("request queue is full, dropping {:?}", request);
        }
    }

    let mut processor = RequestProcessor::new(REQUESTS.drain());
    match processor.process_pending(&mut backlight) {
        Ok(report) => eprintln!(
            "applied {} requests, rejected {}, brightness {}",
            report.applied,
            report.rejected,
            backlight.brightness()
        ),
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    }

    match backlight.detach() {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
