//! Bounded request queue shared between producers and the driver.
//!
//! Brightness requests may come from several tasks or interrupt handlers,
//! but the IC must only ever see one pulse sequence at a time. Producers push
//! into this queue; a single consumer drains it in order. Access is guarded
//! by `critical-section`, storage is a fixed-size `heapless::Deque`.
//!
//! A slider dragged faster than the IC can be pulsed fills the queue with
//! brightness requests that are stale before they run. When the queue is
//! full, a new brightness request replaces a brightness request waiting at
//! the back instead of being refused. Power, blank and suspend requests are
//! never merged.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

use crate::request::BacklightRequest;

/// The queue is full; the rejected request is handed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueFull(pub BacklightRequest);

/// How a submitted request was queued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Queued {
    /// Appended behind the pending requests.
    Appended,
    /// Replaced this pending brightness request.
    Superseded(BacklightRequest),
}

/// A bounded FIFO of backlight requests, usable from interrupt context.
pub struct RequestQueue<const SIZE: usize> {
    pending: Mutex<RefCell<Deque<BacklightRequest, SIZE>>>,
}

impl<const SIZE: usize> RequestQueue<SIZE> {
    /// Create an empty queue.
    pub const fn new() -> Self {
        Self {
            pending: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Handle for a producer. Any number may coexist.
    pub const fn submitter(&self) -> Submitter<'_, SIZE> {
        Submitter { queue: self }
    }

    /// Handle for the consumer.
    pub const fn drain(&self) -> Drain<'_, SIZE> {
        Drain { queue: self }
    }

    /// Queue a request behind the ones already pending.
    ///
    /// On a full queue a brightness request supersedes a brightness request
    /// at the back; anything else is refused.
    pub fn submit(&self, request: BacklightRequest) -> Result<Queued, QueueFull> {
        critical_section::with(|cs| {
            let mut pending = self.pending.borrow(cs).borrow_mut();
            if !pending.is_full() {
                return pending
                    .push_back(request)
                    .map(|()| Queued::Appended)
                    .map_err(QueueFull);
            }
            match pending.back_mut() {
                Some(last)
                    if matches!(
                        (request, *last),
                        (BacklightRequest::Brightness(_), BacklightRequest::Brightness(_))
                    ) =>
                {
                    Ok(Queued::Superseded(core::mem::replace(last, request)))
                }
                _ => Err(QueueFull(request)),
            }
        })
    }

    /// Take the oldest pending request.
    pub fn take(&self) -> Option<BacklightRequest> {
        critical_section::with(|cs| self.pending.borrow(cs).borrow_mut().pop_front())
    }

    /// Number of pending requests.
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.pending.borrow(cs).borrow().len())
    }

    /// Whether no request is pending.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const SIZE: usize> Default for RequestQueue<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Producer side of a [`RequestQueue`].
#[derive(Clone, Copy)]
pub struct Submitter<'a, const SIZE: usize> {
    queue: &'a RequestQueue<SIZE>,
}

impl<const SIZE: usize> Submitter<'_, SIZE> {
    /// Queue a request, see [`RequestQueue::submit`].
    pub fn submit(&self, request: BacklightRequest) -> Result<Queued, QueueFull> {
        self.queue.submit(request)
    }
}

/// Consumer side of a [`RequestQueue`].
#[derive(Clone, Copy)]
pub struct Drain<'a, const SIZE: usize> {
    queue: &'a RequestQueue<SIZE>,
}

impl<const SIZE: usize> Drain<'_, SIZE> {
    /// Take the oldest pending request.
    pub fn take(&self) -> Option<BacklightRequest> {
        self.queue.take()
    }
}
