use std::time::Duration;

use tokio::sync::{Mutex, MutexGuard};
use tokio::time::Instant;

/// Kinds of request, each with its own courtesy delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestClass {
    /// A numbered artist listing page for a letter.
    Listing,
    /// A page of an artist's song index.
    Artist,
    /// A single song page.
    Song,
    /// A listing probe made while building the page table.
    PageTable,
    /// A one-off listing probe for a single letter.
    Probe,
}

/// Minimum spacing between a request of a given class and the request
/// before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delays {
    pub listing: Duration,
    pub artist: Duration,
    pub song: Duration,
    pub page_table: Duration,
    pub probe: Duration,
}

impl Default for Delays {
    fn default() -> Self {
        Self {
            listing: Duration::from_secs(2),
            artist: Duration::from_secs(5),
            song: Duration::ZERO,
            page_table: Duration::from_millis(300),
            probe: Duration::ZERO,
        }
    }
}

impl Delays {
    /// No throttling at all.
    pub fn none() -> Self {
        Self {
            listing: Duration::ZERO,
            artist: Duration::ZERO,
            song: Duration::ZERO,
            page_table: Duration::ZERO,
            probe: Duration::ZERO,
        }
    }

    pub fn for_class(&self, class: RequestClass) -> Duration {
        match class {
            RequestClass::Listing => self.listing,
            RequestClass::Artist => self.artist,
            RequestClass::Song => self.song,
            RequestClass::PageTable => self.page_table,
            RequestClass::Probe => self.probe,
        }
    }
}

/// Single gate every request passes through before it is sent.
///
/// The delay for a class is the pause between the end of the previous
/// response and the start of the next request; time spent waiting for a
/// response does not count toward it. Only one pass exists at a time, so
/// requests stay strictly sequential even if several tasks share one gate.
#[derive(Debug)]
pub struct RequestGate {
    delays: Delays,
    last_response: Mutex<Option<Instant>>,
}

/// Permission to send one request. Dropping it marks the response as done.
#[derive(Debug)]
pub struct GatePass<'a> {
    last_response: MutexGuard<'a, Option<Instant>>,
}

impl Drop for GatePass<'_> {
    fn drop(&mut self) {
        *self.last_response = Some(Instant::now());
    }
}

impl RequestGate {
    pub fn new(delays: Delays) -> Self {
        Self {
            delays,
            last_response: Mutex::new(None),
        }
    }

    /// Wait until a request of `class` may be sent. Hold the returned pass
    /// until the response has been read.
    pub async fn enter(&self, class: RequestClass) -> GatePass<'_> {
        let last_response = self.last_response.lock().await;

        if let Some(previous) = *last_response {
            let ready_at = previous + self.delays.for_class(class);
            let now = Instant::now();
            if ready_at > now {
                tracing::trace!(?class, wait_ms = (ready_at - now).as_millis() as u64, "Throttling request");
                tokio::time::sleep_until(ready_at).await;
            }
        }

        GatePass { last_response }
    }
}
