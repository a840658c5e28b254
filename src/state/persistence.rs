use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use futures::future::BoxFuture;
use parking_lot::Mutex;

use crate::element::{self, Element};
use crate::error::{ExportError, SaveError};

/// The external persistence collaborator, usually a network call made by the host.
///
/// The payload is the top-level element sequence; [`SaveRequest::to_json`] gives its
/// JSON-schema encoding.
pub trait SaveTarget {
    fn save<'a>(&'a self, elements: &'a [Element]) -> BoxFuture<'a, Result<(), SaveError>>;
}

/// A tree captured for saving, tagged with the document revision it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveRequest {
    pub revision: u64,
    pub elements: Vec<Element>,
    /// Seconds since the UNIX epoch
    pub requested_at: u64,
}

impl SaveRequest {
    pub fn new(revision: u64, elements: Vec<Element>) -> Self {
        Self {
            revision,
            elements,
            requested_at: timestamp_secs(),
        }
    }

    pub fn to_json(&self) -> Result<String, ExportError> {
        element::to_json(&self.elements)
    }
}

/// Result of a save that reached the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveReceipt {
    pub revision: u64,
    /// A newer revision had already been persisted when this save finished.
    pub superseded: bool,
}

#[derive(Debug, Default)]
struct SaveLedger {
    persisted: Option<u64>,
    in_flight: usize,
}

/// Sequences overlapping saves: the highest revision written wins.
///
/// Saves are not queued or cancelled. When an older revision completes after a newer
/// one, its receipt comes back `superseded` and the document's clean marker does not
/// move backwards. Clones share one ledger.
#[derive(Debug, Clone, Default)]
pub struct SaveCoordinator {
    ledger: Arc<Mutex<SaveLedger>>,
}

impl SaveCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn run(
        &self,
        target: &dyn SaveTarget,
        request: SaveRequest,
    ) -> Result<SaveReceipt, SaveError> {
        for element in &request.elements {
            element::ensure_recognized(element)?;
        }

        let guard = InFlight::enter(&self.ledger);
        let result = target.save(&request.elements).await;
        drop(guard);
        result?;

        let mut ledger = self.ledger.lock();
        let superseded = ledger.persisted.is_some_and(|p| p > request.revision);
        if superseded {
            log::warn!(
                "save of revision {} finished after revision {:?}; ignoring",
                request.revision,
                ledger.persisted
            );
        } else {
            ledger.persisted = Some(request.revision);
        }
        Ok(SaveReceipt {
            revision: request.revision,
            superseded,
        })
    }

    /// Highest revision any save has written.
    pub fn persisted_revision(&self) -> Option<u64> {
        self.ledger.lock().persisted
    }

    pub fn in_flight(&self) -> usize {
        self.ledger.lock().in_flight
    }
}

/// Counts a save as in flight until dropped, including when the host abandons the
/// save future before it completes.
struct InFlight<'a> {
    ledger: &'a Mutex<SaveLedger>,
}

impl<'a> InFlight<'a> {
    fn enter(ledger: &'a Mutex<SaveLedger>) -> Self {
        ledger.lock().in_flight += 1;
        Self { ledger }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.ledger.lock().in_flight -= 1;
    }
}

/// Interval timer for auto-save. Polled by the host; fires only while dirty.
#[derive(Debug, Clone)]
pub struct AutoSave {
    interval: Duration,
    last_attempt: Instant,
}

impl AutoSave {
    pub fn new(interval: Duration, started_at: Instant) -> Self {
        Self {
            interval,
            last_attempt: started_at,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_due(&self, now: Instant, dirty: bool) -> bool {
        dirty && now.saturating_duration_since(self.last_attempt) >= self.interval
    }

    /// Returns `true` and restarts the interval when a save should be attempted now.
    pub fn poll(&mut self, now: Instant, dirty: bool) -> bool {
        if self.is_due(now, dirty) {
            self.last_attempt = now;
            true
        } else {
            false
        }
    }
}

/// Get a timestamp in seconds since the UNIX epoch
pub fn timestamp_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn autosave_waits_for_interval_and_dirt() {
        let start = Instant::now();
        let mut autosave = AutoSave::new(Duration::from_secs(10), start);

        assert!(!autosave.poll(start + Duration::from_secs(5), true));
        assert!(!autosave.poll(start + Duration::from_secs(11), false));
        assert!(autosave.poll(start + Duration::from_secs(11), true));
        // The interval restarts from the attempt.
        assert!(!autosave.poll(start + Duration::from_secs(15), true));
        assert!(autosave.poll(start + Duration::from_secs(21), true));
    }
}
