//! Host-side owner of the request store.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::bridge::ReportingBridge;
use crate::record::RecordedRequest;
use crate::store::RequestStore;

/// Owns the request store for one sandbox load.
///
/// The host creates one inspector per load and drops it on teardown or
/// reload; records never persist across loads. Bridge handles obtained from
/// [`RequestInspector::bridge`] hold only weak references, so a handle kept
/// alive by sandbox wiring cannot keep a torn-down store alive.
#[derive(Debug, Default)]
pub struct RequestInspector {
    store: Arc<Mutex<RequestStore>>,
}

impl RequestInspector {
    /// Creates an inspector with an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sandbox-facing bridge handle.
    ///
    /// Any number of handles may be created; all append to this inspector's
    /// store. Handles outliving the inspector drop their reports.
    #[must_use]
    pub fn bridge(&self) -> ReportingBridge {
        ReportingBridge::new(Arc::downgrade(&self.store))
    }

    /// Returns the earliest record whose URL exactly matches, if any.
    ///
    /// This is the only read path into the store. A miss is a normal result.
    #[must_use]
    pub fn find_recorded_request_for_url(&self, url: &str) -> Option<RecordedRequest> {
        self.lock().find_by_url(url).cloned()
    }

    /// Number of requests recorded so far.
    #[must_use]
    pub fn recorded_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, RequestStore> {
        // A poisoned lock only means a delivery panicked mid-append; the
        // store itself is still a readable Vec.
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bridge_reports_are_visible_through_the_query_surface() {
        let inspector = RequestInspector::new();
        let bridge = inspector.bridge();

        bridge.record_fetch("https://example.com/data", "GET", "", "{}", "at fetch");

        assert_eq!(inspector.recorded_count(), 1);
        let found = inspector
            .find_recorded_request_for_url("https://example.com/data")
            .expect("recorded request should be found");
        assert_eq!(found.method, "GET");
        assert_eq!(found.headers, "{}");
    }

    #[test]
    fn multiple_bridge_handles_share_one_store() {
        let inspector = RequestInspector::new();
        let first = inspector.bridge();
        let second = inspector.bridge();

        first.record_xhr("https://a.example/", "GET", "", "", "");
        second.record_xhr("https://b.example/", "GET", "", "", "");

        assert_eq!(inspector.recorded_count(), 2);
    }

    #[test]
    fn unknown_url_is_a_normal_miss() {
        let inspector = RequestInspector::new();
        assert!(inspector.find_recorded_request_for_url("https://nowhere.example/").is_none());
    }
}
